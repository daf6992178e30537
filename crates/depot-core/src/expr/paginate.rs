///
/// PaginateExpr
///
/// One of three mutually exclusive pagination strategies, chosen by the
/// factory used. Partial specs (`offset` without `limit`, `page` without
/// `size`) are representable; interpreters apply their own defaults.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PaginateExpr {
    /// Slice by absolute offset and bound.
    OffsetLimit {
        offset: Option<u64>,
        limit: Option<u64>,
    },
    /// Slice by page number (1-based) and page size.
    PageSize { page: Option<u64>, size: Option<u64> },
    /// Cursor continuation: take up to `take` around opaque cursor tokens.
    Cursor {
        take: Option<u64>,
        after: Option<String>,
        before: Option<String>,
    },
}

impl PaginateExpr {
    // --- Offset / limit ---

    #[must_use]
    pub const fn offset(offset: u64) -> Self {
        Self::OffsetLimit {
            offset: Some(offset),
            limit: None,
        }
    }

    #[must_use]
    pub const fn limit(limit: u64) -> Self {
        Self::OffsetLimit {
            offset: None,
            limit: Some(limit),
        }
    }

    #[must_use]
    pub const fn offset_limit(offset: u64, limit: u64) -> Self {
        Self::OffsetLimit {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    // --- Page / size ---

    #[must_use]
    pub const fn page(page: u64) -> Self {
        Self::PageSize {
            page: Some(page),
            size: None,
        }
    }

    #[must_use]
    pub const fn size(size: u64) -> Self {
        Self::PageSize {
            page: None,
            size: Some(size),
        }
    }

    #[must_use]
    pub const fn page_size(page: u64, size: u64) -> Self {
        Self::PageSize {
            page: Some(page),
            size: Some(size),
        }
    }

    // --- Cursor ---

    #[must_use]
    pub const fn take(take: u64) -> Self {
        Self::Cursor {
            take: Some(take),
            after: None,
            before: None,
        }
    }

    #[must_use]
    pub fn take_after_cursor(take: u64, after: impl Into<String>) -> Self {
        Self::Cursor {
            take: Some(take),
            after: Some(after.into()),
            before: None,
        }
    }

    #[must_use]
    pub fn take_before_cursor(take: u64, before: impl Into<String>) -> Self {
        Self::Cursor {
            take: Some(take),
            after: None,
            before: Some(before.into()),
        }
    }

    #[must_use]
    pub fn take_between_cursors(
        take: u64,
        after: impl Into<String>,
        before: impl Into<String>,
    ) -> Self {
        Self::Cursor {
            take: Some(take),
            after: Some(after.into()),
            before: Some(before.into()),
        }
    }

    /// Merge a later pagination call into this one.
    ///
    /// Same-strategy specs union their bounds (later `Some` wins); a
    /// strategy switch replaces the spec wholesale.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (
                Self::OffsetLimit { offset, limit },
                Self::OffsetLimit {
                    offset: next_offset,
                    limit: next_limit,
                },
            ) => Self::OffsetLimit {
                offset: next_offset.or(offset),
                limit: next_limit.or(limit),
            },
            (
                Self::PageSize { page, size },
                Self::PageSize {
                    page: next_page,
                    size: next_size,
                },
            ) => Self::PageSize {
                page: next_page.or(page),
                size: next_size.or(size),
            },
            (_, replacement) => replacement,
        }
    }

    /// Stable label used in capability diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OffsetLimit { .. } => "paginate::offset_limit",
            Self::PageSize { .. } => "paginate::page_size",
            Self::Cursor { .. } => "paginate::cursor",
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factories_pick_the_strategy() {
        assert_eq!(
            PaginateExpr::offset_limit(3, 5),
            PaginateExpr::OffsetLimit {
                offset: Some(3),
                limit: Some(5),
            }
        );
        assert_eq!(
            PaginateExpr::page_size(2, 25),
            PaginateExpr::PageSize {
                page: Some(2),
                size: Some(25),
            }
        );
        assert_eq!(
            PaginateExpr::take_after_cursor(10, "abc"),
            PaginateExpr::Cursor {
                take: Some(10),
                after: Some("abc".to_string()),
                before: None,
            }
        );
    }

    #[test]
    fn merge_unions_bounds_within_one_strategy() {
        let merged = PaginateExpr::offset(3).merge(PaginateExpr::limit(5));
        assert_eq!(merged, PaginateExpr::offset_limit(3, 5));

        let merged = PaginateExpr::page(2).merge(PaginateExpr::size(25));
        assert_eq!(merged, PaginateExpr::page_size(2, 25));
    }

    #[test]
    fn merge_replaces_on_strategy_switch() {
        let merged = PaginateExpr::offset_limit(3, 5).merge(PaginateExpr::take(10));
        assert_eq!(merged, PaginateExpr::take(10));
    }
}
