use crate::query::UrlVisitor;
use depot_core::{error::SupportError, expr::PaginateExpr};

///
/// PageUrlVisitor
///
/// Renders pagination as `page[limit]=N` / `page[offset]=N`, omitting
/// whichever bound is unset and joining with `&`. Page-based specs
/// normalise to offset/limit first; cursor specs have no representation
/// in this wire grammar.
///

pub struct PageUrlVisitor;

impl UrlVisitor for PageUrlVisitor {
    fn prefix(&self) -> &'static str {
        "page"
    }
}

impl PageUrlVisitor {
    /// Render the full fragment. Empty when no bound is set.
    pub fn compile(&self, paginate: &PaginateExpr) -> Result<String, SupportError> {
        let (offset, limit) = match paginate {
            PaginateExpr::OffsetLimit { offset, limit } => (*offset, *limit),
            PaginateExpr::PageSize { page, size } => match size {
                Some(size) => (
                    Some(page.unwrap_or(1).max(1).saturating_sub(1).saturating_mul(*size)),
                    Some(*size),
                ),
                None => (None, None),
            },
            PaginateExpr::Cursor { .. } => {
                return Err(SupportError::Expression {
                    expression: paginate.label(),
                    visitor: "jsonapi::page",
                });
            }
        };

        let mut fragments = Vec::new();
        if let Some(limit) = limit {
            fragments.push(format!("{}[limit]={limit}", self.prefix()));
        }
        if let Some(offset) = offset {
            fragments.push(format!("{}[offset]={offset}", self.prefix()));
        }

        Ok(fragments.join("&"))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_limit_and_offset_joined_with_ampersand() {
        let visitor = PageUrlVisitor;
        assert_eq!(
            visitor.compile(&PaginateExpr::offset_limit(20, 10)).unwrap(),
            "page[limit]=10&page[offset]=20"
        );
    }

    #[test]
    fn unset_bounds_are_omitted() {
        let visitor = PageUrlVisitor;
        assert_eq!(
            visitor.compile(&PaginateExpr::limit(10)).unwrap(),
            "page[limit]=10"
        );
        assert_eq!(
            visitor.compile(&PaginateExpr::offset(5)).unwrap(),
            "page[offset]=5"
        );
        assert_eq!(
            visitor
                .compile(&PaginateExpr::OffsetLimit {
                    offset: None,
                    limit: None,
                })
                .unwrap(),
            ""
        );
    }

    #[test]
    fn page_specs_normalise_to_offsets() {
        let visitor = PageUrlVisitor;
        assert_eq!(
            visitor.compile(&PaginateExpr::page_size(3, 10)).unwrap(),
            "page[limit]=10&page[offset]=20"
        );
        assert_eq!(visitor.compile(&PaginateExpr::page(3)).unwrap(), "");
    }

    #[test]
    fn cursor_specs_are_not_representable() {
        let visitor = PageUrlVisitor;
        let err = visitor
            .compile(&PaginateExpr::take_after_cursor(10, "tok"))
            .unwrap_err();

        assert_eq!(
            err,
            SupportError::Expression {
                expression: "paginate::cursor",
                visitor: "jsonapi::page",
            }
        );
    }
}
