use crate::{error::SupportError, expr::PaginateExpr};
use std::ops::Range;

/// Compute the index window one pagination expression selects out of a
/// candidate collection of length `len`.
///
/// `offset` defaults to `0`, `limit` to the end of the collection.
/// Page-based specs normalise to offset/limit with 1-based page numbers.
/// Cursor specs have no in-memory interpretation.
pub fn window(paginate: &PaginateExpr, len: usize) -> Result<Range<usize>, SupportError> {
    match paginate {
        PaginateExpr::OffsetLimit { offset, limit } => {
            Ok(clamp(offset.unwrap_or(0), *limit, len))
        }
        PaginateExpr::PageSize { page, size } => {
            let page = page.unwrap_or(1).max(1);
            match size {
                Some(size) => Ok(clamp((page - 1).saturating_mul(*size), Some(*size), len)),
                None => Ok(0..len),
            }
        }
        PaginateExpr::Cursor { .. } => Err(SupportError::Expression {
            expression: paginate.label(),
            visitor: "memory::paginate",
        }),
    }
}

fn clamp(offset: u64, limit: Option<u64>, len: usize) -> Range<usize> {
    let start = usize::try_from(offset).unwrap_or(usize::MAX).min(len);
    let end = match limit {
        Some(limit) => start.saturating_add(usize::try_from(limit).unwrap_or(usize::MAX)),
        None => len,
    };

    start..end.min(len)
}

///
/// TESTS
///
