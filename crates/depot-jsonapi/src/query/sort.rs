use crate::query::UrlVisitor;
use depot_core::expr::{SortDirection, SortExpr};

///
/// SortUrlVisitor
///
/// Renders a sort chain as comma-joined wire field names, descending keys
/// prefixed with `-`. The parent (primary) key recurses first so the
/// outermost key leads the list.
///

pub struct SortUrlVisitor;

impl UrlVisitor for SortUrlVisitor {
    fn prefix(&self) -> &'static str {
        "sort="
    }
}

impl SortUrlVisitor {
    /// Render the sort keys (without the prefix).
    #[must_use]
    pub fn render(&self, sort: &SortExpr) -> String {
        let mut rendered = String::new();

        if let Some(parent) = &sort.parent {
            rendered.push_str(&self.render(parent));
            rendered.push(',');
        }
        if sort.direction == SortDirection::Desc {
            rendered.push('-');
        }
        rendered.push_str(&sort.path.wire_dotted());

        rendered
    }

    /// Render the full fragment behind the `sort=` prefix.
    #[must_use]
    pub fn compile(&self, sort: &SortExpr) -> String {
        format!("{}{}", self.prefix(), self.render(sort))
    }
}

///
/// TESTS
///
