use crate::query::UrlVisitor;
use depot_core::expr::{Cmp, FilterClause, FilterExpr};

///
/// FilterUrlVisitor
///
/// Renders a filter tree as the nested function-call grammar of JSON:API
/// .NET-style servers: `equals(path, 'value')`, `any(path, 'a','b')`,
/// `and(f1,f2)`, with negated operators wrapped in `not(..)`. Property
/// paths are dot-joined wire names.
///

pub struct FilterUrlVisitor;

impl UrlVisitor for FilterUrlVisitor {
    fn prefix(&self) -> &'static str {
        "filter="
    }
}

impl FilterUrlVisitor {
    /// Render the expression body (without the prefix).
    #[must_use]
    pub fn render(&self, expr: &FilterExpr) -> String {
        match expr {
            FilterExpr::And(children) => format!("and({})", self.render_children(children)),
            FilterExpr::Or(children) => format!("or({})", self.render_children(children)),
            FilterExpr::Clause(clause) => self.render_clause(clause),
        }
    }

    /// Render the full fragment behind the `filter=` prefix.
    #[must_use]
    pub fn compile(&self, expr: &FilterExpr) -> String {
        format!("{}{}", self.prefix(), self.render(expr))
    }

    fn render_children(&self, children: &[FilterExpr]) -> String {
        children
            .iter()
            .map(|child| self.render(child))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn render_clause(&self, clause: &FilterClause) -> String {
        let path = clause.path.wire_dotted();
        let literal = self.literal(&clause.value);

        let positive = match clause.cmp {
            Cmp::Eq | Cmp::Ne => format!("equals({path}, {literal})"),
            Cmp::Lt => format!("lessThan({path}, {literal})"),
            Cmp::Lte => format!("lessOrEqual({path}, {literal})"),
            Cmp::Gt => format!("greaterThan({path}, {literal})"),
            Cmp::Gte => format!("greaterOrEqual({path}, {literal})"),
            Cmp::In | Cmp::NotIn => format!("any({path}, {literal})"),
            Cmp::Contains | Cmp::NotContains => format!("contains({path}, {literal})"),
            Cmp::StartsWith | Cmp::NotStartsWith => format!("startsWith({path}, {literal})"),
            Cmp::EndsWith | Cmp::NotEndsWith => format!("endsWith({path}, {literal})"),
        };

        if clause.cmp.is_negated() {
            format!("not({positive})")
        } else {
            positive
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{USER_MODEL, User};
    use depot_core::{path::PropertyPath, traits::EntityKind};

    fn path(name: &str) -> PropertyPath {
        PropertyPath::resolve(&USER_MODEL, name).unwrap()
    }

    #[test]
    fn equality_renders_the_wire_grammar() {
        let visitor = FilterUrlVisitor;
        let expr = FilterExpr::eq(User::path("name").unwrap(), "Alex");

        assert_eq!(visitor.render(&expr), "equals(display-name, 'Alex')");
        assert_eq!(visitor.compile(&expr), "filter=equals(display-name, 'Alex')");
    }

    #[test]
    fn negated_operators_wrap_in_not() {
        let visitor = FilterUrlVisitor;

        assert_eq!(
            visitor.render(&FilterExpr::ne(path("priority"), 3)),
            "not(equals(priority, '3'))"
        );
        assert_eq!(
            visitor.render(&FilterExpr::not_contains(path("name"), "x")),
            "not(contains(display-name, 'x'))"
        );
        assert_eq!(
            visitor.render(&FilterExpr::not_in_iter(path("priority"), [1, 2])),
            "not(any(priority, '1','2'))"
        );
    }

    #[test]
    fn ordering_and_text_operators_render_their_functions() {
        let visitor = FilterUrlVisitor;

        assert_eq!(
            visitor.render(&FilterExpr::gt(path("priority"), 5)),
            "greaterThan(priority, '5')"
        );
        assert_eq!(
            visitor.render(&FilterExpr::gte(path("priority"), 5)),
            "greaterOrEqual(priority, '5')"
        );
        assert_eq!(
            visitor.render(&FilterExpr::lt(path("priority"), 5)),
            "lessThan(priority, '5')"
        );
        assert_eq!(
            visitor.render(&FilterExpr::lte(path("priority"), 5)),
            "lessOrEqual(priority, '5')"
        );
        assert_eq!(
            visitor.render(&FilterExpr::starts_with(path("name"), "Al")),
            "startsWith(display-name, 'Al')"
        );
        assert_eq!(
            visitor.render(&FilterExpr::ends_with(path("name"), "ex")),
            "endsWith(display-name, 'ex')"
        );
    }

    #[test]
    fn membership_flattens_the_value_list() {
        let visitor = FilterUrlVisitor;
        let expr = FilterExpr::in_iter(path("name"), ["a", "b"]);

        assert_eq!(visitor.render(&expr), "any(display-name, 'a','b')");
    }

    #[test]
    fn composites_nest_in_written_order() {
        let visitor = FilterUrlVisitor;
        let expr = FilterExpr::eq(path("name"), "a")
            .and(FilterExpr::gt(path("priority"), 2))
            .or(FilterExpr::eq(path("name"), "b"));

        assert_eq!(
            visitor.render(&expr),
            "or(and(equals(display-name, 'a'),greaterThan(priority, '2')),equals(display-name, 'b'))"
        );
    }

    #[test]
    fn nested_paths_render_wire_names() {
        let visitor = FilterUrlVisitor;
        let expr = FilterExpr::eq(path("team.name"), "core");

        assert_eq!(visitor.render(&expr), "equals(team.name, 'core')");
    }

    #[test]
    fn null_literals_render_unquoted() {
        let visitor = FilterUrlVisitor;
        let expr = FilterExpr::eq(path("name"), Option::<String>::None);

        assert_eq!(visitor.render(&expr), "equals(display-name, null)");
    }
}
