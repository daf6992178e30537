use crate::query::UrlVisitor;
use depot_core::expr::IncludeExpr;

///
/// IncludeUrlVisitor
///
/// Renders an include chain as wire relation paths: nested ("then")
/// includes drill down with `.`, sibling root-level includes join with
/// `,`. The distinction comes from the root marker each node carries.
///

pub struct IncludeUrlVisitor;

impl UrlVisitor for IncludeUrlVisitor {
    fn prefix(&self) -> &'static str {
        "include="
    }
}

impl IncludeUrlVisitor {
    /// Render the include paths (without the prefix).
    #[must_use]
    pub fn render(&self, include: &IncludeExpr) -> String {
        let mut rendered = String::new();

        if let Some(parent) = &include.parent {
            rendered.push_str(&self.render(parent));
            rendered.push(if include.is_root_level() { ',' } else { '.' });
        }

        if include.is_root_level() {
            rendered.push_str(&include.path.wire_dotted());
        } else {
            // nested include: the parent already rendered the lead-in path
            rendered.push_str(include.path.field().wire_name);
        }

        rendered
    }

    /// Render the full fragment behind the `include=` prefix.
    #[must_use]
    pub fn compile(&self, include: &IncludeExpr) -> String {
        format!("{}{}", self.prefix(), self.render(include))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::USER_MODEL;
    use depot_core::path::PropertyPath;

    fn path(name: &str) -> PropertyPath {
        PropertyPath::resolve(&USER_MODEL, name).unwrap()
    }

    #[test]
    fn nested_includes_drill_down_with_dots() {
        let visitor = IncludeUrlVisitor;
        let team = path("team");
        let include = IncludeExpr::relation(&USER_MODEL, team.clone())
            .then(team.extend("name").unwrap());

        assert_eq!(visitor.render(&include), "team.name");
    }

    #[test]
    fn sibling_root_includes_join_with_commas() {
        let visitor = IncludeUrlVisitor;
        let include = IncludeExpr::relation(&USER_MODEL, path("team"))
            .and_relation(&USER_MODEL, path("friends"));

        assert_eq!(visitor.render(&include), "team,friends");
        assert_eq!(visitor.compile(&include), "include=team,friends");
    }

    #[test]
    fn mixed_chains_interleave_both_separators() {
        let visitor = IncludeUrlVisitor;
        let team = path("team");
        let include = IncludeExpr::relation(&USER_MODEL, team.clone())
            .then(team.extend("name").unwrap())
            .and_relation(&USER_MODEL, path("friends"));

        assert_eq!(visitor.render(&include), "team.name,friends");
    }
}
