use crate::{model::EntityModel, path::PropertyPath};

///
/// IncludeExpr
///
/// Eager-load directive for one relation, chained to previously added
/// includes. The `root` marker is present on root-level includes and absent
/// on nested "then" includes; wire compilers use it to pick the sibling
/// (`,`) versus drill-down (`.`) separator.
///

#[derive(Clone, Debug)]
pub struct IncludeExpr {
    pub path: PropertyPath,
    pub parent: Option<Box<IncludeExpr>>,
    /// Owning root model; present only for root-level includes.
    pub root: Option<&'static EntityModel>,
}

impl IncludeExpr {
    /// Root-level include of one relation.
    #[must_use]
    pub const fn relation(root: &'static EntityModel, path: PropertyPath) -> Self {
        Self {
            path,
            parent: None,
            root: Some(root),
        }
    }

    /// Chain a sibling root-level include after this one.
    #[must_use]
    pub fn and_relation(self, root: &'static EntityModel, path: PropertyPath) -> Self {
        Self {
            path,
            parent: Some(Box::new(self)),
            root: Some(root),
        }
    }

    /// Chain a nested include drilling into the previously included relation.
    #[must_use]
    pub fn then(self, path: PropertyPath) -> Self {
        Self {
            path,
            parent: Some(Box::new(self)),
            root: None,
        }
    }

    /// True when this node is a root-level include.
    #[must_use]
    pub const fn is_root_level(&self) -> bool {
        self.root.is_some()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::POST_MODEL;

    fn path(name: &str) -> PropertyPath {
        PropertyPath::resolve(&POST_MODEL, name).unwrap()
    }

    #[test]
    fn nested_includes_drop_the_root_marker() {
        let chain = IncludeExpr::relation(&POST_MODEL, path("author"))
            .then(path("author").extend("name").unwrap());

        assert!(!chain.is_root_level());
        let parent = chain.parent.as_deref().unwrap();
        assert!(parent.is_root_level());
        assert!(parent.root.unwrap().is(&POST_MODEL));
    }

    #[test]
    fn sibling_includes_keep_the_root_marker() {
        let chain = IncludeExpr::relation(&POST_MODEL, path("author"))
            .and_relation(&POST_MODEL, path("reviews"));

        assert!(chain.is_root_level());
        assert!(chain.parent.as_deref().unwrap().is_root_level());
    }
}
