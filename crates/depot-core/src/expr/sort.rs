use crate::path::PropertyPath;

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

///
/// SortExpr
///
/// One sort key chained to its more-significant predecessor. The chain
/// head is the most-recently-added ("then sort by") key; walking `parent`
/// reaches the primary key, which interpreters evaluate first.
///

#[derive(Clone, Debug)]
pub struct SortExpr {
    pub path: PropertyPath,
    pub direction: SortDirection,
    /// More-significant sort key; `None` marks the primary key.
    pub parent: Option<Box<SortExpr>>,
}

impl SortExpr {
    #[must_use]
    pub const fn asc(path: PropertyPath) -> Self {
        Self {
            path,
            direction: SortDirection::Asc,
            parent: None,
        }
    }

    #[must_use]
    pub const fn desc(path: PropertyPath) -> Self {
        Self {
            path,
            direction: SortDirection::Desc,
            parent: None,
        }
    }

    /// Chain a less-significant ascending key onto this sort.
    #[must_use]
    pub fn then_asc(self, path: PropertyPath) -> Self {
        Self {
            path,
            direction: SortDirection::Asc,
            parent: Some(Box::new(self)),
        }
    }

    /// Chain a less-significant descending key onto this sort.
    #[must_use]
    pub fn then_desc(self, path: PropertyPath) -> Self {
        Self {
            path,
            direction: SortDirection::Desc,
            parent: Some(Box::new(self)),
        }
    }

    /// Number of keys in the chain.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.parent.as_ref().map_or(0, |parent| parent.depth())
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
    fn then_chaining_keeps_the_primary_key_as_parent() {
        let sort = SortExpr::asc(path("priority")).then_desc(path("title"));

        assert_eq!(sort.depth(), 2);
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(sort.path.dotted(), "title");

        let parent = sort.parent.as_deref().unwrap();
        assert_eq!(parent.direction, SortDirection::Asc);
        assert_eq!(parent.path.dotted(), "priority");
        assert!(parent.parent.is_none());
    }
}
