use crate::{
    eval::resolve_value,
    expr::{SortDirection, SortExpr},
    traits::EntityValues,
    value::Value,
};
use std::cmp::Ordering;

/// Compare two entities under one sort chain.
///
/// The parent (more-significant) key is evaluated first; this node's own
/// property only breaks ties. Values that do not order (mixed kinds, both
/// missing) compare as equal so the surrounding sort stays stable.
#[must_use]
pub fn compare(sort: &SortExpr, a: &dyn EntityValues, b: &dyn EntityValues) -> Ordering {
    if let Some(parent) = &sort.parent {
        let significant = compare(parent, a, b);
        if significant != Ordering::Equal {
            return significant;
        }
    }

    let left = resolve_value(&sort.path, a).unwrap_or(Value::Null);
    let right = resolve_value(&sort.path, b).unwrap_or(Value::Null);
    let ordering = left.compare(&right).unwrap_or(Ordering::Equal);

    match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PropertyPath;
    use crate::test_fixtures::{POST_MODEL, Post};

    fn path(name: &str) -> PropertyPath {
        PropertyPath::resolve(&POST_MODEL, name).unwrap()
    }

    #[test]
    fn single_key_orders_ascending_and_descending() {
        let low = Post::new(1, "a", 1);
        let high = Post::new(2, "b", 9);

        let asc = SortExpr::asc(path("priority"));
        assert_eq!(compare(&asc, &low, &high), Ordering::Less);
        assert_eq!(compare(&asc, &high, &low), Ordering::Greater);
        assert_eq!(compare(&asc, &low, &low), Ordering::Equal);

        let desc = SortExpr::desc(path("priority"));
        assert_eq!(compare(&desc, &low, &high), Ordering::Greater);
    }

    #[test]
    fn secondary_key_only_breaks_primary_ties() {
        let sort = SortExpr::asc(path("priority")).then_asc(path("title"));

        let first = Post::new(1, "zebra", 1);
        let second = Post::new(2, "apple", 2);
        // primary key differs: title is ignored
        assert_eq!(compare(&sort, &first, &second), Ordering::Less);

        let tied_a = Post::new(3, "apple", 5);
        let tied_b = Post::new(4, "zebra", 5);
        // primary key ties: title decides
        assert_eq!(compare(&sort, &tied_a, &tied_b), Ordering::Less);
        assert_eq!(compare(&sort, &tied_b, &tied_a), Ordering::Greater);
    }

    #[test]
    fn sorting_a_vec_applies_the_chain() {
        let mut posts = vec![
            Post::new(1, "pears", 2),
            Post::new(2, "apples", 1),
            Post::new(3, "figs", 2),
        ];
        let sort = SortExpr::asc(path("priority")).then_asc(path("title"));
        posts.sort_by(|a, b| compare(&sort, a, b));

        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["apples", "figs", "pears"]);
    }
}
