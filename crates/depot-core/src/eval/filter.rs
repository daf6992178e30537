use crate::{
    eval::resolve_value,
    expr::{Cmp, FilterClause, FilterExpr},
    traits::EntityValues,
    value::Value,
};
use std::cmp::Ordering;

/// Evaluate one filter expression against one entity.
///
/// `And`/`Or` short-circuit. A property with no runtime value evaluates
/// as `Null`.
#[must_use]
pub fn matches(expr: &FilterExpr, entity: &dyn EntityValues) -> bool {
    match expr {
        FilterExpr::And(children) => children.iter().all(|child| matches(child, entity)),
        FilterExpr::Or(children) => children.iter().any(|child| matches(child, entity)),
        FilterExpr::Clause(clause) => matches_clause(clause, entity),
    }
}

fn matches_clause(clause: &FilterClause, entity: &dyn EntityValues) -> bool {
    let actual = resolve_value(&clause.path, entity).unwrap_or(Value::Null);

    match clause.cmp {
        Cmp::Eq => actual.equals(&clause.value),
        Cmp::Ne => !actual.equals(&clause.value),
        Cmp::Lt => ordered(&actual, &clause.value, |o| o == Ordering::Less),
        Cmp::Lte => ordered(&actual, &clause.value, |o| o != Ordering::Greater),
        Cmp::Gt => ordered(&actual, &clause.value, |o| o == Ordering::Greater),
        Cmp::Gte => ordered(&actual, &clause.value, |o| o != Ordering::Less),
        Cmp::In => member_of(&actual, &clause.value),
        Cmp::NotIn => !member_of(&actual, &clause.value),
        Cmp::Contains => text_test(&actual, &clause.value, |a, n| a.contains(n)),
        Cmp::NotContains => !text_test(&actual, &clause.value, |a, n| a.contains(n)),
        Cmp::StartsWith => text_test(&actual, &clause.value, |a, n| a.starts_with(n)),
        Cmp::NotStartsWith => !text_test(&actual, &clause.value, |a, n| a.starts_with(n)),
        Cmp::EndsWith => text_test(&actual, &clause.value, |a, n| a.ends_with(n)),
        Cmp::NotEndsWith => !text_test(&actual, &clause.value, |a, n| a.ends_with(n)),
    }
}

fn ordered(actual: &Value, expected: &Value, accept: impl FnOnce(Ordering) -> bool) -> bool {
    actual.compare(expected).is_some_and(accept)
}

// Linear membership scan; no hashing is needed for correctness.
fn member_of(actual: &Value, list: &Value) -> bool {
    list.as_list()
        .is_some_and(|values| values.iter().any(|value| value.equals(actual)))
}

// String-only operators: a non-string runtime value never matches the
// positive form, so its negation always does.
fn text_test(actual: &Value, needle: &Value, test: impl FnOnce(&str, &str) -> bool) -> bool {
    match (actual.as_text(), needle.as_text()) {
        (Some(actual), Some(needle)) => test(actual, needle),
        _ => false,
    }
}

///
/// TESTS
///
