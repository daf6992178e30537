use crate::{path::PropertyPath, value::Value};
use std::ops::{BitAnd, BitOr};

///
/// Cmp
///
/// Comparison operators usable in filter clauses. The string family and
/// membership carry explicit negated forms; ordering operators negate
/// through their dual (`lte` instead of "not gt").
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cmp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    NotIn,
    Contains,
    NotContains,
    StartsWith,
    NotStartsWith,
    EndsWith,
    NotEndsWith,
}

impl Cmp {
    /// True for operators whose wire form wraps the positive form in `not(..)`.
    #[must_use]
    pub const fn is_negated(self) -> bool {
        matches!(
            self,
            Self::Ne | Self::NotIn | Self::NotContains | Self::NotStartsWith | Self::NotEndsWith
        )
    }

    /// The positive counterpart of a negated operator.
    #[must_use]
    pub const fn positive(self) -> Self {
        match self {
            Self::Ne => Self::Eq,
            Self::NotIn => Self::In,
            Self::NotContains => Self::Contains,
            Self::NotStartsWith => Self::StartsWith,
            Self::NotEndsWith => Self::EndsWith,
            other => other,
        }
    }
}

///
/// FilterClause
/// One comparison: `path cmp value`.
///

#[derive(Clone, Debug)]
pub struct FilterClause {
    pub path: PropertyPath,
    pub cmp: Cmp,
    pub value: Value,
}

impl FilterClause {
    #[must_use]
    pub fn new(path: PropertyPath, cmp: Cmp, value: impl Into<Value>) -> Self {
        Self {
            path,
            cmp,
            value: value.into(),
        }
    }
}

///
/// FilterExpr
///
/// Immutable filter tree. Composites keep their children exactly as
/// written — no flattening or simplification — so backend compilers see
/// the nesting the caller expressed.
///

#[derive(Clone, Debug)]
pub enum FilterExpr {
    Clause(FilterClause),
    And(Vec<Self>),
    Or(Vec<Self>),
}

impl FilterExpr {
    /// Create a single clause: `path cmp value`.
    #[must_use]
    pub fn clause(path: PropertyPath, cmp: Cmp, value: impl Into<Value>) -> Self {
        Self::Clause(FilterClause::new(path, cmp, value))
    }

    // --- Equality ---

    #[must_use]
    pub fn eq(path: PropertyPath, value: impl Into<Value>) -> Self {
        Self::clause(path, Cmp::Eq, value)
    }

    #[must_use]
    pub fn ne(path: PropertyPath, value: impl Into<Value>) -> Self {
        Self::clause(path, Cmp::Ne, value)
    }

    // --- Ordering ---

    #[must_use]
    pub fn lt(path: PropertyPath, value: impl Into<Value>) -> Self {
        Self::clause(path, Cmp::Lt, value)
    }

    #[must_use]
    pub fn lte(path: PropertyPath, value: impl Into<Value>) -> Self {
        Self::clause(path, Cmp::Lte, value)
    }

    #[must_use]
    pub fn gt(path: PropertyPath, value: impl Into<Value>) -> Self {
        Self::clause(path, Cmp::Gt, value)
    }

    #[must_use]
    pub fn gte(path: PropertyPath, value: impl Into<Value>) -> Self {
        Self::clause(path, Cmp::Gte, value)
    }

    // --- Membership ---

    #[must_use]
    pub fn in_iter<I>(path: PropertyPath, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::clause(
            path,
            Cmp::In,
            Value::List(values.into_iter().map(Into::into).collect()),
        )
    }

    #[must_use]
    pub fn not_in_iter<I>(path: PropertyPath, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::clause(
            path,
            Cmp::NotIn,
            Value::List(values.into_iter().map(Into::into).collect()),
        )
    }

    // --- Text ---

    #[must_use]
    pub fn contains(path: PropertyPath, value: impl Into<Value>) -> Self {
        Self::clause(path, Cmp::Contains, value)
    }

    #[must_use]
    pub fn not_contains(path: PropertyPath, value: impl Into<Value>) -> Self {
        Self::clause(path, Cmp::NotContains, value)
    }

    #[must_use]
    pub fn starts_with(path: PropertyPath, value: impl Into<Value>) -> Self {
        Self::clause(path, Cmp::StartsWith, value)
    }

    #[must_use]
    pub fn not_starts_with(path: PropertyPath, value: impl Into<Value>) -> Self {
        Self::clause(path, Cmp::NotStartsWith, value)
    }

    #[must_use]
    pub fn ends_with(path: PropertyPath, value: impl Into<Value>) -> Self {
        Self::clause(path, Cmp::EndsWith, value)
    }

    #[must_use]
    pub fn not_ends_with(path: PropertyPath, value: impl Into<Value>) -> Self {
        Self::clause(path, Cmp::NotEndsWith, value)
    }

    // --- Composition ---

    /// Combine two expressions into an `And` node. Nesting is preserved.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::And(vec![self, other])
    }

    /// Combine two expressions into an `Or` node. Nesting is preserved.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::Or(vec![self, other])
    }
}

impl BitAnd for FilterExpr {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for FilterExpr {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

///
/// TESTS
///
