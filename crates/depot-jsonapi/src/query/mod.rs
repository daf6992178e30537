//! Wire expression visitors: compile expression trees into JSON:API
//! query-string fragments.
//!
//! Each visitor renders one expression family behind its own prefix; the
//! provider composes the active fragments into a browse href in a fixed
//! order.

pub mod filter;
pub mod include;
pub mod page;
pub mod sort;

pub use filter::FilterUrlVisitor;
pub use include::IncludeUrlVisitor;
pub use page::PageUrlVisitor;
pub use sort::SortUrlVisitor;

use depot_core::value::Value;

///
/// UrlVisitor
///
/// Prefix-bearing base for the query-string visitors. The literal helper
/// serializes a value for interpolation into a fragment: non-null values
/// are quoted, null renders as the literal `null`, and lists flatten to a
/// comma-joined run of serialized elements.
///

pub trait UrlVisitor {
    /// Query-string prefix this visitor renders behind (e.g. `filter=`).
    fn prefix(&self) -> &'static str;

    fn literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(value) => format!("'{value}'"),
            Value::Int(value) => format!("'{value}'"),
            Value::Uint(value) => format!("'{value}'"),
            Value::Float(value) => format!("'{value}'"),
            Value::Text(value) => format!("'{value}'"),
            Value::List(items) => items
                .iter()
                .map(|item| self.literal(item))
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;

    impl UrlVisitor for Plain {
        fn prefix(&self) -> &'static str {
            "plain="
        }
    }

    #[test]
    fn literals_quote_non_null_values() {
        assert_eq!(Plain.literal(&Value::Text("Alex".to_string())), "'Alex'");
        assert_eq!(Plain.literal(&Value::Int(-3)), "'-3'");
        assert_eq!(Plain.literal(&Value::Bool(true)), "'true'");
        assert_eq!(Plain.literal(&Value::Null), "null");
    }

    #[test]
    fn list_literals_flatten_comma_joined() {
        let list = Value::List(vec![
            Value::Int(1),
            Value::Null,
            Value::Text("x".to_string()),
        ]);
        assert_eq!(Plain.literal(&list), "'1',null,'x'");
    }
}
