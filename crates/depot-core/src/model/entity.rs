use crate::model::field::FieldModel;
use std::fmt;

///
/// EntityModel
/// Minimal, hand-declared runtime model for one entity.
///

pub struct EntityModel {
    /// Fully-qualified Rust type path (diagnostics only).
    pub path: &'static str,
    /// Stable external name; doubles as the wire resource type.
    pub entity_name: &'static str,
    /// Primary key field name (names an entry in `fields`).
    pub primary_key: &'static str,
    /// Ordered field list (authoritative property-metadata map).
    pub fields: &'static [FieldModel],
}

impl EntityModel {
    /// Look up one declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldModel> {
        let fields: &'static [FieldModel] = self.fields;
        fields.iter().find(|field| field.name == name)
    }

    /// The declared primary-key field, when the model is well-formed.
    #[must_use]
    pub fn primary_key_field(&self) -> Option<&'static FieldModel> {
        self.field(self.primary_key)
    }

    /// Identity comparison between two static models.
    #[must_use]
    pub fn is(&'static self, other: &'static Self) -> bool {
        std::ptr::eq(self, other)
    }
}

// Models are cyclic through relation fields; print identity only.
impl fmt::Debug for EntityModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityModel({})", self.entity_name)
    }
}
