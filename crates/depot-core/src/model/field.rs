use crate::model::entity::EntityModel;

///
/// FieldModel
/// Runtime field metadata used by path resolution and wire serialization.
///

#[derive(Debug)]
pub struct FieldModel {
    /// Field name as declared on the Rust struct.
    pub name: &'static str,
    /// Serialized name used on the wire.
    pub wire_name: &'static str,
    /// Runtime type shape.
    pub kind: FieldKind,
}

///
/// FieldKind
///
/// Minimal type surface needed by path traversal and the wire codec.
/// Relation traversal steps through `Entity` and entity-element `List`
/// fields; everything else is a leaf.
///

#[derive(Debug)]
pub enum FieldKind {
    // Scalar primitives
    Bool,
    Int,
    Uint,
    Float,
    Text,
    Timestamp,

    /// Collection field; `elem` is the single generic argument, when known.
    List { elem: Option<&'static FieldKind> },

    /// To-one relation to another declared entity.
    Entity(&'static EntityModel),
}

impl FieldKind {
    /// Entity model reachable by traversing through this field, if any.
    #[must_use]
    pub fn target_entity(&self) -> Option<&'static EntityModel> {
        match self {
            Self::Entity(model) => Some(model),
            Self::List {
                elem: Some(Self::Entity(model)),
            } => Some(model),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List { .. })
    }

    /// True when the field holds related entities rather than an attribute.
    #[must_use]
    pub fn is_relation(&self) -> bool {
        self.target_entity().is_some()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    static LEAF_MODEL: EntityModel = EntityModel {
        path: "tests::Leaf",
        entity_name: "leaves",
        primary_key: "id",
        fields: &[FieldModel {
            name: "id",
            wire_name: "id",
            kind: FieldKind::Uint,
        }],
    };

    static LEAF_ENTITY_KIND: FieldKind = FieldKind::Entity(&LEAF_MODEL);

    #[test]
    fn relation_detection_spans_to_one_and_collection() {
        let to_one = FieldKind::Entity(&LEAF_MODEL);
        assert!(to_one.is_relation());
        assert!(!to_one.is_collection());

        let collection = FieldKind::List {
            elem: Some(&LEAF_ENTITY_KIND),
        };
        assert!(collection.is_relation());
        assert!(collection.is_collection());

        let scalar_list = FieldKind::List {
            elem: Some(&FieldKind::Text),
        };
        assert!(!scalar_list.is_relation());

        let untyped_list = FieldKind::List { elem: None };
        assert!(untyped_list.is_collection());
        assert!(!untyped_list.is_relation());
    }

    #[test]
    fn field_lookup_uses_declared_names() {
        assert!(LEAF_MODEL.field("id").is_some());
        assert!(LEAF_MODEL.field("missing").is_none());
        assert_eq!(LEAF_MODEL.primary_key_field().map(|f| f.name), Some("id"));
    }
}
