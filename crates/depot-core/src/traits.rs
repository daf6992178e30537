use crate::{
    error::{PathError, StoreError},
    model::EntityModel,
    path::PropertyPath,
    value::Value,
};
use serde::{Serialize, de::DeserializeOwned};

///
/// EntityValues
///
/// Runtime field access for one entity instance. Dyn-safe so interpreters
/// can walk nested property chains without knowing concrete types.
///

pub trait EntityValues {
    /// Read one declared field as a literal value.
    fn value(&self, field: &str) -> Option<Value>;

    /// Write one declared field from a literal value.
    fn set_value(&mut self, field: &str, value: Value) -> Result<(), PathError>;

    /// Borrow a related entity for nested path traversal.
    fn related(&self, _field: &str) -> Option<&dyn EntityValues> {
        None
    }
}

///
/// EntityKind
///
/// A metadata-declared record type participating in data-access commands.
/// The associated model is the read-only property-metadata map every
/// resolver, interpreter, and codec consults.
///

pub trait EntityKind:
    EntityValues + Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    const MODEL: &'static EntityModel;

    /// Extract the primary-key value for identity matching.
    ///
    /// The key field is declared metadata; a missing runtime value is a
    /// read failure, not an undeclared property.
    fn key(&self) -> Result<Value, StoreError> {
        self.value(Self::MODEL.primary_key).ok_or_else(|| {
            PathError::Get {
                path: Self::MODEL.primary_key.to_string(),
            }
            .into()
        })
    }

    /// Resolve a dotted property path rooted at this entity type.
    fn path(path: &str) -> Result<PropertyPath, PathError> {
        PropertyPath::resolve(Self::MODEL, path)
    }
}
