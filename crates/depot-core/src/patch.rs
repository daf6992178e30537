use crate::{error::PathError, path::PropertyPath, traits::EntityValues, value::Value};

///
/// EntityPatch
///
/// Ordered partial-entity patch carried by the Batch* commands. Entries
/// target root-level declared fields only: paths never touch live data, so
/// writes through a traversal (or onto the primary key) are refused at
/// construction.
///

#[derive(Clone, Debug, Default)]
pub struct EntityPatch {
    entries: Vec<(&'static str, Value)>,
}

impl EntityPatch {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add one field assignment to the patch.
    pub fn try_set(
        mut self,
        path: &PropertyPath,
        value: impl Into<Value>,
    ) -> Result<Self, PathError> {
        let info = path.leaf();

        if info.parent.is_some() || info.field.name == info.model.primary_key {
            return Err(PathError::Set {
                path: path.dotted(),
            });
        }

        self.entries.push((info.field.name, value.into()));
        Ok(self)
    }

    #[must_use]
    pub fn entries(&self) -> &[(&'static str, Value)] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every entry to one entity, in insertion order.
    pub fn apply_to(&self, entity: &mut dyn EntityValues) -> Result<(), PathError> {
        for (field, value) in &self.entries {
            entity.set_value(field, value.clone())?;
        }
        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{POST_MODEL, Post};

    fn path(name: &str) -> PropertyPath {
        PropertyPath::resolve(&POST_MODEL, name).unwrap()
    }

    #[test]
    fn applies_entries_in_insertion_order() {
        let patch = EntityPatch::new()
            .try_set(&path("title"), "updated")
            .unwrap()
            .try_set(&path("priority"), 9i64)
            .unwrap();

        let mut post = Post::new(1, "original", 1);
        patch.apply_to(&mut post).unwrap();

        assert_eq!(post.title, "updated");
        assert_eq!(post.priority, 9);
        assert_eq!(post.id, 1);
    }

    #[test]
    fn refuses_writes_through_a_traversal() {
        let err = EntityPatch::new()
            .try_set(&path("author.name"), "x")
            .unwrap_err();
        assert_eq!(
            err,
            PathError::Set {
                path: "author.name".to_string(),
            }
        );
    }

    #[test]
    fn refuses_primary_key_writes() {
        let err = EntityPatch::new().try_set(&path("id"), 2u64).unwrap_err();
        assert_eq!(
            err,
            PathError::Set {
                path: "id".to_string(),
            }
        );
    }
}
