use crate::{
    error::PathError,
    model::{EntityModel, FieldKind, FieldModel},
};
use std::{fmt, sync::Arc};

///
/// PropertyInfo
///
/// One resolved step of a property-path traversal: the owning entity model,
/// the declared field, and the previous step. Nodes chain leaf→root; a node
/// with no parent belongs to the query root.
///

#[derive(Clone, Debug)]
pub struct PropertyInfo {
    /// Entity model that declares this property.
    pub model: &'static EntityModel,
    /// Declared field metadata.
    pub field: &'static FieldModel,
    /// Previous traversal step; `None` marks the query root.
    pub parent: Option<Arc<PropertyInfo>>,
}

///
/// PropertyPath
///
/// Leaf handle over a resolved `PropertyInfo` chain. Resolution is a pure
/// function of metadata — no entity instance is ever touched.
///

#[derive(Clone, Debug)]
pub struct PropertyPath {
    leaf: Arc<PropertyInfo>,
}

impl PropertyPath {
    /// Resolve a dotted access path (`"author.name"`) against a root model.
    ///
    /// Each segment is looked up in the current model's property map;
    /// an undeclared name fails with the dotted path walked so far.
    /// Traversal continues through to-one relations and through collection
    /// relations whose element entity type is declared; a collection without
    /// element metadata cannot be stepped through.
    pub fn resolve(root: &'static EntityModel, path: &str) -> Result<Self, PathError> {
        let mut leaf: Option<Arc<PropertyInfo>> = None;
        let mut model = root;
        let mut walked = String::new();
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);

            let field = model.field(segment).ok_or_else(|| PathError::NotDeclared {
                entity: root.entity_name,
                path: walked.clone(),
            })?;

            leaf = Some(Arc::new(PropertyInfo {
                model,
                field,
                parent: leaf.take(),
            }));

            if let Some(next) = segments.peek() {
                model = Self::step_target(root, field, &walked, next)?;
            }
        }

        leaf.map(|leaf| Self { leaf }).ok_or(PathError::NotDeclared {
            entity: root.entity_name,
            path: String::new(),
        })
    }

    /// Resolve one more segment below the current leaf.
    pub fn extend(&self, segment: &str) -> Result<Self, PathError> {
        let walked = self.dotted();
        let root = self.root_model();
        let model = Self::step_target(root, self.leaf.field, &walked, segment)?;

        let field = model.field(segment).ok_or_else(|| PathError::NotDeclared {
            entity: root.entity_name,
            path: format!("{walked}.{segment}"),
        })?;

        Ok(Self {
            leaf: Arc::new(PropertyInfo {
                model,
                field,
                parent: Some(self.leaf.clone()),
            }),
        })
    }

    // Model reached by stepping through `field` toward `next`.
    fn step_target(
        root: &'static EntityModel,
        field: &'static FieldModel,
        walked: &str,
        next: &str,
    ) -> Result<&'static EntityModel, PathError> {
        match &field.kind {
            FieldKind::Entity(target) => Ok(*target),
            FieldKind::List { .. } => {
                field
                    .kind
                    .target_entity()
                    .ok_or_else(|| PathError::GenericMetadataNotFound {
                        path: walked.to_string(),
                    })
            }
            _ => Err(PathError::NotDeclared {
                entity: root.entity_name,
                path: format!("{walked}.{next}"),
            }),
        }
    }

    /// The resolved leaf step.
    #[must_use]
    pub fn leaf(&self) -> &PropertyInfo {
        &self.leaf
    }

    /// Declared field metadata of the leaf step.
    #[must_use]
    pub fn field(&self) -> &'static FieldModel {
        self.leaf.field
    }

    /// Entity model the whole chain is rooted at.
    #[must_use]
    pub fn root_model(&self) -> &'static EntityModel {
        let mut info: &PropertyInfo = &self.leaf;
        while let Some(parent) = &info.parent {
            info = parent;
        }
        info.model
    }

    /// True when the leaf sits directly on the root model.
    #[must_use]
    pub fn is_root_level(&self) -> bool {
        self.leaf.parent.is_none()
    }

    /// Declared segment names, root first.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut info: Option<&PropertyInfo> = Some(&self.leaf);
        while let Some(step) = info {
            names.push(step.field.name);
            info = step.parent.as_deref();
        }
        names.reverse();
        names
    }

    /// Dotted source-name rendering, root first.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.names().join(".")
    }

    /// Dotted wire-name rendering, root first.
    #[must_use]
    pub fn wire_dotted(&self) -> String {
        let mut names = Vec::new();
        let mut info: Option<&PropertyInfo> = Some(&self.leaf);
        while let Some(step) = info {
            names.push(step.field.wire_name);
            info = step.parent.as_deref();
        }
        names.reverse();
        names.join(".")
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dotted())
    }
}

///
/// TESTS
///
