//! Test-only entity declarations shared across unit-test modules.
//!
//! Models are declared the way an application boundary would declare them:
//! `'static` constants plus hand-written `EntityValues` impls.

use crate::{
    error::PathError,
    model::{EntityModel, FieldKind, FieldModel},
    traits::{EntityKind, EntityValues},
    value::Value,
};
use serde::{Deserialize, Serialize};

pub(crate) static AUTHOR_MODEL: EntityModel = EntityModel {
    path: "test_fixtures::Author",
    entity_name: "authors",
    primary_key: "id",
    fields: &[
        FieldModel {
            name: "id",
            wire_name: "id",
            kind: FieldKind::Uint,
        },
        FieldModel {
            name: "name",
            wire_name: "display-name",
            kind: FieldKind::Text,
        },
    ],
};

pub(crate) static REVIEW_MODEL: EntityModel = EntityModel {
    path: "test_fixtures::Review",
    entity_name: "reviews",
    primary_key: "id",
    fields: &[
        FieldModel {
            name: "id",
            wire_name: "id",
            kind: FieldKind::Uint,
        },
        FieldModel {
            name: "score",
            wire_name: "score",
            kind: FieldKind::Int,
        },
        FieldModel {
            name: "body",
            wire_name: "body",
            kind: FieldKind::Text,
        },
    ],
};

static REVIEW_ENTITY_KIND: FieldKind = FieldKind::Entity(&REVIEW_MODEL);

pub(crate) static POST_MODEL: EntityModel = EntityModel {
    path: "test_fixtures::Post",
    entity_name: "posts",
    primary_key: "id",
    fields: &[
        FieldModel {
            name: "id",
            wire_name: "id",
            kind: FieldKind::Uint,
        },
        FieldModel {
            name: "title",
            wire_name: "title",
            kind: FieldKind::Text,
        },
        FieldModel {
            name: "priority",
            wire_name: "priority",
            kind: FieldKind::Int,
        },
        FieldModel {
            name: "author",
            wire_name: "author",
            kind: FieldKind::Entity(&AUTHOR_MODEL),
        },
        FieldModel {
            name: "tags",
            wire_name: "tags",
            kind: FieldKind::List {
                elem: Some(&FieldKind::Text),
            },
        },
        FieldModel {
            name: "reviews",
            wire_name: "reviews",
            kind: FieldKind::List {
                elem: Some(&REVIEW_ENTITY_KIND),
            },
        },
        // Declared collection with no element metadata on purpose.
        FieldModel {
            name: "attachments",
            wire_name: "attachments",
            kind: FieldKind::List { elem: None },
        },
    ],
};

///
/// Author
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct Author {
    pub id: u64,
    pub name: String,
}

impl Author {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

impl EntityValues for Author {
    fn value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(self.id)),
            "name" => Some(Value::Text(self.name.clone())),
            _ => None,
        }
    }

    fn set_value(&mut self, field: &str, value: Value) -> Result<(), PathError> {
        match (field, value) {
            ("id", Value::Uint(v)) => self.id = v,
            ("name", Value::Text(v)) => self.name = v,
            (field, _) if AUTHOR_MODEL.field(field).is_none() => {
                return Err(PathError::NotDeclared {
                    entity: AUTHOR_MODEL.entity_name,
                    path: field.to_string(),
                });
            }
            (field, _) => {
                return Err(PathError::Set {
                    path: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl EntityKind for Author {
    const MODEL: &'static EntityModel = &AUTHOR_MODEL;
}

///
/// Review
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct Review {
    pub id: u64,
    pub score: i64,
    pub body: String,
}

impl EntityValues for Review {
    fn value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(self.id)),
            "score" => Some(Value::Int(self.score)),
            "body" => Some(Value::Text(self.body.clone())),
            _ => None,
        }
    }

    fn set_value(&mut self, field: &str, value: Value) -> Result<(), PathError> {
        match (field, value) {
            ("id", Value::Uint(v)) => self.id = v,
            ("score", Value::Int(v)) => self.score = v,
            ("body", Value::Text(v)) => self.body = v,
            (field, _) if REVIEW_MODEL.field(field).is_none() => {
                return Err(PathError::NotDeclared {
                    entity: REVIEW_MODEL.entity_name,
                    path: field.to_string(),
                });
            }
            (field, _) => {
                return Err(PathError::Set {
                    path: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl EntityKind for Review {
    const MODEL: &'static EntityModel = &REVIEW_MODEL;
}

///
/// Post
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct Post {
    pub id: u64,
    pub title: String,
    pub priority: i64,
    pub author: Option<Author>,
    pub tags: Vec<String>,
    pub reviews: Vec<Review>,
    pub attachments: Vec<String>,
}

impl Post {
    pub fn new(id: u64, title: &str, priority: i64) -> Self {
        Self {
            id,
            title: title.to_string(),
            priority,
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }
}

impl EntityValues for Post {
    fn value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(self.id)),
            "title" => Some(Value::Text(self.title.clone())),
            "priority" => Some(Value::Int(self.priority)),
            "tags" => Some(Value::List(
                self.tags.iter().cloned().map(Value::Text).collect(),
            )),
            "attachments" => Some(Value::List(
                self.attachments.iter().cloned().map(Value::Text).collect(),
            )),
            _ => None,
        }
    }

    fn set_value(&mut self, field: &str, value: Value) -> Result<(), PathError> {
        match (field, value) {
            ("id", Value::Uint(v)) => self.id = v,
            ("title", Value::Text(v)) => self.title = v,
            ("priority", Value::Int(v)) => self.priority = v,
            (field, _) if POST_MODEL.field(field).is_none() => {
                return Err(PathError::NotDeclared {
                    entity: POST_MODEL.entity_name,
                    path: field.to_string(),
                });
            }
            (field, _) => {
                return Err(PathError::Set {
                    path: field.to_string(),
                });
            }
        }
        Ok(())
    }

    fn related(&self, field: &str) -> Option<&dyn EntityValues> {
        match field {
            "author" => self.author.as_ref().map(|a| a as &dyn EntityValues),
            _ => None,
        }
    }
}

impl EntityKind for Post {
    const MODEL: &'static EntityModel = &POST_MODEL;
}
