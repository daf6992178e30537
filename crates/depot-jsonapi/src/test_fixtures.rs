//! Test-only entity declarations shared across unit-test modules.

use depot_core::{
    error::PathError,
    model::{EntityModel, FieldKind, FieldModel},
    traits::{EntityKind, EntityValues},
    value::Value,
};
use serde::{Deserialize, Serialize};

pub(crate) static TEAM_MODEL: EntityModel = EntityModel {
    path: "test_fixtures::Team",
    entity_name: "teams",
    primary_key: "id",
    fields: &[
        FieldModel {
            name: "id",
            wire_name: "id",
            kind: FieldKind::Uint,
        },
        FieldModel {
            name: "name",
            wire_name: "name",
            kind: FieldKind::Text,
        },
    ],
};

static TEAM_ENTITY_KIND: FieldKind = FieldKind::Entity(&TEAM_MODEL);

pub(crate) static USER_MODEL: EntityModel = EntityModel {
    path: "test_fixtures::User",
    entity_name: "users",
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
        FieldModel {
            name: "priority",
            wire_name: "priority",
            kind: FieldKind::Int,
        },
        FieldModel {
            name: "roles",
            wire_name: "roles",
            kind: FieldKind::List {
                elem: Some(&FieldKind::Text),
            },
        },
        FieldModel {
            name: "team",
            wire_name: "team",
            kind: FieldKind::Entity(&TEAM_MODEL),
        },
        FieldModel {
            name: "friends",
            wire_name: "friends",
            kind: FieldKind::List {
                elem: Some(&TEAM_ENTITY_KIND),
            },
        },
    ],
};

///
/// Team
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct Team {
    pub id: u64,
    pub name: String,
}

impl Team {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

impl EntityValues for Team {
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
            (field, _) => {
                return Err(PathError::Set {
                    path: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl EntityKind for Team {
    const MODEL: &'static EntityModel = &TEAM_MODEL;
}

///
/// User
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct User {
    pub id: u64,
    pub name: String,
    pub priority: i64,
    pub roles: Vec<String>,
    pub team: Option<Team>,
    pub friends: Vec<Team>,
}

impl User {
    pub fn new(id: u64, name: &str, priority: i64) -> Self {
        Self {
            id,
            name: name.to_string(),
            priority,
            ..Self::default()
        }
    }

    pub fn with_team(mut self, team: Team) -> Self {
        self.team = Some(team);
        self
    }
}

impl EntityValues for User {
    fn value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::Uint(self.id)),
            "name" => Some(Value::Text(self.name.clone())),
            "priority" => Some(Value::Int(self.priority)),
            "roles" => Some(Value::List(
                self.roles.iter().cloned().map(Value::Text).collect(),
            )),
            _ => None,
        }
    }

    fn set_value(&mut self, field: &str, value: Value) -> Result<(), PathError> {
        match (field, value) {
            ("id", Value::Uint(v)) => self.id = v,
            ("name", Value::Text(v)) => self.name = v,
            ("priority", Value::Int(v)) => self.priority = v,
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
            "team" => self.team.as_ref().map(|t| t as &dyn EntityValues),
            _ => None,
        }
    }
}

impl EntityKind for User {
    const MODEL: &'static EntityModel = &USER_MODEL;
}
