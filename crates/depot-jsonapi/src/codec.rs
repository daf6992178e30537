//! Entity ⇄ resource mapping.
//!
//! Entities cross this boundary through `serde_json::Value`, so the codec
//! never reflects over concrete types: the entity model decides which
//! fields are attributes, which are relationships, and what everything is
//! called on the wire.

use crate::document::{Document, Relationship, RelationshipData, Resource, ResourceIdentifier};
use depot_core::{
    error::StoreError,
    model::{EntityModel, FieldKind},
    traits::EntityKind,
};
use serde_json::{Map, Value as Json};

fn codec_error(model: &'static EntityModel, message: impl Into<String>) -> StoreError {
    StoreError::Codec {
        entity: model.entity_name,
        message: message.into(),
    }
}

/// Serialize one entity into a wire resource.
///
/// Attributes and relationships are split by relation detection on the
/// field kind; the primary key is hoisted into the resource `id`.
pub fn to_resource<E: EntityKind>(entity: &E) -> Result<Resource, StoreError> {
    let model = E::MODEL;
    let json =
        serde_json::to_value(entity).map_err(|err| codec_error(model, err.to_string()))?;
    let Json::Object(mut object) = json else {
        return Err(codec_error(model, "entity did not serialize to an object"));
    };

    let mut resource = Resource::new(model.entity_name, String::new());

    for field in model.fields {
        let value = object.remove(field.name).unwrap_or(Json::Null);

        if field.name == model.primary_key {
            resource.id = render_id(&value);
            continue;
        }

        match field.kind.target_entity() {
            Some(target) if !field.kind.is_collection() => {
                let linkage = match value {
                    Json::Null => None,
                    Json::Object(related) => Some(identifier_of(target, &related)?),
                    other => {
                        return Err(codec_error(
                            model,
                            format!("relation '{}' did not serialize to an object: {other}", field.name),
                        ));
                    }
                };
                resource
                    .relationships
                    .insert(field.wire_name.to_string(), Relationship::to_one(linkage));
            }
            Some(target) => {
                let items = match value {
                    Json::Null => Vec::new(),
                    Json::Array(items) => items,
                    other => {
                        return Err(codec_error(
                            model,
                            format!("relation '{}' did not serialize to an array: {other}", field.name),
                        ));
                    }
                };
                let mut identifiers = Vec::with_capacity(items.len());
                for item in items {
                    let Json::Object(related) = item else {
                        return Err(codec_error(
                            model,
                            format!("relation '{}' holds a non-object element", field.name),
                        ));
                    };
                    identifiers.push(identifier_of(target, &related)?);
                }
                resource
                    .relationships
                    .insert(field.wire_name.to_string(), Relationship::to_many(identifiers));
            }
            None => {
                resource
                    .attributes
                    .insert(field.wire_name.to_string(), value);
            }
        }
    }

    Ok(resource)
}

/// Deserialize one wire resource (resolving linkage against the document's
/// included resources) back into a typed entity.
pub fn from_resource<E: EntityKind>(
    resource: &Resource,
    document: &Document,
) -> Result<E, StoreError> {
    let mut visiting = Vec::new();
    let json = resource_to_json(E::MODEL, resource, document, &mut visiting)?;

    serde_json::from_value(json).map_err(|err| codec_error(E::MODEL, err.to_string()))
}

// Rebuild the source-shaped JSON object for one resource, recursing into
// included resources for relationship linkage. `visiting` breaks linkage
// cycles: a resource already on the stack resolves to null.
fn resource_to_json(
    model: &'static EntityModel,
    resource: &Resource,
    document: &Document,
    visiting: &mut Vec<(String, String)>,
) -> Result<Json, StoreError> {
    let mut object = Map::new();
    object.insert(
        model.primary_key.to_string(),
        parse_id(model, &resource.id)?,
    );

    visiting.push((resource.kind.clone(), resource.id.clone()));

    for field in model.fields {
        if field.name == model.primary_key {
            continue;
        }

        let value = match field.kind.target_entity() {
            Some(target) if !field.kind.is_collection() => {
                match resource.relationships.get(field.wire_name) {
                    Some(Relationship {
                        data: RelationshipData::One(Some(identifier)),
                    }) => resolve_linkage(target, identifier, document, visiting)?,
                    _ => Json::Null,
                }
            }
            Some(target) => match resource.relationships.get(field.wire_name) {
                Some(Relationship {
                    data: RelationshipData::Many(identifiers),
                }) => {
                    let mut items = Vec::with_capacity(identifiers.len());
                    for identifier in identifiers {
                        let item = resolve_linkage(target, identifier, document, visiting)?;
                        if !item.is_null() {
                            items.push(item);
                        }
                    }
                    Json::Array(items)
                }
                _ => Json::Array(Vec::new()),
            },
            None => match resource.attributes.get(field.wire_name) {
                Some(value) => value.clone(),
                None if field.kind.is_collection() => Json::Array(Vec::new()),
                None => Json::Null,
            },
        };

        object.insert(field.name.to_string(), value);
    }

    visiting.pop();
    Ok(Json::Object(object))
}

fn resolve_linkage(
    target: &'static EntityModel,
    identifier: &ResourceIdentifier,
    document: &Document,
    visiting: &mut Vec<(String, String)>,
) -> Result<Json, StoreError> {
    if visiting
        .iter()
        .any(|(kind, id)| kind == &identifier.kind && id == &identifier.id)
    {
        return Ok(Json::Null);
    }

    match document.find_included(identifier) {
        Some(included) => resource_to_json(target, included, document, visiting),
        // linkage without a matching included resource stays unresolved
        None => Ok(Json::Null),
    }
}

fn identifier_of(
    target: &'static EntityModel,
    related: &Map<String, Json>,
) -> Result<ResourceIdentifier, StoreError> {
    let id = related
        .get(target.primary_key)
        .ok_or_else(|| codec_error(target, "related entity carries no primary key"))?;

    Ok(ResourceIdentifier::new(target.entity_name, render_id(id)))
}

fn render_id(value: &Json) -> String {
    match value {
        Json::String(text) => text.clone(),
        Json::Null => String::new(),
        other => other.to_string(),
    }
}

fn parse_id(model: &'static EntityModel, id: &str) -> Result<Json, StoreError> {
    let kind = model
        .primary_key_field()
        .map(|field| &field.kind)
        .ok_or_else(|| codec_error(model, "model declares no primary key field"))?;

    match kind {
        FieldKind::Uint => id
            .parse::<u64>()
            .map(Json::from)
            .map_err(|_| codec_error(model, format!("resource id '{id}' is not an unsigned key"))),
        FieldKind::Int => id
            .parse::<i64>()
            .map(Json::from)
            .map_err(|_| codec_error(model, format!("resource id '{id}' is not an integer key"))),
        _ => Ok(Json::String(id.to_string())),
    }
}

///
/// TESTS
///
