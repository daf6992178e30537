use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::BTreeMap;

///
/// ResourceIdentifier
/// Type/id pair used for relationship linkage.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl ResourceIdentifier {
    #[must_use]
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

///
/// RelationshipData
/// To-one linkage (possibly null) or to-many linkage.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RelationshipData {
    One(Option<ResourceIdentifier>),
    Many(Vec<ResourceIdentifier>),
}

///
/// Relationship
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Relationship {
    pub data: RelationshipData,
}

impl Relationship {
    #[must_use]
    pub const fn to_one(identifier: Option<ResourceIdentifier>) -> Self {
        Self {
            data: RelationshipData::One(identifier),
        }
    }

    #[must_use]
    pub const fn to_many(identifiers: Vec<ResourceIdentifier>) -> Self {
        Self {
            data: RelationshipData::Many(identifiers),
        }
    }
}

///
/// Resource
///
/// One wire resource: type, id, attributes keyed by wire name, and
/// relationship linkage. `BTreeMap` keeps rendering deterministic.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Json>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
}

impl Resource {
    #[must_use]
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            attributes: BTreeMap::new(),
            relationships: BTreeMap::new(),
        }
    }

    /// True when this resource is addressed by the given linkage.
    #[must_use]
    pub fn is(&self, identifier: &ResourceIdentifier) -> bool {
        self.kind == identifier.kind && self.id == identifier.id
    }
}

///
/// PrimaryData
/// Single resource (possibly null) or resource array.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PrimaryData {
    One(Option<Resource>),
    Many(Vec<Resource>),
}

///
/// DocumentLinks
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DocumentLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

///
/// DocumentMeta
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DocumentMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

///
/// Document
///
/// Top-level JSON:API document: primary data plus optional included
/// resources, pagination links, and meta.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Document {
    pub data: PrimaryData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<DocumentLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<DocumentMeta>,
}

impl Document {
    #[must_use]
    pub const fn single(resource: Resource) -> Self {
        Self {
            data: PrimaryData::One(Some(resource)),
            included: Vec::new(),
            links: None,
            meta: None,
        }
    }

    #[must_use]
    pub const fn many(resources: Vec<Resource>) -> Self {
        Self {
            data: PrimaryData::Many(resources),
            included: Vec::new(),
            links: None,
            meta: None,
        }
    }

    /// Resolve one linkage against the included resources by type + id.
    #[must_use]
    pub fn find_included(&self, identifier: &ResourceIdentifier) -> Option<&Resource> {
        self.included.iter().find(|resource| resource.is(identifier))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_resource_documents_round_trip() {
        let mut resource = Resource::new("users", "1");
        resource
            .attributes
            .insert("name".to_string(), json!("Dmitry"));
        resource.relationships.insert(
            "team".to_string(),
            Relationship::to_one(Some(ResourceIdentifier::new("teams", "7"))),
        );

        let document = Document::single(resource);
        let wire = serde_json::to_value(&document).unwrap();

        assert_eq!(
            wire,
            json!({
                "data": {
                    "type": "users",
                    "id": "1",
                    "attributes": { "name": "Dmitry" },
                    "relationships": {
                        "team": { "data": { "type": "teams", "id": "7" } }
                    }
                }
            })
        );

        let back: Document = serde_json::from_value(wire).unwrap();
        assert_eq!(back, document);
    }

    #[test]
    fn null_and_array_primary_data_deserialize_distinctly() {
        let empty: Document = serde_json::from_value(json!({ "data": null })).unwrap();
        assert_eq!(empty.data, PrimaryData::One(None));

        let many: Document = serde_json::from_value(json!({ "data": [] })).unwrap();
        assert_eq!(many.data, PrimaryData::Many(Vec::new()));
    }

    #[test]
    fn included_resources_resolve_by_type_and_id() {
        let mut document = Document::many(vec![]);
        document.included.push(Resource::new("teams", "7"));

        let hit = document.find_included(&ResourceIdentifier::new("teams", "7"));
        assert!(hit.is_some());

        let miss = document.find_included(&ResourceIdentifier::new("teams", "8"));
        assert!(miss.is_none());
    }

    #[test]
    fn meta_total_and_links_survive_round_trips() {
        let wire = json!({
            "data": [],
            "links": { "next": "/users?page[offset]=10" },
            "meta": { "total": 42 }
        });
        let document: Document = serde_json::from_value(wire).unwrap();

        assert_eq!(document.meta.unwrap().total, Some(42));
        assert_eq!(
            document.links.unwrap().next.as_deref(),
            Some("/users?page[offset]=10")
        );
    }
}
