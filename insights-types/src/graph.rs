//! Domain-graph payload types.
//!
//! A domain graph is a full-replacement submission: the server swaps its
//! entire view of the source for the entities and relationships it
//! receives, so empty lists are meaningful and always present on the wire.

use crate::value::{utc_parts, EncodingConvention, Value, WireValue};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Reference to a declared attribute type, by name or by ID.
///
/// Which form the server resolves depends on its generation; older
/// generations address attribute types by name, newer ones by ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeRef {
    Id(String),
    Name(String),
}

/// Assignment of one [`Value`] to a declared attribute type.
///
/// The referenced type's declared kind must match the value's kind; the
/// server enforces this, not the client.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeAssignment {
    pub attribute_type: AttributeRef,
    pub value: Value,
}

impl AttributeAssignment {
    /// Creates an assignment addressing the attribute type by ID.
    #[must_use]
    pub fn by_id(id: impl Into<String>, value: Value) -> Self {
        Self {
            attribute_type: AttributeRef::Id(id.into()),
            value,
        }
    }

    /// Creates an assignment addressing the attribute type by name.
    #[must_use]
    pub fn by_name(name: impl Into<String>, value: Value) -> Self {
        Self {
            attribute_type: AttributeRef::Name(name.into()),
            value,
        }
    }

    fn wire_model(&self, convention: EncodingConvention) -> AttributeAssignmentModel {
        let (attribute_type_id, attribute_type_name) = match &self.attribute_type {
            AttributeRef::Id(id) => (Some(id.clone()), None),
            AttributeRef::Name(name) => (None, Some(name.clone())),
        };
        AttributeAssignmentModel {
            attribute_type_id,
            attribute_type_name,
            value: convention.encode(&self.value),
        }
    }
}

/// An entity of the domain graph, identified by an opaque string ID unique
/// within one submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entity {
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category/type label, e.g. `"user"` or `"account"`.
    pub kind: String,
    /// Whether the entity is active; omitted from the payload when unset.
    pub active: Option<bool>,
    pub attribute_assignments: Vec<AttributeAssignment>,
}

impl Entity {
    fn wire_model(&self, convention: EncodingConvention) -> EntityModel {
        EntityModel {
            active: self.active,
            attribute_assignments: assignment_models(&self.attribute_assignments, convention),
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind.clone(),
        }
    }
}

/// A directed relationship between two entities, referenced by their
/// (ID, type) pairs rather than by [`Entity`] values; either endpoint may
/// be declared elsewhere or implicitly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Relationship {
    pub from_entity_id: String,
    pub from_entity_type: String,
    pub to_entity_id: String,
    pub to_entity_type: String,
    pub attribute_assignments: Vec<AttributeAssignment>,
}

impl Relationship {
    fn wire_model(&self, convention: EncodingConvention) -> RelationshipModel {
        RelationshipModel {
            attribute_assignments: assignment_models(&self.attribute_assignments, convention),
            from_entity_id: self.from_entity_id.clone(),
            from_entity_type: self.from_entity_type.clone(),
            to_entity_id: self.to_entity_id.clone(),
            to_entity_type: self.to_entity_type.clone(),
        }
    }
}

/// A full-replacement domain-graph submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DomainGraph {
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
    /// Point in time the graph describes; defaults to the server's receive
    /// time when unset.
    pub timestamp: Option<DateTime<Utc>>,
}

impl DomainGraph {
    /// Builds the owned wire model serialized into the request body.
    ///
    /// The model is fully independent of `self`, so it can outlive the
    /// graph and move into the encoding task.
    #[must_use]
    pub fn wire_model(&self, convention: EncodingConvention) -> DomainGraphModel {
        DomainGraphModel {
            entities: self
                .entities
                .iter()
                .map(|entity| entity.wire_model(convention))
                .collect(),
            history_timestamp: self.timestamp.as_ref().map(utc_parts),
            relationships: self
                .relationships
                .iter()
                .map(|relationship| relationship.wire_model(convention))
                .collect(),
        }
    }
}

fn assignment_models(
    assignments: &[AttributeAssignment],
    convention: EncodingConvention,
) -> Vec<AttributeAssignmentModel> {
    assignments
        .iter()
        .map(|assignment| assignment.wire_model(convention))
        .collect()
}

/// Wire form of a [`DomainGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainGraphModel {
    entities: Vec<EntityModel>,
    #[serde(rename = "historyTimestamp", skip_serializing_if = "Option::is_none")]
    history_timestamp: Option<serde_json::Value>,
    relationships: Vec<RelationshipModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct AttributeAssignmentModel {
    #[serde(rename = "attributeTypeID", skip_serializing_if = "Option::is_none")]
    attribute_type_id: Option<String>,
    #[serde(rename = "attributeTypeName", skip_serializing_if = "Option::is_none")]
    attribute_type_name: Option<String>,
    value: WireValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct EntityModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    active: Option<bool>,
    attribute_assignments: Vec<AttributeAssignmentModel>,
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct RelationshipModel {
    attribute_assignments: Vec<AttributeAssignmentModel>,
    from_entity_id: String,
    from_entity_type: String,
    to_entity_id: String,
    to_entity_type: String,
}
