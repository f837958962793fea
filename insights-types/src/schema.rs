//! Attribute-type schema declarations.
//!
//! Declarations are created once at source setup time; this library never
//! updates or deletes them. They carry a declared [`ValueKind`] but no
//! value.

use crate::value::ValueKind;
use serde::{Deserialize, Serialize};

/// Declaration of a named, typed attribute entities of one category may
/// carry a value for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeType {
    pub category: String,
    pub description: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ValueKind,
}

/// Declaration of a named, typed attribute for relationships between two
/// entity categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipAttributeType {
    /// Category of the relationship's target entity.
    #[serde(rename = "childType")]
    pub to_category: String,
    pub description: String,
    pub name: String,
    /// Category of the relationship's source entity.
    #[serde(rename = "parentType")]
    pub from_category: String,
    #[serde(rename = "type")]
    pub kind: ValueKind,
}
