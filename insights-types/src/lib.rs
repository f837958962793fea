//! Payload types for the Insights connector API.
//!
//! This crate defines the value objects a connector submits to an Insights
//! server:
//! - Typed attribute values and their generation-specific wire encodings
//! - Domain-graph payloads (entities, relationships, assignments)
//! - Connector logs
//! - Attribute-type schema declarations
//!
//! Everything here is a plain value object with no shared mutable state;
//! the HTTP surface lives in the `insights-client` crate.

mod graph;
mod log;
mod schema;
mod value;

pub use graph::{
    AttributeAssignment, AttributeRef, DomainGraph, DomainGraphModel, Entity, Relationship,
};
pub use log::{ConnectorLog, Level};
pub use schema::{AttributeType, RelationshipAttributeType};
pub use value::{EncodingConvention, Value, ValueKind, WireValue};
