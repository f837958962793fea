//! HTTP client for pushing connector data to an Insights server.
//!
//! A connector builds its payloads with the types from `insights-types`
//! and submits them through a [`Client`]:
//!
//! - [`authenticate`] / [`Client::login`]: exchange user credentials for a
//!   bearer token
//! - [`Client::reload_domain_graph`]: full-replacement submission of
//!   entities and relationships, streamed zlib-compressed
//! - [`Client::create_connector_logs`] (plus the [`Client::alert`] /
//!   [`Client::info`] one-liners): batched operational logs
//! - [`Client::create_attribute_type`] /
//!   [`Client::create_relationship_attribute_type`]: one-time schema
//!   declarations
//!
//! The client performs no retries and exposes no cancellation; a call runs
//! to completion or returns one typed [`ClientError`].
//!
//! # Example
//!
//! ```no_run
//! use insights_client::{Client, ClientConfig, Credential};
//!
//! # async fn run() -> insights_client::ClientResult<()> {
//! let config = ClientConfig::new(
//!     "https://example.insights.local",
//!     Credential::Source {
//!         source_id: "42".into(),
//!         token: "secret".into(),
//!     },
//! );
//! let client = Client::new(config)?;
//! client.info("import started").await?;
//! # Ok(())
//! # }
//! ```

mod body;
mod client;
mod error;

pub use client::{authenticate, Client, ClientConfig, Credential};
pub use error::{ClientError, ClientResult};
