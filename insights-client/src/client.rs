//! Authenticated HTTP client for an Insights server.

use crate::body::zlib_json_body;
use crate::error::{ClientError, ClientResult};
use insights_types::{
    AttributeType, ConnectorLog, DomainGraph, EncodingConvention, Level, RelationshipAttributeType,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Credential a client attaches to every request.
///
/// The two forms belong to different server generations and are never
/// mixed; route naming follows the form in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// `Authorization: Bearer {token}` on every request.
    Bearer(String),
    /// HTTP basic auth with the source identifier as username and the
    /// source token as password.
    Source { source_id: String, token: String },
}

/// Configuration of a [`Client`], immutable once the client is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server, e.g. `https://example.insights.local`.
    pub base_url: String,
    pub credential: Credential,
    /// Wire convention for typed attribute values.
    pub convention: EncodingConvention,
    /// Disables TLS certificate verification. Explicit opt-in for servers
    /// with self-signed certificates; never enable this for production
    /// endpoints.
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with the default convention (structured),
    /// full TLS verification and a 60 second timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>, credential: Credential) -> Self {
        Self {
            base_url: base_url.into(),
            credential,
            convention: EncodingConvention::Structured,
            accept_invalid_certs: false,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Exchanges connector user credentials for a bearer token.
///
/// Performs one `POST authenticate/{user_id}` with a
/// `{"type": "password", "value": ...}` body and reads the token from the
/// response. Any non-success status or unreadable body is a
/// [`ClientError::Auth`]. The exchange always verifies TLS; skip-verify is
/// an option of the client built afterwards, not of the login itself.
pub async fn authenticate(base_url: &str, user_id: &str, password: &str) -> ClientResult<String> {
    let http = reqwest::Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
    let url = format!(
        "{}/authenticate/{}",
        base_url.trim_end_matches('/'),
        user_id
    );
    debug!("exchanging credentials for user {user_id}");

    let body = serde_json::json!({ "type": "password", "value": password });
    let response = http.post(&url).json(&body).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Auth(format!(
            "token exchange returned status {}",
            status.as_u16()
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|err| ClientError::Auth(format!("failed reading token response: {err}")))?;
    Ok(token.token)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// A client for one Insights server.
///
/// Owns its HTTP client explicitly; nothing here relies on a process-wide
/// default. All per-call state is local to the call, so a client is cheap
/// to clone and safe to share across sequential or concurrent calls.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    http: reqwest::Client,
}

impl Client {
    /// Builds a client from the given configuration.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self { config, http })
    }

    /// Authenticates with user credentials and returns a bearer client for
    /// the same server, with default configuration otherwise.
    pub async fn login(base_url: &str, user_id: &str, password: &str) -> ClientResult<Self> {
        let token = authenticate(base_url, user_id, password).await?;
        info!("authenticated connector user {user_id}");
        Self::new(ClientConfig::new(base_url, Credential::Bearer(token)))
    }

    /// Returns the client's configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Replaces the server's domain graph with the given one.
    ///
    /// This is a total replacement, not a diff: the server swaps its whole
    /// view of the source for this submission. The payload is streamed
    /// zlib-compressed.
    pub async fn reload_domain_graph(&self, graph: &DomainGraph) -> ClientResult<()> {
        let payload = graph.wire_model(self.config.convention);
        let segments = self.graph_segments();
        debug!(
            "reloading domain graph: {} entities, {} relationships",
            graph.entities.len(),
            graph.relationships.len()
        );
        let builder = self
            .request(Method::POST, &segments)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(zlib_json_body(payload));
        Self::complete(builder).await
    }

    /// Creates the given connector logs at the server.
    ///
    /// The batch succeeds or fails as a whole from the caller's
    /// perspective; the server decides atomicity on its side.
    pub async fn create_connector_logs(&self, logs: &[ConnectorLog]) -> ClientResult<()> {
        let segments = self.log_segments();
        debug!("creating {} connector logs", logs.len());
        let builder = self.request(Method::POST, &segments).json(&logs);
        Self::complete(builder).await
    }

    /// Sends a single alert log stamped with the current time.
    pub async fn alert(&self, message: impl Into<String>) -> ClientResult<()> {
        let log = ConnectorLog::now(Level::Alert, message);
        self.create_connector_logs(std::slice::from_ref(&log)).await
    }

    /// Sends a single info log stamped with the current time.
    pub async fn info(&self, message: impl Into<String>) -> ClientResult<()> {
        let log = ConnectorLog::now(Level::Info, message);
        self.create_connector_logs(std::slice::from_ref(&log)).await
    }

    /// Declares an entity attribute type at the server.
    pub async fn create_attribute_type(&self, attribute_type: &AttributeType) -> ClientResult<()> {
        let segments = [String::from("attributeTypes")];
        let builder = self.request(Method::POST, &segments).json(attribute_type);
        Self::complete(builder).await
    }

    /// Declares a relationship attribute type at the server.
    pub async fn create_relationship_attribute_type(
        &self,
        attribute_type: &RelationshipAttributeType,
    ) -> ClientResult<()> {
        let segments = [String::from("relationshipAttributeTypes")];
        let builder = self.request(Method::POST, &segments).json(attribute_type);
        Self::complete(builder).await
    }

    fn graph_segments(&self) -> Vec<String> {
        match &self.config.credential {
            Credential::Bearer(_) => vec!["domain-graph".into(), "reload".into()],
            Credential::Source { source_id, .. } => vec![
                "api".into(),
                "sources".into(),
                source_id.clone(),
                "snapshots".into(),
            ],
        }
    }

    fn log_segments(&self) -> Vec<String> {
        match &self.config.credential {
            Credential::Bearer(_) => vec!["custom-connector-logs".into()],
            Credential::Source { source_id, .. } => vec![
                "api".into(),
                "sources".into(),
                source_id.clone(),
                "connector-logs".into(),
            ],
        }
    }

    fn endpoint(&self, segments: &[String]) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{}/{}", base, segments.join("/"))
    }

    /// Starts a request with the URL and credential applied; the body and
    /// its Content-Type stay with the caller (requests without a body get
    /// neither).
    fn request(&self, method: Method, segments: &[String]) -> reqwest::RequestBuilder {
        let url = self.endpoint(segments);
        let builder = self.http.request(method, &url);
        match &self.config.credential {
            Credential::Bearer(token) => builder.bearer_auth(token),
            Credential::Source { source_id, token } => builder.basic_auth(source_id, Some(token)),
        }
    }

    /// Sends the request and classifies the outcome: statuses in
    /// [200, 300) are success, anything else is [`ClientError::Status`].
    /// The response body is fully drained on every outcome so the
    /// connection can be reused.
    async fn complete(builder: reqwest::RequestBuilder) -> ClientResult<()> {
        let response = builder.send().await?;
        let status = response.status();
        let drained = response.bytes().await;
        if !status.is_success() {
            return Err(ClientError::Status {
                code: status.as_u16(),
            });
        }
        drained?;
        Ok(())
    }
}
