//! Connector log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity level of a connector log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Alert,
    Info,
}

/// A timestamped log line reporting progress or problems of an import run.
///
/// Logs are append-only facts; they are batched and submitted together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorLog {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConnectorLog {
    /// Creates a log entry stamped with the current time.
    #[must_use]
    pub fn now(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}
