#![forbid(unsafe_code)]
#![warn(
    unused,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Adabas administration REST API.
//!
//! Payload keys follow the server's PascalCase naming. Every response type
//! decodes leniently (`#[serde(default)]`) because the server omits fields
//! that do not apply to the current nucleus state.
//!
//! Layout:
//! - `database.rs`: database lifecycle, GCB, parameters, containers, UCB
//! - `queue.rs`: user, command and hold queues
//! - `stats.rs`: high water marks, command counters, buffer pool
//! - `file.rs`: files and field definition tables
//! - `job.rs`: scheduler jobs and execution logs
//! - `browser.rs`: server-side file locations

pub mod browser;
pub mod database;
pub mod file;
pub mod job;
pub mod queue;
pub mod stats;
mod wire;

use serde::{Deserialize, Serialize};

pub use browser::*;
pub use database::*;
pub use file::*;
pub use job::*;
pub use queue::*;
pub use stats::*;

/// Error document returned with 4xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ErrorResponse {
    /// Error code and message.
    pub error: ErrorDetail,
}

/// Error code and message pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct ErrorDetail {
    /// Server error code, numeric or symbolic.
    #[serde(deserialize_with = "wire::text")]
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

/// Status document returned by mutating operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct StatusResponse {
    /// Outcome of the operation.
    pub status: StatusMessage,
}

/// Outcome of a mutating operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct StatusMessage {
    /// Status text reported by the server.
    pub message: String,
    /// Database the operation applied to, when relevant.
    pub dbid: i64,
    /// Job name for scheduler operations.
    pub name: String,
    /// Execution identifier for scheduled jobs.
    #[serde(rename = "ExecutionID")]
    pub execution_id: i64,
}

/// Server version and handler inventory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct VersionInfo {
    /// Product name.
    pub product: String,
    /// Product version.
    pub version: String,
    /// Installed request handlers.
    pub handler: Vec<HandlerVersion>,
}

/// Version of an installed request handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct HandlerVersion {
    /// Handler name.
    pub name: String,
    /// Handler version.
    pub version: String,
}

/// Adabas installation environment as reported by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct EnvironmentInfo {
    /// Free-form environment description.
    pub environment: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn error_code_accepts_numbers_and_text() -> Result<()> {
        let numeric: ErrorResponse =
            serde_json::from_str(r#"{"Error":{"Code":17,"Message":"database not active"}}"#)?;
        assert_eq!(numeric.error.code, "17");
        assert_eq!(numeric.error.message, "database not active");

        let symbolic: ErrorResponse =
            serde_json::from_str(r#"{"Error":{"Code":"ADG0000115","Message":"denied"}}"#)?;
        assert_eq!(symbolic.error.code, "ADG0000115");
        Ok(())
    }

    #[test]
    fn status_decodes_partial_documents() -> Result<()> {
        let status: StatusResponse =
            serde_json::from_str(r#"{"Status":{"Message":"scheduled","Name":"backup","ExecutionID":4}}"#)?;
        assert_eq!(status.status.message, "scheduled");
        assert_eq!(status.status.name, "backup");
        assert_eq!(status.status.execution_id, 4);
        assert_eq!(status.status.dbid, 0);
        Ok(())
    }
}
