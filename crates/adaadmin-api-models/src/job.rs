//! Scheduler job payloads.

use serde::{Deserialize, Serialize};

/// Defined jobs with their executions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct JobListResponse {
    /// One entry per job.
    pub job_definition: Vec<JobDefinition>,
}

/// Job together with its state and execution history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct JobDefinition {
    /// Job description.
    pub job: JobSpec,
    /// Scheduler state.
    pub status: String,
    /// Past and running executions.
    pub executions: Vec<JobExecution>,
}

/// Static part of a job definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct JobSpec {
    /// Job name.
    pub name: String,
    /// Owning user.
    pub user: String,
    /// Free-form description.
    pub description: String,
}

/// Single job execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct JobExecution {
    /// Execution id.
    #[serde(rename = "ID")]
    pub id: i64,
    /// Start time.
    pub scheduled: String,
    /// End time; empty while running.
    pub ended: String,
}

/// Execution log wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct JobResultResponse {
    /// Log document.
    pub job_result: JobResult,
}

/// Output of a job execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct JobResult {
    /// Job name.
    pub name: String,
    /// Execution id.
    #[serde(rename = "ID")]
    pub id: f64,
    /// Start time.
    pub scheduled: String,
    /// End time.
    pub ended: String,
    /// Captured output.
    pub log: String,
}
