//! Types for job-tracking service operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during job-tracking service operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,
}

/// Completion state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Not finished yet (queued or executing). Deferred to a future run.
    Running,
    /// Finished with output files ready for archival.
    Succeeded,
    /// Finished unsuccessfully. Not retried automatically.
    Failed,
}

impl JobStatus {
    /// Returns the string representation for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
        }
    }
}

/// One output file of a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputFile {
    /// Product filename; becomes the final key component in the archive.
    pub filename: String,
    /// Direct download URL for the file content.
    pub url: String,
    /// Staging bucket holding the file.
    pub bucket: String,
    /// Staging key of the file.
    pub key: String,
}

/// A job as reported by the tracking service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Opaque identifier minted by the tracking service.
    pub id: String,
    /// Completion state.
    pub status: JobStatus,
    /// Output files, present for succeeded jobs. Only the first is archived.
    pub files: Vec<OutputFile>,
}

/// Trait for job-tracking service backends.
#[async_trait]
pub trait JobTracker: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Look up one job by its identifier.
    async fn get_job(&self, id: &str) -> Result<Job, TrackerError>;
}
