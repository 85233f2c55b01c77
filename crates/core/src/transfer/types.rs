//! Types for the transfer pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::granule::GranuleError;
use crate::store::StoreError;
use crate::tracker::TrackerError;

/// Errors that abort one transfer task.
///
/// Expected per-job states (still running, failed upstream, target already
/// archived) are not errors; they come back as [`TransferOutcome`]s. These
/// variants are infrastructure failures and carry the job id and failing
/// operation for diagnosis.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("job {job_id}: job lookup failed")]
    Lookup {
        job_id: String,
        #[source]
        source: TrackerError,
    },

    #[error("job {job_id}: succeeded without output files")]
    NoOutputFiles { job_id: String },

    #[error("job {job_id}: reading centerpoint from {url} failed")]
    Metadata {
        job_id: String,
        url: String,
        #[source]
        source: GranuleError,
    },

    #[error("job {job_id}: existence check for {location} failed")]
    ExistenceCheck {
        job_id: String,
        location: String,
        #[source]
        source: StoreError,
    },

    #[error("job {job_id}: copy to {dest} failed")]
    Copy {
        job_id: String,
        dest: String,
        #[source]
        source: StoreError,
    },
}

impl TransferError {
    /// Id of the job the failure belongs to.
    pub fn job_id(&self) -> &str {
        match self {
            TransferError::Lookup { job_id, .. }
            | TransferError::NoOutputFiles { job_id }
            | TransferError::Metadata { job_id, .. }
            | TransferError::ExistenceCheck { job_id, .. }
            | TransferError::Copy { job_id, .. } => job_id,
        }
    }
}

/// What one transfer task did for its job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferOutcome {
    /// Output copied into the archive.
    Copied,
    /// Target key already present, nothing copied.
    AlreadyArchived,
    /// Job still running, deferred to a future run.
    JobRunning,
    /// Job failed upstream, nothing to archive.
    JobFailed,
}

impl TransferOutcome {
    /// Returns the string representation for logging and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferOutcome::Copied => "copied",
            TransferOutcome::AlreadyArchived => "already_archived",
            TransferOutcome::JobRunning => "job_running",
            TransferOutcome::JobFailed => "job_failed",
        }
    }

    /// Whether the outcome left the archive unchanged.
    pub fn is_skip(&self) -> bool {
        !matches!(self, TransferOutcome::Copied)
    }
}

/// Trace of one completed transfer task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReport {
    pub job_id: String,
    pub outcome: TransferOutcome,
    /// Ordered human-readable trace of what the task did.
    pub trace: Vec<String>,
}

/// One job that could not be completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFailure {
    pub job_id: String,
    pub error: String,
}

/// Totals for one full run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Granules copied into the archive.
    pub copied: usize,
    /// Jobs whose target key was already occupied.
    pub already_archived: usize,
    /// Jobs still running, deferred to a future run.
    pub deferred: usize,
    /// Jobs that failed upstream.
    pub upstream_failed: usize,
    /// Jobs that hit infrastructure failures, in submission order.
    pub failures: Vec<JobFailure>,
}

impl RunSummary {
    /// Total jobs accounted for.
    pub fn total(&self) -> usize {
        self.copied + self.already_archived + self.deferred + self.upstream_failed + self.failures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_as_str() {
        assert_eq!(TransferOutcome::Copied.as_str(), "copied");
        assert_eq!(TransferOutcome::AlreadyArchived.as_str(), "already_archived");
        assert_eq!(TransferOutcome::JobRunning.as_str(), "job_running");
        assert_eq!(TransferOutcome::JobFailed.as_str(), "job_failed");
    }

    #[test]
    fn test_outcome_is_skip() {
        assert!(!TransferOutcome::Copied.is_skip());
        assert!(TransferOutcome::AlreadyArchived.is_skip());
        assert!(TransferOutcome::JobRunning.is_skip());
        assert!(TransferOutcome::JobFailed.is_skip());
    }

    #[test]
    fn test_error_display_and_job_id() {
        let err = TransferError::Lookup {
            job_id: "job-7".to_string(),
            source: TrackerError::Timeout,
        };
        assert_eq!(err.to_string(), "job job-7: job lookup failed");
        assert_eq!(err.job_id(), "job-7");
    }

    #[test]
    fn test_summary_total() {
        let summary = RunSummary {
            copied: 3,
            already_archived: 2,
            deferred: 1,
            upstream_failed: 1,
            failures: vec![JobFailure {
                job_id: "job-9".to_string(),
                error: "boom".to_string(),
            }],
        };
        assert_eq!(summary.total(), 8);
    }
}
