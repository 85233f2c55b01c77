//! Mock job tracker for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::tracker::{Job, JobStatus, JobTracker, OutputFile, TrackerError};

/// Mock implementation of the JobTracker trait.
///
/// Jobs are registered up front; error injection makes lookups for chosen
/// ids fail with a connection error. Every lookup is recorded for
/// assertions.
#[derive(Default)]
pub struct MockJobTracker {
    jobs: Arc<RwLock<HashMap<String, Job>>>,
    failing: Arc<RwLock<HashMap<String, String>>>,
    lookups: Arc<RwLock<Vec<String>>>,
}

impl MockJobTracker {
    /// Create a new mock tracker with no jobs registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job.
    pub async fn insert_job(&self, job: Job) {
        self.jobs.write().await.insert(job.id.clone(), job);
    }

    /// Register a succeeded job with a single output file.
    pub async fn insert_succeeded(&self, id: &str, file: OutputFile) {
        self.insert_job(Job {
            id: id.to_string(),
            status: JobStatus::Succeeded,
            files: vec![file],
        })
        .await;
    }

    /// Register a job in the given state with no output files.
    pub async fn insert_with_status(&self, id: &str, status: JobStatus) {
        self.insert_job(Job {
            id: id.to_string(),
            status,
            files: vec![],
        })
        .await;
    }

    /// Make lookups for `id` fail with a connection error.
    pub async fn fail_lookup(&self, id: &str, message: &str) {
        self.failing
            .write()
            .await
            .insert(id.to_string(), message.to_string());
    }

    /// All recorded lookups, in call order.
    pub async fn lookups(&self) -> Vec<String> {
        self.lookups.read().await.clone()
    }
}

#[async_trait]
impl JobTracker for MockJobTracker {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get_job(&self, id: &str) -> Result<Job, TrackerError> {
        self.lookups.write().await.push(id.to_string());

        if let Some(message) = self.failing.read().await.get(id) {
            return Err(TrackerError::ConnectionFailed(message.clone()));
        }

        self.jobs
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| TrackerError::JobNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_job_is_not_found() {
        let tracker = MockJobTracker::new();
        let err = tracker.get_job("nope").await.unwrap_err();
        assert!(matches!(err, TrackerError::JobNotFound(_)));
        assert_eq!(tracker.lookups().await, vec!["nope".to_string()]);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let tracker = MockJobTracker::new();
        tracker.fail_lookup("job-1", "boom").await;
        let err = tracker.get_job("job-1").await.unwrap_err();
        assert!(matches!(err, TrackerError::ConnectionFailed(_)));
    }
}
