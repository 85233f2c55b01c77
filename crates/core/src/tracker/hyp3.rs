//! HyP3 job-tracking backend.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::TrackerConfig;

use super::{Job, JobStatus, JobTracker, OutputFile, TrackerError};

/// Job record as returned by the HyP3 API.
#[derive(Debug, Deserialize)]
struct ApiJob {
    job_id: String,
    status_code: ApiStatus,
    #[serde(default)]
    files: Vec<ApiFile>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum ApiStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

#[derive(Debug, Deserialize)]
struct ApiFile {
    filename: String,
    url: String,
    s3: ApiS3Location,
}

#[derive(Debug, Deserialize)]
struct ApiS3Location {
    bucket: String,
    key: String,
}

impl From<ApiJob> for Job {
    fn from(api: ApiJob) -> Self {
        // Pending and running both mean "not done yet, defer"
        let status = match api.status_code {
            ApiStatus::Pending | ApiStatus::Running => JobStatus::Running,
            ApiStatus::Succeeded => JobStatus::Succeeded,
            ApiStatus::Failed => JobStatus::Failed,
        };

        Job {
            id: api.job_id,
            status,
            files: api
                .files
                .into_iter()
                .map(|f| OutputFile {
                    filename: f.filename,
                    url: f.url,
                    bucket: f.s3.bucket,
                    key: f.s3.key,
                })
                .collect(),
        }
    }
}

/// HyP3 REST backend for job lookups.
///
/// One client is constructed per process, bound to the configured
/// credentials, and shared across every transfer task.
pub struct Hyp3Tracker {
    client: Client,
    config: TrackerConfig,
}

impl Hyp3Tracker {
    /// Create a new tracker with the given configuration.
    pub fn new(config: TrackerConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    fn job_url(&self, id: &str) -> String {
        format!(
            "{}/jobs/{}",
            self.config.api_url.trim_end_matches('/'),
            urlencoding::encode(id)
        )
    }
}

#[async_trait]
impl JobTracker for Hyp3Tracker {
    fn name(&self) -> &str {
        "hyp3"
    }

    async fn get_job(&self, id: &str) -> Result<Job, TrackerError> {
        let url = self.job_url(id);
        debug!(job_id = id, "Fetching job from tracker");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TrackerError::Timeout
                } else if e.is_connect() {
                    TrackerError::ConnectionFailed(e.to_string())
                } else {
                    TrackerError::ApiError(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TrackerError::JobNotFound(id.to_string()));
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(TrackerError::AuthenticationFailed(format!("HTTP {}", status)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrackerError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let api_job: ApiJob = response
            .json()
            .await
            .map_err(|e| TrackerError::ApiError(format!("Failed to parse response: {}", e)))?;

        Ok(api_job.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_job_deserialization() {
        let json = r#"{
            "job_id": "27dca00f-dd17-48bc-9e1b-f57cbf7871de",
            "status_code": "SUCCEEDED",
            "files": [
                {
                    "filename": "S1_velocity_pair.nc",
                    "url": "https://staging.example.com/S1_velocity_pair.nc",
                    "s3": {
                        "bucket": "staging-bucket",
                        "key": "outputs/S1_velocity_pair.nc"
                    }
                }
            ]
        }"#;

        let api_job: ApiJob = serde_json::from_str(json).unwrap();
        let job: Job = api_job.into();

        assert_eq!(job.id, "27dca00f-dd17-48bc-9e1b-f57cbf7871de");
        assert_eq!(job.status, JobStatus::Succeeded);
        assert_eq!(job.files.len(), 1);
        assert_eq!(job.files[0].bucket, "staging-bucket");
        assert_eq!(job.files[0].key, "outputs/S1_velocity_pair.nc");
    }

    #[test]
    fn test_pending_maps_to_running() {
        let json = r#"{"job_id": "abc", "status_code": "PENDING"}"#;
        let api_job: ApiJob = serde_json::from_str(json).unwrap();
        let job: Job = api_job.into();
        assert_eq!(job.status, JobStatus::Running);
        assert!(job.files.is_empty());
    }

    #[test]
    fn test_failed_maps_to_failed() {
        let json = r#"{"job_id": "abc", "status_code": "FAILED", "files": []}"#;
        let api_job: ApiJob = serde_json::from_str(json).unwrap();
        let job: Job = api_job.into();
        assert_eq!(job.status, JobStatus::Failed);
    }

    #[test]
    fn test_job_url_trims_and_encodes() {
        let tracker = Hyp3Tracker::new(TrackerConfig {
            api_url: "https://hyp3.example.com/".to_string(),
            username: "user".to_string(),
            password: "secret".to_string(),
            timeout_secs: 30,
        });

        assert_eq!(
            tracker.job_url("job 1"),
            "https://hyp3.example.com/jobs/job%201"
        );
    }
}
