use serde::{Deserialize, Serialize};

use crate::transfer::TransferConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub tracker: TrackerConfig,
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub transfer: TransferConfig,
}

/// Job-tracking service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerConfig {
    /// Base URL of the job-tracking API (e.g. "https://hyp3-autorift.asf.alaska.edu")
    pub api_url: String,
    /// Username for the job-tracking service
    pub username: String,
    /// Password for the job-tracking service
    pub password: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Archival destination configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveConfig {
    /// Destination bucket for archived granules
    pub bucket: String,
    /// Key prefix inside the bucket; spatial directories are created below it
    #[serde(default)]
    pub prefix: String,
    /// Bucket region (default: "us-west-2")
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible stores (testing, on-prem)
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_region() -> String {
    "us-west-2".to_string()
}
