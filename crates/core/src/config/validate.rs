use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Tracker URL is an http(s) URL
/// - Archive bucket is not empty
/// - Chunk size and worker pool width are positive
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if !config.tracker.api_url.starts_with("http://") && !config.tracker.api_url.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "tracker.api_url must be an http(s) URL, got {:?}",
            config.tracker.api_url
        )));
    }

    if config.archive.bucket.is_empty() {
        return Err(ConfigError::ValidationError(
            "archive.bucket cannot be empty".to_string(),
        ));
    }

    if config.transfer.chunk_size == 0 {
        return Err(ConfigError::ValidationError(
            "transfer.chunk_size must be positive".to_string(),
        ));
    }

    if config.transfer.workers == 0 {
        return Err(ConfigError::ValidationError(
            "transfer.workers must be positive".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ArchiveConfig, TrackerConfig};
    use crate::transfer::TransferConfig;

    fn valid_config() -> Config {
        Config {
            tracker: TrackerConfig {
                api_url: "https://hyp3.example.com".to_string(),
                username: "user".to_string(),
                password: "secret".to_string(),
                timeout_secs: 30,
            },
            archive: ArchiveConfig {
                bucket: "archive-bucket".to_string(),
                prefix: "velocity_image_pair".to_string(),
                region: "us-west-2".to_string(),
                endpoint: None,
            },
            transfer: TransferConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_bad_api_url_fails() {
        let mut config = valid_config();
        config.tracker.api_url = "hyp3.example.com".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_empty_bucket_fails() {
        let mut config = valid_config();
        config.archive.bucket = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_chunk_size_fails() {
        let mut config = valid_config();
        config.transfer.chunk_size = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_workers_fails() {
        let mut config = valid_config();
        config.transfer.workers = 0;
        assert!(validate_config(&config).is_err());
    }
}
