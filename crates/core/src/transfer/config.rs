//! Transfer runner configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the transfer runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Job ids dispatched per chunk (default: 10).
    /// Chunking bounds in-flight work and gives a natural progress
    /// boundary; the final archive contents are identical for any
    /// positive value.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Width of the worker pool (default: 8). Fixed for the whole run,
    /// independent of chunk size.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Leading bytes fetched per granule when reading centerpoint
    /// metadata (default: 64 KiB). The netCDF header must fit.
    #[serde(default = "default_header_read_bytes")]
    pub header_read_bytes: usize,
}

fn default_chunk_size() -> usize {
    10
}

fn default_workers() -> usize {
    8
}

fn default_header_read_bytes() -> usize {
    64 * 1024
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            workers: default_workers(),
            header_read_bytes: default_header_read_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransferConfig::default();
        assert_eq!(config.chunk_size, 10);
        assert_eq!(config.workers, 8);
        assert_eq!(config.header_read_bytes, 64 * 1024);
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: TransferConfig = toml::from_str("").unwrap();
        assert_eq!(config.chunk_size, 10);
        assert_eq!(config.workers, 8);
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
            chunk_size = 25
            workers = 4
            header_read_bytes = 131072
        "#;
        let config: TransferConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.chunk_size, 25);
        assert_eq!(config.workers, 4);
        assert_eq!(config.header_read_bytes, 131072);
    }
}
