//! Types for granule metadata reading.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading granule metadata.
#[derive(Debug, Error)]
pub enum GranuleError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Not a netCDF classic file")]
    NotNetcdf,

    #[error("Truncated netCDF header")]
    TruncatedHeader,

    #[error("Malformed netCDF header: {0}")]
    MalformedHeader(String),

    #[error("Centerpoint attributes not present: {0}")]
    MissingCenterPoint(String),
}

/// Geographic centerpoint of a granule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Trait for centerpoint reader backends.
#[async_trait]
pub trait CenterPointReader: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Read the centerpoint embedded in the granule at `url`.
    async fn center_point(&self, url: &str) -> Result<CenterPoint, GranuleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_point_serialization() {
        let point = CenterPoint {
            lat: 78.3,
            lon: -123.7,
        };
        let json = serde_json::to_string(&point).unwrap();
        let parsed: CenterPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, point);
    }

    #[test]
    fn test_error_display() {
        let err = GranuleError::MissingCenterPoint("no latitude attribute".to_string());
        assert_eq!(
            err.to_string(),
            "Centerpoint attributes not present: no latitude attribute"
        );
    }
}
