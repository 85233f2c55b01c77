//! Mock centerpoint reader for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::granule::{CenterPoint, CenterPointReader, GranuleError};

/// Mock implementation of the CenterPointReader trait.
///
/// Returns a per-URL point when registered, the default point otherwise.
/// Reads are recorded for assertions and can be made to fail.
pub struct MockCenterPointReader {
    default_point: Arc<RwLock<CenterPoint>>,
    by_url: Arc<RwLock<HashMap<String, CenterPoint>>>,
    fail: Arc<RwLock<Option<String>>>,
    reads: Arc<RwLock<Vec<String>>>,
}

impl Default for MockCenterPointReader {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCenterPointReader {
    /// Create a new mock reader whose default point is the origin.
    pub fn new() -> Self {
        Self {
            default_point: Arc::new(RwLock::new(CenterPoint { lat: 0.0, lon: 0.0 })),
            by_url: Arc::new(RwLock::new(HashMap::new())),
            fail: Arc::new(RwLock::new(None)),
            reads: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Set the point returned for URLs without a specific registration.
    pub async fn set_default_point(&self, point: CenterPoint) {
        *self.default_point.write().await = point;
    }

    /// Register a point for one URL.
    pub async fn set_point_for(&self, url: &str, point: CenterPoint) {
        self.by_url.write().await.insert(url.to_string(), point);
    }

    /// Make every read fail.
    pub async fn fail_with(&self, message: &str) {
        *self.fail.write().await = Some(message.to_string());
    }

    /// All recorded reads, in call order.
    pub async fn reads(&self) -> Vec<String> {
        self.reads.read().await.clone()
    }
}

#[async_trait]
impl CenterPointReader for MockCenterPointReader {
    fn name(&self) -> &str {
        "mock"
    }

    async fn center_point(&self, url: &str) -> Result<CenterPoint, GranuleError> {
        self.reads.write().await.push(url.to_string());

        if let Some(message) = self.fail.read().await.as_ref() {
            return Err(GranuleError::Http(message.clone()));
        }

        if let Some(point) = self.by_url.read().await.get(url) {
            return Ok(*point);
        }

        Ok(*self.default_point.read().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_per_url_point_overrides_default() {
        let reader = MockCenterPointReader::new();
        reader
            .set_point_for(
                "https://example.com/a.nc",
                CenterPoint {
                    lat: 61.2,
                    lon: -146.9,
                },
            )
            .await;

        let point = reader.center_point("https://example.com/a.nc").await.unwrap();
        assert_eq!(point.lat, 61.2);

        let other = reader.center_point("https://example.com/b.nc").await.unwrap();
        assert_eq!(other.lat, 0.0);
        assert_eq!(reader.reads().await.len(), 2);
    }
}
