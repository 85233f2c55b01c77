//! Types for object-store operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during object-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid store configuration: {0}")]
    Configuration(String),

    #[error("Credentials error: {0}")]
    Credentials(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// A bucket + key pair identifying one stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// Trait for object-store backends.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Whether an object exists at the given location.
    async fn object_exists(&self, location: &ObjectLocation) -> Result<bool, StoreError>;

    /// Copy one object. Overwrites whatever is at `dest`; callers gate on
    /// `object_exists` first (read-then-act, no atomic guard).
    async fn copy(
        &self,
        source: &ObjectLocation,
        dest: &ObjectLocation,
    ) -> Result<(), StoreError>;
}
