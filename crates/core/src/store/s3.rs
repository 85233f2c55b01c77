//! S3 object-store backend.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::debug;

use crate::config::ArchiveConfig;

use super::{ObjectLocation, ObjectStore, StoreError};

impl From<s3::error::S3Error> for StoreError {
    fn from(e: s3::error::S3Error) -> Self {
        StoreError::ApiError(e.to_string())
    }
}

/// S3 backend for the archival store.
///
/// Buckets are addressed lazily, so the same backend reaches both the
/// staging bucket (copy source) and the archive bucket.
pub struct S3Store {
    region: Region,
    credentials: Credentials,
}

impl S3Store {
    /// Create a store from the archive configuration. Credentials come
    /// from the environment (standard AWS variables or profile).
    pub fn new(config: &ArchiveConfig) -> Result<Self, StoreError> {
        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => config.region.parse().map_err(|_| {
                StoreError::Configuration(format!("invalid region: {}", config.region))
            })?,
        };

        let credentials =
            Credentials::default().map_err(|e| StoreError::Credentials(e.to_string()))?;

        Ok(Self {
            region,
            credentials,
        })
    }

    fn bucket(&self, name: &str) -> Result<Bucket, StoreError> {
        let bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())?;
        Ok(bucket)
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    fn name(&self) -> &str {
        "s3"
    }

    async fn object_exists(&self, location: &ObjectLocation) -> Result<bool, StoreError> {
        let bucket = self.bucket(&location.bucket)?;

        // Missing keys surface as an HTTP failure from head_object rather
        // than a clean result; any client error reads as absent and the
        // copy path decides.
        match bucket.head_object(&location.key).await {
            Ok((_, code)) if (200..300).contains(&code) => Ok(true),
            Ok(_) => Ok(false),
            Err(s3::error::S3Error::Http(_, _)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn copy(
        &self,
        source: &ObjectLocation,
        dest: &ObjectLocation,
    ) -> Result<(), StoreError> {
        debug!(source = %source, dest = %dest, "Copying object");

        if source.bucket == dest.bucket {
            // Server-side copy within one bucket.
            let bucket = self.bucket(&dest.bucket)?;
            bucket
                .copy_object_internal(&source.key, &dest.key)
                .await?;
            return Ok(());
        }

        // rust-s3 exposes no cross-bucket server-side copy, so relay the
        // bytes. One object in flight per worker bounds memory.
        let source_bucket = self.bucket(&source.bucket)?;
        let dest_bucket = self.bucket(&dest.bucket)?;

        let response = source_bucket.get_object(&source.key).await?;
        if !(200..300).contains(&response.status_code()) {
            return Err(StoreError::ApiError(format!(
                "HTTP {} reading {}",
                response.status_code(),
                source
            )));
        }

        let put = dest_bucket.put_object(&dest.key, response.bytes()).await?;
        if !(200..300).contains(&put.status_code()) {
            return Err(StoreError::ApiError(format!(
                "HTTP {} writing {}",
                put.status_code(),
                dest
            )));
        }

        Ok(())
    }
}
