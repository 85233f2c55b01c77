//! Mock object store for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::store::{ObjectLocation, ObjectStore, StoreError};

/// Mock implementation of the ObjectStore trait.
///
/// The object set lives in memory; copies insert the destination so
/// re-running a transfer observes its own earlier writes, the same way a
/// durable store would. Existence checks and copies are recorded for
/// assertions, and either operation can be made to fail.
#[derive(Default)]
pub struct MockObjectStore {
    objects: Arc<RwLock<HashSet<ObjectLocation>>>,
    copies: Arc<RwLock<Vec<(ObjectLocation, ObjectLocation)>>>,
    exists_calls: Arc<RwLock<Vec<ObjectLocation>>>,
    fail_exists: Arc<RwLock<Option<String>>>,
    fail_copy: Arc<RwLock<Option<String>>>,
}

impl MockObjectStore {
    /// Create a new mock store with no objects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate an object.
    pub async fn seed_object(&self, location: ObjectLocation) {
        self.objects.write().await.insert(location);
    }

    /// Whether an object is currently present.
    pub async fn contains(&self, location: &ObjectLocation) -> bool {
        self.objects.read().await.contains(location)
    }

    /// All recorded copies as (source, dest) pairs, in call order.
    pub async fn copies(&self) -> Vec<(ObjectLocation, ObjectLocation)> {
        self.copies.read().await.clone()
    }

    /// All recorded existence checks, in call order.
    pub async fn exists_calls(&self) -> Vec<ObjectLocation> {
        self.exists_calls.read().await.clone()
    }

    /// Make every existence check fail.
    pub async fn fail_exists_with(&self, message: &str) {
        *self.fail_exists.write().await = Some(message.to_string());
    }

    /// Make every copy fail.
    pub async fn fail_copy_with(&self, message: &str) {
        *self.fail_copy.write().await = Some(message.to_string());
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    fn name(&self) -> &str {
        "mock"
    }

    async fn object_exists(&self, location: &ObjectLocation) -> Result<bool, StoreError> {
        self.exists_calls.write().await.push(location.clone());

        if let Some(message) = self.fail_exists.read().await.as_ref() {
            return Err(StoreError::ApiError(message.clone()));
        }

        Ok(self.objects.read().await.contains(location))
    }

    async fn copy(
        &self,
        source: &ObjectLocation,
        dest: &ObjectLocation,
    ) -> Result<(), StoreError> {
        if let Some(message) = self.fail_copy.read().await.as_ref() {
            return Err(StoreError::ApiError(message.clone()));
        }

        self.copies
            .write()
            .await
            .push((source.clone(), dest.clone()));
        self.objects.write().await.insert(dest.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_copy_makes_object_exist() {
        let store = MockObjectStore::new();
        let source = ObjectLocation::new("staging", "a");
        let dest = ObjectLocation::new("archive", "b");

        assert!(!store.object_exists(&dest).await.unwrap());
        store.copy(&source, &dest).await.unwrap();
        assert!(store.object_exists(&dest).await.unwrap());
        assert_eq!(store.copies().await.len(), 1);
    }

    #[tokio::test]
    async fn test_injected_copy_failure() {
        let store = MockObjectStore::new();
        store.fail_copy_with("access denied").await;
        let err = store
            .copy(
                &ObjectLocation::new("staging", "a"),
                &ObjectLocation::new("archive", "b"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ApiError(_)));
    }
}
