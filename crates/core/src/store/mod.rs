//! Object-store collaborator.
//!
//! The archive (and the staging area it copies from) live in an external
//! object store. The transfer pipeline only needs two operations, an
//! existence check and a copy, exposed through the [`ObjectStore`] trait.

mod s3;
mod types;

pub use s3::S3Store;
pub use types::{ObjectLocation, ObjectStore, StoreError};
