//! Job-tracking service collaborator.
//!
//! The tracker owns job state; this module only reads it. One backend
//! exists, the HyP3 REST API, behind the [`JobTracker`] trait so the
//! transfer pipeline can be driven against mocks.

mod hyp3;
mod types;

pub use hyp3::Hyp3Tracker;
pub use types::{Job, JobStatus, JobTracker, OutputFile, TrackerError};
