//! Mock implementations of the collaborator traits for testing.
//!
//! Public so integration tests and downstream harnesses can drive the
//! transfer pipeline without a tracker, an object store, or network access.

pub mod fixtures;
mod mock_reader;
mod mock_store;
mod mock_tracker;

pub use mock_reader::MockCenterPointReader;
pub use mock_store::MockObjectStore;
pub use mock_tracker::MockJobTracker;
