pub mod config;
pub mod granule;
pub mod metrics;
pub mod spatial;
pub mod store;
pub mod testing;
pub mod tracker;
pub mod transfer;

pub use config::{
    load_config, load_config_from_str, validate_config, ArchiveConfig, Config, ConfigError,
    TrackerConfig,
};
pub use granule::{CenterPoint, CenterPointReader, GranuleError, HttpGranuleReader};
pub use spatial::point_to_prefix;
pub use store::{ObjectLocation, ObjectStore, S3Store, StoreError};
pub use tracker::{Hyp3Tracker, Job, JobStatus, JobTracker, OutputFile, TrackerError};
pub use transfer::{
    JobFailure, RunSummary, TransferConfig, TransferError, TransferOutcome, TransferReport,
    TransferRunner, TransferTask,
};
