//! Per-job transfer task.

use std::sync::Arc;

use tracing::debug;

use crate::granule::CenterPointReader;
use crate::spatial::point_to_prefix;
use crate::store::{ObjectLocation, ObjectStore};
use crate::tracker::{JobStatus, JobTracker};

use super::types::{TransferError, TransferOutcome, TransferReport};

/// Executes the transfer of one job's output into the archive.
///
/// Holds the collaborator handles for the process lifetime; cloning is
/// cheap and every worker drives the same instance.
#[derive(Clone)]
pub struct TransferTask {
    tracker: Arc<dyn JobTracker>,
    store: Arc<dyn ObjectStore>,
    reader: Arc<dyn CenterPointReader>,
    archive_bucket: String,
    archive_prefix: String,
}

impl TransferTask {
    pub fn new(
        tracker: Arc<dyn JobTracker>,
        store: Arc<dyn ObjectStore>,
        reader: Arc<dyn CenterPointReader>,
        archive_bucket: impl Into<String>,
        archive_prefix: impl Into<String>,
    ) -> Self {
        Self {
            tracker,
            store,
            reader,
            archive_bucket: archive_bucket.into(),
            archive_prefix: archive_prefix.into(),
        }
    }

    /// Transfer one job's first output file, if the job succeeded and the
    /// target key is not already occupied.
    ///
    /// Expected per-job states come back as `Ok` with an outcome and the
    /// accumulated trace; `Err` means an infrastructure failure that the
    /// dispatch layer flags without aborting sibling tasks.
    pub async fn transfer(&self, job_id: &str) -> Result<TransferReport, TransferError> {
        let mut trace = Vec::new();

        let job = self
            .tracker
            .get_job(job_id)
            .await
            .map_err(|source| TransferError::Lookup {
                job_id: job_id.to_string(),
                source,
            })?;
        trace.push(format!("processing job {} ({})", job.id, job.status.as_str()));

        match job.status {
            JobStatus::Running => {
                trace.push(format!(
                    "job {} is still running, deferring to a future run",
                    job.id
                ));
                return Ok(TransferReport {
                    job_id: job.id,
                    outcome: TransferOutcome::JobRunning,
                    trace,
                });
            }
            JobStatus::Failed => {
                trace.push(format!("job {} failed upstream, nothing to archive", job.id));
                return Ok(TransferReport {
                    job_id: job.id,
                    outcome: TransferOutcome::JobFailed,
                    trace,
                });
            }
            JobStatus::Succeeded => {}
        }

        // Jobs can produce several files; only the first is archived.
        let file = job
            .files
            .first()
            .ok_or_else(|| TransferError::NoOutputFiles {
                job_id: job.id.clone(),
            })?;

        let center = self
            .reader
            .center_point(&file.url)
            .await
            .map_err(|source| TransferError::Metadata {
                job_id: job.id.clone(),
                url: file.url.clone(),
                source,
            })?;
        trace.push(format!(
            "granule center (lat, lon): ({}, {})",
            center.lat, center.lon
        ));

        let prefix = point_to_prefix(&self.archive_prefix, center.lat, center.lon);
        let target = ObjectLocation::new(
            &self.archive_bucket,
            format!("{}/{}", prefix, file.filename),
        );
        let staging = ObjectLocation::new(&file.bucket, &file.key);
        debug!(job_id = %job.id, target = %target, "Resolved target key");

        let exists =
            self.store
                .object_exists(&target)
                .await
                .map_err(|source| TransferError::ExistenceCheck {
                    job_id: job.id.clone(),
                    location: target.to_string(),
                    source,
                })?;

        if exists {
            trace.push(format!("{} already exists, skipping", target));
            return Ok(TransferReport {
                job_id: job.id,
                outcome: TransferOutcome::AlreadyArchived,
                trace,
            });
        }

        self.store
            .copy(&staging, &target)
            .await
            .map_err(|source| TransferError::Copy {
                job_id: job.id.clone(),
                dest: target.to_string(),
                source,
            })?;
        trace.push(format!("copied {} to {}", staging, target));

        Ok(TransferReport {
            job_id: job.id,
            outcome: TransferOutcome::Copied,
            trace,
        })
    }
}
