//! Chunked transfer runner.
//!
//! Drives per-job transfer tasks over a bounded worker pool: a fixed-width
//! semaphore shared across the whole run, one chunk of job ids in flight at
//! a time, with a barrier before the next chunk.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::metrics;

use super::config::TransferConfig;
use super::task::TransferTask;
use super::types::{JobFailure, RunSummary, TransferOutcome, TransferReport};

/// Orchestrates one full run over a job-id list.
pub struct TransferRunner {
    task: TransferTask,
    config: TransferConfig,
    permits: Arc<Semaphore>,
}

impl TransferRunner {
    pub fn new(task: TransferTask, config: TransferConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.workers.max(1)));
        Self {
            task,
            config,
            permits,
        }
    }

    /// Process every job id exactly once, chunk by chunk.
    ///
    /// Tasks within a chunk run concurrently up to the pool width. The
    /// runner waits for the whole chunk, then logs each task's trace in
    /// submission order before moving on. A failing task is recorded and
    /// never suppresses its siblings; infrastructure failures are retried
    /// only by re-running with the same job list.
    pub async fn run(&self, job_ids: &[String]) -> RunSummary {
        let chunk_size = self.config.chunk_size.max(1);
        let total_chunks = job_ids.len().div_ceil(chunk_size);
        let mut summary = RunSummary::default();

        info!("{} granules to copy", job_ids.len());

        for (chunk_idx, chunk) in job_ids.chunks(chunk_size).enumerate() {
            info!(
                "Starting chunk {}/{} ({} jobs)",
                chunk_idx + 1,
                total_chunks,
                chunk.len()
            );

            let handles: Vec<_> = chunk
                .iter()
                .map(|job_id| {
                    let task = self.task.clone();
                    let permits = Arc::clone(&self.permits);
                    let job_id = job_id.clone();
                    tokio::spawn(async move {
                        let _permit = permits
                            .acquire_owned()
                            .await
                            .expect("worker pool semaphore closed");
                        task.transfer(&job_id).await
                    })
                })
                .collect();

            for (job_id, joined) in chunk.iter().zip(join_all(handles).await) {
                match joined {
                    Ok(Ok(report)) => Self::record(&mut summary, &report),
                    Ok(Err(e)) => {
                        metrics::TRANSFER_FAILURES.inc();
                        let err = anyhow::Error::new(e);
                        error!(job_id = %job_id, "Transfer failed: {:#}", err);
                        summary.failures.push(JobFailure {
                            job_id: job_id.clone(),
                            error: format!("{:#}", err),
                        });
                    }
                    Err(join_err) => {
                        // A panicking task still must not take the chunk down
                        metrics::TRANSFER_FAILURES.inc();
                        error!(job_id = %job_id, "Transfer task aborted: {}", join_err);
                        summary.failures.push(JobFailure {
                            job_id: job_id.clone(),
                            error: join_err.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            copied = summary.copied,
            already_archived = summary.already_archived,
            deferred = summary.deferred,
            upstream_failed = summary.upstream_failed,
            failures = summary.failures.len(),
            "Run complete"
        );

        summary
    }

    fn record(summary: &mut RunSummary, report: &TransferReport) {
        let line = report.trace.join(" -> ");
        match report.outcome {
            TransferOutcome::Copied => {
                metrics::GRANULES_COPIED.inc();
                summary.copied += 1;
                info!(job_id = %report.job_id, "{}", line);
            }
            TransferOutcome::AlreadyArchived => {
                summary.already_archived += 1;
                Self::record_skip(report, &line);
            }
            TransferOutcome::JobRunning => {
                summary.deferred += 1;
                Self::record_skip(report, &line);
            }
            TransferOutcome::JobFailed => {
                summary.upstream_failed += 1;
                Self::record_skip(report, &line);
            }
        }
    }

    fn record_skip(report: &TransferReport, line: &str) {
        metrics::GRANULES_SKIPPED
            .with_label_values(&[report.outcome.as_str()])
            .inc();
        warn!(job_id = %report.job_id, "{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::granule::CenterPointReader;
    use crate::store::ObjectStore;
    use crate::testing::{MockCenterPointReader, MockJobTracker, MockObjectStore};
    use crate::tracker::JobTracker;

    #[tokio::test]
    async fn test_empty_job_list_is_a_noop() {
        let task = TransferTask::new(
            Arc::new(MockJobTracker::new()) as Arc<dyn JobTracker>,
            Arc::new(MockObjectStore::new()) as Arc<dyn ObjectStore>,
            Arc::new(MockCenterPointReader::new()) as Arc<dyn CenterPointReader>,
            "archive",
            "velocity",
        );
        let runner = TransferRunner::new(task, TransferConfig::default());

        let summary = runner.run(&[]).await;
        assert_eq!(summary.total(), 0);
        assert!(summary.failures.is_empty());
    }
}
