use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moraine_core::{
    load_config, validate_config, CenterPointReader, HttpGranuleReader, Hyp3Tracker, JobTracker,
    ObjectStore, S3Store, TransferRunner, TransferTask,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("MORAINE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    // The job-id list is read once at startup
    let job_ids_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("Usage: moraine <job-ids.json>")?;
    let raw = tokio::fs::read_to_string(&job_ids_path)
        .await
        .with_context(|| format!("Failed to read job id list from {:?}", job_ids_path))?;
    let job_ids: Vec<String> =
        serde_json::from_str(&raw).context("Job id list must be a JSON array of strings")?;

    info!(
        "Transferring {} jobs into {}/{}",
        job_ids.len(),
        config.archive.bucket,
        config.archive.prefix
    );

    let tracker: Arc<dyn JobTracker> = Arc::new(Hyp3Tracker::new(config.tracker.clone()));
    let store: Arc<dyn ObjectStore> =
        Arc::new(S3Store::new(&config.archive).context("Failed to create object store")?);
    let reader: Arc<dyn CenterPointReader> =
        Arc::new(HttpGranuleReader::new(config.transfer.header_read_bytes));

    let task = TransferTask::new(
        tracker,
        store,
        reader,
        config.archive.bucket.clone(),
        config.archive.prefix.clone(),
    );
    let runner = TransferRunner::new(task, config.transfer.clone());

    let summary = runner.run(&job_ids).await;

    if summary.failures.is_empty() {
        info!(
            "All {} jobs accounted for: {} copied, {} already archived, {} deferred, {} failed upstream",
            summary.total(),
            summary.copied,
            summary.already_archived,
            summary.deferred,
            summary.upstream_failed
        );
    } else {
        warn!(
            "{} of {} jobs hit infrastructure failures; fix the cause and re-run with the same list",
            summary.failures.len(),
            summary.total()
        );
        for failure in &summary.failures {
            warn!(job_id = %failure.job_id, "{}", failure.error);
        }
    }

    Ok(())
}
