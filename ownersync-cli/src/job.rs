//! Wiring of one job run: resolve targets, acquire clients, run, release.

use anyhow::{Context, Result};

use ownersync_client::{ClientRegistry, HttpConnector};
use ownersync_core::{request, targets};
use ownersync_runner::run_blocking;

use crate::options::JobOptions;

/// Value of the `component` field carried by every log line of a run.
pub const COMPONENT: &str = "ownersync";

pub fn run(options: JobOptions) -> Result<()> {
    let _job = tracing::info_span!("sync_job", component = COMPONENT).entered();

    let requests = request::build(
        options.platform.clone(),
        options.file_names.clone(),
        targets::resolve(&options.org_repos),
    );
    let rendered =
        serde_json::to_string(&requests).context("failed to render sync configuration")?;
    tracing::info!(config = %rendered, "resolved sync configuration");

    if options.dry_run {
        println!(
            "{}",
            serde_json::to_string_pretty(&requests)
                .context("failed to render sync configuration")?
        );
        return Ok(());
    }

    let connector = HttpConnector::new(options.request_timeout);
    let registry = ClientRegistry::acquire(
        std::slice::from_ref(&options.platform),
        &options.endpoint,
        &connector,
    );
    if registry.is_empty() {
        tracing::warn!(
            platform = %options.platform,
            endpoint = %options.endpoint,
            "no sync client acquired; nothing to do",
        );
        return Ok(());
    }

    let outcome = run_blocking(registry.executors(), requests, options.concurrency)
        .context("sync run failed")?;
    let release_failures = registry.release_all();

    let report = &outcome.report;
    tracing::info!(
        exit = ?outcome.exit,
        scheduled = report.scheduled,
        succeeded = report.succeeded,
        failed = report.failed,
        skipped = report.skipped,
        release_failures,
        "sync run complete",
    );
    Ok(())
}
