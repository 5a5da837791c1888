use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::Instrument;

use ownersync_client::SyncExecutor;
use ownersync_core::{Platform, SyncRequest, SyncTarget};

use crate::error::RunnerError;
use crate::report::{RunReport, UnitOutcome};
use crate::supervisor::{supervise, SignalWatcher, SupervisorOutcome};

pub type Executors = HashMap<Platform, SyncExecutor>;

/// Shared abandonment flag. Checked by each unit right before it starts.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Request cancellation. Returns `true` only for the call that set the flag.
    pub fn cancel(&self) -> bool {
        !self.0.swap(true, Ordering::AcqRel)
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Handle to a started run.
pub struct RunHandle {
    cancel: CancelFlag,
    done: JoinHandle<RunReport>,
}

impl RunHandle {
    /// Stop scheduling new units. Units already running finish normally.
    pub fn cancel(&self) {
        if self.cancel.cancel() {
            tracing::info!("cancellation requested; pending sync units will be skipped");
        }
    }

    /// A clone of the cancel flag, usable after [`RunHandle::wait`] has taken the handle.
    pub fn canceller(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.done.is_finished()
    }

    /// Block until every scheduled unit has succeeded, failed or been skipped.
    pub async fn wait(self) -> Result<RunReport, RunnerError> {
        self.done.await.map_err(|err| RunnerError::Join {
            task: "run_coordinator",
            message: err.to_string(),
        })
    }
}

/// Schedule one unit per target of every request, at most `concurrency` at a time.
///
/// Must be called from within a tokio runtime. Requests whose platform has no
/// executor have all their units recorded as failed.
pub fn start_once(
    executors: Executors,
    requests: Vec<SyncRequest>,
    concurrency: usize,
) -> Result<RunHandle, RunnerError> {
    if concurrency == 0 {
        return Err(RunnerError::InvalidConcurrency(concurrency));
    }

    let cancel = CancelFlag::default();
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut units = Vec::new();

    for request in &requests {
        if request.is_noop() {
            tracing::info!(platform = %request.platform, "sync request has nothing to do");
            continue;
        }
        let executor = executors.get(&request.platform).cloned();
        for target in request.units() {
            let executor = executor.clone();
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();
            units.push(tokio::spawn(
                run_unit(executor, target, semaphore, cancel).in_current_span(),
            ));
        }
    }

    tracing::info!(units = units.len(), concurrency, "sync run started");

    let done = tokio::spawn(async move {
        let mut report = RunReport {
            scheduled: units.len(),
            ..RunReport::default()
        };
        for unit in units {
            match unit.await {
                Ok(outcome) => report.record(outcome),
                Err(err) => {
                    tracing::error!(error = %err, "sync unit task join failure");
                    report.record_join_failure(err.to_string());
                }
            }
        }
        report
    }
    .in_current_span());

    Ok(RunHandle { cancel, done })
}

async fn run_unit(
    executor: Option<SyncExecutor>,
    target: SyncTarget,
    semaphore: Arc<Semaphore>,
    cancel: CancelFlag,
) -> UnitOutcome {
    let Some(executor) = executor else {
        tracing::error!(
            platform = %target.platform,
            org = %target.organization,
            repo = target.repo_label(),
            "no sync client for platform",
        );
        return UnitOutcome::Failed {
            error: format!("no sync client for platform '{}'", target.platform),
            target,
        };
    };

    let Ok(_permit) = semaphore.acquire_owned().await else {
        return UnitOutcome::Skipped;
    };

    if cancel.is_cancelled() {
        tracing::debug!(unit = %target, "run cancelled; skipping sync unit");
        return UnitOutcome::Skipped;
    }

    let call_target = target.clone();
    let result = tokio::task::spawn_blocking(move || executor.sync_once(&call_target)).await;

    let error = match result {
        Ok(Ok(())) => {
            tracing::debug!(unit = %target, "sync unit completed");
            return UnitOutcome::Succeeded;
        }
        Ok(Err(err)) => err.to_string(),
        Err(err) => format!("sync task join failure: {err}"),
    };

    tracing::error!(
        platform = %target.platform,
        org = %target.organization,
        repo = target.repo_label(),
        file_names = ?target.file_names,
        error = %error,
        "sync repo files failed",
    );
    UnitOutcome::Failed { target, error }
}

/// Build a runtime, run the requests under [`supervise`] with OS termination
/// signals wired to cancellation, and block until the run has unwound.
pub fn run_blocking(
    executors: Executors,
    requests: Vec<SyncRequest>,
    concurrency: usize,
) -> Result<SupervisorOutcome, RunnerError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(RunnerError::Runtime)?;

    runtime.block_on(async move {
        let handle = start_once(executors, requests, concurrency)?;
        let mut signals = SignalWatcher::spawn();
        supervise(handle, signals.recv()).await
    })
}
