use std::future::Future;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::error::RunnerError;
use crate::report::RunReport;
use crate::runner::RunHandle;

/// Which event ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExit {
    /// The run finished before any termination signal arrived.
    Finished,
    /// A termination signal arrived first; the run was cancelled and unwound.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupervisorOutcome {
    pub exit: RunExit,
    pub report: RunReport,
}

/// Race run completion against `shutdown`.
///
/// If the run finishes first, `shutdown` is dropped and the outcome is
/// [`RunExit::Finished`]. If `shutdown` resolves first the run is cancelled
/// and this still waits for in-flight units to unwind before returning.
/// Completion wins a tie.
pub async fn supervise<S>(
    handle: RunHandle,
    shutdown: S,
) -> Result<SupervisorOutcome, RunnerError>
where
    S: Future<Output = ()>,
{
    let cancel = handle.canceller();
    let wait = handle.wait();
    tokio::pin!(wait);
    tokio::pin!(shutdown);

    tokio::select! {
        biased;
        report = &mut wait => {
            tracing::info!("receive done. exit normally");
            Ok(SupervisorOutcome { exit: RunExit::Finished, report: report? })
        }
        () = &mut shutdown => {
            tracing::info!("receive exit signal");
            if cancel.cancel() {
                tracing::info!("cancellation requested; waiting for in-flight sync units");
            }
            let report = wait.await?;
            Ok(SupervisorOutcome { exit: RunExit::Cancelled, report })
        }
    }
}

/// Resolve on the first SIGINT or SIGTERM (Ctrl-C elsewhere).
pub async fn termination_signal() -> Result<(), RunnerError> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate()).map_err(RunnerError::Signal)?;
        let mut sigint = signal(SignalKind::interrupt()).map_err(RunnerError::Signal)?;

        tokio::select! {
            _ = sigterm.recv() => tracing::info!("received SIGTERM"),
            _ = sigint.recv() => tracing::info!("received SIGINT"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.map_err(RunnerError::Signal)?;
        tracing::info!("received ctrl-c");
    }

    Ok(())
}

/// Dedicated task watching for termination signals.
///
/// The task is aborted when the watcher is dropped.
pub struct SignalWatcher {
    received: oneshot::Receiver<()>,
    task: JoinHandle<()>,
}

impl SignalWatcher {
    /// Spawn the watcher task. Must be called from within a tokio runtime.
    pub fn spawn() -> Self {
        let (tx, received) = oneshot::channel();
        let task = tokio::spawn(async move {
            match termination_signal().await {
                Ok(()) => {
                    let _ = tx.send(());
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        "signal watcher unavailable; run cannot be cancelled",
                    );
                }
            }
        }
        .in_current_span());
        Self { received, task }
    }

    /// Resolve once a termination signal has been observed. Never resolves if
    /// the watcher could not install its handlers.
    pub async fn recv(&mut self) {
        if (&mut self.received).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

impl Drop for SignalWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
