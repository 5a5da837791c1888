//! Sync-once job harness: bounded worker pool, cooperative cancellation and
//! the signal-aware supervisor that decides how the process winds down.

mod error;
pub mod report;
mod runner;
mod supervisor;
pub mod telemetry;

pub use error::RunnerError;
pub use report::{RunReport, TargetFailure, UNKNOWN_TARGET};
pub use runner::{run_blocking, start_once, CancelFlag, Executors, RunHandle};
pub use supervisor::{supervise, termination_signal, RunExit, SignalWatcher, SupervisorOutcome};
pub use telemetry::{init_tracing, LogFormat};
