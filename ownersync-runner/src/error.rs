use thiserror::Error;

/// Error surface for the job runner and supervisor.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("concurrency limit must be at least 1, got {0}")]
    InvalidConcurrency(usize),

    #[error("failed to install signal handler: {0}")]
    Signal(#[source] std::io::Error),

    #[error("failed to build async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("{task} task join failure: {message}")]
    Join { task: &'static str, message: String },
}
