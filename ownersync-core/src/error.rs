//! Error types for ownersync-core.

use thiserror::Error;

/// Errors raised while turning raw option values into sync requests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The platform identifier was empty or whitespace.
    #[error("platform must not be empty")]
    EmptyPlatform,

    /// The comma-separated file list contained no usable names.
    #[error("no file names to sync in '{raw}'")]
    NoFileNames { raw: String },
}
