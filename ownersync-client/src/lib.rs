//! Backend sync clients and the per-run client registry.
//!
//! The [`SyncFileClient`] trait is the seam between the job harness and the
//! service that actually compares and writes repository files.

pub mod client;
mod error;
pub mod http;
pub mod registry;

pub use client::{Connector, SyncExecutor, SyncFileClient};
pub use error::ClientError;
pub use http::{HttpConnector, HttpSyncClient};
pub use registry::ClientRegistry;
