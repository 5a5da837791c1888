//! Ownersync core library — sync request model, target resolution, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and the request/selector structs
//! - [`targets`] — `org` / `org/repo` token resolution
//! - [`request`] — file-name parsing and [`SyncRequest`] construction
//! - [`error`] — [`CoreError`]

pub mod error;
pub mod request;
pub mod targets;
pub mod types;

pub use error::CoreError;
pub use targets::ResolvedTargets;
pub use types::{OrgName, OrgRepoSelector, Platform, SyncRequest, SyncTarget};
