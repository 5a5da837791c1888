//! Client capability traits.

use std::fmt;
use std::sync::Arc;

use ownersync_core::SyncTarget;

use crate::error::ClientError;

/// A connection to the backend sync service for one platform.
///
/// Implementations must be safe to share between concurrent workers. Both
/// methods block; the runner drives them from the blocking thread pool.
pub trait SyncFileClient: Send + Sync {
    /// Synchronize the target's files for one organization or repository.
    fn sync_once(&self, target: &SyncTarget) -> Result<(), ClientError>;

    /// Release the connection. Best-effort; called once per acquired client.
    fn stop(&self) -> Result<(), ClientError>;
}

/// Produces clients for an endpoint.
pub trait Connector {
    fn connect(&self, endpoint: &str) -> Result<Arc<dyn SyncFileClient>, ClientError>;
}

impl<F> Connector for F
where
    F: Fn(&str) -> Result<Arc<dyn SyncFileClient>, ClientError>,
{
    fn connect(&self, endpoint: &str) -> Result<Arc<dyn SyncFileClient>, ClientError> {
        self(endpoint)
    }
}

/// Sync-only view of a client, handed to workers.
///
/// Workers can run syncs through it but cannot release the connection;
/// that stays with [`crate::ClientRegistry`].
#[derive(Clone)]
pub struct SyncExecutor {
    client: Arc<dyn SyncFileClient>,
}

impl SyncExecutor {
    pub fn new(client: Arc<dyn SyncFileClient>) -> Self {
        Self { client }
    }

    pub fn sync_once(&self, target: &SyncTarget) -> Result<(), ClientError> {
        self.client.sync_once(target)
    }
}

impl fmt::Debug for SyncExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncExecutor").finish_non_exhaustive()
    }
}
