//! Per-run client registry with guaranteed release.

use std::collections::HashMap;
use std::sync::Arc;

use ownersync_core::Platform;

use crate::client::{Connector, SyncExecutor, SyncFileClient};

/// Clients acquired for a run, keyed by platform.
///
/// Only successful acquisitions are kept. Every client is stopped exactly
/// once: through [`ClientRegistry::release_all`], or on drop when the run
/// exits early or unwinds.
pub struct ClientRegistry {
    endpoint: String,
    clients: HashMap<Platform, Arc<dyn SyncFileClient>>,
}

impl ClientRegistry {
    /// Attempt one connection per platform; failures are logged and omitted.
    pub fn acquire<C>(platforms: &[Platform], endpoint: &str, connector: &C) -> Self
    where
        C: Connector + ?Sized,
    {
        let mut clients = HashMap::new();
        for platform in platforms {
            if clients.contains_key(platform) {
                continue;
            }
            match connector.connect(endpoint) {
                Ok(client) => {
                    tracing::debug!(platform = %platform, endpoint, "sync client acquired");
                    clients.insert(platform.clone(), client);
                }
                Err(err) => {
                    tracing::warn!(
                        platform = %platform,
                        endpoint,
                        error = %err,
                        "init sync file client failed; platform excluded from run",
                    );
                }
            }
        }

        Self {
            endpoint: endpoint.to_owned(),
            clients,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn contains(&self, platform: &Platform) -> bool {
        self.clients.contains_key(platform)
    }

    /// Sync-only handles for the workers.
    pub fn executors(&self) -> HashMap<Platform, SyncExecutor> {
        self.clients
            .iter()
            .map(|(platform, client)| (platform.clone(), SyncExecutor::new(Arc::clone(client))))
            .collect()
    }

    /// Stop every client, logging failures. Returns the number of failed releases.
    pub fn release_all(mut self) -> usize {
        self.release_remaining()
    }

    fn release_remaining(&mut self) -> usize {
        let mut failures = 0;
        for (platform, client) in self.clients.drain() {
            if let Err(err) = client.stop() {
                failures += 1;
                tracing::warn!(
                    platform = %platform,
                    endpoint = %self.endpoint,
                    error = %err,
                    "failed to stop sync client",
                );
            }
        }
        failures
    }
}

impl Drop for ClientRegistry {
    fn drop(&mut self) {
        if !self.clients.is_empty() {
            self.release_remaining();
        }
    }
}
