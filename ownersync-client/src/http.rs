//! HTTP/JSON backend client.
//!
//! Each sync is a `POST {endpoint}/v1/sync` carrying the platform,
//! organization, optional repository and file names. Any 2xx response is a
//! success; the service owns comparison and writing of the files.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use ownersync_core::SyncTarget;

use crate::client::{Connector, SyncFileClient};
use crate::error::ClientError;

pub const SYNC_PATH: &str = "/v1/sync";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct SyncFileBody<'a> {
    platform: &'a str,
    org: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    repo: Option<&'a str>,
    file_names: &'a [String],
}

/// Blocking HTTP client for the sync service.
pub struct HttpSyncClient {
    agent: ureq::Agent,
    sync_url: String,
    stopped: AtomicBool,
}

impl HttpSyncClient {
    /// Validate `endpoint` and prepare an agent. No request is sent here.
    pub fn connect(endpoint: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base = normalize_endpoint(endpoint)?;
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Ok(Self {
            agent,
            sync_url: format!("{base}{SYNC_PATH}"),
            stopped: AtomicBool::new(false),
        })
    }

    pub fn sync_url(&self) -> &str {
        &self.sync_url
    }
}

impl SyncFileClient for HttpSyncClient {
    fn sync_once(&self, target: &SyncTarget) -> Result<(), ClientError> {
        if self.stopped.load(Ordering::Acquire) {
            return Err(ClientError::Stopped);
        }

        let body = SyncFileBody {
            platform: target.platform.as_str(),
            org: target.organization.as_str(),
            repo: target.repository.as_deref(),
            file_names: &target.file_names,
        };

        match self.agent.post(&self.sync_url).send_json(&body) {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(code, response)) => Err(ClientError::Status {
                code,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(err)) => Err(ClientError::Transport(err.to_string())),
        }
    }

    fn stop(&self) -> Result<(), ClientError> {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return Err(ClientError::AlreadyStopped);
        }
        tracing::debug!(url = %self.sync_url, "http sync client stopped");
        Ok(())
    }
}

/// [`Connector`] producing [`HttpSyncClient`]s with a fixed request timeout.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    timeout: Duration,
}

impl HttpConnector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpConnector {
    fn default() -> Self {
        Self::new(DEFAULT_REQUEST_TIMEOUT)
    }
}

impl Connector for HttpConnector {
    fn connect(&self, endpoint: &str) -> Result<Arc<dyn SyncFileClient>, ClientError> {
        Ok(Arc::new(HttpSyncClient::connect(endpoint, self.timeout)?))
    }
}

fn normalize_endpoint(endpoint: &str) -> Result<String, ClientError> {
    let invalid = |reason| ClientError::InvalidEndpoint {
        endpoint: endpoint.to_owned(),
        reason,
    };

    let trimmed = endpoint.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| invalid("expected an http:// or https:// address"))?;

    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() {
        return Err(invalid("missing host"));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trailing_slash_is_dropped() {
        let client =
            HttpSyncClient::connect("http://sync.local:8888/", DEFAULT_REQUEST_TIMEOUT).unwrap();
        assert_eq!(client.sync_url(), "http://sync.local:8888/v1/sync");
    }

    #[test]
    fn endpoint_without_scheme_is_rejected() {
        let err = normalize_endpoint("sync.local:8888").unwrap_err();
        assert!(matches!(err, ClientError::InvalidEndpoint { .. }), "got: {err}");
    }

    #[test]
    fn endpoint_without_host_is_rejected() {
        let err = normalize_endpoint("https:///v1").unwrap_err();
        assert!(err.to_string().contains("missing host"), "got: {err}");
    }

    #[test]
    fn stop_twice_reports_already_stopped() {
        let client =
            HttpSyncClient::connect("http://localhost:1", DEFAULT_REQUEST_TIMEOUT).unwrap();
        client.stop().expect("first stop");
        assert!(matches!(client.stop(), Err(ClientError::AlreadyStopped)));
    }
}
