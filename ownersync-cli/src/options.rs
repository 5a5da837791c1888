//! Command-line flags and their validation.

use std::time::Duration;

use anyhow::{bail, ensure, Result};
use clap::Parser;

use ownersync_core::{request, targets, Platform};
use ownersync_runner::LogFormat;

/// Upper bound on sync units running at once when `--concurrency` is not given.
pub const DEFAULT_CONCURRENCY: usize = 10;

#[derive(Parser, Debug)]
#[command(
    name = "ownersync",
    version,
    about = "Sync repository metadata files (OWNERS, ...) to forge organizations once, then exit",
    long_about = None,
)]
pub struct Cli {
    /// Platform of the repositories that need files synced.
    #[arg(long, env = "OWNERSYNC_PLATFORM", default_value = "gitee")]
    pub platform: String,

    /// File names to sync, separated by commas.
    #[arg(
        long = "file-names",
        visible_alias = "fileNames",
        env = "OWNERSYNC_FILE_NAMES",
        default_value = "OWNERS"
    )]
    pub file_names: String,

    /// Address of the sync service.
    #[arg(long, env = "OWNERSYNC_ENDPOINT")]
    pub endpoint: String,

    /// Targets to sync, `org` or `org/repo`, separated by commas.
    #[arg(long = "org-repos", visible_alias = "orgRepos", env = "OWNERSYNC_ORG_REPOS")]
    pub org_repos: String,

    /// Maximum number of sync units running at once.
    #[arg(long, env = "OWNERSYNC_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout for calls to the sync service.
    #[arg(long, default_value_t = 60)]
    pub request_timeout_secs: u64,

    /// Log line format: text or json.
    #[arg(long, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Print the resolved sync requests as JSON and exit without syncing.
    #[arg(long)]
    pub dry_run: bool,
}

/// Validated job options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOptions {
    pub platform: Platform,
    pub file_names: Vec<String>,
    pub endpoint: String,
    pub org_repos: Vec<String>,
    pub concurrency: usize,
    pub request_timeout: Duration,
    pub dry_run: bool,
}

impl Cli {
    pub fn validate(&self) -> Result<JobOptions> {
        let endpoint = self.endpoint.trim();
        ensure!(!endpoint.is_empty(), "endpoint must be set");

        let org_repos = targets::split_list(&self.org_repos);
        ensure!(!org_repos.is_empty(), "orgRepos must be set");

        if self.concurrency == 0 {
            bail!("concurrency must be at least 1");
        }
        ensure!(
            self.request_timeout_secs > 0,
            "request timeout must be at least 1 second"
        );

        Ok(JobOptions {
            platform: Platform::parse(&self.platform)?,
            file_names: request::parse_file_names(&self.file_names)?,
            endpoint: endpoint.to_owned(),
            org_repos,
            concurrency: self.concurrency,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            dry_run: self.dry_run,
        })
    }
}
