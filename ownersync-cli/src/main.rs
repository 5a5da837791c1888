//! Ownersync — one-shot sync of repository metadata files to forge organizations.
//!
//! # Usage
//!
//! ```text
//! ownersync --endpoint <addr> --org-repos <org[/repo],...> \
//!     [--platform gitee] [--file-names OWNERS[,...]] [--concurrency 10] [--dry-run]
//! ```

mod job;
mod options;

use anyhow::{Context, Result};
use clap::Parser;

use options::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    ownersync_runner::init_tracing(cli.log_format);

    let options = cli.validate().context("parse option")?;
    job::run(options)
}
