//! CLI for the zdd Zenodo dataset downloader.

mod commands;
mod progress;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zdd_core::config;

use commands::{run_fetch, run_files};

/// Top-level CLI for the zdd downloader.
#[derive(Debug, Parser)]
#[command(name = "zdd")]
#[command(about = "zdd: resumable Zenodo dataset downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the files of a Zenodo record, resuming partial files and
    /// retrying until everything is complete.
    Fetch {
        /// Zenodo record ID or URL (e.g. https://zenodo.org/records/1234567).
        record: String,

        /// Only download files whose name contains this substring
        /// (case-insensitive).
        #[arg(long)]
        filter: Option<String>,

        /// Base directory for the dataset directory (default: current dir).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Disable the progress bar; byte counts go to the log instead.
        #[arg(long)]
        quiet: bool,
    },

    /// List the files of a Zenodo record without downloading anything.
    Files {
        /// Zenodo record ID or URL.
        record: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                record,
                filter,
                dir,
                quiet,
            } => run_fetch(&cfg, &record, filter.as_deref(), dir, quiet),
            CliCommand::Files { record } => run_files(&record),
        }
    }
}
