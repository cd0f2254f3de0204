//! `zdd fetch <record>` – download a record's files until all are complete.

use anyhow::{Context, Result};
use std::path::PathBuf;
use zdd_core::batch::{run_batch, RunOutcome};
use zdd_core::catalog;
use zdd_core::config::ZddConfig;
use zdd_core::progress::{log_progress, MakeProgress};

use crate::cli::progress::bar_progress;

pub fn run_fetch(
    cfg: &ZddConfig,
    record_ref: &str,
    filter: Option<&str>,
    dir: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let record_id = catalog::parse_record_ref(record_ref)
        .with_context(|| format!("cannot identify a Zenodo record ID in {record_ref:?}"))?;
    println!("Record ID: {record_id}");

    let record = catalog::fetch_record(&record_id)?;
    let manifest = record.manifest();
    println!("Found {} file(s).", manifest.len());

    let base = match dir {
        Some(d) => d,
        None => std::env::current_dir()?,
    };
    let dest_dir = base.join(catalog::output_dir_name(&record_id, record.title()));
    std::fs::create_dir_all(&dest_dir)
        .with_context(|| format!("create download directory {}", dest_dir.display()))?;
    println!("Downloading into {}", dest_dir.display());

    let make_progress: MakeProgress = if quiet { &log_progress } else { &bar_progress };
    let summary = run_batch(&manifest, filter, &dest_dir, cfg, make_progress)?;

    match summary.outcome {
        RunOutcome::NoMatches => println!("No matching files."),
        RunOutcome::Completed => println!(
            "All {} matching file(s) downloaded after {} pass(es).",
            summary.matched, summary.passes
        ),
    }
    Ok(())
}
