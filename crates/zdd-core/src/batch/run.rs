//! The pass loop: sweep eligible entries, retry failures pass after pass.

use anyhow::Result;
use std::path::Path;

use crate::config::ZddConfig;
use crate::manifest::ManifestEntry;
use crate::progress::MakeProgress;
use crate::retry::{run_with_retry, RetryPolicy};
use crate::transfer::{self, LocalStatus};

use super::{PassResult, RunOutcome, RunSummary};

/// True if the entry still needs a download: a file whose size already equals
/// a known expected size is done. Probe errors count as "needs transfer" so
/// the attempt surfaces them properly.
fn needs_transfer(entry: &ManifestEntry, dest_dir: &Path) -> bool {
    let path = dest_dir.join(&entry.name);
    !matches!(
        transfer::check_local(&path, entry.expected_size),
        Ok(LocalStatus::Complete(_))
    )
}

/// Run passes over `manifest` until a pass ends with zero failures.
///
/// Per pass, the eligible subset is recomputed: well-formed entries matching
/// the filter whose local size does not already equal a known expected size.
/// Each eligible entry goes through the retry controller; a pass with
/// failures is followed by a pass-level sleep and a fresh pass. There is no
/// upper bound on the pass count.
pub fn run_batch(
    manifest: &[ManifestEntry],
    filter: Option<&str>,
    dest_dir: &Path,
    cfg: &ZddConfig,
    make_progress: MakeProgress,
) -> Result<RunSummary> {
    let policy = RetryPolicy::from_config(cfg);

    let matched: Vec<&ManifestEntry> = manifest
        .iter()
        .filter(|e| {
            if !e.is_well_formed() {
                tracing::warn!("skipping malformed manifest entry: {:?}", e);
                return false;
            }
            e.matches_filter(filter)
        })
        .collect();

    if matched.is_empty() {
        tracing::info!(filter = ?filter, "no manifest entries match");
        return Ok(RunSummary {
            outcome: RunOutcome::NoMatches,
            passes: 1,
            matched: 0,
        });
    }

    let mut pass_no = 1u32;
    loop {
        let eligible: Vec<&ManifestEntry> = matched
            .iter()
            .copied()
            .filter(|e| needs_transfer(e, dest_dir))
            .collect();

        if eligible.is_empty() {
            // Everything that matches is already on disk and verified.
            tracing::info!(files = matched.len(), passes = pass_no, "all files complete");
            return Ok(RunSummary {
                outcome: RunOutcome::Completed,
                passes: pass_no,
                matched: matched.len(),
            });
        }

        tracing::info!(
            pass = pass_no,
            files = eligible.len(),
            "starting download pass"
        );

        let mut result = PassResult {
            attempted: eligible.len(),
            ..PassResult::default()
        };
        for entry in &eligible {
            let outcome = run_with_retry(&policy, &entry.name, || {
                let mut progress = make_progress(&entry.name);
                transfer::run_attempt(entry, dest_dir, cfg.chunk_size, progress.as_mut())
            });
            if let Err(e) = outcome {
                tracing::warn!(file = %entry.name, pass = pass_no, "failed this pass: {}", e);
                result.failed.push(entry.name.clone());
            }
        }

        tracing::info!(
            pass = pass_no,
            succeeded = result.succeeded(),
            failed = result.failed.len(),
            "pass finished"
        );

        if result.failed.is_empty() {
            return Ok(RunSummary {
                outcome: RunOutcome::Completed,
                passes: pass_no,
                matched: matched.len(),
            });
        }

        tracing::info!(
            delay_secs = cfg.pass_delay_secs,
            "pass had failures, sleeping before next pass"
        );
        std::thread::sleep(cfg.pass_delay());
        pass_no += 1;
    }
}
