//! Multi-pass batch orchestration.
//!
//! Sweeps the filtered manifest in order, one file at a time, retrying each
//! file within the pass and repeating whole passes until every eligible file
//! is present and verified. A persistently failing file delays convergence
//! but never blocks the other files.

mod run;

pub use run::run_batch;

/// Outcome of one pass over the eligible entries.
#[derive(Debug, Clone, Default)]
pub struct PassResult {
    /// Entries attempted this pass.
    pub attempted: usize,
    /// Names of entries that exhausted their retries this pass.
    pub failed: Vec<String>,
}

impl PassResult {
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failed.len()
    }
}

/// Terminal state of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every matching entry is present and verified.
    Completed,
    /// Nothing in the manifest matched the filter.
    NoMatches,
}

/// Per-run summary handed back to the caller.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    /// Number of passes issued (1 when everything succeeded first time).
    pub passes: u32,
    /// Entries that matched the filter (whether or not they needed a download).
    pub matched: usize,
}
