//! Bounded retry with a fixed delay.
//!
//! Wraps a transfer attempt so the batch layer sees one outcome per file and
//! pass. Resume position is not carried between attempts in memory; each
//! attempt re-derives it from the file on disk, so bytes flushed by a failed
//! attempt are honored.

mod policy;
mod run;

pub use policy::{RetryDecision, RetryPolicy};
pub use run::run_with_retry;
