//! Resumable single-file HTTP transfer.
//!
//! One attempt = derive local state from disk, issue a GET (ranged when bytes
//! are already present), stream the body to the file, verify the final size.
//! Bytes flushed before a failure are kept so the next attempt resumes past
//! them.

mod attempt;
mod error;
mod state;

pub use attempt::run_attempt;
pub use error::TransferError;
pub use state::{check_local, LocalStatus};
