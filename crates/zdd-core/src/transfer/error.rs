//! Transfer attempt error type for retry classification.

use thiserror::Error;

/// Error produced by one download attempt. All variants are transient from
/// the retry controller's point of view; none aborts the run.
#[derive(Debug, Error)]
pub enum TransferError {
    /// curl reported an error (timeout, connection reset, DNS, etc.).
    #[error("{0}")]
    Network(#[from] curl::Error),
    /// HTTP response had a status the transfer cannot use.
    #[error("HTTP {0}")]
    Http(u32),
    /// Final local size disagrees with the size the catalog reported.
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: u64, actual: u64 },
    /// Local read/write failure.
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}
