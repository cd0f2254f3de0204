//! Local file state, derived fresh from the filesystem before every attempt.

use std::io;
use std::path::Path;

/// What is on disk for one manifest entry, relative to its expected size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalStatus {
    /// No file (or an empty one); download from scratch.
    Absent,
    /// A partial file of this many bytes; resume from here.
    Partial(u64),
    /// File size equals the expected size; nothing to do.
    Complete(u64),
    /// File is larger than the expected size; it is invalid and must be
    /// discarded before downloading.
    Oversize(u64),
}

/// Probe the local file and classify it. Never opens the file, only stats it.
pub fn check_local(path: &Path, expected_size: Option<u64>) -> io::Result<LocalStatus> {
    let size = match std::fs::metadata(path) {
        Ok(md) => md.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LocalStatus::Absent),
        Err(e) => return Err(e),
    };

    match expected_size {
        Some(expected) if size == expected => Ok(LocalStatus::Complete(size)),
        Some(expected) if size > expected => Ok(LocalStatus::Oversize(size)),
        _ if size == 0 => Ok(LocalStatus::Absent),
        _ => Ok(LocalStatus::Partial(size)),
    }
}
