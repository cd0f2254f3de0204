//! One download attempt: ranged GET, streaming append, size verification.

use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::manifest::ManifestEntry;
use crate::progress::ProgressReporter;

use super::error::TransferError;
use super::state::{check_local, LocalStatus};

/// Mutable state shared between the curl header and body callbacks.
struct AttemptSink<'a> {
    path: PathBuf,
    name: &'a str,
    /// Byte offset we asked the server to resume from (0 = fresh request).
    resume_from: u64,
    /// Status code of the response currently being received.
    status: Cell<u32>,
    /// Content-Length of the response currently being received.
    content_length: Cell<Option<u64>>,
    /// Open once the first body chunk arrives and the status is known.
    file: RefCell<Option<File>>,
    /// Bytes written by this attempt.
    written: Cell<u64>,
    /// Write failure captured inside the body callback.
    io_error: RefCell<Option<std::io::Error>>,
    progress: RefCell<&'a mut dyn ProgressReporter>,
}

impl AttemptSink<'_> {
    /// Header callback: track the status line and Content-Length of the
    /// response being received. Redirect responses overwrite both.
    fn on_header(&self, data: &[u8]) {
        let Ok(line) = std::str::from_utf8(data) else {
            return;
        };
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("HTTP/") {
            if let Some(code) = rest.split_whitespace().nth(1).and_then(|s| s.parse().ok()) {
                self.status.set(code);
                self.content_length.set(None);
            }
        } else if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                self.content_length.set(value.trim().parse().ok());
            }
        }
    }

    /// Body callback: open the file lazily once the final status is known,
    /// then append each chunk and report progress.
    fn on_chunk(&self, data: &[u8]) -> std::io::Result<()> {
        let status = self.status.get();
        if status != 200 && status != 206 {
            // Error body; swallow it, the status check after perform() fails.
            return Ok(());
        }

        if self.file.borrow().is_none() {
            let (file, base) = self.open_for_status(status)?;
            let total = self.content_length.get().map(|len| base + len);
            self.file.borrow_mut().replace(file);
            self.written.set(base);
            self.progress.borrow_mut().begin(base, total);
        }

        let mut file = self.file.borrow_mut();
        if let Some(f) = file.as_mut() {
            f.write_all(data)?;
        }
        self.written.set(self.written.get() + data.len() as u64);
        self.progress.borrow_mut().update(data.len() as u64);
        Ok(())
    }

    /// Open the local file in the mode the response status dictates. Returns
    /// the file and the byte offset the body will land at.
    fn open_for_status(&self, status: u32) -> std::io::Result<(File, u64)> {
        if status == 206 {
            // Server honored the range; append past what we have.
            let file = File::options().append(true).create(true).open(&self.path)?;
            return Ok((file, self.resume_from));
        }
        if self.resume_from > 0 {
            tracing::warn!(
                file = %self.name,
                "server ignored range request, restarting from scratch"
            );
        }
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        Ok((file, 0))
    }
}

/// Execute one download attempt for `entry` into `dest_dir`.
///
/// Returns the final local size on success. Skips the network entirely when
/// the local file already matches a known expected size; discards a local
/// file that is larger than expected before requesting. Errors leave any
/// flushed bytes in place so the next attempt can resume past them.
pub fn run_attempt(
    entry: &ManifestEntry,
    dest_dir: &Path,
    chunk_size: usize,
    progress: &mut dyn ProgressReporter,
) -> Result<u64, TransferError> {
    let path = dest_dir.join(&entry.name);

    let resume_from = match check_local(&path, entry.expected_size)? {
        LocalStatus::Complete(size) => {
            tracing::debug!(file = %entry.name, size, "already complete, skipping");
            return Ok(size);
        }
        LocalStatus::Oversize(size) => {
            tracing::warn!(
                file = %entry.name,
                size,
                expected = entry.expected_size,
                "local file larger than expected, discarding"
            );
            std::fs::remove_file(&path)?;
            0
        }
        LocalStatus::Partial(size) => {
            tracing::info!(file = %entry.name, bytes = size, "resuming partial download");
            size
        }
        LocalStatus::Absent => 0,
    };

    let mut easy = curl::easy::Easy::new();
    easy.url(&entry.url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.buffer_size(chunk_size)?;
    easy.connect_timeout(Duration::from_secs(30))?;
    // Abort if throughput drops below 1 KiB/s for 60s rather than hanging.
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;
    // Safety net: a completely stuck transfer eventually fails.
    easy.timeout(Duration::from_secs(3600))?;
    if resume_from > 0 {
        easy.range(&format!("{}-", resume_from))?;
    }

    let sink = AttemptSink {
        path: path.clone(),
        name: &entry.name,
        resume_from,
        status: Cell::new(0),
        content_length: Cell::new(None),
        file: RefCell::new(None),
        written: Cell::new(0),
        io_error: RefCell::new(None),
        progress: RefCell::new(progress),
    };

    let perform_result = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            sink.on_header(data);
            true
        })?;
        transfer.write_function(|data| match sink.on_chunk(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                sink.io_error.borrow_mut().replace(e);
                // Short write aborts the transfer; perform() reports a write error.
                Ok(0)
            }
        })?;
        transfer.perform()
    };
    sink.progress.borrow_mut().close();

    // Close the file before stating it.
    sink.file.borrow_mut().take();

    if let Err(e) = perform_result {
        tracing::debug!(
            file = %entry.name,
            bytes = sink.written.get(),
            "attempt ended mid-stream, flushed bytes are kept"
        );
        if e.is_write_error() {
            if let Some(io_err) = sink.io_error.borrow_mut().take() {
                return Err(TransferError::Io(io_err));
            }
        }
        return Err(TransferError::Network(e));
    }

    let code = easy.response_code()? as u32;
    if code != 200 && code != 206 {
        return Err(TransferError::Http(code));
    }

    // A 200 with an empty body never triggers the body callback; make sure
    // the file exists anyway.
    if resume_from == 0 && !path.exists() {
        File::create(&path)?;
    }

    let final_size = std::fs::metadata(&path)?.len();
    if let Some(expected) = entry.expected_size {
        if final_size != expected {
            return Err(TransferError::SizeMismatch {
                expected,
                actual: final_size,
            });
        }
    }

    tracing::info!(file = %entry.name, bytes = final_size, "download complete");
    Ok(final_size)
}
