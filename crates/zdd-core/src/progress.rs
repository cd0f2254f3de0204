//! Progress reporting capability for transfers.
//!
//! The transfer task only talks to the `ProgressReporter` trait; it never
//! affects correctness. The CLI plugs in an indicatif bar; the built-in
//! implementations here are a throttled log reporter and a silent one.

use std::time::{Duration, Instant};

/// Observer for byte progress of one transfer. Implementations must tolerate
/// an unknown total (report only bytes transferred so far).
pub trait ProgressReporter {
    /// Called once when the body starts streaming. `initial` is the byte
    /// offset already on disk (non-zero when resuming), `total` the full
    /// expected size when known.
    fn begin(&mut self, initial: u64, total: Option<u64>);
    /// Called per received chunk with the number of new bytes.
    fn update(&mut self, delta: u64);
    /// Called when the transfer attempt ends (success or failure).
    fn close(&mut self);
}

/// Reporter that does nothing. Used by tests and non-interactive callers.
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn begin(&mut self, _initial: u64, _total: Option<u64>) {}
    fn update(&mut self, _delta: u64) {}
    fn close(&mut self) {}
}

/// Default reporter: logs byte counts via tracing, at most once per second.
#[derive(Debug)]
pub struct LogProgress {
    name: String,
    transferred: u64,
    total: Option<u64>,
    last_emit: Option<Instant>,
}

const EMIT_INTERVAL: Duration = Duration::from_secs(1);

impl LogProgress {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            transferred: 0,
            total: None,
            last_emit: None,
        }
    }

    fn emit(&self) {
        match self.total {
            Some(total) => {
                tracing::info!(file = %self.name, "{} / {} bytes", self.transferred, total)
            }
            None => tracing::info!(file = %self.name, "{} bytes", self.transferred),
        }
    }
}

impl ProgressReporter for LogProgress {
    fn begin(&mut self, initial: u64, total: Option<u64>) {
        self.transferred = initial;
        self.total = total;
    }

    fn update(&mut self, delta: u64) {
        self.transferred += delta;
        let due = match self.last_emit {
            None => true,
            Some(at) => at.elapsed() >= EMIT_INTERVAL,
        };
        if due {
            self.emit();
            self.last_emit = Some(Instant::now());
        }
    }

    fn close(&mut self) {
        self.emit();
    }
}

/// Factory the orchestrator uses to get a fresh reporter per file.
pub type MakeProgress<'a> = &'a dyn Fn(&str) -> Box<dyn ProgressReporter>;

/// Factory producing silent reporters.
pub fn no_progress(_name: &str) -> Box<dyn ProgressReporter> {
    Box::new(NoProgress)
}

/// Factory producing the throttled log reporter.
pub fn log_progress(name: &str) -> Box<dyn ProgressReporter> {
    Box::new(LogProgress::new(name))
}
