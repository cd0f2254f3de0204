//! indicatif-backed progress reporter for interactive runs.

use indicatif::{ProgressBar, ProgressStyle};
use zdd_core::progress::ProgressReporter;

const BAR_TEMPLATE: &str =
    "{msg:20!} [{bar:30}] {bytes}/{total_bytes} ({bytes_per_sec}, ETA {eta})";
const SPINNER_TEMPLATE: &str = "{msg:20!} {bytes} ({bytes_per_sec})";

struct BarProgress {
    bar: ProgressBar,
}

impl ProgressReporter for BarProgress {
    fn begin(&mut self, initial: u64, total: Option<u64>) {
        let template = match total {
            Some(len) => {
                self.bar.set_length(len);
                BAR_TEMPLATE
            }
            None => SPINNER_TEMPLATE,
        };
        let style = ProgressStyle::with_template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        self.bar.set_style(style);
        self.bar.set_position(initial);
    }

    fn update(&mut self, delta: u64) {
        self.bar.inc(delta);
    }

    fn close(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Factory handed to the orchestrator: one bar per file.
pub fn bar_progress(name: &str) -> Box<dyn ProgressReporter> {
    let bar = ProgressBar::no_length();
    bar.set_message(name.to_string());
    Box::new(BarProgress { bar })
}
