//! Progress reporting for long-running loops

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receives one `step` per processed item and a final `terminate`
pub trait Progress {
    fn step(&mut self);
    fn terminate(&mut self);
}

/// Discards all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn step(&mut self) {}
    fn terminate(&mut self) {}
}

/// Progress bar on stderr, redrawn every `granularity` steps
pub struct BarProgress {
    bar: ProgressBar,
    granularity: u64,
    pending: u64,
}

impl BarProgress {
    pub fn new(total: u64, label: &str, granularity: u64) -> Self {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_message(label.to_string());

        Self {
            bar,
            granularity: granularity.max(1),
            pending: 0,
        }
    }

    /// Same bookkeeping without drawing anything
    pub fn hidden(total: u64, label: &str, granularity: u64) -> Self {
        let progress = Self::new(total, label, granularity);
        progress.bar.set_draw_target(ProgressDrawTarget::hidden());
        progress
    }

    pub fn position(&self) -> u64 {
        self.bar.position() + self.pending
    }

    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

impl Progress for BarProgress {
    fn step(&mut self) {
        self.pending += 1;
        if self.pending >= self.granularity {
            self.bar.inc(self.pending);
            self.pending = 0;
        }
    }

    /// Flushes pending steps and stops the bar at the real count, which may
    /// be short of the total
    fn terminate(&mut self) {
        self.bar.inc(self.pending);
        self.pending = 0;
        self.bar.abandon();
    }
}

/// Counts steps, for tests and callers that only want totals
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingProgress {
    pub steps: u64,
    pub terminated: bool,
}

impl Progress for CountingProgress {
    fn step(&mut self) {
        self.steps += 1;
    }

    fn terminate(&mut self) {
        self.terminated = true;
    }
}
