//! Multi-file progress display with a rolling window of per-file bars

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ITERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display for one or more source images
///
/// Each file gets an iteration bar showing the error of the region being split.
/// Only the most recent [`MAX_INDIVIDUAL_PROGRESS_BARS`] file bars stay on
/// screen; batches of more than one file also get an overall bar.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: VecDeque<ProgressBar>,
    file_count: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self::with_target(MultiProgress::new())
    }

    /// Create a progress manager that draws nothing
    pub fn hidden() -> Self {
        Self::with_target(MultiProgress::with_draw_target(
            indicatif::ProgressDrawTarget::hidden(),
        ))
    }

    fn with_target(multi_progress: MultiProgress) -> Self {
        Self {
            multi_progress,
            batch_bar: None,
            file_bars: VecDeque::new(),
            file_count: 0,
        }
    }

    /// Prepare the batch bar for `file_count` files
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        if file_count > 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Add an iteration bar for a new file
    pub fn start_file(&mut self, index: usize, path: &Path, iterations: usize) {
        let display_name = path.file_name().unwrap_or_default().to_string_lossy();

        let bar = self
            .multi_progress
            .add(ProgressBar::new(iterations as u64));
        bar.set_style(ITERATION_STYLE.clone());
        bar.set_prefix(format!("[{}/{}] {display_name}", index + 1, self.file_count));

        self.file_bars.push_back(bar);
        while self.file_bars.len() > MAX_INDIVIDUAL_PROGRESS_BARS {
            if let Some(old) = self.file_bars.pop_front() {
                self.multi_progress.remove(&old);
            }
        }
    }

    /// Report the iterations completed and the error of the last split region
    pub fn update_iteration(&self, iteration: usize, worst_error: f64) {
        if let Some(bar) = self.file_bars.back() {
            bar.set_position(iteration as u64);
            bar.set_message(format!("error {worst_error:.1}"));
        }
    }

    /// Mark the current file as done
    pub fn complete_file(&self, elapsed: Duration) {
        if let Some(bar) = self.file_bars.back() {
            bar.finish_with_message(format!("✓ {:.2}s", elapsed.as_secs_f64()));
        }
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }
}
