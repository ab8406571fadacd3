//! Terminal download progress
//!
//! The bar only exists between the first progress notification and the end
//! of the transfer, so status lines logged to stderr before and after the
//! download are never drawn over.

use std::sync::OnceLock;

use indicatif::{ProgressBar, ProgressStyle};

use crate::source::{DownloadObserver, DownloadProgress};

const TEMPLATE: &str =
    "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

/// Draws a byte-count progress bar on stderr
pub struct TerminalProgress {
    message: String,
    bar: OnceLock<ProgressBar>,
}

impl TerminalProgress {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            bar: OnceLock::new(),
        }
    }

    /// Remove the bar if it is still drawn
    pub fn finish(&self) {
        if let Some(bar) = self.bar.get() {
            bar.finish_and_clear();
        }
    }

    fn create_bar(&self) -> ProgressBar {
        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        let bar = ProgressBar::no_length().with_style(style);
        bar.set_message(self.message.clone());
        bar
    }
}

impl DownloadObserver for TerminalProgress {
    fn on_progress(&self, progress: DownloadProgress) {
        let bar = self.bar.get_or_init(|| self.create_bar());
        if bar.is_finished() {
            return;
        }

        if let Some(total) = progress.total
            && bar.length() != Some(total)
        {
            bar.set_length(total);
        }
        bar.set_position(progress.received);

        if progress.total.is_some_and(|total| progress.received >= total) {
            bar.finish_and_clear();
        }
    }
}
