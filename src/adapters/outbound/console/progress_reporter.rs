use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;
use std::io::IsTerminal;

const PROGRESS_TEMPLATE: &str =
    "   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}";

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with the tables on stdout.
/// Uses indicatif for the progress bar and colors warnings when stderr is a
/// terminal.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
    use_colors: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
            use_colors: std::io::stderr().is_terminal(),
        }
    }

    /// Returns the active bar, starting a new one when the batch size changes
    fn get_or_create_progress_bar(&self, total: usize) -> ProgressBar {
        let mut pb_option = self.progress_bar.borrow_mut();
        if let Some(pb) = pb_option.as_ref() {
            if !pb.is_finished() && pb.length() == Some(total as u64) {
                return pb.clone();
            }
            pb.finish_and_clear();
        }

        let style = ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        let pb = ProgressBar::new(total as u64).with_style(style);
        *pb_option = Some(pb.clone());
        pb
    }

    fn finish_progress_bar(&self) {
        if let Some(pb) = self.progress_bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!("{}", message);
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let pb = self.get_or_create_progress_bar(total);
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
        if current >= total {
            self.finish_progress_bar();
        }
    }

    fn report_error(&self, message: &str) {
        self.finish_progress_bar();
        if self.use_colors {
            eprintln!("{}", message.yellow());
        } else {
            eprintln!("{}", message);
        }
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!();
        if self.use_colors {
            eprintln!("{}", message.green().bold());
        } else {
            eprintln!("{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_creation() {
        let reporter = StderrProgressReporter::new();
        // Can't easily test stderr output, but verify it doesn't panic
        reporter.report("Test message");
        reporter.report_progress(5, 10, Some("cbomkit"));
        reporter.report_error("Test warning");
        reporter.report_completion("Test completion");
    }

    #[test]
    fn test_progress_bar_restarts_for_new_batch() {
        let reporter = StderrProgressReporter::default();
        reporter.report_progress(1, 3, Some("cbomkit"));
        let first = reporter.get_or_create_progress_bar(3);
        assert_eq!(first.length(), Some(3));

        reporter.report_progress(1, 5, Some("cdxgen"));
        let second = reporter.get_or_create_progress_bar(5);
        assert_eq!(second.length(), Some(5));
    }

    #[test]
    fn test_progress_bar_finishes_on_last_item() {
        let reporter = StderrProgressReporter::default();
        reporter.report_progress(2, 2, None);
        assert!(reporter.progress_bar.borrow().is_none());
    }
}
