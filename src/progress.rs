use std::fmt;
use std::io::Write;
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

// @module: Progress reporting for the page loop

/// Pages completed out of the pages selected for this run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based ordinal of the last finished page within the selection
    pub completed: usize,
    /// Number of selected pages
    pub total: usize,
}

impl Progress {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Completion percentage; an empty selection counts as done
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({:.1}%)", self.completed, self.total, self.percent())
    }
}

const PROGRESS_PREFIX: &str = "Translation progress: ";

/// Single overwritten status line on stderr.
///
/// On a terminal the line is drawn by indicatif. When stderr is redirected
/// indicatif draws nothing, so each update is written as a plain
/// `\r`-prefixed line instead.
pub struct ProgressReporter {
    target: ReportTarget,
}

enum ReportTarget {
    Bar(ProgressBar),
    Plain(Mutex<Box<dyn Write + Send>>),
}

impl ProgressReporter {
    /// Create a progress line for `total` pages
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        if bar.is_hidden() {
            return Self::plain(std::io::stderr());
        }

        let style = ProgressStyle::default_bar()
            .template("Translation progress: {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        Self { target: ReportTarget::Bar(bar) }
    }

    /// Report to a plain writer, one `\r`-prefixed update at a time
    pub fn plain<W: Write + Send + 'static>(writer: W) -> Self {
        Self { target: ReportTarget::Plain(Mutex::new(Box::new(writer))) }
    }

    /// Redraw the line for the given progress
    pub fn update(&self, progress: &Progress) {
        match &self.target {
            ReportTarget::Bar(bar) => {
                bar.set_position(progress.completed as u64);
                bar.set_message(progress.to_string());
            }
            ReportTarget::Plain(writer) => {
                if let Ok(mut writer) = writer.lock() {
                    let _ = write!(writer, "\r{}{}", PROGRESS_PREFIX, progress);
                    let _ = writer.flush();
                }
            }
        }
    }

    /// Leave the last state on screen and move to a new line
    pub fn finish(&self) {
        match &self.target {
            ReportTarget::Bar(bar) => bar.finish(),
            ReportTarget::Plain(writer) => {
                if let Ok(mut writer) = writer.lock() {
                    let _ = writeln!(writer);
                    let _ = writer.flush();
                }
            }
        }
    }

    /// Whether updates go to the plain writer instead of an indicatif bar
    pub fn is_plain(&self) -> bool {
        matches!(self.target, ReportTarget::Plain(_))
    }
}
