use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::AppError;

// @module: Translated text output

/// Line-per-page writer for the output text file.
///
/// The file is truncated on creation and every line is flushed as soon as it
/// is written, so an aborted run leaves the pages finished so far.
pub struct OutputWriter {
    path: PathBuf,
    file: File,
    lines_written: usize,
}

impl OutputWriter {
    /// Create (or truncate) the output file
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| AppError::File(format!("Failed to create output file {}: {}", path.display(), e)))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            lines_written: 0,
        })
    }

    /// Append one translated page followed by a newline
    pub fn write_page(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.file, "{}", text)?;
        self.file.flush()?;
        self.lines_written += 1;
        Ok(())
    }

    /// Number of pages written so far
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Path of the output file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
