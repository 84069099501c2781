//! Fitness history file.
//!
//! One line per generation, `generation average best`, whitespace
//! separated. The file is truncated when the history is created and
//! flushed after every line, so a run that dies mid-way still leaves a
//! readable prefix.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::stats::GenerationStats;

/// Run-lifetime writer for the fitness history.
#[derive(Debug)]
pub struct FitnessHistory {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FitnessHistory {
    /// Creates (or truncates) the history file, creating parent
    /// directories as needed.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Appends one generation line.
    pub fn record(&mut self, stats: &GenerationStats) -> io::Result<()> {
        writeln!(self.writer, "{}", stats.to_line())?;
        self.writer.flush()
    }

    /// Path of the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes buffered output.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
