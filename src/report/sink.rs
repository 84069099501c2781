//! Per-generation output sinks.
//!
//! The runner hands every generation's statistics and best candidate to
//! a [`GenerationSink`]. Sink failures are reported back to the runner,
//! which logs them and keeps going.

use std::path::{Path, PathBuf};

use image::RgbImage;

use super::history::FitnessHistory;
use super::snapshot::SnapshotWriter;
use super::stats::GenerationStats;
use crate::error::Result;
use crate::models::{Lattice, TileImage};

/// Receives one record per generation.
pub trait GenerationSink {
    /// Records a generation.
    fn record(
        &mut self,
        stats: &GenerationStats,
        best: &TileImage,
        lattice: &Lattice,
    ) -> Result<()>;

    /// Called once after the last generation.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Displays assembled images, e.g. in an interactive window.
pub trait Viewer {
    /// Shows `image`.
    fn show(&mut self, image: &RgbImage);
}

/// Keeps statistics in memory; writes nothing.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Recorded generations, in order.
    pub records: Vec<GenerationStats>,
}

impl GenerationSink for MemorySink {
    fn record(
        &mut self,
        stats: &GenerationStats,
        _best: &TileImage,
        _lattice: &Lattice,
    ) -> Result<()> {
        self.records.push(*stats);
        Ok(())
    }
}

/// History file + PNG snapshots + optional viewer.
pub struct FileReporter {
    history: FitnessHistory,
    snapshots: SnapshotWriter,
    viewer: Option<Box<dyn Viewer>>,
}

impl FileReporter {
    /// Opens the history file (truncating it) and the snapshot directory.
    pub fn create(output_dir: impl Into<PathBuf>, history_file: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            history: FitnessHistory::create(history_file)?,
            snapshots: SnapshotWriter::create(output_dir)?,
            viewer: None,
        })
    }

    /// Also shows every generation's best candidate.
    pub fn with_viewer(mut self, viewer: Box<dyn Viewer>) -> Self {
        self.viewer = Some(viewer);
        self
    }

    /// History writer.
    pub fn history(&self) -> &FitnessHistory {
        &self.history
    }

    /// Snapshot writer.
    pub fn snapshots(&self) -> &SnapshotWriter {
        &self.snapshots
    }
}

impl GenerationSink for FileReporter {
    fn record(
        &mut self,
        stats: &GenerationStats,
        best: &TileImage,
        lattice: &Lattice,
    ) -> Result<()> {
        // Attempt both writes; report the first failure.
        let history = self.history.record(stats).map_err(Into::into);
        let image = best.render(lattice);
        let snapshot = self.snapshots.write(stats.generation, &image).map(|_| ());
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.show(&image);
        }
        history.and(snapshot)
    }

    fn finish(&mut self) -> Result<()> {
        Ok(self.history.flush()?)
    }
}
