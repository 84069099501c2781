//! Best-candidate snapshots (`<dir>/best<generation>.png`).

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::error::Result;

/// Writes one PNG per generation into a fixed directory.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    dir: PathBuf,
}

impl SnapshotWriter {
    /// Creates the output directory if it does not exist.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Snapshot path for `generation`.
    pub fn path_for(&self, generation: usize) -> PathBuf {
        self.dir.join(format!("best{generation}.png"))
    }

    /// Saves `image` as the snapshot of `generation`.
    pub fn write(&self, generation: usize, image: &RgbImage) -> Result<PathBuf> {
        let path = self.path_for(generation);
        image.save(&path)?;
        Ok(path)
    }
}
