//! Tile model.
//!
//! A tile is one square pixel block cut from the reference image, tagged
//! with the lattice position it was cut from (its original ID).

use std::fmt;
use std::sync::Arc;

use image::{GenericImageView, Rgb, RgbImage};

/// Immutable pixel data of one tile, with its cached intensity.
///
/// Blocks are shared between candidates via `Arc`; a candidate only
/// reorders references to them.
#[derive(Clone, PartialEq)]
pub struct TileBlock {
    /// Block pixels (`lattice_const × lattice_const`).
    pub pixels: RgbImage,
    /// Sum of the per-channel mean intensities (R + G + B).
    pub intensity: f64,
}

impl TileBlock {
    /// Creates a block and computes its intensity.
    pub fn new(pixels: RgbImage) -> Self {
        let intensity = mean_intensity(&pixels);
        Self { pixels, intensity }
    }
}

impl fmt::Debug for TileBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileBlock")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("intensity", &self.intensity)
            .finish()
    }
}

/// One element of a candidate arrangement.
#[derive(Debug, Clone)]
pub struct Tile {
    /// Original lattice position of this tile (`0..N`).
    pub id: usize,
    /// Shared pixel block.
    pub block: Arc<TileBlock>,
}

impl Tile {
    /// Creates a tile.
    pub fn new(id: usize, block: Arc<TileBlock>) -> Self {
        Self { id, block }
    }
}

/// Sum of the per-channel mean pixel values of a view.
///
/// An empty view has intensity 0.
pub fn mean_intensity<I>(view: &I) -> f64
where
    I: GenericImageView<Pixel = Rgb<u8>>,
{
    let (w, h) = view.dimensions();
    let count = u64::from(w) * u64::from(h);
    if count == 0 {
        return 0.0;
    }
    let sum: u64 = view
        .pixels()
        .map(|(_, _, Rgb([r, g, b]))| u64::from(r) + u64::from(g) + u64::from(b))
        .sum();
    sum as f64 / count as f64
}
