//! Candidate arrangement of tiles.
//!
//! A [`TileImage`] assigns every tile to exactly one lattice position:
//! `tiles[pos]` is the tile placed at position `pos`. The tile IDs always
//! form a permutation of `0..N`.

use image::RgbImage;
use rand::Rng;
use rand::seq::SliceRandom;

use super::lattice::Lattice;
use super::tile::Tile;
use crate::validation::validate_permutation;

/// One candidate solution of the GA.
///
/// Higher fitness = closer to the reference image (maximization
/// convention). `fitness` is `None` until the candidate is evaluated.
#[derive(Debug, Clone)]
pub struct TileImage {
    /// Tiles in lattice-position order.
    pub tiles: Vec<Tile>,
    /// Fitness value, once evaluated.
    pub fitness: Option<f64>,
}

impl TileImage {
    /// Wraps an arrangement; fitness starts unevaluated.
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self {
            tiles,
            fitness: None,
        }
    }

    /// Creates a uniformly random arrangement of the lattice's tiles.
    pub fn random<R: Rng>(lattice: &Lattice, rng: &mut R) -> Self {
        let mut tiles = lattice.tiles();
        tiles.shuffle(rng);
        Self::from_tiles(tiles)
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` if the arrangement holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile IDs in position order.
    pub fn ids(&self) -> Vec<usize> {
        self.tiles.iter().map(|t| t.id).collect()
    }

    /// Checks the permutation invariant: every ID in `0..N` exactly once.
    pub fn is_valid_permutation(&self) -> bool {
        validate_permutation(&self.ids()).is_ok()
    }

    /// Fitness, or 0 when not yet evaluated.
    pub fn fitness_or_zero(&self) -> f64 {
        self.fitness.unwrap_or(0.0)
    }

    /// Materializes the arrangement as a full image.
    pub fn render(&self, lattice: &Lattice) -> RgbImage {
        lattice.assemble(&self.tiles)
    }
}
