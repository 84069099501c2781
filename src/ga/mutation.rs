//! Permutation-preserving mutation operators.
//!
//! Each operator picks two distinct random positions `lo < hi` and
//! rearranges tiles without adding or removing any, so the permutation
//! invariant holds by construction.
//!
//! | Operator | Positions touched |
//! |----------|-------------------|
//! | Single swap | exactly `lo` and `hi` |
//! | Inversion | half-open `[lo, hi)` |
//! | Scramble | open `(lo, hi)` |
//!
//! Mutated candidates lose their fitness; it must be re-evaluated.

use rand::Rng;
use rand::seq::SliceRandom;

use super::distinct_pair;
use crate::models::{Tile, TileImage};

/// Swap mutation: exchanges the tiles at two distinct random positions.
pub fn swap_mutation<R: Rng>(child: &mut TileImage, rng: &mut R) {
    let len = child.len();
    if len < 2 {
        return;
    }
    let (i, j) = distinct_pair(len, rng);
    child.tiles.swap(i, j);
    child.fitness = None;
}

/// Inversion mutation: reverses `[lo, hi)` for a random `lo < hi`.
pub fn inversion_mutation<R: Rng>(child: &mut TileImage, rng: &mut R) {
    let len = child.len();
    if len < 2 {
        return;
    }
    let (lo, hi) = ordered_pair(len, rng);
    invert_range(&mut child.tiles, lo, hi);
    child.fitness = None;
}

/// Scramble mutation: shuffles the tiles strictly between `lo` and `hi`.
pub fn scramble_mutation<R: Rng>(child: &mut TileImage, rng: &mut R) {
    let len = child.len();
    if len < 2 {
        return;
    }
    let (lo, hi) = ordered_pair(len, rng);
    scramble_range(&mut child.tiles, lo, hi, rng);
    child.fitness = None;
}

/// Reverses `tiles[lo..hi]`. Empty when `lo >= hi`.
pub fn invert_range(tiles: &mut [Tile], lo: usize, hi: usize) {
    if lo < hi {
        tiles[lo..hi].reverse();
    }
}

/// Shuffles `tiles[lo + 1..hi]`. Empty when `hi <= lo + 1`.
pub fn scramble_range<R: Rng>(tiles: &mut [Tile], lo: usize, hi: usize, rng: &mut R) {
    if hi > lo + 1 {
        tiles[lo + 1..hi].shuffle(rng);
    }
}

fn ordered_pair<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    let (a, b) = distinct_pair(len, rng);
    (a.min(b), a.max(b))
}
