//! Permutation-preserving crossover operators.
//!
//! Both operators take two parents whose tile IDs are permutations of
//! `0..N` and return two children that are again permutations of `0..N`.
//!
//! # Reference
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains" (OX1)
//! - Oliver, Smith & Holland (1987), "A Study of Permutation Crossover
//!   Operators on the Traveling Salesman Problem" (CX)

use std::collections::HashSet;

use rand::Rng;

use super::distinct_pair;
use crate::models::{Tile, TileImage};

// ======================== Order-1 crossover ========================

/// Performs Order-1 crossover.
///
/// Picks two distinct cut points and builds `OX1(p1, p2)` and
/// `OX1(p2, p1)` over the same segment `[lo, hi]`. Parents shorter
/// than two tiles (or of unequal length) are returned as copies.
pub fn order1_crossover<R: Rng>(
    p1: &TileImage,
    p2: &TileImage,
    rng: &mut R,
) -> (TileImage, TileImage) {
    let n = p1.len();
    if n < 2 || p2.len() != n {
        return (
            TileImage::from_tiles(p1.tiles.clone()),
            TileImage::from_tiles(p2.tiles.clone()),
        );
    }

    let (a, b) = distinct_pair(n, rng);
    let (lo, hi) = (a.min(b), a.max(b));

    let child1 = order1_child(&p1.tiles, &p2.tiles, lo, hi);
    let child2 = order1_child(&p2.tiles, &p1.tiles, lo, hi);
    (TileImage::from_tiles(child1), TileImage::from_tiles(child2))
}

/// Builds one Order-1 child.
///
/// The child copies `keep[lo..=hi]` in place. Positions `[0, lo)` and
/// then `(hi, N)` are filled with the donor's tiles in donor order,
/// skipping every ID already present in the kept segment.
///
/// # Panics
/// If `lo > hi` or `hi >= keep.len()`.
pub fn order1_child(keep: &[Tile], donor: &[Tile], lo: usize, hi: usize) -> Vec<Tile> {
    let segment = &keep[lo..=hi];
    let kept: HashSet<usize> = segment.iter().map(|t| t.id).collect();
    let mut fill = donor.iter().filter(|t| !kept.contains(&t.id)).cloned();

    let mut child = Vec::with_capacity(keep.len());
    child.extend(fill.by_ref().take(lo));
    child.extend(segment.iter().cloned());
    child.extend(fill);
    child
}

// ======================== Cycle crossover ========================

/// Performs cycle crossover.
///
/// Child 1 is parent 2 with the cycle through position 0 taken from
/// parent 1; child 2 is the mirror image. Deterministic: no random
/// draws are needed.
pub fn cycle_crossover(p1: &TileImage, p2: &TileImage) -> (TileImage, TileImage) {
    let ids1 = p1.ids();
    let ids2 = p2.ids();

    let child1 = cycle_child(&p1.tiles, &p2.tiles, &cycle_positions(&ids1, &ids2));
    let child2 = cycle_child(&p2.tiles, &p1.tiles, &cycle_positions(&ids2, &ids1));
    (TileImage::from_tiles(child1), TileImage::from_tiles(child2))
}

/// Positions of the cycle through position 0.
///
/// Starting from `first[0]`, repeatedly looks up the current ID in
/// `second` and continues with the ID `first` holds at that position,
/// until the start ID comes around again. Returns the visited positions
/// in visiting order; the last one is always 0 for a valid pair.
///
/// Stops early (returning what was collected) if an ID is missing from
/// `second`, so a malformed pair cannot loop forever.
pub fn cycle_positions(first: &[usize], second: &[usize]) -> Vec<usize> {
    let n = first.len();
    if n == 0 || second.len() != n {
        return Vec::new();
    }

    // id -> position in `second`
    let mut position_in_second = vec![None; n];
    for (pos, &id) in second.iter().enumerate() {
        if let Some(slot) = position_in_second.get_mut(id) {
            *slot = Some(pos);
        }
    }

    let start_id = first[0];
    let mut current = start_id;
    let mut positions = Vec::new();
    for _ in 0..n {
        let Some(pos) = position_in_second.get(current).copied().flatten() else {
            break;
        };
        positions.push(pos);
        if first[pos] == start_id {
            break;
        }
        current = first[pos];
    }
    positions
}

fn cycle_child(from_cycle: &[Tile], rest: &[Tile], positions: &[usize]) -> Vec<Tile> {
    let mut child = rest.to_vec();
    for &pos in positions {
        child[pos] = from_cycle[pos].clone();
    }
    child
}
