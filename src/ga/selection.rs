//! Parent selection: roulette wheel on biased scores plus elitism.
//!
//! The parent pool of one generation holds `n_select + n_best`
//! candidates:
//!
//! 1. `n_select` roulette-wheel draws, each proportional to the
//!    candidate's biased score ([`biased_score`])
//! 2. the `n_best` highest raw-fitness candidates, in descending order
//!
//! The bias adds `generation_index * 0.002` to every score, so the
//! relative weight of fitness differences is largest early in the run
//! and flattens out as generations accumulate.

use rand::Rng;

use crate::models::TileImage;

/// Raw fitness is divided by this before biasing.
pub const FITNESS_SCALE: f64 = 100.0;

/// Score added per elapsed generation.
pub const GENERATION_PRESSURE: f64 = 0.002;

/// Biased sampling score: `raw / 100 + generation_index * 0.002`.
pub fn biased_score(raw_fitness: f64, generation_index: usize) -> f64 {
    raw_fitness / FITNESS_SCALE + generation_index as f64 * GENERATION_PRESSURE
}

/// Draws one index with probability proportional to its weight.
///
/// Picks `u` uniformly from `[0, total)` and returns the first index
/// whose cumulative weight is strictly greater than `u`. A non-positive
/// or non-finite total returns 0.
pub fn weighted_choice<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return 0;
    }

    let pick = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if cumulative > pick {
            return index;
        }
    }

    // Rounding can leave the final cumulative sum a hair below `pick`.
    weights.iter().rposition(|&w| w > 0.0).unwrap_or(0)
}

/// Indices of the `n_best` highest-fitness entries, best first.
///
/// Ties keep their original index order.
pub fn elite_indices(fitness: &[f64], n_best: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..fitness.len()).collect();
    indices.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
    indices.truncate(n_best);
    indices
}

/// Builds the parent pool for one generation.
///
/// Unevaluated candidates count as fitness 0. Returns an empty pool for
/// an empty population.
pub fn select_parents<R: Rng>(
    population: &[TileImage],
    n_select: usize,
    n_best: usize,
    generation_index: usize,
    rng: &mut R,
) -> Vec<TileImage> {
    if population.is_empty() {
        return Vec::new();
    }

    let raw: Vec<f64> = population.iter().map(TileImage::fitness_or_zero).collect();
    let biased: Vec<f64> = raw
        .iter()
        .map(|&f| biased_score(f, generation_index))
        .collect();

    let mut parents = Vec::with_capacity(n_select + n_best);
    for _ in 0..n_select {
        parents.push(population[weighted_choice(&biased, rng)].clone());
    }
    for index in elite_indices(&raw, n_best) {
        parents.push(population[index].clone());
    }
    parents
}
