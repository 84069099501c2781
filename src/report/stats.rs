//! Per-generation fitness statistics.

use serde::{Deserialize, Serialize};

use crate::models::TileImage;

/// Fitness summary of one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation index (0-based).
    pub generation: usize,
    /// Mean fitness over the population (unevaluated = 0).
    pub average_fitness: f64,
    /// Fitness of the best candidate.
    pub best_fitness: f64,
}

impl GenerationStats {
    /// Summarizes an evaluated population.
    ///
    /// An empty population yields zeros.
    pub fn from_population(generation: usize, population: &[TileImage]) -> Self {
        if population.is_empty() {
            return Self {
                generation,
                average_fitness: 0.0,
                best_fitness: 0.0,
            };
        }
        let fitness = population.iter().map(TileImage::fitness_or_zero);
        let sum: f64 = fitness.clone().sum();
        let best = fitness.fold(f64::MIN, f64::max);
        Self {
            generation,
            average_fitness: sum / population.len() as f64,
            best_fitness: best,
        }
    }

    /// History-file line: `generation average best`.
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {}",
            self.generation, self.average_fitness, self.best_fitness
        )
    }
}
