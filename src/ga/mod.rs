//! Genetic algorithm over tile permutations.
//!
//! A candidate ([`TileImage`](crate::models::TileImage)) is a permutation
//! of the lattice's tile IDs. Each generation is evaluated, a parent pool
//! is drawn, and a new population of the same size is bred from it.
//!
//! # Encoding
//!
//! - **Position vector**: `tiles[pos]` is the tile placed at lattice
//!   position `pos` (row-major). IDs form a permutation of `0..N`.
//!
//! # Generation cycle
//!
//! ```text
//! create_generation → fitness_pass → select_parents → advance_generation
//!                          ↑                                  │
//!                          └──────────────────────────────────┘
//! ```
//!
//! # Submodules
//!
//! - [`operators`]: Runtime-selectable crossover and mutation strategies
//! - [`crossover`]: Order-1 and cycle crossover
//! - [`mutation`]: Swap, inversion and scramble mutation
//! - [`selection`]: Biased roulette-wheel selection with elitism
//!
//! # Reference
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"

mod config;
pub mod crossover;
mod engine;
mod fitness;
pub mod mutation;
pub mod operators;
mod runner;
pub mod selection;

use rand::Rng;

pub use config::{DEFAULT_MUTATION_RATE, GaConfig};
pub use engine::{EngineState, GeneticAlgorithm};
pub use fitness::{FitnessEvaluator, MSE_FLOOR, PERFECT_FITNESS, fitness_from_mse};
pub use operators::{CrossoverType, GeneticOperators, MutationType};
pub use runner::{GaResult, GaRunner};

/// Two distinct uniform indices in `0..len`, in draw order.
///
/// Callers must ensure `len >= 2`.
pub(crate) fn distinct_pair<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    let first = rng.random_range(0..len);
    let mut second = rng.random_range(0..len);
    while second == first {
        second = rng.random_range(0..len);
    }
    (first, second)
}
