//! Tile-permutation genetic algorithm.
//!
//! Splits a reference image into an `n × n` lattice of tiles and evolves
//! permutations of those tiles back toward the original arrangement.
//! Candidates are scored by the mean squared difference of block
//! intensities against the reference, recombined with Order-1 or cycle
//! crossover, and mutated by swap, inversion or scramble.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Lattice`, `Tile`, `TileBlock`, `TileImage`
//! - **`ga`**: Fitness, selection, operators, the generation controller
//!   (`GeneticAlgorithm`) and the run driver (`GaRunner`)
//! - **`report`**: Fitness history file, PNG snapshots, viewer hook
//! - **`validation`**: Configuration and permutation integrity checks
//!
//! # Quick start
//!
//! ```no_run
//! use u_jigsaw::ga::{GaConfig, GaRunner};
//!
//! let config = GaConfig::load("jigsaw.json")?;
//! let result = GaRunner::run_file(&config, "reference.png")?;
//! println!("best fitness: {}", result.best_fitness);
//! # Ok::<(), u_jigsaw::Error>(())
//! ```
//!
//! The crate logs through `tracing` and never installs a subscriber.
//!
//! # References
//!
//! - Holland (1975), "Adaptation in Natural and Artificial Systems"
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"

pub mod error;
pub mod ga;
pub mod models;
pub mod report;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
