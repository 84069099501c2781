//! GA run configuration.
//!
//! # Usage
//!
//! ```
//! use u_jigsaw::ga::{CrossoverType, GaConfig, MutationType};
//!
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_selection(6, 2)
//!     .with_operators(CrossoverType::Cycle, MutationType::Scramble)
//!     .with_seed(42);
//! assert!(config.validate().is_ok());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::operators::{CrossoverType, MutationType};
use crate::error::Result;
use crate::validation::{ValidationResult, validate_config};

/// Default per-child mutation probability.
pub const DEFAULT_MUTATION_RATE: f64 = 0.05;

/// Configuration of one GA run.
///
/// Missing fields take their default values when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Population size; must be even.
    pub generation_size: usize,
    /// Number of roulette-wheel parent draws per generation.
    pub n_select: usize,
    /// Number of elites added to the parent pool.
    pub n_best: usize,
    /// Probability that a child is mutated (default 0.05).
    pub mutation_rate: f64,
    /// Generations run by [`GaRunner`](super::GaRunner).
    pub max_generations: usize,
    /// Crossover strategy, fixed for the run.
    pub crossover: CrossoverType,
    /// Mutation strategy, fixed for the run.
    pub mutation: MutationType,
    /// Seed for deterministic runs. `None` = seeded from OS entropy.
    pub seed: Option<u64>,
    /// Tiles per side when the lattice is loaded from a file.
    pub lattice_n: u32,
    /// Directory receiving `best<generation>.png` snapshots.
    pub output_dir: PathBuf,
    /// Fitness history file (one `generation avg best` line per generation).
    pub history_file: PathBuf,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            generation_size: 100,
            n_select: 30,
            n_best: 10,
            mutation_rate: DEFAULT_MUTATION_RATE,
            max_generations: 100,
            crossover: CrossoverType::Order1,
            mutation: MutationType::SingleSwap,
            seed: None,
            lattice_n: 8,
            output_dir: PathBuf::from("output"),
            history_file: PathBuf::from("fitnessHistory.dat"),
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.generation_size = size;
        self
    }

    /// Sets the number of weighted draws and elites.
    pub fn with_selection(mut self, n_select: usize, n_best: usize) -> Self {
        self.n_select = n_select;
        self.n_best = n_best;
        self
    }

    /// Sets the per-child mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Sets crossover and mutation strategies.
    pub fn with_operators(mut self, crossover: CrossoverType, mutation: MutationType) -> Self {
        self.crossover = crossover;
        self.mutation = mutation;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets tiles per side.
    pub fn with_lattice_n(mut self, lattice_n: u32) -> Self {
        self.lattice_n = lattice_n;
        self
    }

    /// Sets snapshot directory and history file.
    pub fn with_output(
        mut self,
        output_dir: impl Into<PathBuf>,
        history_file: impl Into<PathBuf>,
    ) -> Self {
        self.output_dir = output_dir.into();
        self.history_file = history_file.into();
        self
    }

    /// Checks the configuration. See [`validate_config`].
    pub fn validate(&self) -> ValidationResult {
        validate_config(self)
    }

    /// Parses a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
