//! Generation controller.
//!
//! [`GeneticAlgorithm`] owns the population and drives it through one
//! generation at a time:
//!
//! ```text
//! Empty → Initialized → Evaluated → Selected → Recombined → Replaced
//!                           ↑                                  │
//!                           └──────────── fitness_pass ────────┘
//! ```
//!
//! [`GeneticAlgorithm::advance_generation`] runs the `recombine` and
//! `replace_generation` steps back to back.
//!
//! Calls made out of order return [`Error::InvalidState`].

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::instrument;

use super::config::GaConfig;
use super::distinct_pair;
use super::fitness::FitnessEvaluator;
use super::operators::{CrossoverType, GeneticOperators, MutationType};
use super::selection;
use crate::error::{Error, Result};
use crate::models::{Lattice, TileImage};
use crate::report::GenerationStats;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Added to the seed of the selection RNG so it draws an independent
/// stream from the main RNG.
const SELECTION_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;

/// Lifecycle of the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No population yet.
    Empty,
    /// Random population created, not evaluated.
    Initialized,
    /// Every candidate carries a fitness.
    Evaluated,
    /// Parent pool drawn; best candidate of the generation recorded.
    Selected,
    /// Offspring bred, old population still current.
    Recombined,
    /// Children became the current population.
    Replaced,
}

impl EngineState {
    /// Lower-case state name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Initialized => "initialized",
            Self::Evaluated => "evaluated",
            Self::Selected => "selected",
            Self::Recombined => "recombined",
            Self::Replaced => "replaced",
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tile-permutation genetic algorithm.
///
/// # Usage
///
/// ```no_run
/// use u_jigsaw::ga::{GaConfig, GeneticAlgorithm};
/// use u_jigsaw::models::Lattice;
///
/// let lattice = Lattice::open("reference.png", 4)?;
/// let config = GaConfig::default().with_population_size(20).with_selection(6, 2);
/// let mut ga = GeneticAlgorithm::new(lattice, config)?;
/// ga.create_generation(20)?;
/// for g in 0..10 {
///     ga.fitness_pass()?;
///     let parents = ga.select_parents(6, 2, g)?;
///     ga.advance_generation(&parents)?;
/// }
/// # Ok::<(), u_jigsaw::Error>(())
/// ```
#[derive(Debug)]
pub struct GeneticAlgorithm {
    lattice: Lattice,
    evaluator: FitnessEvaluator,
    operators: GeneticOperators,
    config: GaConfig,
    generation: Vec<TileImage>,
    offspring: Vec<TileImage>,
    generation_size: usize,
    best: Option<TileImage>,
    state: EngineState,
    generations_bred: usize,
    rng: StdRng,
    selection_rng: StdRng,
}

impl GeneticAlgorithm {
    /// Creates an engine over `lattice`.
    ///
    /// Fails with [`Error::InvalidConfig`] if `config` does not validate or
    /// the lattice holds fewer than two tiles.
    pub fn new(lattice: Lattice, config: GaConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        if lattice.tile_count() < 2 {
            return Err(Error::InvalidConfig(vec![ValidationError::new(
                ValidationErrorKind::TooFewTiles,
                format!(
                    "lattice must hold at least 2 tiles, got {}",
                    lattice.tile_count()
                ),
            )]));
        }

        let (rng, selection_rng) = match config.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(SELECTION_SEED_OFFSET)),
            ),
            None => (StdRng::from_os_rng(), StdRng::from_os_rng()),
        };

        Ok(Self {
            evaluator: FitnessEvaluator::new(&lattice),
            operators: GeneticOperators::new(config.crossover, config.mutation),
            generation_size: config.generation_size,
            lattice,
            config,
            generation: Vec::new(),
            offspring: Vec::new(),
            best: None,
            state: EngineState::Empty,
            generations_bred: 0,
            rng,
            selection_rng,
        })
    }

    /// Fills the population with `size` random arrangements.
    ///
    /// `size` must be even and at least 2. Replaces any existing
    /// population and drops pending offspring.
    #[instrument(level = "debug", skip(self), fields(tiles = self.lattice.tile_count()))]
    pub fn create_generation(&mut self, size: usize) -> Result<()> {
        let mut errors = Vec::new();
        if size % 2 != 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::OddGenerationSize,
                format!("generation size must be even, got {size}"),
            ));
        }
        if size < 2 {
            errors.push(ValidationError::new(
                ValidationErrorKind::GenerationTooSmall,
                format!("generation size must be at least 2, got {size}"),
            ));
        }
        if !errors.is_empty() {
            return Err(Error::InvalidConfig(errors));
        }

        self.generation = (0..size)
            .map(|_| TileImage::random(&self.lattice, &mut self.rng))
            .collect();
        self.offspring.clear();
        self.generation_size = size;
        self.state = EngineState::Initialized;
        Ok(())
    }

    /// Binds the crossover and mutation strategies.
    ///
    /// Only allowed before the first offspring are bred.
    pub fn set_operators(
        &mut self,
        crossover: CrossoverType,
        mutation: MutationType,
    ) -> Result<()> {
        if self.generations_bred > 0 || self.state == EngineState::Recombined {
            return Err(Error::InvalidState {
                expected: "before first recombination",
                actual: self.state.name(),
            });
        }
        self.operators = GeneticOperators::new(crossover, mutation);
        self.config.crossover = crossover;
        self.config.mutation = mutation;
        Ok(())
    }

    /// Evaluates every candidate of the current population.
    #[instrument(level = "debug", skip(self), fields(size = self.generation.len()))]
    pub fn fitness_pass(&mut self) -> Result<()> {
        match self.state {
            EngineState::Initialized | EngineState::Evaluated | EngineState::Replaced => {}
            other => {
                return Err(Error::InvalidState {
                    expected: "initialized, evaluated or replaced",
                    actual: other.name(),
                });
            }
        }
        for candidate in &mut self.generation {
            self.evaluator.evaluate(candidate);
        }
        self.state = EngineState::Evaluated;
        Ok(())
    }

    /// Draws the parent pool: `n_select` roulette draws followed by the
    /// `n_best` elites. Records the generation's best candidate.
    ///
    /// Fails with [`Error::InvalidConfig`] if `n_best` exceeds the
    /// population size, since the pool would come back short.
    #[instrument(level = "debug", skip(self))]
    pub fn select_parents(
        &mut self,
        n_select: usize,
        n_best: usize,
        generation_index: usize,
    ) -> Result<Vec<TileImage>> {
        if !matches!(self.state, EngineState::Evaluated | EngineState::Selected) {
            return Err(Error::InvalidState {
                expected: "evaluated",
                actual: self.state.name(),
            });
        }
        if n_select + n_best < 2 {
            return Err(Error::InsufficientParents {
                provided: n_select + n_best,
            });
        }
        if n_best > self.generation.len() {
            return Err(Error::InvalidConfig(vec![ValidationError::new(
                ValidationErrorKind::TooManyElites,
                format!(
                    "n_best ({n_best}) exceeds generation size ({})",
                    self.generation.len()
                ),
            )]));
        }

        let parents = selection::select_parents(
            &self.generation,
            n_select,
            n_best,
            generation_index,
            &mut self.selection_rng,
        );
        self.track_best();
        tracing::debug!(
            parents = parents.len(),
            best_fitness = self.best_fitness(),
            "Parent pool drawn"
        );
        self.state = EngineState::Selected;
        Ok(parents)
    }

    /// Breeds a new population of the same size from `parents` and makes
    /// it current. Equivalent to [`recombine`](Self::recombine) followed by
    /// [`replace_generation`](Self::replace_generation).
    pub fn advance_generation(&mut self, parents: &[TileImage]) -> Result<()> {
        self.recombine(parents)?;
        self.replace_generation()
    }

    /// Breeds offspring from `parents` without touching the current
    /// population.
    ///
    /// Each step draws two distinct parent indices, crosses them over and
    /// mutates each child independently with probability `mutation_rate`.
    #[instrument(level = "debug", skip(self, parents), fields(parents = parents.len()))]
    pub fn recombine(&mut self, parents: &[TileImage]) -> Result<()> {
        if self.state != EngineState::Selected {
            return Err(Error::InvalidState {
                expected: "selected",
                actual: self.state.name(),
            });
        }
        if parents.len() < 2 {
            return Err(Error::InsufficientParents {
                provided: parents.len(),
            });
        }

        let mut next = Vec::with_capacity(self.generation_size);
        let mut mutated = 0usize;
        while next.len() < self.generation_size {
            let (a, b) = distinct_pair(parents.len(), &mut self.rng);
            let (c1, c2) = self
                .operators
                .crossover(&parents[a], &parents[b], &mut self.rng);
            for mut child in [c1, c2] {
                if self.rng.random_bool(self.config.mutation_rate) {
                    self.operators.mutate(&mut child, &mut self.rng);
                    mutated += 1;
                }
                if next.len() < self.generation_size {
                    next.push(child);
                }
            }
        }
        tracing::debug!(children = next.len(), mutated, "Offspring bred");

        self.offspring = next;
        self.state = EngineState::Recombined;
        Ok(())
    }

    /// Makes the bred offspring the current population.
    pub fn replace_generation(&mut self) -> Result<()> {
        if self.state != EngineState::Recombined {
            return Err(Error::InvalidState {
                expected: "recombined",
                actual: self.state.name(),
            });
        }
        self.generation = std::mem::take(&mut self.offspring);
        self.generations_bred += 1;
        self.state = EngineState::Replaced;
        Ok(())
    }

    /// Offspring bred by the last [`recombine`](Self::recombine), until
    /// they replace the population.
    pub fn offspring(&self) -> &[TileImage] {
        &self.offspring
    }

    /// Average and best fitness of the current population.
    pub fn stats(&self, generation_index: usize) -> GenerationStats {
        GenerationStats::from_population(generation_index, &self.generation)
    }

    /// Records the highest-fitness evaluated candidate of the current
    /// population as the best. An earlier, fitter best is not kept.
    pub(super) fn track_best(&mut self) {
        let top = self
            .generation
            .iter()
            .filter(|c| c.fitness.is_some())
            .max_by(|a, b| a.fitness_or_zero().total_cmp(&b.fitness_or_zero()));
        if let Some(top) = top {
            self.best = Some(top.clone());
        }
    }

    /// Current population.
    pub fn generation(&self) -> &[TileImage] {
        &self.generation
    }

    /// Best candidate of the most recently selected generation.
    pub fn best(&self) -> Option<&TileImage> {
        self.best.as_ref()
    }

    /// Fitness of [`best`](Self::best) (0 if none).
    pub fn best_fitness(&self) -> f64 {
        self.best.as_ref().map_or(0.0, TileImage::fitness_or_zero)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Generations bred so far.
    pub fn generations_bred(&self) -> usize {
        self.generations_bred
    }

    /// Reference lattice.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Run configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Bound operator pair.
    pub fn operators(&self) -> &GeneticOperators {
        &self.operators
    }

    /// Fitness evaluator for the reference lattice.
    pub fn evaluator(&self) -> &FitnessEvaluator {
        &self.evaluator
    }
}
