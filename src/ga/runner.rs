//! Run driver: evaluate → select → report → advance, `max_generations`
//! times, then one last evaluation whose top candidate becomes the
//! result.

use std::path::Path;

use tracing::instrument;

use super::config::GaConfig;
use super::engine::GeneticAlgorithm;
use crate::error::Result;
use crate::models::{Lattice, TileImage};
use crate::report::{FileReporter, GenerationSink, GenerationStats};

/// Outcome of a complete run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Best candidate of the final, evaluated generation.
    pub best: Option<TileImage>,
    /// Fitness of `best` (0 if none).
    pub best_fitness: f64,
    /// Generations bred.
    pub generations: usize,
    /// Statistics of every bred generation, in order.
    pub history: Vec<GenerationStats>,
    /// Sink failures logged and skipped during the run.
    pub sink_errors: usize,
}

/// Runs the GA loop against a [`GenerationSink`].
///
/// # Usage
///
/// ```
/// use image::{Rgb, RgbImage};
/// use u_jigsaw::ga::{GaConfig, GaRunner};
/// use u_jigsaw::models::Lattice;
/// use u_jigsaw::report::MemorySink;
///
/// let image = RgbImage::from_fn(8, 8, |x, y| Rgb([(x * 30) as u8, (y * 30) as u8, 0]));
/// let lattice = Lattice::from_image(&image, 2)?;
/// let config = GaConfig::default()
///     .with_population_size(6)
///     .with_selection(4, 2)
///     .with_max_generations(3)
///     .with_seed(42);
///
/// let mut sink = MemorySink::default();
/// let result = GaRunner::run(lattice, &config, &mut sink)?;
/// assert_eq!(result.generations, 3);
/// assert_eq!(sink.records.len(), 3);
/// # Ok::<(), u_jigsaw::Error>(())
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Builds an engine from `lattice` and `config` and runs it.
    pub fn run<S: GenerationSink + ?Sized>(
        lattice: Lattice,
        config: &GaConfig,
        sink: &mut S,
    ) -> Result<GaResult> {
        let mut engine = GeneticAlgorithm::new(lattice, config.clone())?;
        engine.create_generation(config.generation_size)?;
        Self::run_engine(&mut engine, sink)
    }

    /// Loads the reference image from `image_path` and runs with a
    /// [`FileReporter`] writing to the configured output locations.
    pub fn run_file(config: &GaConfig, image_path: impl AsRef<Path>) -> Result<GaResult> {
        let lattice = Lattice::open(image_path, config.lattice_n)?;
        let mut reporter = FileReporter::create(&config.output_dir, &config.history_file)?;
        Self::run(lattice, config, &mut reporter)
    }

    /// Runs an initialized engine for `config.max_generations`.
    ///
    /// Sink failures are logged, counted and skipped.
    #[instrument(level = "info", skip(engine, sink), fields(
        max_generations = engine.config().max_generations,
        tiles = engine.lattice().tile_count(),
    ))]
    pub fn run_engine<S: GenerationSink + ?Sized>(
        engine: &mut GeneticAlgorithm,
        sink: &mut S,
    ) -> Result<GaResult> {
        let max_generations = engine.config().max_generations;
        let n_select = engine.config().n_select;
        let n_best = engine.config().n_best;

        let mut history = Vec::with_capacity(max_generations);
        let mut sink_errors = 0;

        for g in 0..max_generations {
            engine.fitness_pass()?;
            let parents = engine.select_parents(n_select, n_best, g)?;

            let stats = engine.stats(g);
            tracing::info!(
                generation = g,
                avg_fitness = stats.average_fitness,
                best_fitness = stats.best_fitness,
                "Generation evaluated"
            );
            if let Some(best) = engine.best() {
                if let Err(e) = sink.record(&stats, best, engine.lattice()) {
                    tracing::warn!(generation = g, error = %e, "Failed to record generation");
                    sink_errors += 1;
                }
            }
            history.push(stats);

            engine.advance_generation(&parents)?;
        }

        engine.fitness_pass()?;
        engine.track_best();
        if let Err(e) = sink.finish() {
            tracing::warn!(error = %e, "Failed to finish output");
            sink_errors += 1;
        }

        tracing::info!(
            best_fitness = engine.best_fitness(),
            sink_errors,
            "Run complete"
        );
        Ok(GaResult {
            best: engine.best().cloned(),
            best_fitness: engine.best_fitness(),
            generations: max_generations,
            history,
            sink_errors,
        })
    }
}
