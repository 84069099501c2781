//! Input validation for GA runs.
//!
//! Checks structural integrity of a configuration before any generation
//! runs, and of candidate permutations produced during a run. Detects:
//! - Odd or too-small generation sizes
//! - Parent pools that cannot yield two distinct parents
//! - Elite counts larger than the population
//! - Mutation rates outside `[0, 1]`
//! - Lattices with fewer than two tiles, or images too small to split
//! - Duplicate or missing tile IDs in a permutation
//!
//! All problems are collected; validation never stops at the first one.

use crate::ga::GaConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Children are produced in pairs, so the population must be even.
    OddGenerationSize,
    /// Population smaller than one breeding pair.
    GenerationTooSmall,
    /// `n_select + n_best` is below 2.
    TooFewParents,
    /// More elites requested than candidates exist.
    TooManyElites,
    /// Mutation probability outside `[0, 1]`.
    InvalidMutationRate,
    /// Lattice has fewer than two tiles; no two distinct cut points exist.
    TooFewTiles,
    /// Source image is smaller than one pixel per tile.
    ImageTooSmall,
    /// A tile ID occurs more than once.
    DuplicateId,
    /// A tile ID in `0..N` does not occur.
    MissingId,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a GA configuration.
///
/// Checks:
/// 1. `generation_size` is even
/// 2. `generation_size` is at least 2
/// 3. `n_select + n_best >= 2`
/// 4. `n_best <= generation_size`
/// 5. `mutation_rate` is within `[0, 1]`
/// 6. `lattice_n >= 2`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &GaConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.generation_size % 2 != 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::OddGenerationSize,
            format!(
                "generation_size must be even, got {}",
                config.generation_size
            ),
        ));
    }

    if config.generation_size < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::GenerationTooSmall,
            format!(
                "generation_size must be at least 2, got {}",
                config.generation_size
            ),
        ));
    }

    let pool = config.n_select + config.n_best;
    if pool < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooFewParents,
            format!("n_select + n_best must be at least 2, got {pool}"),
        ));
    }

    if config.n_best > config.generation_size {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooManyElites,
            format!(
                "n_best ({}) exceeds generation_size ({})",
                config.n_best, config.generation_size
            ),
        ));
    }

    if !(0.0..=1.0).contains(&config.mutation_rate) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidMutationRate,
            format!(
                "mutation_rate must be within [0, 1], got {}",
                config.mutation_rate
            ),
        ));
    }

    if config.lattice_n < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooFewTiles,
            format!("lattice_n must be at least 2, got {}", config.lattice_n),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates that `ids` is a permutation of `0..ids.len()`.
///
/// Reports every duplicated ID (including out-of-range ones) and every
/// ID in range that never occurs.
pub fn validate_permutation(ids: &[usize]) -> ValidationResult {
    let n = ids.len();
    let mut seen = vec![false; n];
    let mut errors = Vec::new();

    for &id in ids {
        if id >= n {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Tile ID {id} is out of range for {n} tiles"),
            ));
        } else if seen[id] {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate tile ID: {id}"),
            ));
        } else {
            seen[id] = true;
        }
    }

    for (id, present) in seen.iter().enumerate() {
        if !present {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingId,
                format!("Missing tile ID: {id}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
