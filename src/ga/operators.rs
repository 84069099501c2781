//! Configurable genetic operators for tile permutations.
//!
//! Provides runtime-selectable crossover and mutation strategies
//! via [`GeneticOperators`]. Strategies are bound once per run.
//!
//! # Usage
//!
//! ```
//! use u_jigsaw::ga::operators::{GeneticOperators, CrossoverType, MutationType};
//!
//! let ops = GeneticOperators::default();
//! assert_eq!(ops.crossover_type, CrossoverType::Order1);
//! assert_eq!(ops.mutation_type, MutationType::SingleSwap);
//!
//! let parsed: CrossoverType = "cycle".parse().unwrap();
//! assert_eq!(parsed, CrossoverType::Cycle);
//! assert_eq!(MutationType::from_flag(2).unwrap(), MutationType::Scramble);
//! ```

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::crossover::{cycle_crossover, order1_crossover};
use super::mutation::{inversion_mutation, scramble_mutation, swap_mutation};
use crate::error::{Error, Result};
use crate::models::TileImage;

/// Crossover strategy for tile permutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverType {
    /// Cycle crossover (Oliver et al., 1987).
    Cycle,
    /// Order-1 crossover (Davis, 1985).
    Order1,
}

/// Mutation strategy for tile permutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationType {
    /// Swap two random positions.
    SingleSwap,
    /// Reverse a random segment.
    Inversion,
    /// Shuffle a random segment.
    Scramble,
}

impl CrossoverType {
    /// Maps the numeric flag (`0` = Cycle, `1` = Order-1).
    pub fn from_flag(flag: i32) -> Result<Self> {
        match flag {
            0 => Ok(Self::Cycle),
            1 => Ok(Self::Order1),
            other => Err(Error::UnknownOperator {
                kind: "crossover",
                value: other.to_string(),
            }),
        }
    }
}

impl MutationType {
    /// Maps the numeric flag (`0` = SingleSwap, `1` = Inversion, `2` = Scramble).
    pub fn from_flag(flag: i32) -> Result<Self> {
        match flag {
            0 => Ok(Self::SingleSwap),
            1 => Ok(Self::Inversion),
            2 => Ok(Self::Scramble),
            other => Err(Error::UnknownOperator {
                kind: "mutation",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for CrossoverType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cycle" | "cx" | "0" => Ok(Self::Cycle),
            "order1" | "order-1" | "order_1" | "ox1" | "1" => Ok(Self::Order1),
            _ => Err(Error::UnknownOperator {
                kind: "crossover",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for MutationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single_swap" | "single-swap" | "swap" | "0" => Ok(Self::SingleSwap),
            "inversion" | "invert" | "1" => Ok(Self::Inversion),
            "scramble" | "2" => Ok(Self::Scramble),
            _ => Err(Error::UnknownOperator {
                kind: "mutation",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CrossoverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cycle => "cycle",
            Self::Order1 => "order1",
        })
    }
}

impl fmt::Display for MutationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SingleSwap => "single_swap",
            Self::Inversion => "inversion",
            Self::Scramble => "scramble",
        })
    }
}

/// Runtime-selectable genetic operators for the tile GA.
///
/// # Example
///
/// ```
/// use u_jigsaw::ga::operators::{GeneticOperators, CrossoverType, MutationType};
///
/// let ops = GeneticOperators {
///     crossover_type: CrossoverType::Cycle,
///     mutation_type: MutationType::Inversion,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneticOperators {
    /// Crossover strategy.
    pub crossover_type: CrossoverType,
    /// Mutation strategy.
    pub mutation_type: MutationType,
}

impl Default for GeneticOperators {
    fn default() -> Self {
        Self {
            crossover_type: CrossoverType::Order1,
            mutation_type: MutationType::SingleSwap,
        }
    }
}

impl GeneticOperators {
    /// Creates an operator pair.
    pub fn new(crossover_type: CrossoverType, mutation_type: MutationType) -> Self {
        Self {
            crossover_type,
            mutation_type,
        }
    }

    /// Produces two children using the configured strategy.
    pub fn crossover<R: Rng>(
        &self,
        p1: &TileImage,
        p2: &TileImage,
        rng: &mut R,
    ) -> (TileImage, TileImage) {
        match self.crossover_type {
            CrossoverType::Order1 => order1_crossover(p1, p2, rng),
            CrossoverType::Cycle => cycle_crossover(p1, p2),
        }
    }

    /// Mutates a child in place using the configured strategy.
    pub fn mutate<R: Rng>(&self, child: &mut TileImage, rng: &mut R) {
        match self.mutation_type {
            MutationType::SingleSwap => swap_mutation(child, rng),
            MutationType::Inversion => inversion_mutation(child, rng),
            MutationType::Scramble => scramble_mutation(child, rng),
        }
    }
}
