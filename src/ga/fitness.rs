//! Fitness evaluation against the reference image.
//!
//! For every lattice cell, the intensity (sum of per-channel means) of
//! the candidate's block at that cell is compared with the reference
//! block's intensity there. The squared differences are averaged over
//! the `lattice_n²` cells and fitness is the reciprocal of that mean.
//!
//! A perfect arrangement has zero error; its fitness is clamped to
//! [`PERFECT_FITNESS`] instead of dividing by zero.

use image::{RgbImage, imageops};

use crate::models::{Lattice, TileImage, mean_intensity};

/// Errors at or below this value count as a perfect match.
pub const MSE_FLOOR: f64 = 1e-9;

/// Fitness assigned to a perfect match (`1 / MSE_FLOOR`).
pub const PERFECT_FITNESS: f64 = 1e9;

/// Converts a mean squared error into a fitness score.
///
/// Strictly positive and finite for every non-negative `mse`.
pub fn fitness_from_mse(mse: f64) -> f64 {
    if mse <= MSE_FLOOR {
        PERFECT_FITNESS
    } else {
        1.0 / mse
    }
}

/// Scores candidate arrangements against a reference lattice.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    /// Reference intensity per lattice position.
    reference: Vec<f64>,
    lattice_n: u32,
    lattice_const: u32,
}

impl FitnessEvaluator {
    /// Caches the reference intensities of `lattice`.
    pub fn new(lattice: &Lattice) -> Self {
        Self {
            reference: lattice.tiles().iter().map(|t| t.block.intensity).collect(),
            lattice_n: lattice.lattice_n(),
            lattice_const: lattice.lattice_const(),
        }
    }

    /// Mean squared intensity error of an arrangement.
    ///
    /// Uses the cached block intensities, which equal the intensities
    /// of the rendered canvas cell by cell.
    pub fn mse(&self, candidate: &TileImage) -> f64 {
        if self.reference.is_empty() {
            return 0.0;
        }
        let sum: f64 = candidate
            .tiles
            .iter()
            .zip(&self.reference)
            .map(|(tile, reference)| {
                let diff = tile.block.intensity - reference;
                diff * diff
            })
            .sum();
        sum / self.reference.len() as f64
    }

    /// Mean squared intensity error of a fully rendered image.
    ///
    /// `image` must cover the lattice (`lattice_n * lattice_const` square).
    pub fn mse_of_image(&self, image: &RgbImage) -> f64 {
        if self.reference.is_empty() {
            return 0.0;
        }
        let n = self.lattice_n as usize;
        let c = self.lattice_const;
        let sum: f64 = self
            .reference
            .iter()
            .enumerate()
            .map(|(pos, reference)| {
                let x = (pos % n) as u32 * c;
                let y = (pos / n) as u32 * c;
                let cell = imageops::crop_imm(image, x, y, c, c);
                let diff = mean_intensity(&*cell) - reference;
                diff * diff
            })
            .sum();
        sum / self.reference.len() as f64
    }

    /// Fitness of an arrangement (higher = better).
    pub fn fitness(&self, candidate: &TileImage) -> f64 {
        fitness_from_mse(self.mse(candidate))
    }

    /// Computes and stores the candidate's fitness.
    pub fn evaluate(&self, candidate: &mut TileImage) -> f64 {
        let fitness = self.fitness(candidate);
        candidate.fitness = Some(fitness);
        fitness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{gradient_lattice, quad_image};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_perfect_match_gets_sentinel() {
        let lattice = Lattice::from_image(&quad_image(), 2).unwrap();
        let evaluator = FitnessEvaluator::new(&lattice);
        let mut candidate = TileImage::from_tiles(lattice.tiles());

        assert_eq!(evaluator.mse(&candidate), 0.0);
        let fitness = evaluator.evaluate(&mut candidate);
        assert_eq!(fitness, PERFECT_FITNESS);
        assert!(fitness.is_finite());
        assert_eq!(candidate.fitness, Some(PERFECT_FITNESS));
    }

    #[test]
    fn test_known_mse() {
        let lattice = Lattice::from_image(&quad_image(), 2).unwrap();
        let evaluator = FitnessEvaluator::new(&lattice);
        let mut tiles = lattice.tiles();
        // Intensities: 30, 180, 360, 600. Swapping the first two gives
        // two cells off by 150.
        tiles.swap(0, 1);
        let candidate = TileImage::from_tiles(tiles);
        let expected_mse = 2.0 * 150.0 * 150.0 / 4.0;
        assert!((evaluator.mse(&candidate) - expected_mse).abs() < 1e-9);
        assert!((evaluator.fitness(&candidate) - 1.0 / expected_mse).abs() < 1e-15);
    }

    #[test]
    fn test_rendered_mse_matches_cached_mse() {
        let lattice = gradient_lattice(4);
        let evaluator = FitnessEvaluator::new(&lattice);
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..10 {
            let candidate = TileImage::random(&lattice, &mut rng);
            let rendered = candidate.render(&lattice);
            let cached = evaluator.mse(&candidate);
            let from_pixels = evaluator.mse_of_image(&rendered);
            assert!((cached - from_pixels).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fitness_is_positive_and_orders_candidates() {
        let lattice = gradient_lattice(3);
        let evaluator = FitnessEvaluator::new(&lattice);
        let identity = TileImage::from_tiles(lattice.tiles());

        let mut near = lattice.tiles();
        near.swap(0, 1);
        let mut far = lattice.tiles();
        far.reverse();

        let f_identity = evaluator.fitness(&identity);
        let f_near = evaluator.fitness(&TileImage::from_tiles(near));
        let f_far = evaluator.fitness(&TileImage::from_tiles(far));
        assert!(f_far > 0.0);
        assert!(f_identity > f_near);
        assert!(f_near > f_far);
    }

    #[test]
    fn test_fitness_from_mse_clamps() {
        assert_eq!(fitness_from_mse(0.0), PERFECT_FITNESS);
        assert_eq!(fitness_from_mse(MSE_FLOOR), PERFECT_FITNESS);
        assert_eq!(fitness_from_mse(4.0), 0.25);
        assert!(fitness_from_mse(2.0 * MSE_FLOOR) < PERFECT_FITNESS);
    }
}
