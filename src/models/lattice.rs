//! Lattice partition of the reference image.
//!
//! The reference image is cropped to the largest square that divides
//! evenly into `lattice_n × lattice_n` blocks of `lattice_const` pixels.
//! Positions are numbered row-major: position `k` sits at row
//! `k / lattice_n`, column `k % lattice_n`.

use std::path::Path;
use std::sync::Arc;

use image::{RgbImage, imageops};

use super::tile::{Tile, TileBlock};
use crate::error::{Error, Result};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Reference image split into a square grid of tiles.
#[derive(Debug, Clone)]
pub struct Lattice {
    reference: RgbImage,
    lattice_n: u32,
    lattice_const: u32,
    blocks: Vec<Arc<TileBlock>>,
}

impl Lattice {
    /// Splits `image` into `lattice_n × lattice_n` tiles.
    ///
    /// # Errors
    /// `InvalidConfig` if `lattice_n` is 0 or the image is smaller than
    /// one pixel per tile along its shorter side.
    pub fn from_image(image: &RgbImage, lattice_n: u32) -> Result<Self> {
        if lattice_n == 0 {
            return Err(Error::InvalidConfig(vec![ValidationError::new(
                ValidationErrorKind::TooFewTiles,
                "lattice_n must be positive",
            )]));
        }
        let lattice_const = image.width().min(image.height()) / lattice_n;
        if lattice_const == 0 {
            return Err(Error::InvalidConfig(vec![ValidationError::new(
                ValidationErrorKind::ImageTooSmall,
                format!(
                    "{}x{} image cannot be split into {lattice_n}x{lattice_n} tiles",
                    image.width(),
                    image.height()
                ),
            )]));
        }

        let side = lattice_const * lattice_n;
        let reference = imageops::crop_imm(image, 0, 0, side, side).to_image();

        let mut lattice = Self {
            reference,
            lattice_n,
            lattice_const,
            blocks: Vec::with_capacity((lattice_n * lattice_n) as usize),
        };
        for pos in 0..lattice.tile_count() {
            let (x, y) = lattice.origin(pos);
            let pixels = imageops::crop_imm(&lattice.reference, x, y, lattice_const, lattice_const)
                .to_image();
            lattice.blocks.push(Arc::new(TileBlock::new(pixels)));
        }
        Ok(lattice)
    }

    /// Loads an image from disk and splits it.
    pub fn open(path: impl AsRef<Path>, lattice_n: u32) -> Result<Self> {
        let image = image::open(path)?.to_rgb8();
        Self::from_image(&image, lattice_n)
    }

    /// Cropped reference image.
    pub fn reference(&self) -> &RgbImage {
        &self.reference
    }

    /// Tiles per side.
    pub fn lattice_n(&self) -> u32 {
        self.lattice_n
    }

    /// Tile side length in pixels.
    pub fn lattice_const(&self) -> u32 {
        self.lattice_const
    }

    /// Number of tiles (`lattice_n²`).
    pub fn tile_count(&self) -> usize {
        (self.lattice_n * self.lattice_n) as usize
    }

    /// Top-left pixel of lattice position `pos`.
    pub fn origin(&self, pos: usize) -> (u32, u32) {
        let n = self.lattice_n as usize;
        let col = (pos % n) as u32;
        let row = (pos / n) as u32;
        (col * self.lattice_const, row * self.lattice_const)
    }

    /// Block cut from grid cell (`row`, `col`).
    pub fn block(&self, row: u32, col: u32) -> Option<&Arc<TileBlock>> {
        if row >= self.lattice_n || col >= self.lattice_n {
            return None;
        }
        self.blocks.get((row * self.lattice_n + col) as usize)
    }

    /// Tiles in their original arrangement (identity permutation).
    pub fn tiles(&self) -> Vec<Tile> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(id, block)| Tile::new(id, Arc::clone(block)))
            .collect()
    }

    /// Places `tiles` onto a canvas, the i-th tile at lattice position i.
    ///
    /// Positions beyond `tiles.len()` stay black.
    pub fn assemble(&self, tiles: &[Tile]) -> RgbImage {
        let side = self.lattice_n * self.lattice_const;
        let mut canvas = RgbImage::new(side, side);
        for (pos, tile) in tiles.iter().take(self.tile_count()).enumerate() {
            let (x, y) = self.origin(pos);
            imageops::replace(&mut canvas, &tile.block.pixels, i64::from(x), i64::from(y));
        }
        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::quad_image;
    use image::Rgb;

    #[test]
    fn test_from_image_dimensions() {
        let lattice = Lattice::from_image(&quad_image(), 2).unwrap();
        assert_eq!(lattice.lattice_n(), 2);
        assert_eq!(lattice.lattice_const(), 4);
        assert_eq!(lattice.tile_count(), 4);
        assert_eq!(lattice.reference().dimensions(), (8, 8));
    }

    #[test]
    fn test_crops_non_square_image() {
        let img = RgbImage::from_pixel(13, 9, Rgb([5, 5, 5]));
        let lattice = Lattice::from_image(&img, 3).unwrap();
        assert_eq!(lattice.lattice_const(), 3);
        assert_eq!(lattice.reference().dimensions(), (9, 9));
    }

    #[test]
    fn test_row_major_positions() {
        let lattice = Lattice::from_image(&quad_image(), 2).unwrap();
        assert_eq!(lattice.origin(0), (0, 0));
        assert_eq!(lattice.origin(1), (4, 0));
        assert_eq!(lattice.origin(2), (0, 4));
        assert_eq!(lattice.origin(3), (4, 4));
        // Top-right block is the 60-grey one.
        let block = lattice.block(0, 1).unwrap();
        assert!((block.intensity - 180.0).abs() < 1e-9);
        assert!(lattice.block(2, 0).is_none());
    }

    #[test]
    fn test_identity_assembly_reproduces_reference() {
        let lattice = Lattice::from_image(&quad_image(), 2).unwrap();
        let canvas = lattice.assemble(&lattice.tiles());
        assert_eq!(&canvas, lattice.reference());
    }

    #[test]
    fn test_assembly_moves_blocks() {
        let lattice = Lattice::from_image(&quad_image(), 2).unwrap();
        let mut tiles = lattice.tiles();
        tiles.swap(0, 3);
        let canvas = lattice.assemble(&tiles);
        assert_eq!(canvas.get_pixel(0, 0), &Rgb([200, 200, 200]));
        assert_eq!(canvas.get_pixel(7, 7), &Rgb([10, 10, 10]));
        assert_eq!(canvas.get_pixel(5, 1), &Rgb([60, 60, 60]));
    }

    #[test]
    fn test_rejects_zero_lattice() {
        let err = Lattice::from_image(&quad_image(), 0).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_tiny_image() {
        let img = RgbImage::from_pixel(3, 3, Rgb([0, 0, 0]));
        match Lattice::from_image(&img, 4) {
            Err(Error::InvalidConfig(errs)) => {
                assert_eq!(errs[0].kind, ValidationErrorKind::ImageTooSmall)
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }
}
