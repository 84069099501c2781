//! Shared fixtures for unit tests.

use image::{Rgb, RgbImage};

use crate::models::Lattice;

/// 8×8 image whose 2×2 lattice has four distinct flat grey tiles.
pub(crate) fn quad_image() -> RgbImage {
    RgbImage::from_fn(8, 8, |x, y| match (x / 4, y / 4) {
        (0, 0) => Rgb([10, 10, 10]),
        (1, 0) => Rgb([60, 60, 60]),
        (0, 1) => Rgb([120, 120, 120]),
        _ => Rgb([200, 200, 200]),
    })
}

/// `n × n` lattice of 2-pixel tiles, each tile a distinct flat grey level.
pub(crate) fn gradient_lattice(n: u32) -> Lattice {
    let cells = n * n;
    let img = RgbImage::from_fn(n * 2, n * 2, |x, y| {
        let pos = (y / 2) * n + x / 2;
        let level = (pos * 250 / cells.max(1)) as u8;
        Rgb([level, level, level])
    });
    Lattice::from_image(&img, n).expect("fixture lattice")
}
