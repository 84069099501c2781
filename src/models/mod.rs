//! Tile puzzle domain models.
//!
//! Provides the data types the GA operates on: the reference
//! [`Lattice`], the shared [`Tile`] blocks cut from it, and the
//! [`TileImage`] candidate arrangements.
//!
//! # Domain Mappings
//!
//! | u-jigsaw | GA term | Image term |
//! |----------|---------|------------|
//! | TileImage | Chromosome | Candidate arrangement |
//! | Tile | Gene | Pixel block + original position |
//! | Lattice | Problem instance | Reference image grid |

mod lattice;
mod tile;
mod tile_image;

pub use lattice::Lattice;
pub use tile::{Tile, TileBlock, mean_intensity};
pub use tile_image::TileImage;
