//! Grid model for pixgrid.
//!
//! A [`Grid`] is a rectangular field of symbolic [`Pixel`] tokens. It supports
//! setting single cells, drawing vertical segments, and rendering itself as
//! plain text rows.

#![deny(clippy::all)]

mod error;
mod grid;
mod pixel;
pub mod raster;

pub use error::GridError;
pub use grid::DEFAULT_PIXEL;
pub use grid::Grid;
pub use grid::MAX_PIXELS;
pub use pixel::Pixel;
pub use raster::RasterView;
pub use raster::render;
