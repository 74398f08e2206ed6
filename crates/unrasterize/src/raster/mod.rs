//! Raster inputs for the selection pipeline.
//!
//! This module groups the value [`Grid`], the pixel-to-geographic [`GeoTransform`], the
//! [`Block`] sub-rectangles used by windowed selection, and the [`RasterSource`] boundary
//! through which callers hand raster data to the unrasterizers.
pub mod block;
pub mod grid;
pub mod source;
pub mod transform;

pub use block::{partition, Block};
pub use grid::Grid;
pub use source::{InMemoryRaster, RasterSource};
pub use transform::GeoTransform;
