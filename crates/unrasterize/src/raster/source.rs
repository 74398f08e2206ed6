//! Raster source boundary.
//!
//! Readers for on-disk formats live outside this crate; they expose their data to the
//! unrasterizers by implementing [`RasterSource`]. [`InMemoryRaster`] covers the case where
//! the full grid is already loaded.
use crate::error::{Error, Result};
use crate::raster::{Block, GeoTransform, Grid};

/// Trait for raster band providers.
pub trait RasterSource: Send + Sync {
    /// Full raster shape as `(rows, cols)`.
    fn shape(&self) -> (usize, usize);

    /// Transform for pixel `(0, 0)` of the full raster.
    fn geotransform(&self) -> GeoTransform;

    /// No-data sentinel of the band, if any.
    fn nodata(&self) -> Option<f32> {
        None
    }

    /// Natural block decomposition of the source (e.g. the file's internal tiling),
    /// as `(block_rows, block_cols)`.
    fn block_shape(&self) -> Option<(usize, usize)> {
        None
    }

    /// Read the pixels covered by `block`. The returned grid must have the block's shape.
    fn read_block(&self, block: &Block) -> Result<Grid>;
}

/// Read `block` from `source` and attach the source's no-data sentinel to the result.
///
/// The source sentinel wins over one carried by the returned grid; a grid sentinel is only
/// kept when the source declares none. Fails if the grid does not have the block's shape.
pub(crate) fn read_block_with_nodata(source: &dyn RasterSource, block: &Block) -> Result<Grid> {
    let grid = source.read_block(block)?;
    if grid.shape() != (block.rows, block.cols) {
        return Err(Error::Other(format!(
            "source returned a {}x{} grid for {}",
            grid.rows(),
            grid.cols(),
            block
        )));
    }
    let nodata = source.nodata().or(grid.nodata());
    Ok(grid.with_nodata(nodata))
}

/// A raster held fully in memory.
#[derive(Clone, Debug)]
pub struct InMemoryRaster {
    grid: Grid,
    transform: GeoTransform,
    block_shape: Option<(usize, usize)>,
}

impl InMemoryRaster {
    pub fn new(grid: Grid, transform: GeoTransform) -> Self {
        Self {
            grid,
            transform,
            block_shape: None,
        }
    }

    /// Sets the block shape reported as the source's natural tiling.
    pub fn with_block_shape(mut self, block_shape: (usize, usize)) -> Self {
        self.block_shape = Some(block_shape);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

impl RasterSource for InMemoryRaster {
    fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }

    fn geotransform(&self) -> GeoTransform {
        self.transform
    }

    fn nodata(&self) -> Option<f32> {
        self.grid.nodata()
    }

    fn block_shape(&self) -> Option<(usize, usize)> {
        self.block_shape
    }

    fn read_block(&self, block: &Block) -> Result<Grid> {
        if *block == Block::full(self.grid.rows(), self.grid.cols()) {
            return Ok(self.grid.clone());
        }
        self.grid.window(block)
    }
}
