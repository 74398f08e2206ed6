//! Blocks (windows) of a larger raster and the row-major partitioner.
use std::fmt;
use std::ops::Range;

use crate::error::{Error, Result};

/// A rectangular sub-region of a raster, in pixel units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// First row of the block in the full raster.
    pub row_off: usize,
    /// First column of the block in the full raster.
    pub col_off: usize,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl Block {
    pub fn new(row_off: usize, col_off: usize, rows: usize, cols: usize) -> Self {
        Self {
            row_off,
            col_off,
            rows,
            cols,
        }
    }

    /// A block covering a whole `rows x cols` raster.
    pub fn full(rows: usize, cols: usize) -> Self {
        Self::new(0, 0, rows, cols)
    }

    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    pub fn row_end(&self) -> usize {
        self.row_off + self.rows
    }

    pub fn col_end(&self) -> usize {
        self.col_off + self.cols
    }

    pub fn row_range(&self) -> Range<usize> {
        self.row_off..self.row_end()
    }

    pub fn col_range(&self) -> Range<usize> {
        self.col_off..self.col_end()
    }

    /// Returns `true` if the raster pixel `(row, col)` lies inside the block.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.row_range().contains(&row) && self.col_range().contains(&col)
    }

    /// Fails with [`Error::MalformedBlock`] if the block has zero area.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::MalformedBlock {
                row_off: self.row_off,
                col_off: self.col_off,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "block[rows {}..{}, cols {}..{}]",
            self.row_off,
            self.row_end(),
            self.col_off,
            self.col_end()
        )
    }
}

/// Split a `rows x cols` raster into blocks of at most `block_shape = (block_rows, block_cols)`.
///
/// Blocks are returned in row-major order; blocks on the bottom and right edges are clipped
/// to the raster extent. The blocks cover the raster with no gaps and no overlaps.
pub fn partition(rows: usize, cols: usize, block_shape: (usize, usize)) -> Result<Vec<Block>> {
    let (block_rows, block_cols) = block_shape;
    if block_rows == 0 || block_cols == 0 {
        return Err(Error::invalid_parameter(
            "block_shape",
            format!("must be > 0 in both dimensions, got {block_rows}x{block_cols}"),
        ));
    }

    let mut blocks = Vec::with_capacity(rows.div_ceil(block_rows) * cols.div_ceil(block_cols));
    for row_off in (0..rows).step_by(block_rows) {
        for col_off in (0..cols).step_by(block_cols) {
            blocks.push(Block::new(
                row_off,
                col_off,
                block_rows.min(rows - row_off),
                block_cols.min(cols - col_off),
            ));
        }
    }
    Ok(blocks)
}
