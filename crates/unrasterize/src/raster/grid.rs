//! Dense value grid with an optional no-data sentinel.
use crate::error::{Error, Result};
use crate::raster::Block;

/// A row-major 2D grid of `f32` values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
    nodata: Option<f32>,
}

impl Grid {
    /// Create a grid from row-major data. Fails if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            Error::invalid_parameter("shape", format!("{rows}x{cols} overflows usize"))
        })?;
        if data.len() != expected {
            return Err(Error::invalid_parameter(
                "data",
                format!(
                    "expected {expected} values for a {rows}x{cols} grid, got {}",
                    data.len()
                ),
            ));
        }
        Ok(Self {
            rows,
            cols,
            data,
            nodata: None,
        })
    }

    /// Create a grid with every cell set to `0.0`.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
            nodata: None,
        }
    }

    /// Create a grid by evaluating `f(row, col)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self {
            rows,
            cols,
            data,
            nodata: None,
        }
    }

    /// Sets the no-data sentinel.
    pub fn with_nodata(mut self, nodata: Option<f32>) -> Self {
        self.nodata = nodata;
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Grid shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn nodata(&self) -> Option<f32> {
        self.nodata
    }

    /// Returns `true` if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw row-major values.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Get the value at `(row, col)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.data[row * self.cols + col])
    }

    /// Set the value at `(row, col)`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        if row < self.rows && col < self.cols {
            self.data[row * self.cols + col] = value;
        }
    }

    /// Returns `true` if `value` is the no-data sentinel. A NaN sentinel matches NaN values.
    #[inline]
    pub fn is_nodata(&self, value: f32) -> bool {
        match self.nodata {
            Some(sentinel) if sentinel.is_nan() => value.is_nan(),
            Some(sentinel) => value == sentinel,
            None => false,
        }
    }

    /// Returns `true` if `value` holds a measurement: not NaN and not the sentinel.
    #[inline]
    pub fn is_valid(&self, value: f32) -> bool {
        !value.is_nan() && !self.is_nodata(value)
    }

    /// Returns `true` if `value` is a candidate for selection under `threshold` (inclusive).
    #[inline]
    pub fn qualifies(&self, value: f32, threshold: f32) -> bool {
        self.is_valid(value) && value >= threshold
    }

    /// Sum of all cells that qualify under `threshold`.
    pub fn qualifying_total(&self, threshold: f32) -> f64 {
        self.data
            .iter()
            .filter(|v| self.qualifies(**v, threshold))
            .map(|v| *v as f64)
            .sum()
    }

    /// Copy the cells covered by `block` into a new grid carrying the same sentinel.
    pub fn window(&self, block: &Block) -> Result<Grid> {
        block.validate()?;
        if block.row_end() > self.rows || block.col_end() > self.cols {
            return Err(Error::invalid_parameter(
                "block",
                format!(
                    "{block} exceeds grid shape {}x{}",
                    self.rows, self.cols
                ),
            ));
        }
        let mut data = Vec::with_capacity(block.area());
        for row in block.row_range() {
            let start = row * self.cols + block.col_off;
            data.extend_from_slice(&self.data[start..start + block.cols]);
        }
        Ok(Grid {
            rows: block.rows,
            cols: block.cols,
            data,
            nodata: self.nodata,
        })
    }
}
