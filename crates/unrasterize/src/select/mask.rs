//! Eligibility mask with square (Chebyshev) exclusion zones.
//!
//! The mask is owned by a single selection run. Exclusion is monotonic: cells only ever move
//! from eligible to ineligible.
use std::ops::Range;

/// Boolean grid tracking which cells may still be selected or absorbed.
#[derive(Clone, Debug)]
pub struct EligibilityMask {
    rows: usize,
    cols: usize,
    eligible: Vec<bool>,
    remaining: usize,
}

impl EligibilityMask {
    /// Create a mask with every cell eligible.
    pub fn new(rows: usize, cols: usize) -> Self {
        let len = rows * cols;
        Self {
            rows,
            cols,
            eligible: vec![true; len],
            remaining: len,
        }
    }

    /// Mask shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns `true` if `(row, col)` is inside the mask and has not been excluded.
    #[inline]
    pub fn is_eligible(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.eligible[row * self.cols + col]
    }

    /// Mark every cell within Chebyshev distance `radius` of `(row, col)` as ineligible,
    /// clipped to the mask bounds. The center cell is included.
    pub fn exclude_square(&mut self, row: usize, col: usize, radius: usize) {
        let (row_range, col_range) = self.square(row, col, radius);
        for r in row_range {
            let base = r * self.cols;
            for c in col_range.clone() {
                let cell = &mut self.eligible[base + c];
                if *cell {
                    *cell = false;
                    self.remaining -= 1;
                }
            }
        }
    }

    /// Number of cells still eligible.
    pub fn eligible_count(&self) -> usize {
        self.remaining
    }

    /// Row and column ranges of the square of `radius` around `(row, col)`, clipped to bounds.
    /// Both ranges are empty when the center lies outside the mask.
    pub fn square(&self, row: usize, col: usize, radius: usize) -> (Range<usize>, Range<usize>) {
        if row >= self.rows || col >= self.cols {
            return (0..0, 0..0);
        }
        (
            clipped_span(row, radius, self.rows),
            clipped_span(col, radius, self.cols),
        )
    }
}

#[inline]
fn clipped_span(center: usize, radius: usize, len: usize) -> Range<usize> {
    center.saturating_sub(radius)..center.saturating_add(radius).saturating_add(1).min(len)
}
