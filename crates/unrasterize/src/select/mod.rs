//! Selection of representative pixels from value rasters.
//!
//! - [`ranking`]: threshold filtering and deterministic value-descending ordering.
//! - [`mask`]: per-run eligibility tracking with square exclusion zones.
//! - [`greedy`]: the default unrasterizer, one grid at a time.
//! - [`windowed`]: block-wise greedy selection for rasters too large to hold in memory.
//! - [`naive`]: top-N baseline with total-preserving value reassignment.
//! - [`events`] and [`cancel`]: observing and interrupting runs.
use glam::DVec2;

use crate::error::{Error, Result};
use crate::raster::RasterSource;
use crate::select::events::EventSink;

pub mod cancel;
pub mod events;
pub mod greedy;
pub mod mask;
pub mod naive;
pub mod ranking;
pub mod windowed;

pub const DEFAULT_THRESHOLD: f32 = 1.0;

/// A selected pixel together with the value it represents.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepresentativePoint {
    /// Row of the selected pixel in the full raster.
    pub row: usize,
    /// Column of the selected pixel in the full raster.
    pub col: usize,
    /// Geographic coordinate of the pixel center.
    pub coord: DVec2,
    /// Aggregated value of every pixel this point absorbed.
    pub value: f64,
}

impl RepresentativePoint {
    pub fn new(row: usize, col: usize, coord: DVec2, value: f64) -> Self {
        Self {
            row,
            col,
            coord,
            value,
        }
    }

    /// Pixel index as `(row, col)`.
    pub fn pixel(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Shift the pixel index from block-local to raster coordinates.
    pub(crate) fn offset(mut self, row_off: usize, col_off: usize) -> Self {
        self.row += row_off;
        self.col += col_off;
        self
    }
}

/// Parameters of a greedy selection run.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionConfig {
    /// Chebyshev radius, in pixels, of the exclusion square around each selected pixel.
    pub mask_width: i32,
    /// Minimum value (inclusive) for a pixel to be considered.
    pub threshold: f32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            mask_width: 0,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl SelectionConfig {
    /// Creates a new [`SelectionConfig`] with the given mask width and the default threshold.
    pub fn new(mask_width: i32) -> Self {
        Self {
            mask_width,
            ..Default::default()
        }
    }

    /// Sets the mask width.
    pub fn with_mask_width(mut self, mask_width: i32) -> Self {
        self.mask_width = mask_width;
        self
    }

    /// Sets the threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.mask_width < 0 {
            return Err(Error::invalid_parameter(
                "mask_width",
                format!("must be >= 0, got {}", self.mask_width),
            ));
        }
        if !self.threshold.is_finite() {
            return Err(Error::invalid_parameter(
                "threshold",
                format!("must be finite, got {}", self.threshold),
            ));
        }
        Ok(())
    }

    /// Mask width as an index radius. Only meaningful after [`Self::validate`].
    #[inline]
    pub(crate) fn radius(&self) -> usize {
        self.mask_width.max(0) as usize
    }
}

/// Result of an unrasterizer run.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    /// Representative points in output order.
    pub points: Vec<RepresentativePoint>,
    /// Total candidate pixels ranked across all blocks.
    pub candidates_ranked: usize,
    /// Number of blocks processed.
    pub blocks_processed: usize,
}

impl Selection {
    /// Creates a new empty [`Selection`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the points and returns a new instance.
    pub fn with_points(mut self, points: Vec<RepresentativePoint>) -> Self {
        self.points = points;
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of all aggregated point values.
    pub fn total_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    pub fn into_points(self) -> Vec<RepresentativePoint> {
        self.points
    }
}

/// Common interface of the unrasterizers.
pub trait Unrasterizer {
    /// Select representative points from `source`, reporting progress to `sink`.
    fn unrasterize_with_events(
        &self,
        source: &dyn RasterSource,
        sink: &mut dyn EventSink,
    ) -> Result<Selection>;

    /// Select representative points from `source`.
    fn unrasterize(&self, source: &dyn RasterSource) -> Result<Selection> {
        self.unrasterize_with_events(source, &mut ())
    }
}
