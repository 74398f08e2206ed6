//! Greedy mask-based selection over a single grid.
//!
//! Candidates are walked once in rank order. A candidate that is still eligible becomes a
//! representative point whose value is the sum of every qualifying, still-eligible pixel in the
//! square of radius `mask_width` around it; that square is then excluded. Candidates that were
//! absorbed by an earlier square are skipped.
use tracing::debug;

use crate::error::Result;
use crate::raster::{Block, GeoTransform, Grid, RasterSource};
use crate::select::cancel::{self, CancelToken};
use crate::select::events::EventSink;
use crate::select::mask::EligibilityMask;
use crate::select::ranking::rank_candidates;
use crate::select::windowed::run_blocks;
use crate::select::{RepresentativePoint, Selection, SelectionConfig, Unrasterizer};

/// Points selected from one grid, with block-local pixel indices.
#[derive(Debug, Clone, Default)]
pub(crate) struct GridSelection {
    pub points: Vec<RepresentativePoint>,
    pub candidates: usize,
}

/// Select representative pixels from `grid`.
///
/// Points are returned in selection order. Fails with
/// [`crate::error::Error::InvalidParameter`] if `mask_width < 0` or `threshold` is not finite.
pub fn select_representative_pixels(
    grid: &Grid,
    transform: &GeoTransform,
    mask_width: i32,
    threshold: f32,
) -> Result<Vec<RepresentativePoint>> {
    let config = SelectionConfig::new(mask_width).with_threshold(threshold);
    config.validate()?;
    Ok(select_in_grid(grid, transform, &config, None)?.points)
}

pub(crate) fn select_in_grid(
    grid: &Grid,
    transform: &GeoTransform,
    config: &SelectionConfig,
    cancel: Option<&CancelToken>,
) -> Result<GridSelection> {
    let radius = config.radius();
    let threshold = config.threshold;
    let candidates = rank_candidates(grid, threshold);
    let mut mask = EligibilityMask::new(grid.rows(), grid.cols());
    let mut points = Vec::new();

    for candidate in &candidates {
        cancel::check(cancel)?;
        if !mask.is_eligible(candidate.row, candidate.col) {
            continue;
        }
        let value = absorb(grid, &mask, candidate.row, candidate.col, radius, threshold);
        mask.exclude_square(candidate.row, candidate.col, radius);
        points.push(RepresentativePoint::new(
            candidate.row,
            candidate.col,
            transform.xy(candidate.row, candidate.col),
            value,
        ));
    }

    debug!(
        "Selected {} of {} candidates in a {}x{} grid; {} cells left eligible.",
        points.len(),
        candidates.len(),
        grid.rows(),
        grid.cols(),
        mask.eligible_count()
    );

    Ok(GridSelection {
        points,
        candidates: candidates.len(),
    })
}

/// Sum of qualifying, still-eligible values in the square of `radius` around `(row, col)`.
fn absorb(
    grid: &Grid,
    mask: &EligibilityMask,
    row: usize,
    col: usize,
    radius: usize,
    threshold: f32,
) -> f64 {
    let (rows, cols) = mask.square(row, col, radius);
    let mut total = 0.0f64;
    for r in rows {
        for c in cols.clone() {
            if !mask.is_eligible(r, c) {
                continue;
            }
            match grid.get(r, c) {
                Some(v) if grid.qualifies(v, threshold) => total += v as f64,
                _ => {}
            }
        }
    }
    total
}

/// Greedy unrasterizer reading the whole raster as one block.
#[derive(Debug, Clone, Default)]
pub struct GreedyUnrasterizer {
    /// Selection parameters.
    pub config: SelectionConfig,
    cancel: Option<CancelToken>,
}

impl GreedyUnrasterizer {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Sets a token that interrupts the run between candidate steps.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

impl Unrasterizer for GreedyUnrasterizer {
    fn unrasterize_with_events(
        &self,
        source: &dyn RasterSource,
        sink: &mut dyn EventSink,
    ) -> Result<Selection> {
        let (rows, cols) = source.shape();
        let blocks = if rows == 0 || cols == 0 {
            Vec::new()
        } else {
            vec![Block::full(rows, cols)]
        };
        run_blocks(
            "greedy",
            source,
            &blocks,
            &self.config,
            self.cancel.as_ref(),
            sink,
        )
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::error::Error;
    use crate::raster::InMemoryRaster;

    fn pixels(points: &[RepresentativePoint]) -> Vec<(usize, usize)> {
        points.iter().map(RepresentativePoint::pixel).collect()
    }

    #[test]
    fn rejects_negative_mask_width() {
        let grid = Grid::zeros(2, 2);
        let err =
            select_representative_pixels(&grid, &GeoTransform::identity(), -1, 1.0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter {
                name: "mask_width",
                ..
            }
        ));
    }

    #[test]
    fn rejects_nan_threshold() {
        let grid = Grid::zeros(2, 2);
        assert!(select_representative_pixels(&grid, &GeoTransform::identity(), 1, f32::NAN).is_err());
    }

    #[test]
    fn empty_or_below_threshold_grid_yields_no_points() {
        let t = GeoTransform::identity();
        assert!(select_representative_pixels(&Grid::zeros(0, 0), &t, 2, 1.0)
            .unwrap()
            .is_empty());
        assert!(select_representative_pixels(&Grid::zeros(4, 4), &t, 2, 1.0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn highest_value_absorbs_its_neighborhood() {
        let grid = Grid::new(3, 3, vec![1.0, 1.0, 1.0, 1.0, 9.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
        let points = select_representative_pixels(&grid, &GeoTransform::identity(), 1, 1.0).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].pixel(), (1, 1));
        assert_eq!(points[0].value, 17.0);
        assert_eq!(points[0].coord, DVec2::new(1.5, 1.5));
    }

    #[test]
    fn absorbed_cells_are_not_counted_twice() {
        // 5 at (0,0) absorbs (0,1); 4 at (0,2) may only take (0,3) and itself.
        let grid = Grid::new(1, 4, vec![5.0, 3.0, 4.0, 2.0]).unwrap();
        let points = select_representative_pixels(&grid, &GeoTransform::identity(), 1, 1.0).unwrap();
        assert_eq!(pixels(&points), vec![(0, 0), (0, 2)]);
        assert_eq!(points[0].value, 8.0);
        assert_eq!(points[1].value, 6.0);
    }

    #[test]
    fn below_threshold_and_nodata_cells_are_never_absorbed() {
        let grid = Grid::new(1, 3, vec![0.5, 10.0, -1.0])
            .unwrap()
            .with_nodata(Some(-1.0));
        let points = select_representative_pixels(&grid, &GeoTransform::identity(), 1, 1.0).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 10.0);
    }

    #[test]
    fn zero_mask_width_keeps_every_candidate() {
        let grid = Grid::new(2, 2, vec![3.0, 1.0, 2.0, 0.0]).unwrap();
        let points = select_representative_pixels(&grid, &GeoTransform::identity(), 0, 1.0).unwrap();
        assert_eq!(pixels(&points), vec![(0, 0), (1, 0), (0, 1)]);
        let values: Vec<_> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn equal_values_select_in_row_major_order() {
        let grid = Grid::new(1, 2, vec![5.0, 5.0]).unwrap();
        let points = select_representative_pixels(&grid, &GeoTransform::identity(), 0, 1.0).unwrap();
        assert_eq!(pixels(&points), vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn cancelled_token_aborts_without_points() {
        let grid = Grid::from_fn(4, 4, |r, c| (r + c) as f32 + 1.0);
        let token = CancelToken::new();
        token.cancel();
        let result = select_in_grid(
            &grid,
            &GeoTransform::identity(),
            &SelectionConfig::new(1),
            Some(&token),
        );
        assert!(matches!(result, Err(Error::Cancelled)));
    }

    #[test]
    fn unrasterizer_reads_full_raster() {
        let mut grid = Grid::zeros(6, 6);
        grid.set(1, 1, 10.0);
        grid.set(4, 4, 8.0);
        let raster = InMemoryRaster::new(grid, GeoTransform::identity()).with_block_shape((3, 3));
        let selection = GreedyUnrasterizer::new(SelectionConfig::new(2))
            .unrasterize(&raster)
            .unwrap();
        assert_eq!(selection.blocks_processed, 1);
        assert_eq!(pixels(&selection.points), vec![(1, 1), (4, 4)]);
        assert_eq!(selection.candidates_ranked, 2);
    }

    #[test]
    fn unrasterizer_on_empty_raster_is_empty() {
        let raster = InMemoryRaster::new(Grid::zeros(0, 5), GeoTransform::identity());
        let selection = GreedyUnrasterizer::default().unrasterize(&raster).unwrap();
        assert!(selection.is_empty());
        assert_eq!(selection.blocks_processed, 0);
    }
}
