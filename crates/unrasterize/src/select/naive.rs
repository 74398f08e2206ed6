//! Top-N baseline selection.
//!
//! Picks the `n_pixels` highest-valued pixels regardless of how close they are, then rescales
//! their values so that they sum to the total positive value of the grid. Useful as a
//! reference point for the greedy unrasterizers.
use tracing::{info, warn};

use crate::error::Result;
use crate::raster::source::read_block_with_nodata;
use crate::raster::{Block, GeoTransform, Grid, RasterSource};
use crate::select::events::{BlockSummary, EventKind, EventSink, UnrasterizeEvent};
use crate::select::ranking::{rank_valid_cells, Candidate};
use crate::select::{RepresentativePoint, Selection, Unrasterizer};

/// Select the `n_pixels` highest-valued pixels of `grid` with total-preserving values.
pub fn select_top_pixels(
    grid: &Grid,
    transform: &GeoTransform,
    n_pixels: usize,
) -> Vec<RepresentativePoint> {
    let ranked = rank_valid_cells(grid);
    let selected = &ranked[..n_pixels.min(ranked.len())];
    let values = reassign_values(grid, selected);
    selected
        .iter()
        .zip(values)
        .map(|(c, value)| RepresentativePoint::new(c.row, c.col, transform.xy(c.row, c.col), value))
        .collect()
}

/// Scale the raw values of `selected` so that they sum to the grid's positive total.
///
/// Returns the raw values unchanged when they sum to zero.
fn reassign_values(grid: &Grid, selected: &[Candidate]) -> Vec<f64> {
    let total: f64 = grid
        .as_slice()
        .iter()
        .filter(|v| grid.is_valid(**v) && **v > 0.0)
        .map(|v| *v as f64)
        .sum();
    let raw: Vec<f64> = selected.iter().map(|c| c.value as f64).collect();
    let selected_total: f64 = raw.iter().sum();

    if selected_total == 0.0 {
        if !selected.is_empty() {
            warn!("Selected pixels sum to zero; keeping raw values.");
        }
        return raw;
    }
    let scale = total / selected_total;
    raw.into_iter().map(|v| v * scale).collect()
}

/// Unrasterizer keeping the `n_pixels` highest-valued pixels.
#[derive(Debug, Clone)]
pub struct NaiveUnrasterizer {
    /// Number of pixels to select.
    pub n_pixels: usize,
}

impl NaiveUnrasterizer {
    pub fn new(n_pixels: usize) -> Self {
        Self { n_pixels }
    }
}

impl Unrasterizer for NaiveUnrasterizer {
    fn unrasterize_with_events(
        &self,
        source: &dyn RasterSource,
        sink: &mut dyn EventSink,
    ) -> Result<Selection> {
        let (rows, cols) = source.shape();
        let block = Block::full(rows, cols);
        let block_count = usize::from(block.area() > 0);

        info!(
            "Unrasterizing {}x{} raster (naive): keeping top {} pixels.",
            rows, cols, self.n_pixels
        );
        if sink.wants(EventKind::RunStarted) {
            sink.send(UnrasterizeEvent::RunStarted {
                method: "naive",
                config: None,
                block_count,
            });
        }

        let mut selection = Selection::new();
        if block_count > 0 {
            let grid = read_block_with_nodata(source, &block)?;
            let candidates = rank_valid_cells(&grid).len();
            let points = select_top_pixels(&grid, &source.geotransform(), self.n_pixels);

            if candidates < self.n_pixels {
                let message = format!(
                    "requested {} pixels but only {} hold data",
                    self.n_pixels, candidates
                );
                warn!("{message}.");
                if sink.wants(EventKind::Warning) {
                    sink.send(UnrasterizeEvent::Warning {
                        context: block.to_string(),
                        message,
                    });
                }
            }

            if sink.wants(EventKind::BlockStarted) {
                sink.send(UnrasterizeEvent::BlockStarted { index: 0, block });
            }
            if sink.wants(EventKind::PointSelected) {
                for point in &points {
                    sink.send(UnrasterizeEvent::PointSelected {
                        block_index: 0,
                        point: *point,
                    });
                }
            }
            if sink.wants(EventKind::BlockFinished) {
                sink.send(UnrasterizeEvent::BlockFinished {
                    index: 0,
                    block,
                    summary: BlockSummary::new(candidates, &points),
                });
            }

            selection.candidates_ranked = candidates;
            selection.blocks_processed = 1;
            selection.points = points;
        }

        if sink.wants(EventKind::RunFinished) {
            sink.send(UnrasterizeEvent::RunFinished {
                selection: selection.clone(),
            });
        }
        Ok(selection)
    }
}
