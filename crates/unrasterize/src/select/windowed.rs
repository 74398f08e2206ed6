//! Block-wise (windowed) greedy selection.
//!
//! The raster is partitioned into blocks, each block is read and selected independently with
//! its own eligibility mask, and the per-block results are concatenated in block order. Only
//! one block needs to be resident at a time (one per worker with the `rayon` feature).
//!
//! Masks do not cross block boundaries: two points selected in adjacent blocks may lie closer
//! than `mask_width` to each other. Value conservation still holds per block.
#[cfg(feature = "rayon")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

#[cfg(feature = "rayon")]
use crate::error::Error;
use crate::error::Result;
use crate::raster::source::read_block_with_nodata;
use crate::raster::{partition, Block, GeoTransform, RasterSource};
use crate::select::cancel::{self, CancelToken};
use crate::select::events::{BlockSummary, EventKind, EventSink, UnrasterizeEvent};
use crate::select::greedy::{select_in_grid, GridSelection};
use crate::select::{Selection, SelectionConfig, Unrasterizer};

/// Greedy unrasterizer processing the raster one block at a time.
#[derive(Debug, Clone, Default)]
pub struct WindowedUnrasterizer {
    /// Selection parameters applied to every block.
    pub config: SelectionConfig,
    /// Block shape `(rows, cols)`. Defaults to the source's natural block shape.
    pub block_shape: Option<(usize, usize)>,
    cancel: Option<CancelToken>,
}

impl WindowedUnrasterizer {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            block_shape: None,
            cancel: None,
        }
    }

    /// Sets an explicit block shape `(rows, cols)`.
    pub fn with_block_shape(mut self, block_shape: (usize, usize)) -> Self {
        self.block_shape = Some(block_shape);
        self
    }

    /// Sets a token that interrupts the run between blocks and candidate steps.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Partition `source` into blocks in iteration order.
    ///
    /// Uses the explicit block shape, then the source's natural block shape, then the whole
    /// raster as a single block.
    pub fn blocks_for(&self, source: &dyn RasterSource) -> Result<Vec<Block>> {
        let (rows, cols) = source.shape();
        let shape = self
            .block_shape
            .or_else(|| source.block_shape())
            .unwrap_or((rows.max(1), cols.max(1)));
        partition(rows, cols, shape)
    }
}

impl Unrasterizer for WindowedUnrasterizer {
    fn unrasterize_with_events(
        &self,
        source: &dyn RasterSource,
        sink: &mut dyn EventSink,
    ) -> Result<Selection> {
        self.config.validate()?;
        let blocks = self.blocks_for(source)?;

        let radius = self.config.radius();
        if let Some(small) = blocks.iter().find(|b| b.rows <= radius || b.cols <= radius) {
            let message = format!(
                "block shape {}x{} is not wider than mask_width {}; boundary effects will dominate",
                small.rows, small.cols, self.config.mask_width
            );
            warn!("{message}.");
            if sink.wants(EventKind::Warning) {
                sink.send(UnrasterizeEvent::Warning {
                    context: small.to_string(),
                    message,
                });
            }
        }

        run_blocks(
            "windowed",
            source,
            &blocks,
            &self.config,
            self.cancel.as_ref(),
            sink,
        )
    }
}

/// Run greedy selection over explicit `blocks` of `source` and concatenate the results.
///
/// Blocks must cover disjoint regions of the raster. Any failure (a zero-area block, a read
/// error, cancellation) aborts the run; the error of the first failing block in iteration order
/// is returned.
pub fn select_blocks(
    source: &dyn RasterSource,
    blocks: &[Block],
    config: &SelectionConfig,
    cancel: Option<&CancelToken>,
    sink: &mut dyn EventSink,
) -> Result<Selection> {
    run_blocks("blocks", source, blocks, config, cancel, sink)
}

pub(crate) fn run_blocks(
    method: &'static str,
    source: &dyn RasterSource,
    blocks: &[Block],
    config: &SelectionConfig,
    cancel: Option<&CancelToken>,
    sink: &mut dyn EventSink,
) -> Result<Selection> {
    config.validate()?;

    let (rows, cols) = source.shape();
    info!(
        "Unrasterizing {}x{} raster ({}): {} blocks, mask_width {}, threshold {}.",
        rows,
        cols,
        method,
        blocks.len(),
        config.mask_width,
        config.threshold
    );
    if sink.wants(EventKind::RunStarted) {
        sink.send(UnrasterizeEvent::RunStarted {
            method,
            config: Some(*config),
            block_count: blocks.len(),
        });
    }
    if blocks.is_empty() {
        warn!("Raster has no blocks to process.");
        if sink.wants(EventKind::Warning) {
            sink.send(UnrasterizeEvent::Warning {
                context: method.into(),
                message: "Raster has no blocks to process".into(),
            });
        }
    }

    let transform = source.geotransform();

    #[cfg(feature = "rayon")]
    let outcomes = select_blocks_parallel(source, &transform, blocks, config, cancel).into_iter();

    #[cfg(not(feature = "rayon"))]
    let outcomes = blocks
        .iter()
        .map(|block| select_block(source, &transform, block, config, cancel));

    let mut selection = Selection::new();
    for ((index, block), outcome) in blocks.iter().enumerate().zip(outcomes) {
        let outcome = outcome?;
        let summary = BlockSummary::new(outcome.candidates, &outcome.points);
        debug!(
            "Block {} {}: {} points from {} candidates.",
            index, block, summary.points, summary.candidates
        );

        if sink.wants(EventKind::BlockStarted) {
            sink.send(UnrasterizeEvent::BlockStarted {
                index,
                block: *block,
            });
        }
        if sink.wants(EventKind::PointSelected) {
            for point in &outcome.points {
                sink.send(UnrasterizeEvent::PointSelected {
                    block_index: index,
                    point: *point,
                });
            }
        }
        if sink.wants(EventKind::BlockFinished) {
            sink.send(UnrasterizeEvent::BlockFinished {
                index,
                block: *block,
                summary,
            });
        }

        selection.candidates_ranked += outcome.candidates;
        selection.blocks_processed += 1;
        selection.points.extend(outcome.points);
    }

    info!(
        "Selected {} points from {} candidates; total value {:.3}.",
        selection.len(),
        selection.candidates_ranked,
        selection.total_value()
    );
    if sink.wants(EventKind::RunFinished) {
        sink.send(UnrasterizeEvent::RunFinished {
            selection: selection.clone(),
        });
    }

    Ok(selection)
}

/// Select every block on the rayon pool, in block order.
///
/// Once a block fails, blocks after it in iteration order are skipped with
/// [`Error::Cancelled`]. Blocks before the earliest failure always run, so the first error
/// in block order is a real one.
#[cfg(feature = "rayon")]
fn select_blocks_parallel(
    source: &dyn RasterSource,
    transform: &GeoTransform,
    blocks: &[Block],
    config: &SelectionConfig,
    cancel: Option<&CancelToken>,
) -> Vec<Result<GridSelection>> {
    let first_failure = AtomicUsize::new(usize::MAX);
    blocks
        .par_iter()
        .enumerate()
        .map(|(index, block)| {
            if index > first_failure.load(Ordering::Relaxed) {
                return Err(Error::Cancelled);
            }
            let outcome = select_block(source, transform, block, config, cancel);
            if outcome.is_err() {
                first_failure.fetch_min(index, Ordering::Relaxed);
            }
            outcome
        })
        .collect()
}

fn select_block(
    source: &dyn RasterSource,
    transform: &GeoTransform,
    block: &Block,
    config: &SelectionConfig,
    cancel: Option<&CancelToken>,
) -> Result<GridSelection> {
    cancel::check(cancel)?;
    block.validate()?;

    let grid = read_block_with_nodata(source, block)?;

    let local = transform.translated(block.row_off, block.col_off);
    let mut outcome = select_in_grid(&grid, &local, config, cancel)?;
    for point in &mut outcome.points {
        *point = point.offset(block.row_off, block.col_off);
    }
    Ok(outcome)
}
