#![forbid(unsafe_code)]
//! unrasterize: Lossy conversion of dense value rasters into sparse representative points.
//!
//! Modules:
//! - raster: grids, affine geotransforms, blocks and the [`raster::RasterSource`] boundary
//! - select: candidate ranking, eligibility mask, greedy/naive/windowed unrasterizers, events
//! - output: the [`output::VectorSink`] boundary and (with `serde`) a GeoJSON writer
//!
//! The greedy selector walks pixels in descending value order. Each selected pixel absorbs
//! every still-eligible qualifying pixel within a square of radius `mask_width`, so the sum
//! of the emitted values equals the sum of all pixels at or above the threshold.
pub mod error;
pub mod output;
pub mod raster;
pub mod select;

/// Convenient re-exports for common types. Import with `use unrasterize::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    #[cfg(feature = "serde")]
    pub use crate::output::geojson::{FeatureCollection, GeoJsonWriter};
    pub use crate::output::VectorSink;
    pub use crate::raster::{partition, Block, GeoTransform, Grid, InMemoryRaster, RasterSource};
    pub use crate::select::cancel::CancelToken;
    pub use crate::select::events::{
        BlockSummary, EventKind, EventSink, FnSink, MultiSink, UnrasterizeEvent, VecSink,
    };
    pub use crate::select::greedy::{select_representative_pixels, GreedyUnrasterizer};
    pub use crate::select::mask::EligibilityMask;
    pub use crate::select::naive::{select_top_pixels, NaiveUnrasterizer};
    pub use crate::select::ranking::{rank_candidates, Candidate};
    pub use crate::select::windowed::{select_blocks, WindowedUnrasterizer};
    pub use crate::select::{RepresentativePoint, Selection, SelectionConfig, Unrasterizer};
}
