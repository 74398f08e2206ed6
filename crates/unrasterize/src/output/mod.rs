//! Output boundary for representative points.
//!
//! Writers for geographic vector formats implement [`VectorSink`]. With the `serde` feature,
//! [`geojson::GeoJsonWriter`] serializes points as a GeoJSON FeatureCollection.
use crate::error::Result;
use crate::select::RepresentativePoint;

#[cfg(feature = "serde")]
pub mod geojson;

/// Trait for consumers of selected points.
pub trait VectorSink {
    fn write_points(&mut self, points: &[RepresentativePoint]) -> Result<()>;
}

/// Collects points in memory.
impl VectorSink for Vec<RepresentativePoint> {
    fn write_points(&mut self, points: &[RepresentativePoint]) -> Result<()> {
        self.extend_from_slice(points);
        Ok(())
    }
}
