//! GeoJSON output for representative points.
//!
//! Each point becomes a `Point` feature whose `id` is its index in the output sequence and
//! whose only property holds the aggregated value under a configurable name.
use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::output::VectorSink;
use crate::select::RepresentativePoint;

pub const DEFAULT_VALUE_ATTRIBUTE: &str = "value";

/// A GeoJSON FeatureCollection of points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    /// Array of features.
    pub features: Vec<Feature>,

    /// Optional named CRS member (GeoJSON 2008 style).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crs: Option<NamedCrs>,
}

impl FeatureCollection {
    /// Create a new empty FeatureCollection.
    pub fn new() -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features: Vec::new(),
            crs: None,
        }
    }

    /// Build a collection from points, storing each value under `value_attribute`.
    pub fn from_points(points: &[RepresentativePoint], value_attribute: &str) -> Self {
        let features = points
            .iter()
            .enumerate()
            .map(|(id, p)| Feature::point(id, p, value_attribute))
            .collect();
        Self {
            features,
            ..Self::new()
        }
    }

    /// Set a named CRS such as `"EPSG:4326"`.
    pub fn with_crs(mut self, name: impl Into<String>) -> Self {
        self.crs = Some(NamedCrs::new(name));
        self
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// A GeoJSON Feature with a point geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    pub id: usize,

    pub geometry: Geometry,

    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn point(id: usize, point: &RepresentativePoint, value_attribute: &str) -> Self {
        let mut properties = Map::new();
        properties.insert(value_attribute.to_string(), Value::from(point.value));
        Self {
            type_: "Feature".to_string(),
            id,
            geometry: Geometry::Point {
                coordinates: [point.coord.x, point.coord.y],
            },
            properties,
        }
    }
}

/// GeoJSON geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        /// Coordinates as [x, y].
        coordinates: [f64; 2],
    },
}

/// Named coordinate reference system member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedCrs {
    #[serde(rename = "type")]
    pub type_: String,
    pub properties: CrsProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrsProperties {
    pub name: String,
}

impl NamedCrs {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            type_: "name".to_string(),
            properties: CrsProperties { name: name.into() },
        }
    }
}

/// [`VectorSink`] writing a GeoJSON FeatureCollection to `W`.
///
/// Every call to [`VectorSink::write_points`] writes one complete document.
pub struct GeoJsonWriter<W: Write> {
    writer: W,
    value_attribute: String,
    crs: Option<String>,
    pretty: bool,
}

impl<W: Write> GeoJsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            value_attribute: DEFAULT_VALUE_ATTRIBUTE.to_string(),
            crs: None,
            pretty: false,
        }
    }

    /// Sets the property name holding the aggregated value.
    pub fn with_value_attribute(mut self, name: impl Into<String>) -> Self {
        self.value_attribute = name.into();
        self
    }

    /// Sets a named CRS to embed in the collection.
    pub fn with_crs(mut self, name: impl Into<String>) -> Self {
        self.crs = Some(name.into());
        self
    }

    /// Pretty-print the output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> VectorSink for GeoJsonWriter<W> {
    fn write_points(&mut self, points: &[RepresentativePoint]) -> Result<()> {
        let mut collection = FeatureCollection::from_points(points, &self.value_attribute);
        if let Some(crs) = &self.crs {
            collection = collection.with_crs(crs.clone());
        }
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &collection)?;
        } else {
            serde_json::to_writer(&mut self.writer, &collection)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
