//! GeoJSON output types.
//!
//! Field names here are an external contract: downstream map tooling reads
//! `type`, `geometry`, `properties` and the allow-listed property names.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::patterns::{ADDRESS, AVERAGE_SCORE, BUSINESS_NAME, HIGH_SCORE, TOTAL_INSPECTIONS};

/// Record fields copied into feature properties.
pub const PROPERTY_ALLOW_LIST: [&str; 5] = [
    BUSINESS_NAME,
    AVERAGE_SCORE,
    TOTAL_INSPECTIONS,
    HIGH_SCORE,
    ADDRESS,
];

/// GeoJSON geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A single position, `[longitude, latitude]`.
    Point {
        /// `[longitude, latitude]` in that order, as GeoJSON requires.
        coordinates: [f64; 2],
    },
}

impl Geometry {
    /// Build a point from latitude and longitude.
    #[must_use]
    pub fn point(latitude: f64, longitude: f64) -> Self {
        Self::Point {
            coordinates: [longitude, latitude],
        }
    }
}

/// One geocoded restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct GeoFeature {
    /// Location returned by the geocoder.
    pub geometry: Geometry,
    /// Allow-listed record fields.
    pub properties: Map<String, Value>,
}

impl GeoFeature {
    /// Create a new feature.
    #[must_use]
    pub fn new(geometry: Geometry, properties: Map<String, Value>) -> Self {
        Self {
            geometry,
            properties,
        }
    }
}

/// Ordered collection of features; the final output artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    /// Features in listing order.
    pub features: Vec<GeoFeature>,
}

impl FeatureCollection {
    /// Wrap features into a collection.
    #[must_use]
    pub fn new(features: Vec<GeoFeature>) -> Self {
        Self { features }
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// True when no record produced a feature.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FromIterator<GeoFeature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = GeoFeature>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
