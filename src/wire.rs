//! GeoJSON-style wire representation of redline features.
//!
//! The feature service speaks `{"type": "Feature", "id"?, "geometry",
//! "properties"}` with `[lng, lat]` coordinate order; the engine works in
//! `lat`/`lng` structs. This module owns both directions of the conversion.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::{Deserialize, Serialize};

use crate::feature::RedlineFeature;
use crate::geom::{Coordinate, Geometry};

/// Conversion failures for features coming off the wire.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("line geometry needs at least 2 coordinates, got {0}")]
    ShortLine(usize),
}

/// The literal `"type": "Feature"` tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    #[default]
    Feature,
}

/// Geometry as serialized on the wire: `{"type": …, "coordinates": …}` with
/// `[lng, lat]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum WireGeometry {
    Point([f64; 2]),
    LineString(Vec<[f64; 2]>),
}

/// A feature as sent to and received from the feature service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFeature {
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    /// Server-assigned id; omitted on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub geometry: WireGeometry,
    /// Open attribute mapping; unrecognized keys pass through untouched.
    pub properties: serde_json::Value,
}

/// The authoritative collection returned by a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireCollection {
    #[serde(rename = "type")]
    pub collection_type: CollectionType,
    pub features: Vec<WireFeature>,
}

/// The literal `"type": "FeatureCollection"` tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionType {
    #[default]
    FeatureCollection,
}

fn to_pair(c: Coordinate) -> [f64; 2] {
    [c.lng, c.lat]
}

fn from_pair(p: [f64; 2]) -> Coordinate {
    Coordinate::new(p[1], p[0])
}

impl WireFeature {
    /// Serialize an in-memory feature for a create or update call. The id
    /// is present exactly when the feature is persisted.
    #[must_use]
    pub fn from_feature(feature: &RedlineFeature) -> Self {
        let geometry = match &feature.geometry {
            Geometry::Point(c) => WireGeometry::Point(to_pair(*c)),
            Geometry::Line(cs) => WireGeometry::LineString(cs.iter().copied().map(to_pair).collect()),
        };
        Self {
            feature_type: FeatureType::Feature,
            id: feature.server_id,
            geometry,
            properties: feature.properties.clone(),
        }
    }

    /// Materialize a server feature for rendering. The result carries a
    /// fresh local id and the server id from the wire.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::ShortLine`] for a `LineString` with fewer than
    /// two coordinates.
    pub fn into_feature(self) -> Result<RedlineFeature, WireError> {
        let geometry = match self.geometry {
            WireGeometry::Point(p) => Geometry::point(from_pair(p)),
            WireGeometry::LineString(ps) => {
                let count = ps.len();
                Geometry::line(ps.into_iter().map(from_pair).collect())
                    .ok_or(WireError::ShortLine(count))?
            }
        };
        let mut feature = RedlineFeature::draft(geometry);
        feature.server_id = self.id;
        feature.properties = self.properties;
        Ok(feature)
    }
}
