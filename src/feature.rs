//! Redline feature model.
//!
//! A redline is a user-authored annotation (point or line) with three
//! recognized free-text attributes (`name`, `date`, `comments`) kept in an
//! open JSON bag so unrecognized server-side keys survive a round trip.
//! Features are drafted locally with no server id; the id appears once the
//! feature service has persisted them.

#[cfg(test)]
#[path = "feature_test.rs"]
mod feature_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::Geometry;

/// Client-side identity of a feature, stable across the draft → persisted
/// transition. Never sent to the feature service as feature identity.
pub type LocalId = Uuid;

/// The kind of a redline feature. Immutable once created; selects the layer
/// collection and the remote endpoint the feature belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    /// Single-coordinate annotation.
    Point,
    /// Polyline annotation with at least two vertices.
    Line,
}

impl FeatureKind {
    /// The kind implied by a geometry.
    #[must_use]
    pub fn of(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(_) => Self::Point,
            Geometry::Line(_) => Self::Line,
        }
    }
}

/// A redline feature as held in a layer collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedlineFeature {
    /// Client-generated identity; survives reconcile-driven replacement only
    /// through the server id, not through this value.
    pub local_id: LocalId,
    /// Point or line; derived from the geometry at creation.
    pub kind: FeatureKind,
    /// Server-assigned id, absent until the feature is persisted.
    pub server_id: Option<i64>,
    /// One coordinate for a point, ≥ 2 for a line.
    pub geometry: Geometry,
    /// Open attribute bag; `name` / `date` / `comments` are recognized,
    /// anything else is preserved but never displayed.
    pub properties: serde_json::Value,
}

impl RedlineFeature {
    /// Create a locally drafted feature: fresh local id, no server id,
    /// empty attributes.
    #[must_use]
    pub fn draft(geometry: Geometry) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            kind: FeatureKind::of(&geometry),
            server_id: None,
            geometry,
            properties: serde_json::json!({}),
        }
    }

    /// Whether the feature service has confirmed this feature.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.server_id.is_some()
    }

    /// Typed view over the attribute bag.
    #[must_use]
    pub fn attributes(&self) -> Attributes<'_> {
        Attributes::new(&self.properties)
    }
}

/// Typed access to the recognized attribute keys of a feature's `properties`.
pub struct Attributes<'a> {
    value: &'a serde_json::Value,
}

impl<'a> Attributes<'a> {
    /// Wrap a reference to a `properties` JSON value for typed access.
    #[must_use]
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }

    /// The `name` attribute. Empty string when absent.
    #[must_use]
    pub fn name(&self) -> &str {
        self.str_field("name")
    }

    /// The `date` attribute, user-entered free text. Empty string when absent.
    #[must_use]
    pub fn date(&self) -> &str {
        self.str_field("date")
    }

    /// The `comments` attribute. Empty string when absent.
    #[must_use]
    pub fn comments(&self) -> &str {
        self.str_field("comments")
    }

    fn str_field(&self, key: &str) -> &str {
        self.value.get(key).and_then(|v| v.as_str()).unwrap_or("")
    }
}
