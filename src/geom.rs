//! Geographic coordinates and the two redline geometry shapes.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Geometry of a redline feature.
///
/// A line always carries at least two vertices; [`Geometry::line`] is the
/// only constructor and refuses shorter chains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// A single placed coordinate.
    Point(Coordinate),
    /// An ordered vertex chain of at least two coordinates.
    Line(Vec<Coordinate>),
}

impl Geometry {
    #[must_use]
    pub fn point(coord: Coordinate) -> Self {
        Self::Point(coord)
    }

    /// Build a line geometry. Returns `None` when fewer than two vertices
    /// are supplied.
    #[must_use]
    pub fn line(vertices: Vec<Coordinate>) -> Option<Self> {
        if vertices.len() < 2 {
            return None;
        }
        Some(Self::Line(vertices))
    }

    /// All coordinates of this geometry in order.
    #[must_use]
    pub fn coordinates(&self) -> &[Coordinate] {
        match self {
            Self::Point(c) => std::slice::from_ref(c),
            Self::Line(cs) => cs,
        }
    }

    /// Number of vertices (1 for a point, ≥ 2 for a line).
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.coordinates().len()
    }
}
