//! Drawing surface: the gesture state machine for authoring redlines.
//!
//! Exactly one drawing tool is armed at a time. A point completes on a
//! single click; a line accumulates vertices per click and completes on an
//! explicit finish with at least two of them. Completion and cancellation
//! both return the surface to idle.

#[cfg(test)]
#[path = "draw_test.rs"]
mod draw_test;

use crate::feature::FeatureKind;
use crate::geom::{Coordinate, Geometry};

/// The active gesture, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DrawState {
    /// No tool armed; map clicks fall through to ordinary handlers.
    #[default]
    Idle,
    /// Point tool armed, waiting for a single placement click.
    ArmedPoint,
    /// Line tool armed; vertices accumulate until finish or cancel.
    DrawingLine {
        /// Vertices placed so far, in click order.
        vertices: Vec<Coordinate>,
    },
}

/// Emitted when a gesture ends.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    /// The user finished a gesture; the geometry matches the clicks exactly.
    Completed {
        /// Kind of the tool that produced the geometry.
        kind: FeatureKind,
        /// One coordinate for a point, ≥ 2 for a line.
        geometry: Geometry,
    },
    /// The user aborted; any accumulated vertices are discarded.
    Cancelled,
}

/// Captures draw gestures on behalf of the engine.
#[derive(Debug, Default)]
pub struct DrawSurface {
    state: DrawState,
}

impl DrawSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm one drawing tool, disarming the other. Re-arming while a line is
    /// in progress discards its vertices.
    pub fn arm(&mut self, kind: FeatureKind) {
        self.state = match kind {
            FeatureKind::Point => DrawState::ArmedPoint,
            FeatureKind::Line => DrawState::DrawingLine { vertices: Vec::new() },
        };
    }

    /// Return to idle without emitting an event.
    pub fn disarm(&mut self) {
        self.state = DrawState::Idle;
    }

    /// The kind currently armed, if any.
    #[must_use]
    pub fn armed(&self) -> Option<FeatureKind> {
        match self.state {
            DrawState::Idle => None,
            DrawState::ArmedPoint => Some(FeatureKind::Point),
            DrawState::DrawingLine { .. } => Some(FeatureKind::Line),
        }
    }

    /// Feed a map click into the active gesture.
    ///
    /// Point tool: completes immediately. Line tool: appends a vertex and
    /// stays open. Idle: ignored (`None`).
    pub fn click(&mut self, coord: Coordinate) -> Option<DrawEvent> {
        match &mut self.state {
            DrawState::Idle => None,
            DrawState::ArmedPoint => {
                self.state = DrawState::Idle;
                Some(DrawEvent::Completed {
                    kind: FeatureKind::Point,
                    geometry: Geometry::point(coord),
                })
            }
            DrawState::DrawingLine { vertices } => {
                vertices.push(coord);
                None
            }
        }
    }

    /// Explicitly finish a line gesture.
    ///
    /// With at least two vertices this completes the line and disarms.
    /// With fewer it is a no-op and the gesture stays open.
    pub fn finish(&mut self) -> Option<DrawEvent> {
        let DrawState::DrawingLine { vertices } = &self.state else {
            return None;
        };
        let Some(geometry) = Geometry::line(vertices.clone()) else {
            return None;
        };
        self.state = DrawState::Idle;
        Some(DrawEvent::Completed { kind: FeatureKind::Line, geometry })
    }

    /// Abort the active gesture. Idle: no-op (`None`).
    pub fn cancel(&mut self) -> Option<DrawEvent> {
        if self.state == DrawState::Idle {
            return None;
        }
        self.state = DrawState::Idle;
        Some(DrawEvent::Cancelled)
    }

    /// Vertices placed so far in an open line gesture (for rubber-band
    /// rendering by the host).
    #[must_use]
    pub fn pending_vertices(&self) -> &[Coordinate] {
        match &self.state {
            DrawState::DrawingLine { vertices } => vertices,
            _ => &[],
        }
    }
}
