use super::*;

fn c(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng)
}

// =============================================================
// Arming
// =============================================================

#[test]
fn new_surface_is_idle() {
    let surface = DrawSurface::new();
    assert_eq!(surface.armed(), None);
}

#[test]
fn arm_point_then_line_single_armed() {
    let mut surface = DrawSurface::new();
    surface.arm(FeatureKind::Point);
    assert_eq!(surface.armed(), Some(FeatureKind::Point));
    surface.arm(FeatureKind::Line);
    assert_eq!(surface.armed(), Some(FeatureKind::Line));
}

#[test]
fn rearm_discards_in_progress_vertices() {
    let mut surface = DrawSurface::new();
    surface.arm(FeatureKind::Line);
    surface.click(c(1.0, 2.0));
    surface.arm(FeatureKind::Line);
    assert!(surface.pending_vertices().is_empty());
}

#[test]
fn disarm_returns_to_idle_without_event() {
    let mut surface = DrawSurface::new();
    surface.arm(FeatureKind::Point);
    surface.disarm();
    assert_eq!(surface.armed(), None);
}

// =============================================================
// Point gesture
// =============================================================

#[test]
fn point_completes_on_single_click() {
    let mut surface = DrawSurface::new();
    surface.arm(FeatureKind::Point);
    let event = surface.click(c(39.07, -108.56));
    assert_eq!(
        event,
        Some(DrawEvent::Completed {
            kind: FeatureKind::Point,
            geometry: Geometry::point(c(39.07, -108.56)),
        })
    );
    assert_eq!(surface.armed(), None);
}

#[test]
fn click_while_idle_is_ignored() {
    let mut surface = DrawSurface::new();
    assert_eq!(surface.click(c(1.0, 2.0)), None);
}

// =============================================================
// Line gesture
// =============================================================

#[test]
fn line_clicks_accumulate_in_order() {
    let mut surface = DrawSurface::new();
    surface.arm(FeatureKind::Line);
    assert_eq!(surface.click(c(1.0, 2.0)), None);
    assert_eq!(surface.click(c(3.0, 4.0)), None);
    assert_eq!(surface.pending_vertices(), &[c(1.0, 2.0), c(3.0, 4.0)]);
}

#[test]
fn finish_with_two_vertices_completes() {
    let mut surface = DrawSurface::new();
    surface.arm(FeatureKind::Line);
    surface.click(c(1.0, 2.0));
    surface.click(c(3.0, 4.0));
    let Some(DrawEvent::Completed { kind, geometry }) = surface.finish() else {
        panic!("expected completion");
    };
    assert_eq!(kind, FeatureKind::Line);
    assert_eq!(geometry.coordinates(), &[c(1.0, 2.0), c(3.0, 4.0)]);
    assert_eq!(surface.armed(), None);
}

#[test]
fn finish_under_two_vertices_keeps_gesture_open() {
    let mut surface = DrawSurface::new();
    surface.arm(FeatureKind::Line);
    assert_eq!(surface.finish(), None);
    surface.click(c(1.0, 2.0));
    assert_eq!(surface.finish(), None);
    assert_eq!(surface.armed(), Some(FeatureKind::Line));
    assert_eq!(surface.pending_vertices().len(), 1);
}

#[test]
fn finish_with_point_tool_is_noop() {
    let mut surface = DrawSurface::new();
    surface.arm(FeatureKind::Point);
    assert_eq!(surface.finish(), None);
    assert_eq!(surface.armed(), Some(FeatureKind::Point));
}

// =============================================================
// Cancellation
// =============================================================

#[test]
fn cancel_aborts_line_and_discards_vertices() {
    let mut surface = DrawSurface::new();
    surface.arm(FeatureKind::Line);
    surface.click(c(1.0, 2.0));
    surface.click(c(3.0, 4.0));
    assert_eq!(surface.cancel(), Some(DrawEvent::Cancelled));
    assert_eq!(surface.armed(), None);
    assert!(surface.pending_vertices().is_empty());
}

#[test]
fn cancel_armed_point_emits_cancelled() {
    let mut surface = DrawSurface::new();
    surface.arm(FeatureKind::Point);
    assert_eq!(surface.cancel(), Some(DrawEvent::Cancelled));
}

#[test]
fn cancel_while_idle_is_noop() {
    let mut surface = DrawSurface::new();
    assert_eq!(surface.cancel(), None);
}
