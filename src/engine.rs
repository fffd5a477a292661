//! Top-level redline engine.
//!
//! DESIGN
//! ======
//! The engine is pure state: it consumes map clicks, tool changes, and form
//! submissions, mutates its layers/draw surface/edit session, and returns
//! [`Action`]s for the host to execute. Network effects
//! (`CreateRequested` / `UpdateRequested`) are carried out by the service
//! layer; presentation effects (`FormOpened`, `RenderNeeded`) by the host.
//! Nothing here blocks or performs I/O, which is what keeps the whole
//! lifecycle testable without a map or a server.
//!
//! Mutations are optimistic: a submitted draft renders immediately and the
//! authoritative state arrives later via [`RedlineEngine::apply_reconcile`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::config::RedlineConfig;
use crate::draw::{DrawEvent, DrawSurface};
use crate::feature::{FeatureKind, LocalId, RedlineFeature};
use crate::form::{FormFields, FormMode, FormTarget, OpenForm};
use crate::geom::{Coordinate, Geometry};
use crate::layer::RedlineLayer;
use crate::session::{EditSession, StartOutcome};

/// Actions returned from engine entry points for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Present the attribute form with the given seed values.
    FormOpened { mode: FormMode, fields: FormFields },
    /// Dismiss the attribute form.
    FormClosed,
    /// Issue a create call to the feature store for this draft.
    CreateRequested { feature: RedlineFeature },
    /// Issue an update call to the feature store (feature has a server id).
    UpdateRequested { feature: RedlineFeature },
    /// Enable direct-manipulation handles on a feature.
    EditStarted { id: LocalId },
    /// Disable direct-manipulation handles on a feature.
    EditStopped { id: LocalId },
    /// Open the external street-view lookup at a coordinate.
    StreetViewRequested(Coordinate),
    /// Layer contents changed; redraw.
    RenderNeeded,
}

/// Owns all redline state for one map instance.
pub struct RedlineEngine {
    config: RedlineConfig,
    points: RedlineLayer,
    lines: RedlineLayer,
    draw: DrawSurface,
    staged: Option<RedlineFeature>,
    form: Option<OpenForm>,
    session: EditSession,
    street_view_armed: bool,
}

impl RedlineEngine {
    #[must_use]
    pub fn new(config: RedlineConfig) -> Self {
        Self {
            config,
            points: RedlineLayer::new(FeatureKind::Point),
            lines: RedlineLayer::new(FeatureKind::Line),
            draw: DrawSurface::new(),
            staged: None,
            form: None,
            session: EditSession::Idle,
            street_view_armed: false,
        }
    }

    // --- Queries ---

    /// The layer holding features of one kind.
    #[must_use]
    pub fn layer(&self, kind: FeatureKind) -> &RedlineLayer {
        match kind {
            FeatureKind::Point => &self.points,
            FeatureKind::Line => &self.lines,
        }
    }

    /// The staged, not-yet-submitted feature, if any.
    #[must_use]
    pub fn staged(&self) -> Option<&RedlineFeature> {
        self.staged.as_ref()
    }

    /// The form currently open, if any.
    #[must_use]
    pub fn open_form(&self) -> Option<&OpenForm> {
        self.form.as_ref()
    }

    /// The current edit session.
    #[must_use]
    pub fn session(&self) -> EditSession {
        self.session
    }

    /// The drawing tool currently armed, if any.
    #[must_use]
    pub fn draw_armed(&self) -> Option<FeatureKind> {
        self.draw.armed()
    }

    /// Vertices of an in-progress line gesture, for rubber-band rendering.
    #[must_use]
    pub fn pending_vertices(&self) -> &[Coordinate] {
        self.draw.pending_vertices()
    }

    /// Look up a feature across both layers.
    #[must_use]
    pub fn find(&self, id: &LocalId) -> Option<&RedlineFeature> {
        self.points.get(id).or_else(|| self.lines.get(id))
    }

    fn layer_mut(&mut self, kind: FeatureKind) -> &mut RedlineLayer {
        match kind {
            FeatureKind::Point => &mut self.points,
            FeatureKind::Line => &mut self.lines,
        }
    }

    // --- Tools ---

    /// Arm a drawing tool, disarming the other. While armed, background
    /// click behavior (street view, edit teardown) is suppressed.
    pub fn arm_draw(&mut self, kind: FeatureKind) {
        self.draw.arm(kind);
    }

    /// Return the drawing surface to idle without an event.
    pub fn disarm_draw(&mut self) {
        self.draw.disarm();
    }

    /// Toggle the street-view crosshair. Returns the new armed state.
    pub fn toggle_street_view(&mut self) -> bool {
        self.street_view_armed = !self.street_view_armed;
        self.street_view_armed
    }

    // --- Map gestures ---

    /// A click on the map background (not on a feature).
    ///
    /// Routed to the draw gesture when a tool is armed; otherwise it tears
    /// down any active edit session and, when the crosshair is armed, asks
    /// the host for a street-view lookup.
    pub fn map_click(&mut self, coord: Coordinate) -> Vec<Action> {
        if self.draw.armed().is_some() {
            return match self.draw.click(coord) {
                Some(DrawEvent::Completed { geometry, .. }) => self.stage(geometry),
                // Line vertex appended; keep the gesture open.
                _ => vec![Action::RenderNeeded],
            };
        }

        // Background clicks always stop editing, armed or not.
        let mut actions = self.stop_editing();
        if self.street_view_armed {
            self.street_view_armed = false;
            actions.push(Action::StreetViewRequested(coord));
        }
        actions
    }

    /// Explicitly finish an in-progress line gesture. A chain shorter than
    /// two vertices stays open and nothing happens.
    pub fn finish_line(&mut self) -> Vec<Action> {
        match self.draw.finish() {
            Some(DrawEvent::Completed { geometry, .. }) => self.stage(geometry),
            _ => vec![],
        }
    }

    /// Abort the active draw gesture. Local only; nothing was sent yet.
    pub fn cancel_draw(&mut self) -> Vec<Action> {
        match self.draw.cancel() {
            Some(DrawEvent::Cancelled) => vec![Action::RenderNeeded],
            _ => vec![],
        }
    }

    // --- Pending feature buffer ---

    /// Stage a completed geometry as a draft and open the create form.
    ///
    /// Holds at most one draft: staging over an unsaved stage discards the
    /// prior one (last-write-wins).
    pub fn stage(&mut self, geometry: Geometry) -> Vec<Action> {
        if let Some(prior) = self.staged.take() {
            tracing::debug!(kind = ?prior.kind, "discarding unsaved staged feature");
        }
        let feature = RedlineFeature::draft(geometry);
        tracing::debug!(kind = ?feature.kind, local_id = %feature.local_id, "staged draft feature");
        self.staged = Some(feature);
        let fields = FormFields::default();
        self.form = Some(OpenForm { mode: FormMode::Create, target: FormTarget::Staged, fields: fields.clone() });
        vec![Action::FormOpened { mode: FormMode::Create, fields }]
    }

    // --- Attribute editor protocol ---

    /// Open the edit-mode form for an existing feature, seeded from its
    /// current attributes. Unknown ids are ignored.
    pub fn open_edit_form(&mut self, id: LocalId) -> Vec<Action> {
        let Some(feature) = self.find(&id) else {
            return vec![];
        };
        let fields = FormFields::from_attributes(&feature.attributes());
        self.form = Some(OpenForm { mode: FormMode::Edit, target: FormTarget::Existing(id), fields: fields.clone() });
        vec![Action::FormOpened { mode: FormMode::Edit, fields }]
    }

    /// Submit the open form with the field values the host read back.
    ///
    /// Create mode: merges the fields into the staged draft, moves it into
    /// its layer for optimistic rendering, and requests a store create.
    /// Edit mode: merges into the existing feature and requests a store
    /// update when the feature has a server id. Either way the form closes.
    pub fn submit_form(&mut self, fields: &FormFields) -> Vec<Action> {
        let Some(form) = self.form.take() else {
            return vec![];
        };
        match form.target {
            FormTarget::Staged => {
                let Some(mut feature) = self.staged.take() else {
                    return vec![Action::FormClosed];
                };
                fields.merge_into(&mut feature.properties);
                let request = feature.clone();
                self.layer_mut(feature.kind).add(feature);
                vec![
                    Action::RenderNeeded,
                    Action::CreateRequested { feature: request },
                    Action::FormClosed,
                ]
            }
            FormTarget::Existing(id) => {
                let Some(mut feature) = self.find(&id).cloned() else {
                    return vec![Action::FormClosed];
                };
                fields.merge_into(&mut feature.properties);
                self.layer_mut(feature.kind).update(feature.clone());
                let mut actions = vec![Action::RenderNeeded];
                if feature.is_persisted() {
                    actions.push(Action::UpdateRequested { feature });
                } else {
                    // No server id to address an update at; the change stays
                    // local and the next reconcile decides its fate.
                    tracing::debug!(local_id = %id, "edited feature not yet persisted; no update call");
                }
                actions.push(Action::FormClosed);
                actions
            }
        }
    }

    /// Dismiss the open form without submitting. A create-mode dismissal
    /// discards the staged draft.
    pub fn close_form(&mut self) -> Vec<Action> {
        let Some(form) = self.form.take() else {
            return vec![];
        };
        if form.target == FormTarget::Staged {
            self.staged = None;
        }
        vec![Action::FormClosed]
    }

    // --- Edit session ---

    /// Begin a direct-manipulation edit on a feature.
    ///
    /// Refused when editing is disabled by configuration or the feature is
    /// unknown. A prior session on a different feature is committed and
    /// stopped first.
    pub fn start_editing(&mut self, id: LocalId) -> Vec<Action> {
        if !self.config.editing_enabled {
            tracing::debug!(local_id = %id, "editing disabled by configuration");
            return vec![];
        }
        if self.find(&id).is_none() {
            return vec![];
        }
        match self.session.start(id) {
            StartOutcome::AlreadyEditing => vec![],
            StartOutcome::Started => vec![Action::EditStarted { id }],
            StartOutcome::Switched { stopped } => {
                let mut actions = self.commit_stopped(stopped);
                actions.push(Action::EditStarted { id });
                actions
            }
        }
    }

    /// End the active edit session, committing its geometry. Idempotent:
    /// with nothing active this is a no-op.
    pub fn stop_editing(&mut self) -> Vec<Action> {
        match self.session.stop() {
            None => vec![],
            Some(id) => self.commit_stopped(id),
        }
    }

    /// Report an in-place geometry change from the host's drag handles.
    /// Accepted only for the feature currently under edit, and only when
    /// the geometry keeps the feature's kind.
    pub fn set_geometry(&mut self, id: LocalId, geometry: Geometry) -> bool {
        if self.session.active() != Some(id) {
            return false;
        }
        let Some(kind) = self.find(&id).map(|f| f.kind) else {
            return false;
        };
        if FeatureKind::of(&geometry) != kind {
            return false;
        }
        self.layer_mut(kind).set_geometry(&id, geometry)
    }

    /// Commit path shared by stop, switch, and background click: update the
    /// store with the feature's current geometry (attributes untouched),
    /// then tear down the handles.
    fn commit_stopped(&mut self, id: LocalId) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(feature) = self.find(&id) {
            if feature.is_persisted() {
                actions.push(Action::UpdateRequested { feature: feature.clone() });
            }
        }
        actions.push(Action::EditStopped { id });
        actions
    }

    // --- Store feedback ---

    /// Stamp a synchronously returned server id onto the optimistic draft.
    /// Returns `false` if the draft is no longer rendered.
    pub fn confirm_create(&mut self, id: LocalId, server_id: i64) -> bool {
        self.points.assign_server_id(&id, server_id) || self.lines.assign_server_id(&id, server_id)
    }

    /// Replace a layer with the authoritative collection from a fresh
    /// fetch. Discards optimistic-only renderings; if the feature under
    /// edit vanished, the session resets without a commit.
    pub fn apply_reconcile(&mut self, kind: FeatureKind, features: Vec<RedlineFeature>) -> Vec<Action> {
        self.layer_mut(kind).reconcile(features);
        let mut actions = vec![Action::RenderNeeded];
        if let Some(active) = self.session.active() {
            if self.find(&active).is_none() {
                self.session.stop();
                actions.push(Action::EditStopped { id: active });
            }
        }
        actions
    }
}

impl Default for RedlineEngine {
    fn default() -> Self {
        Self::new(RedlineConfig::default())
    }
}
