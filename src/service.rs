//! Async glue between the engine and the remote feature store.
//!
//! DESIGN
//! ======
//! The host calls an engine entry point, hands the resulting actions to
//! [`RedlineService::dispatch`], and executes whatever presentation actions
//! come back. The service runs on the single UI task: every store call is
//! awaited in turn, nothing is locked, and nothing in flight is cancelled.
//! Optimistic rendering in the engine is what hides the create round-trip
//! latency from the user.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures are logged and swallowed, the baseline contract for
//! this low-stakes annotation tool. A failed create leaves the optimistic
//! feature rendered and unconfirmed until the next reconcile; a failed
//! update leaves local state ahead of the server.

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;

use tracing::{info, warn};

use crate::engine::{Action, RedlineEngine};
use crate::feature::{FeatureKind, RedlineFeature};
use crate::store::FeatureStore;
use crate::wire::WireFeature;

/// Executes engine actions against a feature store.
pub struct RedlineService<S> {
    engine: RedlineEngine,
    store: S,
}

impl<S: FeatureStore> RedlineService<S> {
    #[must_use]
    pub fn new(engine: RedlineEngine, store: S) -> Self {
        Self { engine, store }
    }

    /// The engine, for input routing and queries.
    #[must_use]
    pub fn engine(&self) -> &RedlineEngine {
        &self.engine
    }

    /// Mutable engine access for input routing.
    pub fn engine_mut(&mut self) -> &mut RedlineEngine {
        &mut self.engine
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Execute the network-bound actions in a batch, returning any
    /// follow-up presentation actions (re-renders and session teardowns
    /// caused by reconciles) for the host.
    pub async fn dispatch(&mut self, actions: &[Action]) -> Vec<Action> {
        let mut follow_ups = Vec::new();
        for action in actions {
            match action {
                Action::CreateRequested { feature } => {
                    follow_ups.extend(self.create(feature).await);
                }
                Action::UpdateRequested { feature } => {
                    self.update(feature).await;
                }
                _ => {}
            }
        }
        follow_ups
    }

    /// Refresh a layer from the authoritative collection. Features the
    /// server hands back malformed are skipped, not fatal.
    pub async fn reconcile(&mut self, kind: FeatureKind) -> Vec<Action> {
        match self.store.query(kind).await {
            Ok(wires) => {
                let mut features = Vec::with_capacity(wires.len());
                for wire in wires {
                    match wire.into_feature() {
                        Ok(feature) => features.push(feature),
                        Err(e) => warn!(?kind, error = %e, "skipping malformed feature from query"),
                    }
                }
                info!(?kind, count = features.len(), "reconciled layer from feature service");
                self.engine.apply_reconcile(kind, features)
            }
            Err(e) => {
                warn!(?kind, error = %e, "query failed; keeping current rendering");
                vec![]
            }
        }
    }

    async fn create(&mut self, feature: &RedlineFeature) -> Vec<Action> {
        let wire = WireFeature::from_feature(feature);
        match self.store.create(feature.kind, &wire).await {
            Ok(resp) => {
                if let Some(server_id) = resp.id {
                    self.engine.confirm_create(feature.local_id, server_id);
                }
                // The create's server-side effect is a changed collection;
                // replace the optimistic rendering with the confirmed one.
                self.reconcile(feature.kind).await
            }
            Err(e) => {
                warn!(kind = ?feature.kind, error = %e, "create failed; feature stays optimistic until next reconcile");
                vec![]
            }
        }
    }

    async fn update(&mut self, feature: &RedlineFeature) {
        let wire = WireFeature::from_feature(feature);
        if let Err(e) = self.store.update(feature.kind, &wire).await {
            warn!(kind = ?feature.kind, server_id = ?feature.server_id, error = %e, "update failed; local state ahead of server");
        }
    }
}
