//! In-memory redline layer: one collection per feature kind.
//!
//! The layer exclusively owns its features. `add` is optimistic: the
//! feature renders before the server confirms it. `reconcile` replaces
//! the whole collection with a fresh authoritative fetch, which is how
//! optimistic pre-confirmation renderings are discarded.

#[cfg(test)]
#[path = "layer_test.rs"]
mod layer_test;

use std::collections::HashMap;

use crate::feature::{FeatureKind, LocalId, RedlineFeature};
use crate::geom::Geometry;

/// The rendered redline features of one kind.
pub struct RedlineLayer {
    kind: FeatureKind,
    features: HashMap<LocalId, RedlineFeature>,
}

impl RedlineLayer {
    /// Create an empty layer for one feature kind.
    #[must_use]
    pub fn new(kind: FeatureKind) -> Self {
        Self { kind, features: HashMap::new() }
    }

    /// The kind this layer holds.
    #[must_use]
    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    /// Insert a feature for immediate rendering. Returns `false` if the
    /// feature's kind does not match this layer.
    pub fn add(&mut self, feature: RedlineFeature) -> bool {
        if feature.kind != self.kind {
            return false;
        }
        self.features.insert(feature.local_id, feature);
        true
    }

    /// Replace a single feature in place (re-render without a full
    /// reconcile). Returns `false` if it is not present or the kind differs.
    pub fn update(&mut self, feature: RedlineFeature) -> bool {
        if feature.kind != self.kind || !self.features.contains_key(&feature.local_id) {
            return false;
        }
        self.features.insert(feature.local_id, feature);
        true
    }

    /// Look up a feature by local id.
    #[must_use]
    pub fn get(&self, id: &LocalId) -> Option<&RedlineFeature> {
        self.features.get(id)
    }

    /// Stamp a server-assigned id onto a draft. Returns `false` if the
    /// feature is not present.
    pub fn assign_server_id(&mut self, id: &LocalId, server_id: i64) -> bool {
        let Some(feature) = self.features.get_mut(id) else {
            return false;
        };
        feature.server_id = Some(server_id);
        true
    }

    /// Replace an in-place geometry during a direct-manipulation edit.
    /// Returns `false` if the feature is not present.
    pub fn set_geometry(&mut self, id: &LocalId, geometry: Geometry) -> bool {
        let Some(feature) = self.features.get_mut(id) else {
            return false;
        };
        feature.geometry = geometry;
        true
    }

    /// Replace the whole collection with a fresh authoritative fetch.
    /// Features of the wrong kind are dropped.
    pub fn reconcile(&mut self, features: Vec<RedlineFeature>) {
        self.features.clear();
        for feature in features {
            if feature.kind == self.kind {
                self.features.insert(feature.local_id, feature);
            }
        }
    }

    /// All features in deterministic render order: persisted features by
    /// server id first, drafts last by local id.
    #[must_use]
    pub fn sorted_features(&self) -> Vec<&RedlineFeature> {
        let mut features: Vec<&RedlineFeature> = self.features.values().collect();
        features.sort_by(|a, b| {
            match (a.server_id, b.server_id) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.local_id.cmp(&b.local_id),
            }
        });
        features
    }

    /// Number of features currently rendered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if the layer renders nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
