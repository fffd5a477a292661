//! Direct-manipulation edit session.
//!
//! At most one feature across both kinds may be in drag/reshape edit mode at
//! any instant. The invariant is structural: the session is a tagged union,
//! not a nullable reference, and switching features reports the feature
//! whose edit mode must be torn down first.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::feature::LocalId;

/// The edit-session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditSession {
    /// No feature under edit.
    #[default]
    Idle,
    /// Exactly one feature under direct-manipulation edit.
    Editing(LocalId),
}

/// Result of a start transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Was idle; the feature is now under edit.
    Started,
    /// The same feature was already under edit; nothing changed.
    AlreadyEditing,
    /// A different feature was under edit; its stop transition must run
    /// (commit + disable) before the new edit proceeds.
    Switched {
        /// The feature whose edit session was ended.
        stopped: LocalId,
    },
}

impl EditSession {
    /// The feature currently under edit, if any.
    #[must_use]
    pub fn active(&self) -> Option<LocalId> {
        match self {
            Self::Idle => None,
            Self::Editing(id) => Some(*id),
        }
    }

    /// Begin editing a feature, ending any prior session first.
    pub fn start(&mut self, id: LocalId) -> StartOutcome {
        match *self {
            Self::Editing(current) if current == id => StartOutcome::AlreadyEditing,
            Self::Editing(current) => {
                *self = Self::Editing(id);
                StartOutcome::Switched { stopped: current }
            }
            Self::Idle => {
                *self = Self::Editing(id);
                StartOutcome::Started
            }
        }
    }

    /// End the active session, returning the feature that was under edit.
    /// Idempotent: with nothing active this is a no-op returning `None`.
    pub fn stop(&mut self) -> Option<LocalId> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Editing(id) => Some(id),
        }
    }
}
