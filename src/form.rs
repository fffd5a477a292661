//! Attribute editor protocol types.
//!
//! The form itself is rendered by the host; this module only defines the
//! value types that cross the boundary: the mode a form opened in, the three
//! field values read back on submit, and which feature a form targets. Field
//! values are plain strings; empty is legal and nothing is validated.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use serde::{Deserialize, Serialize};

use crate::feature::{Attributes, LocalId};

/// Which form variant the host should present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Blank fields for a freshly staged feature.
    Create,
    /// Fields pre-filled from the feature's current attributes.
    Edit,
}

/// The feature a form is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    /// The engine's staged, not-yet-submitted feature.
    Staged,
    /// An existing feature in a layer.
    Existing(LocalId),
}

/// The three named field values of the attribute form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub name: String,
    pub date: String,
    pub comments: String,
}

impl FormFields {
    /// Seed edit-mode fields from a feature's attributes; missing keys
    /// render blank.
    #[must_use]
    pub fn from_attributes(attrs: &Attributes<'_>) -> Self {
        Self {
            name: attrs.name().to_owned(),
            date: attrs.date().to_owned(),
            comments: attrs.comments().to_owned(),
        }
    }

    /// Write the three fields into a feature's attribute bag, preserving
    /// any unrecognized keys already present.
    pub fn merge_into(&self, properties: &mut serde_json::Value) {
        if !properties.is_object() {
            *properties = serde_json::json!({});
        }
        if let Some(map) = properties.as_object_mut() {
            map.insert("name".to_owned(), serde_json::Value::String(self.name.clone()));
            map.insert("date".to_owned(), serde_json::Value::String(self.date.clone()));
            map.insert("comments".to_owned(), serde_json::Value::String(self.comments.clone()));
        }
    }
}

/// A form the host currently has open.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenForm {
    /// Create (blank) or edit (pre-filled).
    pub mode: FormMode,
    /// Staged draft or existing feature.
    pub target: FormTarget,
    /// Seed values at open time.
    pub fields: FormFields,
}
