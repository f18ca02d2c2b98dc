//! Per-form mutable state
//!
//! A [`FormState`] is owned by the page/handler displaying the form. It maps
//! field names to current values and to current validation errors, and is
//! discarded with the page. Values are mutated only through explicit setters
//! and the validation pass.

use std::collections::HashMap;

use crate::uploads::PendingImage;

use super::registry::FormRegistry;

/// Current value of one field
#[derive(Debug, Clone, Default)]
pub enum FieldValue {
    /// No value entered yet
    #[default]
    Empty,
    /// Textual value (all non-file controls)
    Text(String),
    /// Selected file list (file controls)
    Files(Vec<PendingImage>),
}

impl FieldValue {
    /// Textual content, if any
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Empty | Self::Files(_) => None,
        }
    }

    /// Whether the value counts as absent for required-checking
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(value) => value.is_empty(),
            Self::Files(files) => files.is_empty(),
        }
    }
}

/// Mutable values and validation errors for one active form instance
#[derive(Debug, Clone, Default)]
pub struct FormState {
    values: HashMap<String, FieldValue>,
    errors: HashMap<String, String>,
}

impl FormState {
    /// Empty state with no seeded values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded from a registry's `default_value`s
    #[must_use]
    pub fn from_registry(registry: &FormRegistry) -> Self {
        let mut state = Self::new();
        for field in registry {
            if let Some(default) = field.default_value {
                state.set_text(field.name, default);
            }
        }
        state
    }

    /// Write a textual value
    pub fn set_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), FieldValue::Text(value.into()));
    }

    /// Write a selected file list
    pub fn set_files(&mut self, name: impl Into<String>, files: Vec<PendingImage>) {
        self.values.insert(name.into(), FieldValue::Files(files));
    }

    /// Current value of a field
    #[must_use]
    pub fn value_of(&self, name: &str) -> &FieldValue {
        static EMPTY: FieldValue = FieldValue::Empty;
        self.values.get(name).unwrap_or(&EMPTY)
    }

    /// Textual value of a field, empty by default
    #[must_use]
    pub fn text_of(&self, name: &str) -> &str {
        self.value_of(name).as_text().unwrap_or("")
    }

    /// First file of a field's selected file list, if any
    #[must_use]
    pub fn first_file(&self, name: &str) -> Option<&PendingImage> {
        match self.value_of(name) {
            FieldValue::Files(files) => files.first(),
            FieldValue::Empty | FieldValue::Text(_) => None,
        }
    }

    /// Existing remote image URL, used for file previews when editing
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        let url = self.text_of("imageUrl");
        if url.is_empty() { None } else { Some(url) }
    }

    /// Record a validation error for a field
    pub fn set_error(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(name.into(), message.into());
    }

    /// Current validation error for a field, absent if valid
    #[must_use]
    pub fn error_of(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Whether any field currently has an error
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Drop all recorded errors (start of a validation pass)
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Iterate `(name, value)` pairs in arbitrary order
    pub fn values(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
