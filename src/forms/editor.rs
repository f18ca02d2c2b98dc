//! Rich-text editor side channel
//!
//! The editor widget itself is third-party; pages that mount one receive an
//! [`EditorHandle`] so the host can read or replace the widget's content
//! outside the normal form flow (e.g. resetting after submission).

use std::sync::Arc;

use parking_lot::RwLock;

/// Cloneable shared handle to a mounted rich-text editor's content
#[derive(Debug, Clone, Default)]
pub struct EditorHandle {
    content: Arc<RwLock<String>>,
}

impl EditorHandle {
    /// Handle with empty content
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle pre-filled with existing content (edit flows)
    #[must_use]
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Arc::new(RwLock::new(content.into())),
        }
    }

    /// Current editor content
    #[must_use]
    pub fn content(&self) -> String {
        self.content.read().clone()
    }

    /// Replace the editor content (change callback and host access)
    pub fn set_content(&self, content: impl Into<String>) {
        *self.content.write() = content.into();
    }

    /// Clear the editor content
    pub fn clear(&self) {
        self.content.write().clear();
    }
}
