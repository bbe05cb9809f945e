//! Screen-space text labels
//!
//! Labels are collected between `begin_scene` and `end_scene` and handed to
//! the window backend when the scene is presented.

/// Labels requested for the current frame
#[derive(Debug, Default, Clone)]
pub struct LabelOverlay {
    labels: Vec<String>,
}

impl LabelOverlay {
    /// Create an empty overlay
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all labels from the previous frame
    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Queue a label for this frame
    pub fn push(&mut self, text: impl Into<String>) {
        self.labels.push(text.into());
    }

    /// Labels queued so far, in request order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// True when no label was requested
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
