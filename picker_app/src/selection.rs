//! Highlight and label the object under the pointer

use scene_engine::{Engine, EngineError};
use scene_engine::scene::{ObjectId, Selection};

/// What the tracker needs from the engine
pub trait SelectionTarget {
    /// Turn an object's highlight on or off
    fn highlight(&mut self, id: ObjectId, on: bool) -> Result<(), EngineError>;

    /// Display name of an object
    fn object_name(&self, id: ObjectId) -> Option<String>;

    /// Queue a label for the current frame
    fn draw_label(&mut self, text: &str) -> Result<(), EngineError>;
}

impl SelectionTarget for Engine {
    fn highlight(&mut self, id: ObjectId, on: bool) -> Result<(), EngineError> {
        Engine::highlight(self, id, on)
    }

    fn object_name(&self, id: ObjectId) -> Option<String> {
        self.object(id).map(|object| object.name().to_string())
    }

    fn draw_label(&mut self, text: &str) -> Result<(), EngineError> {
        Engine::draw_label(self, text)
    }
}

/// Keeps at most one object highlighted: the current selection
#[derive(Debug, Default)]
pub struct SelectionTracker {
    current: Option<Selection>,
    visited: Vec<ObjectId>,
}

impl SelectionTracker {
    /// Create a tracker with nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply this frame's selection
    ///
    /// A repeated selection causes no highlight calls. On a change the old
    /// object is un-highlighted before the new one is highlighted. The
    /// selected object's name is drawn as a label every frame.
    pub fn update<T>(&mut self, target: &mut T, next: Option<Selection>) -> Result<(), EngineError>
    where
        T: SelectionTarget + ?Sized,
    {
        let unchanged = self.current.as_ref().map(Selection::id) == next.as_ref().map(Selection::id);
        if !unchanged {
            if let Some(previous) = self.current.take() {
                target.highlight(previous.id(), false)?;
            }
            if let Some(selection) = &next {
                target.highlight(selection.id(), true)?;
                if !self.visited.contains(&selection.id()) {
                    self.visited.push(selection.id());
                }
            }
            self.current = next;
        }

        if let Some(id) = self.current() {
            if let Some(name) = target.object_name(id) {
                target.draw_label(&name)?;
            }
        }
        Ok(())
    }

    /// Currently selected object
    pub fn current(&self) -> Option<ObjectId> {
        self.current.as_ref().map(Selection::id)
    }

    /// Every object selected so far, in order of first selection
    pub fn visited(&self) -> &[ObjectId] {
        &self.visited
    }

    /// Drop the held selection; returns whether there was one
    pub fn release(&mut self) -> bool {
        self.current.take().is_some()
    }
}
