//! Per-frame selected-object references

use crate::diagnostics::{Counters, ResourceGuard, ResourceKind};
use crate::scene::object::ObjectId;

/// Snapshot of the object under the pointer
///
/// Each call to [`Engine::selected_object`](crate::Engine::selected_object)
/// hands out a fresh reference. Two references are the same selection when
/// their [`id`](Self::id)s are equal. Dropping a reference releases it.
#[derive(Debug)]
pub struct Selection {
    id: ObjectId,
    _guard: ResourceGuard,
}

impl Selection {
    /// Create a tracked reference to `id`
    pub fn new(id: ObjectId, counters: &Counters) -> Self {
        Self {
            id,
            _guard: counters.acquire(ResourceKind::Selection, format!("{:?}", id)),
        }
    }

    /// Identity of the selected object
    pub fn id(&self) -> ObjectId {
        self.id
    }
}
