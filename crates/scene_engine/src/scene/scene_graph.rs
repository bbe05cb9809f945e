//! Flat scene graph of placed objects
//!
//! Objects are kept in creation order in a slot map. Picking walks every
//! pickable object and keeps the nearest hit; with a handful of avatars there
//! is no need for a spatial index.

use slotmap::SlotMap;

use crate::physics::Ray;
use crate::scene::object::{ObjectId, SceneObject};

/// Result of a successful pick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Object that was hit
    pub object: ObjectId,
    /// Distance along the ray
    pub distance: f32,
}

/// Owner of all scene objects
#[derive(Debug, Default)]
pub struct SceneGraph {
    objects: SlotMap<ObjectId, SceneObject>,
}

impl SceneGraph {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, object: SceneObject) -> ObjectId {
        self.objects.insert(object)
    }

    /// Look up an object
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the scene holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate objects in creation order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter()
    }

    /// Find an object by display name
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name() == name)
            .map(|(id, _)| id)
    }

    /// Number of objects currently highlighted
    pub fn highlighted_count(&self) -> usize {
        self.objects.values().filter(|object| object.is_highlighted()).count()
    }

    /// Nearest pickable object hit by `ray` within `max_distance`
    pub fn pick(&self, ray: &Ray, max_distance: f32) -> Option<PickHit> {
        self.objects
            .iter()
            .filter_map(|(id, object)| {
                let volume = object.pick_volume()?;
                let distance = volume.intersect_ray(ray)?;
                (distance <= max_distance).then_some(PickHit { object: id, distance })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Remove every object, newest first
    pub fn clear(&mut self) {
        let ids: Vec<ObjectId> = self.objects.keys().collect();
        for id in ids.into_iter().rev() {
            if let Some(object) = self.objects.remove(id) {
                log::debug!("Releasing object '{}'", object.name());
            }
        }
    }
}
