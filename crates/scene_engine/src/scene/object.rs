//! Placed scene objects
//!
//! A [`SceneObject`] is stored in the engine's scene graph and addressed by an
//! [`ObjectId`]. Callers manipulate it through an [`ObjectHandle`], a
//! short-lived mutable borrow that is only available while nothing else is
//! touching the engine.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::diagnostics::{Counters, ResourceGuard};
use crate::foundation::math::{Transform, Vec3};
use crate::physics::BoundingSphere;

new_key_type! {
    /// Identity of a scene object; stable for the lifetime of the engine
    pub struct ObjectId;
}

/// The fixed set of avatar models shipped in the media directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarKind {
    /// Quake 2 faerie model
    Faerie,
    /// Animated ninja
    Ninja,
    /// DirectX dwarf
    Dwarf,
    /// Half-Life yodan
    Yodan,
}

impl AvatarKind {
    /// All kinds
    pub const ALL: [Self; 4] = [Self::Faerie, Self::Ninja, Self::Dwarf, Self::Yodan];

    /// Lowercase display name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Faerie => "faerie",
            Self::Ninja => "ninja",
            Self::Dwarf => "dwarf",
            Self::Yodan => "yodan",
        }
    }

    /// Model file name under the media root
    pub fn model_file(self) -> &'static str {
        match self {
            Self::Faerie => "faerie.md2",
            Self::Ninja => "ninja.b3d",
            Self::Dwarf => "dwarf.x",
            Self::Yodan => "yodan.mdl",
        }
    }

    /// Radius of the pick volume around the model origin, in world units
    pub fn pick_radius(self) -> f32 {
        match self {
            Self::Faerie => 24.0,
            Self::Ninja => 22.0,
            Self::Dwarf => 26.0,
            Self::Yodan => 24.0,
        }
    }
}

impl fmt::Display for AvatarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placed, named avatar in the scene graph
#[derive(Debug)]
pub struct SceneObject {
    kind: AvatarKind,
    name: String,
    model_path: PathBuf,
    transform: Transform,
    rotation_set: bool,
    highlighted: bool,
    pick_radius: Option<f32>,
    _guard: ResourceGuard,
}

impl SceneObject {
    pub(crate) fn new(kind: AvatarKind, name: String, model_path: PathBuf, guard: ResourceGuard) -> Self {
        Self {
            kind,
            name,
            model_path,
            transform: Transform::default(),
            rotation_set: false,
            highlighted: false,
            pick_radius: None,
            _guard: guard,
        }
    }

    /// Avatar model kind
    pub fn kind(&self) -> AvatarKind {
        self.kind
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model file this object was created from
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Rotation in degrees, if one was ever applied
    pub fn rotation(&self) -> Option<Vec3> {
        self.rotation_set.then_some(self.transform.rotation_degrees)
    }

    /// Full placement
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Whether the object is drawn highlighted
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Whether a selector registered a pick volume for this object
    pub fn is_pickable(&self) -> bool {
        self.pick_radius.is_some()
    }

    /// Pick volume in world space at the current position
    pub fn pick_volume(&self) -> Option<BoundingSphere> {
        self.pick_radius
            .map(|radius| BoundingSphere::new(self.transform.position, radius))
    }

    pub(crate) fn set_pick_radius(&mut self, radius: f32) {
        self.pick_radius = Some(radius);
    }
}

/// Mutable access to one scene object
///
/// Returned by [`Engine::create_object`](crate::Engine::create_object) and
/// [`Engine::object_handle`](crate::Engine::object_handle).
#[derive(Debug)]
pub struct ObjectHandle<'e> {
    id: ObjectId,
    object: &'e mut SceneObject,
    counters: &'e Counters,
}

impl<'e> ObjectHandle<'e> {
    pub(crate) fn new(id: ObjectId, object: &'e mut SceneObject, counters: &'e Counters) -> Self {
        Self { id, object, counters }
    }

    /// Create a new avatar in the engine's scene
    ///
    /// Fails with [`EngineError::InvalidAssetPath`](crate::EngineError::InvalidAssetPath)
    /// when the model file for `kind` is missing under the media root.
    pub fn create(
        engine: &'e mut crate::Engine,
        kind: AvatarKind,
        name: &str,
    ) -> Result<Self, crate::EngineError> {
        engine.create_object(kind, name)
    }

    /// Identity of the object
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Avatar model kind
    pub fn kind(&self) -> AvatarKind {
        self.object.kind
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.object.name
    }

    /// Move the object
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.object.transform.position = Vec3::new(x, y, z);
        log::trace!("'{}' positioned at ({}, {}, {})", self.object.name, x, y, z);
        self
    }

    /// Rotate the object; angles in degrees
    pub fn set_rotation(&mut self, rx: f32, ry: f32, rz: f32) -> &mut Self {
        self.object.transform.rotation_degrees = Vec3::new(rx, ry, rz);
        self.object.rotation_set = true;
        log::trace!("'{}' rotated to ({}, {}, {})", self.object.name, rx, ry, rz);
        self
    }

    /// Turn the highlight on or off
    pub fn highlight(&mut self, on: bool) -> &mut Self {
        self.object.highlighted = on;
        self
    }

    /// Read-only view of the object
    pub fn object(&self) -> &SceneObject {
        self.object
    }

    pub(crate) fn object_mut(&mut self) -> &mut SceneObject {
        self.object
    }

    pub(crate) fn counters(&self) -> &Counters {
        self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ResourceKind;

    fn object(kind: AvatarKind, name: &str, counters: &Counters) -> SceneObject {
        SceneObject::new(
            kind,
            name.to_string(),
            PathBuf::from(kind.model_file()),
            counters.acquire(ResourceKind::Object, name),
        )
    }

    #[test]
    fn test_rotation_is_none_until_applied() {
        let counters = Counters::new();
        let mut faerie = object(AvatarKind::Faerie, "Maja", &counters);
        let mut handle = ObjectHandle::new(ObjectId::default(), &mut faerie, &counters);

        handle.set_position(-90.0, -15.0, -140.0);
        assert_eq!(handle.object().position(), Vec3::new(-90.0, -15.0, -140.0));
        assert_eq!(handle.object().rotation(), None);

        handle.set_rotation(0.0, -90.0, 0.0);
        assert_eq!(handle.object().rotation(), Some(Vec3::new(0.0, -90.0, 0.0)));
    }

    #[test]
    fn test_pick_volume_follows_position() {
        let counters = Counters::new();
        let mut dwarf = object(AvatarKind::Dwarf, "Placek", &counters);
        assert!(dwarf.pick_volume().is_none());

        dwarf.set_pick_radius(AvatarKind::Dwarf.pick_radius());
        ObjectHandle::new(ObjectId::default(), &mut dwarf, &counters).set_position(-70.0, -66.0, -30.0);

        let volume = dwarf.pick_volume().unwrap();
        assert_eq!(volume.center, Vec3::new(-70.0, -66.0, -30.0));
        assert_eq!(volume.radius, 26.0);
    }

    #[test]
    fn test_dropping_object_releases_it() {
        let counters = Counters::new();
        let yodan = object(AvatarKind::Yodan, "Reksio", &counters);
        assert_eq!(counters.live(ResourceKind::Object), 1);

        drop(yodan);
        assert!(counters.validate());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(ron::to_string(&AvatarKind::Ninja).unwrap(), "ninja");
        assert_eq!(AvatarKind::Ninja.to_string(), "ninja");
    }
}
