//! Scene objects, selectors and selection references
//!
//! ## Lifecycle
//!
//! ```text
//! Engine::create_object ──> ObjectHandle ──> Selector::new ──> Selector::register
//!                                │                                   │
//!                          position/rotation                 pick volume installed
//! ```
//!
//! The engine owns every [`SceneObject`]; applications keep the [`ObjectId`]
//! and borrow an [`ObjectHandle`] when they need to change something.

pub mod object;
pub mod scene_graph;
pub mod selection;
pub mod selector;

pub use object::{AvatarKind, ObjectHandle, ObjectId, SceneObject};
pub use scene_graph::{PickHit, SceneGraph};
pub use selection::Selection;
pub use selector::Selector;
