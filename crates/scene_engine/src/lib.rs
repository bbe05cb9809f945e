//! # Scene Engine
//!
//! A small scene engine: named avatar objects, one perspective camera,
//! ray-cast picking under the mouse pointer and per-frame text labels.
//! Every engine resource is tallied in an explicit [`Counters`] context so an
//! application can prove at shutdown that nothing leaked.
//!
//! ## Features
//!
//! - **Picking**: camera ray through the cursor against per-object bounding spheres
//! - **Headless runs**: a script-driven window for tests and CI
//! - **Desktop window**: GLFW backend behind the `glfw-window` feature
//! - **Resource accounting**: acquire/release tally with a release journal
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let counters = Counters::new();
//!     let mut engine = Engine::new(EngineConfig::default(), InputScript::default(), counters.clone())?;
//!
//!     let camera = engine.create_camera()?;
//!     camera.set_position(Vec3::new(50.0, 50.0, -60.0));
//!     camera.set_target(Vec3::new(-70.0, 30.0, -60.0));
//!
//!     let mut maja = ObjectHandle::create(&mut engine, AvatarKind::Faerie, "Maja")?;
//!     Selector::new(&maja).register(&mut maja)?;
//!     maja.set_position(-90.0, -15.0, -140.0);
//!
//!     while engine.run() {
//!         if engine.window_active() {
//!             engine.begin_scene()?;
//!             if let Some(selection) = engine.selected_object() {
//!                 let name = engine.object(selection.id()).map(|o| o.name().to_string());
//!                 if let Some(name) = name {
//!                     engine.draw_label(&name)?;
//!                 }
//!             }
//!             engine.end_scene()?;
//!         } else {
//!             engine.yield_now();
//!         }
//!     }
//!
//!     drop(engine);
//!     counters.print(!counters.validate());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod diagnostics;
pub mod assets;
pub mod physics;
pub mod render;
pub mod input;
pub mod scene;

mod engine;

pub use diagnostics::Counters;
pub use engine::{
    DeviceFlags, DeviceType, Engine, EngineConfig, EngineError, WindowConfig, DEFAULT_MEDIA_PATH,
};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Engine, EngineConfig, EngineError, DeviceType, WindowConfig,
        config::{Config, ConfigError},
        diagnostics::{Counters, ResourceKind},
        foundation::math::{Vec3, Mat4, Transform},
        input::{InputFrame, InputScript},
        render::Camera,
        scene::{AvatarKind, ObjectHandle, ObjectId, Selection, Selector},
    };
}
