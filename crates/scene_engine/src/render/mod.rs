//! Camera, screen overlay and window backends
//!
//! The engine does not rasterise; this module holds the view state that
//! picking needs, the labels that are presented each frame and the windows
//! they are presented to.

pub mod camera;
pub mod overlay;
pub mod window;

pub use camera::Camera;
pub use overlay::LabelOverlay;
pub use window::{ScriptedWindow, WindowBackend, WindowError};
