//! Window backends
//!
//! ```text
//! Engine ──uses──▶ dyn WindowBackend
//!                     ├── ScriptedWindow  (null / software device, headless)
//!                     └── GlfwWindow      (OpenGL device, feature "glfw-window")
//! ```

pub mod backend;
pub mod scripted;
#[cfg(feature = "glfw-window")]
pub mod desktop;

pub use backend::{cursor_to_pixels, WindowBackend, WindowError, WindowResult};
pub use scripted::ScriptedWindow;
#[cfg(feature = "glfw-window")]
pub use desktop::GlfwWindow;
