//! Core engine implementation
//!
//! The [`Engine`] owns the window, the scene, the camera and the label
//! overlay. A frame looks like this:
//!
//! ```text
//! run() ── pump window events, update cursor, pick the hovered object
//!   │
//!   ├─ window_active() ── begin_scene() ── selected_object() / draw_label() ── end_scene()
//!   │
//!   └─ otherwise ──────── yield_now()
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::{AssetError, AssetResolver, LabelFont};
use crate::assets::font::LABEL_FONT_FILE;
use crate::config::{Config, ConfigError};
use crate::diagnostics::{Counters, ResourceGuard, ResourceKind};
use crate::foundation::math::Vec3;
use crate::foundation::time::FrameTimer;
use crate::input::{InputScript, Laser, MouseState};
use crate::render::window::{ScriptedWindow, WindowBackend, WindowError};
use crate::render::{Camera, LabelOverlay};
use crate::scene::{AvatarKind, ObjectHandle, ObjectId, SceneGraph, SceneObject, Selection};

/// Media root used when no configuration says otherwise
pub const DEFAULT_MEDIA_PATH: &str = match option_env!("WORKSHOP_MEDIA_PATH") {
    Some(path) => path,
    None => "media",
};

/// Rendering device selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// Headless, script-driven window
    Null,
    /// Headless like `Null`, reported as a software renderer
    Software,
    /// Desktop OpenGL window; requires the `glfw-window` feature
    #[serde(rename = "opengl")]
    OpenGl,
}

impl DeviceType {
    /// Best device compiled into this build
    pub fn preferred() -> Self {
        if cfg!(feature = "glfw-window") {
            Self::OpenGl
        } else {
            Self::Software
        }
    }
}

impl Default for DeviceType {
    fn default() -> Self {
        Self::preferred()
    }
}

bitflags::bitflags! {
    /// Device creation flags derived from the window configuration
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DeviceFlags: u8 {
        /// Allocate a stencil buffer
        const STENCIL = 1;
        /// Synchronise presentation with the display refresh
        const VSYNC = 1 << 1;
        /// Take over the primary monitor
        const FULLSCREEN = 1 << 2;
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width
    pub width: u32,

    /// Window height
    pub height: u32,

    /// Color depth in bits per pixel
    pub color_depth: u8,

    /// Whether to start in fullscreen
    pub fullscreen: bool,

    /// Whether to allocate a stencil buffer
    pub stencil_buffer: bool,

    /// VSync setting
    pub vsync: bool,
}

impl WindowConfig {
    /// Device flags for this window
    pub fn flags(&self) -> DeviceFlags {
        let mut flags = DeviceFlags::empty();
        flags.set(DeviceFlags::STENCIL, self.stencil_buffer);
        flags.set(DeviceFlags::VSYNC, self.vsync);
        flags.set(DeviceFlags::FULLSCREEN, self.fullscreen);
        flags
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Avatar Picker".to_string(),
            width: 800,
            height: 600,
            color_depth: 32,
            fullscreen: false,
            stencil_buffer: true,
            vsync: true,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding the font and model files
    pub media_path: PathBuf,

    /// Window configuration
    pub window: WindowConfig,

    /// Rendering device
    pub device: DeviceType,

    /// How long `yield_now` sleeps while the window is inactive
    pub idle_sleep_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            media_path: PathBuf::from(DEFAULT_MEDIA_PATH),
            window: WindowConfig::default(),
            device: DeviceType::default(),
            idle_sleep_ms: 5,
        }
    }
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Check values serde cannot check
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} has a zero dimension",
                self.window.width, self.window.height
            )));
        }
        if !matches!(self.window.color_depth, 16 | 24 | 32) {
            return Err(ConfigError::Invalid(format!(
                "color depth {} is not one of 16, 24, 32",
                self.window.color_depth
            )));
        }
        if self.media_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("media path is empty".to_string()));
        }
        Ok(())
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// A required asset file is missing
    #[error("Invalid asset path: {}", path.display())]
    InvalidAssetPath {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// The requested device is not available in this build
    #[error("Unsupported device type: {0:?}")]
    UnsupportedDevice(DeviceType),

    /// The camera could not be created or is missing
    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    /// Position and target do not define a view direction
    #[error("Degenerate camera: position {position:?} and target {target:?} do not define a view")]
    DegenerateCamera {
        /// Camera position
        position: Vec3,
        /// Camera target
        target: Vec3,
    },

    /// No object with this id exists
    #[error("Unknown object {0:?}")]
    UnknownObject(ObjectId),

    /// The object could not be created
    #[error("Object creation failed: {0}")]
    ObjectCreation(String),

    /// An operation was called out of order
    #[error("Invalid scene state: {0}")]
    SceneState(String),

    /// The rendering device went away
    #[error("Rendering device lost")]
    DeviceLost,

    /// Window system error
    #[error("Window error: {0}")]
    Window(#[source] WindowError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl From<WindowError> for EngineError {
    fn from(error: WindowError) -> Self {
        match error {
            WindowError::DeviceLost => Self::DeviceLost,
            other => Self::Window(other),
        }
    }
}

impl From<AssetError> for EngineError {
    fn from(error: AssetError) -> Self {
        match error {
            AssetError::NotFound { path } => Self::InvalidAssetPath { path },
            AssetError::LoadFailed { path, reason } => {
                Self::InitializationFailed(format!("{}: {}", path.display(), reason))
            }
        }
    }
}

struct CameraSlot {
    camera: Camera,
    _guard: ResourceGuard,
}

/// Main engine struct
///
/// Single-threaded. Dropping the engine releases the scene objects newest
/// first and then the engine itself.
pub struct Engine {
    window: Box<dyn WindowBackend>,
    assets: AssetResolver,
    scene: SceneGraph,
    camera: Option<CameraSlot>,
    mouse: MouseState,
    laser: Laser,
    hovered: Option<ObjectId>,
    overlay: LabelOverlay,
    in_scene: bool,
    timer: FrameTimer,
    config: EngineConfig,
    counters: Counters,
    guard: Option<ResourceGuard>,
}

impl Engine {
    /// Create an engine with the window backend chosen by `config.device`
    ///
    /// The headless devices play back `input`; the OpenGL device ignores it.
    pub fn new(config: EngineConfig, input: InputScript, counters: Counters) -> Result<Self, EngineError> {
        config.validate()?;

        let window: Box<dyn WindowBackend> = match config.device {
            DeviceType::Null | DeviceType::Software => {
                Box::new(ScriptedWindow::new(input, config.window.width, config.window.height))
            }
            DeviceType::OpenGl => Self::open_desktop_window(&config.window)?,
        };

        Self::with_window(config, window, counters)
    }

    #[cfg(feature = "glfw-window")]
    fn open_desktop_window(config: &WindowConfig) -> Result<Box<dyn WindowBackend>, EngineError> {
        Ok(Box::new(crate::render::window::GlfwWindow::new(config)?))
    }

    #[cfg(not(feature = "glfw-window"))]
    fn open_desktop_window(_config: &WindowConfig) -> Result<Box<dyn WindowBackend>, EngineError> {
        log::error!("OpenGL device requested but this build has no desktop window support");
        Err(EngineError::UnsupportedDevice(DeviceType::OpenGl))
    }

    /// Create an engine on top of an existing window backend
    pub fn with_window(
        config: EngineConfig,
        window: Box<dyn WindowBackend>,
        counters: Counters,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!(
            "Initializing engine: {:?} device, {} window {}x{}x{}, flags {:?}",
            config.device,
            window.name(),
            config.window.width,
            config.window.height,
            config.window.color_depth,
            config.window.flags()
        );

        let assets = AssetResolver::new(&config.media_path);
        if !assets.media_root().is_dir() {
            log::error!("Media directory {:?} does not exist", assets.media_root());
        }
        let font = LabelFont::from_file(assets.resolve(LABEL_FONT_FILE)?)?;

        let (width, height) = window.size();
        let mouse = MouseState::new(width, height);
        let laser = Laser::new(Camera::for_viewport(width, height).far);

        let guard = counters.acquire(ResourceKind::Engine, "engine");
        log::info!(
            "Engine ready, media root {:?}, label font {}x{}",
            assets.media_root(),
            font.width,
            font.height
        );

        Ok(Self {
            window,
            assets,
            scene: SceneGraph::new(),
            camera: None,
            mouse,
            laser,
            hovered: None,
            overlay: LabelOverlay::new(),
            in_scene: false,
            timer: FrameTimer::new(),
            config,
            counters,
            guard: Some(guard),
        })
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Diagnostic counters this engine reports to
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    /// Media root directory
    pub fn media_root(&self) -> &Path {
        self.assets.media_root()
    }

    /// Frame statistics
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    // Camera

    /// Create the scene camera
    ///
    /// Fails when a camera already exists.
    pub fn create_camera(&mut self) -> Result<&mut Camera, EngineError> {
        if self.camera.is_some() {
            return Err(EngineError::CameraUnavailable("a camera already exists".to_string()));
        }
        let (width, height) = self.window.size();
        let slot = self.camera.insert(CameraSlot {
            camera: Camera::for_viewport(width, height),
            _guard: self.counters.acquire(ResourceKind::Camera, "camera"),
        });
        log::debug!("Camera created for {}x{} viewport", width, height);
        Ok(&mut slot.camera)
    }

    /// The scene camera, if created
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref().map(|slot| &slot.camera)
    }

    /// Mutable access to the scene camera
    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.camera.as_mut().map(|slot| &mut slot.camera)
    }

    /// Remove the camera; returns whether one existed
    pub fn destroy_camera(&mut self) -> bool {
        let existed = self.camera.take().is_some();
        if existed {
            log::debug!("Camera released");
        }
        existed
    }

    /// Check that a camera exists and defines a usable view
    pub fn validate_camera(&self) -> Result<(), EngineError> {
        let camera = self
            .camera()
            .ok_or_else(|| EngineError::CameraUnavailable("no camera was created".to_string()))?;
        if camera.has_valid_view() {
            Ok(())
        } else {
            Err(EngineError::DegenerateCamera {
                position: camera.position,
                target: camera.target,
            })
        }
    }

    // Objects

    /// Load an avatar model and place it at the origin
    pub fn create_object(&mut self, kind: AvatarKind, name: &str) -> Result<ObjectHandle<'_>, EngineError> {
        if name.trim().is_empty() {
            return Err(EngineError::ObjectCreation(format!("{} object has an empty name", kind)));
        }
        if self.scene.find_by_name(name).is_some() {
            return Err(EngineError::ObjectCreation(format!("an object named '{}' already exists", name)));
        }

        let model_path = self.assets.resolve(kind.model_file())?;
        let guard = self.counters.acquire(ResourceKind::Object, name);
        let id = self.scene.insert(SceneObject::new(kind, name.to_string(), model_path, guard));
        log::info!("Created {} '{}'", kind, name);

        self.object_handle(id)
    }

    /// Mutable handle to an existing object
    pub fn object_handle(&mut self, id: ObjectId) -> Result<ObjectHandle<'_>, EngineError> {
        let object = self.scene.get_mut(id).ok_or(EngineError::UnknownObject(id))?;
        Ok(ObjectHandle::new(id, object, &self.counters))
    }

    /// Look up an object
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.scene.get(id)
    }

    /// All placed objects
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Turn an object's highlight on or off
    pub fn highlight(&mut self, id: ObjectId, on: bool) -> Result<(), EngineError> {
        self.object_handle(id)?.highlight(on);
        log::debug!("Highlight {:?} -> {}", id, on);
        Ok(())
    }

    // Frame loop

    /// Process one frame of window events
    ///
    /// Returns `false` once the window was closed.
    pub fn run(&mut self) -> bool {
        if !self.window.pump_events() {
            log::info!("Window closed");
            return false;
        }

        let (width, height) = self.window.size();
        self.mouse.update_window_size(width, height);
        self.mouse.update_position(self.window.cursor_position());
        if height > 0 {
            if let Some(camera) = self.camera_mut() {
                camera.set_aspect_ratio(width as f32 / height as f32);
            }
        }

        self.hovered = self.object_under_cursor();
        true
    }

    fn object_under_cursor(&self) -> Option<ObjectId> {
        let camera = self.camera()?;
        let ray = self.laser.cast(camera, &self.mouse)?;
        let hit = self.scene.pick(&ray, self.laser.max_distance)?;
        log::trace!("Pointer over {:?} at distance {:.1}", hit.object, hit.distance);
        Some(hit.object)
    }

    /// Whether the window has focus and is not minimized
    pub fn window_active(&self) -> bool {
        self.window.is_active()
    }

    /// Start drawing a frame
    pub fn begin_scene(&mut self) -> Result<(), EngineError> {
        if self.in_scene {
            return Err(EngineError::SceneState("begin_scene called twice".to_string()));
        }
        self.window.begin_frame().map_err(|e| {
            log::error!("begin_scene failed: {}", e);
            EngineError::from(e)
        })?;
        self.overlay.clear();
        self.in_scene = true;
        Ok(())
    }

    /// Object under the pointer this frame
    ///
    /// Every call returns a new tracked reference.
    pub fn selected_object(&self) -> Option<Selection> {
        self.hovered
            .filter(|id| self.scene.get(*id).is_some())
            .map(|id| Selection::new(id, &self.counters))
    }

    /// Queue a label for the current frame
    pub fn draw_label(&mut self, text: &str) -> Result<(), EngineError> {
        if !self.in_scene {
            return Err(EngineError::SceneState("draw_label outside begin_scene/end_scene".to_string()));
        }
        self.overlay.push(text);
        Ok(())
    }

    /// Finish and present the current frame
    pub fn end_scene(&mut self) -> Result<(), EngineError> {
        if !self.in_scene {
            return Err(EngineError::SceneState("end_scene without begin_scene".to_string()));
        }
        self.in_scene = false;
        self.window.present(self.overlay.labels())?;
        self.timer.frame_rendered();
        Ok(())
    }

    /// Give up the rest of the frame while the window is inactive
    pub fn yield_now(&mut self) {
        std::thread::sleep(Duration::from_millis(self.config.idle_sleep_ms));
        self.timer.frame_idle();
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if self.camera.take().is_some() {
            log::warn!("Camera still alive at engine shutdown");
        }
        self.scene.clear();
        log::info!(
            "Engine shutdown: {} frames rendered, {} idle, {:.1} fps average",
            self.timer.rendered_frames(),
            self.timer.idle_frames(),
            self.timer.average_fps()
        );
        if let Some(guard) = self.guard.take() {
            guard.release();
        }
    }
}
