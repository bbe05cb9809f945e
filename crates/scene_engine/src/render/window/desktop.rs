//! Desktop window backed by GLFW
//!
//! Opens an OpenGL-capable window, swaps buffers on present and shows the
//! frame's labels in the title bar. Escape closes the window.

use glfw::Context;

use crate::engine::WindowConfig;
use crate::render::window::backend::{cursor_to_pixels, WindowBackend, WindowError, WindowResult};

/// GLFW window wrapper
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    title: String,
    shown_labels: Vec<String>,
}

impl GlfwWindow {
    /// Open a window according to `config`
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{:?}", e)))?;

        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::OpenGl));
        glfw.window_hint(glfw::WindowHint::Resizable(true));
        glfw.window_hint(glfw::WindowHint::StencilBits(config.stencil_buffer.then_some(8)));
        let channel_bits = if config.color_depth >= 24 { 8 } else { 5 };
        glfw.window_hint(glfw::WindowHint::RedBits(Some(channel_bits)));
        glfw.window_hint(glfw::WindowHint::GreenBits(Some(channel_bits)));
        glfw.window_hint(glfw::WindowHint::BlueBits(Some(channel_bits)));

        let created = if config.fullscreen {
            glfw.with_primary_monitor(|glfw, monitor| {
                let mode = monitor.map_or(glfw::WindowMode::Windowed, |m| glfw::WindowMode::FullScreen(m));
                glfw.create_window(config.width, config.height, &config.title, mode)
            })
        } else {
            glfw.create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
        };
        let (mut window, events) = created.ok_or_else(|| {
            WindowError::CreationFailed(format!("{}x{} '{}'", config.width, config.height, config.title))
        })?;

        window.make_current();
        let interval = if config.vsync { glfw::SwapInterval::Sync(1) } else { glfw::SwapInterval::None };
        glfw.set_swap_interval(interval);

        window.set_key_polling(true);
        window.set_close_polling(true);

        log::info!("Opened {}x{} GLFW window '{}'", config.width, config.height, config.title);

        Ok(Self {
            glfw,
            window,
            events,
            title: config.title.clone(),
            shown_labels: Vec::new(),
        })
    }
}

impl WindowBackend for GlfwWindow {
    fn name(&self) -> &'static str {
        "glfw"
    }

    fn pump_events(&mut self) -> bool {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            if let glfw::WindowEvent::Key(glfw::Key::Escape, _, glfw::Action::Press, _) = event {
                self.window.set_should_close(true);
            }
        }
        !self.window.should_close()
    }

    fn is_active(&self) -> bool {
        self.window.is_focused() && !self.window.is_iconified()
    }

    fn cursor_position(&self) -> Option<(f64, f64)> {
        // GLFW reports the cursor in screen coordinates, the drawable is in pixels
        cursor_to_pixels(
            self.window.get_cursor_pos(),
            self.window.get_size(),
            self.window.get_framebuffer_size(),
        )
    }

    fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn begin_frame(&mut self) -> WindowResult<()> {
        if self.window.is_iconified() && self.size() == (0, 0) {
            return Err(WindowError::DeviceLost);
        }
        Ok(())
    }

    fn present(&mut self, labels: &[String]) -> WindowResult<()> {
        if labels != self.shown_labels.as_slice() {
            let title = if labels.is_empty() {
                self.title.clone()
            } else {
                format!("{} - {}", self.title, labels.join(", "))
            };
            self.window.set_title(&title);
            self.shown_labels = labels.to_vec();
        }
        self.window.swap_buffers();
        Ok(())
    }
}
