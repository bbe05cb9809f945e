//! Backend-agnostic window trait
//!
//! The engine drives whatever window it was given through this trait: once
//! per frame it pumps events, reads focus and cursor state, brackets the
//! scene and presents the frame's labels.

use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing system could not be initialised
    #[error("Window system initialization failed: {0}")]
    InitializationFailed(String),

    /// The window itself could not be created
    #[error("Window creation failed: {0}")]
    CreationFailed(String),

    /// The rendering device went away
    #[error("Rendering device lost")]
    DeviceLost,
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Interface every window backend implements
///
/// Backends are single-threaded; the engine calls them from the thread that
/// created them.
pub trait WindowBackend {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Process pending window events
    ///
    /// Returns `false` once the window was closed; the render loop ends.
    fn pump_events(&mut self) -> bool;

    /// Whether the window has focus and is not minimized
    fn is_active(&self) -> bool;

    /// Cursor position in the same pixels as [`size`](Self::size); `None`
    /// when outside the window
    fn cursor_position(&self) -> Option<(f64, f64)>;

    /// Current drawable size in pixels
    fn size(&self) -> (u32, u32);

    /// Prepare the device for a new frame
    fn begin_frame(&mut self) -> WindowResult<()>;

    /// Show the finished frame with its labels
    fn present(&mut self, labels: &[String]) -> WindowResult<()>;
}

/// Convert a cursor position from window coordinates to drawable pixels
///
/// On HiDPI displays the drawable is larger than the window by the content
/// scale. Returns `None` when the cursor is outside the window or the window
/// has no area.
pub fn cursor_to_pixels(
    cursor: (f64, f64),
    window_size: (i32, i32),
    framebuffer_size: (i32, i32),
) -> Option<(f64, f64)> {
    let (x, y) = cursor;
    let (window_width, window_height) = (f64::from(window_size.0), f64::from(window_size.1));
    if window_width <= 0.0 || window_height <= 0.0 {
        return None;
    }
    if x < 0.0 || y < 0.0 || x >= window_width || y >= window_height {
        return None;
    }

    let scale_x = f64::from(framebuffer_size.0.max(0)) / window_width;
    let scale_y = f64::from(framebuffer_size.1.max(0)) / window_height;
    Some((x * scale_x, y * scale_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_scales_to_hidpi_framebuffer() {
        let center = cursor_to_pixels((400.0, 300.0), (800, 600), (1600, 1200));
        assert_eq!(center, Some((800.0, 600.0)));
    }

    #[test]
    fn test_cursor_unchanged_at_scale_one() {
        assert_eq!(cursor_to_pixels((12.5, 40.0), (800, 600), (800, 600)), Some((12.5, 40.0)));
    }

    #[test]
    fn test_cursor_outside_window_or_empty_window() {
        assert_eq!(cursor_to_pixels((900.0, 300.0), (800, 600), (1600, 1200)), None);
        assert_eq!(cursor_to_pixels((-1.0, 300.0), (800, 600), (1600, 1200)), None);
        assert_eq!(cursor_to_pixels((0.0, 0.0), (0, 0), (0, 0)), None);
    }
}
