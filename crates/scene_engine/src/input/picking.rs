//! Pointer state for picking
//!
//! Converts the window-space cursor into Normalized Device Coordinates and
//! owns the "laser", the ray caster that turns the cursor into a world-space
//! pick ray.

use crate::physics::Ray;
use crate::render::Camera;

/// Pointer position relative to the window
#[derive(Debug, Clone)]
pub struct MouseState {
    /// Cursor position in pixels from the top-left corner, if inside the window
    pub cursor: Option<(f64, f64)>,
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
}

impl MouseState {
    /// Create a new mouse state with no cursor
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            cursor: None,
            window_width,
            window_height,
        }
    }

    /// Update the cursor; `None` when it left the window
    pub fn update_position(&mut self, cursor: Option<(f64, f64)>) {
        self.cursor = cursor;
    }

    /// Update window size (for NDC conversion)
    pub fn update_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    /// Convert the cursor to Normalized Device Coordinates
    ///
    /// X: -1 = left, +1 = right. Y: -1 = bottom, +1 = top.
    /// Returns `None` without a cursor or outside the window.
    pub fn screen_to_ndc(&self) -> Option<(f32, f32)> {
        let (x, y) = self.cursor?;
        if self.window_width == 0 || self.window_height == 0 {
            return None;
        }
        let width = f64::from(self.window_width);
        let height = f64::from(self.window_height);
        if !(0.0..=width).contains(&x) || !(0.0..=height).contains(&y) {
            return None;
        }

        let ndc_x = (x / width) as f32 * 2.0 - 1.0;
        let ndc_y = 1.0 - (y / height) as f32 * 2.0;
        Some((ndc_x, ndc_y))
    }

    /// Inverse of [`screen_to_ndc`](Self::screen_to_ndc)
    pub fn ndc_to_screen(&self, ndc_x: f32, ndc_y: f32) -> (f64, f64) {
        let x = (f64::from(ndc_x) + 1.0) * 0.5 * f64::from(self.window_width);
        let y = (1.0 - f64::from(ndc_y)) * 0.5 * f64::from(self.window_height);
        (x, y)
    }
}

/// Ray caster from the camera through the cursor
#[derive(Debug, Clone, Copy)]
pub struct Laser {
    /// Hits further away than this are ignored
    pub max_distance: f32,
}

impl Laser {
    /// Create a laser with the given reach
    pub fn new(max_distance: f32) -> Self {
        Self { max_distance }
    }

    /// World-space ray under the cursor
    pub fn cast(&self, camera: &Camera, mouse: &MouseState) -> Option<Ray> {
        let (ndc_x, ndc_y) = mouse.screen_to_ndc()?;
        camera.screen_to_world_ray(ndc_x, ndc_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_screen_to_ndc_center_and_corners() {
        let mut mouse = MouseState::new(800, 600);
        mouse.update_position(Some((400.0, 300.0)));
        let (x, y) = mouse.screen_to_ndc().unwrap();
        assert_relative_eq!(x, 0.0);
        assert_relative_eq!(y, 0.0);

        mouse.update_position(Some((0.0, 0.0)));
        assert_eq!(mouse.screen_to_ndc(), Some((-1.0, 1.0))); // top-left

        mouse.update_position(Some((800.0, 600.0)));
        assert_eq!(mouse.screen_to_ndc(), Some((1.0, -1.0))); // bottom-right
    }

    #[test]
    fn test_no_ndc_without_cursor_or_outside_window() {
        let mut mouse = MouseState::new(800, 600);
        assert_eq!(mouse.screen_to_ndc(), None);

        mouse.update_position(Some((900.0, 10.0)));
        assert_eq!(mouse.screen_to_ndc(), None);
    }

    #[test]
    fn test_ndc_round_trip() {
        let mut mouse = MouseState::new(800, 600);
        let (x, y) = mouse.ndc_to_screen(0.25, -0.5);
        mouse.update_position(Some((x, y)));
        let (ndc_x, ndc_y) = mouse.screen_to_ndc().unwrap();
        assert_relative_eq!(ndc_x, 0.25, epsilon = 1e-6);
        assert_relative_eq!(ndc_y, -0.5, epsilon = 1e-6);
    }
}
