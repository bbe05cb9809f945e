//! # Scene Camera
//!
//! Perspective camera positioned by a world position and a look-at target.
//! The engine owns at most one camera; picking rays are generated from it.
//!
//! ## Coordinate System
//! Right-handed, Y-up world space. Normalized device coordinates follow the
//! OpenGL convention: X from -1 (left) to +1 (right), Y from -1 (bottom) to
//! +1 (top), Z from -1 (near) to +1 (far).

use crate::foundation::math::{Mat4, Mat4Ext, Vec3, Vec4};
use crate::physics::Ray;

/// Default vertical field of view in radians (PI / 2.5)
pub const DEFAULT_FOV: f32 = std::f32::consts::PI / 2.5;

/// 3D perspective camera
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Field of view angle in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera for a viewport of the given size
    ///
    /// Starts at the origin looking down -Z.
    pub fn for_viewport(width: u32, height: u32) -> Self {
        let aspect = if height == 0 { 1.0 } else { width as f32 / height as f32 };
        Self {
            position: Vec3::zeros(),
            target: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: DEFAULT_FOV,
            aspect,
            near: 1.0,
            far: 3000.0,
        }
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Update camera target (look-at point)
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera target updated to: {:?}", target);
    }

    /// Update camera aspect ratio for viewport changes
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::debug!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// True when position and target are far enough apart to define a view
    /// direction that is not parallel to the up vector
    pub fn has_valid_view(&self) -> bool {
        let forward = self.target - self.position;
        forward.norm() > f32::EPSILON && forward.normalize().cross(&self.up).norm() > 1e-6
    }

    /// World-to-camera transformation
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Perspective projection
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined projection * view
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Convert NDC coordinates to a world-space ray starting at the camera
    ///
    /// Returns `None` when the view-projection matrix is not invertible
    /// (degenerate camera).
    pub fn screen_to_world_ray(&self, ndc_x: f32, ndc_y: f32) -> Option<Ray> {
        let inv_view_proj = self.view_projection_matrix().try_inverse()?;

        let near_h = inv_view_proj * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_h = inv_view_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        if near_h.w.abs() < f32::EPSILON || far_h.w.abs() < f32::EPSILON {
            return None;
        }

        let world_near = near_h.xyz() / near_h.w;
        let world_far = far_h.xyz() / far_h.w;

        Some(Ray::new(self.position, world_far - world_near))
    }

    /// Project a world point to NDC; `None` if it lies behind the camera
    pub fn world_to_ndc(&self, point: Vec3) -> Option<(f32, f32)> {
        let clip = self.view_projection_matrix() * Vec4::new(point.x, point.y, point.z, 1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        Some((clip.x / clip.w, clip.y / clip.w))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::for_viewport(800, 600)
    }
}
