//! Rotating perspective camera.
//!
//! The camera orbits the Y axis at a constant rate per frame and projects
//! with a simple perspective divide:
//!
//! ```text
//! screen = center + rotated.xy * scale * fov / (fov + rotated.z + depth_offset)
//! ```

use crate::equations::phase;
use glam::{Mat3, Vec2, Vec3};

/// Orbit camera that turns a little every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Focal length in simulation units.
    pub fov: f32,
    /// Distance pushed onto every depth before the divide.
    pub depth_offset: f32,
    /// Yaw advanced per frame, in radians.
    pub yaw_speed: f32,
    /// Fixed tilt about the X axis, in radians.
    pub pitch: f32,
}

/// A particle position on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Screen position in pixels.
    pub screen: Vec2,
    /// Perspective factor `fov / (fov + z + offset)`; 1 at the focal plane.
    pub depth_scale: f32,
}

impl Projection {
    /// Depth-faded opacity: farther particles are dimmer.
    #[inline]
    pub fn alpha(&self) -> f32 {
        (self.depth_scale - 0.2).min(1.0)
    }
}

impl OrbitCamera {
    /// Create a camera with default positioning.
    pub fn new() -> Self {
        Self {
            fov: 600.0,
            depth_offset: 300.0,
            yaw_speed: 0.002,
            pitch: 0.0,
        }
    }

    /// Yaw angle on frame `time`, wrapped to one turn.
    #[inline]
    pub fn yaw(&self, time: f64) -> f32 {
        phase(time, f64::from(self.yaw_speed))
    }

    /// Rotate a simulation-space point into camera space.
    pub fn rotate(&self, position: Vec3, time: f64) -> Vec3 {
        let yawed = Mat3::from_rotation_y(-self.yaw(time)) * position;
        if self.pitch == 0.0 {
            yawed
        } else {
            Mat3::from_rotation_x(self.pitch) * yawed
        }
    }

    /// Project `position` around `center` with `scale` pixels per unit.
    ///
    /// Returns `None` for points at or behind the eye.
    pub fn project(
        &self,
        position: Vec3,
        time: f64,
        center: Vec2,
        scale: f32,
    ) -> Option<Projection> {
        let rotated = self.rotate(position, time);
        let denominator = self.fov + rotated.z + self.depth_offset;
        if denominator.is_nan() || denominator <= 0.0 {
            return None;
        }
        let depth_scale = self.fov / denominator;
        let screen = center + Vec2::new(rotated.x, rotated.y) * scale * depth_scale;
        if !screen.is_finite() {
            return None;
        }
        Some(Projection { screen, depth_scale })
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
