//! Transform Module
//!
//! Position + yaw/pitch orientation shared by the character and the camera.
//!
//! # Coordinate System
//! - +X = right
//! - +Y = up
//! - -Z = forward (yaw 0 looks toward -Z)
//!
//! Facing direction for a yaw is `(sin(yaw), 0, -cos(yaw))`. Pitch is positive upward.

use glam::{Quat, Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// World-space transform of a character or camera.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Horizontal angle (radians) - unrestricted
    pub yaw: f32,
    /// Vertical angle (radians) - always 0 for the character
    pub pitch: f32,
}

impl Transform {
    /// Create a transform at a position facing -Z.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Get the forward direction vector, derived from yaw and pitch.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Forward direction projected onto the ground plane (pitch ignored).
    #[inline]
    pub fn horizontal_forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Rotation quaternion equivalent to yaw/pitch, so that `rotation() * -Z == forward()`.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw) * Quat::from_rotation_x(self.pitch)
    }
}

/// Yaw of a world-space direction (its XZ projection). Returns `None` for vertical or zero vectors.
pub fn yaw_from_direction(direction: Vec3) -> Option<f32> {
    let planar = Vec2::new(direction.x, direction.z);
    if planar.length_squared() <= 1.0e-12 {
        return None;
    }
    Some(direction.x.atan2(-direction.z))
}

/// Wrap an angle into `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Move `current` toward `target` along the shortest arc by `factor` of the remaining difference.
///
/// `factor` is a fraction in `[0, 1]`; the step does not depend on elapsed time.
pub fn approach_angle(current: f32, target: f32, factor: f32) -> f32 {
    let diff = wrap_angle(target - current);
    current + diff * factor.clamp(0.0, 1.0)
}
