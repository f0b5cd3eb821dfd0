//! First-Person Camera Module
//!
//! Mouse movement directly rotates the view while the pointer is captured.
//! The camera sits at the character's eyes and drives the character's yaw.
//!
//! Key features:
//! - Direct pointer input → camera rotation (no button required)
//! - Configurable sensitivity (default: 0.002 rad/pixel)
//! - Pitch clamped just short of ±90 degrees so the view never flips
//! - NO smoothing - instant response

use glam::Vec3;

use super::{CameraContext, CameraMode, CameraStrategy};
use crate::config::FirstPersonConfig;
use crate::transform::Transform;

/// First-person camera.
///
/// ## Usage
/// ```rust,ignore
/// let mut camera = FirstPersonCamera::new(&config.first_person);
///
/// camera.enter(character.transform.yaw);
/// camera.apply_mouse_delta(dx, dy);
/// let forward = camera.forward();
/// ```
#[derive(Clone, Debug)]
pub struct FirstPersonCamera {
    /// Horizontal angle (radians) - unrestricted, wraps around
    yaw: f32,
    /// Vertical angle (radians) - clamped to `±pitch_limit`
    pitch: f32,
    /// Radians per pixel
    sensitivity: f32,
    eye_height: f32,
    pitch_limit: f32,
    hide_head: bool,
    head_part: String,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self::new(&FirstPersonConfig::default())
    }
}

impl FirstPersonCamera {
    pub fn new(config: &FirstPersonConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: config.sensitivity,
            eye_height: config.eye_height,
            pitch_limit: std::f32::consts::FRAC_PI_2 - config.pitch_epsilon,
            hide_head: config.hide_head,
            head_part: config.head_part.clone(),
        }
    }

    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Largest absolute pitch the camera will reach.
    #[inline]
    pub fn pitch_limit(&self) -> f32 {
        self.pitch_limit
    }

    /// Part hidden while this camera is active, if hiding is enabled.
    pub fn hidden_part(&self) -> Option<&str> {
        self.hide_head.then_some(self.head_part.as_str())
    }

    /// Take over from another camera: face the way the character faces, look level.
    pub fn enter(&mut self, character_yaw: f32) {
        self.yaw = character_yaw;
        self.pitch = 0.0;
    }

    /// Apply pointer movement to rotate the camera.
    ///
    /// # Arguments
    /// * `dx` - Positive = pointer moved right = look right (increase yaw)
    /// * `dy` - Positive = pointer moved down = look down (decrease pitch)
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// View direction. When yaw=0 and pitch=0, camera looks toward -Z.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.transform_at(Vec3::ZERO).forward()
    }

    fn transform_at(&self, position: Vec3) -> Transform {
        Transform {
            position,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }
}

impl CameraStrategy for FirstPersonCamera {
    fn mode(&self) -> CameraMode {
        CameraMode::FirstPerson
    }

    fn update(&mut self, ctx: &mut CameraContext<'_>, _elapsed: f32) -> Transform {
        let look = ctx.input.look_delta;
        self.apply_mouse_delta(look.x, look.y);

        // The body always faces where the eyes look
        ctx.character.transform.yaw = self.yaw;

        let eye = ctx.character.transform.position + Vec3::Y * self.eye_height;
        self.transform_at(eye)
    }

    fn facing_yaw(&self) -> f32 {
        self.yaw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default_values() {
        let camera = FirstPersonCamera::default();
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(camera.pitch(), 0.0);
        assert_relative_eq!(camera.pitch_limit(), FRAC_PI_2 - 0.01);
        assert_eq!(camera.hidden_part(), Some("head"));
    }

    #[test]
    fn test_apply_mouse_delta() {
        let mut camera = FirstPersonCamera::default();
        camera.apply_mouse_delta(100.0, 50.0);
        assert_relative_eq!(camera.yaw(), 0.2, epsilon = 1e-6);
        assert_relative_eq!(camera.pitch(), -0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_pitch_clamping_max() {
        let mut camera = FirstPersonCamera::default();
        camera.apply_mouse_delta(0.0, -100_000.0);
        assert_relative_eq!(camera.pitch(), camera.pitch_limit());
        assert!(camera.pitch() < FRAC_PI_2);
    }

    #[test]
    fn test_pitch_clamping_min() {
        let mut camera = FirstPersonCamera::default();
        camera.apply_mouse_delta(0.0, 100_000.0);
        assert_relative_eq!(camera.pitch(), -camera.pitch_limit());
        assert!(camera.pitch() > -FRAC_PI_2);
    }

    #[test]
    fn test_enter_resets_pitch_and_seeds_yaw() {
        let mut camera = FirstPersonCamera::default();
        camera.apply_mouse_delta(10.0, 300.0);
        camera.enter(1.25);
        assert_eq!(camera.yaw(), 1.25);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn test_forward_vector_at_origin() {
        let camera = FirstPersonCamera::default();
        let forward = camera.forward();
        assert!(forward.x.abs() < 0.001);
        assert!(forward.y.abs() < 0.001);
        assert!((forward.z - (-1.0)).abs() < 0.001);
    }

    #[test]
    fn test_head_hiding_can_be_disabled() {
        let config = FirstPersonConfig {
            hide_head: false,
            ..Default::default()
        };
        assert_eq!(FirstPersonCamera::new(&config).hidden_part(), None);
    }
}
