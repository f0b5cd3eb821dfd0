//! Orbit Camera Module
//!
//! Third-person camera that circles a point above the character's head.
//! The look-at point trails the character with per-frame smoothing, the
//! pointer drags the orbit and scroll zooms. If geometry sits between the
//! head and the camera, the camera is pulled in front of it for that frame
//! only; the chosen zoom is kept.
//!
//! Angles are spherical: `polar` is measured from +Y, `azimuth` around Y with
//! 0 placing the camera on +Z so that it looks toward -Z.

use glam::Vec3;

use super::{CameraContext, CameraMode, CameraStrategy};
use crate::config::OrbitConfig;
use crate::physics::CollidableSet;
use crate::transform::{Transform, yaw_from_direction};

/// Third-person orbit camera state.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    /// Smoothed look-at point; `None` until the first update
    target: Option<Vec3>,
    /// Requested distance from the target
    distance: f32,
    /// Distance used last frame after collision
    actual_distance: f32,
    polar: f32,
    azimuth: f32,
    distance_limits: (f32, f32),
    polar_limits: (f32, f32),
    head_height: f32,
    follow_smoothing: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    collision_offset: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(&OrbitConfig::default())
    }
}

impl OrbitCamera {
    pub fn new(config: &OrbitConfig) -> Self {
        let distance_limits = (config.min_distance, config.max_distance);
        let polar_limits = (config.min_polar, config.max_polar);
        let distance = config.distance.clamp(distance_limits.0, distance_limits.1);
        Self {
            target: None,
            distance,
            actual_distance: distance,
            polar: config.polar.clamp(polar_limits.0, polar_limits.1),
            azimuth: config.azimuth,
            distance_limits,
            polar_limits,
            head_height: config.head_height,
            follow_smoothing: config.follow_smoothing.clamp(0.0, 1.0),
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            collision_offset: config.collision_offset,
        }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Camera distance after the last collision check.
    pub fn actual_distance(&self) -> f32 {
        self.actual_distance
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn distance_limits(&self) -> (f32, f32) {
        self.distance_limits
    }

    pub fn polar_limits(&self) -> (f32, f32) {
        self.polar_limits
    }

    /// Smoothed look-at point, once the camera has run.
    pub fn look_target(&self) -> Option<Vec3> {
        self.target
    }

    /// Apply pointer drag (pixels) and scroll (lines). Out-of-range results are clamped.
    pub fn apply_input(&mut self, drag_x: f32, drag_y: f32, zoom: f32) {
        self.azimuth -= drag_x * self.rotate_speed;
        self.polar = (self.polar - drag_y * self.rotate_speed)
            .clamp(self.polar_limits.0, self.polar_limits.1);
        self.distance = (self.distance + zoom * self.zoom_speed)
            .clamp(self.distance_limits.0, self.distance_limits.1);
    }

    /// Unit vector from the target toward the camera.
    pub fn offset_direction(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        Vec3::new(sin_polar * sin_az, cos_polar, sin_polar * cos_az)
    }

    /// Move the smoothed target toward `desired`, seeding it on first use.
    fn follow(&mut self, desired: Vec3) -> Vec3 {
        let target = match self.target {
            Some(current) => current.lerp(desired, self.follow_smoothing),
            None => desired,
        };
        self.target = Some(target);
        target
    }

    /// How far the camera can sit from `target` along `direction` without
    /// clipping into geometry.
    fn collide(&self, target: Vec3, direction: Vec3, surfaces: &CollidableSet) -> f32 {
        match surfaces.cast_ray(target, direction, self.distance) {
            Some(hit) if hit.distance < self.distance => {
                (hit.distance - self.collision_offset).max(0.0)
            }
            _ => self.distance,
        }
    }
}

impl CameraStrategy for OrbitCamera {
    fn mode(&self) -> CameraMode {
        CameraMode::ThirdPerson
    }

    fn update(&mut self, ctx: &mut CameraContext<'_>, _elapsed: f32) -> Transform {
        let input = ctx.input;
        self.apply_input(input.orbit_delta.x, input.orbit_delta.y, input.zoom_delta);

        let desired = ctx.character.transform.position + Vec3::Y * self.head_height;
        let target = self.follow(desired);

        let direction = self.offset_direction();
        self.actual_distance = self.collide(target, direction, ctx.surfaces);

        let look = -direction;
        Transform {
            position: target + direction * self.actual_distance,
            yaw: yaw_from_direction(look).unwrap_or(-self.azimuth),
            pitch: look.y.clamp(-1.0, 1.0).asin(),
        }
    }

    fn facing_yaw(&self) -> f32 {
        -self.azimuth
    }
}
