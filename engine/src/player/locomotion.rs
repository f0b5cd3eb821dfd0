//! Locomotion Controller
//!
//! Kinematic, camera-relative movement for the character. There is no
//! velocity state: each frame the held direction is turned into a single
//! displacement which a wall probe may veto outright, then the feet are
//! snapped to whatever ground lies below.
//!
//! # Movement Model
//!
//! - W/S: along the camera's horizontal forward axis
//! - A/D: strafe along the camera's right axis
//! - Diagonal input is normalized, so it is not faster than straight input
//! - Facing turns toward the travel direction by a fixed fraction per frame
//!
//! # Usage
//!
//! ```rust,ignore
//! let controller = LocomotionController::new(&config.locomotion);
//!
//! // Each frame:
//! let step = controller.step(&mut character, frame.axis, camera_yaw, dt, &surfaces);
//! if step.vetoed {
//!     // walked into a wall
//! }
//! ```

use glam::{Vec2, Vec3};

use crate::character::Character;
use crate::config::LocomotionConfig;
use crate::physics::CollidableSet;
use crate::transform::{approach_angle, yaw_from_direction};

/// What happened during one locomotion step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocomotionStep {
    /// The character's horizontal position changed
    pub moved: bool,
    /// A wall ahead cancelled the displacement
    pub vetoed: bool,
    /// The ground probe found a surface and the feet were snapped to it
    pub grounded: bool,
}

/// Moves the character from per-frame intent.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    /// Height above the feet the wall probe starts from
    torso_height: f32,
    /// Fraction of the remaining yaw difference closed each frame
    turn_smoothing: f32,
    ground_probe_height: f32,
    ground_probe_depth: f32,
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::new(&LocomotionConfig::default())
    }
}

impl LocomotionController {
    pub fn new(config: &LocomotionConfig) -> Self {
        Self {
            torso_height: config.torso_height,
            turn_smoothing: config.turn_smoothing.clamp(0.0, 1.0),
            // Starting above the torso would let a shelf overhead pass for ground
            ground_probe_height: config.ground_probe_height.min(config.torso_height),
            ground_probe_depth: config.ground_probe_depth,
        }
    }

    /// Advance the character by one frame.
    ///
    /// # Arguments
    /// * `character` - The character to move; its yaw and clip state are updated too
    /// * `axis` - Movement intent, x = strafe (right positive), y = forward
    /// * `camera_yaw` - Horizontal facing of the active camera (pitch ignored)
    /// * `elapsed` - Frame time in seconds
    /// * `surfaces` - Static collidables; when empty, movement is free and unsnapped
    pub fn step(
        &self,
        character: &mut Character,
        axis: Vec2,
        camera_yaw: f32,
        elapsed: f32,
        surfaces: &CollidableSet,
    ) -> LocomotionStep {
        let Some(direction) = movement_direction(axis, camera_yaw) else {
            character.set_clip_paused(true);
            return LocomotionStep::default();
        };

        if let Some(target_yaw) = yaw_from_direction(direction) {
            character.transform.yaw =
                approach_angle(character.transform.yaw, target_yaw, self.turn_smoothing);
        }

        let distance = character.speed * elapsed.max(0.0);
        let mut step = LocomotionStep::default();

        if !surfaces.is_empty() {
            let probe_origin = character.transform.position + Vec3::Y * self.torso_height;
            step.vetoed = surfaces.ray_test(probe_origin, direction, character.radius + distance);
        }

        if !step.vetoed && distance > 0.0 {
            character.transform.position += direction * distance;
            step.moved = true;
        }

        if !surfaces.is_empty() {
            if let Some(ground_y) = snap_to_ground(
                character.transform.position,
                surfaces,
                self.ground_probe_height,
                self.ground_probe_depth,
            ) {
                character.transform.position.y = ground_y;
                step.grounded = true;
            }
        }

        character.set_clip_paused(false);
        step
    }
}

/// World-space travel direction for a movement axis, relative to the camera.
///
/// Returns `None` for zero intent. The result is unit length and horizontal.
pub fn movement_direction(axis: Vec2, camera_yaw: f32) -> Option<Vec3> {
    if axis == Vec2::ZERO {
        return None;
    }
    let intent = axis.normalize_or_zero();
    if intent == Vec2::ZERO {
        return None;
    }

    let forward = camera_forward(camera_yaw);
    let right = camera_right(camera_yaw);
    Some((forward * intent.y + right * intent.x).normalize_or_zero())
}

/// Height of the ground below `position`, probing from `probe_height` above it
/// down to `probe_depth` below it.
pub fn snap_to_ground(
    position: Vec3,
    surfaces: &CollidableSet,
    probe_height: f32,
    probe_depth: f32,
) -> Option<f32> {
    let origin = position + Vec3::Y * probe_height;
    surfaces
        .cast_ray(origin, Vec3::NEG_Y, probe_height + probe_depth)
        .map(|hit| hit.point.y)
}

/// Camera yaw: angle in radians where 0 = looking toward -Z.
fn camera_forward(camera_yaw: f32) -> Vec3 {
    Vec3::new(camera_yaw.sin(), 0.0, -camera_yaw.cos())
}

/// Right is perpendicular to forward on the XZ plane: (cos(yaw), 0, sin(yaw)).
fn camera_right(camera_yaw: f32) -> Vec3 {
    let forward = camera_forward(camera_yaw);
    Vec3::new(-forward.z, 0.0, forward.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterRig;
    use crate::config::CharacterConfig;
    use crate::physics::TriangleMesh;
    use crate::animation::AnimationClip;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn character() -> Character {
        let rig = CharacterRig::new(
            "runner",
            &["body".to_string(), "head".to_string()],
            vec![AnimationClip::new("run", 0.8)],
        );
        Character::spawn(rig, &CharacterConfig::default())
    }

    fn flat_ground() -> CollidableSet {
        let mut set = CollidableSet::new();
        set.push(TriangleMesh::quad(
            "ground",
            Vec3::new(-20.0, 0.0, -20.0),
            Vec3::new(40.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 40.0),
        ));
        set
    }

    #[test]
    fn test_no_input_no_movement() {
        let controller = LocomotionController::default();
        let mut c = character();
        c.set_clip_paused(false);

        let step = controller.step(&mut c, Vec2::ZERO, 0.0, 0.016, &CollidableSet::new());
        assert_eq!(step, LocomotionStep::default());
        assert_eq!(c.position(), Vec3::ZERO);
        assert!(c.is_clip_paused());
    }

    #[test]
    fn test_camera_relative_forward() {
        // Camera yawed 90 degrees right: forward input moves toward +X
        let dir = movement_direction(Vec2::new(0.0, 1.0), FRAC_PI_2).unwrap();
        assert_relative_eq!(dir.x, 1.0, epsilon = 1e-5);
        assert!(dir.z.abs() < 1e-5);
    }

    #[test]
    fn test_strafe_right_at_zero_yaw() {
        let dir = movement_direction(Vec2::new(1.0, 0.0), 0.0).unwrap();
        assert_relative_eq!(dir.x, 1.0, epsilon = 1e-6);
        assert!(dir.z.abs() < 1e-6);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let dir = movement_direction(Vec2::new(1.0, 1.0), 0.0).unwrap();
        assert_relative_eq!(dir.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_free_movement_without_surfaces() {
        let controller = LocomotionController::default();
        let mut c = character();
        c.transform.position.y = 3.0;

        let step = controller.step(&mut c, Vec2::new(0.0, 1.0), 0.0, 0.5, &CollidableSet::new());
        assert!(step.moved);
        assert!(!step.grounded);
        assert_relative_eq!(c.position().z, -2.0, epsilon = 1e-5);
        // No snap without geometry
        assert_eq!(c.position().y, 3.0);
        assert!(!c.is_clip_paused());
    }

    #[test]
    fn test_turns_toward_travel_direction() {
        let controller = LocomotionController::default();
        let mut c = character();

        controller.step(&mut c, Vec2::new(1.0, 0.0), 0.0, 0.016, &CollidableSet::new());
        // Target yaw is +PI/2; one frame closes 15% of it
        assert_relative_eq!(c.transform.yaw, FRAC_PI_2 * 0.15, epsilon = 1e-5);
    }

    #[test]
    fn test_snaps_to_ground_below() {
        let controller = LocomotionController::default();
        let mut c = character();
        c.transform.position.y = 0.7;

        let step = controller.step(&mut c, Vec2::new(0.0, 1.0), 0.0, 0.1, &flat_ground());
        assert!(step.grounded);
        assert_eq!(c.position().y, 0.0);
    }

    #[test]
    fn test_wall_vetoes_displacement_but_not_turn() {
        let controller = LocomotionController::default();
        let mut c = character();
        let mut set = flat_ground();
        // Wall 0.3 ahead, inside the 0.5 radius
        set.push(TriangleMesh::quad(
            "wall",
            Vec3::new(-2.0, 0.0, -0.3),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        ));

        let step = controller.step(&mut c, Vec2::new(0.0, 1.0), 0.0, 0.1, &set);
        assert!(step.vetoed);
        assert!(!step.moved);
        assert_eq!(c.position(), Vec3::ZERO);
        // Still animating even though blocked
        assert!(!c.is_clip_paused());
    }

    #[test]
    fn test_ground_probe_never_starts_above_torso() {
        let config = LocomotionConfig {
            ground_probe_height: 5.0,
            ..Default::default()
        };
        let controller = LocomotionController::new(&config);
        assert_eq!(controller.ground_probe_height, config.torso_height);
    }

    #[test]
    fn test_snap_to_ground_misses_outside_plane() {
        let set = flat_ground();
        assert_eq!(snap_to_ground(Vec3::new(0.0, 1.0, 0.0), &set, 2.0, 50.0), Some(0.0));
        assert_eq!(snap_to_ground(Vec3::new(100.0, 1.0, 0.0), &set, 2.0, 50.0), None);
    }
}
