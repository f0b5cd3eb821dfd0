//! Camera Module
//!
//! Third-person orbit and first-person cameras behind one [`CameraStrategy`]
//! trait, plus the [`CameraRig`] that owns both and switches between them.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod first_person;
pub mod orbit;
pub mod rig;

pub use first_person::FirstPersonCamera;
pub use orbit::OrbitCamera;
pub use rig::CameraRig;

use crate::character::Character;
use crate::input::FrameInput;
use crate::physics::CollidableSet;
use crate::transform::Transform;

/// Camera mode - determines which strategy drives the view
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CameraMode {
    /// Default: orbit camera behind/above the character
    #[default]
    ThirdPerson,
    /// First-person: camera at the character's eyes, head hidden
    FirstPerson,
}

impl CameraMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::ThirdPerson => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::ThirdPerson,
        }
    }
}

/// What a camera strategy reads (and may write) during its update.
pub struct CameraContext<'a> {
    /// First-person turns the character to match the view
    pub character: &'a mut Character,
    pub surfaces: &'a CollidableSet,
    pub input: &'a FrameInput,
}

/// A way of positioning the camera relative to the character.
pub trait CameraStrategy {
    fn mode(&self) -> CameraMode;

    /// Compute this frame's camera transform.
    fn update(&mut self, ctx: &mut CameraContext<'_>, elapsed: f32) -> Transform;

    /// Horizontal facing that movement input is relative to.
    fn facing_yaw(&self) -> f32;
}
