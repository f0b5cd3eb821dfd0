//! Camera Rig
//!
//! Owns both camera strategies and the active [`CameraMode`]. Switching is
//! instant: no blended cut, no half-switched frame. Each strategy keeps its
//! state while inactive, so an orbit that was zoomed and rotated comes back
//! exactly as it was left.

use log::debug;

use super::{CameraContext, CameraMode, CameraStrategy, FirstPersonCamera, OrbitCamera};
use crate::character::Character;
use crate::config::EngineConfig;
use crate::input::PointerCapture;
use crate::transform::Transform;

#[derive(Clone, Debug, Default)]
pub struct CameraRig {
    mode: CameraMode,
    orbit: OrbitCamera,
    first_person: FirstPersonCamera,
    /// Transform produced by the last update
    transform: Transform,
}

impl CameraRig {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            mode: CameraMode::ThirdPerson,
            orbit: OrbitCamera::new(&config.orbit),
            first_person: FirstPersonCamera::new(&config.first_person),
            transform: Transform::default(),
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn orbit(&self) -> &OrbitCamera {
        &self.orbit
    }

    pub fn first_person(&self) -> &FirstPersonCamera {
        &self.first_person
    }

    /// Last computed camera transform.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The strategy for the current mode.
    pub fn active(&self) -> &dyn CameraStrategy {
        match self.mode {
            CameraMode::ThirdPerson => &self.orbit,
            CameraMode::FirstPerson => &self.first_person,
        }
    }

    /// The strategy for the current mode, mutably.
    pub fn active_mut(&mut self) -> &mut dyn CameraStrategy {
        match self.mode {
            CameraMode::ThirdPerson => &mut self.orbit,
            CameraMode::FirstPerson => &mut self.first_person,
        }
    }

    /// Horizontal facing movement is relative to.
    pub fn facing_yaw(&self) -> f32 {
        self.active().facing_yaw()
    }

    /// Switch modes.
    ///
    /// Entering first-person seeds the view from the character's facing, levels
    /// the pitch, requests pointer capture and hides the head. Leaving releases
    /// the pointer and shows the head again.
    pub fn toggle(
        &mut self,
        character: Option<&mut Character>,
        capture: &mut PointerCapture,
    ) -> CameraMode {
        self.mode = self.mode.toggled();
        match self.mode {
            CameraMode::FirstPerson => {
                let yaw = character.as_ref().map_or(0.0, |c| c.transform.yaw);
                self.first_person.enter(yaw);
                capture.engage();
            }
            CameraMode::ThirdPerson => capture.release(),
        }
        if let Some(character) = character {
            self.apply_part_visibility(character);
        }
        debug!("camera mode -> {:?}", self.mode);
        self.mode
    }

    /// Show or hide the head for the current mode. Called on toggles and when
    /// a character appears while first-person is already active.
    pub fn apply_part_visibility(&self, character: &mut Character) {
        if let Some(part) = self.first_person.hidden_part() {
            let visible = self.mode != CameraMode::FirstPerson;
            character.rig.set_part_visible(part, visible);
        }
    }

    /// Run the active strategy and remember its result.
    pub fn update(&mut self, ctx: &mut CameraContext<'_>, elapsed: f32) -> Transform {
        self.transform = self.active_mut().update(ctx, elapsed);
        self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CharacterConfig;
    use crate::input::{CaptureRequest, FrameInput};
    use crate::physics::CollidableSet;

    #[test]
    fn test_starts_in_third_person() {
        let rig = CameraRig::default();
        assert_eq!(rig.mode(), CameraMode::ThirdPerson);
        assert_eq!(rig.active().mode(), CameraMode::ThirdPerson);
    }

    #[test]
    fn test_toggle_round_trip_requests_capture() {
        let mut rig = CameraRig::default();
        let mut capture = PointerCapture::new();
        let mut character = Character::placeholder(&CharacterConfig::default());
        character.transform.yaw = 0.8;

        assert_eq!(rig.toggle(Some(&mut character), &mut capture), CameraMode::FirstPerson);
        assert_eq!(rig.active().mode(), CameraMode::FirstPerson);
        assert_eq!(rig.first_person().yaw(), 0.8);
        assert_eq!(capture.take_request(), Some(CaptureRequest::Engage));
        assert_eq!(character.rig.is_part_visible("head"), Some(false));

        assert_eq!(rig.toggle(Some(&mut character), &mut capture), CameraMode::ThirdPerson);
        assert_eq!(capture.take_request(), Some(CaptureRequest::Release));
        assert_eq!(character.rig.is_part_visible("head"), Some(true));
    }

    #[test]
    fn test_toggle_without_character() {
        let mut rig = CameraRig::default();
        let mut capture = PointerCapture::new();
        rig.toggle(None, &mut capture);
        assert_eq!(rig.mode(), CameraMode::FirstPerson);
        assert_eq!(rig.first_person().yaw(), 0.0);
    }

    #[test]
    fn test_update_stores_transform() {
        let mut rig = CameraRig::default();
        let mut character = Character::placeholder(&CharacterConfig::default());
        let surfaces = CollidableSet::new();
        let input = FrameInput::default();
        let mut ctx = CameraContext {
            character: &mut character,
            surfaces: &surfaces,
            input: &input,
        };

        let transform = rig.update(&mut ctx, 0.016);
        assert_eq!(rig.transform(), transform);
        // Default orbit sits behind (+Z) and above the head
        assert!(transform.position.z > 0.0);
        assert!(transform.position.y > 1.6);
    }
}
