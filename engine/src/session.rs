//! Session
//!
//! The explicit context object for one running scene. It owns everything a
//! frame touches: configuration, input, the character, the collidable set,
//! the locomotion controller and the camera rig. There are no globals;
//! whoever holds the `Session` drives it.
//!
//! Per frame, [`Session::advance`] runs, in order:
//! 1. take this frame's input
//! 2. apply camera toggles, one per press since the last frame
//! 3. advance the animation mixer
//! 4. locomotion
//! 5. camera
//!
//! Asset results are folded in between frames by [`Session::poll_assets`].

use log::{error, info, warn};
use static_assertions::assert_impl_all;

use crate::assets::{AssetHandle, AssetPoll, LoadedGeometry, LoadedRig};
use crate::camera::{CameraContext, CameraMode, CameraRig};
use crate::character::{Character, CharacterRig};
use crate::config::EngineConfig;
use crate::hud::InstructionSet;
use crate::input::{InputAggregator, KeyBindings};
use crate::physics::{CollidableSet, TriangleMesh};
use crate::player::{LocomotionController, LocomotionStep};
use crate::transform::Transform;

/// Character state as of the end of a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterSnapshot {
    pub transform: Transform,
    pub clip_paused: bool,
    /// Playback time of the locomotion clip, if the rig has one
    pub clip_time: Option<f32>,
    pub hidden_parts: Vec<String>,
    /// What locomotion did this frame
    pub step: LocomotionStep,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    /// Frames advanced so far, this one included
    pub frame: u64,
    /// Simulated seconds since the session started
    pub time: f64,
    pub camera: Transform,
    pub camera_mode: CameraMode,
    /// `None` until the character rig has resolved
    pub character: Option<CharacterSnapshot>,
    /// Registered collidable surfaces
    pub surfaces: usize,
    /// Asset loads still in flight
    pub pending_assets: usize,
}

pub struct Session {
    config: EngineConfig,
    input: InputAggregator,
    character: Option<Character>,
    surfaces: CollidableSet,
    locomotion: LocomotionController,
    camera: CameraRig,
    rig_handle: Option<AssetHandle<LoadedRig>>,
    geometry_handles: Vec<AssetHandle<LoadedGeometry>>,
    frame: u64,
    time: f64,
}

assert_impl_all!(Session: Send);
assert_impl_all!(CollidableSet: Send, Sync);

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Session {
    /// Create an empty session: no character, no geometry, third-person camera.
    pub fn new(config: EngineConfig) -> Self {
        info!(
            "session start: speed {} radius {} orbit distance {}",
            config.character.speed, config.character.radius, config.orbit.distance
        );
        Self {
            input: InputAggregator::new(KeyBindings::from_config(&config.bindings)),
            locomotion: LocomotionController::new(&config.locomotion),
            camera: CameraRig::new(&config),
            character: None,
            surfaces: CollidableSet::new(),
            rig_handle: None,
            geometry_handles: Vec::new(),
            frame: 0,
            time: 0.0,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn input(&self) -> &InputAggregator {
        &self.input
    }

    /// Feed platform events here between frames.
    pub fn input_mut(&mut self) -> &mut InputAggregator {
        &mut self.input
    }

    pub fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }

    pub fn character_mut(&mut self) -> Option<&mut Character> {
        self.character.as_mut()
    }

    pub fn surfaces(&self) -> &CollidableSet {
        &self.surfaces
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera.mode()
    }

    /// Instruction lines for the current bindings and camera mode.
    pub fn instructions(&self) -> InstructionSet {
        InstructionSet::build(self.input.bindings(), self.camera.mode(), self.input.capture())
    }

    /// Track the character rig load. Replaces any load still in flight.
    pub fn load_character(&mut self, handle: AssetHandle<LoadedRig>) {
        self.rig_handle = Some(handle);
    }

    /// Track an environment geometry load.
    pub fn load_geometry(&mut self, handle: AssetHandle<LoadedGeometry>) {
        self.geometry_handles.push(handle);
    }

    /// Number of asset loads not yet resolved.
    pub fn pending_assets(&self) -> usize {
        self.rig_handle.iter().count() + self.geometry_handles.len()
    }

    /// Create the character from a resolved rig, replacing any existing one.
    pub fn spawn_character(&mut self, rig: LoadedRig) {
        let mut character =
            Character::spawn(CharacterRig::from_loaded(rig), &self.config.character);
        self.camera.apply_part_visibility(&mut character);
        self.character = Some(character);
    }

    /// Register one collidable surface.
    pub fn add_surface(&mut self, mesh: TriangleMesh) {
        self.surfaces.push(mesh);
    }

    /// Register every part of a resolved geometry asset, in order.
    pub fn add_geometry(&mut self, geometry: LoadedGeometry) {
        info!(
            "geometry `{}` resolved: {} surfaces",
            geometry.root,
            geometry.parts.len()
        );
        self.surfaces.extend(geometry.parts);
    }

    /// Fold finished asset loads into the session. Call between frames.
    ///
    /// A failed rig is replaced by the placeholder; a failed geometry load
    /// leaves the scene without those surfaces. Neither stops the session.
    pub fn poll_assets(&mut self) {
        if let Some(handle) = self.rig_handle.as_mut() {
            match handle.poll() {
                AssetPoll::Pending => {}
                AssetPoll::Ready(rig) => {
                    info!("character rig `{}` resolved", rig.root);
                    self.rig_handle = None;
                    self.spawn_character(rig);
                }
                AssetPoll::Failed(err) => {
                    error!("{err}; using placeholder rig");
                    self.rig_handle = None;
                    self.spawn_character(LoadedRig::placeholder());
                }
            }
        }

        let mut resolved = Vec::new();
        self.geometry_handles.retain_mut(|handle| match handle.poll() {
            AssetPoll::Pending => true,
            AssetPoll::Ready(geometry) => {
                resolved.push(geometry);
                false
            }
            AssetPoll::Failed(err) => {
                warn!("{err}; continuing without it");
                false
            }
        });
        for geometry in resolved {
            self.add_geometry(geometry);
        }
    }

    /// Run one frame of `elapsed` seconds.
    ///
    /// Without a character this only consumes input (a camera toggle still
    /// switches modes) and returns a snapshot with no character.
    pub fn advance(&mut self, elapsed: f32) -> FrameSnapshot {
        let elapsed = elapsed.max(0.0);
        self.frame += 1;
        self.time += f64::from(elapsed);

        let input = self.input.take_frame();
        for _ in 0..input.toggle_presses {
            self.camera
                .toggle(self.character.as_mut(), self.input.capture_mut());
        }

        let Some(character) = self.character.as_mut() else {
            return self.snapshot(None);
        };

        character.update_animation(elapsed);

        let step = self.locomotion.step(
            character,
            input.axis,
            self.camera.facing_yaw(),
            elapsed,
            &self.surfaces,
        );

        let mut ctx = CameraContext {
            character,
            surfaces: &self.surfaces,
            input: &input,
        };
        self.camera.update(&mut ctx, elapsed);

        self.snapshot(Some(step))
    }

    fn snapshot(&self, step: Option<LocomotionStep>) -> FrameSnapshot {
        let character = self.character.as_ref().map(|c| CharacterSnapshot {
            transform: c.transform,
            clip_paused: c.is_clip_paused(),
            clip_time: c.locomotion.as_ref().map(|action| action.time()),
            hidden_parts: c.rig.hidden_parts(),
            step: step.unwrap_or_default(),
        });

        FrameSnapshot {
            frame: self.frame,
            time: self.time,
            camera: self.camera.transform(),
            camera_mode: self.camera.mode(),
            character,
            surfaces: self.surfaces.len(),
            pending_assets: self.pending_assets(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::primitives;
    use crate::error::AssetError;

    #[test]
    fn test_empty_session_snapshot() {
        let mut session = Session::default();
        let snapshot = session.advance(0.016);
        assert_eq!(snapshot.frame, 1);
        assert!(snapshot.character.is_none());
        assert_eq!(snapshot.surfaces, 0);
        assert_eq!(snapshot.camera_mode, CameraMode::ThirdPerson);
    }

    #[test]
    fn test_ready_assets_are_registered() {
        let mut session = Session::default();
        session.load_character(AssetHandle::ready("runner", primitives::demo_rig()));
        session.load_geometry(AssetHandle::ready("arena", primitives::demo_geometry()));
        assert_eq!(session.pending_assets(), 2);

        session.poll_assets();
        assert_eq!(session.pending_assets(), 0);
        assert_eq!(session.surfaces().len(), 4);
        assert_eq!(session.character().unwrap().rig.root, "runner");
    }

    #[test]
    fn test_failed_geometry_is_skipped() {
        let mut session = Session::default();
        session.load_geometry(AssetHandle::failed(AssetError::load_failed("arena", "io")));
        session.poll_assets();
        assert_eq!(session.pending_assets(), 0);
        assert!(session.surfaces().is_empty());
    }

    #[test]
    fn test_negative_elapsed_is_ignored() {
        let mut session = Session::default();
        session.spawn_character(primitives::demo_rig());
        session.input_mut().key_down("w");
        let snapshot = session.advance(-1.0);
        assert_eq!(snapshot.time, 0.0);
        assert_eq!(snapshot.character.unwrap().transform.position, glam::Vec3::ZERO);
    }
}
