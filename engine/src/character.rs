//! Character entity
//!
//! The controllable figure: a transform, a rig of named parts whose visibility
//! the camera can toggle, and the single locomotion clip.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::animation::{AnimationClip, ClipAction};
use crate::assets::LoadedRig;
use crate::config::CharacterConfig;
use crate::transform::Transform;

/// Named parts of a loaded rig and whether each is drawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CharacterRig {
    /// Root node name of the loaded scene
    pub root: String,
    parts: BTreeMap<String, bool>,
    clips: Vec<AnimationClip>,
}

impl CharacterRig {
    pub fn new(root: impl Into<String>, parts: &[String], clips: Vec<AnimationClip>) -> Self {
        Self {
            root: root.into(),
            parts: parts.iter().map(|name| (name.clone(), true)).collect(),
            clips,
        }
    }

    /// Build from a resolved rig asset.
    pub fn from_loaded(rig: LoadedRig) -> Self {
        Self::new(rig.root, &rig.parts, rig.clips)
    }

    pub fn has_part(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    /// Visibility of a part; `None` if the rig has no such part.
    pub fn is_part_visible(&self, name: &str) -> Option<bool> {
        self.parts.get(name).copied()
    }

    /// Show or hide a part. Returns `false` if the part does not exist.
    pub fn set_part_visible(&mut self, name: &str, visible: bool) -> bool {
        match self.parts.get_mut(name) {
            Some(flag) => {
                *flag = visible;
                true
            }
            None => false,
        }
    }

    /// Parts currently hidden.
    pub fn hidden_parts(&self) -> Vec<String> {
        self.parts
            .iter()
            .filter(|(_, visible)| !**visible)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn clips(&self) -> &[AnimationClip] {
        &self.clips
    }
}

/// The controllable character.
#[derive(Clone, Debug)]
pub struct Character {
    pub transform: Transform,
    pub rig: CharacterRig,
    /// Locomotion clip; `None` when the rig carries no clips
    pub locomotion: Option<ClipAction>,
    /// Units per second
    pub speed: f32,
    /// Collision radius (> 0)
    pub radius: f32,
}

impl Character {
    /// Spawn a character with its first clip bound, playing and paused.
    pub fn spawn(rig: CharacterRig, config: &CharacterConfig) -> Self {
        let locomotion = rig.clips().first().cloned().map(|clip| {
            let mut action = ClipAction::new(clip);
            action.play();
            action.set_paused(true);
            action
        });

        Self {
            transform: Transform::from_position(config.spawn),
            rig,
            locomotion,
            speed: config.speed,
            radius: config.radius,
        }
    }

    /// Stand-in used when the rig asset fails to load: a body and head, no clips.
    pub fn placeholder(config: &CharacterConfig) -> Self {
        Self::spawn(CharacterRig::from_loaded(LoadedRig::placeholder()), config)
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Pause or resume the locomotion clip, if there is one.
    pub fn set_clip_paused(&mut self, paused: bool) {
        if let Some(action) = self.locomotion.as_mut() {
            action.set_paused(paused);
        }
    }

    /// `true` when the clip is paused or there is no clip at all.
    pub fn is_clip_paused(&self) -> bool {
        self.locomotion.as_ref().is_none_or(ClipAction::is_paused)
    }

    /// Advance the animation mixer.
    pub fn update_animation(&mut self, dt: f32) {
        if let Some(action) = self.locomotion.as_mut() {
            action.update(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner_rig() -> CharacterRig {
        CharacterRig::new(
            "runner",
            &["body".to_string(), "head".to_string()],
            vec![AnimationClip::new("run", 0.8)],
        )
    }

    #[test]
    fn test_spawn_binds_first_clip_paused() {
        let character = Character::spawn(runner_rig(), &CharacterConfig::default());
        let action = character.locomotion.as_ref().unwrap();
        assert_eq!(action.clip().name, "run");
        assert!(action.is_paused());
        assert!(character.is_clip_paused());
    }

    #[test]
    fn test_spawn_uses_config() {
        let config = CharacterConfig {
            spawn: Vec3::new(1.0, 2.0, 3.0),
            speed: 7.0,
            radius: 0.3,
        };
        let character = Character::spawn(runner_rig(), &config);
        assert_eq!(character.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(character.speed, 7.0);
        assert_eq!(character.radius, 0.3);
    }

    #[test]
    fn test_placeholder_has_head_and_no_clip() {
        let character = Character::placeholder(&CharacterConfig::default());
        assert!(character.rig.has_part("head"));
        assert!(character.locomotion.is_none());
        assert!(character.is_clip_paused());
    }

    #[test]
    fn test_part_visibility() {
        let mut rig = runner_rig();
        assert_eq!(rig.is_part_visible("head"), Some(true));
        assert!(rig.set_part_visible("head", false));
        assert_eq!(rig.hidden_parts(), vec!["head".to_string()]);
        assert!(!rig.set_part_visible("tail", false));
        assert_eq!(rig.is_part_visible("tail"), None);
    }
}
