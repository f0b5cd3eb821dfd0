//! Engine Configuration
//!
//! Centralized tuning for the character, locomotion, both camera strategies,
//! key bindings and the frame clock. Every section has a `Default` that matches
//! the shipped feel, and every field can be overridden from a JSON file:
//!
//! ```json
//! {
//!     "character": { "speed": 6.0 },
//!     "orbit": { "max_distance": 20.0 },
//!     "bindings": { "toggle_camera": "c" }
//! }
//! ```

use std::path::Path;

use glam::Vec3;
use serde::Deserialize;

use crate::error::ConfigError;

/// Character entity parameters.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CharacterConfig {
    /// Spawn position in world space
    pub spawn: Vec3,
    /// Movement speed in units per second
    pub speed: f32,
    /// Collision radius (must be > 0)
    pub radius: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::ZERO,
            speed: 4.0,
            radius: 0.5,
        }
    }
}

/// Locomotion controller tuning.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Height above the feet the wall probe is cast from
    pub torso_height: f32,
    /// Fraction of the remaining yaw difference closed each frame
    pub turn_smoothing: f32,
    /// Height above the feet the ground probe starts from, i.e. the tallest step
    /// the character can walk onto. Capped at `torso_height`
    pub ground_probe_height: f32,
    /// How far below the feet the ground probe reaches
    pub ground_probe_depth: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            torso_height: 1.0,
            turn_smoothing: 0.15,
            ground_probe_height: 1.0,
            ground_probe_depth: 50.0,
        }
    }
}

/// Third-person orbit camera tuning.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitConfig {
    /// Look-at height above the character's feet
    pub head_height: f32,
    /// Fraction of the remaining target offset closed each frame
    pub follow_smoothing: f32,
    /// Initial orbit distance
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Initial polar angle, measured from +Y (radians)
    pub polar: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    /// Initial azimuth (radians). 0 places the camera on +Z looking toward -Z
    pub azimuth: f32,
    /// Radians of orbit per pixel of pointer drag
    pub rotate_speed: f32,
    /// Distance change per scroll unit
    pub zoom_speed: f32,
    /// Gap kept between the camera and an obstruction
    pub collision_offset: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            head_height: 1.6,
            follow_smoothing: 0.1,
            distance: 6.0,
            min_distance: 2.0,
            max_distance: 15.0,
            polar: 1.2,
            min_polar: 0.2,
            max_polar: 1.45,
            azimuth: 0.0,
            rotate_speed: 0.005,
            zoom_speed: 0.5,
            collision_offset: 0.2,
        }
    }
}

/// First-person camera tuning.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FirstPersonConfig {
    /// Eye height above the character's feet
    pub eye_height: f32,
    /// Radians per pixel of pointer motion
    pub sensitivity: f32,
    /// Margin kept from +/- PI/2 so the view never flips
    pub pitch_epsilon: f32,
    /// Hide the head part while looking through the character's eyes
    pub hide_head: bool,
    /// Name of the rig part treated as the head
    pub head_part: String,
}

impl Default for FirstPersonConfig {
    fn default() -> Self {
        Self {
            eye_height: 1.6,
            sensitivity: 0.002,
            pitch_epsilon: 0.01,
            hide_head: true,
            head_part: "head".to_string(),
        }
    }
}

/// Logical key bindings, expressed as normalized lowercase key identifiers.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BindingsConfig {
    pub forward: String,
    pub back: String,
    pub left: String,
    pub right: String,
    pub toggle_camera: String,
}

impl Default for BindingsConfig {
    fn default() -> Self {
        Self {
            forward: "w".to_string(),
            back: "s".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
            toggle_camera: "v".to_string(),
        }
    }
}

/// Frame clock settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrameConfig {
    /// Largest elapsed time handed to a single frame (seconds)
    pub max_delta: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { max_delta: 0.1 }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub character: CharacterConfig,
    pub locomotion: LocomotionConfig,
    pub orbit: OrbitConfig,
    pub first_person: FirstPersonConfig,
    pub bindings: BindingsConfig,
    pub frame: FrameConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check the invariants the controllers rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.character.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "character.radius must be > 0, got {}",
                self.character.radius
            )));
        }
        non_negative("character.speed", self.character.speed)?;

        let locomotion = &self.locomotion;
        fraction("locomotion.turn_smoothing", locomotion.turn_smoothing)?;
        non_negative("locomotion.torso_height", locomotion.torso_height)?;
        non_negative("locomotion.ground_probe_height", locomotion.ground_probe_height)?;
        non_negative("locomotion.ground_probe_depth", locomotion.ground_probe_depth)?;

        let orbit = &self.orbit;
        fraction("orbit.follow_smoothing", orbit.follow_smoothing)?;
        non_negative("orbit.head_height", orbit.head_height)?;
        non_negative("orbit.rotate_speed", orbit.rotate_speed)?;
        non_negative("orbit.zoom_speed", orbit.zoom_speed)?;
        non_negative("orbit.collision_offset", orbit.collision_offset)?;
        if !orbit.azimuth.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "orbit.azimuth must be finite, got {}",
                orbit.azimuth
            )));
        }
        if !(orbit.min_distance > 0.0 && orbit.min_distance <= orbit.max_distance) {
            return Err(ConfigError::Invalid(format!(
                "orbit distance bounds [{}, {}] are invalid",
                orbit.min_distance, orbit.max_distance
            )));
        }
        if !(orbit.min_polar >= 0.0
            && orbit.min_polar <= orbit.max_polar
            && orbit.max_polar <= std::f32::consts::PI)
        {
            return Err(ConfigError::Invalid(format!(
                "orbit polar bounds [{}, {}] are invalid",
                orbit.min_polar, orbit.max_polar
            )));
        }
        non_negative("first_person.eye_height", self.first_person.eye_height)?;
        non_negative("first_person.sensitivity", self.first_person.sensitivity)?;
        let eps = self.first_person.pitch_epsilon;
        if !(eps > 0.0 && eps < std::f32::consts::FRAC_PI_2) {
            return Err(ConfigError::Invalid(format!(
                "first_person.pitch_epsilon must be in (0, PI/2), got {eps}"
            )));
        }
        if !(self.frame.max_delta > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "frame.max_delta must be > 0, got {}",
                self.frame.max_delta
            )));
        }
        Ok(())
    }
}

/// Per-frame blend factors must lie in `[0, 1]`; above that the smoothing overshoots and diverges.
fn fraction(name: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be in [0, 1], got {value}"
        )))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be finite and >= 0, got {value}"
        )))
    }
}
