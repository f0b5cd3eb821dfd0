//! Instruction text for the UI layer.
//!
//! Lines are derived from the live key bindings and camera mode, so a
//! rebound key or a mode switch is reflected the next time they are read.

use std::fmt;

use crate::camera::CameraMode;
use crate::input::{InputAction, KeyBindings, PointerCapture};

/// Ordered instruction lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstructionSet {
    pub lines: Vec<String>,
}

impl InstructionSet {
    pub fn build(bindings: &KeyBindings, mode: CameraMode, capture: &PointerCapture) -> Self {
        let key = |action: InputAction| {
            bindings
                .get_key(action)
                .map(str::to_uppercase)
                .unwrap_or_else(|| "unbound".to_string())
        };

        let movement = format!(
            "{}/{}/{}/{}: move",
            key(InputAction::MoveForward),
            key(InputAction::MoveLeft),
            key(InputAction::MoveBack),
            key(InputAction::MoveRight),
        );
        let toggle = match mode {
            CameraMode::ThirdPerson => "first-person view",
            CameraMode::FirstPerson => "third-person view",
        };

        Self {
            lines: vec![
                movement,
                format!("{}: switch to {toggle}", key(InputAction::ToggleCamera)),
                capture.status_message().to_string(),
            ],
        }
    }
}

impl fmt::Display for InstructionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_third_person_lines() {
        let set = InstructionSet::build(
            &KeyBindings::default(),
            CameraMode::ThirdPerson,
            &PointerCapture::new(),
        );
        assert_eq!(set.lines[0], "W/A/S/D: move");
        assert_eq!(set.lines[1], "V: switch to first-person view");
        assert!(set.lines[2].contains("orbit"));
    }

    #[test]
    fn test_lines_follow_rebinding_and_mode() {
        let mut bindings = KeyBindings::default();
        bindings.bind("c", InputAction::ToggleCamera);
        let set = InstructionSet::build(&bindings, CameraMode::FirstPerson, &PointerCapture::new());
        assert_eq!(set.lines[1], "C: switch to third-person view");
    }

    #[test]
    fn test_display_joins_lines() {
        let set = InstructionSet {
            lines: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(set.to_string(), "a\nb");
    }
}
