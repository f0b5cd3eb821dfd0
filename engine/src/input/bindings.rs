//! Input Bindings Module
//!
//! Maps normalized key identifiers to logical actions, so movement code
//! never sees a physical key.

use std::collections::{HashMap, HashSet};

use super::keyboard::{MovementKeys, normalize_key};
use crate::config::BindingsConfig;

/// Logical input actions that can be bound to physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputAction {
    /// Move forward (default: W)
    MoveForward,
    /// Move backward (default: S)
    MoveBack,
    /// Strafe left (default: A)
    MoveLeft,
    /// Strafe right (default: D)
    MoveRight,
    /// Switch between third-person and first-person (default: V)
    ToggleCamera,
}

/// Maps key ids to logical actions, one key per action.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Map from normalized key id to logical action
    key_to_action: HashMap<String, InputAction>,
    /// Map from logical action to key id (for reverse lookup and display)
    action_to_key: HashMap<InputAction, String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_config(&BindingsConfig::default())
    }
}

impl KeyBindings {
    /// Create an empty binding table.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
            action_to_key: HashMap::new(),
        }
    }

    /// Build the table from configuration.
    pub fn from_config(config: &BindingsConfig) -> Self {
        let mut bindings = Self::empty();
        bindings.bind(&config.forward, InputAction::MoveForward);
        bindings.bind(&config.back, InputAction::MoveBack);
        bindings.bind(&config.left, InputAction::MoveLeft);
        bindings.bind(&config.right, InputAction::MoveRight);
        bindings.bind(&config.toggle_camera, InputAction::ToggleCamera);
        bindings
    }

    /// Bind a key to a logical action.
    ///
    /// If the key was previously bound to another action, that binding is removed.
    /// If the action was previously bound to another key, that binding is also removed.
    pub fn bind(&mut self, key: &str, action: InputAction) {
        let key = normalize_key(key);

        if let Some(old_action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&old_action);
        }
        if let Some(old_key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&old_key);
        }

        self.key_to_action.insert(key.clone(), action);
        self.action_to_key.insert(action, key);
    }

    /// Get the action bound to a key, if any.
    pub fn get_action(&self, key: &str) -> Option<InputAction> {
        self.key_to_action.get(&normalize_key(key)).copied()
    }

    /// Get the key bound to a logical action, if any.
    pub fn get_key(&self, action: InputAction) -> Option<&str> {
        self.action_to_key.get(&action).map(String::as_str)
    }

    /// Check if an action is held, given the set of held (normalized) keys.
    pub fn is_action_pressed(&self, action: InputAction, held: &HashSet<String>) -> bool {
        self.action_to_key
            .get(&action)
            .is_some_and(|key| held.contains(key))
    }

    /// Resolve the four movement actions against the held set.
    pub fn movement(&self, held: &HashSet<String>) -> MovementKeys {
        MovementKeys {
            forward: self.is_action_pressed(InputAction::MoveForward, held),
            backward: self.is_action_pressed(InputAction::MoveBack, held),
            left: self.is_action_pressed(InputAction::MoveLeft, held),
            right: self.is_action_pressed(InputAction::MoveRight, held),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();

        assert_eq!(bindings.get_action("w"), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_action("s"), Some(InputAction::MoveBack));
        assert_eq!(bindings.get_action("a"), Some(InputAction::MoveLeft));
        assert_eq!(bindings.get_action("d"), Some(InputAction::MoveRight));
        assert_eq!(bindings.get_action("v"), Some(InputAction::ToggleCamera));
        assert_eq!(bindings.get_action("q"), None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get_action("W"), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_key(InputAction::ToggleCamera), Some("v"));
    }

    #[test]
    fn test_rebind_key() {
        let mut bindings = KeyBindings::default();

        bindings.bind("ArrowUp", InputAction::MoveForward);

        assert_eq!(bindings.get_action("w"), None);
        assert_eq!(bindings.get_action("arrowup"), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_key(InputAction::MoveForward), Some("arrowup"));
    }

    #[test]
    fn test_from_config_uses_configured_keys() {
        let config = BindingsConfig {
            toggle_camera: "C".to_string(),
            ..Default::default()
        };
        let bindings = KeyBindings::from_config(&config);
        assert_eq!(bindings.get_action("c"), Some(InputAction::ToggleCamera));
        assert_eq!(bindings.get_action("v"), None);
    }

    #[test]
    fn test_movement_from_held_set() {
        let bindings = KeyBindings::default();
        let held: HashSet<String> = ["w".to_string(), "d".to_string()].into_iter().collect();

        let movement = bindings.movement(&held);
        assert_eq!(movement.forward_axis(), 1);
        assert_eq!(movement.right_axis(), 1);
    }
}
