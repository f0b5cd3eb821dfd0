//! Keyboard Input Module
//!
//! Tracks which keys are held. Keys are identified by normalized strings
//! ("w", "v", "arrowup", ...) rather than a platform enum, so the binary can
//! feed whatever its windowing layer reports.

use std::collections::HashSet;

/// Normalize a platform key identifier: surrounding whitespace trimmed, lowercased.
///
/// A lone space is kept as `" "` so the space bar stays addressable.
pub fn normalize_key(id: &str) -> String {
    let trimmed = id.trim();
    if trimmed.is_empty() && !id.is_empty() {
        return " ".to_string();
    }
    trimmed.to_lowercase()
}

/// Set of currently held keys.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<String>,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press.
    ///
    /// Returns `true` only if the key was not already held, i.e. this is a
    /// fresh physical press rather than an auto-repeat.
    pub fn press(&mut self, id: &str) -> bool {
        self.held.insert(normalize_key(id))
    }

    /// Record a key release. Returns `true` if the key had been held.
    pub fn release(&mut self, id: &str) -> bool {
        self.held.remove(&normalize_key(id))
    }

    pub fn is_held(&self, id: &str) -> bool {
        self.held.contains(&normalize_key(id))
    }

    /// The held set, keyed by normalized id.
    pub fn held(&self) -> &HashSet<String> {
        &self.held
    }

    /// Release every key.
    pub fn reset(&mut self) {
        self.held.clear();
    }
}

/// Which of the four movement actions are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementKeys {
    /// Get the forward/backward movement direction (-1, 0, or 1).
    pub fn forward_axis(&self) -> i32 {
        (self.forward as i32) - (self.backward as i32)
    }

    /// Get the left/right movement direction (-1, 0, or 1).
    pub fn right_axis(&self) -> i32 {
        (self.right as i32) - (self.left as i32)
    }
}
