//! Pointer State Tracker
//!
//! Accumulates raw pointer motion and scroll between frames. Motion lands in
//! one of two buckets: look deltas (pointer captured, first-person) or orbit
//! deltas (drag button held, third-person). Both are consumed atomically once
//! per frame.

use glam::Vec2;

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// Pointer delta and button state for one frame.
///
/// # Example
///
/// ```rust,ignore
/// let mut pointer = PointerState::new();
/// pointer.set_button(MouseButton::Left, true);
/// pointer.accumulate_orbit(10.0, -5.0);
/// pointer.accumulate_orbit(3.0, 2.0);
/// let delta = pointer.consume_orbit(); // (13, -3)
/// ```
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    look_delta: Vec2,
    orbit_delta: Vec2,
    scroll: f32,
    left: bool,
    middle: bool,
    right: bool,
}

impl PointerState {
    /// Create a new pointer state with zero deltas and no buttons held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update button state for a specific button.
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Middle => self.middle = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Other(_) => {}
        }
    }

    /// Check if a specific button is pressed.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Other(_) => false,
        }
    }

    #[inline]
    pub fn accumulate_look(&mut self, dx: f32, dy: f32) {
        self.look_delta += Vec2::new(dx, dy);
    }

    #[inline]
    pub fn accumulate_orbit(&mut self, dx: f32, dy: f32) {
        self.orbit_delta += Vec2::new(dx, dy);
    }

    #[inline]
    pub fn accumulate_scroll(&mut self, delta: f32) {
        self.scroll += delta;
    }

    /// Return the accumulated look delta and reset it to zero.
    #[inline]
    pub fn consume_look(&mut self) -> Vec2 {
        std::mem::take(&mut self.look_delta)
    }

    /// Return the accumulated orbit delta and reset it to zero.
    #[inline]
    pub fn consume_orbit(&mut self) -> Vec2 {
        std::mem::take(&mut self.orbit_delta)
    }

    /// Return the accumulated scroll and reset it to zero.
    #[inline]
    pub fn consume_scroll(&mut self) -> f32 {
        std::mem::take(&mut self.scroll)
    }

    /// Drop pending look motion (used when capture is lost so the view does not jump).
    pub fn clear_look(&mut self) {
        self.look_delta = Vec2::ZERO;
    }

    /// Reset all state to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = PointerState::new();
        assert!(!state.is_pressed(MouseButton::Left));
        assert_eq!(state.look_delta, Vec2::ZERO);
    }

    #[test]
    fn test_consume_orbit_zeroes() {
        let mut state = PointerState::new();
        state.accumulate_orbit(10.0, 5.0);
        state.accumulate_orbit(3.0, -2.0);

        assert_eq!(state.consume_orbit(), Vec2::new(13.0, 3.0));
        assert_eq!(state.consume_orbit(), Vec2::ZERO);
    }

    #[test]
    fn test_look_and_orbit_are_separate() {
        let mut state = PointerState::new();
        state.accumulate_look(1.0, 1.0);
        state.accumulate_orbit(2.0, 2.0);
        assert_eq!(state.consume_look(), Vec2::new(1.0, 1.0));
        assert_eq!(state.consume_orbit(), Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_buttons() {
        let mut state = PointerState::new();
        state.set_button(MouseButton::Right, true);
        assert!(state.is_pressed(MouseButton::Right));
        state.set_button(MouseButton::Other(4), true);
        assert!(!state.is_pressed(MouseButton::Other(4)));
    }

    #[test]
    fn test_reset() {
        let mut state = PointerState::new();
        state.accumulate_scroll(2.0);
        state.set_button(MouseButton::Left, true);

        state.reset();
        assert_eq!(state.consume_scroll(), 0.0);
        assert!(!state.is_pressed(MouseButton::Left));
    }
}
