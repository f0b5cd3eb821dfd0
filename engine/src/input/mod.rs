//! Input Module
//!
//! Turns raw platform events into one [`FrameInput`] per frame. This module
//! is decoupled from any specific windowing system (like winit): the binary
//! translates its events into the calls below.
//!
//! # Example
//!
//! ```rust,ignore
//! use stride_engine::input::{InputAggregator, MouseButton};
//!
//! let mut input = InputAggregator::default();
//!
//! input.key_down("W");
//! input.pointer_button(MouseButton::Left, true);
//! input.pointer_motion(12.0, -3.0);
//!
//! let frame = input.take_frame();
//! assert_eq!(frame.axis.y, 1.0);
//! ```

pub mod bindings;
pub mod cursor_manager;
pub mod keyboard;
pub mod mouse_state;

use glam::Vec2;

// Re-export commonly used types at module level
pub use bindings::{InputAction, KeyBindings};
pub use cursor_manager::{CaptureRequest, PointerCapture};
pub use keyboard::{KeyboardState, MovementKeys, normalize_key};
pub use mouse_state::{MouseButton, PointerState};

/// Button that drags the orbit camera.
pub const ORBIT_DRAG_BUTTON: MouseButton = MouseButton::Left;

/// Everything the controllers need from input for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Movement intent: x = strafe (right positive), y = forward (forward positive).
    /// Each component is -1, 0 or 1; not normalized.
    pub axis: Vec2,
    /// Fresh presses of the camera toggle since the last frame
    pub toggle_presses: u32,
    /// Pointer motion while captured (first-person look)
    pub look_delta: Vec2,
    /// Pointer motion while dragging (orbit)
    pub orbit_delta: Vec2,
    /// Accumulated scroll (orbit zoom)
    pub zoom_delta: f32,
}

impl FrameInput {
    /// No movement intent this frame.
    pub fn is_idle(&self) -> bool {
        self.axis == Vec2::ZERO
    }
}

/// Collects input events between frames.
#[derive(Debug, Clone, Default)]
pub struct InputAggregator {
    keyboard: KeyboardState,
    pointer: PointerState,
    capture: PointerCapture,
    bindings: KeyBindings,
    toggle_presses: u32,
}

impl InputAggregator {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn capture(&self) -> &PointerCapture {
        &self.capture
    }

    pub fn capture_mut(&mut self) -> &mut PointerCapture {
        &mut self.capture
    }

    /// Key pressed. Auto-repeat of a held key does not re-fire the toggle.
    pub fn key_down(&mut self, id: &str) {
        let fresh = self.keyboard.press(id);
        if fresh && self.bindings.get_action(id) == Some(InputAction::ToggleCamera) {
            self.toggle_presses += 1;
        }
    }

    pub fn key_up(&mut self, id: &str) {
        self.keyboard.release(id);
    }

    /// Raw pointer motion.
    ///
    /// Routed to look when capture is active, to orbit while the drag button
    /// is held, dropped otherwise.
    pub fn pointer_motion(&mut self, dx: f32, dy: f32) {
        if self.capture.is_look_enabled() {
            self.pointer.accumulate_look(dx, dy);
        } else if self.pointer.is_pressed(ORBIT_DRAG_BUTTON) {
            self.pointer.accumulate_orbit(dx, dy);
        }
    }

    pub fn pointer_button(&mut self, button: MouseButton, pressed: bool) {
        self.pointer.set_button(button, pressed);
    }

    /// Scroll in lines; positive zooms out.
    pub fn scroll(&mut self, delta: f32) {
        self.pointer.accumulate_scroll(delta);
    }

    /// Platform reports the pointer lock state.
    pub fn pointer_lock_changed(&mut self, locked: bool) {
        self.capture.set_locked(locked);
        if !locked {
            self.pointer.clear_look();
        }
    }

    /// Current movement keys after binding resolution.
    pub fn movement(&self) -> MovementKeys {
        self.bindings.movement(self.keyboard.held())
    }

    /// Consume this frame's intent. Held keys persist; deltas and the toggle reset.
    pub fn take_frame(&mut self) -> FrameInput {
        let movement = self.movement();
        FrameInput {
            axis: Vec2::new(
                movement.right_axis() as f32,
                movement.forward_axis() as f32,
            ),
            toggle_presses: std::mem::take(&mut self.toggle_presses),
            look_delta: self.pointer.consume_look(),
            orbit_delta: self.pointer.consume_orbit(),
            zoom_delta: self.pointer.consume_scroll(),
        }
    }

    /// Window lost focus: nothing stays held.
    pub fn focus_lost(&mut self) {
        self.reset();
        self.capture.handle_focus_lost();
    }

    /// Clear held keys, buttons, deltas and any pending toggle.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.pointer.reset();
        self.toggle_presses = 0;
    }
}
