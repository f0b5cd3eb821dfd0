//! Pointer Capture Module
//!
//! Tracks pointer capture for first-person look. Capture has two halves:
//! what the core *requested* and whether the platform actually *locked* the
//! pointer. Look input only flows when both agree.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut capture = PointerCapture::new();
//!
//! // Camera switched to first-person
//! capture.engage();
//!
//! // Platform layer, once per frame
//! if let Some(request) = capture.take_request() {
//!     apply_to_window(&window, request);
//! }
//!
//! // Platform confirms the grab
//! capture.set_locked(true);
//! assert!(capture.is_look_enabled());
//! ```

/// Requests the platform layer should apply to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRequest {
    /// Grab and hide the pointer
    Engage,
    /// Release and show the pointer
    Release,
}

/// Requested and actual pointer capture state.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    /// Whether the core wants the pointer captured
    requested: bool,
    /// Whether the platform reports the pointer as locked
    locked: bool,
    /// Latest request not yet picked up by the platform layer
    pending: Option<CaptureRequest>,
}

impl PointerCapture {
    /// Create a released capture state with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the platform to capture the pointer.
    pub fn engage(&mut self) {
        if !self.requested {
            self.requested = true;
            self.pending = Some(CaptureRequest::Engage);
        }
    }

    /// Ask the platform to release the pointer.
    pub fn release(&mut self) {
        if self.requested {
            self.requested = false;
            self.pending = Some(CaptureRequest::Release);
        }
    }

    /// Platform notification: lock acquired or lost.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Look deltas are only accepted while capture is requested and locked.
    pub fn is_look_enabled(&self) -> bool {
        self.requested && self.locked
    }

    /// Hand the pending request to the platform layer. Returns `None` if nothing changed.
    pub fn take_request(&mut self) -> Option<CaptureRequest> {
        self.pending.take()
    }

    /// Window lost focus: the platform drops the lock, the request stands.
    pub fn handle_focus_lost(&mut self) {
        self.locked = false;
    }

    /// Window regained focus: re-issue the outstanding request.
    pub fn handle_focus_gained(&mut self) {
        if self.requested {
            self.pending = Some(CaptureRequest::Engage);
        }
    }

    /// Status line for the instruction overlay.
    pub fn status_message(&self) -> &'static str {
        match (self.requested, self.locked) {
            (true, true) => "Pointer captured.",
            (true, false) => "Click the window to capture the pointer.",
            (false, _) => "Drag to orbit, scroll to zoom.",
        }
    }
}
