//! Player Module
//!
//! Character movement.
//!
//! # Components
//!
//! - [`LocomotionController`] - Camera-relative kinematic movement with wall veto and ground snap
//! - [`LocomotionStep`] - Per-frame report of what the controller did

pub mod locomotion;

pub use locomotion::{LocomotionController, LocomotionStep, movement_direction, snap_to_ground};
