//! Stride Engine Library
//!
//! Character movement, collision and camera-follow core. Raw input goes in;
//! character and camera transforms come out. Rendering, windowing and asset
//! decoding stay outside this crate.
//!
//! # Modules
//!
//! - [`physics`] - Triangle-mesh collidables and nearest-hit ray casting
//! - [`input`] - Platform-agnostic input aggregation into per-frame intent
//! - [`player`] - Locomotion controller (camera-relative movement, wall veto, ground snap)
//! - [`camera`] - Orbit and first-person cameras behind one strategy trait
//! - [`session`] - The per-scene context object and its `advance` step
//! - [`frame`] - Frame clock and driver that hands snapshots to a renderer
//!
//! # Example
//!
//! ```ignore
//! use stride_engine::{AssetHandle, EngineConfig, FrameDriver, Session};
//! use stride_engine::assets::primitives;
//!
//! let mut session = Session::new(EngineConfig::default());
//! session.load_geometry(AssetHandle::spawn("arena", || Ok(primitives::demo_geometry())));
//! session.load_character(AssetHandle::spawn("runner", || Ok(primitives::demo_rig())));
//!
//! let mut driver = FrameDriver::new(session, my_renderer);
//!
//! // In the event loop
//! driver.session_mut().input_mut().key_down("w");
//! let snapshot = driver.tick(std::time::Instant::now());
//! ```

pub mod animation;
pub mod assets;
pub mod camera;
pub mod character;
pub mod config;
pub mod error;
pub mod frame;
pub mod hud;
pub mod input;
pub mod physics;
pub mod player;
pub mod session;
pub mod transform;

// Re-export the types a host application touches every frame
pub use assets::{AssetHandle, AssetPoll, LoadedGeometry, LoadedRig};
pub use camera::{CameraMode, CameraRig, CameraStrategy};
pub use character::Character;
pub use config::EngineConfig;
pub use error::{AssetError, ConfigError};
pub use frame::{FrameClock, FrameDriver, FrameRenderer};
pub use input::{CaptureRequest, FrameInput, InputAggregator, MouseButton};
pub use physics::{CollidableSet, RayHit, SurfaceId, TriangleMesh, cast_ray};
pub use session::{FrameSnapshot, Session};
pub use transform::Transform;
