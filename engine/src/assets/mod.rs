//! Asset resolution
//!
//! Loads run on a background thread and report back over a channel. The
//! session polls each [`AssetHandle`] between frames, so a frame never waits on
//! the loader and never sees half-registered data.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut handle = AssetHandle::spawn("arena", || Ok(primitives::demo_geometry()));
//!
//! // once per frame
//! match handle.poll() {
//!     AssetPoll::Pending => {}
//!     AssetPoll::Ready(geometry) => register(geometry),
//!     AssetPoll::Failed(err) => log::warn!("{err}"),
//! }
//! ```

pub mod primitives;

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::animation::AnimationClip;
use crate::error::AssetError;
use crate::physics::TriangleMesh;

/// Name of the rig used when the real one fails to load.
pub const PLACEHOLDER_RIG: &str = "placeholder";

/// A resolved character rig.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedRig {
    /// Root node name
    pub root: String,
    /// Clips shipped with the rig; the first one drives locomotion
    pub clips: Vec<AnimationClip>,
    /// Named sub-parts that can be shown or hidden
    pub parts: Vec<String>,
}

impl LoadedRig {
    /// Capsule stand-in: a body and a head, no clips.
    pub fn placeholder() -> Self {
        Self {
            root: PLACEHOLDER_RIG.to_string(),
            clips: Vec::new(),
            parts: vec!["body".to_string(), "head".to_string()],
        }
    }
}

/// Resolved environment geometry; every part becomes one collidable surface.
#[derive(Clone, Debug)]
pub struct LoadedGeometry {
    pub root: String,
    pub parts: Vec<TriangleMesh>,
}

/// Result of polling a handle.
#[derive(Debug)]
pub enum AssetPoll<T> {
    /// The loader is still running
    Pending,
    /// The asset resolved; handed out exactly once
    Ready(T),
    /// The loader failed or went away
    Failed(AssetError),
}

enum Source<T> {
    Channel(Receiver<Result<T, AssetError>>),
    Immediate(Option<Result<T, AssetError>>),
}

/// Poll-able handle to an asset being produced elsewhere.
pub struct AssetHandle<T> {
    name: String,
    source: Source<T>,
    resolved: bool,
}

impl<T: Send + 'static> AssetHandle<T> {
    /// Run `loader` on a named background thread.
    ///
    /// If the thread cannot be spawned the handle is already failed.
    pub fn spawn<F>(name: impl Into<String>, loader: F) -> Self
    where
        F: FnOnce() -> Result<T, AssetError> + Send + 'static,
    {
        let name = name.into();
        let (tx, rx) = mpsc::channel();
        let builder = thread::Builder::new().name(format!("asset-{name}"));
        let spawn_result = builder.spawn(move || {
            // Receiver gone means the session was dropped; nothing to report
            let _ = tx.send(loader());
        });

        match spawn_result {
            Ok(_) => Self {
                name,
                source: Source::Channel(rx),
                resolved: false,
            },
            Err(err) => {
                let reason = format!("could not spawn loader thread: {err}");
                Self::failed(AssetError::load_failed(name, reason))
            }
        }
    }
}

impl<T> AssetHandle<T> {
    /// Handle fed by an external producer; dropping the sender without sending is a failure.
    pub fn pending(name: impl Into<String>) -> (Sender<Result<T, AssetError>>, Self) {
        let (tx, rx) = mpsc::channel();
        let handle = Self {
            name: name.into(),
            source: Source::Channel(rx),
            resolved: false,
        };
        (tx, handle)
    }

    /// Already-resolved handle.
    pub fn ready(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            source: Source::Immediate(Some(Ok(value))),
            resolved: false,
        }
    }

    /// Already-failed handle.
    pub fn failed(error: AssetError) -> Self {
        let name = match &error {
            AssetError::LoadFailed { name, .. } => name.clone(),
            AssetError::Disconnected(name) => name.clone(),
        };
        Self {
            name,
            source: Source::Immediate(Some(Err(error))),
            resolved: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` until `poll` has returned `Ready` or `Failed`.
    pub fn is_pending(&self) -> bool {
        !self.resolved
    }

    /// Check for a result without blocking.
    ///
    /// Returns `Ready`/`Failed` once; afterwards the handle reports `Disconnected`.
    pub fn poll(&mut self) -> AssetPoll<T> {
        let outcome = match &mut self.source {
            Source::Immediate(slot) => slot.take(),
            Source::Channel(rx) => match rx.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    Some(Err(AssetError::Disconnected(self.name.clone())))
                }
            },
        };

        match outcome {
            None if self.resolved => AssetPoll::Failed(AssetError::Disconnected(self.name.clone())),
            None => AssetPoll::Pending,
            Some(result) => {
                self.resolved = true;
                match result {
                    Ok(value) => AssetPoll::Ready(value),
                    Err(err) => AssetPoll::Failed(err),
                }
            }
        }
    }
}

impl<T> std::fmt::Debug for AssetHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetHandle")
            .field("name", &self.name)
            .field("pending", &self.is_pending())
            .finish()
    }
}
