//! Error types
//!
//! Only configuration loading and asset resolution can fail. Neither is ever
//! propagated out of the frame loop: asset failures are recovered inside
//! [`crate::session::Session::poll_assets`].

use std::path::PathBuf;
use thiserror::Error;

/// Failure to resolve a character rig or environment geometry asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The loader ran but could not produce the asset
    #[error("asset `{name}` failed to load: {reason}")]
    LoadFailed { name: String, reason: String },

    /// The loader went away (thread panicked or handle sender dropped) without a result
    #[error("asset `{0}` loader disconnected before producing a result")]
    Disconnected(String),
}

impl AssetError {
    /// Convenience constructor for loader implementations.
    pub fn load_failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LoadFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
