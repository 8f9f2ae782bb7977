//! # Engine Error Types
//!
//! Errors raised while loading configuration and managing entities.
//! Per-frame failures (render callbacks, event handlers) are not errors here:
//! they are reported in the frame statistics and the loop keeps running.

use std::path::PathBuf;

use smudge_core::DrawableId;
use thiserror::Error;

/// Configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid TOML for [`EngineConfig`](crate::EngineConfig).
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Engine-level errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The entity's drawable is not tracked (already despawned?).
    #[error("unknown entity: drawable {0} is not tracked")]
    UnknownEntity(DrawableId),
}

/// Result type for config loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
