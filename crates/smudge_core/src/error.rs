//! # Core Error Types
//!
//! Errors raised by render callbacks and by collision-graph validation.

use thiserror::Error;

use crate::drawable::DrawableId;

/// A render callback failed.
///
/// Render failures are isolated: the redraw pass logs them, records them in
/// the frame report, and keeps going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The callback needed an asset that is not loaded.
    #[error("missing asset: {0}")]
    MissingAsset(String),

    /// The callback tried to draw outside what the surface supports.
    #[error("surface rejected draw: {0}")]
    Surface(String),

    /// Any other failure reported by the callback.
    #[error("render failed: {0}")]
    Failed(String),
}

impl RenderError {
    /// Convenience constructor for ad-hoc failures.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

/// The collision graph was found in an inconsistent state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// `a` lists `b` as a neighbor but `b` does not list `a`.
    #[error("asymmetric collision edge: {a} -> {b}")]
    AsymmetricEdge {
        /// Drawable whose set holds the edge.
        a: DrawableId,
        /// Neighbor that does not hold the reverse edge.
        b: DrawableId,
    },

    /// A collision set refers to a drawable that is not tracked.
    #[error("collision set of {owner} refers to untracked drawable {missing}")]
    DanglingEdge {
        /// Drawable whose set holds the edge.
        owner: DrawableId,
        /// The untracked neighbor.
        missing: DrawableId,
    },

    /// A drawable lists itself as a neighbor.
    #[error("drawable {0} collides with itself in the graph")]
    SelfEdge(DrawableId),

    /// The live set and the graph disagree about membership.
    #[error("drawable {0} is in the live set without a graph entry")]
    MissingEntry(DrawableId),
}

/// Result type for graph validation.
pub type SceneResult<T> = Result<T, SceneError>;
