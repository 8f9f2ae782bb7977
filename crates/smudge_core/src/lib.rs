//! # SMUDGE Core
//!
//! Dirty-rectangle redraw engine designed for:
//! - Scenes of a few hundred rectangle-bounded drawables
//! - No full-screen clears: only stale footprints are erased
//! - Incremental collision tracking instead of per-frame recomputation
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                    REDRAW PIPELINE                      │
//! ├────────────────────────────────────────────────────────┤
//! │  Drawables → Collision Graph → Erase Pass → Render Pass │
//! │      ↓             ↓               ↓            ↓       │
//! │   rect moves   link/unlink    fill background   blit    │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use smudge_core::{Color, Drawable, RecordingSurface, Rect, RedrawManager};
//!
//! let mut manager = RedrawManager::default();
//! let ids = manager.add([
//!     Drawable::new(Rect::new(0, 0, 10, 10)),
//!     Drawable::new(Rect::new(5, 5, 10, 10)),
//! ]);
//! assert_eq!(manager.collision_set(ids[0]), Some(&[ids[1]][..]));
//!
//! let mut surface = RecordingSurface::new(640, 480);
//! let report = manager.redraw_frame(&mut surface);
//! assert_eq!(report.rendered, ids);
//! # let _ = Color::BLACK;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod color;
pub mod drawable;
pub mod error;
pub mod geometry;
pub mod redraw;
pub mod surface;

pub use color::Color;
pub use drawable::{Drawable, DrawableId, RenderFn};
pub use error::{RenderError, SceneError, SceneResult};
pub use geometry::Rect;
pub use redraw::{FrameReport, RedrawConfig, RedrawManager, RenderFailure, DEFAULT_VIEWPORT_MARGIN};
pub use surface::{Image, PixelSurface, RecordingSurface, Surface, SurfaceOp};
