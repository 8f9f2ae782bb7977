//! # SMUDGE
//!
//! A small 2D engine: events in, dirty rectangles out.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          SMUDGE ENGINE                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐   events   ┌──────────────┐  &mut Stage       │
//! │  │ EventSource  │──────────> │ Dispatcher   │──────────┐        │
//! │  │ (queue/script)│           │ (smudge_     │          │        │
//! │  └──────────────┘            │  events)     │          v        │
//! │                              └──────────────┘   ┌────────────┐  │
//! │                                                 │   Stage    │  │
//! │  ┌──────────────┐  redraw_frame                 │ RedrawMgr  │  │
//! │  │   Surface    │ <─────────────────────────────│ (smudge_   │  │
//! │  └──────────────┘                               │  core)     │  │
//! │                                                 └────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `engine`: frame loop and statistics
//! - `stage`: handler context, entities
//! - `widget`: button, label, cursor, group
//! - `source`: event queue and scripted source
//! - `config`: TOML configuration
//!
//! ## Example
//!
//! ```rust
//! use smudge::{Engine, EngineConfig, Label, ScriptedSource};
//! use smudge::core::{Color, Image, RecordingSurface};
//!
//! let mut config = EngineConfig::default();
//! config.window.target_fps = 0;
//! let mut engine = Engine::new(config)?;
//!
//! let mut title = Label::new(Image::solid(120, 30, Color::WHITE), (400, 40));
//! engine.spawn_widget(&mut title);
//!
//! let mut surface = RecordingSurface::new(800, 600);
//! let summary = engine.run(&mut ScriptedSource::default().idle(3), &mut surface);
//! assert_eq!(summary.stats.frames, 3);
//! # Ok::<(), smudge::EngineError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod source;
pub mod stage;
pub mod widget;

pub use smudge_core as core;
pub use smudge_events as events;

pub use clock::FramePacer;
pub use config::{ColorScheme, EngineConfig, RedrawSettings, WindowConfig};
pub use engine::{Engine, FrameOutcome, FrameStats, RunSummary, StopReason};
pub use error::{ConfigError, ConfigResult, EngineError, EngineResult};
pub use source::{EventQueue, EventSender, EventSource, ScriptedSource};
pub use stage::{Entity, Stage};
pub use widget::{Button, Cursor, Group, Label, Subscription, Widget};
