//! # SMUDGE Events
//!
//! Kind-based event routing.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    EVENT ROUTING                      │
//! ├──────────────────────────────────────────────────────┤
//! │  Event ──► routes[kind] ──► L1 ──► L2 ──► ...         │
//! │                              │                        │
//! │                   convention handler (on_<kind>)      │
//! │                   then custom callbacks, in order     │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use smudge_events::{Event, EventDispatcher, EventKind, EventListener};
//!
//! let listener = EventListener::new().with_handler(EventKind::WindowLeave, |_, hidden: &mut bool| {
//!     *hidden = true;
//!     Ok(())
//! });
//!
//! let mut dispatcher = EventDispatcher::new();
//! let id = dispatcher.add_listener(listener);
//! dispatcher.register(id, [EventKind::WindowLeave]);
//!
//! let mut hidden = false;
//! let report = dispatcher.dispatch(&Event::window_leave(), &mut hidden);
//! assert!(hidden);
//! assert!(report.is_clean());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod dispatcher;
pub mod error;
pub mod event;
pub mod kind;
pub mod listener;

pub use dispatcher::{DispatchReport, EventDispatcher, ListenerFailure, ListenerId};
pub use error::{HandlerError, HandlerResult};
pub use event::{Event, Key, Modifiers, MouseButton, Payload};
pub use kind::{camel_to_snake, EventKind};
pub use listener::{Delivery, EventListener, Handler, HandlerFailure, HandlerSlot};
