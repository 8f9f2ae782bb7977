//! Event listeners.
//!
//! A listener answers an event in two ways, in this order:
//!
//! 1. Its **convention handler** for the event's kind, if it has one. This is
//!    the slot named by [`EventKind::handler_name`] (`on_mouse_motion`, ...).
//!    The table is filled at construction with [`EventListener::with_handler`]
//!    and a missing entry is simply skipped.
//! 2. Every **custom callback** added with [`EventListener::on`] for the kind,
//!    in the order they were added.
//!
//! Handlers receive the event plus a mutable context `C` chosen by the
//! owner of the dispatcher.

use std::collections::HashMap;
use std::fmt;

use crate::error::{HandlerError, HandlerResult};
use crate::event::Event;
use crate::kind::EventKind;

/// A boxed event handler over context `C`.
pub type Handler<C> = Box<dyn FnMut(&Event, &mut C) -> HandlerResult>;

/// Which handler of a listener ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerSlot {
    /// The convention handler for the kind.
    Convention,
    /// The custom callback at this position in registration order.
    Custom(usize),
}

/// A handler that returned an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    /// Kind of the event being handled.
    pub kind: EventKind,
    /// Which handler failed.
    pub slot: HandlerSlot,
    /// What it reported.
    pub error: HandlerError,
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot {
            HandlerSlot::Convention => {
                write!(f, "{}: {}", self.kind.handler_name(), self.error)
            }
            HandlerSlot::Custom(index) => {
                write!(f, "custom {} callback #{index}: {}", self.kind, self.error)
            }
        }
    }
}

/// What a listener did with one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Handlers invoked, including failed ones.
    pub invoked: usize,
    /// Handlers that failed.
    pub failures: Vec<HandlerFailure>,
}

/// Convention handlers plus custom callbacks, keyed by event kind.
pub struct EventListener<C> {
    convention: HashMap<EventKind, Handler<C>>,
    custom: HashMap<EventKind, Vec<Handler<C>>>,
}

impl<C> EventListener<C> {
    /// Creates a listener with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            convention: HashMap::new(),
            custom: HashMap::new(),
        }
    }

    /// Sets the convention handler for `kind`.
    ///
    /// There is one convention slot per kind; setting it again replaces it.
    #[must_use]
    pub fn with_handler<F>(mut self, kind: EventKind, handler: F) -> Self
    where
        F: FnMut(&Event, &mut C) -> HandlerResult + 'static,
    {
        self.convention.insert(kind, Box::new(handler));
        self
    }

    /// Returns true if the listener defines a convention handler for `kind`.
    #[must_use]
    pub fn has_handler(&self, kind: EventKind) -> bool {
        self.convention.contains_key(&kind)
    }

    /// Names of the defined convention handlers, sorted.
    #[must_use]
    pub fn handler_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.convention.keys().map(|k| k.handler_name()).collect();
        names.sort();
        names
    }

    /// Appends a custom callback for `kind`.
    pub fn on<F>(&mut self, kind: EventKind, callback: F)
    where
        F: FnMut(&Event, &mut C) -> HandlerResult + 'static,
    {
        self.custom.entry(kind).or_default().push(Box::new(callback));
    }

    /// Number of custom callbacks for `kind`.
    #[must_use]
    pub fn callback_count(&self, kind: EventKind) -> usize {
        self.custom.get(&kind).map_or(0, Vec::len)
    }

    /// Runs the convention handler, then every custom callback, for the
    /// event's kind.
    ///
    /// A failing handler is recorded and the remaining handlers still run.
    pub fn dispatch_to_self(&mut self, event: &Event, ctx: &mut C) -> Delivery {
        let kind = event.kind();
        let mut delivery = Delivery::default();

        if let Some(handler) = self.convention.get_mut(&kind) {
            delivery.invoked += 1;
            if let Err(error) = handler(event, ctx) {
                delivery.failures.push(HandlerFailure {
                    kind,
                    slot: HandlerSlot::Convention,
                    error,
                });
            }
        }

        if let Some(callbacks) = self.custom.get_mut(&kind) {
            for (index, callback) in callbacks.iter_mut().enumerate() {
                delivery.invoked += 1;
                if let Err(error) = callback(event, ctx) {
                    delivery.failures.push(HandlerFailure {
                        kind,
                        slot: HandlerSlot::Custom(index),
                        error,
                    });
                }
            }
        }

        delivery
    }
}

impl<C> Default for EventListener<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for EventListener<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListener")
            .field("convention", &self.handler_names())
            .field(
                "custom",
                &self
                    .custom
                    .iter()
                    .map(|(kind, list)| (*kind, list.len()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
