//! Routing table from event kind to interested listeners.

use std::collections::HashMap;
use std::fmt;

use crate::event::Event;
use crate::kind::EventKind;
use crate::listener::{EventListener, HandlerFailure};

/// Identity of a listener owned by an [`EventDispatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u32);

impl ListenerId {
    /// Creates a listener ID from its raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// A handler failure attributed to its listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    /// The listener whose handler failed.
    pub listener: ListenerId,
    /// The failure.
    pub failure: HandlerFailure,
}

/// What one `dispatch` call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Listeners the event was delivered to (a duplicate route counts twice).
    pub delivered: usize,
    /// Handlers invoked across all listeners.
    pub invoked: usize,
    /// Handlers that failed.
    pub failures: Vec<ListenerFailure>,
}

impl DispatchReport {
    /// Returns true if no handler failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Folds another report into this one.
    pub fn merge(&mut self, other: Self) {
        self.delivered += other.delivered;
        self.invoked += other.invoked;
        self.failures.extend(other.failures);
    }
}

/// Owns listeners and routes events to them by kind.
pub struct EventDispatcher<C> {
    listeners: HashMap<ListenerId, EventListener<C>>,
    /// Per-kind routing lists, in registration order.
    routes: HashMap<EventKind, Vec<ListenerId>>,
    next_id: u32,
}

impl<C> EventDispatcher<C> {
    /// Creates an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: HashMap::with_capacity(64),
            routes: HashMap::with_capacity(16),
            next_id: 1,
        }
    }

    /// Takes ownership of a listener. It receives nothing until registered.
    pub fn add_listener(&mut self, listener: EventListener<C>) -> ListenerId {
        let id = ListenerId::new(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, listener);
        id
    }

    /// Returns a listener.
    #[must_use]
    pub fn listener(&self, id: ListenerId) -> Option<&EventListener<C>> {
        self.listeners.get(&id)
    }

    /// Returns mutable access to a listener, e.g. to add callbacks with
    /// [`EventListener::on`].
    #[must_use]
    pub fn listener_mut(&mut self, id: ListenerId) -> Option<&mut EventListener<C>> {
        self.listeners.get_mut(&id)
    }

    /// Adds `id` to the routing list of each kind.
    ///
    /// Registering the same listener twice for a kind delivers the event to it
    /// twice. Returns false (and routes nothing) if `id` is unknown.
    pub fn register<I>(&mut self, id: ListenerId, kinds: I) -> bool
    where
        I: IntoIterator<Item = EventKind>,
    {
        if !self.listeners.contains_key(&id) {
            tracing::warn!(%id, "register called for unknown listener");
            return false;
        }
        for kind in kinds {
            self.routes.entry(kind).or_default().push(id);
        }
        true
    }

    /// Drops a listener and every route to it.
    pub fn remove_listener(&mut self, id: ListenerId) -> Option<EventListener<C>> {
        let listener = self.listeners.remove(&id)?;
        self.routes.retain(|_, route| {
            route.retain(|&other| other != id);
            !route.is_empty()
        });
        Some(listener)
    }

    /// Drops every listener and route. IDs are not reused afterwards.
    pub fn clear(&mut self) {
        self.listeners.clear();
        self.routes.clear();
    }

    /// Listeners routed for `kind`, in delivery order.
    #[must_use]
    pub fn listeners_for(&self, kind: EventKind) -> &[ListenerId] {
        self.routes.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Number of owned listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if no listeners are owned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Delivers `event` to every listener routed for its kind, in
    /// registration order.
    ///
    /// Unrouted kinds are a no-op. Handler failures are logged and reported;
    /// delivery continues with the next handler and the next listener.
    pub fn dispatch(&mut self, event: &Event, ctx: &mut C) -> DispatchReport {
        let mut report = DispatchReport::default();
        let Some(route) = self.routes.get(&event.kind()) else {
            return report;
        };

        for &id in route {
            let Some(listener) = self.listeners.get_mut(&id) else {
                continue;
            };
            let delivery = listener.dispatch_to_self(event, ctx);
            report.delivered += 1;
            report.invoked += delivery.invoked;
            for failure in delivery.failures {
                tracing::warn!(listener = %id, %failure, "event handler failed");
                report.failures.push(ListenerFailure {
                    listener: id,
                    failure,
                });
            }
        }

        report
    }
}

impl<C> Default for EventDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}
