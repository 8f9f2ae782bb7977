//! Event sources feeding the frame loop.
//!
//! The loop drains its source once per frame. Sources never block: an empty
//! poll just means a frame with nothing to dispatch.
//!
//! ```text
//! producer threads ──► EventSender ──► channel ──► EventQueue::poll ──► frame
//! ```

use std::collections::VecDeque;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use smudge_events::Event;

/// Default capacity for [`EventQueue`].
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Something the frame loop can drain events from.
pub trait EventSource {
    /// Appends every event ready for this frame to `out`, in arrival order.
    fn poll(&mut self, out: &mut Vec<Event>);
}

impl EventSource for Receiver<Event> {
    fn poll(&mut self, out: &mut Vec<Event>) {
        out.extend(self.try_iter());
    }
}

/// Bounded multi-producer event queue.
pub struct EventQueue {
    sender: Sender<Event>,
    receiver: Receiver<Event>,
}

impl EventQueue {
    /// Creates a queue holding at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Returns a producer handle. Handles are cheap to clone and `Send`.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            inner: self.sender.clone(),
        }
    }

    /// Enqueues from the owning thread.
    ///
    /// Returns false if the queue is full and the event was dropped.
    pub fn push(&self, event: Event) -> bool {
        self.sender().send(event)
    }

    /// Number of undelivered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns true if nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl EventSource for EventQueue {
    fn poll(&mut self, out: &mut Vec<Event>) {
        out.extend(self.receiver.try_iter());
    }
}

/// Producer handle for an [`EventQueue`].
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Sends without blocking.
    ///
    /// Returns false if the event was dropped: the queue is full, or the
    /// queue itself is gone.
    pub fn send(&self, event: Event) -> bool {
        match self.inner.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!(kind = %event.kind(), "event queue full, event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Replays prepared per-frame batches, then asks the loop to quit.
///
/// Headless runs and tests use this in place of a window system.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    frames: VecDeque<Vec<Event>>,
}

impl ScriptedSource {
    /// Creates a source from per-frame batches.
    #[must_use]
    pub fn new<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = Vec<Event>>,
    {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Appends a batch to replay after the existing ones.
    #[must_use]
    pub fn then(mut self, batch: Vec<Event>) -> Self {
        self.frames.push_back(batch);
        self
    }

    /// Appends `count` frames with no events.
    #[must_use]
    pub fn idle(mut self, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_with(Vec::new).take(count));
        self
    }

    /// Batches not yet replayed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl EventSource for ScriptedSource {
    fn poll(&mut self, out: &mut Vec<Event>) {
        match self.frames.pop_front() {
            Some(batch) => out.extend(batch),
            None => out.push(Event::quit()),
        }
    }
}
