//! The stage: what event handlers get to touch.
//!
//! Handlers receive `&mut Stage`. Through it they move, show and hide
//! drawables, read where the pointer is, and ask the loop to stop.

use smudge_core::{Drawable, DrawableId, RedrawConfig, RedrawManager};
use smudge_events::{Event, EventKind, HandlerError, ListenerId, Payload};

/// A spawned drawable plus the listener that drives it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    /// The tracked drawable.
    pub drawable: DrawableId,
    /// The registered listener.
    pub listener: Option<ListenerId>,
}

/// Handler context for the frame loop.
pub struct Stage {
    redraw: RedrawManager,
    pointer: Option<(i32, i32)>,
    pointer_inside: bool,
    focused: bool,
    window_size: (i32, i32),
    quit_requested: bool,
}

impl Stage {
    /// Creates a stage for a window of the given size.
    #[must_use]
    pub fn new(config: RedrawConfig, window_size: (i32, i32)) -> Self {
        Self {
            redraw: RedrawManager::new(config),
            pointer: None,
            pointer_inside: true,
            focused: true,
            window_size,
            quit_requested: false,
        }
    }

    /// The redraw manager.
    #[must_use]
    pub const fn redraw(&self) -> &RedrawManager {
        &self.redraw
    }

    /// Mutable access to the redraw manager.
    #[must_use]
    pub fn redraw_mut(&mut self) -> &mut RedrawManager {
        &mut self.redraw
    }

    /// Looks up a drawable.
    #[must_use]
    pub fn drawable(&self, id: DrawableId) -> Option<&Drawable> {
        self.redraw.get(id)
    }

    /// Looks up a drawable for mutation.
    #[must_use]
    pub fn drawable_mut(&mut self, id: DrawableId) -> Option<&mut Drawable> {
        self.redraw.get_mut(id)
    }

    /// Looks up a drawable a handler depends on.
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::Stale`] if the drawable was removed.
    pub fn require(&self, id: DrawableId) -> Result<&Drawable, HandlerError> {
        self.redraw
            .get(id)
            .ok_or_else(|| HandlerError::Stale(format!("drawable {id} is gone")))
    }

    /// Mutable form of [`require`](Self::require).
    ///
    /// # Errors
    ///
    /// Returns [`HandlerError::Stale`] if the drawable was removed.
    pub fn require_mut(&mut self, id: DrawableId) -> Result<&mut Drawable, HandlerError> {
        self.redraw
            .get_mut(id)
            .ok_or_else(|| HandlerError::Stale(format!("drawable {id} is gone")))
    }

    /// Last known pointer position.
    #[must_use]
    pub const fn pointer(&self) -> Option<(i32, i32)> {
        self.pointer
    }

    /// Returns true unless the pointer has left the window.
    #[must_use]
    pub const fn is_pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    /// Returns true unless the window has lost keyboard focus.
    #[must_use]
    pub const fn has_focus(&self) -> bool {
        self.focused
    }

    /// Window size as of the last resize event.
    #[must_use]
    pub const fn window_size(&self) -> (i32, i32) {
        self.window_size
    }

    /// Asks the frame loop to stop after the current frame.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Returns true once [`request_quit`](Self::request_quit) was called.
    #[must_use]
    pub const fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub(crate) fn clear_quit(&mut self) {
        self.quit_requested = false;
    }

    /// Updates pointer, focus and size tracking from an incoming event.
    pub(crate) fn observe(&mut self, event: &Event) {
        if let Some(position) = event.position() {
            self.pointer = Some(position);
        }
        match (event.kind(), event.payload()) {
            (EventKind::WindowLeave, _) => self.pointer_inside = false,
            (EventKind::WindowEnter, _) => self.pointer_inside = true,
            (EventKind::WindowFocusGained, _) => self.focused = true,
            (EventKind::WindowFocusLost, _) => self.focused = false,
            (EventKind::WindowResized, Payload::Resize { width, height }) => {
                self.window_size = (*width, *height);
            }
            _ => {}
        }
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("drawables", &self.redraw.len())
            .field("pointer", &self.pointer)
            .field("pointer_inside", &self.pointer_inside)
            .field("focused", &self.focused)
            .field("window_size", &self.window_size)
            .field("quit_requested", &self.quit_requested)
            .finish()
    }
}
