//! # Widgets
//!
//! Ready-made entities built from a drawable plus, for interactive ones, a
//! listener. State a widget shares between its render callback and its
//! handlers lives behind `Rc<RefCell<_>>`; everything runs on the frame
//! thread.
//!
//! | Widget     | Drawable                     | Listens to                         |
//! |------------|------------------------------|------------------------------------|
//! | [`Button`] | fill + caption image         | motion, button down/up (callbacks) |
//! | [`Label`]  | caption image                | nothing                            |
//! | [`Cursor`] | pointer image                | motion, window enter/leave         |
//! | [`Group`]  | children, moved together     | nothing                            |

mod button;
mod cursor;
mod group;
mod label;

pub use button::{Button, ClickFn, BUTTON_PADDING};
pub use cursor::{Cursor, CURSOR_HOTSPOT, CURSOR_SIZE};
pub use group::Group;
pub use label::Label;

use smudge_core::{Drawable, DrawableId};
use smudge_events::{EventKind, EventListener};

use crate::stage::Stage;

/// A listener plus the kinds to route to it.
pub struct Subscription {
    /// The listener.
    pub listener: EventListener<Stage>,
    /// Kinds it is registered for, in order.
    pub kinds: Vec<EventKind>,
}

impl Subscription {
    /// Bundles a listener with its kinds.
    #[must_use]
    pub fn new<I>(listener: EventListener<Stage>, kinds: I) -> Self
    where
        I: IntoIterator<Item = EventKind>,
    {
        Self {
            listener,
            kinds: kinds.into_iter().collect(),
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("listener", &self.listener)
            .field("kinds", &self.kinds)
            .finish()
    }
}

/// Something [`Engine::spawn_widget`](crate::Engine::spawn_widget) can put
/// on stage.
pub trait Widget {
    /// Builds the drawable that renders the widget.
    fn drawable(&mut self) -> Drawable;

    /// Builds the widget's listener once its drawable is tracked as `id`.
    fn subscription(&self, id: DrawableId) -> Option<Subscription> {
        let _ = id;
        None
    }
}
