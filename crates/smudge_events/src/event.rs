//! Events and their payloads.
//!
//! Events arrive already translated from the device layer: a kind plus a
//! kind-specific payload.

use crate::kind::EventKind;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// Keyboard key.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Space,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Control key is held.
    pub ctrl: bool,
    /// Alt key is held.
    pub alt: bool,
    /// Super/Command key is held.
    pub super_key: bool,
}

/// Kind-specific event data.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No data.
    None,
    /// Frame tick.
    Tick {
        /// Frame number the tick follows.
        frame: u64,
        /// Seconds since the previous tick.
        delta: f32,
    },
    /// Pointer position.
    Pointer {
        /// X position.
        x: i32,
        /// Y position.
        y: i32,
    },
    /// Pointer button with position.
    Button {
        /// Which button.
        button: MouseButton,
        /// X position.
        x: i32,
        /// Y position.
        y: i32,
    },
    /// Scroll delta.
    Wheel {
        /// Horizontal scroll.
        dx: i32,
        /// Vertical scroll.
        dy: i32,
    },
    /// Keyboard key.
    Key {
        /// Which key.
        key: Key,
        /// Modifiers held.
        modifiers: Modifiers,
    },
    /// Entered text.
    Text(String),
    /// New window size.
    Resize {
        /// Width in pixels.
        width: i32,
        /// Height in pixels.
        height: i32,
    },
    /// Application data for user kinds.
    User(u64),
}

/// A discrete event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    kind: EventKind,
    payload: Payload,
}

impl Event {
    /// Creates an event from parts.
    #[must_use]
    pub const fn new(kind: EventKind, payload: Payload) -> Self {
        Self { kind, payload }
    }

    /// Quit request.
    #[must_use]
    pub const fn quit() -> Self {
        Self::new(EventKind::Quit, Payload::None)
    }

    /// Per-frame tick.
    #[must_use]
    pub const fn tick(frame: u64, delta: f32) -> Self {
        Self::new(EventKind::Tick, Payload::Tick { frame, delta })
    }

    /// Pointer motion.
    #[must_use]
    pub const fn mouse_motion(x: i32, y: i32) -> Self {
        Self::new(EventKind::MouseMotion, Payload::Pointer { x, y })
    }

    /// Pointer button press.
    #[must_use]
    pub const fn mouse_down(button: MouseButton, x: i32, y: i32) -> Self {
        Self::new(EventKind::MouseButtonDown, Payload::Button { button, x, y })
    }

    /// Pointer button release.
    #[must_use]
    pub const fn mouse_up(button: MouseButton, x: i32, y: i32) -> Self {
        Self::new(EventKind::MouseButtonUp, Payload::Button { button, x, y })
    }

    /// Scroll wheel.
    #[must_use]
    pub const fn wheel(dx: i32, dy: i32) -> Self {
        Self::new(EventKind::MouseWheel, Payload::Wheel { dx, dy })
    }

    /// Key press.
    #[must_use]
    pub const fn key_down(key: Key, modifiers: Modifiers) -> Self {
        Self::new(EventKind::KeyDown, Payload::Key { key, modifiers })
    }

    /// Key release.
    #[must_use]
    pub const fn key_up(key: Key, modifiers: Modifiers) -> Self {
        Self::new(EventKind::KeyUp, Payload::Key { key, modifiers })
    }

    /// Text input.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(EventKind::TextInput, Payload::Text(text.into()))
    }

    /// Pointer entered the window.
    #[must_use]
    pub const fn window_enter() -> Self {
        Self::new(EventKind::WindowEnter, Payload::None)
    }

    /// Pointer left the window.
    #[must_use]
    pub const fn window_leave() -> Self {
        Self::new(EventKind::WindowLeave, Payload::None)
    }

    /// Window resized.
    #[must_use]
    pub const fn resized(width: i32, height: i32) -> Self {
        Self::new(EventKind::WindowResized, Payload::Resize { width, height })
    }

    /// Application-defined event.
    #[must_use]
    pub const fn user(code: u16, data: u64) -> Self {
        Self::new(EventKind::User(code), Payload::User(data))
    }

    /// The event's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// The event's payload.
    #[inline]
    #[must_use]
    pub const fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Pointer position, for pointer and button events.
    #[must_use]
    pub const fn position(&self) -> Option<(i32, i32)> {
        match self.payload {
            Payload::Pointer { x, y } | Payload::Button { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }

    /// Button, for button events.
    #[must_use]
    pub const fn button(&self) -> Option<MouseButton> {
        match self.payload {
            Payload::Button { button, .. } => Some(button),
            _ => None,
        }
    }

    /// Key, for keyboard events.
    #[must_use]
    pub const fn key(&self) -> Option<Key> {
        match self.payload {
            Payload::Key { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Returns true for the quit kind.
    #[must_use]
    pub fn is_quit(&self) -> bool {
        self.kind == EventKind::Quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(Event::mouse_motion(1, 2).kind(), EventKind::MouseMotion);
        assert_eq!(Event::user(3, 9).kind(), EventKind::User(3));
        assert!(Event::quit().is_quit());
    }

    #[test]
    fn test_position_accessor() {
        assert_eq!(Event::mouse_motion(4, 5).position(), Some((4, 5)));
        assert_eq!(Event::mouse_down(MouseButton::Left, 6, 7).position(), Some((6, 7)));
        assert_eq!(Event::window_leave().position(), None);
    }

    #[test]
    fn test_button_and_key_accessors() {
        assert_eq!(
            Event::mouse_up(MouseButton::Right, 0, 0).button(),
            Some(MouseButton::Right)
        );
        assert_eq!(Event::key_down(Key::Escape, Modifiers::default()).key(), Some(Key::Escape));
        assert_eq!(Event::text("hi").key(), None);
    }
}
