//! Event kinds and their conventional handler names.

use std::fmt;

/// Discriminator for the category of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// The event source asked the frame loop to stop.
    Quit,
    /// Fired once per frame after redraw.
    Tick,
    /// Pointer moved.
    MouseMotion,
    /// Pointer button pressed.
    MouseButtonDown,
    /// Pointer button released.
    MouseButtonUp,
    /// Scroll wheel moved.
    MouseWheel,
    /// Key pressed.
    KeyDown,
    /// Key released.
    KeyUp,
    /// Text entered.
    TextInput,
    /// Pointer entered the window.
    WindowEnter,
    /// Pointer left the window.
    WindowLeave,
    /// Window gained keyboard focus.
    WindowFocusGained,
    /// Window lost keyboard focus.
    WindowFocusLost,
    /// Window was resized.
    WindowResized,
    /// Application-defined event, distinguished by code.
    User(u16),
}

impl EventKind {
    /// Every built-in kind, in declaration order.
    pub const BUILTIN: [Self; 14] = [
        Self::Quit,
        Self::Tick,
        Self::MouseMotion,
        Self::MouseButtonDown,
        Self::MouseButtonUp,
        Self::MouseWheel,
        Self::KeyDown,
        Self::KeyUp,
        Self::TextInput,
        Self::WindowEnter,
        Self::WindowLeave,
        Self::WindowFocusGained,
        Self::WindowFocusLost,
        Self::WindowResized,
    ];

    /// The kind's name in CamelCase.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::Tick => "Tick",
            Self::MouseMotion => "MouseMotion",
            Self::MouseButtonDown => "MouseButtonDown",
            Self::MouseButtonUp => "MouseButtonUp",
            Self::MouseWheel => "MouseWheel",
            Self::KeyDown => "KeyDown",
            Self::KeyUp => "KeyUp",
            Self::TextInput => "TextInput",
            Self::WindowEnter => "WindowEnter",
            Self::WindowLeave => "WindowLeave",
            Self::WindowFocusGained => "WindowFocusGained",
            Self::WindowFocusLost => "WindowFocusLost",
            Self::WindowResized => "WindowResized",
            Self::User(_) => "UserEvent",
        }
    }

    /// The conventional handler name: `on_` plus the snake_case kind name.
    ///
    /// `MouseButtonDown` → `on_mouse_button_down`. Every user kind maps to
    /// `on_user_event`.
    #[must_use]
    pub fn handler_name(self) -> String {
        format!("on_{}", camel_to_snake(self.name()))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(code) => write!(f, "UserEvent({code})"),
            other => f.write_str(other.name()),
        }
    }
}

/// Converts `CamelCase` to `snake_case`.
///
/// An underscore goes before every uppercase letter except the first
/// character, then everything is lowercased.
#[must_use]
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}
