//! Text button.

use std::cell::RefCell;
use std::rc::Rc;

use smudge_core::{Color, Drawable, DrawableId, Image, Rect, RenderError};
use smudge_events::{Event, EventKind, EventListener, HandlerError, HandlerResult};

use super::{Subscription, Widget};
use crate::config::ColorScheme;
use crate::stage::Stage;

/// Space between the button edge and its caption, on every side.
pub const BUTTON_PADDING: i32 = 5;

/// Click callback.
pub type ClickFn = Box<dyn FnMut(&Event, &mut Stage) -> HandlerResult>;

struct ButtonState {
    caption: Image,
    color: Color,
    pressed: bool,
    on_click: Vec<ClickFn>,
}

/// A caption on a colored box that reports clicks.
///
/// Handles are cheap clones of shared state, so a clone kept after
/// spawning can still register click callbacks.
#[derive(Clone)]
pub struct Button {
    state: Rc<RefCell<ButtonState>>,
    rect: Rect,
    scheme: ColorScheme,
}

impl Button {
    /// Creates a button with its top-left corner at `pos`.
    ///
    /// `caption` is the pre-rendered text; the button is the caption plus
    /// [`BUTTON_PADDING`] on each side.
    #[must_use]
    pub fn new(caption: Image, pos: (i32, i32), scheme: &ColorScheme) -> Self {
        let rect = Rect::new(
            pos.0,
            pos.1,
            caption.width() as i32 + 2 * BUTTON_PADDING,
            caption.height() as i32 + 2 * BUTTON_PADDING,
        );
        Self {
            state: Rc::new(RefCell::new(ButtonState {
                caption,
                color: scheme.button_idle,
                pressed: false,
                on_click: Vec::new(),
            })),
            rect,
            scheme: *scheme,
        }
    }

    /// Bounds the button is created with.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Current fill color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.state.borrow().color
    }

    /// Returns true between a press inside the button and the next release.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.state.borrow().pressed
    }

    /// Adds a function called with the release event on every click.
    ///
    /// A click is a press and a release both inside the button.
    pub fn on_click<F>(&self, callback: F)
    where
        F: FnMut(&Event, &mut Stage) -> HandlerResult + 'static,
    {
        self.state.borrow_mut().on_click.push(Box::new(callback));
    }

    fn set_color(&self, color: Color) {
        self.state.borrow_mut().color = color;
    }

    fn handle_motion(&self, id: DrawableId, event: &Event, stage: &mut Stage) -> HandlerResult {
        let (x, y) = pointer(event)?;
        let inside = stage.require(id)?.rect().contains(x, y);
        self.set_color(if inside {
            self.scheme.button_hover
        } else {
            self.scheme.button_idle
        });
        Ok(())
    }

    fn handle_down(&self, id: DrawableId, event: &Event, stage: &mut Stage) -> HandlerResult {
        let (x, y) = pointer(event)?;
        if stage.require(id)?.rect().contains(x, y) {
            let mut state = self.state.borrow_mut();
            state.pressed = true;
            state.color = self.scheme.button_pressed;
        }
        Ok(())
    }

    fn handle_up(&self, id: DrawableId, event: &Event, stage: &mut Stage) -> HandlerResult {
        let (x, y) = pointer(event)?;
        let inside = stage.require(id)?.rect().contains(x, y);
        let was_pressed = std::mem::replace(&mut self.state.borrow_mut().pressed, false);
        if !inside {
            return Ok(());
        }

        self.set_color(self.scheme.button_hover);
        if was_pressed {
            self.fire_click(event, stage)
        } else {
            Ok(())
        }
    }

    /// Runs every click callback, even after one fails. Returns the first
    /// failure.
    fn fire_click(&self, event: &Event, stage: &mut Stage) -> HandlerResult {
        // Callbacks run with the state released so they may add callbacks
        // or inspect the button.
        let mut callbacks = std::mem::take(&mut self.state.borrow_mut().on_click);
        let mut first_error = None;
        for callback in &mut callbacks {
            if let Err(error) = callback(event, stage) {
                first_error.get_or_insert(error);
            }
        }

        let mut state = self.state.borrow_mut();
        let added = std::mem::replace(&mut state.on_click, callbacks);
        state.on_click.extend(added);

        first_error.map_or(Ok(()), Err)
    }
}

impl Widget for Button {
    fn drawable(&mut self) -> Drawable {
        let state = Rc::clone(&self.state);
        Drawable::with_render(self.rect, move |surface, rect| {
            let state = state
                .try_borrow()
                .map_err(|_| RenderError::failed("button state is borrowed"))?;
            surface.fill_rect(rect, state.color);
            surface.blit(&state.caption, rect.translate(BUTTON_PADDING, BUTTON_PADDING).top_left());
            Ok(())
        })
    }

    fn subscription(&self, id: DrawableId) -> Option<Subscription> {
        let mut listener: EventListener<Stage> = EventListener::new();

        let button = self.clone();
        listener.on(EventKind::MouseMotion, move |event, stage| {
            button.handle_motion(id, event, stage)
        });
        let button = self.clone();
        listener.on(EventKind::MouseButtonDown, move |event, stage| {
            button.handle_down(id, event, stage)
        });
        let button = self.clone();
        listener.on(EventKind::MouseButtonUp, move |event, stage| {
            button.handle_up(id, event, stage)
        });

        Some(Subscription::new(
            listener,
            [
                EventKind::MouseMotion,
                EventKind::MouseButtonDown,
                EventKind::MouseButtonUp,
            ],
        ))
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("rect", &self.rect)
            .field("color", &self.color())
            .field("pressed", &self.is_pressed())
            .finish_non_exhaustive()
    }
}

fn pointer(event: &Event) -> Result<(i32, i32), HandlerError> {
    event.position().ok_or(HandlerError::InvalidPayload {
        kind: event.kind(),
        expected: "pointer position",
    })
}
