//! Image-backed pointer.

use std::rc::Rc;

use smudge_core::{Drawable, DrawableId, Image, Rect};
use smudge_events::{EventKind, EventListener, HandlerError};

use super::{Subscription, Widget};
use crate::stage::Stage;

/// Cursor images are scaled to this square size.
pub const CURSOR_SIZE: u32 = 25;

/// Point of the image that sits under the pointer, from its top-left corner.
pub const CURSOR_HOTSPOT: (i32, i32) = (10, 5);

/// A drawn pointer that follows the mouse and hides while the pointer is
/// outside the window.
///
/// Without an image the cursor is never visible.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    image: Option<Rc<Image>>,
}

impl Cursor {
    /// A cursor with no image.
    #[must_use]
    pub const fn new() -> Self {
        Self { image: None }
    }

    /// A cursor drawn with `image`, scaled to [`CURSOR_SIZE`].
    #[must_use]
    pub fn with_image(image: &Image) -> Self {
        Self {
            image: Some(Rc::new(image.scaled(CURSOR_SIZE, CURSOR_SIZE))),
        }
    }

    /// Returns true if the cursor has an image to draw.
    #[must_use]
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

impl Widget for Cursor {
    fn drawable(&mut self) -> Drawable {
        let Some(image) = self.image.clone() else {
            let mut drawable = Drawable::new(Rect::ZERO);
            drawable.set_visible(false);
            return drawable;
        };
        Drawable::with_render(image.rect_at(0, 0), move |surface, rect| {
            surface.blit(&image, rect.top_left());
            Ok(())
        })
    }

    fn subscription(&self, id: DrawableId) -> Option<Subscription> {
        let has_image = self.has_image();
        let listener: EventListener<Stage> = EventListener::new()
            .with_handler(EventKind::MouseMotion, move |event, stage: &mut Stage| {
                let (x, y) = event.position().ok_or(HandlerError::InvalidPayload {
                    kind: event.kind(),
                    expected: "pointer position",
                })?;
                stage
                    .require_mut(id)?
                    .move_to(x.saturating_sub(CURSOR_HOTSPOT.0), y.saturating_sub(CURSOR_HOTSPOT.1));
                Ok(())
            })
            .with_handler(EventKind::WindowLeave, move |_, stage: &mut Stage| {
                stage.require_mut(id)?.set_visible(false);
                Ok(())
            })
            .with_handler(EventKind::WindowEnter, move |_, stage: &mut Stage| {
                stage.require_mut(id)?.set_visible(has_image);
                Ok(())
            });

        Some(Subscription::new(
            listener,
            [
                EventKind::MouseMotion,
                EventKind::WindowLeave,
                EventKind::WindowEnter,
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smudge_core::{Color, RedrawConfig};
    use smudge_events::Event;

    fn spawn(mut cursor: Cursor) -> (Stage, DrawableId, Subscription) {
        let mut stage = Stage::new(RedrawConfig::default(), (640, 480));
        let id = stage.redraw_mut().add_one(cursor.drawable());
        let sub = cursor.subscription(id).expect("cursor listens");
        (stage, id, sub)
    }

    #[test]
    fn test_image_is_scaled() {
        let cursor = Cursor::with_image(&Image::solid(64, 64, Color::WHITE));
        let (stage, id, _) = spawn(cursor);
        assert_eq!(stage.drawable(id).map(Drawable::rect), Some(Rect::new(0, 0, 25, 25)));
    }

    #[test]
    fn test_follows_pointer_with_hotspot() {
        let (mut stage, id, mut sub) = spawn(Cursor::with_image(&Image::solid(8, 8, Color::WHITE)));
        sub.listener.dispatch_to_self(&Event::mouse_motion(100, 50), &mut stage);
        assert_eq!(stage.drawable(id).map(|d| d.rect().top_left()), Some((90, 45)));
    }

    #[test]
    fn test_hides_on_leave_and_shows_on_enter() {
        let (mut stage, id, mut sub) = spawn(Cursor::with_image(&Image::solid(8, 8, Color::WHITE)));
        assert!(sub.listener.has_handler(EventKind::WindowLeave));
        assert!(sub.listener.has_handler(EventKind::WindowEnter));

        sub.listener.dispatch_to_self(&Event::window_leave(), &mut stage);
        assert_eq!(stage.drawable(id).map(Drawable::is_visible), Some(false));

        sub.listener.dispatch_to_self(&Event::window_enter(), &mut stage);
        assert_eq!(stage.drawable(id).map(Drawable::is_visible), Some(true));
    }

    #[test]
    fn test_without_image_stays_hidden() {
        let (mut stage, id, mut sub) = spawn(Cursor::new());
        assert_eq!(stage.drawable(id).map(Drawable::is_visible), Some(false));

        sub.listener.dispatch_to_self(&Event::window_enter(), &mut stage);
        assert_eq!(stage.drawable(id).map(Drawable::is_visible), Some(false));
    }

    #[test]
    fn test_despawned_cursor_reports_stale() {
        let (mut stage, id, mut sub) = spawn(Cursor::new());
        stage.redraw_mut().remove_one(id);

        let delivery = sub.listener.dispatch_to_self(&Event::window_leave(), &mut stage);
        assert!(matches!(delivery.failures[0].error, HandlerError::Stale(_)));
    }
}
