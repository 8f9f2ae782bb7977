//! Static caption.

use std::rc::Rc;

use smudge_core::{Drawable, Image, Rect};

use super::Widget;

/// A pre-rendered caption, centered horizontally on a point.
#[derive(Debug, Clone)]
pub struct Label {
    caption: Rc<Image>,
    rect: Rect,
}

impl Label {
    /// Places `caption` with its top edge at `y` and its horizontal center
    /// at `x`.
    #[must_use]
    pub fn new(caption: Image, (x, y): (i32, i32)) -> Self {
        let width = caption.width() as i32;
        let rect = caption.rect_at(x - width / 2, y);
        Self {
            caption: Rc::new(caption),
            rect,
        }
    }

    /// Bounds of the caption.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }
}

impl Widget for Label {
    fn drawable(&mut self) -> Drawable {
        let caption = Rc::clone(&self.caption);
        Drawable::with_render(self.rect, move |surface, rect| {
            surface.blit(&caption, rect.top_left());
            Ok(())
        })
    }
}
