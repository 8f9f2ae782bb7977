//! Drawables: rectangle-bounded render units.

use std::fmt;

use crate::error::RenderError;
use crate::geometry::Rect;
use crate::surface::Surface;

/// Identity of a drawable tracked by a [`RedrawManager`](crate::RedrawManager).
///
/// Assigned on `add`. Two drawables with identical rects are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DrawableId(u64);

impl DrawableId {
    /// Creates a drawable ID from its raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DrawableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Render callback.
///
/// Receives the surface and the drawable's rect at render time.
pub type RenderFn = Box<dyn FnMut(&mut dyn Surface, Rect) -> Result<(), RenderError>>;

/// A trackable rectangle-bounded render unit.
pub struct Drawable {
    rect: Rect,
    last_drawn_rect: Option<Rect>,
    visible: bool,
    render: RenderFn,
}

impl Drawable {
    /// Creates a visible drawable whose render callback draws nothing.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            last_drawn_rect: None,
            visible: true,
            render: Box::new(|_, _| Ok(())),
        }
    }

    /// Creates a drawable with a render callback.
    #[must_use]
    pub fn with_render<F>(rect: Rect, render: F) -> Self
    where
        F: FnMut(&mut dyn Surface, Rect) -> Result<(), RenderError> + 'static,
    {
        let mut drawable = Self::new(rect);
        drawable.set_render(render);
        drawable
    }

    /// Replaces the render callback.
    pub fn set_render<F>(&mut self, render: F)
    where
        F: FnMut(&mut dyn Surface, Rect) -> Result<(), RenderError> + 'static,
    {
        self.render = Box::new(render);
    }

    /// Runs the render callback, then records the current rect as the
    /// footprint to erase next time.
    ///
    /// The footprint is only recorded if the callback succeeds.
    ///
    /// # Errors
    ///
    /// Returns whatever the render callback returns.
    pub fn render_now(&mut self, surface: &mut dyn Surface) -> Result<(), RenderError> {
        (self.render)(surface, self.rect)?;
        self.last_drawn_rect = Some(self.rect);
        Ok(())
    }

    /// Current bounds.
    #[inline]
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Replaces the bounds. Takes effect on the next redraw.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Moves the top-left corner to `(x, y)`.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.rect = self.rect.at(x, y);
    }

    /// Shifts the bounds by `(dx, dy)`.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.rect = self.rect.translate(dx, dy);
    }

    /// Bounds as of the last successful render, if any.
    #[inline]
    #[must_use]
    pub const fn last_drawn_rect(&self) -> Option<Rect> {
        self.last_drawn_rect
    }

    /// Forgets the last drawn footprint.
    pub(crate) fn forget_footprint(&mut self) {
        self.last_drawn_rect = None;
    }

    /// Records `rect` as the footprint to erase next time, whether or not a
    /// render completed there.
    pub(crate) fn mark_footprint(&mut self, rect: Rect) {
        self.last_drawn_rect = Some(rect);
    }

    /// Shows or hides the drawable. Hidden drawables are still tracked for
    /// collisions.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Returns true if the drawable is rendered during redraws.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true if the rect changed since the last successful render.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.last_drawn_rect != Some(self.rect)
    }
}

impl fmt::Debug for Drawable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drawable")
            .field("rect", &self.rect)
            .field("last_drawn_rect", &self.last_drawn_rect)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::surface::{RecordingSurface, SurfaceOp};

    #[test]
    fn test_render_records_footprint() {
        let mut surface = RecordingSurface::new(100, 100);
        let mut drawable = Drawable::with_render(Rect::new(1, 2, 3, 4), |surface, rect| {
            surface.fill_rect(rect, Color::WHITE);
            Ok(())
        });

        assert_eq!(drawable.last_drawn_rect(), None);
        drawable.render_now(&mut surface).expect("render");
        assert_eq!(drawable.last_drawn_rect(), Some(Rect::new(1, 2, 3, 4)));

        drawable.move_to(50, 50);
        assert!(drawable.has_moved());
        // The footprint is still the old one until the next render.
        assert_eq!(drawable.last_drawn_rect(), Some(Rect::new(1, 2, 3, 4)));
    }

    #[test]
    fn test_render_reads_current_rect() {
        let mut surface = RecordingSurface::new(100, 100);
        let mut drawable = Drawable::with_render(Rect::new(0, 0, 5, 5), |surface, rect| {
            surface.fill_rect(rect, Color::WHITE);
            Ok(())
        });

        drawable.move_by(10, 20);
        drawable.render_now(&mut surface).expect("render");

        assert_eq!(
            surface.ops(),
            &[SurfaceOp::Fill {
                rect: Rect::new(10, 20, 5, 5),
                color: Color::WHITE
            }]
        );
    }

    #[test]
    fn test_failed_render_keeps_previous_footprint() {
        let mut surface = RecordingSurface::new(100, 100);
        let mut drawable = Drawable::new(Rect::new(0, 0, 5, 5));
        drawable.render_now(&mut surface).expect("default render");

        drawable.set_render(|_, _| Err(RenderError::failed("boom")));
        drawable.move_to(30, 30);

        assert!(drawable.render_now(&mut surface).is_err());
        assert_eq!(drawable.last_drawn_rect(), Some(Rect::new(0, 0, 5, 5)));
    }

    #[test]
    fn test_visibility_toggle() {
        let mut drawable = Drawable::new(Rect::ZERO);
        assert!(drawable.is_visible());
        drawable.set_visible(false);
        assert!(!drawable.is_visible());
        drawable.set_visible(true);
        assert!(drawable.is_visible());
    }
}
