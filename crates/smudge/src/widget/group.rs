//! Drawables moved and drawn as one.

use smudge_core::{Drawable, Rect};

use super::Widget;

/// A bundle of drawables tracked as a single drawable.
///
/// The group's rect is the union of its children's rects. Moving the group
/// moves every child by the same offset.
#[derive(Debug, Default)]
pub struct Group {
    children: Vec<Drawable>,
}

impl Group {
    /// An empty group.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Adds a child (builder form).
    #[must_use]
    pub fn with_child(mut self, child: Drawable) -> Self {
        self.push(child);
        self
    }

    /// Adds a child. Children draw in insertion order.
    pub fn push(&mut self, child: Drawable) {
        self.children.push(child);
    }

    /// Number of children not yet handed to a drawable.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Union of the children's rects; [`Rect::ZERO`] when empty.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.children
            .iter()
            .map(Drawable::rect)
            .reduce(|acc, rect| acc.union(&rect))
            .unwrap_or(Rect::ZERO)
    }
}

impl Widget for Group {
    /// Moves the children into a single drawable. The group is left empty.
    fn drawable(&mut self) -> Drawable {
        let origin = self.bounds();
        let mut children: Vec<(Rect, Drawable)> = std::mem::take(&mut self.children)
            .into_iter()
            .map(|child| (child.rect(), child))
            .collect();

        Drawable::with_render(origin, move |surface, rect| {
            let (dx, dy) = (rect.x.saturating_sub(origin.x), rect.y.saturating_sub(origin.y));
            for (home, child) in &mut children {
                child.set_rect(home.translate(dx, dy));
                if child.is_visible() {
                    child.render_now(surface)?;
                }
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smudge_core::{Color, RecordingSurface, SurfaceOp};

    fn filled(rect: Rect, color: Color) -> Drawable {
        Drawable::with_render(rect, move |surface, rect| {
            surface.fill_rect(rect, color);
            Ok(())
        })
    }

    #[test]
    fn test_bounds_is_union() {
        let group = Group::new()
            .with_child(Drawable::new(Rect::new(10, 10, 5, 5)))
            .with_child(Drawable::new(Rect::new(30, 0, 10, 40)));
        assert_eq!(group.bounds(), Rect::new(10, 0, 30, 40));
        assert_eq!(Group::new().bounds(), Rect::ZERO);
    }

    #[test]
    fn test_children_follow_group() {
        let mut group = Group::new()
            .with_child(filled(Rect::new(0, 0, 4, 4), Color::WHITE))
            .with_child(filled(Rect::new(10, 0, 4, 4), Color::BLUE));
        let mut drawable = group.drawable();
        assert!(group.is_empty());

        drawable.move_by(100, 50);
        let mut surface = RecordingSurface::new(640, 480);
        drawable.render_now(&mut surface).expect("render");

        assert_eq!(
            surface.ops(),
            &[
                SurfaceOp::Fill {
                    rect: Rect::new(100, 50, 4, 4),
                    color: Color::WHITE
                },
                SurfaceOp::Fill {
                    rect: Rect::new(110, 50, 4, 4),
                    color: Color::BLUE
                },
            ]
        );
        assert_eq!(drawable.last_drawn_rect(), Some(Rect::new(100, 50, 14, 4)));
    }

    #[test]
    fn test_hidden_child_is_skipped() {
        let mut hidden = filled(Rect::new(0, 0, 2, 2), Color::WHITE);
        hidden.set_visible(false);
        let mut group = Group::new()
            .with_child(hidden)
            .with_child(filled(Rect::new(5, 5, 2, 2), Color::ROSE));

        let mut drawable = group.drawable();
        let mut surface = RecordingSurface::new(64, 64);
        drawable.render_now(&mut surface).expect("render");

        assert_eq!(surface.ops().len(), 1);
    }
}
