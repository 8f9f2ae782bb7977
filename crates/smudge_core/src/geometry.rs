//! Screen-space rectangle geometry.
//!
//! All coordinates are integer pixels. A rectangle's extent is treated as
//! closed for collision purposes: two rectangles that share only an edge
//! collide.
//!
//! Arithmetic saturates at the `i32` range, so edges past `i32::MAX` are
//! clamped rather than wrapping.

/// An axis-aligned rectangle in screen coordinates.
///
/// Width and height are never negative; every constructor clamps them to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// X position (left edge).
    pub x: i32,
    /// Y position (top edge).
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Creates a new rectangle, clamping negative sizes to 0.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Creates a rectangle from position and size.
    #[must_use]
    pub const fn from_pos_size(pos: (i32, i32), size: (i32, i32)) -> Self {
        Self::new(pos.0, pos.1, size.0, size.1)
    }

    /// Creates the rectangle spanning two corners, in any order.
    #[must_use]
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        let x = a.0.min(b.0);
        let y = a.1.min(b.1);
        Self::new(x, y, a.0.max(b.0).saturating_sub(x), a.1.max(b.1).saturating_sub(y))
    }

    /// Returns the right edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Returns the bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Returns the top-left corner.
    #[must_use]
    pub const fn top_left(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Returns the size as `(width, height)`.
    #[must_use]
    pub const fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Returns the center point (rounded toward the top-left).
    #[must_use]
    pub const fn center(&self) -> (i32, i32) {
        (
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }

    /// Returns the area in pixels.
    #[must_use]
    pub const fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Returns true if the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns true if the point lies on a pixel covered by the rectangle.
    ///
    /// Pixel coverage is half-open: the right and bottom edges are outside.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns true if `other` lies entirely within this rectangle.
    #[must_use]
    pub const fn contains_rect(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns true if the closed extents of the two rectangles overlap.
    ///
    /// This is the collision test used by the redraw manager.
    #[must_use]
    pub const fn collides(&self, other: &Self) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Returns the overlapping region, or `None` if the rectangles share no
    /// pixels.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= x || bottom <= y {
            return None;
        }

        Some(Self::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y)))
    }

    /// Returns the smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_corners(
            (self.x.min(other.x), self.y.min(other.y)),
            (self.right().max(other.right()), self.bottom().max(other.bottom())),
        )
    }

    /// Expands the rectangle by the given amount on all sides.
    #[must_use]
    pub const fn expand(&self, amount: i32) -> Self {
        let grow = amount.saturating_mul(2);
        Self::new(
            self.x.saturating_sub(amount),
            self.y.saturating_sub(amount),
            self.width.saturating_add(grow),
            self.height.saturating_add(grow),
        )
    }

    /// Shrinks the rectangle by the given amount on all sides.
    #[must_use]
    pub const fn shrink(&self, amount: i32) -> Self {
        self.expand(amount.saturating_neg())
    }

    /// Returns a copy moved so its top-left corner is at `(x, y)`.
    #[must_use]
    pub const fn at(&self, x: i32, y: i32) -> Self {
        Self::new(x, y, self.width, self.height)
    }

    /// Returns a copy shifted by `(dx, dy)`.
    #[must_use]
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10, 20, 100, 50);

        assert!(rect.contains(50, 30));
        assert!(rect.contains(10, 20));
        assert!(!rect.contains(110, 30));
        assert!(!rect.contains(5, 30));
        assert!(!rect.contains(50, 80));
    }

    #[test]
    fn test_negative_size_clamped() {
        let rect = Rect::new(5, 5, -3, -8);
        assert_eq!(rect.size(), (0, 0));
        assert!(rect.is_empty());
    }

    #[test]
    fn test_collision_is_closed() {
        let a = Rect::new(0, 0, 10, 10);

        assert!(a.collides(&Rect::new(5, 5, 10, 10)));
        // Shared edge counts.
        assert!(a.collides(&Rect::new(10, 0, 10, 10)));
        assert!(!a.collides(&Rect::new(11, 0, 10, 10)));
        assert!(!a.collides(&Rect::new(100, 100, 10, 10)));
    }

    #[test]
    fn test_collision_is_symmetric() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(-4, 9, 3, 3);
        assert_eq!(a.collides(&b), b.collides(&a));
    }

    #[test]
    fn test_intersection_and_union() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);

        assert_eq!(a.intersection(&b), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.intersection(&Rect::new(10, 0, 5, 5)), None);
        assert_eq!(a.union(&b), Rect::new(0, 0, 15, 15));
    }

    #[test]
    fn test_extreme_coordinates_saturate() {
        let edge = Rect::new(i32::MAX - 5, 0, 10, 10);
        assert_eq!(edge.right(), i32::MAX);
        assert!(!edge.collides(&Rect::new(0, 0, 10, 10)));
        assert!(edge.collides(&Rect::new(i32::MAX - 1, 5, 1, 1)));

        assert_eq!(edge.translate(100, 0).x, i32::MAX);
        assert_eq!(Rect::new(i32::MIN, 0, 1, 1).translate(-1, 0).x, i32::MIN);
        assert_eq!(edge.center(), (i32::MAX, 5));

        let huge = Rect::new(0, 0, 100, 100).expand(i32::MAX);
        assert_eq!(huge.x, -i32::MAX);
        assert_eq!(huge.width, i32::MAX);

        let span = Rect::from_corners((-10, 0), (i32::MAX, 1));
        assert_eq!(span.width, i32::MAX);
        assert_eq!(
            span.intersection(&Rect::new(0, 0, 10, 10)),
            Some(Rect::new(0, 0, 10, 1))
        );
    }

    #[test]
    fn test_expand_viewport() {
        let screen = Rect::new(0, 0, 640, 480);
        assert_eq!(screen.expand(50), Rect::new(-50, -50, 740, 580));
        assert_eq!(screen.expand(50).shrink(50), screen);
    }
}
