//! Presentation surfaces.
//!
//! The redraw manager only needs three things from a surface: fill a
//! rectangle, blit an image, and report its bounds. Window-backed surfaces
//! live outside this crate; the two here are in-memory.
//!
//! - [`RecordingSurface`] logs every write in order. Tests use it as a spy to
//!   check erase-before-redraw ordering.
//! - [`PixelSurface`] is a real framebuffer, for checking what ends up on
//!   screen (ghosting shows up as stale pixels).

use crate::color::Color;
use crate::geometry::Rect;

/// An RGBA pixel image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Image {
    /// Creates an image filled with one color.
    #[must_use]
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
        }
    }

    /// Creates an image from row-major pixels.
    ///
    /// Returns `None` if `pixels.len() != width * height`.
    #[must_use]
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        if pixels.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image width.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image bounds placed at `(x, y)`.
    #[must_use]
    pub const fn rect_at(&self, x: i32, y: i32) -> Rect {
        Rect::new(x, y, self.width as i32, self.height as i32)
    }

    /// Returns the pixel at `(x, y)`, if in bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get((y as usize) * (self.width as usize) + x as usize)
            .copied()
    }

    /// Returns a copy scaled to a new size (nearest neighbor).
    #[must_use]
    pub fn scaled(&self, width: u32, height: u32) -> Self {
        if self.width == 0 || self.height == 0 {
            return Self::solid(width, height, Color::TRANSPARENT);
        }
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            let sy = (u64::from(y) * u64::from(self.height) / u64::from(height.max(1))) as u32;
            for x in 0..width {
                let sx = (u64::from(x) * u64::from(self.width) / u64::from(width.max(1))) as u32;
                pixels.push(self.pixel(sx, sy).unwrap_or(Color::TRANSPARENT));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Row-major pixel slice.
    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }
}

/// A drawing target.
///
/// Only the redraw manager writes to a surface, and only from inside
/// [`RedrawManager::redraw_frame`](crate::RedrawManager::redraw_frame).
pub trait Surface {
    /// Fills `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Copies `image` with its top-left corner at `position`.
    fn blit(&mut self, image: &Image, position: (i32, i32));

    /// Returns the current visible bounds.
    fn bounds(&self) -> Rect;

    /// Presents the finished frame. No-op for off-screen surfaces.
    fn present(&mut self) {}
}

/// A single recorded surface write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    /// `fill_rect` call.
    Fill {
        /// Filled region.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// `blit` call, recorded by destination rectangle.
    Blit {
        /// Destination region.
        rect: Rect,
    },
    /// `present` call.
    Present,
}

impl SurfaceOp {
    /// Returns the region this op touched, if any.
    #[must_use]
    pub const fn rect(&self) -> Option<Rect> {
        match self {
            Self::Fill { rect, .. } | Self::Blit { rect } => Some(*rect),
            Self::Present => None,
        }
    }
}

/// A surface that records every write.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    bounds: Rect,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    /// Creates a recording surface of the given size.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            bounds: Rect::new(0, 0, width, height),
            ops: Vec::with_capacity(256),
        }
    }

    /// All writes since creation or the last [`clear`](Self::clear).
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Forgets recorded writes.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Takes the recorded writes, leaving the log empty.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Counts fills of exactly `rect`.
    #[must_use]
    pub fn fills_of(&self, rect: Rect) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Fill { rect: r, .. } if *r == rect))
            .count()
    }

    /// Resizes the reported bounds (a window resize).
    pub fn resize(&mut self, width: i32, height: i32) {
        self.bounds = Rect::new(self.bounds.x, self.bounds.y, width, height);
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(SurfaceOp::Fill { rect, color });
    }

    fn blit(&mut self, image: &Image, position: (i32, i32)) {
        self.ops.push(SurfaceOp::Blit {
            rect: image.rect_at(position.0, position.1),
        });
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn present(&mut self) {
        self.ops.push(SurfaceOp::Present);
    }
}

/// An in-memory RGBA framebuffer.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    presented: u64,
}

impl PixelSurface {
    /// Creates a framebuffer cleared to `clear`.
    #[must_use]
    pub fn new(width: i32, height: i32, clear: Color) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            pixels: vec![clear; (width as usize) * (height as usize)],
            presented: 0,
        }
    }

    /// Returns the pixel at `(x, y)`, if on the surface.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if !self.bounds().contains(x, y) {
            return None;
        }
        self.pixels
            .get((y as usize) * (self.width as usize) + x as usize)
            .copied()
    }

    /// Returns true if every pixel of `rect` (clipped to the surface) is `color`.
    #[must_use]
    pub fn region_is(&self, rect: Rect, color: Color) -> bool {
        let Some(clipped) = rect.intersection(&self.bounds()) else {
            return true;
        };
        (clipped.y..clipped.bottom())
            .all(|y| (clipped.x..clipped.right()).all(|x| self.pixel(x, y) == Some(color)))
    }

    /// Raw framebuffer bytes, RGBA row-major.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Number of presented frames.
    #[must_use]
    pub const fn presented(&self) -> u64 {
        self.presented
    }

    fn put(&mut self, x: i32, y: i32, color: Color) {
        let index = (y as usize) * (self.width as usize) + x as usize;
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }
}

impl Surface for PixelSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clipped) = rect.intersection(&self.bounds()) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.put(x, y, color);
            }
        }
    }

    fn blit(&mut self, image: &Image, position: (i32, i32)) {
        let dest = image.rect_at(position.0, position.1);
        let Some(clipped) = dest.intersection(&self.bounds()) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                let source = image.pixel((x - dest.x) as u32, (y - dest.y) as u32);
                // Fully transparent pixels leave the destination alone.
                if let Some(color) = source.filter(|c| !c.is_transparent()) {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_order() {
        let mut surface = RecordingSurface::new(100, 100);
        let image = Image::solid(4, 4, Color::WHITE);

        surface.fill_rect(Rect::new(0, 0, 10, 10), Color::BLACK);
        surface.blit(&image, (3, 3));

        assert_eq!(surface.ops().len(), 2);
        assert_eq!(surface.ops()[1], SurfaceOp::Blit { rect: Rect::new(3, 3, 4, 4) });
        assert_eq!(surface.fills_of(Rect::new(0, 0, 10, 10)), 1);
    }

    #[test]
    fn test_pixel_fill_clips() {
        let mut surface = PixelSurface::new(20, 20, Color::BLACK);
        surface.fill_rect(Rect::new(15, 15, 10, 10), Color::WHITE);

        assert_eq!(surface.pixel(19, 19), Some(Color::WHITE));
        assert_eq!(surface.pixel(14, 14), Some(Color::BLACK));
        assert_eq!(surface.pixel(20, 20), None);
        assert!(surface.region_is(Rect::new(15, 15, 5, 5), Color::WHITE));
    }

    #[test]
    fn test_blit_skips_transparent() {
        let mut surface = PixelSurface::new(4, 4, Color::BLACK);
        let image = Image::from_pixels(2, 1, vec![Color::WHITE, Color::TRANSPARENT])
            .expect("2x1 image");
        surface.blit(&image, (1, 1));

        assert_eq!(surface.pixel(1, 1), Some(Color::WHITE));
        assert_eq!(surface.pixel(2, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_bytes_view() {
        let surface = PixelSurface::new(2, 2, Color::rgba(1, 2, 3, 4));
        assert_eq!(surface.as_bytes().len(), 16);
        assert_eq!(&surface.as_bytes()[..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_image_scaled() {
        let image = Image::solid(2, 2, Color::WHITE).scaled(25, 25);
        assert_eq!(image.width(), 25);
        assert_eq!(image.pixel(24, 24), Some(Color::WHITE));
    }
}
