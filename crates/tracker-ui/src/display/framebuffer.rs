//! Logical back buffer with change tracking.
//!
//! Controls draw into this RAM buffer in logical coordinates. A display
//! device then copies (blits) rectangles of it to the physical surface,
//! applying its orientation on the way. The buffer remembers the bounding
//! box of pixels that actually changed, so a device can push only that box.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::display::Orientation;
use crate::geometry::{Point as UiPoint, Rect, Size as UiSize};

/// Bounding box of pixels that changed since the last flush.
#[derive(Debug, Clone, Copy)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn to_rect(self) -> Rect {
        Rect::new(
            self.min_x as i32,
            self.min_y as i32,
            self.max_x as i32 + 1,
            self.max_y as i32 + 1,
        )
    }
}

/// Heap-allocated `DrawTarget<Color = Rgb888>` of any logical size.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb888>,
    dirty: Option<DirtyRect>,
}

impl FrameBuffer {
    /// Allocate a black buffer of `size` logical pixels.
    pub fn new(size: UiSize) -> Self {
        let width = size.width.max(0) as usize;
        let height = size.height.max(0) as usize;
        Self {
            width,
            height,
            pixels: vec![Rgb888::BLACK; width * height],
            dirty: None,
        }
    }

    pub fn logical_size(&self) -> UiSize {
        UiSize::new(self.width as i32, self.height as i32)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_location_size(UiPoint::zero(), self.logical_size())
    }

    /// Reallocate for a new size. Previous content is dropped.
    pub fn resize(&mut self, size: UiSize) {
        *self = Self::new(size);
    }

    pub fn pixel(&self, p: UiPoint) -> Option<Rgb888> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        let (x, y) = (p.x as usize, p.y as usize);
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Region changed since the last [`take_dirty`](Self::take_dirty).
    pub fn dirty_rect(&self) -> Option<Rect> {
        self.dirty.map(DirtyRect::to_rect)
    }

    pub fn take_dirty(&mut self) -> Option<Rect> {
        self.dirty.take().map(DirtyRect::to_rect)
    }

    /// Write a single pixel, expanding the dirty box only if the color changed.
    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb888) {
        let idx = y * self.width + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Copy the logical `rect` to a physical target through `orientation`.
    ///
    /// The rectangle is clipped to the buffer first; an empty intersection is
    /// a no-op.
    pub fn blit<D>(&self, target: &mut D, rect: Rect, orientation: Orientation) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let Some(area) = rect.clip(&self.bounds()) else {
            return Ok(());
        };

        debug!(
            "Blitting {}x{} region at ({}, {}) {:?}",
            area.width(),
            area.height(),
            area.x1,
            area.y1,
            orientation
        );

        let pixels = &self.pixels;
        let stride = self.width;
        let (x1, x2) = (area.x1 as usize, area.x2 as usize);
        let rows = area.y1 as usize..area.y2 as usize;

        if orientation == Orientation::Normal {
            let pixel_iter = rows.flat_map(move |y| {
                let row_start = y * stride;
                pixels[row_start + x1..row_start + x2].iter().copied()
            });
            return target.fill_contiguous(&Rectangle::from(area), pixel_iter);
        }

        let logical = self.logical_size();
        let pixel_iter = rows.flat_map(move |y| {
            (x1..x2).map(move |x| {
                let physical = orientation.transform(UiPoint::new(x as i32, y as i32), logical);
                Pixel(physical.into(), pixels[y * stride + x])
            })
        });
        target.draw_iter(pixel_iter)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (w, h) = (self.width, self.height);
        for Pixel(coord, color) in pixels {
            let (x, y) = (coord.x, coord.y);
            if x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let (w, h) = (self.width as i32, self.height as i32);
        let mut colors = colors.into_iter();
        for row in 0..area.size.height as i32 {
            let y = area.top_left.y + row;
            for col in 0..area.size.width as i32 {
                let x = area.top_left.x + col;
                let Some(color) = colors.next() else {
                    return Ok(());
                };
                if (0..w).contains(&x) && (0..h).contains(&y) {
                    self.set_pixel(x as usize, y as usize, color);
                }
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let Some(clipped) = Rect::from(*area).clip(&self.bounds()) else {
            return Ok(());
        };
        for y in clipped.y1 as usize..clipped.y2 as usize {
            for x in clipped.x1 as usize..clipped.x2 as usize {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn only_changed_pixels_are_dirty() {
        let mut fb = FrameBuffer::new(UiSize::new(16, 8));
        assert_eq!(fb.dirty_rect(), None);

        fb.fill_solid(&Rectangle::new(Point::new(0, 0), Size::new(4, 4)), Rgb888::BLACK)
            .ok();
        assert_eq!(fb.dirty_rect(), None);

        Rectangle::new(Point::new(2, 3), Size::new(3, 2))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::RED))
            .draw(&mut fb)
            .ok();
        assert_eq!(fb.take_dirty(), Some(Rect::new(2, 3, 5, 5)));
        assert_eq!(fb.dirty_rect(), None);
        assert_eq!(fb.pixel(UiPoint::new(4, 4)), Some(Rgb888::RED));
        assert_eq!(fb.pixel(UiPoint::new(16, 0)), None);
    }

    #[test]
    fn fill_contiguous_skips_offscreen_pixels_in_order() {
        let mut fb = FrameBuffer::new(UiSize::new(4, 4));
        let colors = [Rgb888::RED, Rgb888::GREEN, Rgb888::BLUE, Rgb888::WHITE];
        fb.fill_contiguous(&Rectangle::new(Point::new(-1, 0), Size::new(2, 2)), colors)
            .ok();
        assert_eq!(fb.pixel(UiPoint::new(0, 0)), Some(Rgb888::GREEN));
        assert_eq!(fb.pixel(UiPoint::new(0, 1)), Some(Rgb888::WHITE));
    }
}
