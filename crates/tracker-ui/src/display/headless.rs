//! In-memory display device
//!
//! Keeps the physical surface as a pixel vector and logs every update, which
//! makes it usable for tests and off-screen rendering.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, RgbColor};
use log::{debug, info};

use crate::color::Color;
use crate::display::{
    DisplayDevice, DisplayError, FrameBuffer, MouseCursor, Orientation, check_size,
};
use crate::geometry::{Point, Rect, Size};
use crate::string::UiString;

/// Physical pixels, already rotated.
struct Surface {
    size: Size,
    pixels: Vec<Rgb888>,
}

impl Surface {
    fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![Rgb888::BLACK; (size.width.max(0) * size.height.max(0)) as usize],
        }
    }
}

impl OriginDimensions for Surface {
    fn size(&self) -> embedded_graphics::prelude::Size {
        self.size.into()
    }
}

impl DrawTarget for Surface {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x >= 0 && p.y >= 0 && p.x < self.size.width && p.y < self.size.height {
                self.pixels[(p.y * self.size.width + p.x) as usize] = color;
            }
        }
        Ok(())
    }
}

pub struct HeadlessDisplay {
    frame: FrameBuffer,
    orientation: Orientation,
    surface: Surface,
    updates: Vec<Rect>,
    title: UiString,
    cursor: MouseCursor,
    full_screen: bool,
    wait_color: Option<Color>,
    is_open: bool,
    is_shut_down: bool,
}

impl HeadlessDisplay {
    pub fn new(logical: Size, orientation: Orientation) -> Result<Self, DisplayError> {
        check_size(logical)?;
        Ok(Self {
            frame: FrameBuffer::new(logical),
            orientation,
            surface: Surface::new(orientation.physical_size(logical)),
            updates: Vec::new(),
            title: UiString::new(),
            cursor: MouseCursor::Standard,
            full_screen: false,
            wait_color: None,
            is_open: false,
            is_shut_down: false,
        })
    }

    pub fn physical_size(&self) -> Size {
        self.surface.size
    }

    /// Pixel on the physical surface.
    pub fn physical_pixel(&self, p: Point) -> Option<Rgb888> {
        let s = self.surface.size;
        (p.x >= 0 && p.y >= 0 && p.x < s.width && p.y < s.height)
            .then(|| self.surface.pixels[(p.y * s.width + p.x) as usize])
    }

    /// Logical rectangles pushed so far, oldest first.
    pub fn updates(&self) -> &[Rect] {
        &self.updates
    }

    pub fn clear_updates(&mut self) {
        self.updates.clear();
    }

    pub fn title(&self) -> &UiString {
        &self.title
    }

    pub fn cursor(&self) -> MouseCursor {
        self.cursor
    }

    pub fn is_full_screen(&self) -> bool {
        self.full_screen
    }

    pub fn wait_color(&self) -> Option<Color> {
        self.wait_color
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }
}

impl DisplayDevice for HeadlessDisplay {
    fn open(&mut self) -> &mut FrameBuffer {
        self.is_open = true;
        &mut self.frame
    }

    fn close(&mut self) {
        self.is_open = false;
    }

    fn update(&mut self) -> Result<(), DisplayError> {
        let all = self.frame.bounds();
        self.update_rect(all)
    }

    fn update_rect(&mut self, rect: Rect) -> Result<(), DisplayError> {
        if self.is_shut_down {
            return Err(DisplayError::ShutDown);
        }
        let Some(rect) = rect.clip(&self.frame.bounds()) else {
            return Ok(());
        };
        match self.frame.blit(&mut self.surface, rect, self.orientation) {
            Ok(()) => {}
            Err(never) => match never {},
        }
        self.updates.push(rect);
        Ok(())
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn logical_size(&self) -> Size {
        self.frame.logical_size()
    }

    fn set_title(&mut self, title: &UiString) {
        self.title = title.clone();
    }

    fn set_size(&mut self, size: Size) -> Result<(), DisplayError> {
        check_size(size)?;
        info!("Resizing headless display to {}x{}", size.width, size.height);
        self.frame.resize(size);
        self.surface = Surface::new(self.orientation.physical_size(size));
        Ok(())
    }

    fn go_full_screen(&mut self, full_screen: bool) -> bool {
        let changed = self.full_screen != full_screen;
        self.full_screen = full_screen;
        changed
    }

    fn set_mouse_cursor(&mut self, cursor: MouseCursor) {
        self.cursor = cursor;
    }

    fn signal_wait_state(&mut self, waiting: bool, color: Color) {
        debug!("Wait state {}", waiting);
        self.wait_color = waiting.then_some(color);
        self.cursor = if waiting {
            MouseCursor::Hourglass
        } else {
            MouseCursor::Standard
        };
    }

    fn shut_down(&mut self) {
        self.is_shut_down = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::Drawable;
    use embedded_graphics::prelude::Primitive;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn rotated_update_lands_on_transformed_pixels() {
        let mut display = HeadlessDisplay::new(Size::new(8, 4), Orientation::Rotate90Cw).ok();
        let Some(display) = display.as_mut() else {
            panic!("valid size rejected");
        };
        assert_eq!(display.physical_size(), Size::new(4, 8));

        let fb = display.open();
        Rectangle::from(Rect::new(0, 0, 1, 1))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::RED))
            .draw(fb)
            .ok();
        display.close();
        assert_eq!(display.physical_pixel(Point::new(3, 0)), Some(Rgb888::BLACK));

        assert_eq!(display.update_rect(Rect::new(0, 0, 2, 2)), Ok(()));
        assert_eq!(display.physical_pixel(Point::new(3, 0)), Some(Rgb888::RED));
        assert_eq!(display.updates(), [Rect::new(0, 0, 2, 2)]);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert_eq!(
            HeadlessDisplay::new(Size::new(0, 10), Orientation::Normal).err(),
            Some(DisplayError::InvalidSize {
                width: 0,
                height: 10
            })
        );
        let mut display = HeadlessDisplay::new(Size::new(4, 4), Orientation::Normal).ok();
        if let Some(display) = display.as_mut() {
            assert!(display.set_size(Size::new(4, -1)).is_err());
            assert_eq!(display.set_size(Size::new(6, 2)), Ok(()));
            assert_eq!(display.logical_size(), Size::new(6, 2));
            assert!(display.go_full_screen(true));
            assert!(!display.go_full_screen(true));
            display.shut_down();
            assert_eq!(display.update(), Err(DisplayError::ShutDown));
        }
    }
}
