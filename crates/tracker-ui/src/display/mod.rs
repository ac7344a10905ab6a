//! Display device boundary and the orientation transform
//!
//! Everything above this module works in logical coordinates. A
//! [`DisplayDevice`] owns the physical surface, which may be rotated against
//! the logical one; pointer positions coming from the platform are mapped
//! back with [`Orientation::transform_inverse`] before hit-testing, and
//! painted rectangles are pushed out with [`DisplayDevice::update_rect`].
//! Nothing becomes visible until one of the update methods is called.

mod framebuffer;
mod headless;

pub use framebuffer::FrameBuffer;
pub use headless::HeadlessDisplay;

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::color::Color;
use crate::geometry::{Point, Rect, Size};
use crate::string::UiString;

/// How the logical screen is laid onto the physical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Normal,
    Rotate90Ccw,
    Rotate180,
    Rotate90Cw,
}

impl Orientation {
    /// Decode the integer stored in the key-map configuration.
    pub fn from_config_code(code: i32) -> Option<Orientation> {
        match code {
            0 => Some(Orientation::Rotate90Cw),
            1 => Some(Orientation::Rotate90Ccw),
            2 => Some(Orientation::Normal),
            _ => None,
        }
    }

    /// Inverse of [`from_config_code`](Self::from_config_code); the
    /// configuration has no code for a 180 degree rotation.
    pub fn config_code(self) -> Option<i32> {
        match self {
            Orientation::Rotate90Cw => Some(0),
            Orientation::Rotate90Ccw => Some(1),
            Orientation::Normal => Some(2),
            Orientation::Rotate180 => None,
        }
    }

    pub fn is_rotated_90(self) -> bool {
        matches!(self, Orientation::Rotate90Ccw | Orientation::Rotate90Cw)
    }

    /// Size of the physical surface showing a `logical` sized screen.
    pub fn physical_size(self, logical: Size) -> Size {
        if self.is_rotated_90() {
            Size::new(logical.height, logical.width)
        } else {
            logical
        }
    }

    /// Map a logical point to the physical surface.
    pub fn transform(self, p: Point, logical: Size) -> Point {
        let (w, h) = (logical.width, logical.height);
        match self {
            Orientation::Normal => p,
            Orientation::Rotate90Cw => Point::new(h - 1 - p.y, p.x),
            Orientation::Rotate90Ccw => Point::new(p.y, w - 1 - p.x),
            Orientation::Rotate180 => Point::new(w - 1 - p.x, h - 1 - p.y),
        }
    }

    /// Map a physical point back to logical space.
    pub fn transform_inverse(self, p: Point, logical: Size) -> Point {
        let (w, h) = (logical.width, logical.height);
        match self {
            Orientation::Normal => p,
            Orientation::Rotate90Cw => Point::new(p.y, h - 1 - p.x),
            Orientation::Rotate90Ccw => Point::new(w - 1 - p.y, p.x),
            Orientation::Rotate180 => Point::new(w - 1 - p.x, h - 1 - p.y),
        }
    }

    /// Map a logical rectangle to the physical surface.
    pub fn transform_rect(self, r: Rect, logical: Size) -> Rect {
        self.map_rect(r, |p| self.transform(p, logical))
    }

    /// Map a physical rectangle back to logical space.
    pub fn transform_inverse_rect(self, r: Rect, logical: Size) -> Rect {
        self.map_rect(r, |p| self.transform_inverse(p, logical))
    }

    /// Map the inclusive corners of `r` and rebuild a half-open box.
    fn map_rect(self, r: Rect, f: impl Fn(Point) -> Point) -> Rect {
        if r.is_empty() || self == Orientation::Normal {
            return r;
        }
        let a = f(Point::new(r.x1, r.y1));
        let b = f(Point::new(r.x2 - 1, r.y2 - 1));
        Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x) + 1, a.y.max(b.y) + 1)
    }
}

/// Pointer shapes a device can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseCursor {
    #[default]
    Standard,
    ResizeLeft,
    ResizeRight,
    Hourglass,
    Hand,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    #[error("Invalid display size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
    #[error("Display device has been shut down")]
    ShutDown,
}

/// Output surface owned by the platform layer.
pub trait DisplayDevice {
    /// Back buffer to draw into, in logical coordinates.
    fn open(&mut self) -> &mut FrameBuffer;

    /// Finish drawing into the back buffer.
    fn close(&mut self);

    /// Push the whole back buffer to the physical surface.
    fn update(&mut self) -> Result<(), DisplayError>;

    /// Push a logical rectangle of the back buffer.
    fn update_rect(&mut self, rect: Rect) -> Result<(), DisplayError>;

    fn orientation(&self) -> Orientation;

    fn logical_size(&self) -> Size;

    fn transform(&self, p: Point) -> Point {
        self.orientation().transform(p, self.logical_size())
    }

    fn transform_inverse(&self, p: Point) -> Point {
        self.orientation().transform_inverse(p, self.logical_size())
    }

    fn transform_inverse_rect(&self, r: Rect) -> Rect {
        self.orientation().transform_inverse_rect(r, self.logical_size())
    }

    fn set_title(&mut self, title: &UiString);

    /// Change the logical size, recreating the surfaces. Pixel content does
    /// not survive and references into the old buffer must not be kept.
    fn set_size(&mut self, size: Size) -> Result<(), DisplayError>;

    /// Switch full screen mode; returns whether the switch happened.
    fn go_full_screen(&mut self, full_screen: bool) -> bool;

    fn set_mouse_cursor(&mut self, cursor: MouseCursor);

    /// Show or hide a busy indicator drawn in `color`.
    fn signal_wait_state(&mut self, waiting: bool, color: Color);

    fn shut_down(&mut self);
}

pub(crate) fn check_size(size: Size) -> Result<(), DisplayError> {
    if size.width <= 0 || size.height <= 0 {
        return Err(DisplayError::InvalidSize {
            width: size.width,
            height: size.height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Orientation; 4] = [
        Orientation::Normal,
        Orientation::Rotate90Ccw,
        Orientation::Rotate180,
        Orientation::Rotate90Cw,
    ];

    #[test]
    fn transforms_are_bijections_onto_the_physical_surface() {
        let logical = Size::new(7, 4);
        for o in ALL {
            let physical = Rect::from_location_size(Point::zero(), o.physical_size(logical));
            for y in 0..logical.height {
                for x in 0..logical.width {
                    let p = Point::new(x, y);
                    let t = o.transform(p, logical);
                    assert!(physical.contains(t), "{o:?} {p:?} -> {t:?}");
                    assert_eq!(o.transform_inverse(t, logical), p, "{o:?}");
                }
            }
        }
    }

    #[test]
    fn clockwise_puts_the_logical_origin_top_right() {
        let logical = Size::new(320, 240);
        let o = Orientation::Rotate90Cw;
        assert_eq!(o.physical_size(logical), Size::new(240, 320));
        assert_eq!(o.transform(Point::zero(), logical), Point::new(239, 0));
        assert_eq!(
            Orientation::Rotate90Ccw.transform(Point::zero(), logical),
            Point::new(0, 319)
        );
    }

    #[test]
    fn rects_round_trip() {
        let logical = Size::new(50, 30);
        let r = Rect::new(3, 4, 13, 9);
        for o in ALL {
            let t = o.transform_rect(r, logical);
            assert_eq!(t.size(), o.physical_size(r.size()));
            assert_eq!(o.transform_inverse_rect(t, logical), r, "{o:?}");
        }
    }

    #[test]
    fn config_codes() {
        assert_eq!(Orientation::from_config_code(0), Some(Orientation::Rotate90Cw));
        assert_eq!(Orientation::from_config_code(1), Some(Orientation::Rotate90Ccw));
        assert_eq!(Orientation::from_config_code(2), Some(Orientation::Normal));
        assert_eq!(Orientation::from_config_code(3), None);
        assert_eq!(Orientation::Rotate180.config_code(), None);
    }
}
