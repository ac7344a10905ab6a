//! Integer geometry values used by every control.
//!
//! These are deliberately separate from `embedded_graphics`' own types:
//! sizes are signed (controls are laid out with plain arithmetic that may go
//! negative mid-computation) and rectangles are stored as corner pairs.
//! Conversions to the drawing types are provided at the paint boundary.

use core::ops::{Add, AddAssign, Sub, SubAssign};

use embedded_graphics::geometry::{Point as EgPoint, Size as EgSize};
use embedded_graphics::primitives::Rectangle;

/// A position in logical screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Component along one axis (`true` = x).
    pub const fn along(&self, horizontal: bool) -> i32 {
        if horizontal { self.x } else { self.y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl From<Point> for EgPoint {
    fn from(p: Point) -> Self {
        EgPoint::new(p.x, p.y)
    }
}

impl From<EgPoint> for Point {
    fn from(p: EgPoint) -> Self {
        Point::new(p.x, p.y)
    }
}

/// Width and height of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Extent along one axis (`true` = width).
    pub const fn along(&self, horizontal: bool) -> i32 {
        if horizontal { self.width } else { self.height }
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl From<Size> for EgSize {
    fn from(s: Size) -> Self {
        EgSize::new(s.width.max(0) as u32, s.height.max(0) as u32)
    }
}

/// Box stored as corners `(x1, y1)` inclusive and `(x2, y2)` exclusive.
///
/// `x2 >= x1` and `y2 >= y1` are assumed by callers but never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub const fn from_location_size(location: Point, size: Size) -> Self {
        Self {
            x1: location.x,
            y1: location.y,
            x2: location.x + size.width,
            y2: location.y + size.height,
        }
    }

    pub const fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub const fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    pub const fn location(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub const fn is_empty(&self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }

    /// Overlap test that also accepts boxes sharing only a boundary.
    pub fn intersect(&self, other: &Rect) -> bool {
        !(other.x2 < self.x1 || other.x1 > self.x2 || other.y2 < self.y1 || other.y1 > self.y2)
    }

    /// Half-open containment, the rule used for hit-testing.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x < self.x2 && p.y >= self.y1 && p.y < self.y2
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.x1.min(other.x1),
            self.y1.min(other.y1),
            self.x2.max(other.x2),
            self.y2.max(other.y2),
        )
    }

    /// Area shared by both boxes, if any.
    pub fn clip(&self, other: &Rect) -> Option<Rect> {
        let r = Rect::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        );
        if r.is_empty() { None } else { Some(r) }
    }
}

impl From<Rect> for Rectangle {
    fn from(r: Rect) -> Self {
        Rectangle::new(r.location().into(), r.size().into())
    }
}

impl From<Rectangle> for Rect {
    fn from(r: Rectangle) -> Self {
        Rect::from_location_size(
            r.top_left.into(),
            Size::new(r.size.width as i32, r.size.height as i32),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_is_symmetric() {
        let boxes = [
            Rect::new(0, 0, 10, 10),
            Rect::new(10, 10, 20, 20),
            Rect::new(11, 0, 15, 5),
            Rect::new(-5, -5, 0, 0),
            Rect::new(3, 3, 4, 4),
            Rect::new(0, 20, 10, 30),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.intersect(b), b.intersect(a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn touching_boxes_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        assert!(a.intersect(&Rect::new(10, 0, 20, 10)));
        assert!(a.intersect(&Rect::new(10, 10, 20, 20)));
        assert!(!a.intersect(&Rect::new(11, 0, 20, 10)));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::from_location_size(Point::new(5, 5), Size::new(10, 4));
        assert!(r.contains(Point::new(5, 5)));
        assert!(r.contains(Point::new(14, 8)));
        assert!(!r.contains(Point::new(15, 8)));
        assert!(!r.contains(Point::new(14, 9)));
    }

    #[test]
    fn clip_and_union() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 20, 20);
        assert_eq!(a.clip(&b), Some(Rect::new(5, 5, 10, 10)));
        assert_eq!(a.union(&b), Rect::new(0, 0, 20, 20));
        assert_eq!(a.clip(&Rect::new(10, 0, 20, 10)), None);
    }

    #[test]
    fn converts_to_rectangle() {
        let r = Rect::new(2, 3, 12, 8);
        let eg: Rectangle = r.into();
        assert_eq!(eg.top_left, EgPoint::new(2, 3));
        assert_eq!(eg.size, EgSize::new(10, 5));
        assert_eq!(Rect::from(eg), r);
    }
}
