//! Push button with optional label or glyph

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::DrawTarget;

use crate::color::{self, Color};
use crate::control::{Context, Control, ControlBase, ControlId};
use crate::event::{Event, EventResult, MouseAction};
use crate::geometry::{Point, Rect, Size};
use crate::string::UiString;
use crate::widgets::paint;
use crate::widgets::text::Font;

/// Direction an arrow glyph points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Decoration drawn on the button face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    None,
    Arrow(ArrowDirection),
    /// Three grip lines across a scrollbar thumb.
    Grip { horizontal: bool },
}

/// Minimum thumb length along its axis for the grip to be drawn.
const GRIP_MIN_LENGTH: i32 = 20;

/// Button control.
///
/// # Input behavior
/// - Down presses a clickable button.
/// - Up releases it; releasing over the button notifies the owner with the
///   up event (a click).
/// - Repeat ticks notify the owner while the button stays pressed.
/// - Drag keeps the pressed state in sync with whether the pointer is still
///   over the button, and is always passed on to the owner, so
///   non-clickable buttons (scrollbar thumbs) can still be dragged.
pub struct Button {
    base: ControlBase,
    label: UiString,
    font: Font,
    color: Color,
    text_color: Color,
    border: bool,
    clickable: bool,
    pressed: bool,
    invert_shading: bool,
    glyph: Glyph,
}

impl Button {
    pub fn new(id: ControlId, location: Point, size: Size) -> Self {
        Self {
            base: ControlBase::new(id, location, size),
            label: UiString::new(),
            font: Font::System,
            color: color::BUTTON_FACE,
            text_color: color::GLYPH,
            border: true,
            clickable: true,
            pressed: false,
            invert_shading: false,
            glyph: Glyph::None,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = UiString::from(label);
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    pub fn with_clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    pub fn with_invert_shading(mut self, invert: bool) -> Self {
        self.invert_shading = invert;
        self
    }

    pub fn with_glyph(mut self, glyph: Glyph) -> Self {
        self.glyph = glyph;
        self
    }

    pub fn label(&self) -> &UiString {
        &self.label
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        if self.color != color {
            self.color = color;
            self.base.dirty = true;
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Set the visual pressed state; returns whether it changed.
    pub fn set_pressed(&mut self, pressed: bool) -> bool {
        if self.pressed == pressed {
            return false;
        }
        self.pressed = pressed;
        self.base.dirty = true;
        true
    }

    pub fn is_clickable(&self) -> bool {
        self.clickable
    }

    fn over(&self, event: &Event) -> bool {
        event.point().is_some_and(|p| self.hit(p))
    }

    fn paint_glyph<D: DrawTarget<Color = Rgb888>>(&self, g: &mut D) -> Result<(), D::Error> {
        let r = self.bounds();
        // Pressed faces shift their decoration by one pixel.
        let shift = if self.pressed { 1 } else { 0 };
        match self.glyph {
            Glyph::None => Ok(()),
            Glyph::Arrow(direction) => {
                let half = (r.width().min(r.height()) / 2 - 2).max(1);
                let cx = r.x1 + r.width() / 2 + shift;
                let cy = r.y1 + r.height() / 2 + shift;
                let q = half / 2;
                let points = match direction {
                    ArrowDirection::Up => [
                        Point::new(cx, cy - q),
                        Point::new(cx - half, cy + q),
                        Point::new(cx + half, cy + q),
                    ],
                    ArrowDirection::Down => [
                        Point::new(cx, cy + q),
                        Point::new(cx - half, cy - q),
                        Point::new(cx + half, cy - q),
                    ],
                    ArrowDirection::Left => [
                        Point::new(cx - q, cy),
                        Point::new(cx + q, cy - half),
                        Point::new(cx + q, cy + half),
                    ],
                    ArrowDirection::Right => [
                        Point::new(cx + q, cy),
                        Point::new(cx - q, cy - half),
                        Point::new(cx - q, cy + half),
                    ],
                };
                paint::triangle(g, points, self.text_color)
            }
            Glyph::Grip { horizontal } => {
                if r.size().along(horizontal) < GRIP_MIN_LENGTH {
                    return Ok(());
                }
                let across = r.size().along(!horizontal);
                let length = (across - 6).max(1);
                let mut p = if horizontal {
                    Point::new(r.x1 + r.width() / 2 - 4, r.y1 + 3)
                } else {
                    Point::new(r.x1 + 3, r.y1 + r.height() / 2 - 3)
                };
                p = p.offset(shift, shift);
                for _ in 0..3 {
                    let end = if horizontal {
                        p.offset(0, length - 1)
                    } else {
                        p.offset(length - 1, 0)
                    };
                    paint::line(g, p, end, self.color.shadow())?;
                    p = if horizontal { p.offset(3, 0) } else { p.offset(0, 2) };
                }
                Ok(())
            }
        }
    }
}

impl Control for Button {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn dispatch(&mut self, event: &Event, cx: &mut Context<'_>) -> EventResult {
        if !self.is_enabled() {
            return EventResult::Ignored;
        }

        match event.id.mouse_action() {
            Some(MouseAction::Down) => {
                if self.clickable {
                    self.set_pressed(true);
                }
                EventResult::Ignored
            }
            Some(MouseAction::Up) => {
                if !self.pressed {
                    return EventResult::Ignored;
                }
                self.set_pressed(false);
                if self.over(event) {
                    cx.notify(self.id(), event)
                } else {
                    EventResult::Ignored
                }
            }
            Some(MouseAction::Repeat) => {
                if self.clickable && self.pressed {
                    cx.notify(self.id(), event)
                } else {
                    EventResult::Ignored
                }
            }
            Some(MouseAction::Drag) => {
                if self.clickable {
                    let over = self.over(event);
                    self.set_pressed(over);
                }
                cx.notify(self.id(), event)
            }
            None => EventResult::Ignored,
        }
    }

    fn paint<D: DrawTarget<Color = Rgb888>>(&self, g: &mut D) -> Result<(), D::Error> {
        if !self.is_visible() {
            return Ok(());
        }

        let r = self.bounds();
        let face = if self.is_enabled() {
            self.color
        } else {
            self.color.shadow()
        };
        paint::fill(g, r, face)?;

        let inner = if self.border {
            paint::outline(g, r, Color::BLACK)?;
            Rect::new(r.x1 + 1, r.y1 + 1, r.x2 - 1, r.y2 - 1)
        } else {
            r
        };
        paint::bevel(g, inner, face, self.pressed != self.invert_shading)?;

        if !self.label.is_empty() {
            let width = self.font.text_width(&self.label);
            let height = self.font.char_height();
            let shift = if self.pressed { 1 } else { 0 };
            let at = Point::new(
                r.x1 + (r.width() - width) / 2 + shift,
                r.y1 + (r.height() - height) / 2 + shift,
            );
            paint::text(g, &self.label, at, self.font, self.text_color)?;
        }

        self.paint_glyph(g)
    }
}
