//! Vertical list of mutually exclusive choices

use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::DrawTarget;

use crate::color::{self, Color};
use crate::control::{Context, Control, ControlBase, ControlId};
use crate::event::{Event, EventId, EventResult, MouseAction};
use crate::geometry::{Point, Size};
use crate::string::UiString;
use crate::widgets::paint;
use crate::widgets::text::Font;

/// Horizontal space reserved for the radio mark in front of each label.
pub const RADIO_WIDTH: i32 = 14;

/// Vertical gap between two rows.
pub const SPACER_HEIGHT: i32 = 4;

pub struct RadioGroup {
    base: ControlBase,
    items: Vec<UiString>,
    choice: usize,
    font: Font,
    color: Option<Color>,
    text_color: Color,
    spacer_height: i32,
}

impl RadioGroup {
    pub fn new(id: ControlId, location: Point, size: Size) -> Self {
        Self {
            base: ControlBase::new(id, location, size),
            items: Vec::new(),
            choice: 0,
            font: Font::System,
            color: None,
            text_color: color::TEXT,
            spacer_height: SPACER_HEIGHT,
        }
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Fill the background with `color` instead of leaving it transparent.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_spacer_height(mut self, spacer_height: i32) -> Self {
        self.spacer_height = spacer_height.max(0);
        self
    }

    pub fn add_item(&mut self, item: &str) {
        self.items.push(UiString::from(item));
        self.base.dirty = true;
    }

    pub fn items(&self) -> &[UiString] {
        &self.items
    }

    pub fn choice(&self) -> usize {
        self.choice
    }

    /// Select `choice`; out-of-range indices are ignored.
    pub fn set_choice(&mut self, choice: usize) {
        if choice < self.items.len() && choice != self.choice {
            self.choice = choice;
            self.base.dirty = true;
        }
    }

    pub fn row_height(&self) -> i32 {
        self.font.char_height() + self.spacer_height
    }

    /// Resize to fit every label.
    pub fn fit_size(&mut self) {
        let widest = self
            .items
            .iter()
            .map(|item| self.font.text_width(item))
            .max()
            .unwrap_or(0);
        let size = Size::new(
            widest + RADIO_WIDTH,
            self.items.len() as i32 * self.row_height(),
        );
        self.set_size(size);
    }

    fn row_at(&self, p: Point) -> Option<usize> {
        if !self.hit(p) {
            return None;
        }
        let row = ((p.y - self.base.location.y) / self.row_height()) as usize;
        (row < self.items.len()).then_some(row)
    }
}

impl Control for RadioGroup {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn dispatch(&mut self, event: &Event, cx: &mut Context<'_>) -> EventResult {
        if !self.is_enabled() || event.id.mouse_action() != Some(MouseAction::Down) {
            return EventResult::Ignored;
        }
        let Some(row) = event.point().and_then(|p| self.row_at(p)) else {
            return EventResult::Ignored;
        };
        self.set_choice(row);
        cx.notify(self.id(), &Event::with_value(EventId::Selection, row as i32))
    }

    fn paint<D: DrawTarget<Color = Rgb888>>(&self, g: &mut D) -> Result<(), D::Error> {
        if !self.is_visible() {
            return Ok(());
        }
        if let Some(color) = self.color {
            paint::fill(g, self.bounds(), color)?;
        }

        let ch = self.font.char_height();
        let diameter = (ch - 1).max(3) as u32;
        let mut y = self.base.location.y;
        for (i, item) in self.items.iter().enumerate() {
            let mark = Point::new(self.base.location.x + 1, y);
            paint::circle(g, mark, diameter, self.text_color, false)?;
            if i == self.choice {
                paint::circle(g, mark.offset(2, 2), diameter.saturating_sub(4), self.text_color, true)?;
            }
            let at = Point::new(self.base.location.x + RADIO_WIDTH, y);
            paint::text(g, item, at, self.font, self.text_color)?;
            y += self.row_height();
        }
        Ok(())
    }
}
