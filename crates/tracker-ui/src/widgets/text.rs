//! Fonts and the static text control

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::{FONT_4X6, FONT_6X10, FONT_9X15};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::DrawTarget;

use crate::color::{self, Color};
use crate::control::{Context, Control, ControlBase, ControlId};
use crate::event::{Event, EventResult};
use crate::geometry::{Point, Size};
use crate::string::UiString;
use crate::widgets::paint;

/// Monospace fonts available to controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    /// Regular UI text.
    #[default]
    System,
    /// Compact labels.
    Tiny,
    /// Headings.
    Large,
}

impl Font {
    pub fn mono(self) -> &'static MonoFont<'static> {
        match self {
            Font::System => &FONT_6X10,
            Font::Tiny => &FONT_4X6,
            Font::Large => &FONT_9X15,
        }
    }

    pub fn char_width(self) -> i32 {
        let font = self.mono();
        (font.character_size.width + font.character_spacing) as i32
    }

    pub fn char_height(self) -> i32 {
        self.mono().character_size.height as i32
    }

    pub fn text_width(self, text: &UiString) -> i32 {
        text.len() as i32 * self.char_width()
    }
}

/// A single line of text; never reacts to input.
pub struct StaticText {
    base: ControlBase,
    text: UiString,
    font: Font,
    color: Color,
}

impl StaticText {
    pub fn new(id: ControlId, location: Point, text: &str) -> Self {
        let text = UiString::from(text);
        let font = Font::System;
        let size = Size::new(font.text_width(&text), font.char_height());
        Self {
            base: ControlBase::new(id, location, size),
            text,
            font,
            color: color::TEXT,
        }
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self.fit_size();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn text(&self) -> &UiString {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.set_ui_text(UiString::from(text));
    }

    pub fn set_ui_text(&mut self, text: UiString) {
        if self.text != text {
            self.text = text;
            self.fit_size();
            self.base.dirty = true;
        }
    }

    fn fit_size(&mut self) {
        self.base.size = Size::new(self.font.text_width(&self.text), self.font.char_height());
    }
}

impl Control for StaticText {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn dispatch(&mut self, _event: &Event, _cx: &mut Context<'_>) -> EventResult {
        EventResult::Ignored
    }

    fn paint<D: DrawTarget<Color = Rgb888>>(&self, g: &mut D) -> Result<(), D::Error> {
        if !self.is_visible() {
            return Ok(());
        }
        paint::text(g, &self.text, self.location(), self.font, self.color)
    }
}
