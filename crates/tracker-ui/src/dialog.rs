//! Modal dialogs built from the basic controls
//!
//! [`MessageBox`] is the container every dialog starts from: a centered
//! panel with a caption, optional user controls and Ok/Cancel buttons. It
//! answers with [`EventId::DialogResponse`] (value `1` for Ok, `0` for
//! Cancel) and passes its user controls' notifications on with the control's
//! own id as sender. The specialised dialogs wrap a message box and react to
//! those notifications before passing them on.

use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::DrawTarget;
use log::debug;

use crate::capture::{Capture, Release};
use crate::color::{self, Color};
use crate::control::{Context, Control, ControlBase, ControlId, Widget, WidgetKind, dispatch_part};
use crate::event::{Event, EventId, EventResult, MouseAction, vk};
use crate::geometry::{Point, Size};
use crate::widgets::paint;
use crate::widgets::radio_group::{RADIO_WIDTH, SPACER_HEIGHT};
use crate::widgets::scrollbar::FRACTION_ONE;
use crate::widgets::{Button, Font, RadioGroup, Scrollbar, StaticText};

pub const BUTTON_OK: ControlId = ControlId(1);
pub const BUTTON_CANCEL: ControlId = ControlId(2);
pub const CAPTION: ControlId = ControlId(3);
pub const CONTROL_USER1: ControlId = ControlId(10);
pub const CONTROL_USER2: ControlId = ControlId(11);
pub const CONTROL_USER3: ControlId = ControlId(12);

pub const RESPONSE_OK: i32 = 1;
pub const RESPONSE_CANCEL: i32 = 0;

const BUTTON_WIDTH: i32 = 60;
const BUTTON_HEIGHT: i32 = 13;
const MARGIN: i32 = 8;
const CAPTION_TOP: i32 = 6;

/// Child of a message box holding the capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Child {
    Ok,
    Cancel,
    User(usize),
}

pub struct MessageBox {
    base: ControlBase,
    color: Color,
    caption: StaticText,
    ok: Button,
    cancel: Option<Button>,
    controls: Vec<Widget>,
    capture: Capture<Child>,
}

impl MessageBox {
    /// Build a `size` panel centered on a `screen` sized area.
    ///
    /// Without a `cancel` label only the Ok button is shown, centered.
    pub fn new(
        id: ControlId,
        screen: Size,
        size: Size,
        caption: &str,
        ok: &str,
        cancel: Option<&str>,
    ) -> Self {
        let location = Point::new(
            (screen.width - size.width) / 2,
            (screen.height - size.height) / 2,
        );
        let mut caption = StaticText::new(CAPTION, location, caption);
        let caption_x = location.x + (size.width - caption.size().width) / 2;
        caption.set_location(Point::new(caption_x, location.y + CAPTION_TOP));

        let center = location.x + size.width / 2;
        let button_y = location.y + size.height - MARGIN - BUTTON_HEIGHT;
        let button_size = Size::new(BUTTON_WIDTH, BUTTON_HEIGHT);
        let ok_x = if cancel.is_some() {
            center - BUTTON_WIDTH - MARGIN / 2
        } else {
            center - BUTTON_WIDTH / 2
        };
        let ok = Button::new(BUTTON_OK, Point::new(ok_x, button_y), button_size).with_label(ok);
        let cancel = cancel.map(|label| {
            Button::new(
                BUTTON_CANCEL,
                Point::new(center + MARGIN / 2, button_y),
                button_size,
            )
            .with_label(label)
        });

        Self {
            base: ControlBase::new(id, location, size),
            color: color::DIALOG_SURFACE,
            caption,
            ok,
            cancel,
            controls: Vec::new(),
            capture: Capture::new(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn caption(&self) -> &StaticText {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: &str) {
        self.caption.set_text(caption);
        let x = self.base.location.x + (self.base.size.width - self.caption.size().width) / 2;
        let y = self.caption.location().y;
        self.caption.set_location(Point::new(x, y));
    }

    pub fn add_control(&mut self, control: impl Into<Widget>) {
        self.controls.push(control.into());
        self.base.dirty = true;
    }

    pub fn control(&self, id: ControlId) -> Option<&Widget> {
        self.controls.iter().find(|c| c.id() == id)
    }

    pub fn control_mut(&mut self, id: ControlId) -> Option<&mut Widget> {
        self.controls.iter_mut().find(|c| c.id() == id)
    }

    pub fn control_as<T: WidgetKind>(&self, id: ControlId) -> Option<&T> {
        self.control(id).and_then(|w| w.downcast_ref())
    }

    pub fn control_as_mut<T: WidgetKind>(&mut self, id: ControlId) -> Option<&mut T> {
        self.control_mut(id).and_then(|w| w.downcast_mut())
    }

    fn respond(&mut self, value: i32, cx: &mut Context<'_>) -> EventResult {
        debug!("Dialog {:?} answered {}", self.id(), value);
        cx.notify(self.id(), &Event::with_value(EventId::DialogResponse, value))
    }

    fn child_at(&self, p: Point) -> Option<Child> {
        if self.ok.is_interactive() && self.ok.hit(p) {
            return Some(Child::Ok);
        }
        if let Some(cancel) = &self.cancel
            && cancel.is_interactive()
            && cancel.hit(p)
        {
            return Some(Child::Cancel);
        }
        self.controls
            .iter()
            .rposition(|c| c.is_interactive() && c.hit(p))
            .map(Child::User)
    }

    /// Forward `event` to `child` and translate what it notifies.
    fn forward(&mut self, child: Child, event: &Event, cx: &mut Context<'_>) -> EventResult {
        let notes = match child {
            Child::Ok => dispatch_part(&mut self.ok, event),
            Child::Cancel => match self.cancel.as_mut() {
                Some(cancel) => dispatch_part(cancel, event),
                None => return EventResult::Ignored,
            },
            Child::User(i) => match self.controls.get_mut(i) {
                Some(control) => dispatch_part(control, event),
                None => return EventResult::Ignored,
            },
        };
        let mut result = EventResult::Ignored;
        for (sender, note) in notes.iter() {
            let is_click = note.id.mouse_action() == Some(MouseAction::Up);
            let r = match child {
                Child::Ok if is_click => self.respond(RESPONSE_OK, cx),
                Child::Cancel if is_click => self.respond(RESPONSE_CANCEL, cx),
                Child::Ok | Child::Cancel => EventResult::Ignored,
                Child::User(_) => cx.notify(*sender, note),
            };
            if r == EventResult::Handled {
                result = EventResult::Handled;
            }
        }
        result
    }

    fn dispatch_key(&mut self, event: &Event, cx: &mut Context<'_>) -> EventResult {
        match event.value() {
            Some(vk::RETURN) => self.respond(RESPONSE_OK, cx),
            Some(vk::ESCAPE) if self.cancel.is_some() => self.respond(RESPONSE_CANCEL, cx),
            _ => {
                for i in 0..self.controls.len() {
                    if !self.controls[i].is_interactive() {
                        continue;
                    }
                    if self.forward(Child::User(i), event, cx) == EventResult::Handled {
                        return EventResult::Handled;
                    }
                }
                EventResult::Ignored
            }
        }
    }
}

impl Control for MessageBox {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn set_location(&mut self, location: Point) {
        let delta = location - self.base.location;
        if delta == Point::zero() {
            return;
        }
        self.base.location = location;
        self.base.dirty = true;
        self.caption.set_location(self.caption.location() + delta);
        self.ok.set_location(self.ok.location() + delta);
        if let Some(cancel) = self.cancel.as_mut() {
            cancel.set_location(cancel.location() + delta);
        }
        for control in self.controls.iter_mut() {
            control.set_location(control.location() + delta);
        }
    }

    fn is_dirty(&self) -> bool {
        self.base.dirty
            || self.caption.is_dirty()
            || self.ok.is_dirty()
            || self.cancel.as_ref().is_some_and(|c| c.is_dirty())
            || self.controls.iter().any(|c| c.is_dirty())
    }

    fn mark_clean(&mut self) {
        self.base.dirty = false;
        self.caption.mark_clean();
        self.ok.mark_clean();
        if let Some(cancel) = self.cancel.as_mut() {
            cancel.mark_clean();
        }
        for control in self.controls.iter_mut() {
            control.mark_clean();
        }
    }

    fn dispatch(&mut self, event: &Event, cx: &mut Context<'_>) -> EventResult {
        if event.id == EventId::KeyDown {
            return self.dispatch_key(event, cx);
        }

        let (Some(button), Some(action)) = (event.id.mouse_button(), event.id.mouse_action())
        else {
            return match self.capture.caught() {
                Some(child) => self.forward(child, event, cx),
                None => EventResult::Ignored,
            };
        };

        match action {
            MouseAction::Down => {
                let Some(child) = event.point().and_then(|p| self.child_at(p)) else {
                    return EventResult::Ignored;
                };
                self.capture.catch(child, button);
                self.forward(child, event, cx)
            }
            MouseAction::Up => match self.capture.release(button) {
                Release::Idle => EventResult::Ignored,
                Release::Held(child) | Release::Ended(child) => self.forward(child, event, cx),
            },
            MouseAction::Repeat | MouseAction::Drag => match self.capture.caught() {
                Some(child) => self.forward(child, event, cx),
                None => EventResult::Ignored,
            },
        }
    }

    fn paint<D: DrawTarget<Color = Rgb888>>(&self, g: &mut D) -> Result<(), D::Error> {
        if !self.is_visible() {
            return Ok(());
        }
        let r = self.bounds();
        paint::fill(g, r, self.color)?;
        paint::bevel(g, r, self.color, false)?;
        paint::outline(g, r, Color::BLACK)?;
        self.caption.paint(g)?;
        for control in self.controls.iter() {
            control.paint(g)?;
        }
        self.ok.paint(g)?;
        if let Some(cancel) = &self.cancel {
            cancel.paint(g)?;
        }
        Ok(())
    }
}

macro_rules! delegate_to_inner {
    () => {
        fn base(&self) -> &ControlBase {
            self.inner.base()
        }

        fn base_mut(&mut self) -> &mut ControlBase {
            self.inner.base_mut()
        }

        fn set_location(&mut self, location: Point) {
            self.inner.set_location(location)
        }

        fn is_dirty(&self) -> bool {
            self.inner.is_dirty()
        }

        fn mark_clean(&mut self) {
            self.inner.mark_clean()
        }

        fn paint<D: DrawTarget<Color = Rgb888>>(&self, g: &mut D) -> Result<(), D::Error> {
            self.inner.paint(g)
        }
    };
}

// ---------------------------------------------------------------------------
// Group selection
// ---------------------------------------------------------------------------

/// Pick one of several choices with a radio group.
pub struct GroupSelectionDialog {
    inner: MessageBox,
    selection: usize,
}

impl GroupSelectionDialog {
    pub const WIDTH: i32 = 290;

    pub fn new(id: ControlId, screen: Size, caption: &str, choices: &[&str]) -> Self {
        let font = Font::System;
        let row = font.char_height() + SPACER_HEIGHT + 1;
        let height = 74 + choices.len() as i32 * row;
        let mut inner = MessageBox::new(
            id,
            screen,
            Size::new(Self::WIDTH, height),
            caption,
            "Ok",
            Some("Cancel"),
        );

        let widest = choices
            .iter()
            .map(|c| c.len() as i32 * font.char_width() + RADIO_WIDTH)
            .max()
            .unwrap_or(0);
        let location = inner.location();
        let x = location.x + Self::WIDTH / 2 - widest / 2;
        let y = inner.caption().location().y + 12;

        let mut radio = RadioGroup::new(CONTROL_USER1, Point::new(x, y), Size::new(0, 0))
            .with_font(font)
            .with_color(inner.color());
        for choice in choices {
            radio.add_item(choice);
        }
        radio.fit_size();
        inner.add_control(radio);

        Self {
            inner,
            selection: 0,
        }
    }

    pub fn selection(&self) -> usize {
        self.selection
    }

    pub fn set_selection(&mut self, selection: usize) {
        if let Some(radio) = self.inner.control_as_mut::<RadioGroup>(CONTROL_USER1) {
            radio.set_choice(selection);
            self.selection = radio.choice();
        }
    }

    pub fn message_box(&self) -> &MessageBox {
        &self.inner
    }
}

impl Control for GroupSelectionDialog {
    delegate_to_inner!();

    fn dispatch(&mut self, event: &Event, cx: &mut Context<'_>) -> EventResult {
        let mut result = EventResult::Ignored;
        for (sender, note) in dispatch_part(&mut self.inner, event).iter() {
            if note.id == EventId::Selection
                && *sender == CONTROL_USER1
                && let Some(index) = note.value()
            {
                self.selection = index.max(0) as usize;
            }
            if cx.notify(*sender, note) == EventResult::Handled {
                result = EventResult::Handled;
            }
        }
        result
    }
}

// ---------------------------------------------------------------------------
// Quick choose
// ---------------------------------------------------------------------------

/// Returned by [`QuickChooseDialog::num_pad_key_to_value`] for other keys.
pub const NOT_A_DIGIT: u16 = 0xFFFF;

const VALUE_CAPTION: ControlId = CONTROL_USER1;
const VALUE_TEXT: ControlId = CONTROL_USER2;
const SLIDER: ControlId = CONTROL_USER3;

/// Pick a number in a range by typing it or with a slider.
pub struct QuickChooseDialog {
    inner: MessageBox,
    value: i32,
    range_start: i32,
    range_end: i32,
    step: i32,
    typed: Option<i32>,
}

impl QuickChooseDialog {
    pub const WIDTH: i32 = 290;
    pub const HEIGHT: i32 = 96;

    pub fn new(
        id: ControlId,
        screen: Size,
        caption: &str,
        range_start: i32,
        range_end: i32,
        step: i32,
    ) -> Self {
        let range_end = range_end.max(range_start);
        let mut inner = MessageBox::new(
            id,
            screen,
            Size::new(Self::WIDTH, Self::HEIGHT),
            caption,
            "Ok",
            Some("Cancel"),
        );

        let origin = inner.location();
        let y = inner.caption().location().y + 16;
        inner.add_control(StaticText::new(VALUE_CAPTION, Point::new(origin.x + 16, y), "Value:"));
        inner.add_control(StaticText::new(VALUE_TEXT, Point::new(origin.x + 64, y), ""));

        let span = (range_end - range_start) / step.max(1) + 1;
        let mut slider = Scrollbar::new(
            SLIDER,
            Point::new(origin.x + 16, y + 16),
            Self::WIDTH - 32,
            true,
        );
        slider.set_bar_size((FRACTION_ONE / span).max(FRACTION_ONE / 16), false);
        inner.add_control(slider);

        let mut dialog = Self {
            inner,
            value: range_start,
            range_start,
            range_end,
            step: step.max(1),
            typed: None,
        };
        dialog.set_value(range_start);
        dialog
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn range(&self) -> (i32, i32) {
        (self.range_start, self.range_end)
    }

    /// Set the value, clamped to the range.
    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.range_start, self.range_end);
        self.refresh_value_text();
        let span = (self.range_end - self.range_start) as i64;
        let position = if span > 0 {
            ((self.value - self.range_start) as i64 * FRACTION_ONE as i64 / span) as i32
        } else {
            0
        };
        if let Some(slider) = self.inner.control_as_mut::<Scrollbar>(SLIDER) {
            slider.set_bar_position(position, true);
        }
    }

    pub fn set_value_caption(&mut self, caption: &str) {
        if let Some(text) = self.inner.control_as_mut::<StaticText>(VALUE_CAPTION) {
            text.set_text(caption);
        }
    }

    /// Map a numeric keypad virtual key to its digit, or [`NOT_A_DIGIT`].
    pub fn num_pad_key_to_value(key_code: u16) -> u16 {
        let (first, last) = (vk::NUMPAD0 as u16, vk::NUMPAD9 as u16);
        if (first..=last).contains(&key_code) {
            key_code - first
        } else {
            NOT_A_DIGIT
        }
    }

    pub fn message_box(&self) -> &MessageBox {
        &self.inner
    }

    fn refresh_value_text(&mut self) {
        let text = alloc::format!("{}", self.value);
        if let Some(label) = self.inner.control_as_mut::<StaticText>(VALUE_TEXT) {
            label.set_text(&text);
        }
    }

    fn digit_for_key(key: i32) -> Option<i32> {
        match key {
            0x30..=0x39 => Some(key - 0x30),
            _ => match Self::num_pad_key_to_value(key.clamp(0, u16::MAX as i32) as u16) {
                NOT_A_DIGIT => None,
                digit => Some(digit as i32),
            },
        }
    }

    /// Append a typed digit; starts over once the number leaves the range.
    fn type_digit(&mut self, digit: i32) {
        let candidate = self.typed.unwrap_or(0).saturating_mul(10).saturating_add(digit);
        let typed = if candidate > self.range_end { digit } else { candidate };
        self.typed = Some(typed);
        self.set_value(typed);
    }

    fn handle_slider(&mut self, event: &Event) {
        self.typed = None;
        match event.id {
            EventId::BarScrollUp => self.set_value(self.value - self.step),
            EventId::BarScrollDown => self.set_value(self.value + self.step),
            EventId::BarPageUp | EventId::BarPageDown | EventId::BarPosChanged => {
                let Some(position) = self.inner.control_as::<Scrollbar>(SLIDER).map(|s| s.bar_position())
                else {
                    return;
                };
                let span = (self.range_end - self.range_start) as i64;
                let raw = self.range_start as i64 + (position as i64 * span + FRACTION_ONE as i64 / 2) / FRACTION_ONE as i64;
                let steps = (raw as i32 - self.range_start + self.step / 2) / self.step;
                // Keep the thumb where the pointer left it.
                self.value = (self.range_start + steps * self.step).clamp(self.range_start, self.range_end);
                self.refresh_value_text();
            }
            _ => {}
        }
    }
}

impl Control for QuickChooseDialog {
    delegate_to_inner!();

    fn dispatch(&mut self, event: &Event, cx: &mut Context<'_>) -> EventResult {
        if event.id == EventId::KeyDown
            && let Some(key) = event.value()
        {
            if let Some(digit) = Self::digit_for_key(key) {
                self.type_digit(digit);
                return EventResult::Handled;
            }
            if key == vk::BACK {
                let typed = self.typed.unwrap_or(self.value) / 10;
                self.typed = Some(typed);
                self.set_value(typed);
                return EventResult::Handled;
            }
        }

        let mut result = EventResult::Ignored;
        for (sender, note) in dispatch_part(&mut self.inner, event).iter() {
            if *sender == SLIDER {
                self.handle_slider(note);
                result = EventResult::Handled;
                continue;
            }
            if cx.notify(*sender, note) == EventResult::Handled {
                result = EventResult::Handled;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Recorder;

    const SCREEN: Size = Size::new(640, 480);

    fn click(w: &mut impl Control, rec: &mut Recorder, p: Point) {
        let mut cx = Context::new(rec);
        w.dispatch(&Event::with_point(EventId::LMouseDown, p), &mut cx);
        w.dispatch(&Event::with_point(EventId::LMouseUp, p), &mut cx);
    }

    fn center_of(b: &Button) -> Point {
        let r = b.bounds();
        Point::new(r.x1 + r.width() / 2, r.y1 + r.height() / 2)
    }

    #[test]
    fn message_box_is_centered_and_answers() {
        let mut mb = MessageBox::new(ControlId(50), SCREEN, Size::new(200, 80), "Sure?", "Yes", Some("No"));
        assert_eq!(mb.location(), Point::new(220, 200));

        let mut rec = Recorder::default();
        let ok = center_of(&mb.ok);
        click(&mut mb, &mut rec, ok);
        let cancel = mb.cancel.as_ref().map(center_of);
        if let Some(cancel) = cancel {
            click(&mut mb, &mut rec, cancel);
        }
        assert_eq!(
            rec.events,
            [
                (ControlId(50), Event::with_value(EventId::DialogResponse, RESPONSE_OK)),
                (ControlId(50), Event::with_value(EventId::DialogResponse, RESPONSE_CANCEL)),
            ]
        );
    }

    #[test]
    fn keys_answer_the_message_box() {
        let mut mb = MessageBox::new(ControlId(50), SCREEN, Size::new(200, 80), "Info", "Ok", None);
        let mut rec = Recorder::default();
        let mut cx = Context::new(&mut rec);
        mb.dispatch(&Event::with_value(EventId::KeyDown, vk::ESCAPE), &mut cx);
        mb.dispatch(&Event::with_value(EventId::KeyDown, vk::RETURN), &mut cx);
        assert_eq!(rec.events, [(ControlId(50), Event::with_value(EventId::DialogResponse, 1))]);
    }

    #[test]
    fn press_on_ok_released_elsewhere_does_not_answer() {
        let mut mb = MessageBox::new(ControlId(50), SCREEN, Size::new(200, 80), "Sure?", "Ok", Some("Cancel"));
        let mut rec = Recorder::default();
        let ok = center_of(&mb.ok);
        let mut cx = Context::new(&mut rec);
        mb.dispatch(&Event::with_point(EventId::LMouseDown, ok), &mut cx);
        mb.dispatch(&Event::with_point(EventId::LMouseUp, Point::new(0, 0)), &mut cx);
        assert!(rec.events.is_empty());
    }

    #[test]
    fn moving_a_message_box_moves_its_children() {
        let mut mb = MessageBox::new(ControlId(50), SCREEN, Size::new(200, 80), "Sure?", "Ok", None);
        mb.add_control(StaticText::new(CONTROL_USER1, Point::new(230, 230), "x"));
        let ok_before = mb.ok.location();
        mb.set_location(Point::new(0, 0));
        assert_eq!(mb.ok.location(), ok_before - Point::new(220, 200));
        assert_eq!(mb.control(CONTROL_USER1).map(|c| c.location()), Some(Point::new(10, 30)));
    }

    #[test]
    fn group_selection_tracks_the_radio_choice() {
        let mut dialog = GroupSelectionDialog::new(
            ControlId(60),
            SCREEN,
            "Apply to",
            &["Pattern", "Song", "Track"],
        );
        let height = 74 + 3 * (10 + SPACER_HEIGHT + 1);
        assert_eq!(dialog.size(), Size::new(GroupSelectionDialog::WIDTH, height));

        let radio = dialog.message_box().control_as::<RadioGroup>(CONTROL_USER1).map(|r| r.bounds());
        let Some(radio) = radio else {
            panic!("radio group missing");
        };
        assert_eq!(radio.y1, dialog.message_box().caption().location().y + 12);

        let mut rec = Recorder::default();
        let second_row = Point::new(radio.x1 + 2, radio.y1 + 14 + 2);
        click(&mut dialog, &mut rec, second_row);
        assert_eq!(dialog.selection(), 1);
        assert_eq!(rec.events, [(CONTROL_USER1, Event::with_value(EventId::Selection, 1))]);
    }

    #[test]
    fn num_pad_keys_map_to_digits() {
        assert_eq!(QuickChooseDialog::num_pad_key_to_value(0x60), 0);
        assert_eq!(QuickChooseDialog::num_pad_key_to_value(0x69), 9);
        assert_eq!(QuickChooseDialog::num_pad_key_to_value(0x6A), NOT_A_DIGIT);
        assert_eq!(QuickChooseDialog::num_pad_key_to_value(0x30), NOT_A_DIGIT);
    }

    #[test]
    fn quick_choose_clamps_and_builds_typed_values() {
        let mut dialog = QuickChooseDialog::new(ControlId(70), SCREEN, "Instrument", 1, 128, 1);
        assert_eq!(dialog.value(), 1);
        dialog.set_value(500);
        assert_eq!(dialog.value(), 128);
        dialog.set_value(-3);
        assert_eq!(dialog.value(), 1);

        let mut rec = Recorder::default();
        let mut cx = Context::new(&mut rec);
        for key in [vk::NUMPAD0 + 4, 0x32] {
            dialog.dispatch(&Event::with_value(EventId::KeyDown, key), &mut cx);
        }
        assert_eq!(dialog.value(), 42);
        // 429 is out of range, so typing starts over.
        dialog.dispatch(&Event::with_value(EventId::KeyDown, vk::NUMPAD0 + 9), &mut cx);
        assert_eq!(dialog.value(), 9);
        dialog.dispatch(&Event::with_value(EventId::KeyDown, vk::RETURN), &mut cx);
        assert_eq!(rec.events, [(ControlId(70), Event::with_value(EventId::DialogResponse, 1))]);
    }

    #[test]
    fn quick_choose_slider_buttons_step_the_value() {
        let mut dialog = QuickChooseDialog::new(ControlId(70), SCREEN, "Octave", 0, 8, 2);
        let Some(slider) = dialog.message_box().control_as::<Scrollbar>(SLIDER).map(|s| s.bounds())
        else {
            panic!("slider missing");
        };
        let mut rec = Recorder::default();
        let down_button = Point::new(slider.x2 - 2, slider.y1 + 2);
        click(&mut dialog, &mut rec, down_button);
        assert_eq!(dialog.value(), 2);
        click(&mut dialog, &mut rec, Point::new(slider.x1 + 2, slider.y1 + 2));
        assert_eq!(dialog.value(), 0);
        assert!(rec.events.is_empty());
    }
}
