//! Scrollable single-selection list
//!
//! The list owns a vertical [`Scrollbar`] that is shown only while there are
//! more items than visible rows. The list is the scrollbar's listener: the
//! bar's notifications scroll the rows and never reach the list's owner.

use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::DrawTarget;

use crate::capture::{Capture, Release};
use crate::color::{self, Color};
use crate::control::{Context, Control, ControlBase, ControlId, dispatch_part};
use crate::event::{Event, EventId, EventResult, MouseAction, vk};
use crate::geometry::{Point, Rect, Size};
use crate::string::UiString;
use crate::widgets::paint;
use crate::widgets::scrollbar::{FRACTION_ONE, SCROLL_BUTTON_SIZE, Scrollbar};
use crate::widgets::text::Font;

/// Horizontal padding in front of each row's text.
const TEXT_INDENT: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Rows,
    Scrollbar,
}

pub struct ListBox {
    base: ControlBase,
    items: Vec<UiString>,
    selected: Option<usize>,
    first_visible: usize,
    font: Font,
    color: Color,
    scrollbar: Scrollbar,
    capture: Capture<Target>,
}

impl ListBox {
    pub fn new(id: ControlId, location: Point, size: Size) -> Self {
        let mut list = Self {
            base: ControlBase::new(id, location, size),
            items: Vec::new(),
            selected: None,
            first_visible: 0,
            font: Font::System,
            color: color::DESKTOP,
            scrollbar: scrollbar_for(location, size),
            capture: Capture::new(),
        };
        list.sync_scrollbar();
        list
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self.clamp_first_visible();
        self.sync_scrollbar();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn add_item(&mut self, item: &str) {
        self.items.push(UiString::from(item));
        self.sync_scrollbar();
        self.base.dirty = true;
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
        self.first_visible = 0;
        self.sync_scrollbar();
        self.base.dirty = true;
    }

    pub fn items(&self) -> &[UiString] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&UiString> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// Select `index` and scroll it into view; out-of-range indices are
    /// ignored.
    pub fn set_selected(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        if self.selected != Some(index) {
            self.selected = Some(index);
            self.base.dirty = true;
        }
        self.ensure_visible(index);
    }

    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    pub fn visible_rows(&self) -> usize {
        (self.base.size.height / self.font.char_height()).max(0) as usize
    }

    pub fn has_scrollbar(&self) -> bool {
        self.items.len() > self.visible_rows()
    }

    pub fn scrollbar(&self) -> &Scrollbar {
        &self.scrollbar
    }

    pub fn scroll_to(&mut self, first_visible: usize) {
        let previous = self.first_visible;
        self.first_visible = first_visible;
        self.clamp_first_visible();
        if self.first_visible != previous {
            self.base.dirty = true;
        }
        self.sync_scrollbar();
    }

    fn max_first_visible(&self) -> usize {
        self.items.len().saturating_sub(self.visible_rows())
    }

    fn clamp_first_visible(&mut self) {
        self.first_visible = self.first_visible.min(self.max_first_visible());
    }

    fn ensure_visible(&mut self, index: usize) {
        let rows = self.visible_rows().max(1);
        if index < self.first_visible {
            self.scroll_to(index);
        } else if index >= self.first_visible + rows {
            self.scroll_to(index + 1 - rows);
        }
    }

    fn rows_rect(&self) -> Rect {
        let mut r = self.bounds();
        if self.has_scrollbar() {
            r.x2 -= self.scrollbar.size().width;
        }
        r
    }

    /// Match the scrollbar's thumb to the visible window.
    fn sync_scrollbar(&mut self) {
        let len = self.items.len();
        let rows = self.visible_rows();
        let (size, position) = if len > rows {
            let size = (rows as i64 * FRACTION_ONE as i64 / len as i64) as i32;
            let position =
                (self.first_visible as i64 * FRACTION_ONE as i64 / (len - rows) as i64) as i32;
            (size, position)
        } else {
            (FRACTION_ONE, 0)
        };
        self.scrollbar.set_bar_size(size, false);
        self.scrollbar.set_bar_position(position, true);
        self.scrollbar.set_visible(len > rows);
    }

    fn row_at(&self, p: Point) -> Option<usize> {
        if !self.rows_rect().contains(p) {
            return None;
        }
        let row = ((p.y - self.base.location.y) / self.font.char_height()) as usize;
        let index = self.first_visible + row;
        (index < self.items.len()).then_some(index)
    }

    fn select_and_notify(&mut self, index: usize, cx: &mut Context<'_>) -> EventResult {
        self.set_selected(index);
        cx.notify(self.id(), &Event::with_value(EventId::Selection, index as i32))
    }

    fn forward_to_scrollbar(&mut self, event: &Event) -> EventResult {
        let notes = dispatch_part(&mut self.scrollbar, event);
        let mut result = EventResult::Ignored;
        for (_, note) in notes.iter() {
            self.handle_scrollbar_event(note);
            result = EventResult::Handled;
        }
        result
    }

    fn handle_scrollbar_event(&mut self, event: &Event) {
        let rows = self.visible_rows();
        match event.id {
            EventId::BarScrollUp => self.scroll_to(self.first_visible.saturating_sub(1)),
            EventId::BarScrollDown => self.scroll_to(self.first_visible + 1),
            EventId::BarPageUp => self.scroll_to(self.first_visible.saturating_sub(rows)),
            EventId::BarPageDown => self.scroll_to(self.first_visible + rows),
            EventId::BarPosChanged => {
                let span = self.max_first_visible() as i64;
                let position = self.scrollbar.bar_position() as i64;
                let first = ((position * span + FRACTION_ONE as i64 / 2) / FRACTION_ONE as i64) as usize;
                if first != self.first_visible {
                    self.first_visible = first.min(self.max_first_visible());
                    self.base.dirty = true;
                }
            }
            _ => {}
        }
    }

    fn relayout(&mut self) {
        self.scrollbar = scrollbar_for(self.base.location, self.base.size);
        self.capture.clear();
        self.clamp_first_visible();
        self.sync_scrollbar();
        self.base.dirty = true;
    }
}

fn scrollbar_for(location: Point, size: Size) -> Scrollbar {
    let at = Point::new(location.x + size.width - SCROLL_BUTTON_SIZE, location.y);
    Scrollbar::new(ControlId::default(), at, size.height, false)
}

impl Control for ListBox {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn set_location(&mut self, location: Point) {
        if self.base.location != location {
            self.base.location = location;
            self.relayout();
        }
    }

    fn set_size(&mut self, size: Size) {
        if self.base.size != size {
            self.base.size = size;
            self.relayout();
        }
    }

    fn is_dirty(&self) -> bool {
        self.base.dirty || self.scrollbar.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.base.dirty = false;
        self.scrollbar.mark_clean();
    }

    fn dispatch(&mut self, event: &Event, cx: &mut Context<'_>) -> EventResult {
        if !self.is_enabled() {
            return EventResult::Ignored;
        }

        if event.id == EventId::KeyDown {
            let Some(key) = event.value() else {
                return EventResult::Ignored;
            };
            let next = match (key, self.selected) {
                (vk::UP, Some(i)) => i.saturating_sub(1),
                (vk::DOWN, Some(i)) => (i + 1).min(self.items.len().saturating_sub(1)),
                (vk::UP | vk::DOWN, None) if !self.items.is_empty() => 0,
                _ => return EventResult::Ignored,
            };
            return self.select_and_notify(next, cx);
        }

        let (Some(button), Some(action)) = (event.id.mouse_button(), event.id.mouse_action())
        else {
            return match self.capture.caught() {
                Some(Target::Scrollbar) => self.forward_to_scrollbar(event),
                _ => EventResult::Ignored,
            };
        };

        match action {
            MouseAction::Down => {
                let Some(p) = event.point() else {
                    return EventResult::Ignored;
                };
                if self.has_scrollbar() && self.scrollbar.hit(p) {
                    self.capture.catch(Target::Scrollbar, button);
                    return self.forward_to_scrollbar(event);
                }
                self.capture.catch(Target::Rows, button);
                match self.row_at(p) {
                    Some(index) => self.select_and_notify(index, cx),
                    None => EventResult::Ignored,
                }
            }
            MouseAction::Up => match self.capture.release(button) {
                Release::Held(Target::Scrollbar) | Release::Ended(Target::Scrollbar) => {
                    self.forward_to_scrollbar(event)
                }
                _ => EventResult::Ignored,
            },
            MouseAction::Repeat | MouseAction::Drag => match self.capture.caught() {
                Some(Target::Scrollbar) => self.forward_to_scrollbar(event),
                _ => EventResult::Ignored,
            },
        }
    }

    fn paint<D: DrawTarget<Color = Rgb888>>(&self, g: &mut D) -> Result<(), D::Error> {
        if !self.is_visible() {
            return Ok(());
        }

        let rows = self.rows_rect();
        paint::fill(g, rows, self.color)?;

        let ch = self.font.char_height();
        let mut y = self.base.location.y;
        for (index, item) in self
            .items
            .iter()
            .enumerate()
            .skip(self.first_visible)
            .take(self.visible_rows())
        {
            let text_color = if self.selected == Some(index) {
                paint::fill(g, Rect::new(rows.x1, y, rows.x2, y + ch), color::SELECTION)?;
                color::TEXT_SELECTED
            } else {
                color::TEXT
            };
            paint::text(g, item, Point::new(rows.x1 + TEXT_INDENT, y), self.font, text_color)?;
            y += ch;
        }

        if self.has_scrollbar() {
            self.scrollbar.paint(g)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Recorder;

    /// Ten rows visible (100 pixels of 10 pixel rows), 25 items.
    fn list() -> ListBox {
        let mut list = ListBox::new(ControlId(5), Point::new(0, 0), Size::new(120, 100));
        for i in 0..25 {
            list.add_item(&alloc::format!("{:02} Instrument", i));
        }
        list
    }

    fn send(list: &mut ListBox, rec: &mut Recorder, id: EventId, x: i32, y: i32) -> EventResult {
        list.dispatch(&Event::with_point(id, Point::new(x, y)), &mut Context::new(rec))
    }

    #[test]
    fn scrollbar_appears_with_overflow() {
        let mut list = ListBox::new(ControlId(5), Point::new(0, 0), Size::new(120, 100));
        list.add_item("one");
        assert!(!list.has_scrollbar());
        assert!(!list.scrollbar().is_visible());

        let list = self::list();
        assert!(list.has_scrollbar());
        assert_eq!(list.scrollbar().bar_size(), 10 * FRACTION_ONE / 25);
    }

    #[test]
    fn clicking_a_row_selects_it() {
        let mut list = list();
        let mut rec = Recorder::default();
        send(&mut list, &mut rec, EventId::LMouseDown, 20, 35);
        assert_eq!(list.selected(), Some(3));
        assert_eq!(rec.events, [(ControlId(5), Event::with_value(EventId::Selection, 3))]);
        send(&mut list, &mut rec, EventId::LMouseUp, 20, 35);
        assert_eq!(rec.events.len(), 1);
    }

    #[test]
    fn scroll_buttons_move_one_row() {
        let mut list = list();
        let mut rec = Recorder::default();
        // Down button sits at the bottom of the bar on the right edge.
        send(&mut list, &mut rec, EventId::LMouseDown, 115, 95);
        send(&mut list, &mut rec, EventId::LMouseUp, 115, 95);
        assert_eq!(list.first_visible(), 1);
        assert!(rec.events.is_empty());

        send(&mut list, &mut rec, EventId::LMouseDown, 115, 5);
        send(&mut list, &mut rec, EventId::LMouseUp, 115, 5);
        assert_eq!(list.first_visible(), 0);
    }

    #[test]
    fn paging_moves_a_screenful() {
        let mut list = list();
        let mut rec = Recorder::default();
        let thumb = list.scrollbar().thumb_rect();
        send(&mut list, &mut rec, EventId::LMouseDown, 115, thumb.y2 + 2);
        assert_eq!(list.first_visible(), 10);
        send(&mut list, &mut rec, EventId::LMouseUp, 115, thumb.y2 + 2);
    }

    #[test]
    fn thumb_drag_maps_to_rows() {
        let mut list = list();
        let mut rec = Recorder::default();
        let thumb = list.scrollbar().thumb_rect();
        send(&mut list, &mut rec, EventId::LMouseDown, 115, thumb.y1 + 1);
        send(&mut list, &mut rec, EventId::LMouseDrag, 115, thumb.y1 + 200);
        assert_eq!(list.first_visible(), 15);
        send(&mut list, &mut rec, EventId::LMouseUp, 115, thumb.y1 + 200);
        assert!(rec.events.is_empty());
    }

    #[test]
    fn selection_is_scrolled_into_view() {
        let mut list = list();
        list.set_selected(20);
        assert_eq!(list.first_visible(), 11);
        list.set_selected(2);
        assert_eq!(list.first_visible(), 2);
        list.set_selected(99);
        assert_eq!(list.selected(), Some(2));
    }

    #[test]
    fn arrow_keys_move_the_selection() {
        let mut list = list();
        let mut rec = Recorder::default();
        let key = |k| Event::with_value(EventId::KeyDown, k);
        list.dispatch(&key(vk::DOWN), &mut Context::new(&mut rec));
        assert_eq!(list.selected(), Some(0));
        list.dispatch(&key(vk::DOWN), &mut Context::new(&mut rec));
        list.dispatch(&key(vk::UP), &mut Context::new(&mut rec));
        assert_eq!(list.selected(), Some(0));
        assert_eq!(rec.events.len(), 3);
    }
}
