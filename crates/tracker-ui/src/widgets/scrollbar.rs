//! Scrollbar: the canonical composite control
//!
//! A scrollbar is built from four buttons: the track background, an up/left
//! button, a down/right button and the draggable thumb. The parts are plain
//! values rebuilt whenever the geometry changes. Pointer input is routed to
//! the part that caught the initial press (see [`Capture`]); what the parts
//! notify is turned into scrollbar notifications for the owner:
//!
//! | part       | part event        | scrollbar notification       |
//! |------------|-------------------|------------------------------|
//! | up         | up, repeat        | `BarScrollUp`                |
//! | down       | up, repeat        | `BarScrollDown`              |
//! | thumb      | drag              | `BarPosChanged`              |
//! | background | down, repeat      | `BarPageUp` / `BarPageDown`  |
//!
//! Thumb length and offset are fixed-point fractions in `[0, 65536]`.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::DrawTarget;

use crate::capture::{Capture, CaptureState, Release};
use crate::color::{self, Color};
use crate::control::{Context, Control, ControlBase, ControlId, dispatch_part};
use crate::event::{Event, EventId, EventResult, MouseAction};
use crate::geometry::{Point, Rect, Size};
use crate::widgets::button::{ArrowDirection, Button, Glyph};

/// Default edge length of the end buttons and thickness of the bar.
pub const SCROLL_BUTTON_SIZE: i32 = 10;

/// Fixed-point one for bar sizes and positions.
pub const FRACTION_ONE: i32 = 65536;

/// Role of a scrollbar part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Background,
    Up,
    Down,
    Thumb,
}

struct Parts {
    background: Button,
    up: Button,
    down: Button,
    thumb: Button,
}

impl Parts {
    fn get(&self, part: Part) -> &Button {
        match part {
            Part::Background => &self.background,
            Part::Up => &self.up,
            Part::Down => &self.down,
            Part::Thumb => &self.thumb,
        }
    }

    fn get_mut(&mut self, part: Part) -> &mut Button {
        match part {
            Part::Background => &mut self.background,
            Part::Up => &mut self.up,
            Part::Down => &mut self.down,
            Part::Thumb => &mut self.thumb,
        }
    }

    fn iter(&self) -> impl Iterator<Item = &Button> {
        [&self.background, &self.up, &self.down, &self.thumb].into_iter()
    }
}

pub struct Scrollbar {
    base: ControlBase,
    one_dim_size: i32,
    horizontal: bool,
    button_size: i32,
    track_color: Color,
    bar_size: i32,
    bar_position: i32,
    parts: Parts,
    capture: Capture<Part>,
    caught_mouse_location: Point,
    caught_control_location: Point,
}

impl Scrollbar {
    /// Create a scrollbar `one_dim_size` pixels long. The thumb starts
    /// covering the whole track at position zero.
    pub fn new(id: ControlId, location: Point, one_dim_size: i32, horizontal: bool) -> Self {
        let button_size = SCROLL_BUTTON_SIZE;
        let parts = build_parts(
            location,
            one_dim_size,
            button_size,
            horizontal,
            color::SCROLLBAR_TRACK,
        );
        let mut bar = Self {
            base: ControlBase::new(id, location, axis_size(horizontal, one_dim_size, button_size)),
            one_dim_size,
            horizontal,
            button_size,
            track_color: color::SCROLLBAR_TRACK,
            bar_size: FRACTION_ONE,
            bar_position: 0,
            parts,
            capture: Capture::new(),
            caught_mouse_location: Point::zero(),
            caught_control_location: Point::zero(),
        };
        bar.layout();
        bar
    }

    pub fn with_button_size(mut self, button_size: i32) -> Self {
        self.button_size = button_size.max(0);
        self.layout();
        self
    }

    pub fn with_track_color(mut self, color: Color) -> Self {
        self.track_color = color;
        self.layout();
        self
    }

    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }

    pub fn button_size(&self) -> i32 {
        self.button_size
    }

    /// Length along the primary axis.
    pub fn length(&self) -> i32 {
        self.one_dim_size
    }

    /// Change the length along the primary axis and rebuild the parts.
    pub fn set_length(&mut self, one_dim_size: i32) {
        if self.one_dim_size != one_dim_size {
            self.one_dim_size = one_dim_size;
            self.layout();
        }
    }

    pub fn bar_size(&self) -> i32 {
        self.bar_size
    }

    pub fn bar_position(&self) -> i32 {
        self.bar_position
    }

    pub fn capture_state(&self) -> CaptureState {
        self.capture.state()
    }

    pub fn thumb_rect(&self) -> Rect {
        self.parts.thumb.bounds()
    }

    /// Area between the two end buttons.
    pub fn track_rect(&self) -> Rect {
        let origin = self.axis_offset(self.base.location, self.button_size);
        Rect::from_location_size(origin, self.axis_size(self.track_length()))
    }

    /// Set the thumb length as a fraction of the track.
    ///
    /// The current position is re-applied so the thumb stays inside the
    /// track.
    pub fn set_bar_size(&mut self, fraction: i32, repaint: bool) {
        self.bar_size = fraction.clamp(0, FRACTION_ONE);
        self.apply_bar_size();
        self.apply_bar_position();
        if repaint {
            self.base.dirty = true;
        }
    }

    /// Set the scroll position as a fraction of the thumb's travel.
    pub fn set_bar_position(&mut self, fraction: i32, repaint: bool) {
        self.bar_position = fraction.clamp(0, FRACTION_ONE);
        self.apply_bar_position();
        if repaint {
            self.base.dirty = true;
        }
    }

    fn track_length(&self) -> i32 {
        self.one_dim_size - self.button_size * 2
    }

    fn track_origin(&self) -> i32 {
        self.base.location.along(self.horizontal) + self.button_size
    }

    fn thumb_length(&self) -> i32 {
        self.parts.thumb.size().along(self.horizontal)
    }

    /// Pixels the thumb can travel.
    fn travel(&self) -> i32 {
        self.track_length() - self.thumb_length()
    }

    fn axis_size(&self, along: i32) -> Size {
        axis_size(self.horizontal, along, self.button_size)
    }

    fn axis_offset(&self, p: Point, along: i32) -> Point {
        axis_offset(self.horizontal, p, along)
    }

    /// Rebuild every part for the current geometry.
    fn layout(&mut self) {
        self.base.size = self.axis_size(self.one_dim_size);
        self.parts = build_parts(
            self.base.location,
            self.one_dim_size,
            self.button_size,
            self.horizontal,
            self.track_color,
        );
        // Parts were replaced, so no part can still hold the capture.
        self.capture.clear();
        self.apply_bar_size();
        self.apply_bar_position();
        self.base.dirty = true;
    }

    fn apply_bar_size(&mut self) {
        let length = ((self.track_length().max(0) as i64 * self.bar_size as i64) >> 16) as i32;
        let size = self.axis_size(length);
        self.parts.thumb.base_mut().size = size;
    }

    fn apply_bar_position(&mut self) {
        let travel = self.travel().max(0);
        let offset = ((travel as i64 * self.bar_position as i64) >> 16) as i32;
        let location = self.axis_offset(self.base.location, self.button_size + offset);
        self.parts.thumb.base_mut().location = location;
    }

    fn begin_thumb_drag(&mut self, at: Point) {
        self.parts.thumb.set_pressed(true);
        self.caught_mouse_location = at;
        self.caught_control_location = self.parts.thumb.location();
    }

    /// Forward `event` to `part` and translate what it notifies.
    fn forward(&mut self, part: Part, event: &Event, cx: &mut Context<'_>) -> EventResult {
        let notes = dispatch_part(self.parts.get_mut(part), event);
        let mut result = EventResult::Ignored;
        for (_, note) in notes.iter() {
            if self.handle_part_event(part, note, cx) == EventResult::Handled {
                result = EventResult::Handled;
            }
        }
        result
    }

    fn handle_part_event(&mut self, part: Part, event: &Event, cx: &mut Context<'_>) -> EventResult {
        let action = event.id.mouse_action();
        match (part, action) {
            (Part::Up, Some(MouseAction::Up | MouseAction::Repeat)) => {
                cx.notify(self.id(), &Event::new(EventId::BarScrollUp))
            }
            (Part::Down, Some(MouseAction::Up | MouseAction::Repeat)) => {
                cx.notify(self.id(), &Event::new(EventId::BarScrollDown))
            }
            (Part::Thumb, Some(MouseAction::Drag)) => match event.point() {
                Some(p) => self.drag_thumb(p, cx),
                None => EventResult::Ignored,
            },
            _ => EventResult::Ignored,
        }
    }

    fn drag_thumb(&mut self, p: Point, cx: &mut Context<'_>) -> EventResult {
        let h = self.horizontal;
        let delta = p.along(h) - self.caught_mouse_location.along(h);
        let offset = self.caught_control_location.along(h) + delta - self.track_origin();
        let travel = self.travel();
        let position = if travel != 0 {
            (offset as i64 * FRACTION_ONE as i64 / travel as i64)
                .clamp(0, FRACTION_ONE as i64) as i32
        } else {
            0
        };
        self.set_bar_position(position, true);
        cx.notify(self.id(), &Event::new(EventId::BarPosChanged))
    }

    /// Page by one screenful towards the side of the thumb `p` lies on.
    fn page(&mut self, p: Point, cx: &mut Context<'_>) -> EventResult {
        let h = self.horizontal;
        let thumb_start = self.parts.thumb.location().along(h);
        let thumb_end = thumb_start + self.thumb_length();
        let at = p.along(h);

        let travel = self.travel();
        if travel == 0 {
            return EventResult::Ignored;
        }
        let step = (self.bar_size as i64 * self.track_length() as i64 / travel as i64) as i32;

        let (position, id) = if at < thumb_start {
            (self.bar_position.saturating_sub(step), EventId::BarPageUp)
        } else if at > thumb_end {
            (self.bar_position.saturating_add(step), EventId::BarPageDown)
        } else {
            return EventResult::Ignored;
        };
        self.set_bar_position(position, true);
        cx.notify(self.id(), &Event::new(id))
    }
}

fn axis_size(horizontal: bool, along: i32, thickness: i32) -> Size {
    if horizontal {
        Size::new(along, thickness)
    } else {
        Size::new(thickness, along)
    }
}

fn axis_offset(horizontal: bool, p: Point, along: i32) -> Point {
    if horizontal {
        p.offset(along, 0)
    } else {
        p.offset(0, along)
    }
}

fn build_parts(
    location: Point,
    one_dim_size: i32,
    button_size: i32,
    horizontal: bool,
    track_color: Color,
) -> Parts {
    let part_id = ControlId::default();
    let end_size = Size::new(button_size, button_size);
    let (back, forth) = if horizontal {
        (ArrowDirection::Left, ArrowDirection::Right)
    } else {
        (ArrowDirection::Up, ArrowDirection::Down)
    };

    let background = Button::new(
        part_id,
        location,
        axis_size(horizontal, one_dim_size, button_size),
    )
    .with_border(false)
    .with_color(track_color)
    .with_invert_shading(true);

    let up = Button::new(part_id, location, end_size)
        .with_border(false)
        .with_glyph(Glyph::Arrow(back));

    let down = Button::new(
        part_id,
        axis_offset(horizontal, location, one_dim_size - button_size),
        end_size,
    )
    .with_border(false)
    .with_glyph(Glyph::Arrow(forth));

    let thumb = Button::new(
        part_id,
        axis_offset(horizontal, location, button_size),
        axis_size(horizontal, one_dim_size - button_size * 2, button_size),
    )
    .with_border(false)
    .with_clickable(false)
    .with_glyph(Glyph::Grip { horizontal });

    Parts {
        background,
        up,
        down,
        thumb,
    }
}

impl Control for Scrollbar {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn set_location(&mut self, location: Point) {
        if self.base.location != location {
            self.base.location = location;
            self.layout();
        }
    }

    fn set_size(&mut self, size: Size) {
        self.set_length(size.along(self.horizontal));
    }

    fn is_dirty(&self) -> bool {
        self.base.dirty || self.parts.iter().any(|p| p.is_dirty())
    }

    fn mark_clean(&mut self) {
        self.base.dirty = false;
        for part in [Part::Background, Part::Up, Part::Down, Part::Thumb] {
            self.parts.get_mut(part).mark_clean();
        }
    }

    fn dispatch(&mut self, event: &Event, cx: &mut Context<'_>) -> EventResult {
        let (Some(button), Some(action)) = (event.id.mouse_button(), event.id.mouse_action())
        else {
            // Moves and non-pointer events only reach a captured part.
            return match self.capture.caught() {
                Some(part) => self.forward(part, event, cx),
                None => EventResult::Ignored,
            };
        };

        match action {
            MouseAction::Down => {
                let Some(p) = event.point() else {
                    return EventResult::Ignored;
                };
                let hit = [Part::Up, Part::Down, Part::Thumb]
                    .into_iter()
                    .find(|&part| self.parts.get(part).hit(p));
                match hit {
                    Some(part) => {
                        self.capture.catch(part, button);
                        if part == Part::Thumb {
                            self.begin_thumb_drag(p);
                        }
                        self.forward(part, event, cx)
                    }
                    None if self.parts.background.hit(p) => self.page(p, cx),
                    None => EventResult::Ignored,
                }
            }
            MouseAction::Up => match self.capture.release(button) {
                Release::Idle => EventResult::Ignored,
                Release::Held(part) => self.forward(part, event, cx),
                Release::Ended(part) => {
                    if part == Part::Thumb {
                        self.parts.thumb.set_pressed(false);
                    }
                    self.forward(part, event, cx)
                }
            },
            MouseAction::Repeat => {
                if let Some(part) = self.capture.caught() {
                    return self.forward(part, event, cx);
                }
                let Some(p) = event.point() else {
                    return EventResult::Ignored;
                };
                if self.parts.thumb.hit(p) {
                    self.capture.catch_silently(Part::Thumb);
                    self.begin_thumb_drag(p);
                    self.forward(Part::Thumb, event, cx)
                } else if self.parts.background.hit(p) {
                    self.page(p, cx)
                } else {
                    EventResult::Ignored
                }
            }
            MouseAction::Drag => match self.capture.caught() {
                Some(part) => self.forward(part, event, cx),
                None => EventResult::Ignored,
            },
        }
    }

    fn paint<D: DrawTarget<Color = Rgb888>>(&self, g: &mut D) -> Result<(), D::Error> {
        if !self.is_visible() {
            return Ok(());
        }
        self.parts.background.paint(g)?;
        self.parts.down.paint(g)?;
        self.parts.up.paint(g)?;
        self.parts.thumb.paint(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;
    use crate::testing::Recorder;

    /// Horizontal bar at the origin: 200 long, 20 pixel end buttons.
    fn bar() -> Scrollbar {
        Scrollbar::new(ControlId(7), Point::new(0, 0), 200, true).with_button_size(20)
    }

    fn send(bar: &mut Scrollbar, rec: &mut Recorder, id: EventId, x: i32, y: i32) -> EventResult {
        bar.dispatch(&Event::with_point(id, Point::new(x, y)), &mut Context::new(rec))
    }

    #[test]
    fn half_size_half_position_example() {
        let mut bar = bar();
        bar.set_bar_size(32768, true);
        assert_eq!(bar.thumb_rect().width(), 80);

        bar.set_bar_position(32768, true);
        let thumb = bar.thumb_rect();
        assert_eq!((thumb.x1, thumb.x2), (60, 140));
        assert_eq!(bar.track_rect(), Rect::new(20, 0, 180, 20));
    }

    #[test]
    fn vertical_layout() {
        let mut bar = Scrollbar::new(ControlId(1), Point::new(5, 10), 100, false);
        assert_eq!(bar.size(), Size::new(SCROLL_BUTTON_SIZE, 100));
        bar.set_bar_size(FRACTION_ONE / 2, false);
        bar.set_bar_position(FRACTION_ONE, false);
        let thumb = bar.thumb_rect();
        assert_eq!(thumb.height(), 40);
        assert_eq!(thumb.y2, 10 + 100 - SCROLL_BUTTON_SIZE);
    }

    #[test]
    fn thumb_stays_inside_track_for_all_positions() {
        for size in [0, 1, 8192, 32768, 50000, FRACTION_ONE] {
            let mut bar = bar();
            bar.set_bar_size(size, false);
            for pos in (0..=FRACTION_ONE).step_by(997).chain([FRACTION_ONE]) {
                bar.set_bar_position(pos, false);
                let thumb = bar.thumb_rect();
                let track = bar.track_rect();
                assert!(thumb.x1 >= track.x1, "size {size} pos {pos}");
                assert!(thumb.x2 <= track.x2, "size {size} pos {pos}");
            }
        }
    }

    #[test]
    fn fractions_are_clamped() {
        let mut bar = bar();
        bar.set_bar_size(-5, false);
        assert_eq!(bar.bar_size(), 0);
        bar.set_bar_size(70000, false);
        assert_eq!(bar.bar_size(), FRACTION_ONE);
        bar.set_bar_position(1 << 20, false);
        assert_eq!(bar.bar_position(), FRACTION_ONE);
    }

    #[test]
    fn set_bar_size_is_idempotent() {
        let mut bar = bar();
        bar.set_bar_position(20000, false);
        bar.set_bar_size(12345, false);
        let first = bar.thumb_rect();
        bar.set_bar_size(12345, false);
        assert_eq!(bar.thumb_rect(), first);
    }

    #[test]
    fn repaint_flag_controls_dirtiness() {
        let mut bar = bar();
        bar.mark_clean();
        bar.set_bar_position(1000, false);
        assert!(!bar.is_dirty());
        bar.set_bar_position(2000, true);
        assert!(bar.is_dirty());
    }

    #[test]
    fn dragging_the_thumb_round_trips() {
        let mut bar = bar();
        bar.set_bar_size(32768, false);
        let mut rec = Recorder::default();

        send(&mut bar, &mut rec, EventId::LMouseDown, 30, 5);
        assert_eq!(bar.capture_state(), CaptureState::CapturedByLeft);
        assert!(rec.events.is_empty());

        // Orthogonal movement is ignored.
        send(&mut bar, &mut rec, EventId::LMouseDrag, 70, 55);
        assert_eq!(bar.bar_position(), 32768);
        assert_eq!(bar.thumb_rect().x1, 60);
        assert_eq!(rec.ids(), [EventId::BarPosChanged]);
        assert_eq!(rec.events[0].0, ControlId(7));

        send(&mut bar, &mut rec, EventId::LMouseUp, 70, 55);
        assert_eq!(bar.capture_state(), CaptureState::Idle);
        assert_eq!(rec.ids(), [EventId::BarPosChanged]);

        for delta in 1..80 {
            let mut bar = bar_with_size(32768);
            send(&mut bar, &mut Recorder::default(), EventId::LMouseDown, 25, 5);
            send(&mut bar, &mut Recorder::default(), EventId::LMouseDrag, 25 + delta, 5);
            let offset = bar.thumb_rect().x1 - 20;
            assert!((offset - delta).abs() <= 1, "delta {delta} offset {offset}");
        }
    }

    fn bar_with_size(size: i32) -> Scrollbar {
        let mut bar = bar();
        bar.set_bar_size(size, false);
        bar
    }

    #[test]
    fn drag_past_the_ends_clamps() {
        let mut bar = bar_with_size(32768);
        let mut rec = Recorder::default();
        send(&mut bar, &mut rec, EventId::LMouseDown, 30, 5);
        send(&mut bar, &mut rec, EventId::LMouseDrag, 500, 5);
        assert_eq!(bar.bar_position(), FRACTION_ONE);
        send(&mut bar, &mut rec, EventId::LMouseDrag, -500, 5);
        assert_eq!(bar.bar_position(), 0);
    }

    #[test]
    fn full_size_thumb_cannot_move() {
        let mut bar = bar();
        let mut rec = Recorder::default();
        send(&mut bar, &mut rec, EventId::LMouseDown, 50, 5);
        send(&mut bar, &mut rec, EventId::LMouseDrag, 90, 5);
        assert_eq!(bar.bar_position(), 0);
        assert_eq!(bar.thumb_rect().x1, 20);
    }

    #[test]
    fn track_clicks_page_once_per_side() {
        let mut bar = bar_with_size(16384);
        bar.set_bar_position(32768, false);
        let thumb = bar.thumb_rect();
        let mut rec = Recorder::default();

        send(&mut bar, &mut rec, EventId::LMouseDown, thumb.x1 - 5, 5);
        assert_eq!(rec.ids(), [EventId::BarPageUp]);
        assert!(bar.bar_position() < 32768);
        send(&mut bar, &mut rec, EventId::LMouseUp, thumb.x1 - 5, 5);

        rec.clear();
        bar.set_bar_position(32768, false);
        let thumb = bar.thumb_rect();
        send(&mut bar, &mut rec, EventId::LMouseDown, thumb.x2 + 5, 5);
        assert_eq!(rec.ids(), [EventId::BarPageDown]);
        assert!(bar.bar_position() > 32768);
        assert_eq!(bar.capture_state(), CaptureState::Idle);
    }

    #[test]
    fn page_step_follows_bar_size() {
        let mut bar = bar_with_size(32768);
        bar.set_bar_position(32768, false);
        let mut rec = Recorder::default();
        // Step is 32768 * 160 / 80: one full travel.
        send(&mut bar, &mut rec, EventId::LMouseDown, 30, 5);
        assert_eq!(bar.bar_position(), 0);
    }

    #[test]
    fn clicking_the_thumb_does_not_page() {
        let mut bar = bar_with_size(16384);
        let thumb = bar.thumb_rect();
        let mut rec = Recorder::default();
        send(&mut bar, &mut rec, EventId::LMouseDown, thumb.x1 + 2, 5);
        assert!(rec.events.is_empty());
        assert_eq!(bar.capture_state(), CaptureState::CapturedByLeft);
    }

    #[test]
    fn end_buttons_scroll_on_click_and_repeat() {
        let mut bar = bar_with_size(16384);
        let mut rec = Recorder::default();

        send(&mut bar, &mut rec, EventId::LMouseDown, 5, 5);
        send(&mut bar, &mut rec, EventId::LMouseRepeat, 5, 5);
        send(&mut bar, &mut rec, EventId::LMouseUp, 5, 5);
        assert_eq!(rec.ids(), [EventId::BarScrollUp, EventId::BarScrollUp]);

        rec.clear();
        send(&mut bar, &mut rec, EventId::RMouseDown, 195, 5);
        send(&mut bar, &mut rec, EventId::RMouseUp, 195, 5);
        assert_eq!(rec.ids(), [EventId::BarScrollDown]);
    }

    #[test]
    fn releasing_outside_an_end_button_does_not_scroll() {
        let mut bar = bar_with_size(16384);
        let mut rec = Recorder::default();
        send(&mut bar, &mut rec, EventId::LMouseDown, 5, 5);
        send(&mut bar, &mut rec, EventId::LMouseUp, 100, 100);
        assert!(rec.events.is_empty());
        assert_eq!(bar.capture_state(), CaptureState::Idle);
    }

    #[test]
    fn releasing_the_other_button_keeps_the_capture() {
        let mut bar = bar_with_size(32768);
        let mut rec = Recorder::default();
        send(&mut bar, &mut rec, EventId::LMouseDown, 30, 5);
        send(&mut bar, &mut rec, EventId::RMouseDown, 30, 5);
        send(&mut bar, &mut rec, EventId::RMouseUp, 30, 5);
        assert_eq!(bar.capture_state(), CaptureState::CapturedByLeft);

        send(&mut bar, &mut rec, EventId::LMouseDrag, 70, 5);
        assert_eq!(bar.bar_position(), 32768);

        send(&mut bar, &mut rec, EventId::LMouseUp, 70, 5);
        assert_eq!(bar.capture_state(), CaptureState::Idle);
    }

    #[test]
    fn thumb_is_pressed_while_captured() {
        let mut bar = bar_with_size(32768);
        let mut rec = Recorder::default();
        send(&mut bar, &mut rec, EventId::LMouseDown, 30, 5);
        assert!(bar.parts.thumb.is_pressed());
        send(&mut bar, &mut rec, EventId::LMouseUp, 30, 5);
        assert!(!bar.parts.thumb.is_pressed());
    }

    #[test]
    fn repeat_without_capture_pages_or_starts_a_drag() {
        let mut bar = bar_with_size(16384);
        bar.set_bar_position(32768, false);
        let thumb = bar.thumb_rect();
        let mut rec = Recorder::default();

        send(&mut bar, &mut rec, EventId::LMouseRepeat, thumb.x2 + 3, 5);
        assert_eq!(rec.ids(), [EventId::BarPageDown]);

        rec.clear();
        let thumb = bar.thumb_rect();
        send(&mut bar, &mut rec, EventId::LMouseRepeat, thumb.x1 + 1, 5);
        assert!(rec.events.is_empty());
        assert_eq!(bar.capture_state(), CaptureState::CapturedByLeft);
        assert!(!bar.capture.owns(MouseButton::Left));

        send(&mut bar, &mut rec, EventId::LMouseDrag, thumb.x1 + 11, 5);
        assert_eq!(rec.ids(), [EventId::BarPosChanged]);
        send(&mut bar, &mut rec, EventId::LMouseUp, thumb.x1 + 11, 5);
        assert_eq!(bar.capture_state(), CaptureState::Idle);
    }

    #[test]
    fn events_outside_are_ignored() {
        let mut bar = bar();
        let mut rec = Recorder::default();
        let result = send(&mut bar, &mut rec, EventId::LMouseDown, 300, 300);
        assert_eq!(result, EventResult::Ignored);
        assert_eq!(send(&mut bar, &mut rec, EventId::LMouseUp, 300, 300), EventResult::Ignored);
        assert_eq!(send(&mut bar, &mut rec, EventId::MouseMove, 5, 5), EventResult::Ignored);
        assert!(rec.events.is_empty());
    }

    #[test]
    fn moving_rebuilds_parts_and_keeps_fractions() {
        let mut bar = bar_with_size(32768);
        bar.set_bar_position(32768, false);
        bar.set_location(Point::new(100, 50));
        assert_eq!(bar.thumb_rect(), Rect::new(160, 50, 240, 70));
        assert_eq!(bar.bar_size(), 32768);

        bar.set_length(120);
        assert_eq!(bar.size(), Size::new(120, 20));
        assert_eq!(bar.thumb_rect().width(), 40);
    }
}
