//! Events and the listener interface
//!
//! Input events (mouse buttons, drags, auto-repeat ticks, keys) come from the
//! platform layer; semantic events (scrollbar moves, selections, dialog
//! responses) are emitted by controls to their listener. Both travel as the
//! same small [`Event`] value and are handed to handlers by reference for the
//! duration of one call.

use heapless::Vec;

use crate::control::ControlId;
use crate::geometry::Point;

/// Event identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventId {
    LMouseDown,
    LMouseUp,
    /// Auto-repeat tick while the left button is held.
    LMouseRepeat,
    LMouseDrag,
    RMouseDown,
    RMouseUp,
    RMouseRepeat,
    RMouseDrag,
    /// Pointer moved with no button held.
    MouseMove,
    /// Key press; the payload carries the virtual key code.
    KeyDown,
    /// Scrollbar up/left button clicked or repeating.
    BarScrollUp,
    /// Scrollbar down/right button clicked or repeating.
    BarScrollDown,
    /// Scrollbar thumb moved by dragging.
    BarPosChanged,
    /// Scrollbar paged backwards by a track click.
    BarPageUp,
    /// Scrollbar paged forwards by a track click.
    BarPageDown,
    /// A choice control changed its selection (payload: index).
    Selection,
    /// A dialog was answered (payload: 1 = positive, 0 = negative).
    DialogResponse,
}

/// Virtual key codes carried by [`EventId::KeyDown`].
pub mod vk {
    pub const BACK: i32 = 0x08;
    pub const RETURN: i32 = 0x0D;
    pub const ESCAPE: i32 = 0x1B;
    pub const PRIOR: i32 = 0x21;
    pub const NEXT: i32 = 0x22;
    pub const UP: i32 = 0x26;
    pub const DOWN: i32 = 0x28;
    pub const NUMPAD0: i32 = 0x60;
    pub const NUMPAD9: i32 = 0x69;
}

/// Which mouse button an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
}

impl MouseButton {
    pub fn other(self) -> MouseButton {
        match self {
            MouseButton::Left => MouseButton::Right,
            MouseButton::Right => MouseButton::Left,
        }
    }
}

/// What a mouse event does, independent of the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Down,
    Up,
    Repeat,
    Drag,
}

impl EventId {
    /// Build the button-specific id for an action.
    pub fn mouse(button: MouseButton, action: MouseAction) -> EventId {
        match (button, action) {
            (MouseButton::Left, MouseAction::Down) => EventId::LMouseDown,
            (MouseButton::Left, MouseAction::Up) => EventId::LMouseUp,
            (MouseButton::Left, MouseAction::Repeat) => EventId::LMouseRepeat,
            (MouseButton::Left, MouseAction::Drag) => EventId::LMouseDrag,
            (MouseButton::Right, MouseAction::Down) => EventId::RMouseDown,
            (MouseButton::Right, MouseAction::Up) => EventId::RMouseUp,
            (MouseButton::Right, MouseAction::Repeat) => EventId::RMouseRepeat,
            (MouseButton::Right, MouseAction::Drag) => EventId::RMouseDrag,
        }
    }

    pub fn mouse_button(self) -> Option<MouseButton> {
        match self {
            EventId::LMouseDown | EventId::LMouseUp | EventId::LMouseRepeat | EventId::LMouseDrag => {
                Some(MouseButton::Left)
            }
            EventId::RMouseDown | EventId::RMouseUp | EventId::RMouseRepeat | EventId::RMouseDrag => {
                Some(MouseButton::Right)
            }
            _ => None,
        }
    }

    pub fn mouse_action(self) -> Option<MouseAction> {
        match self {
            EventId::LMouseDown | EventId::RMouseDown => Some(MouseAction::Down),
            EventId::LMouseUp | EventId::RMouseUp => Some(MouseAction::Up),
            EventId::LMouseRepeat | EventId::RMouseRepeat => Some(MouseAction::Repeat),
            EventId::LMouseDrag | EventId::RMouseDrag => Some(MouseAction::Drag),
            _ => None,
        }
    }

    /// Whether this is any pointer event (including plain moves).
    pub fn is_pointer(self) -> bool {
        self.mouse_button().is_some() || self == EventId::MouseMove
    }

    /// Scrollbar notifications after which the bar position has changed.
    pub fn is_position_change(self) -> bool {
        matches!(
            self,
            EventId::BarPosChanged | EventId::BarPageUp | EventId::BarPageDown
        )
    }
}

/// Data attached to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Payload {
    #[default]
    None,
    /// Pointer position in logical space (physical before transformation).
    Point(Point),
    /// Control-specific value: key codes, indices, responses.
    Value(i32),
}

/// An event id with its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub payload: Payload,
}

impl Event {
    pub const fn new(id: EventId) -> Self {
        Self {
            id,
            payload: Payload::None,
        }
    }

    pub const fn with_point(id: EventId, point: Point) -> Self {
        Self {
            id,
            payload: Payload::Point(point),
        }
    }

    pub const fn with_value(id: EventId, value: i32) -> Self {
        Self {
            id,
            payload: Payload::Value(value),
        }
    }

    pub fn point(&self) -> Option<Point> {
        match self.payload {
            Payload::Point(p) => Some(p),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<i32> {
        match self.payload {
            Payload::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Same event with its point payload replaced, other payloads untouched.
    pub fn map_point(&self, f: impl FnOnce(Point) -> Point) -> Event {
        match self.payload {
            Payload::Point(p) => Event::with_point(self.id, f(p)),
            _ => *self,
        }
    }
}

/// Result of dispatching an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventResult {
    /// Neutral result: nothing hit, nothing consumed.
    #[default]
    Ignored,
    Handled,
}

/// Receiver of semantic notifications from a control.
///
/// Owners of controls implement this and react by reading the sender's
/// state (for example a scrollbar's bar position) through their own handle
/// to it.
pub trait EventListener {
    fn handle_event(&mut self, sender: ControlId, event: &Event) -> EventResult;
}

/// Listener that drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListener;

impl EventListener for NullListener {
    fn handle_event(&mut self, _sender: ControlId, _event: &Event) -> EventResult {
        EventResult::Ignored
    }
}

/// Maximum notifications a single part call may produce.
pub const RELAY_CAPACITY: usize = 4;

/// Listener that records notifications for later processing.
///
/// Composite controls hand a `Relay` to their parts as the listener, then
/// process what it collected once the part's call has returned. This keeps
/// the part and its owner from being borrowed at the same time.
#[derive(Debug, Default)]
pub struct Relay {
    events: Vec<(ControlId, Event), RELAY_CAPACITY>,
}

impl Relay {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take everything collected so far.
    pub fn take(&mut self) -> Vec<(ControlId, Event), RELAY_CAPACITY> {
        core::mem::take(&mut self.events)
    }
}

impl EventListener for Relay {
    fn handle_event(&mut self, sender: ControlId, event: &Event) -> EventResult {
        if self.events.push((sender, *event)).is_err() {
            log::warn!("Relay full, dropping {:?} from {:?}", event.id, sender);
            return EventResult::Ignored;
        }
        EventResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_ids_round_trip_through_button_and_action() {
        for button in [MouseButton::Left, MouseButton::Right] {
            for action in [
                MouseAction::Down,
                MouseAction::Up,
                MouseAction::Repeat,
                MouseAction::Drag,
            ] {
                let id = EventId::mouse(button, action);
                assert_eq!(id.mouse_button(), Some(button));
                assert_eq!(id.mouse_action(), Some(action));
            }
        }
        assert_eq!(EventId::BarScrollUp.mouse_button(), None);
        assert!(EventId::MouseMove.is_pointer());
        assert!(!EventId::KeyDown.is_pointer());
    }

    #[test]
    fn map_point_only_touches_points() {
        let e = Event::with_point(EventId::LMouseDown, Point::new(1, 2));
        let moved = e.map_point(|p| p.offset(10, 10));
        assert_eq!(moved.point(), Some(Point::new(11, 12)));

        let v = Event::with_value(EventId::KeyDown, 7);
        assert_eq!(v.map_point(|p| p.offset(1, 1)), v);
    }

    #[test]
    fn relay_collects_in_order_and_drops_overflow() {
        let mut relay = Relay::new();
        for i in 0..RELAY_CAPACITY as i32 + 2 {
            relay.handle_event(ControlId(i as u32), &Event::with_value(EventId::Selection, i));
        }
        let got = relay.take();
        assert_eq!(got.len(), RELAY_CAPACITY);
        assert_eq!(got[0].1.value(), Some(0));
        assert_eq!(got[RELAY_CAPACITY - 1].0, ControlId(RELAY_CAPACITY as u32 - 1));
        assert!(relay.is_empty());
    }
}
