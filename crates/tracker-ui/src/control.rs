//! Core control traits and the type-erased widget wrapper.
//!
//! A control owns its geometry and flags in a [`ControlBase`], paints itself
//! onto any `DrawTarget<Color = Rgb888>` and handles events passed down by
//! its owner. Notifications travel back up through the [`Context`] the owner
//! hands in, which borrows the owner's listener for the length of the call.
//! Controls never store references to their screen or listener.
//!
//! Repaint requests are expressed with a dirty flag on the control (as with
//! every drawable in this crate); the [`Screen`](crate::screen::Screen)
//! collects dirty controls into its [`RepaintQueue`] before flushing.
//!
//! [`Widget`] stores the concrete control types in one enum so screens and
//! dialogs can keep heterogeneous children without `dyn`.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::DrawTarget;
use heapless::Vec;

use crate::dialog::{GroupSelectionDialog, MessageBox, QuickChooseDialog};
use crate::event::{Event, EventListener, EventResult, RELAY_CAPACITY, Relay};
use crate::geometry::{Point, Rect, Size};
use crate::widgets::{Button, ListBox, RadioGroup, Scrollbar, StaticText};

/// Identifier a control reports as the sender of its notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ControlId(pub u32);

/// State shared by every control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlBase {
    pub id: ControlId,
    pub location: Point,
    pub size: Size,
    pub visible: bool,
    pub enabled: bool,
    pub dirty: bool,
}

impl ControlBase {
    pub fn new(id: ControlId, location: Point, size: Size) -> Self {
        Self {
            id,
            location,
            size,
            visible: true,
            enabled: true,
            dirty: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_location_size(self.location, self.size)
    }
}

/// Borrowed dispatch environment handed to a control.
pub struct Context<'a> {
    listener: &'a mut dyn EventListener,
}

impl<'a> Context<'a> {
    pub fn new(listener: &'a mut dyn EventListener) -> Self {
        Self { listener }
    }

    /// Send a notification to the owner.
    pub fn notify(&mut self, sender: ControlId, event: &Event) -> EventResult {
        self.listener.handle_event(sender, event)
    }
}

/// Dispatch `event` to a part of a composite and return what the part
/// notified, for the composite to process once the part is released.
pub fn dispatch_part<C: Control>(
    part: &mut C,
    event: &Event,
) -> Vec<(ControlId, Event), RELAY_CAPACITY> {
    let mut relay = Relay::new();
    part.dispatch(event, &mut Context::new(&mut relay));
    relay.take()
}

/// Trait implemented by every control.
pub trait Control {
    fn base(&self) -> &ControlBase;

    fn base_mut(&mut self) -> &mut ControlBase;

    fn id(&self) -> ControlId {
        self.base().id
    }

    fn location(&self) -> Point {
        self.base().location
    }

    fn size(&self) -> Size {
        self.base().size
    }

    fn bounds(&self) -> Rect {
        self.base().bounds()
    }

    fn set_location(&mut self, location: Point) {
        let base = self.base_mut();
        if base.location != location {
            base.location = location;
            base.dirty = true;
        }
    }

    fn set_size(&mut self, size: Size) {
        let base = self.base_mut();
        if base.size != size {
            base.size = size;
            base.dirty = true;
        }
    }

    fn is_visible(&self) -> bool {
        self.base().visible
    }

    fn set_visible(&mut self, visible: bool) {
        let base = self.base_mut();
        if base.visible != visible {
            base.visible = visible;
            base.dirty = true;
        }
    }

    fn is_enabled(&self) -> bool {
        self.base().enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        let base = self.base_mut();
        if base.enabled != enabled {
            base.enabled = enabled;
            base.dirty = true;
        }
    }

    /// Whether the control should receive input at all.
    fn is_interactive(&self) -> bool {
        self.is_visible() && self.is_enabled()
    }

    /// Half-open hit test against the control's bounds.
    fn hit(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    fn is_dirty(&self) -> bool {
        self.base().dirty
    }

    fn mark_dirty(&mut self) {
        self.base_mut().dirty = true;
    }

    fn mark_clean(&mut self) {
        self.base_mut().dirty = false;
    }

    /// Handle an event and report the owner's answer (or
    /// [`EventResult::Ignored`]).
    fn dispatch(&mut self, event: &Event, cx: &mut Context<'_>) -> EventResult;

    /// Draw the control.
    fn paint<D: DrawTarget<Color = Rgb888>>(&self, g: &mut D) -> Result<(), D::Error>;
}

// ---------------------------------------------------------------------------
// Repaint queue
// ---------------------------------------------------------------------------

/// Maximum separate rectangles kept before everything is merged.
pub const REPAINT_CAPACITY: usize = 8;

/// Pending screen regions to repaint.
///
/// Overlapping requests merge into their union; when the queue is full every
/// region collapses into one bounding box.
#[derive(Debug, Default, Clone)]
pub struct RepaintQueue {
    rects: Vec<Rect, REPAINT_CAPACITY>,
}

impl RepaintQueue {
    pub fn new() -> Self {
        Self { rects: Vec::new() }
    }

    pub fn push(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }

        if let Some(existing) = self.rects.iter_mut().find(|r| r.intersect(&rect)) {
            *existing = existing.union(&rect);
            return;
        }

        if let Err(rect) = self.rects.push(rect) {
            let merged = self.rects.iter().fold(rect, |acc, r| acc.union(r));
            self.rects.clear();
            // Capacity is at least one, so this cannot fail.
            let _ = self.rects.push(merged);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn take(&mut self) -> Vec<Rect, REPAINT_CAPACITY> {
        core::mem::take(&mut self.rects)
    }
}

// ---------------------------------------------------------------------------
// Widget wrapper
// ---------------------------------------------------------------------------

/// Concrete control stored by screens and dialogs.
pub enum Widget {
    Button(Button),
    Scrollbar(Scrollbar),
    RadioGroup(RadioGroup),
    ListBox(ListBox),
    StaticText(StaticText),
    MessageBox(MessageBox),
    GroupSelection(GroupSelectionDialog),
    QuickChoose(QuickChooseDialog),
}

macro_rules! each_widget {
    ($value:expr, $w:ident => $body:expr) => {
        match $value {
            Widget::Button($w) => $body,
            Widget::Scrollbar($w) => $body,
            Widget::RadioGroup($w) => $body,
            Widget::ListBox($w) => $body,
            Widget::StaticText($w) => $body,
            Widget::MessageBox($w) => $body,
            Widget::GroupSelection($w) => $body,
            Widget::QuickChoose($w) => $body,
        }
    };
}

impl Control for Widget {
    fn base(&self) -> &ControlBase {
        each_widget!(self, w => w.base())
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        each_widget!(self, w => w.base_mut())
    }

    fn set_location(&mut self, location: Point) {
        each_widget!(self, w => w.set_location(location))
    }

    fn set_size(&mut self, size: Size) {
        each_widget!(self, w => w.set_size(size))
    }

    fn hit(&self, point: Point) -> bool {
        each_widget!(self, w => w.hit(point))
    }

    fn is_dirty(&self) -> bool {
        each_widget!(self, w => w.is_dirty())
    }

    fn mark_clean(&mut self) {
        each_widget!(self, w => w.mark_clean())
    }

    fn dispatch(&mut self, event: &Event, cx: &mut Context<'_>) -> EventResult {
        each_widget!(self, w => w.dispatch(event, cx))
    }

    fn paint<D: DrawTarget<Color = Rgb888>>(&self, g: &mut D) -> Result<(), D::Error> {
        each_widget!(self, w => w.paint(g))
    }
}

/// Typed access to the control inside a [`Widget`].
pub trait WidgetKind: Sized {
    fn from_widget(widget: &Widget) -> Option<&Self>;
    fn from_widget_mut(widget: &mut Widget) -> Option<&mut Self>;
}

macro_rules! widget_kind {
    ($variant:ident, $ty:ty) => {
        impl WidgetKind for $ty {
            fn from_widget(widget: &Widget) -> Option<&Self> {
                match widget {
                    Widget::$variant(w) => Some(w),
                    _ => None,
                }
            }

            fn from_widget_mut(widget: &mut Widget) -> Option<&mut Self> {
                match widget {
                    Widget::$variant(w) => Some(w),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Widget {
            fn from(w: $ty) -> Self {
                Widget::$variant(w)
            }
        }
    };
}

widget_kind!(Button, Button);
widget_kind!(Scrollbar, Scrollbar);
widget_kind!(RadioGroup, RadioGroup);
widget_kind!(ListBox, ListBox);
widget_kind!(StaticText, StaticText);
widget_kind!(MessageBox, MessageBox);
widget_kind!(GroupSelection, GroupSelectionDialog);
widget_kind!(QuickChoose, QuickChooseDialog);

impl Widget {
    pub fn downcast_ref<T: WidgetKind>(&self) -> Option<&T> {
        T::from_widget(self)
    }

    pub fn downcast_mut<T: WidgetKind>(&mut self) -> Option<&mut T> {
        T::from_widget_mut(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repaint_queue_merges_overlaps() {
        let mut q = RepaintQueue::new();
        q.push(Rect::new(0, 0, 10, 10));
        q.push(Rect::new(5, 5, 15, 15));
        q.push(Rect::new(100, 100, 110, 110));
        q.push(Rect::new(3, 3, 3, 8));
        let rects = q.take();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0], Rect::new(0, 0, 15, 15));
        assert!(q.is_empty());
    }

    #[test]
    fn repaint_queue_collapses_when_full() {
        let mut q = RepaintQueue::new();
        for i in 0..REPAINT_CAPACITY as i32 + 1 {
            q.push(Rect::new(i * 20, 0, i * 20 + 5, 5));
        }
        let rects = q.take();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0], Rect::new(0, 0, REPAINT_CAPACITY as i32 * 20 + 5, 5));
    }

    #[test]
    fn widget_downcasts_to_its_variant_only() {
        let mut w: Widget = StaticText::new(ControlId(4), Point::new(1, 1), "hi").into();
        assert!(w.downcast_ref::<StaticText>().is_some());
        assert!(w.downcast_ref::<Button>().is_none());
        if let Some(text) = w.downcast_mut::<StaticText>() {
            text.set_text("changed");
        }
        assert_eq!(w.downcast_ref::<StaticText>().map(|t| t.text().len()), Some(7));
        assert_eq!(w.id(), ControlId(4));
    }
}
