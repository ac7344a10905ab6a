//! Top-level owner of controls
//!
//! The screen routes input to its controls with the same capture rules the
//! composites use internally, keeps an optional modal widget in front of
//! everything else, and repaints what changed into a [`DisplayDevice`].

use alloc::vec::Vec;

use embedded_graphics::prelude::DrawTargetExt;
use embedded_graphics::primitives::Rectangle;
use log::{debug, trace};

use crate::capture::{Capture, Release};
use crate::color::{self, Color};
use crate::control::{Context, Control, ControlId, RepaintQueue, Widget, WidgetKind};
use crate::display::{DisplayDevice, DisplayError};
use crate::event::{Event, EventId, EventListener, EventResult, MouseAction};
use crate::geometry::{Rect, Size};
use crate::widgets::paint;

pub struct Screen {
    size: Size,
    background: Color,
    controls: Vec<Widget>,
    capture: Capture<usize>,
    modal: Option<Widget>,
    repaint: RepaintQueue,
}

impl Screen {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            background: color::DESKTOP,
            controls: Vec::new(),
            capture: Capture::new(),
            modal: None,
            repaint: RepaintQueue::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_location_size(Default::default(), self.size)
    }

    /// Add a control on top of the existing ones.
    pub fn add_control(&mut self, control: impl Into<Widget>) {
        let control = control.into();
        self.repaint.push(control.bounds());
        self.controls.push(control);
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

    pub fn controls(&self) -> &[Widget] {
        &self.controls
    }

    pub fn remove_control(&mut self, id: ControlId) -> Option<Widget> {
        let index = self.controls.iter().position(|c| c.id() == id)?;
        // Indices shift, so a capture held by this or a later control is dropped.
        if self.capture.caught().is_some_and(|caught| caught >= index) {
            self.capture.clear();
        }
        let control = self.controls.remove(index);
        self.repaint.push(control.bounds());
        Some(control)
    }

    /// Show `widget` in front of everything; it receives all input until
    /// closed.
    pub fn show_modal(&mut self, widget: impl Into<Widget>) {
        let widget = widget.into();
        debug!("Showing modal {:?}", widget.id());
        self.capture.clear();
        self.repaint.push(widget.bounds());
        self.modal = Some(widget);
    }

    pub fn close_modal(&mut self) -> Option<Widget> {
        let widget = self.modal.take()?;
        debug!("Closing modal {:?}", widget.id());
        self.repaint.push(widget.bounds());
        Some(widget)
    }

    pub fn modal(&self) -> Option<&Widget> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut Widget> {
        self.modal.as_mut()
    }

    pub fn has_modal(&self) -> bool {
        self.modal.is_some()
    }

    /// Route an event in logical coordinates.
    pub fn dispatch(&mut self, event: &Event, listener: &mut dyn EventListener) -> EventResult {
        let mut cx = Context::new(listener);

        if let Some(modal) = self.modal.as_mut() {
            return modal.dispatch(event, &mut cx);
        }
        if event.id == EventId::KeyDown {
            return EventResult::Ignored;
        }

        let (Some(button), Some(action)) = (event.id.mouse_button(), event.id.mouse_action())
        else {
            return self.dispatch_captured(event, &mut cx);
        };

        match action {
            MouseAction::Down => {
                let Some(p) = event.point() else {
                    return EventResult::Ignored;
                };
                let Some(index) = self
                    .controls
                    .iter()
                    .rposition(|c| c.is_interactive() && c.hit(p))
                else {
                    return EventResult::Ignored;
                };
                trace!("{:?} caught {:?}", button, self.controls[index].id());
                self.capture.catch(index, button);
                self.controls[index].dispatch(event, &mut cx)
            }
            MouseAction::Up => match self.capture.release(button) {
                Release::Idle => EventResult::Ignored,
                Release::Held(index) | Release::Ended(index) => match self.controls.get_mut(index) {
                    Some(control) => control.dispatch(event, &mut cx),
                    None => EventResult::Ignored,
                },
            },
            MouseAction::Repeat | MouseAction::Drag => self.dispatch_captured(event, &mut cx),
        }
    }

    /// Route an event whose point is in physical device coordinates.
    pub fn dispatch_physical<D>(
        &mut self,
        device: &D,
        event: &Event,
        listener: &mut dyn EventListener,
    ) -> EventResult
    where
        D: DisplayDevice + ?Sized,
    {
        let logical = event.map_point(|p| device.transform_inverse(p));
        self.dispatch(&logical, listener)
    }

    fn dispatch_captured(&mut self, event: &Event, cx: &mut Context<'_>) -> EventResult {
        match self.capture.caught().and_then(|i| self.controls.get_mut(i)) {
            Some(control) => control.dispatch(event, cx),
            None => EventResult::Ignored,
        }
    }

    /// Queue the control's area for the next [`flush`](Self::flush).
    pub fn paint_control(&mut self, id: ControlId) {
        if let Some(bounds) = self.control(id).map(|c| c.bounds()) {
            self.repaint.push(bounds);
        }
    }

    /// Queue an arbitrary area for the next flush.
    pub fn invalidate(&mut self, rect: Rect) {
        self.repaint.push(rect);
    }

    /// Queue every control that changed since it was last painted.
    fn collect_dirty(&mut self) {
        for control in self.controls.iter_mut().chain(self.modal.as_mut()) {
            if control.is_dirty() {
                self.repaint.push(control.bounds());
                control.mark_clean();
            }
        }
    }

    /// Repaint everything and push the whole screen.
    pub fn paint_all<D>(&mut self, device: &mut D) -> Result<(), DisplayError>
    where
        D: DisplayDevice + ?Sized,
    {
        self.repaint.take();
        for control in self.controls.iter_mut().chain(self.modal.as_mut()) {
            control.mark_clean();
        }
        let all = self.bounds();
        self.paint_rect(device, all);
        device.close();
        device.update()
    }

    /// Repaint the queued and dirty areas and push each of them.
    pub fn flush<D>(&mut self, device: &mut D) -> Result<(), DisplayError>
    where
        D: DisplayDevice + ?Sized,
    {
        self.collect_dirty();
        if self.repaint.is_empty() {
            return Ok(());
        }
        let rects = self.repaint.take();
        debug!("Flushing {} region(s)", rects.len());
        for rect in rects.iter() {
            self.paint_rect(device, *rect);
        }
        device.close();
        for rect in rects.iter() {
            device.update_rect(*rect)?;
        }
        Ok(())
    }

    fn paint_rect<D>(&self, device: &mut D, rect: Rect)
    where
        D: DisplayDevice + ?Sized,
    {
        let Some(rect) = rect.clip(&self.bounds()) else {
            return;
        };
        let fb = device.open();
        let mut g = fb.clipped(&Rectangle::from(rect));
        // Drawing into the frame buffer cannot fail.
        let _ = paint::fill(&mut g, rect, self.background);
        for control in self.controls.iter().chain(self.modal.as_ref()) {
            if control.is_visible() && control.bounds().intersect(&rect) {
                let _ = control.paint(&mut g);
            }
        }
    }
}
