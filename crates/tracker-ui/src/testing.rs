//! Helpers shared by the unit tests.

use alloc::vec::Vec;

use crate::control::ControlId;
use crate::event::{Event, EventId, EventListener, EventResult};

/// Listener that records every notification it receives.
#[derive(Default)]
pub(crate) struct Recorder {
    pub events: Vec<(ControlId, Event)>,
}

impl Recorder {
    pub fn ids(&self) -> Vec<EventId> {
        self.events.iter().map(|(_, e)| e.id).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventListener for Recorder {
    fn handle_event(&mut self, sender: ControlId, event: &Event) -> EventResult {
        self.events.push((sender, *event));
        EventResult::Handled
    }
}
