//! Hardware-independent widget toolkit core for the tracker UI
//!
//! This crate contains the platform-agnostic part of the tracker's GUI:
//! geometry and color values, a byte-string value with path helpers, the
//! control hierarchy with capture-based event dispatch (the scrollbar being
//! the canonical composite control), the display-device boundary with its
//! orientation transform, a small dialog layer and the key-mapping
//! configuration.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on embedded
//! targets as well as desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod capture;
pub mod color;
pub mod config;
pub mod control;
pub mod dialog;
pub mod display;
pub mod event;
pub mod geometry;
pub mod screen;
pub mod string;
pub mod widgets;

#[cfg(test)]
mod testing;

pub use capture::{Capture, CaptureState, Release};
pub use color::Color;
pub use config::{ButtonMapping, ConfigError, KeyMapConfig};
pub use control::{Context, Control, ControlBase, ControlId, RepaintQueue, Widget};
pub use dialog::{GroupSelectionDialog, MessageBox, QuickChooseDialog};
pub use display::{
    DisplayDevice, DisplayError, FrameBuffer, HeadlessDisplay, MouseCursor, Orientation,
};
pub use event::{Event, EventId, EventListener, EventResult, MouseAction, MouseButton, Payload};
pub use geometry::{Point, Rect, Size};
pub use screen::Screen;
pub use string::{Descriptor, Edit, UiString};
pub use widgets::{
    ArrowDirection, Button, Font, Glyph, ListBox, Part, RadioGroup, Scrollbar, StaticText,
};
