//! Mouse capture shared by every composite control.
//!
//! Once a button goes down on a part, that part receives all following
//! pointer events until the capture ends, wherever the pointer goes. Left and
//! right ownership are tracked independently: releasing one button while the
//! other still holds the capture keeps routing to the same part.
//!
//! Every transition is a plain set or clear, so a reentrant dispatch that
//! repeats a transition leaves the state unchanged.

use crate::event::MouseButton;

/// Observable capture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    CapturedByLeft,
    CapturedByRight,
}

/// What to do with a button release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release<T> {
    /// Nothing was captured.
    Idle,
    /// The other button still owns the capture: forward, keep capturing.
    Held(T),
    /// Forward to the target; the capture has been cleared.
    Ended(T),
}

/// Capture tracker keyed by whatever identifies a part (`T`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture<T> {
    caught: Option<T>,
    by_left: bool,
    by_right: bool,
}

impl<T> Default for Capture<T> {
    fn default() -> Self {
        Self {
            caught: None,
            by_left: false,
            by_right: false,
        }
    }
}

impl<T: Copy + PartialEq> Capture<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `target` for `button`.
    pub fn catch(&mut self, target: T, button: MouseButton) {
        self.caught = Some(target);
        self.set_owner(button, true);
    }

    /// Capture `target` without marking a button as owner.
    ///
    /// Used when a repeat tick starts a capture: the button went down
    /// elsewhere and only its release should end the capture.
    pub fn catch_silently(&mut self, target: T) {
        self.caught = Some(target);
    }

    /// Handle a release of `button`.
    pub fn release(&mut self, button: MouseButton) -> Release<T> {
        self.set_owner(button, false);
        let Some(target) = self.caught else {
            return Release::Idle;
        };
        if self.owns(button.other()) {
            return Release::Held(target);
        }
        self.caught = None;
        Release::Ended(target)
    }

    pub fn caught(&self) -> Option<T> {
        self.caught
    }

    pub fn is_caught(&self, target: T) -> bool {
        self.caught == Some(target)
    }

    pub fn owns(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.by_left,
            MouseButton::Right => self.by_right,
        }
    }

    pub fn state(&self) -> CaptureState {
        match (self.caught.is_some(), self.by_left, self.by_right) {
            (false, _, _) => CaptureState::Idle,
            (true, true, _) => CaptureState::CapturedByLeft,
            (true, false, true) => CaptureState::CapturedByRight,
            // Started by a repeat tick: attribute to the left button.
            (true, false, false) => CaptureState::CapturedByLeft,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn set_owner(&mut self, button: MouseButton, owns: bool) {
        match button {
            MouseButton::Left => self.by_left = owns,
            MouseButton::Right => self.by_right = owns,
        }
    }
}
