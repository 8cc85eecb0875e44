//! Capture Module - per-widget capture state and the classification table
//!
//! Decides, for each raw event, which high-level messages it produces and how
//! the widget's capture state changes. The table is a pure function of
//! (state, raw event, in-widget) so it can be exercised without a handler.
//!
//! | Raw event         | In widget | Captured | Messages          | Captured after |
//! |-------------------|-----------|----------|-------------------|----------------|
//! | press, wheel up   | yes       | any      | ScrollUp          | unchanged      |
//! | press, wheel down | yes       | any      | ScrollDown        | unchanged      |
//! | press, other      | yes       | any      | Down              | yes            |
//! | press             | no        | any      | -                 | unchanged      |
//! | release           | yes       | yes      | Up, Click         | no             |
//! | release           | no        | yes      | Up                | no             |
//! | release           | any       | no       | -                 | unchanged      |
//! | drag              | any       | yes      | Drag              | unchanged      |
//! | drag              | any       | no       | -                 | unchanged      |
//! | move              | yes       | any      | Move              | unchanged      |
//! | move              | no        | any      | -                 | unchanged      |
//!
//! Wheel presses never capture: wheels produce no matching release.

use log::{debug, trace};

use super::mouse::MouseMsg;
use crate::types::{Buttons, EventType, RawPointerEvent};

// =============================================================================
// STATE
// =============================================================================

/// Capture state owned by a single widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureState {
    captured: bool,
    forced_capture: bool,
    /// Buttons reported by the press that acquired capture.
    last_buttons_down: Buttons,
}

impl CaptureState {
    /// Create an uncaptured state.
    pub fn new(forced_capture: bool) -> Self {
        Self {
            forced_capture,
            ..Self::default()
        }
    }

    /// Is the widget currently capturing the pointer?
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Does the widget see every event as inside its bounds?
    pub fn forced_capture(&self) -> bool {
        self.forced_capture
    }

    pub fn set_forced_capture(&mut self, forced: bool) {
        self.forced_capture = forced;
    }

    /// Buttons remembered from the last capture-acquiring press.
    pub fn last_buttons_down(&self) -> Buttons {
        self.last_buttons_down
    }

    /// Classify `raw` without committing anything.
    pub fn classify(&self, raw: &RawPointerEvent, in_widget: bool) -> Transition {
        let kind = raw.kind;

        if kind.contains(EventType::DOWN) {
            if !in_widget {
                return Transition::none(*self, raw.buttons);
            }
            if raw.buttons.contains(Buttons::WHEEL_UP) {
                return Transition::emit(&[MouseMsg::ScrollUp], *self, raw.buttons);
            }
            if raw.buttons.contains(Buttons::WHEEL_DOWN) {
                return Transition::emit(&[MouseMsg::ScrollDown], *self, raw.buttons);
            }
            let next = Self {
                captured: true,
                last_buttons_down: raw.buttons,
                ..*self
            };
            return Transition::emit(&[MouseMsg::Down], next, raw.buttons);
        }

        if kind.contains(EventType::UP) {
            if !self.captured {
                return Transition::none(*self, raw.buttons);
            }
            // xterm reports the state after the release (no buttons), GPM
            // reports the released button. Make the former look like the latter.
            let buttons = if raw.buttons.is_empty() {
                self.last_buttons_down
            } else {
                raw.buttons
            };
            let next = Self {
                captured: false,
                ..*self
            };
            let messages: &'static [MouseMsg] = if in_widget {
                &[MouseMsg::Up, MouseMsg::Click]
            } else {
                &[MouseMsg::Up]
            };
            return Transition::emit(messages, next, buttons);
        }

        if kind.contains(EventType::DRAG) {
            if self.captured {
                return Transition::emit(&[MouseMsg::Drag], *self, raw.buttons);
            }
            return Transition::none(*self, raw.buttons);
        }

        if kind.contains(EventType::MOVE) && in_widget {
            return Transition::emit(&[MouseMsg::Move], *self, raw.buttons);
        }

        Transition::none(*self, raw.buttons)
    }

    /// Classify `raw` and commit the resulting state.
    pub fn apply(&mut self, raw: &RawPointerEvent, in_widget: bool) -> Transition {
        let transition = self.classify(raw, in_widget);

        if transition.buttons != raw.buttons {
            debug!(
                "release reported {:?}, substituted {:?} from capturing press",
                raw.buttons, transition.buttons
            );
        }
        trace!(
            "{:?} {:?} at ({}, {}) in_widget={} captured {} -> {}: {:?}",
            raw.kind,
            raw.buttons,
            raw.x,
            raw.y,
            in_widget,
            self.captured,
            transition.next.captured,
            transition.messages
        );

        *self = transition.next;
        transition
    }
}

// =============================================================================
// TRANSITION
// =============================================================================

/// Outcome of classifying one raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Messages to dispatch, in order. At most two (Up then Click).
    pub messages: &'static [MouseMsg],
    /// Button mask to report, after release reconciliation.
    pub buttons: Buttons,
    /// State after the event.
    pub next: CaptureState,
}

impl Transition {
    fn none(next: CaptureState, buttons: Buttons) -> Self {
        Self::emit(&[], next, buttons)
    }

    fn emit(messages: &'static [MouseMsg], next: CaptureState, buttons: Buttons) -> Self {
        Self {
            messages,
            buttons,
            next,
        }
    }

    /// True if the event produced no message.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
