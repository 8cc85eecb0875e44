//! Mouse Module - high-level mouse messages and the widget binding
//!
//! Turns raw pointer events into the small message vocabulary widgets deal
//! with (`Down`, `Up`, `Drag`, `Move`, `Click`, `ScrollUp`, `ScrollDown`).
//! Does NOT own stdin or the widget tree: the input loop hands each raw
//! event to a bound widget and acts on the returned [`MouseOutcome`].
//!
//! # API
//!
//! - `bind(geometry, options, handler)` - Attach the classifier to a widget
//! - `MouseWidget::translate(raw)` - Classify and dispatch one raw event
//! - `route(targets, raw)` - Offer a raw event to targets until one takes it
//!
//! # Example
//!
//! ```
//! use spark_tui_pointer::state::{bind, MouseMsg, MouseOptions, MouseOutcome, MouseResult};
//! use spark_tui_pointer::{Buttons, RawPointerEvent, WidgetGeometry};
//!
//! let mut button = bind(
//!     WidgetGeometry::new(10, 5, 8, 1),
//!     MouseOptions::default(),
//!     |msg: MouseMsg, event: &spark_tui_pointer::state::MouseEvent| {
//!         if msg == MouseMsg::Click {
//!             println!("Clicked at ({}, {})", event.x, event.y);
//!         }
//!         MouseResult::default()
//!     },
//! );
//!
//! let outcome = button.translate(&RawPointerEvent::press(Buttons::LEFT, 12, 6));
//! assert_eq!(outcome, MouseOutcome::Normal);
//! assert!(button.is_captured());
//! ```

use std::fmt;

use log::trace;

use super::capture::CaptureState;
use super::normalize::{in_widget, normalize};
use crate::types::{Buttons, EventType, RawPointerEvent, WidgetGeometry};

// =============================================================================
// TYPES
// =============================================================================

/// High-level mouse message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseMsg {
    Down,
    Up,
    Drag,
    Move,
    Click,
    ScrollUp,
    ScrollDown,
}

/// Widget-local mouse event handed to a [`MouseHandler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Message being delivered
    pub msg: MouseMsg,
    /// Column relative to the widget (0-indexed)
    pub x: i32,
    /// Row relative to the widget (0-indexed)
    pub y: i32,
    /// Click multiplicity bits (`SINGLE`, `DOUBLE`, `TRIPLE`)
    pub count: EventType,
    /// Buttons involved, reconciled on release
    pub buttons: Buttons,
}

impl MouseEvent {
    /// Is this part of a double click?
    pub fn is_double(&self) -> bool {
        self.count.contains(EventType::DOUBLE)
    }

    /// Is this part of a triple click?
    pub fn is_triple(&self) -> bool {
        self.count.contains(EventType::TRIPLE)
    }
}

/// What a handler wants done with the message it was given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseResult {
    /// Report the raw event as unhandled so others may take it.
    pub abort: bool,
    /// Ask the input loop to keep redelivering while the button is held.
    pub repeat: bool,
}

impl MouseResult {
    /// Handled, nothing special.
    pub fn handled() -> Self {
        Self::default()
    }

    /// Decline the event.
    pub fn abort() -> Self {
        Self {
            abort: true,
            ..Self::default()
        }
    }

    /// Handled, with auto-repeat requested.
    pub fn repeat() -> Self {
        Self {
            repeat: true,
            ..Self::default()
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            abort: self.abort || other.abort,
            repeat: self.repeat || other.repeat,
        }
    }
}

/// Classification result returned to the input loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseOutcome {
    /// No message produced, or a handler aborted.
    Unhandled,
    /// Handled.
    Normal,
    /// Handled, and the handler asked for auto-repeat.
    Repeat,
}

impl MouseOutcome {
    /// Was the event consumed?
    pub fn is_handled(self) -> bool {
        self != Self::Unhandled
    }
}

// =============================================================================
// HANDLER TYPES
// =============================================================================

/// Receives high-level mouse messages for one widget.
///
/// Implemented for any `FnMut(MouseMsg, &MouseEvent) -> MouseResult`.
pub trait MouseHandler {
    fn on_mouse(&mut self, msg: MouseMsg, event: &MouseEvent) -> MouseResult;
}

impl<F> MouseHandler for F
where
    F: FnMut(MouseMsg, &MouseEvent) -> MouseResult,
{
    fn on_mouse(&mut self, msg: MouseMsg, event: &MouseEvent) -> MouseResult {
        self(msg, event)
    }
}

/// Anything the input loop can feed raw pointer events to.
pub trait PointerTarget {
    fn on_raw(&mut self, raw: &RawPointerEvent) -> MouseOutcome;
}

/// Per-widget options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseOptions {
    /// Treat every event as inside the widget. The handler then declines
    /// what it does not want by returning [`MouseResult::abort`].
    pub forced_capture: bool,
}

// =============================================================================
// WIDGET BINDING
// =============================================================================

/// A widget bound to the classifier.
pub struct MouseWidget<H> {
    geometry: WidgetGeometry,
    capture: CaptureState,
    handler: H,
}

/// Install the classifier on a widget.
pub fn bind<H: MouseHandler>(
    geometry: WidgetGeometry,
    options: MouseOptions,
    handler: H,
) -> MouseWidget<H> {
    MouseWidget {
        geometry,
        capture: CaptureState::new(options.forced_capture),
        handler,
    }
}

impl<H> MouseWidget<H> {
    pub fn geometry(&self) -> WidgetGeometry {
        self.geometry
    }

    /// Move or resize the widget (after layout).
    pub fn set_geometry(&mut self, geometry: WidgetGeometry) {
        self.geometry = geometry;
    }

    pub fn is_captured(&self) -> bool {
        self.capture.is_captured()
    }

    pub fn forced_capture(&self) -> bool {
        self.capture.forced_capture()
    }

    pub fn set_forced_capture(&mut self, forced: bool) {
        self.capture.set_forced_capture(forced);
    }

    /// Current capture state.
    pub fn capture(&self) -> &CaptureState {
        &self.capture
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }
}

impl<H: MouseHandler> MouseWidget<H> {
    /// Classify one raw event and dispatch the resulting messages.
    pub fn translate(&mut self, raw: &RawPointerEvent) -> MouseOutcome {
        let inside = in_widget(&self.geometry, raw, self.capture.forced_capture());
        let transition = self.capture.apply(raw, inside);

        let Some((&first, rest)) = transition.messages.split_first() else {
            return MouseOutcome::Unhandled;
        };

        // Up and Click share one event; only the message kind changes.
        let reconciled = raw.with_buttons(transition.buttons);
        let mut event = normalize(first, &reconciled, &self.geometry);
        let mut result = self.handler.on_mouse(first, &event);
        for &msg in rest {
            event.msg = msg;
            result = result.merge(self.handler.on_mouse(msg, &event));
        }

        let outcome = if result.abort {
            MouseOutcome::Unhandled
        } else if result.repeat {
            MouseOutcome::Repeat
        } else {
            MouseOutcome::Normal
        };
        trace!("{:?} -> {:?}", transition.messages, outcome);
        outcome
    }
}

impl<H: MouseHandler> PointerTarget for MouseWidget<H> {
    fn on_raw(&mut self, raw: &RawPointerEvent) -> MouseOutcome {
        self.translate(raw)
    }
}

impl<H> fmt::Debug for MouseWidget<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MouseWidget")
            .field("geometry", &self.geometry)
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// ROUTING
// =============================================================================

/// Offer `raw` to each target in order until one handles it.
///
/// Returns the first handled outcome, or `Unhandled` if every target
/// declined. Targets after the one that handled it are not consulted.
pub fn route(targets: &mut [&mut dyn PointerTarget], raw: &RawPointerEvent) -> MouseOutcome {
    for target in targets.iter_mut() {
        let outcome = target.on_raw(raw);
        if outcome.is_handled() {
            return outcome;
        }
    }
    MouseOutcome::Unhandled
}

// =============================================================================
// TESTS
// =============================================================================
