//! crossterm bridge
//!
//! Converts crossterm mouse events into [`RawPointerEvent`]s so a crossterm
//! based input loop can feed bound widgets directly.

use crossterm::event::{
    MouseButton as CrosstermMouseButton,
    MouseEvent as CrosstermMouseEvent,
    MouseEventKind,
};

use crate::types::{Buttons, EventType, RawPointerEvent};

/// Convert a crossterm mouse event.
///
/// crossterm columns/rows are 0-indexed; raw events are 1-based. Horizontal
/// scrolling has no raw counterpart and yields `None`.
pub fn raw_from_crossterm(event: &CrosstermMouseEvent) -> Option<RawPointerEvent> {
    let x = i32::from(event.column) + 1;
    let y = i32::from(event.row) + 1;

    let (kind, buttons) = match event.kind {
        MouseEventKind::Down(btn) => (EventType::DOWN | EventType::SINGLE, convert_mouse_button(btn)),
        MouseEventKind::Up(btn) => (EventType::UP | EventType::SINGLE, convert_mouse_button(btn)),
        MouseEventKind::Drag(btn) => (EventType::DRAG, convert_mouse_button(btn)),
        MouseEventKind::Moved => (EventType::MOVE, Buttons::empty()),
        MouseEventKind::ScrollUp => (EventType::DOWN, Buttons::WHEEL_UP),
        MouseEventKind::ScrollDown => (EventType::DOWN, Buttons::WHEEL_DOWN),
        MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => return None,
    };

    Some(RawPointerEvent::new(kind, buttons, x, y))
}

/// Convert crossterm MouseButton to our button mask
fn convert_mouse_button(btn: CrosstermMouseButton) -> Buttons {
    match btn {
        CrosstermMouseButton::Left => Buttons::LEFT,
        CrosstermMouseButton::Right => Buttons::RIGHT,
        CrosstermMouseButton::Middle => Buttons::MIDDLE,
    }
}
