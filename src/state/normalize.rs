//! Geometry normalization - raw screen events to widget-local events.

use super::mouse::{MouseEvent, MouseMsg};
use crate::types::{RawPointerEvent, WidgetGeometry};

/// Is the raw event "in widget"?
///
/// A forced-capture widget sees every event as inside its bounds and
/// decides for itself (via `abort`) which ones to pass on.
pub fn in_widget(geometry: &WidgetGeometry, raw: &RawPointerEvent, forced_capture: bool) -> bool {
    forced_capture || geometry.contains(raw.x, raw.y)
}

/// Build the widget-local event for `msg`.
///
/// Coordinates drop the origin and the 1-based offset, so the widget's
/// top-left cell is `(0, 0)`. Positions outside the widget come out
/// negative or past its size; that is expected for Up and Drag. Distances
/// beyond the `i32` range saturate.
pub fn normalize(msg: MouseMsg, raw: &RawPointerEvent, geometry: &WidgetGeometry) -> MouseEvent {
    MouseEvent {
        msg,
        x: local(raw.x, geometry.x),
        y: local(raw.y, geometry.y),
        count: raw.kind.multiplicity(),
        buttons: raw.buttons,
    }
}

/// `screen - origin - 1`, clamped to the `i32` range.
fn local(screen: i32, origin: i32) -> i32 {
    let offset = i64::from(screen) - i64::from(origin) - 1;
    offset.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Buttons, EventType};

    #[test]
    fn test_local_coordinates() {
        let geom = WidgetGeometry::new(10, 5, 20, 10);
        let raw = RawPointerEvent::press(Buttons::LEFT, 15, 10);

        let event = normalize(MouseMsg::Down, &raw, &geom);
        assert_eq!(event.msg, MouseMsg::Down);
        assert_eq!((event.x, event.y), (4, 4));
        assert_eq!(event.buttons, Buttons::LEFT);
        assert_eq!(event.count, EventType::SINGLE);
    }

    #[test]
    fn test_top_left_cell_is_origin() {
        let geom = WidgetGeometry::new(0, 0, 80, 24);
        let event = normalize(MouseMsg::Move, &RawPointerEvent::moved(1, 1), &geom);
        assert_eq!((event.x, event.y), (0, 0));
    }

    #[test]
    fn test_outside_positions_go_negative() {
        let geom = WidgetGeometry::new(10, 5, 4, 4);
        let raw = RawPointerEvent::release(Buttons::LEFT, 2, 3);
        let event = normalize(MouseMsg::Up, &raw, &geom);
        assert_eq!((event.x, event.y), (-9, -3));
    }

    #[test]
    fn test_extreme_positions_saturate() {
        let geom = WidgetGeometry::new(5, 5, 4, 4);
        let event = normalize(MouseMsg::Move, &RawPointerEvent::moved(i32::MIN, 1), &geom);
        assert_eq!((event.x, event.y), (i32::MIN, -5));

        let geom = WidgetGeometry::new(-10, i32::MIN, 4, 4);
        let event = normalize(MouseMsg::Move, &RawPointerEvent::moved(i32::MAX, i32::MAX), &geom);
        assert_eq!((event.x, event.y), (i32::MAX, i32::MAX));

        // In range values stay exact even when the operands are extreme.
        let geom = WidgetGeometry::new(i32::MAX - 5, i32::MIN, 10, 1);
        let event = normalize(MouseMsg::Move, &RawPointerEvent::moved(i32::MAX - 2, i32::MIN + 1), &geom);
        assert_eq!((event.x, event.y), (2, 0));
    }

    #[test]
    fn test_only_multiplicity_bits_copied() {
        let geom = WidgetGeometry::new(0, 0, 10, 10);
        let raw = RawPointerEvent::new(
            EventType::DOWN | EventType::TRIPLE,
            Buttons::MIDDLE,
            3,
            3,
        );
        let event = normalize(MouseMsg::Down, &raw, &geom);
        assert_eq!(event.count, EventType::TRIPLE);
    }

    #[test]
    fn test_in_widget_forced() {
        let geom = WidgetGeometry::new(10, 5, 4, 4);
        let outside = RawPointerEvent::moved(1, 1);
        let inside = RawPointerEvent::moved(12, 7);

        assert!(!in_widget(&geom, &outside, false));
        assert!(in_widget(&geom, &outside, true));
        assert!(in_widget(&geom, &inside, false));
    }
}
