//! Core types for pointer input.
//!
//! Raw events use the GPM convention: screen coordinates are 1-based, the
//! event type and the button state are independent bitmasks.

// =============================================================================
// Event Type (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Raw event type bits.
    ///
    /// Exactly one of `MOVE`, `DRAG`, `DOWN`, `UP` describes what happened.
    /// The multiplicity bits (`SINGLE`, `DOUBLE`, `TRIPLE`) ride along on
    /// presses and releases.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventType: u16 {
        const MOVE = 1 << 0;
        const DRAG = 1 << 1;
        const DOWN = 1 << 2;
        const UP = 1 << 3;
        const SINGLE = 1 << 4;
        const DOUBLE = 1 << 5;
        const TRIPLE = 1 << 6;
    }
}

impl EventType {
    /// All click-multiplicity bits.
    pub const MULTIPLICITY: Self = Self::SINGLE.union(Self::DOUBLE).union(Self::TRIPLE);

    /// The click-multiplicity bits of this event type.
    pub fn multiplicity(self) -> Self {
        self & Self::MULTIPLICITY
    }

    /// Multiplicity bit for a click count (1, 2 or 3).
    ///
    /// Counts above three saturate at `TRIPLE`, zero yields no bit.
    pub fn for_click_count(count: u8) -> Self {
        match count {
            0 => Self::empty(),
            1 => Self::SINGLE,
            2 => Self::DOUBLE,
            _ => Self::TRIPLE,
        }
    }
}

// =============================================================================
// Buttons (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Pointer button mask.
    ///
    /// Wheel motion is reported as a press of `WHEEL_UP` or `WHEEL_DOWN`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        const RIGHT = 1 << 0;
        const MIDDLE = 1 << 1;
        const LEFT = 1 << 2;
        const FOURTH = 1 << 3;
        const WHEEL_UP = 1 << 4;
        const WHEEL_DOWN = 1 << 5;
    }
}

impl Buttons {
    /// Both wheel buttons.
    pub const WHEEL: Self = Self::WHEEL_UP.union(Self::WHEEL_DOWN);

    /// True if any wheel bit is set.
    pub fn is_wheel(self) -> bool {
        self.intersects(Self::WHEEL)
    }
}

// =============================================================================
// Raw Pointer Event
// =============================================================================

/// A device-level pointer event as delivered by the input source.
///
/// Coordinates are absolute and 1-based: the top-left cell is `(1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawPointerEvent {
    /// Type bits (press/release/drag/move plus multiplicity).
    pub kind: EventType,
    /// Button mask. Some drivers report an empty mask on release.
    pub buttons: Buttons,
    /// Column (1-based).
    pub x: i32,
    /// Row (1-based).
    pub y: i32,
}

impl RawPointerEvent {
    /// Create a raw event from its parts.
    pub fn new(kind: EventType, buttons: Buttons, x: i32, y: i32) -> Self {
        Self { kind, buttons, x, y }
    }

    /// Single-click press.
    pub fn press(buttons: Buttons, x: i32, y: i32) -> Self {
        Self::new(EventType::DOWN | EventType::SINGLE, buttons, x, y)
    }

    /// Release. Pass `Buttons::empty()` to mimic xterm reporting.
    pub fn release(buttons: Buttons, x: i32, y: i32) -> Self {
        Self::new(EventType::UP | EventType::SINGLE, buttons, x, y)
    }

    /// Motion with a button held.
    pub fn drag(buttons: Buttons, x: i32, y: i32) -> Self {
        Self::new(EventType::DRAG, buttons, x, y)
    }

    /// Motion with no button held.
    pub fn moved(x: i32, y: i32) -> Self {
        Self::new(EventType::MOVE, Buttons::empty(), x, y)
    }

    /// Wheel rolled up.
    pub fn wheel_up(x: i32, y: i32) -> Self {
        Self::new(EventType::DOWN, Buttons::WHEEL_UP, x, y)
    }

    /// Wheel rolled down.
    pub fn wheel_down(x: i32, y: i32) -> Self {
        Self::new(EventType::DOWN, Buttons::WHEEL_DOWN, x, y)
    }

    /// Same event with a different button mask.
    pub fn with_buttons(self, buttons: Buttons) -> Self {
        Self { buttons, ..self }
    }
}

// =============================================================================
// Widget Geometry
// =============================================================================

/// Screen rectangle of a widget.
///
/// The origin is the 0-based cell of the widget's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WidgetGeometry {
    pub x: i32,
    pub y: i32,
    pub cols: u16,
    pub lines: u16,
}

impl WidgetGeometry {
    pub fn new(x: i32, y: i32, cols: u16, lines: u16) -> Self {
        Self { x, y, cols, lines }
    }

    /// Does the 1-based screen position `(x, y)` fall inside this rectangle?
    pub fn contains(&self, x: i32, y: i32) -> bool {
        // i64 so the far edge cannot overflow near i32::MAX
        let (x, y) = (i64::from(x), i64::from(y));
        let (left, top) = (i64::from(self.x), i64::from(self.y));
        x > left
            && x <= left + i64::from(self.cols)
            && y > top
            && y <= top + i64::from(self.lines)
    }
}
