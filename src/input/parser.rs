//! Mouse report decoder for terminal input.
//!
//! Decodes xterm mouse reports into [`RawPointerEvent`]s:
//! - SGR (`ESC [ < Cb ; Cx ; Cy M` for press/motion, `m` for release)
//! - X10/normal (`ESC [ M Cb Cx Cy`, each byte offset by 32)
//!
//! Coordinates stay 1-based. SGR releases name the released button; X10
//! releases do not, so they come out with an empty button mask and rely on
//! the classifier's release reconciliation.
//!
//! Horizontal wheel codes and the extra buttons 8 to 11 are rejected with
//! [`ParseError::Unsupported`].
//!
//! The decoder also counts clicks: a press of the same button on the same
//! cell within [`ParserConfig::double_click_interval`] of the previous one
//! is reported as `DOUBLE`, then `TRIPLE`.

use std::time::{Duration, Instant};

use log::debug;
use thiserror::Error;

use crate::types::{Buttons, EventType, RawPointerEvent};

// =============================================================================
// Types
// =============================================================================

/// Why a byte sequence did not decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("incomplete mouse report")]
    Incomplete,
    #[error("not a mouse report")]
    NotMouse,
    #[error("malformed mouse report: {0}")]
    Malformed(String),
    #[error("unsupported mouse button code {0}")]
    Unsupported(u16),
}

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Max gap between presses counted as one multi-click.
    pub double_click_interval: Duration,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            double_click_interval: Duration::from_millis(250),
        }
    }
}

/// A decoded report and how many bytes it used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub event: RawPointerEvent,
    pub consumed: usize,
}

const SGR_PREFIX: &[u8] = b"\x1b[<";
const X10_PREFIX: &[u8] = b"\x1b[M";

/// Button code bits shared by SGR and X10.
const CB_BUTTON: u16 = 0b11;
const CB_MOTION: u16 = 32;
const CB_WHEEL: u16 = 64;
/// Buttons 8 to 11 (the low bits then pick which one).
const CB_EXTRA: u16 = 128;

#[derive(Debug, Clone, Copy)]
struct LastPress {
    buttons: Buttons,
    x: i32,
    y: i32,
    at: Instant,
    count: u8,
}

// =============================================================================
// Parser
// =============================================================================

/// Stateful mouse report decoder.
#[derive(Debug, Default)]
pub struct MouseParser {
    config: ParserConfig,
    last_press: Option<LastPress>,
}

impl MouseParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            last_press: None,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Decode the mouse report at the start of `data`.
    ///
    /// `now` timestamps the report for click counting.
    pub fn parse(&mut self, data: &[u8], now: Instant) -> Result<Decoded, ParseError> {
        let result = if data.starts_with(SGR_PREFIX) {
            self.parse_sgr(data, now)
        } else if data.starts_with(X10_PREFIX) {
            self.parse_x10(data, now)
        } else if SGR_PREFIX.starts_with(data) || X10_PREFIX.starts_with(data) {
            Err(ParseError::Incomplete)
        } else {
            Err(ParseError::NotMouse)
        };

        if let Err(ref err) = result {
            if *err != ParseError::Incomplete {
                debug!("dropping mouse report {:?}: {}", String::from_utf8_lossy(data), err);
            }
        }
        result
    }

    /// Forget the click-count history.
    pub fn reset(&mut self) {
        self.last_press = None;
    }

    fn parse_sgr(&mut self, data: &[u8], now: Instant) -> Result<Decoded, ParseError> {
        // ESC [ < Cb ; Cx ; Cy M/m
        let start = SGR_PREFIX.len();
        let Some(offset) = data[start..].iter().position(|&b| b == b'M' || b == b'm') else {
            if data[start..].iter().all(|&b| b.is_ascii_digit() || b == b';') {
                return Err(ParseError::Incomplete);
            }
            return Err(ParseError::Malformed("unterminated SGR report".into()));
        };
        let end = start + offset;
        let is_release = data[end] == b'm';

        let params = std::str::from_utf8(&data[start..end])
            .map_err(|_| ParseError::Malformed("non-ASCII parameters".into()))?;
        let parts = params
            .split(';')
            .map(|p| p.parse::<u16>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ParseError::Malformed(format!("{params:?}: {e}")))?;
        let &[cb, x, y] = parts.as_slice() else {
            return Err(ParseError::Malformed(format!(
                "expected 3 parameters, got {}",
                parts.len()
            )));
        };

        if cb & CB_EXTRA != 0 {
            return Err(ParseError::Unsupported(cb));
        }
        let (kind, buttons) = if cb & CB_WHEEL != 0 {
            (EventType::DOWN, wheel_button(cb)?)
        } else if cb & CB_MOTION != 0 {
            motion(cb)
        } else if is_release {
            (EventType::UP | EventType::SINGLE, button(cb))
        } else {
            let buttons = button(cb);
            (EventType::DOWN | self.count_click(buttons, x.into(), y.into(), now), buttons)
        };

        Ok(Decoded {
            event: RawPointerEvent::new(kind, buttons, x.into(), y.into()),
            consumed: end + 1,
        })
    }

    fn parse_x10(&mut self, data: &[u8], now: Instant) -> Result<Decoded, ParseError> {
        // ESC [ M Cb Cx Cy
        const LEN: usize = 6;
        if data.len() < LEN {
            return Err(ParseError::Incomplete);
        }

        let decode = |b: u8| {
            b.checked_sub(32)
                .ok_or_else(|| ParseError::Malformed(format!("byte {b:#04x} below offset")))
        };
        let cb = u16::from(decode(data[3])?);
        let x = i32::from(decode(data[4])?);
        let y = i32::from(decode(data[5])?);

        if cb & CB_EXTRA != 0 {
            return Err(ParseError::Unsupported(cb));
        }
        let (kind, buttons) = if cb & CB_WHEEL != 0 {
            (EventType::DOWN, wheel_button(cb)?)
        } else if cb & CB_MOTION != 0 {
            motion(cb)
        } else if cb & CB_BUTTON == CB_BUTTON {
            // X10 does not say which button went up.
            (EventType::UP | EventType::SINGLE, Buttons::empty())
        } else {
            let buttons = button(cb);
            (EventType::DOWN | self.count_click(buttons, x, y, now), buttons)
        };

        Ok(Decoded {
            event: RawPointerEvent::new(kind, buttons, x, y),
            consumed: LEN,
        })
    }

    /// Multiplicity bit for a press, updating the click history.
    fn count_click(&mut self, buttons: Buttons, x: i32, y: i32, now: Instant) -> EventType {
        let count = match self.last_press {
            Some(last)
                if last.buttons == buttons
                    && last.x == x
                    && last.y == y
                    && last.count < 3
                    && now.saturating_duration_since(last.at) <= self.config.double_click_interval =>
            {
                last.count + 1
            }
            _ => 1,
        };

        self.last_press = Some(LastPress {
            buttons,
            x,
            y,
            at: now,
            count,
        });
        EventType::for_click_count(count)
    }
}

// =============================================================================
// Button Decoding
// =============================================================================

fn button(cb: u16) -> Buttons {
    match cb & CB_BUTTON {
        0 => Buttons::LEFT,
        1 => Buttons::MIDDLE,
        2 => Buttons::RIGHT,
        _ => Buttons::empty(),
    }
}

fn wheel_button(cb: u16) -> Result<Buttons, ParseError> {
    match cb & CB_BUTTON {
        0 => Ok(Buttons::WHEEL_UP),
        1 => Ok(Buttons::WHEEL_DOWN),
        // Horizontal wheels
        _ => Err(ParseError::Unsupported(cb)),
    }
}

fn motion(cb: u16) -> (EventType, Buttons) {
    match button(cb) {
        b if b.is_empty() => (EventType::MOVE, b),
        b => (EventType::DRAG, b),
    }
}

// =============================================================================
// Tests
// =============================================================================
