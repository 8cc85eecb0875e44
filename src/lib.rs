//! # spark-tui-pointer
//!
//! Pointer input classifier for SparkTUI widgets.
//!
//! Converts device-level pointer events (press/release/drag/move bitmasks,
//! button masks, 1-based screen coordinates) into the high-level messages
//! widgets react to: `Down`, `Up`, `Drag`, `Move`, `Click`, `ScrollUp`,
//! `ScrollDown`.
//!
//! ## Architecture
//!
//! ```text
//! terminal bytes / crossterm → RawPointerEvent → bounds test → capture table
//!     → MouseEvent(s) → MouseHandler → MouseResult(s) → MouseOutcome
//! ```
//!
//! Each bound widget owns its capture state, including the button mask
//! remembered from the press that captured. Dispatch is synchronous: a raw
//! event is fully classified and delivered before the next one is looked at.
//!
//! ## Modules
//!
//! - [`types`] - Raw events, event-type and button bitmasks, widget geometry
//! - [`state`] - Capture state machine, normalization, widget binding
//! - [`input`] - xterm mouse report decoder and crossterm bridge

pub mod input;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use state::{
    bind, route, CaptureState, MouseEvent, MouseHandler, MouseMsg, MouseOptions,
    MouseOutcome, MouseResult, MouseWidget, PointerTarget, Transition,
};

pub use input::{raw_from_crossterm, Decoded, MouseParser, ParseError, ParserConfig};
