//! State Module - pointer classification for widgets
//!
//! - **Normalize** - Bounds test, screen to widget-local coordinates
//! - **Capture** - Per-widget capture state, classification table, release reconciliation
//! - **Mouse** - Message vocabulary, handler trait, widget binding, result protocol

mod capture;
mod mouse;
mod normalize;

pub use capture::*;
pub use mouse::*;
pub use normalize::*;
