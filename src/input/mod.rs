//! Input Module - raw pointer event sources
//!
//! - **Parser** - xterm SGR/X10 mouse report decoding, click counting
//! - **Bridge** - crossterm mouse event conversion
//!
//! Does NOT read stdin or toggle terminal mouse reporting; callers own the
//! terminal and hand bytes or crossterm events in.

mod bridge;
mod parser;

pub use bridge::*;
pub use parser::*;
