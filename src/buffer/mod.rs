//! Buffer module: Core data structures for the double-buffer rendering
//! system.
//!
//! This module contains:
//! - [`Cell`]: The atomic unit of display, a glyph plus its style
//! - [`CellBuffer`]: A grid of cells with damage tracking
//! - [`Color`] / [`NamedColor`] / [`Rgb`]: Terminal color representations
//! - [`CellAttrs`]: Text style bitflags
//! - [`CellPatch`]: One positional delta between two buffers
//! - [`DoubleBuffer`]: Front/back slots with a patch-producing swap
//! - [`BufferPool`]: Size-keyed buffer reuse

mod cell;
mod damage;
mod diff;
mod double;
mod grid;
mod pool;

pub use cell::{Cell, CellAttrs, Color, NamedColor, Rgb};
pub use damage::Rect;
pub use diff::CellPatch;
pub use double::DoubleBuffer;
pub use grid::CellBuffer;
pub use pool::BufferPool;
