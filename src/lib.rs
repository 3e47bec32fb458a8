//! # Termgrid
//!
//! A damage-tracked terminal cell grid with minimal ANSI diff output and
//! raw input decoding.
//!
//! Termgrid is the protocol/codec core of a terminal UI runtime: it turns
//! draw calls into the fewest escape-sequence bytes that update the screen,
//! and raw terminal input bytes into structured key and mouse events. It
//! runs on every keystroke and frame, so both directions are built around
//! doing as little work as possible.
//!
//! ## Core Concepts
//!
//! - **Double-buffered rendering**: front/back cell grids with a
//!   patch-producing swap
//! - **Damage tracking**: mutations record dirty rectangles as a rendering
//!   hint; diffing always compares final cell content
//! - **Run-length SGR coalescing**: style escapes are emitted only when the
//!   accumulated style changes
//! - **Total input decoding**: unknown escape sequences degrade to literal
//!   text, never errors
//!
//! ## Example
//!
//! ```rust
//! use termgrid::{patches_to_ansi, CellAttrs, Color, DoubleBuffer, NamedColor};
//!
//! let mut frame = DoubleBuffer::new(80, 24);
//! frame.back_mut().write_str(
//!     0,
//!     0,
//!     "hello",
//!     Some(Color::Named(NamedColor::Green)),
//!     None,
//!     CellAttrs::BOLD,
//! );
//!
//! let patches = frame.swap();
//! let ansi = patches_to_ansi(&patches, frame.width());
//! assert!(ansi.contains("hello"));
//! ```
//!
//! This crate does not own the terminal: raw-mode toggling, reading input,
//! and writing the produced bytes to the descriptor belong to the caller.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod encode;
pub mod input;
pub mod terminal;

// Re-exports for convenience
pub use buffer::{
    BufferPool, Cell, CellAttrs, CellBuffer, CellPatch, Color, DoubleBuffer, NamedColor, Rect, Rgb,
};
pub use encode::{attrs_to_ansi, buffer_to_ansi, color_to_ansi, patches_to_ansi};
pub use input::{
    parse_keypress, parse_mouse_event, KeyCode, KeyPress, Modifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
pub use terminal::OutputBuffer;
