//! Input module: raw terminal bytes to structured events.
//!
//! Two independent decoders:
//! - [`parse_keypress`]: one reported key event per call, total (never
//!   fails; unknown sequences degrade to literal text)
//! - [`parse_mouse_event`]: strict prefix parser for SGR mouse reports,
//!   returning the consumed length so callers can continue decoding the
//!   rest of a chunk

mod key;
mod keyboard;
mod mouse;

pub use key::{KeyCode, KeyPress, Modifiers};
pub use keyboard::parse_keypress;
pub use mouse::{parse_mouse_event, MouseButton, MouseEvent, MouseEventKind};
