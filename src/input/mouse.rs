//! Mouse decoding: SGR mouse reports to structured events.
//!
//! Terminals in SGR mouse mode report `ESC [ < Cb ; Cx ; Cy M` for presses
//! and drags and the same sequence with a final `m` for releases. `Cb`
//! packs the button index (low two bits), the held modifiers (bits 4/8/16),
//! a motion marker (bit 32), and a wheel marker (bit 64, low bit picking
//! the direction).
//!
//! [`parse_mouse_event`] is a strict prefix parser: it consumes exactly one
//! report from the front of a chunk and returns the consumed byte count so
//! the caller can keep decoding the remainder as other events.

use super::key::Modifiers;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Right,
}

/// What the mouse did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Button pressed.
    Down(MouseButton),
    /// Button released.
    Up(MouseButton),
    /// Moved with a button held.
    Drag(MouseButton),
    /// Moved with no button held.
    Moved,
    /// Wheel scrolled up/away.
    ScrollUp,
    /// Wheel scrolled down/toward.
    ScrollDown,
}

/// A decoded mouse event.
///
/// Coordinates are 0-based (SGR reports are 1-based on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// Column (0-based).
    pub x: u16,
    /// Row (0-based).
    pub y: u16,
    /// Modifiers held during the event.
    pub modifiers: Modifiers,
}

/// Decode an SGR mouse report from the front of a chunk.
///
/// Returns the event and the number of bytes consumed, or `None` when the
/// chunk does not begin with a complete report. `None` is not an error;
/// the caller falls back to other decoders.
pub fn parse_mouse_event(bytes: &[u8]) -> Option<(MouseEvent, usize)> {
    let body = bytes.strip_prefix(b"\x1b[<")?;

    let (cb, body) = take_number(body)?;
    let body = body.strip_prefix(b";")?;
    let (cx, body) = take_number(body)?;
    let body = body.strip_prefix(b";")?;
    let (cy, body) = take_number(body)?;

    let (&final_byte, body) = body.split_first()?;
    if final_byte != b'M' && final_byte != b'm' {
        return None;
    }

    let consumed = bytes.len() - body.len();

    let mut modifiers = Modifiers::empty();
    if cb & 4 != 0 {
        modifiers |= Modifiers::SHIFT;
    }
    if cb & 8 != 0 {
        modifiers |= Modifiers::ALT;
    }
    if cb & 16 != 0 {
        modifiers |= Modifiers::CTRL;
    }

    // Button index 3 means "no button"; such reports decode as motion.
    let kind = if cb & 64 != 0 {
        if cb & 1 == 0 {
            MouseEventKind::ScrollUp
        } else {
            MouseEventKind::ScrollDown
        }
    } else if final_byte == b'm' {
        button(cb).map_or(MouseEventKind::Moved, MouseEventKind::Up)
    } else if cb & 32 != 0 {
        button(cb).map_or(MouseEventKind::Moved, MouseEventKind::Drag)
    } else {
        button(cb).map_or(MouseEventKind::Moved, MouseEventKind::Down)
    };

    let event = MouseEvent {
        kind,
        x: cx.saturating_sub(1),
        y: cy.saturating_sub(1),
        modifiers,
    };

    Some((event, consumed))
}

/// Decode the button index from `Cb`'s low two bits.
///
/// Index 3 means "no button" (motion reports).
fn button(cb: u16) -> Option<MouseButton> {
    match cb & 0b11 {
        0 => Some(MouseButton::Left),
        1 => Some(MouseButton::Middle),
        2 => Some(MouseButton::Right),
        _ => None,
    }
}

/// Split a decimal number off the front of a byte slice.
fn take_number(bytes: &[u8]) -> Option<(u16, &[u8])> {
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let text = std::str::from_utf8(&bytes[..digits]).ok()?;
    let value = text.parse().ok()?;
    Some((value, &bytes[digits..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_press() {
        let (event, len) = parse_mouse_event(b"\x1b[<0;5;3M").unwrap();
        assert_eq!(event.kind, MouseEventKind::Down(MouseButton::Left));
        assert_eq!((event.x, event.y), (4, 2));
        assert!(event.modifiers.is_empty());
        assert_eq!(len, 9);
    }

    #[test]
    fn test_release_uses_lowercase_final() {
        let (event, _) = parse_mouse_event(b"\x1b[<0;5;3m").unwrap();
        assert_eq!(event.kind, MouseEventKind::Up(MouseButton::Left));
    }

    #[test]
    fn test_right_button_with_ctrl() {
        let (event, _) = parse_mouse_event(b"\x1b[<18;1;1M").unwrap();
        assert_eq!(event.kind, MouseEventKind::Down(MouseButton::Right));
        assert_eq!(event.modifiers, Modifiers::CTRL);
        assert_eq!((event.x, event.y), (0, 0));
    }

    #[test]
    fn test_drag() {
        // 32 + 0 = left-button drag
        let (event, _) = parse_mouse_event(b"\x1b[<32;10;4M").unwrap();
        assert_eq!(event.kind, MouseEventKind::Drag(MouseButton::Left));
    }

    #[test]
    fn test_motion_without_button() {
        // 32 + 3 = motion, no button held
        let (event, _) = parse_mouse_event(b"\x1b[<35;10;4M").unwrap();
        assert_eq!(event.kind, MouseEventKind::Moved);
    }

    #[test]
    fn test_wheel() {
        let (up, _) = parse_mouse_event(b"\x1b[<64;10;4M").unwrap();
        assert_eq!(up.kind, MouseEventKind::ScrollUp);

        let (down, _) = parse_mouse_event(b"\x1b[<65;10;4M").unwrap();
        assert_eq!(down.kind, MouseEventKind::ScrollDown);
    }

    #[test]
    fn test_shift_alt_bits() {
        let (event, _) = parse_mouse_event(b"\x1b[<12;2;2M").unwrap();
        assert_eq!(event.modifiers, Modifiers::SHIFT | Modifiers::ALT);
    }

    #[test]
    fn test_prefix_only_consumes_report() {
        let input = b"\x1b[<0;5;3Mtrailing";
        let (_, len) = parse_mouse_event(input).unwrap();
        assert_eq!(len, 9);
        assert_eq!(&input[len..], b"trailing");
    }

    #[test]
    fn test_non_matching_prefix_is_none() {
        assert!(parse_mouse_event(b"\x1b[A").is_none());
        assert!(parse_mouse_event(b"x\x1b[<0;5;3M").is_none());
        assert!(parse_mouse_event(b"").is_none());
    }

    #[test]
    fn test_truncated_report_is_none() {
        assert!(parse_mouse_event(b"\x1b[<0;5").is_none());
        assert!(parse_mouse_event(b"\x1b[<0;5;3").is_none());
        assert!(parse_mouse_event(b"\x1b[<0;5;3X").is_none());
        assert!(parse_mouse_event(b"\x1b[<;5;3M").is_none());
    }

    #[test]
    fn test_zero_coordinates_saturate() {
        // 1-based coordinates should never be 0 on the wire, but a
        // malformed 0 must not underflow
        let (event, _) = parse_mouse_event(b"\x1b[<0;0;0M").unwrap();
        assert_eq!((event.x, event.y), (0, 0));
    }
}
