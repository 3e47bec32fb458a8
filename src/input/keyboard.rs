//! Keyboard decoding: one raw input chunk to a structured key press.
//!
//! The decoder handles the escape-sequence conventions of the major
//! terminal families: xterm CSI letters (`ESC [ A`), gnome/xterm SS3
//! letters (`ESC O A`, `ESC O P` for F1-F4), the rxvt/xterm legacy numeric
//! table (`ESC [ 11 ~` for F1, with its non-contiguous F-key numbering),
//! CSI modifier parameters (`ESC [ 1 ; 5 A` for ctrl+up), rxvt letter
//! variants (`ESC [ a`, `ESC [ Z`), and cygwin double-bracket F-keys
//! (`ESC [ [ A`).
//!
//! Decoding is total: an unrecognized or malformed sequence degrades to
//! literal text with no key flags set. The worst case for garbage input is
//! that it is treated as pasted text.

use super::key::{KeyCode, KeyPress, Modifiers};

/// Decode one reported key event from a raw chunk of terminal input.
///
/// The chunk is expected to hold a single key report (chunk reassembly
/// across reads is the caller's concern); anything that does not match a
/// known sequence comes back verbatim as [`KeyPress::input`].
pub fn parse_keypress(bytes: &[u8]) -> KeyPress {
    // Legacy meta convention: a single byte above 127 re-decodes as
    // ESC + (byte - 128). Multi-byte chunks are left alone so well-formed
    // UTF-8 falls through to the literal-text path.
    if let &[byte] = bytes {
        if byte > 0x7f {
            return parse_keypress(&[0x1b, byte - 0x80]);
        }
    }

    match bytes {
        [] => KeyPress::default(),
        b"\r" | b"\n" => named(KeyCode::Enter, Modifiers::empty()),
        b"\t" => named(KeyCode::Tab, Modifiers::empty()),
        b"\x7f" | b"\x08" => named(KeyCode::Backspace, Modifiers::empty()),
        b"\x1b\x7f" => named(KeyCode::Backspace, Modifiers::META),
        b"\x1b" => named(KeyCode::Escape, Modifiers::empty()),
        b"\x1b\x1b" => named(KeyCode::Escape, Modifiers::META),
        &[byte] if (0x01..=0x1a).contains(&byte) => {
            // Remaining C0 controls are ctrl+letter
            let c = (byte - 1 + b'a') as char;
            character(c, Modifiers::CTRL)
        }
        &[byte] if byte.is_ascii_uppercase() => {
            character(byte.to_ascii_lowercase() as char, Modifiers::SHIFT)
        }
        &[byte] if (0x20..=0x7e).contains(&byte) => {
            character(byte as char, Modifiers::empty())
        }
        [0x1b, rest @ ..] => decode_escape(rest).unwrap_or_else(|| literal(bytes)),
        _ => literal(bytes),
    }
}

/// Decode the body of an escape sequence (everything after the leading ESC).
fn decode_escape(rest: &[u8]) -> Option<KeyPress> {
    match rest {
        // ESC + one printable char is the meta convention. A lone `[` or
        // `O` is unambiguous here: CSI/SS3 sequences carry at least one
        // more byte.
        &[byte] if (0x20..=0x7e).contains(&byte) => {
            let mut modifiers = Modifiers::META;
            let mut c = byte as char;
            if c.is_ascii_uppercase() {
                modifiers |= Modifiers::SHIFT;
                c = c.to_ascii_lowercase();
            }
            Some(character(c, modifiers))
        }
        // Cygwin F-keys: ESC [ [ A..E
        [b'[', b'[', letter] if (b'A'..=b'E').contains(letter) => {
            Some(named(KeyCode::F(letter - b'A' + 1), Modifiers::empty()))
        }
        // Single-letter CSI: ESC [ <letter>
        [b'[', letter] => csi_letter(*letter),
        // SS3: ESC O <letter>
        [b'O', letter] => ss3_letter(*letter),
        // Parameterized CSI: ESC [ <digits> (; <digits>)* <final>
        [b'[', params @ .., final_byte] if !params.is_empty() => {
            csi_parameterized(params, *final_byte)
        }
        _ => None,
    }
}

/// xterm/rxvt single-letter CSI sequences.
fn csi_letter(letter: u8) -> Option<KeyPress> {
    let press = match letter {
        b'A' => named(KeyCode::Up, Modifiers::empty()),
        b'B' => named(KeyCode::Down, Modifiers::empty()),
        b'C' => named(KeyCode::Right, Modifiers::empty()),
        b'D' => named(KeyCode::Left, Modifiers::empty()),
        b'H' => named(KeyCode::Home, Modifiers::empty()),
        b'F' => named(KeyCode::End, Modifiers::empty()),
        // rxvt letter variants
        b'Z' => named(KeyCode::Tab, Modifiers::SHIFT),
        b'a' => named(KeyCode::Up, Modifiers::SHIFT),
        b'b' => named(KeyCode::Down, Modifiers::SHIFT),
        _ => return None,
    };
    Some(press)
}

/// gnome/xterm SS3 sequences (`ESC O ...`).
fn ss3_letter(letter: u8) -> Option<KeyPress> {
    let press = match letter {
        b'A' => named(KeyCode::Up, Modifiers::empty()),
        b'B' => named(KeyCode::Down, Modifiers::empty()),
        b'C' => named(KeyCode::Right, Modifiers::empty()),
        b'D' => named(KeyCode::Left, Modifiers::empty()),
        b'H' => named(KeyCode::Home, Modifiers::empty()),
        b'F' => named(KeyCode::End, Modifiers::empty()),
        b'P' => named(KeyCode::F(1), Modifiers::empty()),
        b'Q' => named(KeyCode::F(2), Modifiers::empty()),
        b'R' => named(KeyCode::F(3), Modifiers::empty()),
        b'S' => named(KeyCode::F(4), Modifiers::empty()),
        // rxvt ctrl variants
        b'a' => named(KeyCode::Up, Modifiers::CTRL),
        b'b' => named(KeyCode::Down, Modifiers::CTRL),
        _ => return None,
    };
    Some(press)
}

/// Numeric and modifier-parameterized CSI sequences.
fn csi_parameterized(params: &[u8], final_byte: u8) -> Option<KeyPress> {
    let text = std::str::from_utf8(params).ok()?;
    let mut fields = text.split(';');
    let first: u32 = fields.next()?.parse().ok()?;
    let modifier_param: Option<u32> = match fields.next() {
        Some(field) => Some(field.parse().ok()?),
        None => None,
    };
    if fields.next().is_some() {
        return None;
    }

    let modifiers = modifier_param.map_or(Modifiers::empty(), decode_modifier_param);

    match final_byte {
        b'~' => {
            let code = csi_tilde_key(first)?;
            Some(named(code, modifiers))
        }
        // Modifier-parameterized letter form, e.g. ESC [ 1 ; 5 A
        b'A' => Some(named(KeyCode::Up, modifiers)),
        b'B' => Some(named(KeyCode::Down, modifiers)),
        b'C' => Some(named(KeyCode::Right, modifiers)),
        b'D' => Some(named(KeyCode::Left, modifiers)),
        b'H' => Some(named(KeyCode::Home, modifiers)),
        b'F' => Some(named(KeyCode::End, modifiers)),
        _ => None,
    }
}

/// Decode the CSI modifier parameter: `m - 1` is a bitmask over
/// shift=1, alt=2, ctrl=4, meta=8.
fn decode_modifier_param(m: u32) -> Modifiers {
    let bits = u8::try_from(m.saturating_sub(1)).unwrap_or(0);
    Modifiers::from_bits_truncate(bits)
}

/// The rxvt/xterm legacy numeric table for `ESC [ <n> ~`.
///
/// The F-key numbering is non-contiguous: 16 and 22 are unassigned.
fn csi_tilde_key(n: u32) -> Option<KeyCode> {
    let code = match n {
        1 | 7 => KeyCode::Home,
        2 => KeyCode::Insert,
        3 => KeyCode::Delete,
        4 | 8 => KeyCode::End,
        5 => KeyCode::PageUp,
        6 => KeyCode::PageDown,
        11..=15 => KeyCode::F(u8::try_from(n - 10).ok()?),
        17..=21 => KeyCode::F(u8::try_from(n - 11).ok()?),
        23 | 24 => KeyCode::F(u8::try_from(n - 12).ok()?),
        _ => return None,
    };
    Some(code)
}

/// A named key with no input text.
fn named(code: KeyCode, modifiers: Modifiers) -> KeyPress {
    KeyPress {
        input: String::new(),
        code: Some(code),
        modifiers,
    }
}

/// A character key carrying its (already lowercased) text.
fn character(c: char, modifiers: Modifiers) -> KeyPress {
    KeyPress {
        input: c.to_string(),
        code: Some(KeyCode::Char(c)),
        modifiers,
    }
}

/// The fallback path: the chunk verbatim, no key flags set.
fn literal(bytes: &[u8]) -> KeyPress {
    let input = String::from_utf8_lossy(bytes).into_owned();
    let mut chars = input.chars();
    let code = match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeyCode::Char(c)),
        _ => None,
    };
    KeyPress {
        input,
        code,
        modifiers: Modifiers::empty(),
    }
}
