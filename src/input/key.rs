//! Key event types.
//!
//! A decoded key press carries the named key (if any), a modifier set, and
//! the decoded input text. Plain and pasted text has no key code at all:
//! `input` holds the text verbatim.

use bitflags::bitflags;

bitflags! {
    /// Key modifiers.
    ///
    /// The bit values match the xterm CSI modifier-parameter encoding
    /// (`m - 1` = shift|alt|ctrl|meta), so wire decoding is a mask.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Shift key held.
        const SHIFT = 0b0000_0001;
        /// Alt/Option key held.
        const ALT = 0b0000_0010;
        /// Control key held.
        const CTRL = 0b0000_0100;
        /// Meta key held (ESC-prefix convention).
        const META = 0b0000_1000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Named keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Function key (F1-F12).
    F(u8),
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Insert key.
    Insert,
    /// Delete key.
    Delete,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
}

/// A decoded key press.
///
/// `input` is the decoded text: the (lowercased) letter for ctrl/meta/shift
/// conventions, the text verbatim for plain and pasted input, and empty for
/// named keys like arrows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPress {
    /// Decoded input text.
    pub input: String,
    /// The named key, if the chunk decoded to one.
    pub code: Option<KeyCode>,
    /// Modifiers held during the press.
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// Check for a specific named key.
    #[inline]
    pub fn is(&self, code: KeyCode) -> bool {
        self.code == Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_match_xterm_bits() {
        // CSI "1;6" means bits 6-1 = 0b101 = shift+ctrl
        let mods = Modifiers::from_bits_truncate(6 - 1);
        assert_eq!(mods, Modifiers::SHIFT | Modifiers::CTRL);
    }

    #[test]
    fn test_keypress_default_is_plain() {
        let press = KeyPress::default();
        assert_eq!(press.input, "");
        assert_eq!(press.code, None);
        assert!(press.modifiers.is_empty());
    }

    #[test]
    fn test_keypress_is() {
        let press = KeyPress {
            input: String::new(),
            code: Some(KeyCode::Up),
            modifiers: Modifiers::CTRL,
        };
        assert!(press.is(KeyCode::Up));
        assert!(!press.is(KeyCode::Down));
    }
}
