//! SGR parameter encoding for colors and text attributes.
//!
//! Produces the parameter fragments that go between `ESC[` and `m`:
//! `"31"` (red foreground), `"48;2;10;20;30"` (true-color background),
//! `"1;4"` (bold + underline). Assembly into full escape sequences happens
//! in the renderer.

use crate::buffer::{Cell, CellAttrs, Color};

/// SGR attribute codes in their fixed emission order.
const ATTR_CODES: [(CellAttrs, u8); 8] = [
    (CellAttrs::BOLD, 1),
    (CellAttrs::DIM, 2),
    (CellAttrs::ITALIC, 3),
    (CellAttrs::UNDERLINE, 4),
    (CellAttrs::BLINK, 5),
    (CellAttrs::INVERSE, 7),
    (CellAttrs::HIDDEN, 8),
    (CellAttrs::STRIKETHROUGH, 9),
];

/// Encode a color as an SGR parameter fragment.
///
/// Named colors land in 30-37/90-97 (foreground) or 40-47/100-107
/// (background); bright variants are computed as `base + index + 52`.
/// True color produces `38;2;r;g;b` / `48;2;r;g;b` and ANSI-256 produces
/// `38;5;n` / `48;5;n`.
pub fn color_to_ansi(color: Color, background: bool) -> String {
    let base: u8 = if background { 40 } else { 30 };
    match color {
        Color::Named(named) => {
            let index = named.index();
            let code = if index < 8 {
                base + index
            } else {
                base + index + 52
            };
            code.to_string()
        }
        Color::Rgb(rgb) => format!("{};2;{};{};{}", base + 8, rgb.r, rgb.g, rgb.b),
        Color::Indexed(n) => format!("{};5;{n}", base + 8),
    }
}

/// Encode style attributes as an SGR parameter fragment.
///
/// Codes are emitted in a fixed order (bold=1, dim=2, italic=3,
/// underline=4, blink=5, inverse=7, hidden=8, strikethrough=9), set flags
/// only, joined with `;`. Returns an empty string for empty attributes.
pub fn attrs_to_ansi(attrs: CellAttrs) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for (flag, code) in ATTR_CODES {
        if attrs.contains(flag) {
            if !out.is_empty() {
                out.push(';');
            }
            let _ = write!(out, "{code}");
        }
    }
    out
}

/// Assemble the full SGR parameter list for a cell's style: attributes,
/// then foreground, then background.
pub(crate) fn style_params(cell: &Cell) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    let attrs = attrs_to_ansi(cell.attrs());
    if !attrs.is_empty() {
        parts.push(attrs);
    }
    if let Some(fg) = cell.fg() {
        parts.push(color_to_ansi(fg, false));
    }
    if let Some(bg) = cell.bg() {
        parts.push(color_to_ansi(bg, true));
    }
    parts.join(";")
}
