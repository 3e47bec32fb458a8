//! Rendering: cell content to minimal ANSI escape-sequence strings.
//!
//! Two modes share the same style coalescing:
//!
//! 1. **Full render** ([`buffer_to_ansi`]): row-major traversal of a whole
//!    buffer, for the initial frame and forced redraws.
//! 2. **Incremental render** ([`patches_to_ansi`]): only the cells a swap
//!    reported as changed, with cursor-move elision for adjacent runs.
//!
//! Both run on every keystroke/tick of an interactive loop, so they emit a
//! reset + new SGR sequence only when the accumulated style actually
//! changes, and position the cursor only when a patch is not adjacent to
//! the previous one.

use super::sgr::style_params;
use crate::buffer::{Cell, CellAttrs, CellBuffer, CellPatch};
use std::fmt::Write;

/// Style run-length tracker.
///
/// `None` means the terminal's style state is unknown, so the first emitted
/// cell always resets.
#[derive(Default)]
struct StyleTracker {
    last: Option<String>,
}

impl StyleTracker {
    /// Emit a style change for `cell` if its style differs from the last
    /// emitted one.
    fn emit(&mut self, out: &mut String, cell: &Cell) {
        let params = style_params(cell);
        if self.last.as_deref() == Some(params.as_str()) {
            return;
        }
        out.push_str("\x1b[0m");
        if !params.is_empty() {
            let _ = write!(out, "\x1b[{params}m");
        }
        self.last = Some(params);
    }
}

/// A cell that produces no visible output: a space (or empty) glyph with no
/// background and no attribute that renders on whitespace.
fn is_blank(cell: &Cell) -> bool {
    matches!(cell.glyph(), "" | " ")
        && cell.bg().is_none()
        && !cell
            .attrs()
            .intersects(CellAttrs::INVERSE | CellAttrs::UNDERLINE | CellAttrs::STRIKETHROUGH)
}

/// Emit a cursor move, using the most compact representation.
///
/// `ESC[H` for home, `ESC[{row}H` for column 1, `ESC[{row};{col}H`
/// otherwise (ANSI rows/columns are 1-indexed).
fn emit_cursor_move(out: &mut String, x: u16, y: u16) {
    let row = y + 1;
    let col = x + 1;
    if row == 1 && col == 1 {
        out.push_str("\x1b[H");
    } else if col == 1 {
        let _ = write!(out, "\x1b[{row}H");
    } else {
        let _ = write!(out, "\x1b[{row};{col}H");
    }
}

/// Render a whole buffer to an ANSI string.
///
/// Row-major; wide-join placeholders are skipped entirely (the wide glyph
/// to their left already covers both columns). Trailing blank cells on each
/// line and trailing blank lines are stripped. Lines are separated with
/// `\n`; when anything was emitted the output ends with a style reset so no
/// state leaks into subsequent writes.
pub fn buffer_to_ansi(buffer: &CellBuffer) -> String {
    let mut out = String::new();
    let mut tracker = StyleTracker::default();

    let rows: Vec<&[Cell]> = buffer.rows().collect();
    let last_row = match rows.iter().rposition(|row| row.iter().any(|c| !is_blank(c))) {
        Some(y) => y,
        None => return out,
    };

    for (y, row) in rows.iter().enumerate().take(last_row + 1) {
        if y > 0 {
            out.push('\n');
        }
        let Some(last_col) = row.iter().rposition(|c| !is_blank(c)) else {
            continue;
        };
        for cell in row.iter().take(last_col + 1) {
            if cell.is_wide_join() {
                continue;
            }
            tracker.emit(&mut out, cell);
            match cell.glyph() {
                "" => out.push(' '),
                glyph => out.push_str(glyph),
            }
        }
    }

    if !out.is_empty() {
        out.push_str("\x1b[0m");
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(bytes = out.len(), "full render");

    out
}

/// Render a patch list to an ANSI string.
///
/// Patches are sorted by (row, column). A cursor-position escape is emitted
/// only when the next patch is not immediately adjacent to the tracked
/// cursor position (same row, column = previous column + previous glyph's
/// display width). Wide-join placeholders are never individually positioned
/// or drawn; the glyph cell to their left advances the cursor by 2.
///
/// `width` is the terminal width in columns; a run that reaches the right
/// edge forces an explicit move for the next patch.
pub fn patches_to_ansi(patches: &[CellPatch], width: u16) -> String {
    let mut out = String::new();
    let mut tracker = StyleTracker::default();

    let mut sorted: Vec<&CellPatch> = patches.iter().collect();
    sorted.sort_by_key(|p| (p.y, p.x));

    // Logical position the next adjacent write would land on.
    let mut cursor: Option<(u16, u16)> = None;

    for patch in sorted {
        if patch.cell.is_wide_join() {
            continue;
        }

        let adjacent = cursor == Some((patch.x, patch.y)) && patch.x < width;
        if !adjacent {
            emit_cursor_move(&mut out, patch.x, patch.y);
        }

        tracker.emit(&mut out, &patch.cell);
        match patch.cell.glyph() {
            "" => out.push(' '),
            glyph => out.push_str(glyph),
        }

        let advance = u16::from(patch.cell.display_width().max(1));
        cursor = Some((patch.x.saturating_add(advance), patch.y));
    }

    if !out.is_empty() {
        out.push_str("\x1b[0m");
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(patches = patches.len(), bytes = out.len(), "patch render");

    out
}
