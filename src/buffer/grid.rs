//! `CellBuffer`: A grid of cells with damage tracking.
//!
//! The buffer uses contiguous memory allocation for cache efficiency. Cells
//! are stored in row-major order: `index = y * width + x`.
//!
//! Every mutation appends a damage rectangle to an internal list. Damage is
//! an optimization hint for callers deciding what to re-render; diffing
//! always compares final cell content and never consults the damage list.

use super::cell::{Cell, CellAttrs, Color};
use super::damage::Rect;
use smallvec::SmallVec;

/// A W×H grid of cells with an append-only damage list.
///
/// All coordinate-taking operations are bounds-checked; out-of-range
/// coordinates are a silent no-op so callers with buggy layout math degrade
/// gracefully instead of crashing rendering.
#[derive(Clone)]
pub struct CellBuffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Buffer width in columns.
    width: u16,
    /// Buffer height in rows.
    height: u16,
    /// Accumulated damage rectangles, clamped to buffer bounds.
    damage: SmallVec<[Rect; 8]>,
}

impl CellBuffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells are initialized to empty (space with default colors).
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::EMPTY; size],
            width,
            height,
            damage: SmallVec::new(),
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the buffer is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The buffer's full extent as a rectangle.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y), recording a 1×1 damage rect.
    ///
    /// Returns `false` (without writing) if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            self.damage.push(Rect::new(x, y, 1, 1));
            true
        } else {
            false
        }
    }

    /// Write a glyph at (x, y), computing its display width.
    ///
    /// A width-2 glyph also writes a wide-join placeholder into the next
    /// column, clamped at the right edge: at the last column the glyph is
    /// written but no placeholder is.
    ///
    /// Returns the glyph's display width, or 0 if (x, y) is out of bounds.
    pub fn write_char(
        &mut self,
        x: u16,
        y: u16,
        c: char,
        fg: Option<Color>,
        bg: Option<Color>,
        attrs: CellAttrs,
    ) -> u8 {
        if self.index_of(x, y).is_none() {
            return 0;
        }

        let mut cell = Cell::new(c);
        cell.set_fg(fg).set_bg(bg).set_attrs(attrs);
        let width = cell.display_width();
        self.set(x, y, cell);

        if width == 2 && x + 1 < self.width {
            self.set(x + 1, y, Cell::wide_join(fg, bg, attrs));
        }

        width
    }

    /// Write a string starting at (x, y), advancing by each character's
    /// display width.
    ///
    /// Embedded newlines are skipped (the buffer is a grid, not a text
    /// flow), and writing stops at the buffer's right edge: a wide glyph
    /// that would only half-fit is not written.
    ///
    /// Returns the number of columns consumed.
    pub fn write_str(
        &mut self,
        x: u16,
        y: u16,
        s: &str,
        fg: Option<Color>,
        bg: Option<Color>,
        attrs: CellAttrs,
    ) -> u16 {
        if y >= self.height {
            return 0;
        }
        let mut cx = x;
        for c in s.chars() {
            if c == '\n' || c == '\r' {
                continue;
            }
            let width = u16::from(
                unicode_width::UnicodeWidthChar::width(c)
                    .and_then(|w| u8::try_from(w).ok())
                    .unwrap_or(0),
            );
            if cx >= self.width || cx + width > self.width {
                break;
            }
            self.write_char(cx, y, c, fg, bg, attrs);
            cx += width;
        }
        cx - x
    }

    /// Fill a rectangular region with a cell, clamped to buffer bounds.
    pub fn fill(&mut self, x: u16, y: u16, width: u16, height: u16, cell: Cell) {
        let region = Rect::new(x, y, width, height).intersection(&self.bounds());
        if region.is_empty() {
            return;
        }
        for row in region.y..region.bottom() {
            for col in region.x..region.right() {
                let idx = (row as usize) * (self.width as usize) + (col as usize);
                self.cells[idx] = cell;
            }
        }
        self.damage.push(region);
    }

    /// Clear the entire buffer and mark the whole buffer as damaged.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
        self.damage.clear();
        self.damage.push(self.bounds());
    }

    /// Blit a sub-rectangle of another buffer to (`dst_x`, `dst_y`).
    ///
    /// The source rectangle is clamped to the source's bounds; destination
    /// cells outside this buffer are silently skipped. Copying goes through
    /// [`CellBuffer::set`], so damage is raised implicitly per cell.
    pub fn blit(&mut self, src: &Self, src_rect: Rect, dst_x: u16, dst_y: u16) {
        let region = src_rect.intersection(&src.bounds());
        for dy in 0..region.height {
            for dx in 0..region.width {
                if let Some(cell) = src.get(region.x + dx, region.y + dy) {
                    self.set(dst_x.saturating_add(dx), dst_y.saturating_add(dy), *cell);
                }
            }
        }
    }

    /// Copy another buffer's full content to (0, 0).
    pub fn copy_from(&mut self, src: &Self) {
        self.blit(src, src.bounds(), 0, 0);
    }

    /// Append a damage rectangle, clamped to buffer bounds.
    ///
    /// Empty (or fully out-of-bounds) rectangles are dropped.
    pub fn add_damage(&mut self, rect: Rect) {
        let clamped = rect.intersection(&self.bounds());
        if !clamped.is_empty() {
            self.damage.push(clamped);
        }
    }

    /// Get the accumulated damage rectangles.
    #[inline]
    pub fn damage(&self) -> &[Rect] {
        &self.damage
    }

    /// Check whether any damage has accumulated.
    #[inline]
    pub fn has_damage(&self) -> bool {
        !self.damage.is_empty()
    }

    /// Reset the damage list.
    #[inline]
    pub fn clear_damage(&mut self) {
        self.damage.clear();
    }

    /// Collapse the damage list into its single bounding box.
    ///
    /// The result always contains every input rect (a superset of the true
    /// dirty area). A list of zero or one rects is returned unchanged.
    pub fn consolidate_damage(&mut self) -> &[Rect] {
        if self.damage.len() > 1 {
            let merged = self
                .damage
                .iter()
                .fold(Rect::ZERO, |acc, rect| acc.union(rect));
            self.damage.clear();
            self.damage.push(merged);
        }
        &self.damage
    }

    /// Resize the buffer, preserving content where possible.
    ///
    /// New cells are initialized to empty; the whole buffer is marked
    /// damaged afterward.
    pub fn resize(&mut self, new_width: u16, new_height: u16) {
        assert!(
            new_width > 0 && new_height > 0,
            "Buffer dimensions must be non-zero"
        );
        if new_width == self.width && new_height == self.height {
            return;
        }

        let new_size = (new_width as usize) * (new_height as usize);
        let mut new_cells = vec![Cell::EMPTY; new_size];

        let copy_width = self.width.min(new_width) as usize;
        let copy_height = self.height.min(new_height) as usize;

        for y in 0..copy_height {
            let old_start = y * (self.width as usize);
            let new_start = y * (new_width as usize);
            new_cells[new_start..new_start + copy_width]
                .copy_from_slice(&self.cells[old_start..old_start + copy_width]);
        }

        self.cells = new_cells;
        self.width = new_width;
        self.height = new_height;
        self.damage.clear();
        self.damage.push(self.bounds());
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }
}

impl std::fmt::Debug for CellBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("damage_rects", &self.damage.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::cell::NamedColor;

    #[test]
    fn test_buffer_new() {
        let buffer = CellBuffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.len(), 80 * 24);
        assert!(!buffer.has_damage());
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn test_buffer_zero_width() {
        CellBuffer::new(0, 24);
    }

    #[test]
    fn test_buffer_get_set() {
        let mut buffer = CellBuffer::new(80, 24);
        assert!(buffer.set(5, 10, Cell::new('X')));
        assert_eq!(buffer.get(5, 10).unwrap().glyph(), "X");
    }

    #[test]
    fn test_buffer_out_of_bounds_is_noop() {
        let mut buffer = CellBuffer::new(80, 24);
        assert!(buffer.get(80, 23).is_none());
        assert!(buffer.get(79, 24).is_none());
        assert!(!buffer.set(80, 0, Cell::new('X')));
        assert!(!buffer.has_damage());
        assert_eq!(buffer.write_char(80, 0, 'X', None, None, CellAttrs::empty()), 0);
    }

    #[test]
    fn test_buffer_set_raises_damage() {
        let mut buffer = CellBuffer::new(80, 24);
        buffer.set(5, 10, Cell::new('X'));
        assert_eq!(buffer.damage(), &[Rect::new(5, 10, 1, 1)]);
    }

    #[test]
    fn test_write_char_wide_glyph() {
        let mut buffer = CellBuffer::new(80, 24);
        let width = buffer.write_char(5, 0, '日', None, None, CellAttrs::empty());
        assert_eq!(width, 2);
        assert_eq!(buffer.get(5, 0).unwrap().glyph(), "日");
        let join = buffer.get(6, 0).unwrap();
        assert!(join.is_wide_join());
        assert_eq!(join.glyph(), "");
    }

    #[test]
    fn test_write_char_wide_glyph_at_right_edge() {
        let mut buffer = CellBuffer::new(10, 2);
        // Glyph lands in the last column: written, but no placeholder.
        let width = buffer.write_char(9, 0, '日', None, None, CellAttrs::empty());
        assert_eq!(width, 2);
        assert_eq!(buffer.get(9, 0).unwrap().glyph(), "日");
    }

    #[test]
    fn test_write_str_roundtrip() {
        let mut buffer = CellBuffer::new(80, 24);
        let s = "hello";
        let consumed = buffer.write_str(0, 0, s, None, None, CellAttrs::empty());
        assert_eq!(consumed, 5);
        let read: String = (0..5)
            .map(|x| buffer.get(x, 0).unwrap().glyph().to_owned())
            .collect();
        assert_eq!(read, s);
    }

    #[test]
    fn test_write_str_skips_newlines() {
        let mut buffer = CellBuffer::new(80, 24);
        let consumed = buffer.write_str(0, 0, "ab\ncd", None, None, CellAttrs::empty());
        assert_eq!(consumed, 4);
        assert_eq!(buffer.get(2, 0).unwrap().glyph(), "c");
    }

    #[test]
    fn test_write_str_stops_at_right_edge() {
        let mut buffer = CellBuffer::new(4, 1);
        let consumed = buffer.write_str(0, 0, "abcdef", None, None, CellAttrs::empty());
        assert_eq!(consumed, 4);
        assert_eq!(buffer.get(3, 0).unwrap().glyph(), "d");
    }

    #[test]
    fn test_write_str_wide_glyph_advances_two() {
        let mut buffer = CellBuffer::new(80, 24);
        let consumed = buffer.write_str(0, 0, "日本", None, None, CellAttrs::empty());
        assert_eq!(consumed, 4);
        assert_eq!(buffer.get(0, 0).unwrap().glyph(), "日");
        assert!(buffer.get(1, 0).unwrap().is_wide_join());
        assert_eq!(buffer.get(2, 0).unwrap().glyph(), "本");
    }

    #[test]
    fn test_fill_clamps_to_bounds() {
        let mut buffer = CellBuffer::new(10, 5);
        buffer.fill(8, 3, 10, 10, Cell::new('#'));
        assert_eq!(buffer.get(8, 3).unwrap().glyph(), "#");
        assert_eq!(buffer.get(9, 4).unwrap().glyph(), "#");
        assert_eq!(buffer.get(7, 3).unwrap().glyph(), " ");
        assert_eq!(buffer.damage(), &[Rect::new(8, 3, 2, 2)]);
    }

    #[test]
    fn test_clear_marks_everything_damaged() {
        let mut buffer = CellBuffer::new(10, 5);
        buffer.set(5, 2, Cell::new('X'));
        buffer.clear();
        assert_eq!(buffer.get(5, 2), Some(&Cell::EMPTY));
        assert_eq!(buffer.damage(), &[Rect::from_size(10, 5)]);
    }

    #[test]
    fn test_blit_copies_subrect() {
        let mut src = CellBuffer::new(10, 5);
        src.write_str(0, 0, "abcd", None, None, CellAttrs::empty());

        let mut dst = CellBuffer::new(10, 5);
        dst.blit(&src, Rect::new(1, 0, 2, 1), 4, 2);
        assert_eq!(dst.get(4, 2).unwrap().glyph(), "b");
        assert_eq!(dst.get(5, 2).unwrap().glyph(), "c");
        // Damage raised through set
        assert!(dst.has_damage());
    }

    #[test]
    fn test_copy_from_mismatched_sizes() {
        let mut src = CellBuffer::new(4, 2);
        src.fill(0, 0, 4, 2, Cell::new('s'));

        let mut dst = CellBuffer::new(2, 4);
        dst.copy_from(&src);
        // Only the 2x2 overlap lands
        assert_eq!(dst.get(0, 0).unwrap().glyph(), "s");
        assert_eq!(dst.get(1, 1).unwrap().glyph(), "s");
        assert_eq!(dst.get(0, 2).unwrap().glyph(), " ");
    }

    #[test]
    fn test_add_damage_clamps() {
        let mut buffer = CellBuffer::new(10, 5);
        buffer.add_damage(Rect::new(8, 4, 10, 10));
        assert_eq!(buffer.damage(), &[Rect::new(8, 4, 2, 1)]);

        buffer.add_damage(Rect::new(50, 50, 3, 3));
        assert_eq!(buffer.damage().len(), 1);
    }

    #[test]
    fn test_consolidate_damage_bounding_box() {
        let mut buffer = CellBuffer::new(100, 50);
        buffer.add_damage(Rect::new(2, 3, 4, 4));
        buffer.add_damage(Rect::new(90, 40, 5, 5));
        buffer.add_damage(Rect::new(30, 10, 1, 1));

        let consolidated = buffer.consolidate_damage();
        assert_eq!(consolidated, &[Rect::new(2, 3, 93, 42)]);
    }

    #[test]
    fn test_consolidate_damage_single_rect_unchanged() {
        let mut buffer = CellBuffer::new(100, 50);
        buffer.add_damage(Rect::new(2, 3, 4, 4));
        assert_eq!(buffer.consolidate_damage(), &[Rect::new(2, 3, 4, 4)]);

        buffer.clear_damage();
        assert!(buffer.consolidate_damage().is_empty());
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let mut buffer = CellBuffer::new(80, 24);
        buffer.set(5, 5, Cell::new('X').with_fg(Color::Named(NamedColor::Red)));

        buffer.resize(100, 30);
        assert_eq!(buffer.width(), 100);
        assert_eq!(buffer.get(5, 5).unwrap().glyph(), "X");

        buffer.resize(10, 10);
        assert_eq!(buffer.get(5, 5).unwrap().glyph(), "X");
        assert!(buffer.get(15, 15).is_none());
        assert_eq!(buffer.damage(), &[Rect::from_size(10, 10)]);
    }

    #[test]
    fn test_rows() {
        let buffer = CellBuffer::new(8, 3);
        assert_eq!(buffer.rows().count(), 3);
        assert!(buffer.rows().all(|row| row.len() == 8));
    }
}
