//! Diffing: positional deltas between two cell buffers.
//!
//! A diff walks the overlapping region of two buffers and emits one
//! [`CellPatch`] per position whose cells differ. Patches are self-contained
//! (they clone the target cell), so a patch list can be applied to any buffer
//! and carried to the encoder without referencing either source.
//!
//! Diffing compares final cell content only; the damage list is never
//! consulted.

use super::cell::Cell;
use super::grid::CellBuffer;

/// One positional delta between two buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPatch {
    /// Column of the changed cell.
    pub x: u16,
    /// Row of the changed cell.
    pub y: u16,
    /// The target buffer's cell at this position.
    pub cell: Cell,
}

impl CellBuffer {
    /// Compute the patches that transform this buffer's content into the
    /// target's, over the overlapping region of the two.
    ///
    /// `diff(X, X)` is always empty, and applying the result to a clone of
    /// `self` reproduces `target` over the overlap. Wide-join placeholders
    /// participate like any other cell so the patch set stays sufficient;
    /// the encoder is what skips them at serialization time.
    pub fn diff(&self, target: &Self) -> Vec<CellPatch> {
        let width = self.width().min(target.width());
        let height = self.height().min(target.height());

        let mut patches = Vec::new();
        for y in 0..height {
            let a_start = (y as usize) * (self.width() as usize);
            let b_start = (y as usize) * (target.width() as usize);
            for x in 0..width {
                let a = &self.cells()[a_start + (x as usize)];
                let b = &target.cells()[b_start + (x as usize)];
                if a != b {
                    patches.push(CellPatch { x, y, cell: *b });
                }
            }
        }
        patches
    }

    /// Apply patches via [`CellBuffer::set`], re-raising damage for each
    /// patched cell. Out-of-bounds patches are silently dropped.
    pub fn apply_patches(&mut self, patches: &[CellPatch]) {
        for patch in patches {
            self.set(patch.x, patch.y, patch.cell);
        }
    }
}
