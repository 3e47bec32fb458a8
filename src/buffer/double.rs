//! `DoubleBuffer`: front/back cell grids with a patch-producing swap.
//!
//! The front buffer models what the terminal currently shows; the back
//! buffer is what drawing code mutates. [`DoubleBuffer::swap`] computes the
//! patches that transform the displayed frame into the drawn one, then
//! exchanges the two roles. The terminal never sees a partially drawn frame.

use super::diff::CellPatch;
use super::grid::CellBuffer;

/// Two named buffer slots (front = displayed, back = being drawn) plus a
/// swap operation exchanging which slot is current.
///
/// A `DoubleBuffer` has exactly one logical owner; there is no interior
/// synchronization.
#[derive(Debug)]
pub struct DoubleBuffer {
    /// What the terminal currently shows, logically.
    front: CellBuffer,
    /// The frame being drawn.
    back: CellBuffer,
}

impl DoubleBuffer {
    /// Create a double buffer with both slots at the given dimensions.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            front: CellBuffer::new(width, height),
            back: CellBuffer::new(width, height),
        }
    }

    /// Buffer width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.front.width()
    }

    /// Buffer height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.front.height()
    }

    /// The currently displayed buffer. Drawing code must not mutate it.
    #[inline]
    pub const fn front(&self) -> &CellBuffer {
        &self.front
    }

    /// The buffer being drawn.
    #[inline]
    pub const fn back(&self) -> &CellBuffer {
        &self.back
    }

    /// Mutable access to the buffer being drawn.
    #[inline]
    pub fn back_mut(&mut self) -> &mut CellBuffer {
        &mut self.back
    }

    /// Present the drawn frame.
    ///
    /// Computes the patches that transform the currently displayed content
    /// into the newly drawn frame, exchanges the front/back roles, and
    /// clears damage on the new back buffer.
    ///
    /// Contract: the caller must apply every returned patch to the real
    /// terminal exactly once before the next swap, or the front buffer
    /// desyncs from the real screen until a forced full redraw.
    pub fn swap(&mut self) -> Vec<CellPatch> {
        let patches = self.front.diff(&self.back);
        std::mem::swap(&mut self.front, &mut self.back);
        self.back.clear_damage();

        #[cfg(feature = "tracing")]
        tracing::trace!(patches = patches.len(), "buffer swap");

        patches
    }

    /// Reallocate both buffers at a new size.
    ///
    /// This discards all content in both slots; the caller must force a
    /// full redraw immediately afterward.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.front = CellBuffer::new(width, height);
        self.back = CellBuffer::new(width, height);

        #[cfg(feature = "tracing")]
        tracing::debug!(width, height, "double buffer resized, full redraw required");
    }
}
