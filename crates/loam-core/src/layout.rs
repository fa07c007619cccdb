//! Size and alignment requests for runs of element slots.

use std::fmt;
use std::mem;

/// The byte size and alignment of a run of element slots.
///
/// This is what a slot pointer hands to an allocation provider: the total
/// size in bytes of `count` slots plus the alignment each slot requires.
/// The alignment is always a power of two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct SlotLayout {
    size: usize,
    align: usize,
}

impl SlotLayout {
    /// Build a layout from an explicit size and alignment.
    ///
    /// # Panics
    ///
    /// Panics if `align` is not a power of two.
    pub fn from_size_align(size: usize, align: usize) -> Self {
        assert!(
            align.is_power_of_two(),
            "slot alignment {align} is not a power of two"
        );
        Self { size, align }
    }

    /// The layout of a single `T` slot.
    pub fn of<T>() -> Self {
        Self::from_size_align(mem::size_of::<T>(), mem::align_of::<T>())
    }

    /// The layout of `count` contiguous `T` slots.
    ///
    /// # Panics
    ///
    /// Panics if the total byte size overflows `usize`.
    pub fn array<T>(count: usize) -> Self {
        let size = mem::size_of::<T>()
            .checked_mul(count)
            .expect("slot array byte size overflows usize");
        Self::from_size_align(size, mem::align_of::<T>())
    }

    /// Total size in bytes.
    pub fn size(self) -> usize {
        self.size
    }

    /// Required alignment in bytes. Always a power of two.
    pub fn align(self) -> usize {
        self.align
    }

    /// Whether this layout requests zero bytes.
    pub fn is_empty(self) -> bool {
        self.size == 0
    }
}

impl fmt::Display for SlotLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes aligned to {}", self.size, self.align)
    }
}
