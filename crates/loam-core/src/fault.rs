//! Named categories of contract violation.
//!
//! The slot-pointer operations in `loam-ptr` have preconditions that are
//! not checked at runtime in release builds; violating one is undefined
//! behavior, not a recoverable error. This module gives each violation
//! category a name so that operation docs can reference it precisely and
//! so the opt-in audit build can report which contract a caller broke.
//!
//! `FaultKind` deliberately does not implement `std::error::Error`: these
//! values never travel through `Result`. They appear in documentation and
//! in audit panic messages only.

use std::fmt;

/// A category of slot-pointer contract violation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Dereferencing, reading, or writing through a null pointer,
    /// including an offset computed from null.
    NullDereference,
    /// Any operation on a pointer after its backing allocation was freed.
    UseAfterFree,
    /// Freeing an allocation that has already been freed.
    DoubleFree,
    /// Taking or reading a slot whose value was already moved out and
    /// not re-emplaced (a stale read).
    DoubleMove,
    /// Taking or reading a slot that was never emplaced.
    UninitializedRead,
    /// Emplacing into a slot that still holds a value, silently leaking
    /// the prior occupant.
    OverwriteWithoutRelease,
    /// An address outside the governing allocation, or not on a slot
    /// boundary within it.
    OutOfRangeOffset,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullDereference => write!(f, "null dereference"),
            Self::UseAfterFree => write!(f, "use after free"),
            Self::DoubleFree => write!(f, "double free"),
            Self::DoubleMove => write!(f, "double move (stale read)"),
            Self::UninitializedRead => write!(f, "uninitialized read"),
            Self::OverwriteWithoutRelease => write!(f, "overwrite without release"),
            Self::OutOfRangeOffset => write!(f, "misaligned or out-of-range offset"),
        }
    }
}
