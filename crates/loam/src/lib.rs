//! Loam: unchecked owning slot pointers for building container storage.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Loam sub-crates. For most users, adding `loam` as a single
//! dependency is sufficient.
//!
//! A [`SlotPtr`](ptr::SlotPtr) is a single-word owning pointer over
//! `T`-sized slots: allocate a run of uninitialized slots, move values in
//! and out (or relocate them slot-to-slot in one move), borrow them in
//! place, and release the whole range explicitly. Nothing is checked at
//! runtime; this is the substrate checked containers are built on, and
//! upholding the documented preconditions is the caller's job.
//!
//! # Quick start
//!
//! ```rust
//! use loam::prelude::*;
//!
//! let p = SlotPtr::<i64>::alloc(4);
//! unsafe {
//!     p.emplace(10);
//!     p.slot(1).emplace(20);
//!     assert_eq!(p.slot(1).take(), 20);
//!     assert_eq!(*p.as_ref(), 10);
//!     let _ = p.take();
//!     p.free();
//! }
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`ptr`] | `loam-ptr` | [`ptr::SlotPtr`], allocation providers, opt-in auditing |
//! | [`types`] | `loam-core` | [`types::Addr`], [`types::SlotLayout`], [`types::FaultKind`] |
//!
//! # Features
//!
//! - `audit` — record every allocation and per-slot occupancy in a
//!   process-wide registry and panic with the violated
//!   [`types::FaultKind`] instead of invoking undefined behavior. For
//!   instrumented test builds only; the default build carries no runtime
//!   state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Slot pointers and allocation providers (`loam-ptr`).
///
/// Most users only need [`ptr::SlotPtr`] and, when plugging in custom
/// memory management, [`ptr::AllocProvider`].
pub use loam_ptr as ptr;

/// Core vocabulary types (`loam-core`).
///
/// The integral address form [`types::Addr`], slot layout requests, and
/// the named fault taxonomy referenced by every unsafe operation's
/// contract.
pub use loam_core as types;

/// Common imports for typical Loam usage.
///
/// ```rust
/// use loam::prelude::*;
/// ```
pub mod prelude {
    pub use loam_core::{Addr, FaultKind, SlotLayout};
    pub use loam_ptr::{AllocProvider, GlobalProvider, SlotPtr};
}
