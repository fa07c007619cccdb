//! Unchecked owning slot pointers for container storage.
//!
//! This crate provides [`SlotPtr`], a single-word owning pointer over
//! `T`-sized slots, and the [`AllocProvider`] seam it allocates through.
//! It is the substrate that checked containers (dynamic arrays, hash
//! tables, arenas) build on: allocate, relocate, and release values of
//! any movable type without requiring that type to support copying.
//!
//! # Architecture
//!
//! ```text
//! SlotPtr<T> (single machine word, Copy, no destructor)
//! ├── AllocProvider (capability seam)
//! │   └── GlobalProvider (std::alloc + hidden size header)
//! └── audit registry (feature "audit": per-slot occupancy tracking)
//! ```
//!
//! # Safety
//!
//! This is the only crate in the Loam workspace that may contain `unsafe`
//! code. The pointer performs no bounds checking, no initialization
//! tracking, and no synchronization in release builds; every operation
//! documents its preconditions in terms of the
//! [`FaultKind`](loam_core::FaultKind) taxonomy, and violating one is
//! undefined behavior. The `audit` feature turns each category into a
//! deterministic panic for instrumented test runs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

#[cfg(feature = "audit")]
mod audit;
pub mod provider;
pub mod ptr;

pub use provider::{AllocProvider, GlobalProvider};
pub use ptr::SlotPtr;
