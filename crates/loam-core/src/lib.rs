//! Core types for the Loam slot-pointer substrate.
//!
//! This is the leaf crate with zero dependencies. It defines the
//! fundamental vocabulary used throughout the Loam workspace: the
//! integral address representation, slot layout requests, and the
//! named fault taxonomy for contract violations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod addr;
pub mod fault;
pub mod layout;

pub use addr::Addr;
pub use fault::FaultKind;
pub use layout::SlotLayout;
