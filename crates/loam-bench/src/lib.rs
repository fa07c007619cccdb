//! Benchmark support for the Loam slot-pointer substrate.
//!
//! The crate exists to host the criterion benches under `benches/`;
//! see `slot_ops.rs` for the measured operation set.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
