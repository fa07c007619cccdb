//! Test fixtures and instrumented providers for Loam development.
//!
//! Provides [`CountingProvider`], an [`AllocProvider`] wrapper that
//! counts allocate/free pairing, and the drop-tracking probes in
//! [`fixtures`] for verifying that relocation never clones or drops.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::atomic::{AtomicUsize, Ordering};

use loam_core::{Addr, SlotLayout};
use loam_ptr::{AllocProvider, GlobalProvider};

pub mod fixtures;

pub use fixtures::{DropTally, MoveProbe};

/// An allocation provider that counts calls and forwards to
/// [`GlobalProvider`].
///
/// Use in tests to assert that every allocation is released exactly once
/// and through the same provider it came from.
pub struct CountingProvider {
    inner: GlobalProvider,
    allocations: AtomicUsize,
    frees: AtomicUsize,
}

impl CountingProvider {
    pub fn new() -> Self {
        Self {
            inner: GlobalProvider,
            allocations: AtomicUsize::new(0),
            frees: AtomicUsize::new(0),
        }
    }

    /// Number of `aligned_allocate` calls observed.
    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::Relaxed)
    }

    /// Number of `aligned_free` calls observed.
    pub fn frees(&self) -> usize {
        self.frees.load(Ordering::Relaxed)
    }

    /// Allocations not yet freed.
    pub fn outstanding(&self) -> usize {
        self.allocations() - self.frees()
    }
}

impl Default for CountingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(unsafe_code)]
impl AllocProvider for CountingProvider {
    fn aligned_allocate(&self, layout: SlotLayout) -> Addr {
        self.allocations.fetch_add(1, Ordering::Relaxed);
        self.inner.aligned_allocate(layout)
    }

    unsafe fn aligned_free(&self, addr: Addr) {
        self.frees.fetch_add(1, Ordering::Relaxed);
        // SAFETY: same contract as the wrapped provider; `addr` came from
        // `aligned_allocate` above.
        unsafe { self.inner.aligned_free(addr) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting_provider_observes_pairing() {
        let provider = CountingProvider::new();
        let a = provider.aligned_allocate(SlotLayout::array::<u64>(4));
        let b = provider.aligned_allocate(SlotLayout::array::<u64>(4));
        assert_eq!(provider.allocations(), 2);
        assert_eq!(provider.outstanding(), 2);
        #[allow(unsafe_code)]
        // SAFETY: both addresses came from aligned_allocate, freed once each.
        unsafe {
            provider.aligned_free(a);
            provider.aligned_free(b);
        }
        assert_eq!(provider.frees(), 2);
        assert_eq!(provider.outstanding(), 0);
    }
}
