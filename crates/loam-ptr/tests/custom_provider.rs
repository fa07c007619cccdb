//! Integration test for allocating through a custom [`AllocProvider`].
//!
//! This lives here rather than in a `#[cfg(test)]` module inside the crate
//! because `CountingProvider` comes from `loam-test-utils`, which depends on
//! `loam-ptr`. A unit test would compile a second instance of `loam-ptr`,
//! so `CountingProvider`'s `AllocProvider` impl (against the plain lib) would
//! not satisfy the bound seen by the test. An integration test links against
//! the same lib instance and avoids the mismatch.

use loam_ptr::SlotPtr;
use loam_test_utils::CountingProvider;

#[test]
fn custom_provider_sees_paired_calls() {
    let provider = CountingProvider::new();
    let p = SlotPtr::<u64>::alloc_in(&provider, 8);
    // SAFETY: occupancy alternates on slot 0; freed once via the
    // same provider.
    unsafe {
        p.emplace(99);
        assert_eq!(p.take(), 99);
        p.free_in(&provider);
    }
    assert_eq!(provider.allocations(), 1);
    assert_eq!(provider.frees(), 1);
}
