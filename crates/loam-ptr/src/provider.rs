//! Allocation providers: the raw-memory capability behind [`SlotPtr`].
//!
//! A provider hands out aligned byte ranges by address and takes them back
//! by address alone. [`GlobalProvider`] is the default implementation over
//! the process global allocator; callers embedding Loam in a runtime with
//! its own memory management implement [`AllocProvider`] themselves.
//!
//! [`SlotPtr`]: crate::ptr::SlotPtr

use std::alloc::{self, Layout};
use std::mem;
use std::ptr;

use loam_core::{Addr, SlotLayout};

/// Aligned raw-memory allocation, consumed by [`SlotPtr`].
///
/// Returned addresses must be aligned to `layout.align()`, valid for
/// `layout.size()` bytes, and have their provenance exposed so that
/// `SlotPtr` can reconstitute them as pointers.
///
/// Exhaustion is not a reportable condition at this layer: a provider
/// must diverge (abort or panic) rather than return [`Addr::NULL`].
///
/// [`SlotPtr`]: crate::ptr::SlotPtr
pub trait AllocProvider {
    /// Allocate a byte range satisfying `layout`.
    ///
    /// A zero-size layout is a valid request and must still return a
    /// unique, freeable address.
    fn aligned_allocate(&self, layout: SlotLayout) -> Addr;

    /// Release the range previously returned by
    /// [`aligned_allocate`](AllocProvider::aligned_allocate).
    ///
    /// # Safety
    ///
    /// `addr` must have come from `aligned_allocate` on this provider and
    /// must not have been freed already. The entire range becomes invalid;
    /// no pointer derived from it may be used afterwards.
    unsafe fn aligned_free(&self, addr: Addr);
}

/// Hidden bookkeeping stored immediately before each returned range.
///
/// `aligned_free` receives only an address, so the heap layout needed by
/// `dealloc` travels in-band. Written and read unaligned: the data
/// alignment may be smaller than the header's.
struct Header {
    base: *mut u8,
    layout: Layout,
}

/// Distance from the heap base to the data address: the header rounded
/// up to the data alignment, so the data lands on an aligned boundary.
fn header_offset(align: usize) -> usize {
    mem::size_of::<Header>().next_multiple_of(align)
}

/// Allocation provider backed by the process global allocator.
///
/// Each range is prefixed by a [`Header`] recording the heap base pointer
/// and full layout, so the range can be released from the data address
/// alone. Allocation failure aborts via [`alloc::handle_alloc_error`];
/// null is never returned.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlobalProvider;

impl AllocProvider for GlobalProvider {
    fn aligned_allocate(&self, slots: SlotLayout) -> Addr {
        let offset = header_offset(slots.align());
        let total = offset
            .checked_add(slots.size())
            .expect("allocation byte size overflows usize");
        let layout = Layout::from_size_align(total, slots.align())
            .expect("allocation size exceeds isize::MAX");

        // SAFETY: `total` includes the header, so the layout size is non-zero.
        let base = unsafe { alloc::alloc(layout) };
        if base.is_null() {
            alloc::handle_alloc_error(layout);
        }

        // SAFETY: `offset < total`, so the data pointer stays in-bounds.
        let data = unsafe { base.add(offset) };
        let header = Header { base, layout };
        // SAFETY: `offset >= size_of::<Header>()`, so the header slot lies
        // inside the allocation, immediately before the data.
        unsafe {
            data.sub(mem::size_of::<Header>())
                .cast::<Header>()
                .write_unaligned(header);
        }
        Addr(data.expose_provenance())
    }

    unsafe fn aligned_free(&self, addr: Addr) {
        debug_assert!(!addr.is_null(), "freeing the null address");
        let data: *mut u8 = ptr::with_exposed_provenance_mut(addr.get());
        // SAFETY: `addr` came from `aligned_allocate`, so a header precedes
        // the data pointer.
        let header = unsafe {
            data.sub(mem::size_of::<Header>())
                .cast::<Header>()
                .read_unaligned()
        };
        // SAFETY: `base` and `layout` are the exact pair given to `alloc`.
        unsafe { alloc::dealloc(header.base, header.layout) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alloc_free_round_trip(layout: SlotLayout) -> Addr {
        let provider = GlobalProvider;
        let addr = provider.aligned_allocate(layout);
        assert!(!addr.is_null());
        assert_eq!(addr.get() % layout.align(), 0);
        // SAFETY: addr came from aligned_allocate above, freed exactly once.
        unsafe { provider.aligned_free(addr) };
        addr
    }

    #[test]
    fn returns_aligned_non_null_addresses() {
        for align in [1usize, 2, 8, 64, 256, 4096] {
            alloc_free_round_trip(SlotLayout::from_size_align(24, align));
        }
    }

    #[test]
    fn zero_size_request_is_freeable() {
        alloc_free_round_trip(SlotLayout::from_size_align(0, 8));
    }

    #[test]
    fn range_is_writable_and_readable() {
        let provider = GlobalProvider;
        let addr = provider.aligned_allocate(SlotLayout::array::<u8>(64));
        let data: *mut u8 = ptr::with_exposed_provenance_mut(addr.get());
        // SAFETY: the range is 64 writable bytes starting at `data`.
        unsafe {
            for i in 0..64 {
                data.add(i).write(i as u8);
            }
            for i in 0..64 {
                assert_eq!(data.add(i).read(), i as u8);
            }
        }
        // SAFETY: freed exactly once.
        unsafe { provider.aligned_free(addr) };
    }

    #[test]
    fn distinct_allocations_do_not_alias() {
        let provider = GlobalProvider;
        let layout = SlotLayout::array::<u64>(8);
        let a = provider.aligned_allocate(layout);
        let b = provider.aligned_allocate(layout);
        let lo = a.get().min(b.get());
        let hi = a.get().max(b.get());
        assert!(hi - lo >= layout.size());
        // SAFETY: both came from aligned_allocate, each freed once.
        unsafe {
            provider.aligned_free(a);
            provider.aligned_free(b);
        }
    }
}
