//! The owning slot pointer.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ptr;

use loam_core::{Addr, SlotLayout};

#[cfg(feature = "audit")]
use crate::audit;
use crate::provider::{AllocProvider, GlobalProvider};

/// An unchecked owning pointer to `T`-sized slots.
///
/// A `SlotPtr` is a single machine word: copying the handle copies an
/// address, never the pointee. It is either null or the start of a
/// provider-returned range holding a whole number of `T` slots aligned
/// to `T`'s requirement. Each slot has a logical occupancy (vacant or
/// holding a value) that the caller tracks; the handle carries no
/// runtime state and no destructor, so releasing the backing memory is
/// always an explicit [`free`](SlotPtr::free).
///
/// `T` only needs to be movable, which every sized Rust type is. No
/// `Clone` or `Copy` bound appears anywhere in the API.
///
/// # Contract
///
/// The unsafe operations below state their preconditions in terms of the
/// [`FaultKind`](loam_core::FaultKind) categories. None of them are
/// checked at runtime in release builds; a violation is undefined
/// behavior, full stop. Checked containers sit above this type and are
/// responsible for upholding the contract. Builds with the `audit`
/// feature turn every category into a deterministic panic; under that
/// feature all pointers must originate from [`alloc`](SlotPtr::alloc) or
/// [`alloc_in`](SlotPtr::alloc_in) so the registry knows their ranges.
#[repr(transparent)]
#[must_use]
pub struct SlotPtr<T> {
    raw: *mut T,
}

impl<T> SlotPtr<T> {
    /// The null pointer.
    pub const fn null() -> Self {
        Self {
            raw: ptr::null_mut(),
        }
    }

    /// Whether this pointer is the null sentinel.
    pub fn is_null(self) -> bool {
        self.raw.is_null()
    }

    /// Allocate `count` uninitialized slots from the global provider.
    ///
    /// Returns a non-null pointer; exhaustion aborts rather than
    /// reporting. `count == 0` is valid and yields a freeable pointer
    /// with no addressable slots.
    pub fn alloc(count: usize) -> Self {
        Self::alloc_in(&GlobalProvider, count)
    }

    /// Allocate `count` uninitialized slots from `provider`.
    pub fn alloc_in<P: AllocProvider>(provider: &P, count: usize) -> Self {
        let addr = provider.aligned_allocate(SlotLayout::array::<T>(count));
        #[cfg(feature = "audit")]
        audit::on_alloc(addr, std::mem::size_of::<T>(), count);
        Self::from_addr(addr)
    }

    /// Release the whole backing allocation via the global provider.
    ///
    /// Slot contents are not dropped; values still occupying slots are
    /// leaked. The pointer and every pointer derived from it dangle
    /// afterwards.
    ///
    /// # Safety
    ///
    /// The pointer must have come from [`alloc`](SlotPtr::alloc) and not
    /// have been freed already (`DoubleFree`). No derived pointer may be
    /// used afterwards (`UseAfterFree`).
    pub unsafe fn free(self) {
        // SAFETY: upheld by the caller; alloc() allocates from GlobalProvider.
        unsafe { self.free_in(&GlobalProvider) }
    }

    /// Release the whole backing allocation via `provider`.
    ///
    /// # Safety
    ///
    /// As [`free`](SlotPtr::free), and `provider` must be the provider
    /// the pointer was allocated from.
    pub unsafe fn free_in<P: AllocProvider>(self, provider: &P) {
        #[cfg(feature = "audit")]
        audit::on_free(self.addr(), std::mem::size_of::<T>());
        // SAFETY: upheld by the caller.
        unsafe { provider.aligned_free(self.addr()) }
    }

    /// Move `value` into the slot, taking ownership.
    ///
    /// The prior bytes are overwritten without running a destructor;
    /// there must not be a live value there.
    ///
    /// # Safety
    ///
    /// The pointer must be non-null (`NullDereference`), address a slot
    /// inside a live allocation (`UseAfterFree`, `OutOfRangeOffset`),
    /// and the slot must be vacant (`OverwriteWithoutRelease`).
    pub unsafe fn emplace(self, value: T) {
        debug_assert!(!self.is_null(), "emplace through a null slot pointer");
        #[cfg(feature = "audit")]
        audit::on_emplace(self.addr(), std::mem::size_of::<T>());
        // SAFETY: upheld by the caller.
        unsafe { self.raw.write(value) }
    }

    /// Move the slot's value out, leaving the slot vacant.
    ///
    /// # Safety
    ///
    /// The pointer must be non-null and in a live allocation, and the
    /// slot must hold a value (`UninitializedRead`). Taking again without
    /// an intervening [`emplace`](SlotPtr::emplace) is a `DoubleMove`.
    pub unsafe fn take(self) -> T {
        debug_assert!(!self.is_null(), "take through a null slot pointer");
        #[cfg(feature = "audit")]
        audit::on_take(self.addr(), std::mem::size_of::<T>());
        // SAFETY: upheld by the caller.
        unsafe { self.raw.read() }
    }

    /// Relocate the value from this slot directly into `dest`'s slot.
    ///
    /// Exactly one bitwise move: this slot becomes vacant, `dest` becomes
    /// occupied, and `dest`'s prior bytes are overwritten without running
    /// a destructor. Equivalent to `dest.emplace(self.take())` but never
    /// materializes the value in between, which matters when `T`'s move
    /// is not free to repeat.
    ///
    /// # Safety
    ///
    /// Both pointers must be non-null and address distinct slots in live
    /// allocations. This slot must be occupied (`UninitializedRead` /
    /// `DoubleMove`) and `dest` vacant (`OverwriteWithoutRelease`).
    pub unsafe fn relocate_into(self, dest: SlotPtr<T>) {
        debug_assert!(!self.is_null(), "relocate from a null slot pointer");
        debug_assert!(!dest.is_null(), "relocate into a null slot pointer");
        #[cfg(feature = "audit")]
        {
            audit::on_take(self.addr(), std::mem::size_of::<T>());
            audit::on_emplace(dest.addr(), std::mem::size_of::<T>());
        }
        // SAFETY: the slots are distinct, so the ranges do not overlap.
        unsafe { ptr::copy_nonoverlapping(self.raw, dest.raw, 1) }
    }

    /// The pointer `count` slots away.
    ///
    /// Wrapping arithmetic, no bounds check: computing any offset is
    /// fine; dereferencing a result outside the governing allocation is
    /// an `OutOfRangeOffset` violation.
    pub fn offset(self, count: isize) -> Self {
        Self {
            raw: self.raw.wrapping_offset(count),
        }
    }

    /// The pointer to slot `index`. Shorthand for a forward offset.
    pub fn slot(self, index: usize) -> Self {
        self.offset(index as isize)
    }

    /// Borrow the slot's value.
    ///
    /// The caller chooses `'a`; nothing ties it to the allocation. The
    /// reference is an alias, not a new owner: the slot stays occupied.
    ///
    /// # Safety
    ///
    /// The slot must be occupied and stay valid (not freed, taken, or
    /// aliased mutably) for the whole of `'a`.
    pub unsafe fn as_ref<'a>(self) -> &'a T {
        debug_assert!(!self.is_null(), "dereferencing a null slot pointer");
        #[cfg(feature = "audit")]
        audit::on_read(self.addr(), std::mem::size_of::<T>());
        // SAFETY: upheld by the caller.
        unsafe { &*self.raw }
    }

    /// Borrow the slot's value mutably.
    ///
    /// # Safety
    ///
    /// As [`as_ref`](SlotPtr::as_ref), and the reference must be the only
    /// live alias for the whole of `'a`.
    pub unsafe fn as_mut<'a>(self) -> &'a mut T {
        debug_assert!(!self.is_null(), "dereferencing a null slot pointer");
        #[cfg(feature = "audit")]
        audit::on_read(self.addr(), std::mem::size_of::<T>());
        // SAFETY: upheld by the caller.
        unsafe { &mut *self.raw }
    }

    /// Borrow the value in slot `index`.
    ///
    /// # Safety
    ///
    /// As [`as_ref`](SlotPtr::as_ref), for the slot at `index`.
    pub unsafe fn get<'a>(self, index: usize) -> &'a T {
        // SAFETY: upheld by the caller.
        unsafe { self.slot(index).as_ref() }
    }

    /// Borrow the value in slot `index` mutably.
    ///
    /// # Safety
    ///
    /// As [`as_mut`](SlotPtr::as_mut), for the slot at `index`.
    pub unsafe fn get_mut<'a>(self, index: usize) -> &'a mut T {
        // SAFETY: upheld by the caller.
        unsafe { self.slot(index).as_mut() }
    }

    /// The integral address of this pointer. Exact round trip with
    /// [`from_addr`](SlotPtr::from_addr).
    pub fn addr(self) -> Addr {
        Addr(self.raw.expose_provenance())
    }

    /// Reconstitute a pointer from an address produced by
    /// [`addr`](SlotPtr::addr) (or by an allocation provider).
    pub fn from_addr(addr: Addr) -> Self {
        Self {
            raw: ptr::with_exposed_provenance_mut(addr.get()),
        }
    }

    /// The underlying raw pointer.
    pub fn as_ptr(self) -> *mut T {
        self.raw
    }

    /// Wrap an existing raw pointer.
    ///
    /// The usual invariants apply to any later use: the pointer must
    /// address `T`-aligned slots in a live allocation. Incompatible with
    /// the `audit` feature, which only knows provider-backed ranges.
    pub fn from_raw(raw: *mut T) -> Self {
        Self { raw }
    }
}

// A SlotPtr owns the slots it addresses the way a container owns its
// buffer: transferring the handle across threads transfers the pointee.
// SAFETY: no shared state beyond the pointee itself; the bounds below
// delegate the question to `T`.
unsafe impl<T: Send> Send for SlotPtr<T> {}
// SAFETY: sharing the handle only shares the address; `&SlotPtr<T>`
// grants access to `T` no wider than `&T` would.
unsafe impl<T: Sync> Sync for SlotPtr<T> {}

// Manual impls: the handle is Copy and comparable regardless of `T`.
impl<T> Clone for SlotPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SlotPtr<T> {}

impl<T> Default for SlotPtr<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> PartialEq for SlotPtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for SlotPtr<T> {}

impl<T> PartialOrd for SlotPtr<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for SlotPtr<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T> Hash for SlotPtr<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> fmt::Debug for SlotPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SlotPtr").field(&self.raw).finish()
    }
}

impl<T> fmt::Display for SlotPtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotPtr({:p})", self.raw)
    }
}
