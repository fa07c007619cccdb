//! Runtime auditing of slot-pointer contracts (feature `audit`).
//!
//! A process-wide registry records every allocation made through
//! [`SlotPtr`](crate::ptr::SlotPtr) together with the occupancy of each
//! slot (`Vacant`/`Occupied`/`Moved`). Each pointer operation consults
//! the registry before touching memory and panics with the violated
//! [`FaultKind`] instead of invoking undefined behavior.
//!
//! The registry assumes a closed world: every audited pointer must come
//! from `alloc`/`alloc_in`. Freed records are retained as tombstones so
//! a use-after-free is distinguishable from a wild address; the table
//! therefore grows for the life of the process, which is acceptable for
//! an instrumented test build. Zero-sized element types are exempt:
//! slot arithmetic is meaningless at size zero.

use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use loam_core::{Addr, FaultKind};

/// Occupancy of a single tracked slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotState {
    /// Never held a value.
    Vacant,
    /// Currently holds a value.
    Occupied,
    /// Held a value that was moved out and not re-emplaced.
    Moved,
}

/// Bookkeeping for one provider allocation.
struct Allocation {
    elem_size: usize,
    slots: Vec<SlotState>,
    live: bool,
}

impl Allocation {
    fn extent(&self) -> usize {
        self.elem_size * self.slots.len()
    }

    fn contains(&self, base: usize, addr: usize) -> bool {
        addr >= base && addr - base < self.extent()
    }
}

struct Registry {
    allocations: IndexMap<usize, Allocation>,
}

static REGISTRY: LazyLock<Mutex<Registry>> = LazyLock::new(|| {
    Mutex::new(Registry {
        allocations: IndexMap::new(),
    })
});

/// Faults panic while the lock is held; later operations in the same
/// process (other tests) still need a usable registry, so poisoning is
/// ignored.
fn lock() -> MutexGuard<'static, Registry> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

fn fault(kind: FaultKind, addr: Addr) -> ! {
    panic!("slot pointer fault: {kind} at {addr}");
}

/// Find the live allocation governing `addr` and the slot index within
/// it, faulting with the appropriate category otherwise.
fn resolve_slot(reg: &mut Registry, addr: Addr) -> (&mut Allocation, usize) {
    if addr.is_null() {
        fault(FaultKind::NullDereference, addr);
    }
    let a = addr.get();
    let live_base = reg
        .allocations
        .iter()
        .find(|(base, alloc)| alloc.live && alloc.contains(**base, a))
        .map(|(base, _)| *base);
    let Some(base) = live_base else {
        let freed = reg
            .allocations
            .iter()
            .any(|(base, alloc)| !alloc.live && alloc.contains(*base, a));
        if freed {
            fault(FaultKind::UseAfterFree, addr);
        }
        fault(FaultKind::OutOfRangeOffset, addr);
    };
    let alloc = reg
        .allocations
        .get_mut(&base)
        .expect("allocation found above");
    let offset = a - base;
    if offset % alloc.elem_size != 0 {
        fault(FaultKind::OutOfRangeOffset, addr);
    }
    let index = offset / alloc.elem_size;
    (alloc, index)
}

pub(crate) fn on_alloc(addr: Addr, elem_size: usize, count: usize) {
    if elem_size == 0 {
        return;
    }
    let mut reg = lock();
    // Address reuse after a free replaces the stale tombstone.
    reg.allocations.insert(
        addr.get(),
        Allocation {
            elem_size,
            slots: vec![SlotState::Vacant; count],
            live: true,
        },
    );
}

pub(crate) fn on_free(addr: Addr, elem_size: usize) {
    if elem_size == 0 {
        return;
    }
    if addr.is_null() {
        fault(FaultKind::NullDereference, addr);
    }
    let mut reg = lock();
    match reg.allocations.get_mut(&addr.get()) {
        Some(alloc) if alloc.live => alloc.live = false,
        Some(_) => fault(FaultKind::DoubleFree, addr),
        None => fault(FaultKind::OutOfRangeOffset, addr),
    }
}

pub(crate) fn on_emplace(addr: Addr, elem_size: usize) {
    if elem_size == 0 {
        return;
    }
    let mut reg = lock();
    let (alloc, index) = resolve_slot(&mut reg, addr);
    match alloc.slots[index] {
        SlotState::Occupied => fault(FaultKind::OverwriteWithoutRelease, addr),
        _ => alloc.slots[index] = SlotState::Occupied,
    }
}

pub(crate) fn on_take(addr: Addr, elem_size: usize) {
    if elem_size == 0 {
        return;
    }
    let mut reg = lock();
    let (alloc, index) = resolve_slot(&mut reg, addr);
    match alloc.slots[index] {
        SlotState::Occupied => alloc.slots[index] = SlotState::Moved,
        SlotState::Moved => fault(FaultKind::DoubleMove, addr),
        SlotState::Vacant => fault(FaultKind::UninitializedRead, addr),
    }
}

pub(crate) fn on_read(addr: Addr, elem_size: usize) {
    if elem_size == 0 {
        return;
    }
    let mut reg = lock();
    let (alloc, index) = resolve_slot(&mut reg, addr);
    match alloc.slots[index] {
        SlotState::Occupied => {}
        SlotState::Moved => fault(FaultKind::DoubleMove, addr),
        SlotState::Vacant => fault(FaultKind::UninitializedRead, addr),
    }
}
