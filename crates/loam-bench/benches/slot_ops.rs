//! Criterion micro-benchmarks for slot pointer operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use loam_ptr::SlotPtr;
use rand::seq::SliceRandom;

/// Element type heavy enough that the relocation comparison is visible.
type Block = [u64; 8];

const SLOTS: usize = 1024;

/// Allocate `SLOTS` block slots and fill every one.
fn make_filled() -> SlotPtr<Block> {
    let p = SlotPtr::<Block>::alloc(SLOTS);
    // SAFETY: every slot is emplaced exactly once into fresh memory.
    unsafe {
        for i in 0..SLOTS {
            p.slot(i).emplace([i as u64; 8]);
        }
    }
    p
}

fn bench_alloc_free(c: &mut Criterion) {
    c.bench_function("alloc_free_64_u64", |b| {
        b.iter(|| {
            let p = SlotPtr::<u64>::alloc(black_box(64));
            // SAFETY: freshly allocated, freed exactly once per iteration.
            unsafe { p.free() };
            p
        });
    });
}

fn bench_emplace_take(c: &mut Criterion) {
    let p = SlotPtr::<u64>::alloc(1);
    c.bench_function("emplace_take_u64", |b| {
        b.iter(|| {
            // SAFETY: the slot alternates vacant/occupied within each
            // iteration, starting and ending vacant.
            unsafe {
                p.emplace(black_box(42));
                black_box(p.take())
            }
        });
    });
    // SAFETY: the slot is vacant after the last iteration; freed once.
    unsafe { p.free() };
}

/// Fused relocation against the equivalent two-step take + emplace.
///
/// Both variants shuttle every value from one buffer to the other and
/// back, so occupancy is restored between iterations.
fn bench_relocation(c: &mut Criterion) {
    let src = make_filled();
    let spare = SlotPtr::<Block>::alloc(SLOTS);

    c.bench_function("relocate_into_1024_blocks", |b| {
        b.iter(|| {
            // SAFETY: src slots are occupied and spare slots vacant at
            // entry; each pass inverts that, and the second pass
            // restores it.
            unsafe {
                for i in 0..SLOTS {
                    src.slot(i).relocate_into(spare.slot(i));
                }
                for i in 0..SLOTS {
                    spare.slot(i).relocate_into(src.slot(i));
                }
            }
        });
    });

    c.bench_function("take_emplace_1024_blocks", |b| {
        b.iter(|| {
            // SAFETY: same occupancy discipline as above, with the value
            // materialized on the stack in between.
            unsafe {
                for i in 0..SLOTS {
                    let v = src.slot(i).take();
                    spare.slot(i).emplace(v);
                }
                for i in 0..SLOTS {
                    let v = spare.slot(i).take();
                    src.slot(i).emplace(v);
                }
            }
        });
    });

    // SAFETY: each buffer is freed exactly once; leftover occupants are
    // plain arrays with no destructor.
    unsafe {
        src.free();
        spare.free();
    }
}

fn bench_offset_walk(c: &mut Criterion) {
    let p = make_filled();
    let mut order: Vec<usize> = (0..SLOTS).collect();
    order.shuffle(&mut rand::rng());

    c.bench_function("shuffled_offset_reads_1024", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            // SAFETY: every index is in range and every slot is occupied.
            unsafe {
                for &i in &order {
                    sum = sum.wrapping_add(p.get(i)[0]);
                }
            }
            black_box(sum)
        });
    });

    // SAFETY: freed exactly once; occupants have no destructor.
    unsafe { p.free() };
}

criterion_group!(
    benches,
    bench_alloc_free,
    bench_emplace_take,
    bench_relocation,
    bench_offset_walk
);
criterion_main!(benches);
