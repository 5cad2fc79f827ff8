use buddy_tree::{Allocator, Config};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Fill a deep tree with minimum blocks, and release them all, merging back up to the root.
fn bench_cascade(c: &mut Criterion) {
    let config = Config::new(64, 10).unwrap();
    let mut region = vec![0; config.region_size()];
    let mut alloc = Allocator::new(&mut region, config).unwrap();
    let mut addrs = Vec::with_capacity(1 << 10);

    c.bench_function("fill_and_merge_1024", |b| {
        b.iter(|| {
            for _ in 0..1 << 10 {
                addrs.push(alloc.allocate(black_box(&[0; 64])).unwrap());
            }
            for addr in addrs.drain(..) {
                alloc.release(addr).unwrap();
            }
        })
    });
}

criterion_group!(benches, bench_cascade);
criterion_main!(benches);
