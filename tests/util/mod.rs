//! Test automation.

use buddy_tree::{Address, Allocator};

#[allow(dead_code)]
pub const KIB: usize = 1024;
#[allow(dead_code)]
pub const MIB: usize = 1024 * KIB;

/// A recognizable byte pattern of `len` bytes.
///
/// Different seeds give different patterns, so overlapping blocks corrupt each other visibly.
#[allow(dead_code)]
pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect()
}

/// Wrap a block in acid tests.
///
/// This allocates `data`, runs the closure, and then asserts that the data is still intact and
/// that the tree is consistent.
///
/// The basic idea is that if the allocator is broken, it might hand out the same memory twice,
/// or corrupt it when splitting and merging around it. Holding a live block through the closure
/// makes this visible.
#[allow(dead_code)]
pub fn acid<'a, F: FnOnce(&mut Allocator<'a>)>(
    alloc: &mut Allocator<'a>,
    data: &[u8],
    func: F,
) -> Address {
    let addr = alloc.allocate(data).unwrap();

    func(alloc);

    assert_eq!(alloc.get(addr), Some(data));
    alloc.check();

    addr
}
