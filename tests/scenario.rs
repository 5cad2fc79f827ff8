extern crate buddy_tree;

mod util;

use buddy_tree::sys::Region;
use buddy_tree::{Address, Allocator, Block, Error};

use util::{KIB, MIB};

#[test]
fn scenario() {
    let mut region = Region::reserve(MIB).unwrap();
    let mut alloc = Allocator::with_defaults(&mut region).unwrap();

    // 70000 bytes need a 128 KiB block, carved from the very left.
    let small = alloc.allocate(&util::pattern(70000, 1)).unwrap();
    assert_eq!(small, Address::new(0));
    assert_eq!(alloc.block(small), Some(Block::new(0, 128 * KIB)));

    // 500000 bytes need 512 KiB, which only the right half of the region offers.
    let large = alloc.allocate(&util::pattern(500000, 2)).unwrap();
    assert_eq!(large, Address::new(512 * KIB));
    assert_eq!(alloc.block(large), Some(Block::new(512 * KIB, 512 * KIB)));
    assert_eq!(alloc.occupied(), 570000);

    // Nothing is left that can hold 600000 bytes.
    assert_eq!(alloc.find_candidate(600000), None);
    assert_eq!(alloc.allocate(&vec![0; 600000]), Err(Error::OutOfSpace { size: 600000 }));
    assert_eq!(alloc.largest_free(), Some(Block::new(256 * KIB, 256 * KIB)));
    alloc.check();

    // Releasing the small block merges the left half back into one free block.
    assert_eq!(alloc.release(small), Ok(70000));
    assert_eq!(alloc.largest_free(), Some(Block::new(0, 512 * KIB)));
    assert_eq!(alloc.get(large), Some(&util::pattern(500000, 2)[..]));

    // ... which a new request of up to 512 KiB can use again.
    assert_eq!(alloc.find_candidate(400000), Some(Block::new(0, 512 * KIB)));
    let again = alloc.allocate(&util::pattern(400000, 3)).unwrap();
    assert_eq!(again, Address::new(0));
    assert_eq!(alloc.allocate(b"x"), Err(Error::OutOfSpace { size: 1 }));

    assert_eq!(alloc.release(large), Ok(500000));
    assert_eq!(alloc.release(again), Ok(400000));
    assert_eq!(alloc.largest_free(), Some(Block::new(0, MIB)));
    assert_eq!(alloc.occupied(), 0);
}

#[test]
fn scenario_dump() {
    let mut region = vec![0; MIB];
    let mut alloc = Allocator::with_defaults(&mut region).unwrap();

    alloc.allocate(&vec![0; 70000]).unwrap();
    alloc.allocate(&vec![0; 500000]).unwrap();

    assert_eq!(
        alloc.dump().to_string(),
        [
            "Order:4      3      2      1      0",
            "                       70000",
            "                    -",
            "                           0",
            "             -",
            "                    0",
            "      -",
            "        500000",
            "",
        ]
        .join("\n")
    );
}
