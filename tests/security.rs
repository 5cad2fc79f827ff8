#![cfg(feature = "security")]

extern crate buddy_tree;

mod util;

use buddy_tree::Allocator;

use util::{KIB, MIB};

#[test]
fn zero_on_release() {
    let mut region = vec![0; MIB];

    {
        let mut alloc = Allocator::with_defaults(&mut region).unwrap();
        let secret = alloc.allocate(&[0x42; 1000]).unwrap();
        let kept = alloc.allocate(&[0x17; 1000]).unwrap();

        alloc.release(secret).unwrap();
        assert_eq!(alloc.get(kept), Some(&[0x17; 1000][..]));
    }

    assert!(region[..64 * KIB].iter().all(|&b| b == 0));
    assert!(region[64 * KIB..64 * KIB + 1000].iter().all(|&b| b == 0x17));
}
