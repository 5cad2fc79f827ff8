extern crate buddy_tree;

use buddy_tree::Allocator;

#[test]
fn minimal() {
    let mut region = vec![0; 1 << 20];
    let mut alloc = Allocator::with_defaults(&mut region).unwrap();

    let a = alloc.allocate(&[1]).unwrap();
    let b = alloc.allocate(&[2]).unwrap();
    let c = alloc.allocate(&[3]).unwrap();

    assert_eq!(alloc.get(a), Some(&[1][..]));
    assert_eq!(alloc.get(b), Some(&[2][..]));
    assert_eq!(alloc.get(c), Some(&[3][..]));
}
