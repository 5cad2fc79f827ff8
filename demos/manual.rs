extern crate buddy_tree;
extern crate log;

use buddy_tree::sys::Region;
use buddy_tree::{write, Allocator};

fn main() {
    write::init(log::LevelFilter::Trace).unwrap();

    let mut region = Region::reserve(1 << 20).unwrap();
    let mut alloc = Allocator::with_defaults(&mut region).unwrap();

    let small = alloc.allocate(&[0x22; 70000]).unwrap();
    let large = alloc.allocate(&[0x33; 500000]).unwrap();
    println!("{}", alloc.dump());

    // There is no room for this one.
    assert!(alloc.allocate(&[0x44; 600000]).is_err());

    alloc.release(small).unwrap();
    println!("{}", alloc.dump());

    let again = alloc.allocate(&[0x55; 400000]).unwrap();
    assert_eq!(alloc.get(again).unwrap()[399999], 0x55);
    assert_eq!(alloc.get(large).unwrap()[0], 0x33);

    alloc.release(large).unwrap();
    alloc.release(again).unwrap();
    println!("{}", alloc.dump());
}
