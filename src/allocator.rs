//! The buddy allocator.
//!
//! This ties a borrowed memory region to the buddy tree describing it.

use crate::block::{Address, Block};
use crate::config::Config;
use crate::debug::{Dump, TreeLogger};
use crate::fail::{Error, Result};
use crate::node::Node;

/// A buddy allocator over a caller-owned region.
///
/// The region is split into power-of-two blocks on demand, and blocks are merged back as soon as
/// both buddies are free. Only making use of [`allocate`](#method.allocate) and
/// [`release`](#method.release) keeps the tree consistent; nothing here panics on caller errors.
///
/// The allocator borrows the region for its whole lifetime. It never frees or reallocates it:
/// that is left to the owner, once the allocator is gone.
///
/// Calls must be serialized by the caller. `&mut self` takes care of that within a thread;
/// sharing an allocator between threads needs an external lock.
pub struct Allocator<'a> {
    /// The geometry of the tree.
    config: Config,
    /// The backing region.
    ///
    /// This is at least as long as the root block, so every block of the tree is in bounds.
    region: &'a mut [u8],
    /// The root of the tree, covering the whole managed region.
    root: Node,
}

impl<'a> Allocator<'a> {
    /// Build an allocator managing the start of `region`.
    ///
    /// The tree starts out as a single free block of `config.region_size()` bytes. Any excess
    /// bytes of the region are left alone.
    pub fn new(region: &'a mut [u8], config: Config) -> Result<Allocator<'a>> {
        let needed = config.region_size();
        if region.len() < needed {
            return Err(Error::RegionTooSmall {
                needed,
                given: region.len(),
            });
        }

        log::debug!(
            "new buddy tree of 0x{:x} bytes ({} orders of 0x{:x} byte blocks)",
            needed,
            config.max_order() + 1,
            config.min_block_size()
        );

        Ok(Allocator {
            config,
            region,
            root: Node::new(Block::new(0, needed), config.max_order()),
        })
    }

    /// Build an allocator with the default configuration (1 MiB of 64 KiB blocks).
    pub fn with_defaults(region: &'a mut [u8]) -> Result<Allocator<'a>> {
        Allocator::new(region, Config::default())
    }

    /// The geometry of the tree.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The number of bytes managed.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.root.block().size()
    }

    /// The order of the blocks fitting `size` bytes.
    ///
    /// Empty requests, and requests larger than the whole tree, are rejected here, before any
    /// search takes place.
    fn order_for(&self, size: usize) -> Result<usize> {
        if size == 0 || size > self.capacity() {
            return Err(Error::DegenerateSize {
                size,
                capacity: self.capacity(),
            });
        }

        Ok(self.config.order_for_size(size))
    }

    /// The block an allocation of `size` bytes would be carved from.
    ///
    /// This is the left-most free block able to hold `size` bytes. It may be larger than the
    /// block [`allocate`](#method.allocate) eventually hands out, which splits it first.
    pub fn find_candidate(&self, size: usize) -> Option<Block> {
        let order = self.order_for(size).ok()?;

        self.root.find_candidate(order).map(Node::block)
    }

    /// Allocate a block, and copy `data` into it.
    ///
    /// The left-most free block able to hold the data is split until it is the smallest block
    /// doing so. The returned address stays valid until it is released.
    ///
    /// # Example
    ///
    /// We start with our initial segment, and ask for 70000 bytes (the minimum block is 64 KiB).
    ///
    /// ```text
    ///    Region
    ///   I---------------------------------------------------------------I
    /// ```
    ///
    /// Halving until the next halving would be too small leaves us with a 128 KiB block on the
    /// very left, and its three buddies.
    ///
    /// ```text
    ///    Region
    ///   I-------I-------I---------------I-------------------------------I
    ///    \_____/
    ///    our allocated block.
    /// ```
    pub fn allocate(&mut self, data: &[u8]) -> Result<Address> {
        let size = data.len();
        let order = self.order_for(size)?;

        let mut node = match self.root.find_candidate_mut(order) {
            Some(node) => node,
            None => {
                log::debug!("no free block holds {} bytes", size);
                return Err(Error::OutOfSpace { size });
            }
        };
        while node.order() > order {
            node = node.split();
        }

        let block = node.block();
        let span = node.occupy(size);
        self.region[span.range()].copy_from_slice(data);

        log::trace!(
            "{:?} : allocated {} bytes in {:?}",
            TreeLogger::new(&self.root).cursor(block.address()),
            size,
            block
        );
        self.debug_check();

        Ok(span.address())
    }

    /// Release the block at `address`.
    ///
    /// Buddies which both become free are merged, all the way up the tree. Returns the number of
    /// bytes the block held.
    ///
    /// An address which does not start an occupied block (one never handed out, or one released
    /// already) is rejected, leaving the tree untouched.
    pub fn release(&mut self, address: Address) -> Result<usize> {
        let span = match self.root.release(address) {
            Ok(span) => span,
            Err(err) => {
                log::warn!("{:?} : rejected release of {}", TreeLogger::new(&self.root), address);
                return Err(err);
            }
        };

        #[cfg(feature = "security")]
        self.region[span.range()].fill(0);

        log::trace!(
            "{:?} : released {} bytes at {}",
            TreeLogger::new(&self.root).cursor(address),
            span.size(),
            address
        );
        self.debug_check();

        Ok(span.size())
    }

    /// The data held by the block at `address`.
    pub fn get(&self, address: Address) -> Option<&[u8]> {
        let span = self.root.leaf(address)?.occupied()?;

        Some(&self.region[span.range()])
    }

    /// The data held by the block at `address`, mutably.
    pub fn get_mut(&mut self, address: Address) -> Option<&mut [u8]> {
        let span = self.root.leaf(address)?.occupied()?;

        Some(&mut self.region[span.range()])
    }

    /// The whole block allocated at `address`.
    pub fn block(&self, address: Address) -> Option<Block> {
        let leaf = self.root.leaf(address)?;

        leaf.occupied().map(|_| leaf.block())
    }

    /// A raw pointer to the data of the block at `address`.
    ///
    /// The pointer is valid while the region is, and until the block is released.
    pub fn as_ptr(&self, address: Address) -> Option<*const u8> {
        self.get(address).map(<[u8]>::as_ptr)
    }

    /// The number of bytes held by all blocks.
    pub fn occupied(&self) -> usize {
        self.root.total_used()
    }

    /// The left-most of the largest free blocks.
    pub fn largest_free(&self) -> Option<Block> {
        self.root.largest_free()
    }

    /// A printable dump of the tree.
    pub fn dump(&self) -> Dump<'_> {
        Dump::new(&self.root, self.config.max_order())
    }

    /// Perform consistency checks.
    ///
    /// This will check for the following conditions:
    ///
    /// 1. The root covers the whole managed region.
    /// 2. Every block has the capacity of its order, and the buddies of a split block are its
    ///    halves.
    /// 3. No two buddies are both free (they would have been merged).
    /// 4. No more bytes are held than there are in the region.
    ///
    /// # Panics
    ///
    /// Panics if any of these does not hold.
    pub fn check(&self) {
        assert_eq!(
            self.root.block(),
            Block::new(0, self.config.region_size()),
            "The root does not cover the region."
        );
        self.root.check(self.config.min_block_size());
        assert!(
            self.occupied() <= self.capacity(),
            "{} bytes are held in a region of {} bytes.",
            self.occupied(),
            self.capacity()
        );
    }

    /// Check consistency in debug builds.
    #[inline]
    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            self.check();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const KIB: usize = 1024;

    #[test]
    fn test_region_too_small() {
        let mut region = vec![0; 1000];

        assert_eq!(
            Allocator::with_defaults(&mut region).err(),
            Some(Error::RegionTooSmall {
                needed: 1 << 20,
                given: 1000
            })
        );
    }

    #[test]
    fn test_degenerate() {
        let mut region = vec![0; 1 << 20];
        let mut alloc = Allocator::with_defaults(&mut region).unwrap();

        assert_eq!(
            alloc.allocate(&[]),
            Err(Error::DegenerateSize {
                size: 0,
                capacity: 1 << 20
            })
        );
        assert_eq!(
            alloc.allocate(&vec![0; (1 << 20) + 1]),
            Err(Error::DegenerateSize {
                size: (1 << 20) + 1,
                capacity: 1 << 20
            })
        );
        assert_eq!(alloc.find_candidate(0), None);

        // Nothing was split.
        assert_eq!(alloc.largest_free(), Some(Block::new(0, 1 << 20)));
    }

    #[test]
    fn test_allocate() {
        let mut region = vec![0; 1 << 20];
        let mut alloc = Allocator::with_defaults(&mut region).unwrap();

        let a = alloc.allocate(b"Lorem ipsum").unwrap();
        assert_eq!(a, Address::new(0));
        assert_eq!(alloc.get(a), Some(&b"Lorem ipsum"[..]));
        assert_eq!(alloc.block(a), Some(Block::new(0, 64 * KIB)));
        assert_eq!(alloc.occupied(), 11);

        let b = alloc.allocate(b"dolor").unwrap();
        assert_eq!(b, Address::new(64 * KIB));

        alloc.get_mut(b).unwrap().copy_from_slice(b"DOLOR");
        assert_eq!(alloc.get(b), Some(&b"DOLOR"[..]));
        alloc.check();

        assert_eq!(alloc.release(a), Ok(11));
        assert_eq!(alloc.get(a), None);
        assert_eq!(alloc.release(b), Ok(5));
        assert_eq!(alloc.largest_free(), Some(Block::new(0, 1 << 20)));
    }

    #[test]
    fn test_larger_region() {
        let mut region = vec![0; 3 << 20];
        let mut alloc = Allocator::with_defaults(&mut region).unwrap();
        assert_eq!(alloc.capacity(), 1 << 20);

        alloc.allocate(&vec![1; 1 << 20]).unwrap();
        assert_eq!(
            alloc.allocate(b"x"),
            Err(Error::OutOfSpace { size: 1 })
        );
        drop(alloc);

        // The excess is untouched.
        assert!(region[1 << 20..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_as_ptr() {
        let mut region = vec![0; 1 << 20];
        let base = region.as_ptr() as usize;
        let mut alloc = Allocator::with_defaults(&mut region).unwrap();

        alloc.allocate(&[1; 100]).unwrap();
        let addr = alloc.allocate(&[2; 100]).unwrap();

        assert_eq!(alloc.as_ptr(addr), Some((base + 64 * KIB) as *const u8));
        assert_eq!(alloc.as_ptr(Address::new(128 * KIB)), None);
    }

    #[test]
    fn test_dump() {
        let mut region = vec![0; 1 << 20];
        let mut alloc = Allocator::with_defaults(&mut region).unwrap();
        alloc.allocate(&vec![0; 1 << 19]).unwrap();

        assert_eq!(
            alloc.dump().to_string(),
            "Order:4      3      2      1      0\n\
             \x20       524288\n\
             \x20     -\n\
             \x20            0\n"
        );
    }
}
