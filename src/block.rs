//! Memory blocks.
//!
//! Blocks are the main unit for the buddy bookkeeping. A block is a simple construct with an
//! offset into the backing region and a size. The region itself is never touched here: a block
//! only describes which bytes of it a tree node covers.

use core::{fmt, ops};

/// An address handed out by the allocator.
///
/// This is an opaque offset from the start of the backing region. It is only meaningful to the
/// allocator which issued it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(usize);

impl Address {
    /// Create an address from a byte offset into the region.
    #[inline]
    pub const fn new(offset: usize) -> Address {
        Address(offset)
    }

    /// The byte offset from the start of the region.
    #[inline]
    pub const fn offset(self) -> usize {
        self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A contiguous span of the backing region.
///
/// This provides a number of guarantees, as long as blocks are only produced by the tree:
///
/// 1. No byte in a live leaf block is contained in another live leaf block.
/// 2. The block lies within the region. This is checked once, when the allocator is constructed.
///
/// Blocks order by their offset first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Block {
    /// The offset of the first byte of this block.
    offset: usize,
    /// The size of this block, in bytes.
    size: usize,
}

impl Block {
    /// Construct a block from its raw parts (offset and size).
    #[inline]
    pub const fn new(offset: usize, size: usize) -> Block {
        Block { offset, size }
    }

    /// The address of the start of this block.
    #[inline]
    pub const fn address(&self) -> Address {
        Address(self.offset)
    }

    /// Get the offset of the block.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Get the size of the block.
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The offset one past the last byte of the block.
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.size
    }

    /// Is this block empty?
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The byte range of the region covered by this block.
    #[inline]
    pub fn range(&self) -> ops::Range<usize> {
        self.offset..self.end()
    }

    /// Does this block cover the given address?
    #[inline]
    pub fn contains(&self, address: Address) -> bool {
        self.range().contains(&address.offset())
    }

    /// Is this block placed left to the given other block?
    #[inline]
    pub fn left_to(&self, to: &Block) -> bool {
        self.end() == to.offset
    }

    /// Split the block at some position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bound.
    #[inline]
    pub fn split(self, pos: usize) -> (Block, Block) {
        assert!(pos <= self.size, "Split {} out of bound (size is {})!", pos, self.size);

        (
            Block {
                offset: self.offset,
                size: pos,
            },
            Block {
                offset: self.offset + pos,
                size: self.size - pos,
            },
        )
    }

    /// Split this block into its two buddies.
    #[inline]
    pub fn halve(self) -> (Block, Block) {
        debug_assert!(self.size % 2 == 0, "Halving a block of odd size {}.", self.size);

        self.split(self.size / 2)
    }

    /// Merge this block with a block to the right.
    ///
    /// Returns `None` if the blocks are not adjacent.
    #[inline]
    pub fn merge_right(self, block: Block) -> Option<Block> {
        if self.left_to(&block) {
            Some(Block {
                offset: self.offset,
                size: self.size + block.size,
            })
        } else {
            None
        }
    }

    /// Are these two blocks buddies, with `self` on the left?
    ///
    /// Buddies have the same size, are adjacent, and the left one starts on a boundary of twice
    /// their size (relative to the region).
    #[inline]
    pub fn buddy_of(&self, right: &Block) -> bool {
        self.size == right.size
            && self.left_to(right)
            && self.size != 0
            && self.offset % (2 * self.size) == 0
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:x}[0x{:x}]", self.offset, self.size)
    }
}
