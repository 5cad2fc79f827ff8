//! Configuration.
//!
//! The geometry of a buddy tree is fixed when it is built: the minimum block size, and the
//! maximum order, which is the number of times the root block may be halved. Everything else
//! (capacities, offsets, the region size) follows from these two values.

use buddy_shim::config;

use crate::fail::{Error, Result};

/// The geometry of a buddy tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The size of an order 0 block, in bytes. Always a power of two.
    min_block_size: usize,
    /// The order of the root block.
    max_order: usize,
}

impl Config {
    /// Validate and create a configuration.
    ///
    /// The minimum block size must be a non-zero power of two, and the root block
    /// (`min_block_size << max_order` bytes) must fit the address space.
    pub fn new(min_block_size: usize, max_order: usize) -> Result<Config> {
        if !min_block_size.is_power_of_two() {
            return Err(Error::InvalidBlockSize {
                size: min_block_size,
            });
        }

        u32::try_from(max_order)
            .ok()
            .and_then(|order| 1usize.checked_shl(order))
            .and_then(|blocks| min_block_size.checked_mul(blocks))
            .ok_or(Error::OrderTooLarge { order: max_order })?;

        Ok(Config {
            min_block_size,
            max_order,
        })
    }

    /// The size of the smallest block.
    #[inline]
    pub const fn min_block_size(&self) -> usize {
        self.min_block_size
    }

    /// The order of the root block.
    #[inline]
    pub const fn max_order(&self) -> usize {
        self.max_order
    }

    /// The number of bytes managed by the tree, i.e. the size of the root block.
    #[inline]
    pub const fn region_size(&self) -> usize {
        self.size_for_order(self.max_order)
    }

    /// The capacity of a block of some order.
    ///
    /// Orders above the maximum order are meaningless, and may overflow.
    #[inline]
    pub const fn size_for_order(&self, order: usize) -> usize {
        self.min_block_size << order
    }

    /// The smallest order whose blocks can hold `bytes` bytes.
    ///
    /// This saturates at order 0, so any request up to the minimum block size (including empty
    /// ones) maps to the smallest block. The result may exceed the maximum order, in which case no
    /// block of the tree can hold the request.
    #[inline]
    pub fn order_for_size(&self, bytes: usize) -> usize {
        // The number of minimum blocks needed, rounded up to a power of two.
        bytes
            .div_ceil(self.min_block_size)
            .checked_next_power_of_two()
            .map_or(usize::BITS, usize::trailing_zeros) as usize
    }
}

impl Default for Config {
    /// 64 KiB blocks, order 4: a 1 MiB region.
    fn default() -> Config {
        Config {
            min_block_size: config::MIN_BLOCK_SIZE,
            max_order: config::MAX_ORDER,
        }
    }
}
