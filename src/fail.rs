//! General error handling.
//!
//! None of these are fatal. Out-of-space and invalid-address conditions are plain values the
//! caller may act on (retry with a smaller request, report a bug at the call site), and a failed
//! operation never leaves the tree partially mutated.

use thiserror::Error;

use crate::block::Address;

/// The result type of this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// An allocator error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// No free block is large enough to hold the request.
    #[error("out of space (no free block can hold {size} bytes)")]
    OutOfSpace {
        /// The requested size.
        size: usize,
    },
    /// The address does not start an occupied block.
    ///
    /// This covers double frees, addresses which were never handed out, and addresses foreign to
    /// the region.
    #[error("address {address} is not an occupied block")]
    InvalidAddress {
        /// The rejected address.
        address: Address,
    },
    /// The request size maps to no valid order.
    ///
    /// This is either an empty request or one exceeding the whole region.
    #[error("cannot allocate {size} bytes (capacity is {capacity} bytes)")]
    DegenerateSize {
        /// The requested size.
        size: usize,
        /// The capacity of the root block.
        capacity: usize,
    },
    /// The backing region is shorter than the configuration requires.
    #[error("region of {given} bytes is too small (need {needed} bytes)")]
    RegionTooSmall {
        /// The size of the root block.
        needed: usize,
        /// The length of the region given.
        given: usize,
    },
    /// The minimum block size is zero or not a power of two.
    #[error("minimum block size {size} is not a non-zero power of two")]
    InvalidBlockSize {
        /// The rejected block size.
        size: usize,
    },
    /// The root block size overflows the address space.
    #[error("maximum order {order} overflows the address space")]
    OrderTooLarge {
        /// The rejected order.
        order: usize,
    },
    /// The system refused to map a backing region.
    #[error("failed to reserve a region of {size} bytes")]
    Reserve {
        /// The size of the region.
        size: usize,
    },
}
