//! **buddy_tree:** a fixed-capacity buddy allocator.
//!
//! A caller-owned memory region is managed as a binary tree of power-of-two blocks. Blocks are
//! split on demand, handing out the smallest block which fits a request, and merged with their
//! buddy as soon as both are free. This bounds the internal fragmentation to less than a factor
//! of two, and the cost of every operation to the depth of the tree.
//!
//! ```
//! use buddy_tree::{Allocator, Error};
//!
//! let mut region = vec![0; 1 << 20];
//! let mut alloc = Allocator::with_defaults(&mut region).unwrap();
//!
//! let addr = alloc.allocate(b"hello").unwrap();
//! assert_eq!(alloc.get(addr), Some(&b"hello"[..]));
//!
//! assert_eq!(alloc.release(addr), Ok(5));
//! assert_eq!(alloc.release(addr), Err(Error::InvalidAddress { address: addr }));
//! ```

#![warn(missing_docs)]

mod allocator;
mod block;
mod config;
mod debug;
mod fail;
mod node;
pub mod sys;
pub mod write;

pub use allocator::Allocator;
pub use block::{Address, Block};
pub use config::Config;
pub use debug::Dump;
pub use fail::{Error, Result};
