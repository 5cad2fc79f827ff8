//! System primitives.
//!
//! The allocator never owns the memory it manages. A [`Region`] is one way for a caller to own
//! it: a private anonymous mapping, returned to the system when the region is dropped.

use buddy_shim::syscalls;

use core::ops::{Deref, DerefMut};
use core::ptr::NonNull;
use core::slice;

use crate::fail::{Error, Result};

/// An owned, zero-initialized memory region, mapped from the system.
pub struct Region {
    /// The start of the mapping.
    ptr: NonNull<u8>,
    /// The length of the mapping, in bytes.
    size: usize,
}

impl Region {
    /// Map a region of `size` bytes.
    ///
    /// Empty regions cannot be mapped.
    pub fn reserve(size: usize) -> Result<Region> {
        if size == 0 {
            return Err(Error::Reserve { size });
        }

        let ptr = syscalls::map(size)
            .and_then(NonNull::new)
            .ok_or(Error::Reserve { size })?;
        log::debug!("reserved region of 0x{:x} bytes at {:p}", size, ptr);

        Ok(Region { ptr, size })
    }
}

impl Deref for Region {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        // The mapping is readable, initialized, and lives as long as `self`.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.size) }
    }
}

impl DerefMut for Region {
    fn deref_mut(&mut self) -> &mut [u8] {
        // As above, and `&mut self` makes the access unique.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.size) }
    }
}

impl Drop for Region {
    fn drop(&mut self) {
        // No borrow of the mapping can outlive `self`.
        let unmapped = unsafe { syscalls::unmap(self.ptr.as_ptr(), self.size) };
        if !unmapped {
            log::warn!("failed to unmap region of 0x{:x} bytes at {:p}", self.size, self.ptr);
        }
    }
}
