//! System calls.

use core::ptr;

/// Map `size` bytes of fresh, zeroed, private memory. See `man mmap`.
///
/// On failure, `None` is returned.
pub fn map(size: usize) -> Option<*mut u8> {
    let ptr = unsafe {
        libc::mmap(
            ptr::null_mut(),
            size,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_PRIVATE | libc::MAP_ANON,
            -1,
            0,
        )
    };

    if ptr == libc::MAP_FAILED {
        None
    } else {
        Some(ptr as *mut u8)
    }
}

/// Unmap a segment previously returned by [`map`].
///
/// # Safety
///
/// `ptr` and `size` must describe exactly one live mapping obtained from [`map`], and no
/// reference into it may outlive this call.
pub unsafe fn unmap(ptr: *mut u8, size: usize) -> bool {
    libc::munmap(ptr as *mut libc::c_void, size) == 0
}

/// Write raw bytes to a file descriptor. See `man 2 write`.
///
/// Returns the number of bytes written, or `None` on failure.
pub fn write(fd: i32, buf: &[u8]) -> Option<usize> {
    let res = unsafe { libc::write(fd, buf.as_ptr() as *const libc::c_void, buf.len()) };

    if res < 0 {
        None
    } else {
        Some(res as usize)
    }
}
