//! Allocator logging.

use core::fmt::{self, Write};
use core::{cmp, mem};

use crate::{config, syscalls};

/// Write to the log.
///
/// This points to stderr, but could be changed arbitrarily. Nothing is allocated: the line is
/// formatted into a buffer on the stack and handed to the log target in a single `write`.
///
/// Returns `false` if the line was dropped because the log target refused it.
pub fn write(lv: u8, kind: &str, args: fmt::Arguments, file: &str, line: u32) -> bool {
    if lv < config::MIN_LOG_LEVEL {
        return true;
    }

    // The buffer. We add three extra slots reserved for overflows, plus one for the line feed. If
    // the buffer is filled, the dots tell the reader that there is more in this message. We start
    // out with all dots, so we don't have to set these up later on.
    let mut buffer = [b'.'; config::LOG_BUFFER_SIZE + 4];

    // The bytes of the buffer that are filled.
    let mut filled = {
        let mut writer = BufWriter {
            buffer: &mut buffer[..config::LOG_BUFFER_SIZE],
        };
        // The writer never fails, it truncates.
        let _ = write!(writer, "{:6} {} (@ {}:{})", kind, args, file, line);
        config::LOG_BUFFER_SIZE - writer.buffer.len()
    };

    // Keep the dots if the buffer was full.
    if filled == config::LOG_BUFFER_SIZE {
        filled += 3;
    }
    buffer[filled] = b'\n';
    filled += 1;

    syscalls::write(config::LOG_TARGET, &buffer[..filled]).is_some()
}

/// A logging buffer.
///
/// This simply keeps track of the buffer by maintaining a slice representing the remaining part of
/// the buffer.
struct BufWriter<'a> {
    /// A view into the remaining part of the buffer.
    buffer: &'a mut [u8],
}

impl<'a> fmt::Write for BufWriter<'a> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // Find the appropriate length of the copied subbuffer.
        let amt = cmp::min(s.len(), self.buffer.len());
        // Split the buffer.
        let (head, tail) = mem::take(&mut self.buffer).split_at_mut(amt);
        // Memcpy the content of the string.
        head.copy_from_slice(&s.as_bytes()[..amt]);
        self.buffer = tail;

        Ok(())
    }
}
