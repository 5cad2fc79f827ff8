//! Configuration.
//!
//! This module contains anything which can be tweaked and customized to the users preferences.

/// The minimum block size, in bytes.
///
/// No block handed out by the buddy tree is ever smaller than this. It bounds the worst-case
/// internal fragmentation, together with the power-of-two rounding of the block sizes.
pub const MIN_BLOCK_SIZE: usize = 65536;
/// The default maximum order.
///
/// The root block holds `MIN_BLOCK_SIZE << MAX_ORDER` bytes (1 MiB with the defaults).
pub const MAX_ORDER: usize = 4;

/// The file descriptor logs are written to.
pub const LOG_TARGET: i32 = 2;
/// The size of the on-stack log line buffer.
///
/// Longer lines are truncated and suffixed with `...`.
pub const LOG_BUFFER_SIZE: usize = 240;
/// The minimum log level.
///
/// Levels are numbered from `0` (trace) to `4` (error).
pub const MIN_LOG_LEVEL: u8 = 0;
