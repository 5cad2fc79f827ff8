//! Symbols and externs that `buddy_tree` depends on.
//!
//! This crate provides the platform side of the allocator: the compile-time defaults, mapping of
//! backing regions and a non-allocating log target. Only Unix-likes (Linux, BSD, Mac OS) are
//! supported.

#![no_std]
#![warn(missing_docs)]

pub mod config;
pub mod log;
pub mod syscalls;
