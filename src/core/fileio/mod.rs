// src/core/fileio/mod.rs

//! Stateless forwarding of open/write/fsync/close to the OS

pub mod raw_file;

pub use raw_file::{OpenMode, RawHandle, close_fd, write_slice};
