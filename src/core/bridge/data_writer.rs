// src/core/bridge/data_writer.rs

//! Raw file descriptor entry points.
//!
//! Descriptors cross this boundary as bare `i32`s and every failure comes
//! back as `-1` after being logged.

use crate::core::fileio::{OpenMode, RawHandle, close_fd, write_slice};
use anyhow::{Context, Result, bail};
use std::fs::File;
use std::mem::ManuallyDrop;
use std::os::fd::{FromRawFd, RawFd};
use tracing::error;

// Open for append (`mode == 0`) or truncate (anything else); `-1` on failure
pub fn open_file(path: Option<&str>, mode: i32) -> i32 {
    let Some(path) = path else {
        return -1;
    };
    match RawHandle::open(path, OpenMode::from_code(mode)) {
        Ok(handle) => handle.into_raw_fd(),
        Err(e) => {
            error!(path, "Failed to open file: {e:#}");
            -1
        }
    }
}

// One write of `length` bytes from `data[offset..]`; short counts pass through
pub fn write_file(fd: i32, data: Option<&[u8]>, offset: i32, length: i32) -> i32 {
    let Some(data) = data else {
        return -1;
    };
    if fd < 0 {
        return -1;
    }
    let result = range(offset, length).and_then(|(offset, length)| {
        let mut file = borrow_fd(fd);
        write_slice(&mut *file, data, offset, length)
    });
    match result {
        // never exceeds `length`, which came in as an i32
        Ok(written) => written as i32,
        Err(e) => {
            error!(fd, "Write failed: {e:#}");
            -1
        }
    }
}

// fsync(2); `0` on success
pub fn sync_file(fd: i32) -> i32 {
    if fd < 0 {
        return -1;
    }
    let file = borrow_fd(fd);
    match file.sync_all().with_context(|| format!("fsync on fd {fd}")) {
        Ok(()) => 0,
        Err(e) => {
            error!(fd, "Sync failed: {e:#}");
            -1
        }
    }
}

// close(2); `0` on success
pub fn close_file(fd: i32) -> i32 {
    if fd < 0 {
        return -1;
    }
    match close_fd(fd) {
        Ok(()) => 0,
        Err(e) => {
            error!(fd, "Close failed: {e:#}");
            -1
        }
    }
}

fn range(offset: i32, length: i32) -> Result<(usize, usize)> {
    if offset < 0 || length < 0 {
        bail!("Negative range: offset {offset}, length {length}");
    }
    Ok((offset as usize, length as usize))
}

// View a caller-owned descriptor as a `File` without taking ownership of it
fn borrow_fd(fd: RawFd) -> ManuallyDrop<File> {
    // SAFETY: the caller keeps ownership; ManuallyDrop stops us closing it.
    ManuallyDrop::new(unsafe { File::from_raw_fd(fd) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn rejects_negative_descriptors() {
        assert_eq!(write_file(-1, Some(b"abc"), 0, 3), -1);
        assert_eq!(sync_file(-1), -1);
        assert_eq!(close_file(-1), -1);
    }

    #[test]
    fn rejects_missing_inputs() {
        assert_eq!(open_file(None, 0), -1);
        assert_eq!(open_file(Some(""), 0), -1);
        assert_eq!(write_file(0, None, 0, 0), -1);
    }

    #[test]
    fn rejects_bad_ranges() {
        let td = TempDir::new().unwrap();
        let path = td.path().join("range.log");
        let fd = open_file(path.to_str(), 1);
        assert!(fd >= 0);

        assert_eq!(write_file(fd, Some(b"abcde"), -1, 2), -1);
        assert_eq!(write_file(fd, Some(b"abcde"), 0, -2), -1);
        assert_eq!(write_file(fd, Some(b"abcde"), 4, 2), -1);
        assert_eq!(close_file(fd), 0);

        assert!(fs::read(&path).unwrap().is_empty());
    }

    #[test]
    fn open_fails_in_missing_directory() {
        let td = TempDir::new().unwrap();
        let path = td.path().join("no/such/dir/out.log");
        assert_eq!(open_file(path.to_str(), 0), -1);
    }
}
