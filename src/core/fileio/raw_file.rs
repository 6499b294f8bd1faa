// src/core/fileio/raw_file.rs

use anyhow::{Context, Result, anyhow, bail};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::fd::{AsRawFd, IntoRawFd, RawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

// Permission bits for files created by `RawHandle::open`
pub const FILE_MODE: u32 = 0o644;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    // O_WRONLY | O_CREAT | O_APPEND
    Append,
    // O_WRONLY | O_CREAT | O_TRUNC
    Truncate,
}

impl OpenMode {
    // `0` means append, every other value truncates
    pub fn from_code(code: i32) -> Self {
        if code == 0 {
            OpenMode::Append
        } else {
            OpenMode::Truncate
        }
    }

    fn options(self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        opts.write(true).create(true).mode(FILE_MODE);
        match self {
            OpenMode::Append => opts.append(true),
            OpenMode::Truncate => opts.truncate(true),
        };
        opts
    }
}

/// A caller-owned, write-only file descriptor.
///
/// Every method maps onto exactly one system call. Nothing here retries:
/// a short write is reported as-is and the caller decides whether to loop.
#[derive(Debug)]
pub struct RawHandle {
    file: File,
    mode: OpenMode,
}

impl RawHandle {
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            bail!("Refusing to open an empty path");
        }
        let file = mode
            .options()
            .open(path)
            .with_context(|| format!("Opening {} ({mode:?})", path.display()))?;
        Ok(RawHandle { file, mode })
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    // Single write(2) of `buf[offset..offset + len]`
    pub fn write(&mut self, buf: &[u8], offset: usize, len: usize) -> Result<usize> {
        write_slice(&mut self.file, buf, offset, len)
    }

    pub fn sync(&self) -> Result<()> {
        self.file
            .sync_all()
            .with_context(|| format!("fsync on fd {}", self.file.as_raw_fd()))
    }

    // Unlike dropping the handle, this surfaces the error from close(2)
    pub fn close(self) -> Result<()> {
        close_fd(self.file.into_raw_fd())
    }

    // Hand the descriptor over to a caller that tracks it as a bare integer
    pub fn into_raw_fd(self) -> RawFd {
        self.file.into_raw_fd()
    }
}

impl AsRawFd for RawHandle {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

/// Issue one `write` of `len` bytes starting at `offset` in `buf`.
///
/// Returns whatever the writer reports, including a short count. An
/// `offset`/`len` pair reaching past the end of `buf` is rejected before
/// anything is written.
pub fn write_slice<W>(writer: &mut W, buf: &[u8], offset: usize, len: usize) -> Result<usize>
where
    W: Write + ?Sized,
{
    let end = offset
        .checked_add(len)
        .filter(|&end| end <= buf.len())
        .ok_or_else(|| {
            anyhow!(
                "Range {offset}..{offset}+{len} out of bounds for a {}-byte buffer",
                buf.len()
            )
        })?;
    writer
        .write(&buf[offset..end])
        .with_context(|| format!("Writing {len} bytes"))
}

// close(2) on a descriptor we no longer own through a `File`
pub fn close_fd(fd: RawFd) -> Result<()> {
    if fd < 0 {
        bail!("Invalid file descriptor {fd}");
    }
    // SAFETY: the caller hands over ownership of `fd`; it is not used again.
    let rc = unsafe { libc::close(fd) };
    if rc < 0 {
        return Err(io::Error::last_os_error()).with_context(|| format!("Closing fd {fd}"));
    }
    Ok(())
}
