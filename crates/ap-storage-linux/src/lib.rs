//! Linux specific storage helpers.
//!
//! Directory listings are decoded straight from the getdents64 buffer and files
//! are read into caller supplied buffers.  Failures are reported without any
//! error value, so that the failure path does not allocate either.

use core::ffi::CStr;

pub mod dirent;
pub mod pool;
mod readdir;
mod readfile;

pub use dirent::{DirEntry, DirEntryType, RawDirEntry64};
pub use pool::BufferPool;
pub use readdir::{read_dir, ReadDir, READ_DIR_BUFFER_SIZE};
pub use readfile::read_file;

/// Copy the string into the buffer and terminate it with a NUL byte.
///
/// Fails on strings with inner NUL bytes or not fitting into the buffer.
pub(crate) fn str2cstr<'a>(s: &str, buf: &'a mut [u8]) -> Option<&'a CStr> {
    let n = s.len();
    buf.get_mut(..n)?.copy_from_slice(s.as_bytes());
    *buf.get_mut(n)? = 0;
    CStr::from_bytes_with_nul(&buf[..=n]).ok()
}

/// An open file descriptor.
pub(crate) struct Fd(i32);

impl Fd {
    /// Open the file with the given flags.  O_CLOEXEC is always added.
    pub(crate) fn open(filename: &str, flags: libc::c_int) -> Option<Self> {
        let mut buf = [0u8; libc::PATH_MAX as usize];
        let filename = str2cstr(filename, &mut buf)?;
        let fd = unsafe { libc::open(filename.as_ptr(), flags | libc::O_CLOEXEC) };
        (fd >= 0).then_some(Self(fd))
    }

    pub(crate) fn raw(&self) -> i32 {
        self.0
    }
}

/// Close the file when the object drops.
impl Drop for Fd {
    fn drop(&mut self) {
        unsafe { libc::close(self.0) };
        self.0 = -1;
    }
}
