//! Reading directories with getdents64.

use crate::dirent::{DirEntry, DirEntryType, RawDirEntry64};
use crate::pool::BufferPool;
use crate::Fd;
use core::ops::Range;

/// The size of the getdents64 buffer.  Must hold an entry with a name of
/// PATH_MAX bytes.
pub const READ_DIR_BUFFER_SIZE: usize = 8192;

/// Buffers shared by all directory reads of the process.
static READ_DIR_BUFFERS: BufferPool<READ_DIR_BUFFER_SIZE> = BufferPool::new();

/// List the entries of a directory.
///
/// Does not produce any entry if the directory cannot be opened.  See
/// [`ReadDir`] for the details.
pub fn read_dir(name: &str) -> ReadDir<'static> {
    ReadDir::with_pool(name, &READ_DIR_BUFFERS)
}

/// Iterator over the entries of a single directory.
///
/// The entries are produced in kernel order, without "." and ".." and without
/// deleted entries.  Every entry borrows its name from the internal buffer, so
/// the next call to [`ReadDir::next`] invalidates it.
///
/// Opening or reading the directory failing, a corrupt buffer, and the end of
/// the directory all look the same: no more entries.  The directory is closed
/// and the buffer returned to the pool as soon as the end is reached, or when
/// the iterator drops.
pub struct ReadDir<'p> {
    pool: &'p BufferPool<READ_DIR_BUFFER_SIZE>,
    fd: Option<Fd>,
    buf: Option<Box<[u8; READ_DIR_BUFFER_SIZE]>>,
    /// Start of the next record.
    pos: usize,
    /// Valid bytes in the buffer.
    avail: usize,
}

/// The outcome of decoding a single record.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    /// An entry with the name at the given range of the buffer.
    Entry(u64, Range<usize>, DirEntryType),
    /// A record not to be shown.
    Skip,
    /// Nothing more can be decoded.
    End,
}

impl<'p> ReadDir<'p> {
    /// Open the directory, taking the buffer from the given pool.
    pub fn with_pool(name: &str, pool: &'p BufferPool<READ_DIR_BUFFER_SIZE>) -> Self {
        let fd = Fd::open(name, libc::O_RDONLY | libc::O_DIRECTORY);
        let buf = fd.as_ref().map(|_| pool.acquire());
        Self { pool, fd, buf, pos: 0, avail: 0 }
    }

    /// Return the next entry in this directory.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<DirEntry<'_>> {
        let (ino, name, typ) = loop {
            match self.step() {
                Step::Entry(ino, name, typ) => break (ino, name, typ),
                Step::Skip => continue,
                Step::End => {
                    self.close();
                    return None;
                }
            }
        };
        let buf = self.buf.as_deref()?;
        Some(DirEntry { ino, name: &buf[name], typ })
    }

    /// Call the function for every entry until it returns false.
    pub fn for_each(mut self, mut f: impl FnMut(DirEntry<'_>) -> bool) {
        while let Some(entry) = self.next() {
            if !f(entry) {
                break;
            }
        }
    }

    /// Refill the buffer if drained and decode the next record.
    fn step(&mut self) -> Step {
        let (Some(fd), Some(buf)) = (&self.fd, &mut self.buf) else {
            return Step::End;
        };
        if self.pos >= self.avail {
            let res = unsafe {
                libc::syscall(libc::SYS_getdents64, fd.raw(), buf.as_mut_ptr() as *mut libc::c_void, buf.len())
            };
            if res <= 0 {
                return Step::End;
            }
            self.pos = 0;
            self.avail = core::cmp::min(res as usize, buf.len());
        }
        decode(&buf[..self.avail], &mut self.pos)
    }

    /// Close the directory and return the buffer to the pool.
    fn close(&mut self) {
        self.fd = None;
        if let Some(buf) = self.buf.take() {
            self.pool.release(buf);
        }
    }
}

impl Drop for ReadDir<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Decode the record at pos and advance pos to the following one.
fn decode(buf: &[u8], pos: &mut usize) -> Step {
    let start = *pos;
    let dentry = RawDirEntry64(&buf[start..]);
    let len = match dentry.reclen() {
        Some(len) if len != 0 && len <= dentry.0.len() as u64 => len as usize,
        // we've fallen off the edge of the directory
        _ => return Step::End,
    };
    *pos += len;

    // deleted entries have no inode
    let ino = match dentry.ino() {
        Some(ino) if ino != 0 => ino,
        _ => return Step::Skip,
    };
    let Some(name) = dentry.name() else {
        return Step::End;
    };
    if name == b"." || name == b".." {
        return Step::Skip;
    }
    let Some(typ) = dentry.typ() else {
        return Step::End;
    };
    let name_start = start + crate::dirent::NAME;
    Step::Entry(ino, name_start..name_start + name.len(), typ)
}
