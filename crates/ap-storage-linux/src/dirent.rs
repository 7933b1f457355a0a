//! Directory entries as returned by getdents64(2).

use core::mem::{offset_of, size_of};
use core::fmt::Write as _;

/// The type of a directory entry, as reported by the kernel.
///
/// Unknown values are kept as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirEntryType(pub u8);

impl DirEntryType {
    pub const FIFO: Self = Self(libc::DT_FIFO);
    pub const CHAR: Self = Self(libc::DT_CHR);
    pub const BLOCK: Self = Self(libc::DT_BLK);
    pub const DIR: Self = Self(libc::DT_DIR);
    pub const REGULAR: Self = Self(libc::DT_REG);
    pub const SYMLINK: Self = Self(libc::DT_LNK);
    pub const SOCKET: Self = Self(libc::DT_SOCK);

    /// A human readable description of the known types.
    pub fn description(self) -> Option<&'static str> {
        Some(match self {
            Self::FIFO => "FIFO/pipe",
            Self::CHAR => "char device",
            Self::BLOCK => "block device",
            Self::DIR => "directory",
            Self::REGULAR => "regular file",
            Self::SYMLINK => "symbolic link",
            Self::SOCKET => "socket",
            _ => return None,
        })
    }
}

impl core::fmt::Display for DirEntryType {
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        match self.description() {
            Some(desc) => fmt.pad(desc),
            None => {
                // format on the stack so that width and alignment apply
                let mut buf = [0u8; 20];
                let mut w = SliceWriter(&mut buf, 0);
                write!(w, "DirEntryType({})", self.0)?;
                let n = w.1;
                fmt.pad(core::str::from_utf8(&buf[..n]).unwrap_or_default())
            }
        }
    }
}

/// Write into a slice of bytes while truncating on overflow.
struct SliceWriter<'a>(&'a mut [u8], usize);

impl core::fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, value: &str) -> Result<(), core::fmt::Error> {
        let b = value.as_bytes();
        let n = core::cmp::min(self.0.len() - self.1, b.len());
        self.0[self.1..self.1 + n].copy_from_slice(&b[..n]);
        self.1 += n;
        Ok(())
    }
}

/// A directory entry with only inode number, name and type.
///
/// The name references the buffer the entry was decoded from.  Copy it if it
/// has to outlive the current iteration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry<'a> {
    pub ino: u64,
    pub name: &'a [u8],
    pub typ: DirEntryType,
}

impl DirEntry<'_> {
    pub fn is_dir(&self) -> bool {
        self.typ == DirEntryType::DIR
    }

    pub fn is_regular(&self) -> bool {
        self.typ == DirEntryType::REGULAR
    }

    pub fn is_symlink(&self) -> bool {
        self.typ == DirEntryType::SYMLINK
    }

    /// Is this a pipe, also known as FIFO?
    pub fn is_pipe(&self) -> bool {
        self.typ == DirEntryType::FIFO
    }

    pub fn is_socket(&self) -> bool {
        self.typ == DirEntryType::SOCKET
    }

    pub fn is_char_dev(&self) -> bool {
        self.typ == DirEntryType::CHAR
    }

    pub fn is_block_dev(&self) -> bool {
        self.typ == DirEntryType::BLOCK
    }
}

impl core::fmt::Display for DirEntry<'_> {
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> Result<(), core::fmt::Error> {
        write!(fmt, "DirEntry ino: {}, name: \"{}\", type: {}", self.ino, self.name.escape_ascii(), self.typ)
    }
}

/// Offset and width of the fields in the kernel record.
const INO: (usize, usize) = (offset_of!(libc::dirent64, d_ino), size_of::<libc::ino64_t>());
const RECLEN: (usize, usize) = (offset_of!(libc::dirent64, d_reclen), size_of::<libc::c_ushort>());
const TYPE: usize = offset_of!(libc::dirent64, d_type);
pub(crate) const NAME: usize = offset_of!(libc::dirent64, d_name);

/// A raw directory entry at the start of a getdents64 buffer.
///
/// The slice may continue with further entries or be truncated.  Every
/// accessor checks the bounds and returns `None` instead of reading beyond
/// them.
#[derive(Debug, Clone, Copy)]
pub struct RawDirEntry64<'a>(pub &'a [u8]);

impl<'a> RawDirEntry64<'a> {
    /// The inode number.
    pub fn ino(&self) -> Option<u64> {
        read_uint(self.0, INO.0, INO.1)
    }

    /// The length of this record, which is where the next one starts.
    pub fn reclen(&self) -> Option<u64> {
        read_uint(self.0, RECLEN.0, RECLEN.1)
    }

    pub fn typ(&self) -> Option<DirEntryType> {
        self.0.get(TYPE).copied().map(DirEntryType)
    }

    /// The name up to the first NUL byte or the end of the record.
    ///
    /// Fails if the record claims more bytes than there are.
    pub fn name(&self) -> Option<&'a [u8]> {
        let end = usize::try_from(self.reclen()?).ok()?;
        let name = self.0.get(NAME..end)?;
        let nlen = name.iter().position(|&ch| ch == 0).unwrap_or(name.len());
        Some(&name[..nlen])
    }
}

/// Read a native endian unsigned integer of 2, 4 or 8 bytes at the offset.
pub fn read_uint(b: &[u8], offset: usize, size: usize) -> Option<u64> {
    let b = b.get(offset..offset.checked_add(size)?)?;
    match size {
        8 => Some(u64::from_ne_bytes(b.try_into().ok()?)),
        4 => Some(u32::from_ne_bytes(b.try_into().ok()?) as u64),
        2 => Some(u16::from_ne_bytes(b.try_into().ok()?) as u64),
        _ => None,
    }
}
