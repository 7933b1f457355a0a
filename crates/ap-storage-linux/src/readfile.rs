//! Reading whole files into reusable buffers.

use crate::Fd;

/// The capacity of a buffer if none was given.
const INITIAL_CAPACITY: usize = 512;

/// Read the whole file into the buffer, growing it as necessary.
///
/// Only the capacity of the buffer matters, its contents are dropped.  The
/// same allocation is returned if it was large enough.  Returns false if the
/// file cannot be opened or a read fails; in the latter case the buffer holds
/// what was read so far.
pub fn read_file(name: &str, mut buffer: Vec<u8>) -> (Vec<u8>, bool) {
    buffer.clear();
    let Some(fd) = Fd::open(name, libc::O_RDONLY) else {
        return (buffer, false);
    };
    buffer.reserve(INITIAL_CAPACITY);
    loop {
        if buffer.len() == buffer.capacity() {
            buffer.reserve(buffer.capacity());
        }
        let spare = buffer.spare_capacity_mut();
        let res = unsafe { libc::read(fd.raw(), spare.as_mut_ptr() as *mut libc::c_void, spare.len()) };
        match res {
            0 => return (buffer, true),
            n if n < 0 => return (buffer, false),
            n => unsafe { buffer.set_len(buffer.len() + n as usize) },
        }
    }
}
