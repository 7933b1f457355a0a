//! A pool of scratch buffers shared between threads.

use std::sync::{Mutex, PoisonError};

/// Reusable buffers of N bytes.
///
/// Buffers handed out are owned by the caller until released.  Their content
/// is whatever the previous user left behind.  The pool grows with the number
/// of buffers in concurrent use and never shrinks.
pub struct BufferPool<const N: usize> {
    idle: Mutex<Vec<Box<[u8; N]>>>,
}

impl<const N: usize> BufferPool<N> {
    /// Create an empty pool.
    pub const fn new() -> Self {
        Self { idle: Mutex::new(Vec::new()) }
    }

    /// Take an idle buffer or allocate a new one.
    pub fn acquire(&self) -> Box<[u8; N]> {
        let buf = self.idle.lock().unwrap_or_else(PoisonError::into_inner).pop();
        buf.unwrap_or_else(|| Box::new([0; N]))
    }

    /// Return a buffer for later reuse.
    pub fn release(&self, buf: Box<[u8; N]>) {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).push(buf);
    }

    /// The number of buffers waiting for reuse.
    pub fn idle(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl<const N: usize> Default for BufferPool<N> {
    fn default() -> Self {
        Self::new()
    }
}
