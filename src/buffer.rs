//! Exclusively-owned output buffer: fallible allocation, an optional reserved
//! length prefix, and a fallible shrink to the bytes actually produced.
//!
//! The buffer is zero-filled on allocation, so the codec only ever sees
//! initialised memory.  It is handed to the caller only through
//! [`OutputBuffer::finish`], which never returns more than the reserved prefix
//! plus the bytes the codec reported writing.

use std::alloc::{self, Layout};

use crate::config::PREFIX_LEN;
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct OutputBuffer {
    buf: Vec<u8>,
    /// Leading bytes that belong to the prefix, not the codec.
    reserved: usize,
}

impl OutputBuffer {
    /// Allocate `capacity` zeroed bytes for the codec.
    pub fn allocate(capacity: usize) -> Result<Self> {
        Ok(Self { buf: zeroed(capacity)?, reserved: 0 })
    }

    /// Allocate `total` bytes and store `original_len` little-endian in the
    /// first [`PREFIX_LEN`] of them; the codec gets the rest.
    pub fn with_length_prefix(total: usize, original_len: u32) -> Result<Self> {
        debug_assert!(total >= PREFIX_LEN);
        let mut buf = zeroed(total)?;
        buf[..PREFIX_LEN].copy_from_slice(&original_len.to_le_bytes());
        Ok(Self { buf, reserved: PREFIX_LEN })
    }

    /// Bytes available to the codec.
    pub fn capacity(&self) -> usize {
        self.buf.len() - self.reserved
    }

    /// The codec's part of the buffer.
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.reserved..]
    }

    /// Hand out the prefix plus the first `written` payload bytes.
    pub fn finish(self, written: usize) -> Result<Vec<u8>> {
        debug_assert!(written <= self.capacity());
        shrink(self.buf, self.reserved + written)
    }
}

/// Fallible zero-filled allocation of exactly `len` bytes.
///
/// Goes through `alloc_zeroed` so a large estimate is not written over up
/// front; the allocator can hand out pages that are already zero and only
/// the bytes the codec touches get committed.  Peak memory is still the full
/// capacity plus the shrunk copy made by [`shrink`].
fn zeroed(len: usize) -> Result<Vec<u8>> {
    if len == 0 {
        return Ok(Vec::new());
    }
    let layout = Layout::array::<u8>(len).map_err(|_| Error::Allocation { bytes: len })?;
    // SAFETY: `layout` has a non-zero size.
    let ptr = unsafe { alloc::alloc_zeroed(layout) };
    if ptr.is_null() {
        return Err(Error::Allocation { bytes: len });
    }
    // SAFETY: `ptr` comes from the global allocator with `layout` (align 1,
    // size `len`), and all `len` bytes are initialised to zero.
    Ok(unsafe { Vec::from_raw_parts(ptr, len, len) })
}

/// Shrink `buf` to exactly `len` bytes.
///
/// Equal lengths return the buffer untouched.  Otherwise the bytes move into
/// a fresh allocation of exactly `len` bytes so no slack outlives the call; if
/// that allocation fails the whole result is `Error::Shrink`.
pub fn shrink(buf: Vec<u8>, len: usize) -> Result<Vec<u8>> {
    if len == buf.len() {
        return Ok(buf);
    }
    debug_assert!(len < buf.len());
    let mut exact = Vec::new();
    exact
        .try_reserve_exact(len)
        .map_err(|_| Error::Shrink { from: buf.len(), to: len })?;
    exact.extend_from_slice(&buf[..len]);
    Ok(exact)
}

/// Read a little-endian length prefix from the front of `data`.
pub fn read_length_prefix(data: &[u8]) -> Result<(u32, &[u8])> {
    match data.split_first_chunk::<PREFIX_LEN>() {
        Some((prefix, payload)) => Ok((u32::from_le_bytes(*prefix), payload)),
        None => Err(Error::MissingLengthPrefix { len: data.len() }),
    }
}
