//! C-ABI shims exporting the two liblzf symbols.
//!
//! Enabled with:
//!   cargo build --release --features c-abi
//!
//! The produced `target/release/libelzf.a` can replace `liblzf.a` for C code
//! written against `lzf.h`.  Both functions keep liblzf's contract: the number
//! of bytes written, or 0 on any failure (including null pointers and empty
//! input).

use libc::{c_uint, c_void};
use std::slice;

use crate::codec::{Codec, Lzf};

/// Build the two slices, or `None` when a pointer is null or there is
/// nothing to read.
///
/// # Safety
/// Non-null pointers must be valid for `in_len` bytes of reads and `out_len`
/// bytes of writes respectively, and the regions must not overlap.
#[inline(always)]
unsafe fn slices<'a>(
    in_data: *const c_void,
    in_len: c_uint,
    out_data: *mut c_void,
    out_len: c_uint,
) -> Option<(&'a [u8], &'a mut [u8])> {
    if in_data.is_null() || out_data.is_null() || in_len == 0 {
        return None;
    }
    Some((
        slice::from_raw_parts(in_data as *const u8, in_len as usize),
        slice::from_raw_parts_mut(out_data as *mut u8, out_len as usize),
    ))
}

// ─────────────────────────────────────────────────────────────────────────────
// lzf_compress  (lzf.h)
//
// unsigned int lzf_compress (const void *const in_data, unsigned int in_len,
//                            void *out_data, unsigned int out_len);
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn lzf_compress(
    in_data: *const c_void,
    in_len: c_uint,
    out_data: *mut c_void,
    out_len: c_uint,
) -> c_uint {
    match slices(in_data, in_len, out_data, out_len) {
        Some((src, dst)) => Lzf.compress(src, dst) as c_uint,
        None => 0,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// lzf_decompress  (lzf.h)
//
// unsigned int lzf_decompress (const void *const in_data, unsigned int in_len,
//                              void *out_data, unsigned int out_len);
// ─────────────────────────────────────────────────────────────────────────────
#[no_mangle]
pub unsafe extern "C" fn lzf_decompress(
    in_data: *const c_void,
    in_len: c_uint,
    out_data: *mut c_void,
    out_len: c_uint,
) -> c_uint {
    match slices(in_data, in_len, out_data, out_len) {
        Some((src, dst)) => Lzf.decompress(src, dst) as c_uint,
        None => 0,
    }
}
