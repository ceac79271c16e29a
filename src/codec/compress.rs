//! LZF encoder.
//!
//! Single pass over the input with a 64 Ki-slot hash table keyed on the next
//! three bytes.  A slot hit within [`MAX_OFF`] bytes that really matches three
//! bytes becomes a back-reference; everything else is buffered as literals and
//! flushed in runs of at most [`MAX_LIT`] bytes.  After each back-reference the
//! last two positions it covered are re-hashed so that overlapping repeats are
//! still found.
//!
//! The stream is byte-compatible with `liblzf`'s decoder.  Capacity checks are
//! exact: the encoder fails with [`CodecError::OutputTooSmall`] only when the
//! stream it is producing really does not fit.  Its output never exceeds
//! `n + ceil(n / 32)` bytes.

use super::types::{
    hash_first, hash_next, hash_slot, CodecError, HSIZE, MAX_INPUT_SIZE, MAX_LIT, MAX_OFF,
    MAX_REF, MIN_MATCH,
};

/// Worst-case encoded size of `input_size` bytes (all literals).
#[inline]
pub const fn compress_bound(input_size: usize) -> usize {
    input_size + input_size.div_ceil(MAX_LIT)
}

/// Write `lits` as literal runs starting at `op`, returning the new write position.
#[inline]
fn emit_literals(dst: &mut [u8], mut op: usize, lits: &[u8]) -> Result<usize, CodecError> {
    for run in lits.chunks(MAX_LIT) {
        let end = op + 1 + run.len();
        if end > dst.len() {
            return Err(CodecError::OutputTooSmall);
        }
        dst[op] = (run.len() - 1) as u8;
        dst[op + 1..end].copy_from_slice(run);
        op = end;
    }
    Ok(op)
}

/// Write a back-reference of `len` bytes at distance `off + 1`.
#[inline]
fn emit_match(dst: &mut [u8], mut op: usize, len: usize, off: usize) -> Result<usize, CodecError> {
    let encoded = len - 2;
    let needed = if encoded < 7 { 2 } else { 3 };
    if op + needed > dst.len() {
        return Err(CodecError::OutputTooSmall);
    }
    let off_hi = (off >> 8) as u8;
    if encoded < 7 {
        dst[op] = off_hi + ((encoded as u8) << 5);
        op += 1;
    } else {
        dst[op] = off_hi + (7 << 5);
        dst[op + 1] = (encoded - 7) as u8;
        op += 2;
    }
    dst[op] = off as u8;
    Ok(op + 1)
}

/// Compress `src` into `dst`.
///
/// Returns the number of bytes written.  An empty `src` produces an empty
/// stream (`Ok(0)`).
pub fn compress(src: &[u8], dst: &mut [u8]) -> Result<usize, CodecError> {
    let in_len = src.len();
    if in_len > MAX_INPUT_SIZE {
        return Err(CodecError::InputTooLarge);
    }

    let mut op = 0usize;
    let mut anchor = 0usize; // first byte not yet emitted
    let mut ip = 0usize;

    if in_len >= MIN_MATCH {
        // Slot value 0 doubles as "empty": position 0 is never a match source.
        let mut htab = vec![0u32; HSIZE];
        let mut hval = hash_first(src, 0);

        while ip + 2 < in_len {
            hval = hash_next(hval, src, ip);
            let slot = hash_slot(hval);
            let r = htab[slot] as usize;
            htab[slot] = ip as u32;

            let is_match = r > 0
                && ip - r - 1 < MAX_OFF
                && src[r + 2] == src[ip + 2]
                && src[r] == src[ip]
                && src[r + 1] == src[ip + 1];

            if !is_match {
                ip += 1;
                continue;
            }

            let off = ip - r - 1;
            let max_len = (in_len - ip).min(MAX_REF);
            let mut len = MIN_MATCH;
            while len < max_len && src[r + len] == src[ip + len] {
                len += 1;
            }

            op = emit_literals(dst, op, &src[anchor..ip])?;
            op = emit_match(dst, op, len, off)?;

            ip += len;
            anchor = ip;
            if ip + 2 >= in_len {
                break;
            }

            // Re-hash the two positions just before `ip`.
            ip -= 2;
            hval = hash_first(src, ip);
            hval = hash_next(hval, src, ip);
            htab[hash_slot(hval)] = ip as u32;
            ip += 1;
            hval = hash_next(hval, src, ip);
            htab[hash_slot(hval)] = ip as u32;
            ip += 1;
        }
    }

    emit_literals(dst, op, &src[anchor..])
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
