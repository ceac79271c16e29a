//! LZF stream constants, the codec error type and the match-finder hash.
//!
//! Stream layout, one token after another until the input is exhausted:
//!
//! | Control byte        | Meaning                                                   |
//! |---------------------|-----------------------------------------------------------|
//! | `000LLLLL`          | literal run of `L + 1` bytes (1..=32) follows             |
//! | `LLLooooo` (L < 7)  | back-reference of `L + 2` bytes, one more offset byte     |
//! | `111ooooo`          | back-reference of `7 + n + 2` bytes, `n` byte then offset |
//!
//! The 13-bit offset `o` addresses `o + 1` bytes back from the write position.

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Longest literal run a single control byte can describe.
pub const MAX_LIT: usize = 1 << 5;

/// Back-references reach at most this many bytes behind the write position.
pub const MAX_OFF: usize = 1 << 13;

/// Longest back-reference the format can encode.
pub const MAX_REF: usize = (1 << 8) + (1 << 3);

/// Shortest back-reference the encoder emits.
pub const MIN_MATCH: usize = 3;

/// Largest input the encoder accepts; positions are stored as `u32`.
pub const MAX_INPUT_SIZE: usize = u32::MAX as usize;

/// Worst-case ratio of decoded bytes to encoded bytes.
///
/// A three-byte long back-reference expands to [`MAX_REF`] bytes; nothing in
/// the format expands further.
pub const MAX_EXPANSION_RATIO: usize = MAX_REF / 3;

// ─────────────────────────────────────────────────────────────────────────────
// Hash table
// ─────────────────────────────────────────────────────────────────────────────

/// Log₂ of the number of hash slots (64 Ki slots).
pub const HLOG: u32 = 16;

/// Number of hash slots.
pub const HSIZE: usize = 1 << HLOG;

/// Seed the rolling hash with the first two bytes at `ip`.
#[inline(always)]
pub fn hash_first(src: &[u8], ip: usize) -> u32 {
    ((src[ip] as u32) << 8) | src[ip + 1] as u32
}

/// Roll the hash forward by the byte at `ip + 2`.
#[inline(always)]
pub fn hash_next(h: u32, src: &[u8], ip: usize) -> u32 {
    (h << 8) | src[ip + 2] as u32
}

/// Map a rolling hash value to a slot index.
#[inline(always)]
pub fn hash_slot(h: u32) -> usize {
    ((h >> (3 * 8 - HLOG)).wrapping_sub(h.wrapping_mul(5)) & (HSIZE as u32 - 1)) as usize
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Failures reported by the native LZF encoder and decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// The destination buffer cannot hold the output.
    OutputTooSmall,
    /// The compressed stream is truncated or references data before its start.
    MalformedInput,
    /// The input exceeds [`MAX_INPUT_SIZE`].
    InputTooLarge,
}

impl core::fmt::Display for CodecError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CodecError::OutputTooSmall => f.write_str("output buffer too small"),
            CodecError::MalformedInput => f.write_str("malformed compressed stream"),
            CodecError::InputTooLarge => f.write_str("input too large"),
        }
    }
}

impl std::error::Error for CodecError {}
