//! Capacity estimation: how many output bytes to allocate before calling the
//! one-shot codec.

use crate::codec::MAX_EXPANSION_RATIO;
use crate::config::{Limits, COMPRESS_SLACK_DIVISOR, PREFIX_LEN};
use crate::error::{Error, Result};

/// What the caller knows about the decompressed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSize {
    /// Exact size, supplied by the caller or read from a length prefix.
    Known(usize),
    /// Nothing; the capacity is a multiple of the compressed length.
    Unknown,
}

/// Output capacity for compressing `n` bytes: `n + ceil(n / 25) + 1`.
///
/// The slack covers the codec's worst case (one control byte per 32
/// literals), so compression cannot run out of space.
pub fn compress_capacity(n: usize) -> Result<usize> {
    n.checked_add(n.div_ceil(COMPRESS_SLACK_DIVISOR))
        .and_then(|c| c.checked_add(1))
        .ok_or(Error::CapacityOverflow)
}

/// [`compress_capacity`] plus room for the length prefix.
pub fn compress_tagged_capacity(n: usize) -> Result<usize> {
    compress_capacity(n)?
        .checked_add(PREFIX_LEN)
        .ok_or(Error::CapacityOverflow)
}

/// Output capacity for decompressing `compressed_len` bytes.
///
/// A known size is used as is: it is either the caller's own figure or a
/// length prefix that [`check_prefix`] has already bounded.  An unknown size
/// is guessed as `compressed_len × limits.unknown_size_ratio` (a ratio of 0
/// counts as 1), clamped to `limits.max_output`; with a ratio below the
/// format's worst-case expansion the guess can be too small.
pub fn decompress_capacity(size: OutputSize, compressed_len: usize, limits: &Limits) -> usize {
    let capacity = match size {
        OutputSize::Known(size) => size,
        OutputSize::Unknown => compressed_len
            .saturating_mul(limits.unknown_size_ratio.max(1))
            .min(limits.max_output),
    };
    tracing::trace!(?size, compressed_len, capacity, "decompress capacity");
    capacity
}

/// Next capacity to try after the decompressor failed with `capacity`, or
/// `None` once the limit has been reached.
pub fn grow(capacity: usize, limits: &Limits) -> Option<usize> {
    let next = capacity.saturating_mul(2).max(1).min(limits.max_output);
    (next > capacity).then_some(next)
}

/// Validate a length prefix before it becomes an allocation size.
///
/// `declared` must be reachable from `payload_len` compressed bytes (at most
/// [`MAX_EXPANSION_RATIO`] per byte, and zero exactly when the payload is
/// empty) and must fit within `limits.max_output`.
pub fn check_prefix(declared: usize, payload_len: usize, limits: &Limits) -> Result<usize> {
    let plausible = if payload_len == 0 {
        declared == 0
    } else {
        declared > 0 && declared <= payload_len.saturating_mul(MAX_EXPANSION_RATIO)
    };
    if !plausible {
        return Err(Error::ImplausiblePrefix { declared, payload: payload_len });
    }
    if declared > limits.max_output {
        return Err(Error::OutputLimit { requested: declared, max: limits.max_output });
    }
    Ok(declared)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_formula() {
        assert_eq!(compress_capacity(0).unwrap(), 1);
        assert_eq!(compress_capacity(1).unwrap(), 3);
        assert_eq!(compress_capacity(25).unwrap(), 27);
        assert_eq!(compress_capacity(26).unwrap(), 29);
        assert_eq!(compress_capacity(1000).unwrap(), 1041);
    }

    #[test]
    fn compress_formula_covers_codec_worst_case() {
        for n in 0..5000 {
            assert!(compress_capacity(n).unwrap() >= crate::codec::compress_bound(n));
        }
    }

    #[test]
    fn tagged_adds_prefix() {
        assert_eq!(compress_tagged_capacity(10).unwrap(), 10 + 1 + 1 + 4);
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(compress_capacity(usize::MAX), Err(Error::CapacityOverflow));
    }

    #[test]
    fn known_size_is_exact() {
        let limits = Limits::default();
        assert_eq!(decompress_capacity(OutputSize::Known(10), 5, &limits), 10);
        assert_eq!(decompress_capacity(OutputSize::Known(0), 5, &limits), 0);
    }

    #[test]
    fn known_size_ignores_output_limit() {
        let limits = Limits::default().with_max_output(100);
        assert_eq!(decompress_capacity(OutputSize::Known(101), 5, &limits), 101);
    }

    #[test]
    fn unknown_size_uses_ratio_and_clamps() {
        let limits = Limits::default().with_unknown_size_ratio(256).with_max_output(10_000);
        assert_eq!(decompress_capacity(OutputSize::Unknown, 10, &limits), 2560);
        assert_eq!(decompress_capacity(OutputSize::Unknown, 100, &limits), 10_000);
    }

    #[test]
    fn zero_ratio_counts_as_one() {
        let limits = Limits { unknown_size_ratio: 0, ..Limits::default() };
        assert_eq!(decompress_capacity(OutputSize::Unknown, 10, &limits), 10);
    }

    #[test]
    fn grow_doubles_until_limit() {
        let limits = Limits::default().with_max_output(100);
        assert_eq!(grow(30, &limits), Some(60));
        assert_eq!(grow(60, &limits), Some(100));
        assert_eq!(grow(100, &limits), None);
        assert_eq!(grow(0, &limits), Some(1));
    }

    #[test]
    fn prefix_checks() {
        let limits = Limits::default().with_max_output(1 << 20);
        assert_eq!(check_prefix(0, 0, &limits), Ok(0));
        assert_eq!(check_prefix(10, 5, &limits), Ok(10));
        assert_eq!(check_prefix(88 * 5, 5, &limits), Ok(440));
        assert_eq!(
            check_prefix(88 * 5 + 1, 5, &limits),
            Err(Error::ImplausiblePrefix { declared: 441, payload: 5 })
        );
        assert_eq!(
            check_prefix(3, 0, &limits),
            Err(Error::ImplausiblePrefix { declared: 3, payload: 0 })
        );
        assert_eq!(
            check_prefix(0, 3, &limits),
            Err(Error::ImplausiblePrefix { declared: 0, payload: 3 })
        );
        assert_eq!(
            check_prefix(2 << 20, 1 << 20, &limits),
            Err(Error::OutputLimit { requested: 2 << 20, max: 1 << 20 })
        );
    }
}
