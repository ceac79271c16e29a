//! LZF codec primitive and the seam the binding calls it through.
//!
//! The binding layer never looks inside the codec.  It sees exactly the
//! one-shot contract of `lzf_compress` / `lzf_decompress`: fill the output
//! slice and return the number of bytes written, or `0` on any failure.
//! [`Codec`] is that contract; [`Lzf`] is the native implementation.

pub mod compress;
pub mod decompress;
pub mod types;

pub use compress::compress_bound;
pub use types::{CodecError, MAX_EXPANSION_RATIO, MAX_INPUT_SIZE};

/// One-shot compressor/decompressor pair.
///
/// Implementations must be reentrant: a pure function of the two slices, with
/// no hidden shared state, so a single instance can serve concurrent callers.
/// Both methods must never write past `output.len()`.
pub trait Codec: Send + Sync {
    /// Compress `input` into `output`; `0` means failure.
    fn compress(&self, input: &[u8], output: &mut [u8]) -> usize;

    /// Decompress `input` into `output`; `0` means failure.
    fn decompress(&self, input: &[u8], output: &mut [u8]) -> usize;
}

/// The native LZF codec.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Lzf;

impl Codec for Lzf {
    fn compress(&self, input: &[u8], output: &mut [u8]) -> usize {
        compress::compress(input, output).unwrap_or(0)
    }

    fn decompress(&self, input: &[u8], output: &mut [u8]) -> usize {
        decompress::decompress(input, output).unwrap_or(0)
    }
}

impl<C: Codec + ?Sized> Codec for &C {
    fn compress(&self, input: &[u8], output: &mut [u8]) -> usize {
        (**self).compress(input, output)
    }

    fn decompress(&self, input: &[u8], output: &mut [u8]) -> usize {
        (**self).decompress(input, output)
    }
}
