//! The binding: normalize → estimate → invoke the codec once → finalize.
//!
//! Every entry point is a straight line through those four steps.  A call owns
//! its buffers from allocation until it either hands the finished output to
//! the caller or drops them on an error path; nothing is shared between calls,
//! so a [`Binding`] may be used from many threads at once.

use crate::buffer::{read_length_prefix, OutputBuffer};
use crate::capacity::{
    check_prefix, compress_capacity, compress_tagged_capacity, decompress_capacity, grow,
    OutputSize,
};
use crate::codec::{Codec, Lzf};
use crate::config::{Limits, MAX_INPUT_SIZE};
use crate::error::{Error, Result};
use crate::input::{normalize, Input};

/// LZF binding over a [`Codec`], configured by [`Limits`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Binding<C = Lzf> {
    codec: C,
    limits: Limits,
}

impl Binding<Lzf> {
    /// Binding over the native codec with default limits.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Codec> Binding<C> {
    /// Binding over `codec` with default limits.
    pub fn with_codec(codec: C) -> Self {
        Self { codec, limits: Limits::default() }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    // ── Entry points ─────────────────────────────────────────────────────────

    /// Compress `data`; the output carries no length prefix.
    pub fn compress<'a>(&self, data: impl Into<Input<'a>>) -> Result<Vec<u8>> {
        let input = data.into();
        let src = normalize(&input)?;
        let out = OutputBuffer::allocate(compress_capacity(src.len())?)?;
        self.invoke_compress(&src, out)
    }

    /// Decompress `data` into at most `known_size` bytes.
    ///
    /// The size is an upper bound: a stream that decodes to fewer bytes is
    /// returned at its real length.  `limits.max_output` does not apply; the
    /// caller chose this size, so it goes straight to the allocator.
    pub fn decompress_with_size<'a>(
        &self,
        data: impl Into<Input<'a>>,
        known_size: u64,
    ) -> Result<Vec<u8>> {
        let known_size = usize::try_from(known_size)
            .ok()
            .filter(|&size| size <= MAX_INPUT_SIZE)
            .ok_or(Error::SizeOutOfRange { size: known_size })?;
        let input = data.into();
        let src = normalize(&input)?;
        self.invoke_decompress(&src, OutputSize::Known(known_size))
    }

    /// Decompress `data` without knowing its original size.
    ///
    /// The capacity is `limits.unknown_size_ratio` times the compressed length
    /// (clamped to `limits.max_output`); see [`Limits`] for the retry policy
    /// applied when that guess turns out too small.
    pub fn decompress<'a>(&self, data: impl Into<Input<'a>>) -> Result<Vec<u8>> {
        let input = data.into();
        let src = normalize(&input)?;
        self.invoke_decompress(&src, OutputSize::Unknown)
    }

    /// Compress `data` behind a 4-byte little-endian prefix holding its length.
    pub fn compress_tagged<'a>(&self, data: impl Into<Input<'a>>) -> Result<Vec<u8>> {
        let input = data.into();
        let src = normalize(&input)?;
        let original_len = u32::try_from(src.len())
            .map_err(|_| Error::InputTooLarge { len: src.len(), max: MAX_INPUT_SIZE })?;
        let out = OutputBuffer::with_length_prefix(
            compress_tagged_capacity(src.len())?,
            original_len,
        )?;
        self.invoke_compress(&src, out)
    }

    /// Decompress the output of [`Binding::compress_tagged`].
    ///
    /// The prefix is checked against the payload length and the output limit
    /// before it is used as an allocation size, and the decoded length must
    /// match it exactly.
    pub fn decompress_tagged<'a>(&self, data: impl Into<Input<'a>>) -> Result<Vec<u8>> {
        let input = data.into();
        let src = normalize(&input)?;
        let (declared, payload) = read_length_prefix(&src)?;
        let declared = check_prefix(declared as usize, payload.len(), &self.limits)?;

        let out = self.invoke_decompress(payload, OutputSize::Known(declared))?;
        if out.len() != declared {
            return Err(Error::LengthMismatch { declared, actual: out.len() });
        }
        Ok(out)
    }

    // ── Codec invocation and finalization ────────────────────────────────────

    fn invoke_compress(&self, src: &[u8], mut out: OutputBuffer) -> Result<Vec<u8>> {
        // The codec contract cannot express an empty success.
        if src.is_empty() {
            return out.finish(0);
        }

        let capacity = out.capacity();
        let written = self.codec.compress(src, out.payload_mut());
        tracing::trace!(input = src.len(), capacity, written, "compress");

        if written == 0 || written > capacity {
            return Err(Error::CompressFailed { capacity });
        }
        out.finish(written)
    }

    fn invoke_decompress(&self, src: &[u8], size: OutputSize) -> Result<Vec<u8>> {
        if src.is_empty() {
            return Ok(Vec::new());
        }

        let mut capacity = decompress_capacity(size, src.len(), &self.limits);
        let attempts = match size {
            OutputSize::Known(_) => 1,
            OutputSize::Unknown => self.limits.retry.attempts(),
        };

        let mut attempt = 1;
        loop {
            let mut out = OutputBuffer::allocate(capacity)?;
            let written = self.codec.decompress(src, out.payload_mut());
            tracing::trace!(input = src.len(), capacity, written, attempt, "decompress");

            if written > 0 && written <= capacity {
                return out.finish(written);
            }
            drop(out);

            let next = (attempt < attempts).then(|| grow(capacity, &self.limits)).flatten();
            match next {
                Some(next) => {
                    tracing::debug!(from = capacity, to = next, attempt, "growing decompress buffer");
                    capacity = next;
                    attempt += 1;
                }
                None => return Err(Error::DecompressFailed { capacity }),
            }
        }
    }
}
