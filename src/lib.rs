// elzf: LZF compression binding with buffer sizing, length-prefix framing and
// result mapping around a one-shot LZF codec.
//
// A call runs four steps in a straight line:
//
//   input::normalize      contiguous or chunked bytes → one contiguous buffer
//   capacity              how many output bytes to allocate up front
//   codec (via Binding)   one call into the one-shot compressor/decompressor
//   buffer / Binding      shrink to the produced size or map failure to Error
//
// `reply` wraps the same operations in the host-facing `CallResult` shape.

pub mod binding;
pub mod buffer;
pub mod capacity;
pub mod codec;
pub mod config;
pub mod error;
pub mod input;
pub mod reply;

#[cfg(feature = "c-abi")]
pub mod abi;

// ── Version constants ─────────────────────────────────────────────────────────
pub const ELZF_VERSION_MAJOR: u32 = 0;
pub const ELZF_VERSION_MINOR: u32 = 3;
pub const ELZF_VERSION_RELEASE: u32 = 0;
pub const ELZF_VERSION_NUMBER: u32 =
    ELZF_VERSION_MAJOR * 100 * 100 + ELZF_VERSION_MINOR * 100 + ELZF_VERSION_RELEASE;
pub const ELZF_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the runtime version number.
pub fn version_number() -> u32 {
    ELZF_VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    ELZF_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use binding::Binding;
pub use codec::{Codec, CodecError, Lzf};
pub use config::{Limits, Retry, PREFIX_LEN};
pub use error::{Error, ErrorKind, Result};
pub use input::{Chunk, Input};
pub use reply::CallResult;

// ── Default-binding shortcuts ─────────────────────────────────────────────────

/// Compress `data` with default limits; no length prefix.
///
/// Host name `zip/1`; the host's `compress/1` is [`compress_tagged`].
pub fn compress<'a>(data: impl Into<Input<'a>>) -> Result<Vec<u8>> {
    Binding::new().compress(data)
}

/// Decompress `data` into at most `known_size` bytes.
pub fn decompress_with_size<'a>(data: impl Into<Input<'a>>, known_size: u64) -> Result<Vec<u8>> {
    Binding::new().decompress_with_size(data, known_size)
}

/// Decompress a bare stream with an estimated output size.
///
/// Host name `unzip/1`; the host's `decompress/1` is [`decompress_tagged`].
pub fn decompress<'a>(data: impl Into<Input<'a>>) -> Result<Vec<u8>> {
    Binding::new().decompress(data)
}

/// Compress `data` behind a 4-byte little-endian length prefix.
pub fn compress_tagged<'a>(data: impl Into<Input<'a>>) -> Result<Vec<u8>> {
    Binding::new().compress_tagged(data)
}

/// Decompress length-prefixed data produced by [`compress_tagged`].
pub fn decompress_tagged<'a>(data: impl Into<Input<'a>>) -> Result<Vec<u8>> {
    Binding::new().decompress_tagged(data)
}
