//! End-to-end: error classification.
//!
//! Every failure must reach the host as exactly one of `invalid_argument`,
//! `insufficient_memory` or `unknown`, and a failing call must never hand out
//! partial output.

use std::sync::atomic::{AtomicUsize, Ordering};

use elzf::reply::{decompress, unzip, unzip_with_size, zip};
use elzf::{Binding, CallResult, Chunk, Codec, Error, ErrorKind, Input, Limits, Lzf, Retry};

// ─────────────────────────────────────────────────────────────────────────────
// invalid_argument
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn non_byte_chunk_elements() {
    for bad in [256i64, -1, i64::MAX] {
        let input = vec![Chunk::Bytes(b"ok"), Chunk::Integer(bad)];
        assert_eq!(zip(input), CallResult::Err(ErrorKind::InvalidArgument), "{bad}");
    }
}

#[test]
fn nested_non_byte_is_found() {
    let input = vec![Chunk::List(vec![Chunk::List(vec![Chunk::Integer(300)])])];
    let err = Binding::new().compress(Input::Chunks(input)).unwrap_err();
    assert_eq!(err, Error::NotAByte { value: 300 });
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn size_beyond_32_bits() {
    assert_eq!(
        unzip_with_size(b"\x00a", u64::from(u32::MAX) + 1),
        CallResult::Err(ErrorKind::InvalidArgument)
    );
}

#[test]
fn missing_prefix() {
    assert_eq!(decompress(b"abc"), CallResult::Err(ErrorKind::InvalidArgument));
}

// ─────────────────────────────────────────────────────────────────────────────
// insufficient_memory
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn explicit_size_is_not_capped_by_output_limit() {
    let data = b"explicit sizes belong to the caller ".repeat(64);
    let packed = Binding::new().compress(&data).unwrap();
    let binding = Binding::new().with_limits(Limits::default().with_max_output(1024));
    assert!(data.len() > 1024);
    assert_eq!(binding.decompress_with_size(&packed, data.len() as u64).unwrap(), data);
}

#[test]
fn failed_allocation_skips_the_codec() {
    let limits = Limits {
        max_output: usize::MAX,
        unknown_size_ratio: usize::MAX,
        ..Limits::default()
    };
    let binding = Binding::with_codec(Counting::default()).with_limits(limits);
    let err = binding.decompress(b"\x00a").unwrap_err();
    assert_eq!(err, Error::Allocation { bytes: usize::MAX });
    assert_eq!(err.kind(), ErrorKind::InsufficientMemory);
    assert_eq!(binding.codec().0.load(Ordering::SeqCst), 0);
}

#[test]
fn zero_ratio_still_decompresses() {
    let packed = Binding::new().compress(b"abc").unwrap();
    let limits = Limits { unknown_size_ratio: 0, ..Limits::default() };
    assert_eq!(Binding::new().with_limits(limits).decompress(&packed).unwrap(), b"abc");
}

#[test]
fn tagged_prefix_above_output_limit() {
    let data: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
    let packed = Binding::new().compress_tagged(&data).unwrap();
    let small = Binding::new().with_limits(Limits::default().with_max_output(4095));
    assert_eq!(
        small.decompress_reply(&packed),
        CallResult::Err(ErrorKind::InsufficientMemory)
    );
}

/// Codec that claims no space was left.
struct Exhausted;

impl Codec for Exhausted {
    fn compress(&self, _input: &[u8], _output: &mut [u8]) -> usize {
        0
    }

    fn decompress(&self, _input: &[u8], _output: &mut [u8]) -> usize {
        0
    }
}

#[test]
fn compressor_failure_is_insufficient_memory() {
    let binding = Binding::with_codec(Exhausted);
    assert_eq!(binding.zip(b"anything"), CallResult::Err(ErrorKind::InsufficientMemory));
    assert_eq!(
        binding.compress_reply(b"anything"),
        CallResult::Err(ErrorKind::InsufficientMemory)
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// unknown
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn decompressor_failure_is_unknown() {
    let binding = Binding::with_codec(Exhausted);
    assert_eq!(binding.unzip(b"\x00a"), CallResult::Err(ErrorKind::CorruptOrUnknown));
    assert_eq!(binding.unzip_with_size(b"\x00a", 1), CallResult::Err(ErrorKind::CorruptOrUnknown));
}

#[test]
fn garbage_streams() {
    for garbage in [&b"\x05abc"[..], b"\x20\x00", b"\xff\xff\xff", b"\x00"] {
        assert_eq!(unzip(garbage), CallResult::Err(ErrorKind::CorruptOrUnknown), "{garbage:?}");
    }
}

#[test]
fn declared_size_too_small() {
    let data = b"0123456789".repeat(10);
    let packed = Binding::new().compress(&data).unwrap();
    assert_eq!(
        unzip_with_size(&packed, data.len() as u64 - 1),
        CallResult::Err(ErrorKind::CorruptOrUnknown)
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Codec call counts
// ─────────────────────────────────────────────────────────────────────────────

/// Delegates to [`Lzf`] and counts calls.
#[derive(Default)]
struct Counting(AtomicUsize);

impl Codec for Counting {
    fn compress(&self, input: &[u8], output: &mut [u8]) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst);
        Lzf.compress(input, output)
    }

    fn decompress(&self, input: &[u8], output: &mut [u8]) -> usize {
        self.0.fetch_add(1, Ordering::SeqCst);
        Lzf.decompress(input, output)
    }
}

#[test]
fn invalid_argument_never_reaches_the_codec() {
    let binding = Binding::with_codec(Counting::default());
    let _ = binding.zip(vec![Chunk::Integer(-5)]);
    let _ = binding.decompress_reply(b"ab");
    let _ = binding.unzip_with_size(b"\x00a", u64::MAX);
    assert_eq!(binding.codec().0.load(Ordering::SeqCst), 0);
}

#[test]
fn one_codec_call_without_retry() {
    let binding = Binding::with_codec(Counting::default());
    let _ = binding.unzip(b"\x05abc");
    assert_eq!(binding.codec().0.load(Ordering::SeqCst), 1);
}

#[test]
fn retry_is_bounded() {
    let limits = Limits::default()
        .with_unknown_size_ratio(1)
        .with_retry(Retry::Grow { max_attempts: 3 });
    let binding = Binding::with_codec(Counting::default()).with_limits(limits);
    assert_eq!(binding.unzip(b"\x05abc"), CallResult::Err(ErrorKind::CorruptOrUnknown));
    assert_eq!(binding.codec().0.load(Ordering::SeqCst), 3);
}

// ─────────────────────────────────────────────────────────────────────────────
// Symbolic names
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn kinds_have_stable_names() {
    assert_eq!(ErrorKind::InvalidArgument.to_string(), "invalid_argument");
    assert_eq!(ErrorKind::InsufficientMemory.to_string(), "insufficient_memory");
    assert_eq!(ErrorKind::CorruptOrUnknown.to_string(), "unknown");
    for kind in [ErrorKind::InvalidArgument, ErrorKind::InsufficientMemory, ErrorKind::CorruptOrUnknown] {
        assert_eq!(ErrorKind::from_name(kind.as_str()), Some(kind));
    }
}
