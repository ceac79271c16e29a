//! End-to-end: one-shot bare entry points (`zip`, `unzip/1`, `unzip/2`).
//!
//! Drives the host-facing reply layer with realistic payloads and checks the
//! bytes, the reply shape and the sizes the binding hands back.

use elzf::reply::{unzip, unzip_with_size, zip};
use elzf::{Binding, CallResult, Chunk, Input, Limits, Retry};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Log-like text: highly repetitive with small variations.
fn log_lines(lines: usize) -> Vec<u8> {
    (0..lines)
        .map(|i| format!("2026-10-16T12:{:02}:{:02}Z INFO request id={i} status=200\n", i / 60 % 60, i % 60))
        .collect::<String>()
        .into_bytes()
}

/// Deterministic pseudo-random bytes (xorshift).
fn noise(len: usize, mut state: u64) -> Vec<u8> {
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state as u8
        })
        .collect()
}

fn bytes(reply: CallResult) -> Vec<u8> {
    match reply {
        CallResult::Ok(bytes) => bytes,
        other => panic!("expected bare success, got {other}"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// zip / unzip
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn log_text_shrinks_and_restores() {
    let data = log_lines(2_000);
    let packed = bytes(zip(&data));
    assert!(packed.len() * 3 < data.len(), "{} -> {}", data.len(), packed.len());
    assert_eq!(bytes(unzip_with_size(&packed, data.len() as u64)), data);
    assert_eq!(bytes(unzip(&packed)), data);
}

#[test]
fn noise_grows_by_at_most_the_estimator_slack() {
    let data = noise(100_000, 0x9E37_79B9_7F4A_7C15);
    let packed = bytes(zip(&data));
    assert!(packed.len() <= data.len() + data.len().div_ceil(25) + 1);
    assert_eq!(bytes(unzip_with_size(&packed, data.len() as u64)), data);
}

#[test]
fn single_byte() {
    let packed = bytes(zip(b"Z"));
    assert_eq!(packed, vec![0x00, b'Z']);
    assert_eq!(bytes(unzip_with_size(&packed, 1)), b"Z");
}

#[test]
fn empty_input_gives_empty_output() {
    assert_eq!(zip(b""), CallResult::Ok(Vec::new()));
    assert_eq!(unzip(b""), CallResult::Ok(Vec::new()));
    assert_eq!(unzip_with_size(b"", 0), CallResult::Ok(Vec::new()));
}

#[test]
fn known_size_larger_than_needed_returns_real_length() {
    let data = log_lines(10);
    let packed = bytes(zip(&data));
    let out = bytes(unzip_with_size(&packed, data.len() as u64 + 4096));
    assert_eq!(out.len(), data.len());
    assert_eq!(out.capacity(), data.len());
}

// ─────────────────────────────────────────────────────────────────────────────
// Chunked input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn chunked_input_matches_contiguous() {
    let data = log_lines(50);
    let (a, rest) = data.split_at(100);
    let (b, c) = rest.split_at(7);
    let mut chunks = vec![Chunk::Bytes(a), Chunk::List(vec![Chunk::Bytes(b)])];
    chunks.push(Chunk::List(c.iter().copied().map(Chunk::from).collect()));

    assert_eq!(zip(Input::Chunks(chunks)), zip(&data));
}

#[test]
fn unzip_accepts_chunked_compressed_data() {
    let data = log_lines(30);
    let packed = bytes(zip(&data));
    let (head, tail) = packed.split_at(packed.len() / 2);
    let chunks = vec![Chunk::Bytes(head), Chunk::Bytes(tail)];
    assert_eq!(bytes(unzip_with_size(Input::Chunks(chunks), data.len() as u64)), data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Unknown-size estimation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn tight_ratio_fails_without_retry_and_recovers_with_it() {
    let data = vec![b'q'; 64 * 1024];
    let packed = bytes(zip(&data));

    let tight = Limits::default().with_unknown_size_ratio(2);
    assert!(!Binding::new().with_limits(tight).unzip(&packed).is_ok());

    let retrying = tight.with_retry(Retry::Grow { max_attempts: 16 });
    assert_eq!(bytes(Binding::new().with_limits(retrying).unzip(&packed)), data);
}
