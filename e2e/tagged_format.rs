//! End-to-end: the length-prefixed format (`compress/1`, `decompress/1`,
//! `uncompress/1`).
//!
//! Layout: 4-byte little-endian original length, then a bare LZF stream.

use elzf::reply::{compress, decompress, uncompress, zip};
use elzf::{CallResult, ErrorKind, PREFIX_LEN};

fn tagged(reply: CallResult) -> Vec<u8> {
    match reply {
        CallResult::OkTagged(bytes) => bytes,
        other => panic!("expected tagged success, got {other}"),
    }
}

fn sample() -> Vec<u8> {
    b"The quick brown fox jumps over the lazy dog. ".repeat(40)
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn prefix_holds_original_length() {
    let data = sample();
    let packed = tagged(compress(&data));
    let prefix: [u8; 4] = packed[..PREFIX_LEN].try_into().unwrap();
    assert_eq!(u32::from_le_bytes(prefix) as usize, data.len());
}

#[test]
fn payload_is_the_bare_stream() {
    let data = sample();
    let packed = tagged(compress(&data));
    let bare = match zip(&data) {
        CallResult::Ok(bytes) => bytes,
        other => panic!("{other}"),
    };
    assert_eq!(&packed[PREFIX_LEN..], &bare[..]);
}

#[test]
fn host_compress_is_root_compress_tagged() {
    let data = sample();
    let host = tagged(compress(&data));
    assert_eq!(host, elzf::compress_tagged(&data).unwrap());
    assert_ne!(host, elzf::compress(&data).unwrap());
    assert_eq!(host.len(), PREFIX_LEN + elzf::compress(&data).unwrap().len());

    // The host decompress only accepts the prefixed form.
    assert_eq!(decompress(&host), CallResult::OkTagged(data.clone()));
    assert_eq!(elzf::decompress_tagged(&host).unwrap(), data);
    let bare = elzf::compress(&data).unwrap();
    assert!(!decompress(&bare).is_ok());
}

#[test]
fn empty_input_is_a_bare_zero_prefix() {
    let packed = tagged(compress(b""));
    assert_eq!(packed, vec![0, 0, 0, 0]);
    assert_eq!(decompress(&packed), CallResult::OkTagged(Vec::new()));
}

// ─────────────────────────────────────────────────────────────────────────────
// Round trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn roundtrip_various_sizes() {
    for len in [1usize, 2, 3, 31, 32, 33, 263, 264, 265, 8191, 8192, 8193, 70_000] {
        let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8 ^ (i / 1000) as u8).collect();
        let packed = tagged(compress(&data));
        assert_eq!(decompress(&packed), CallResult::OkTagged(data), "len {len}");
    }
}

#[test]
fn uncompress_is_decompress() {
    let packed = tagged(compress(&sample()));
    assert_eq!(uncompress(&packed), decompress(&packed));
    assert_eq!(uncompress(b"\x01\x00"), decompress(b"\x01\x00"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Prefix validation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn short_input_is_invalid_argument() {
    for short in [&b""[..], b"\x00", b"\x00\x00\x00"] {
        assert_eq!(decompress(short), CallResult::Err(ErrorKind::InvalidArgument));
    }
}

#[test]
fn implausible_prefix_is_rejected_before_allocation() {
    // 4 GiB - 1 declared for a 2-byte payload.
    let forged = [0xFF, 0xFF, 0xFF, 0xFF, 0x00, b'a'];
    assert_eq!(decompress(&forged), CallResult::Err(ErrorKind::CorruptOrUnknown));
}

#[test]
fn zero_prefix_with_payload_is_corrupt() {
    assert_eq!(
        decompress([0u8, 0, 0, 0, 0x00, b'a'].as_slice()),
        CallResult::Err(ErrorKind::CorruptOrUnknown)
    );
}

#[test]
fn wrong_prefix_is_corrupt() {
    let data = sample();
    let mut packed = tagged(compress(&data));

    // Too small: the codec runs out of room.
    packed[..PREFIX_LEN].copy_from_slice(&(data.len() as u32 - 1).to_le_bytes());
    assert_eq!(decompress(&packed), CallResult::Err(ErrorKind::CorruptOrUnknown));

    // Too large: decoding stops short of the declared length.
    packed[..PREFIX_LEN].copy_from_slice(&(data.len() as u32 + 1).to_le_bytes());
    assert_eq!(decompress(&packed), CallResult::Err(ErrorKind::CorruptOrUnknown));
}

#[test]
fn truncated_payload_is_corrupt() {
    let packed = tagged(compress(&sample()));
    let cut = &packed[..packed.len() - 1];
    assert_eq!(decompress(cut), CallResult::Err(ErrorKind::CorruptOrUnknown));
}
