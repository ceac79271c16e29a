//! Interoperability with the liblzf stream format.
//!
//! No reference binary is needed: the vectors below are written out by hand
//! in liblzf's layout (literal runs `000LLLLL`, short references `LLLooooo`,
//! long references `111ooooo LLLLLLLL`, each followed by the low offset byte)
//! and must decode through every entry point.  With the `c-abi` feature the
//! exported `lzf_compress` / `lzf_decompress` symbols are exercised as well.

extern crate elzf;

use elzf::{decompress, decompress_tagged, decompress_with_size, Binding, Codec, Lzf};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Decode through the raw codec into exactly `len` bytes.
fn raw_decode(stream: &[u8], len: usize) -> Option<Vec<u8>> {
    let mut out = vec![0u8; len];
    match Lzf.decompress(stream, &mut out) {
        0 => None,
        n => {
            out.truncate(n);
            Some(out)
        }
    }
}

fn with_prefix(len: u32, stream: &[u8]) -> Vec<u8> {
    let mut v = len.to_le_bytes().to_vec();
    v.extend_from_slice(stream);
    v
}

// ─────────────────────────────────────────────────────────────────────────────
// Hand-built streams
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn literal_only_stream() {
    let stream = [0x04, b'h', b'e', b'l', b'l', b'o'];
    assert_eq!(raw_decode(&stream, 5).unwrap(), b"hello");
    assert_eq!(decompress(&stream[..]).unwrap(), b"hello");
}

#[test]
fn reference_stopping_short_of_the_end() {
    // liblzf leaves the last bytes of a run as literals: "aa", copy 6 from
    // distance 1, then "aa".
    let stream = [0x01, b'a', b'a', 0x80, 0x00, 0x01, b'a', b'a'];
    assert_eq!(decompress_with_size(&stream[..], 10).unwrap(), b"aaaaaaaaaa");
    assert_eq!(decompress(&stream[..]).unwrap(), b"aaaaaaaaaa");
}

#[test]
fn long_reference_with_length_byte() {
    // "xy", then copy 7 + 250 + 2 = 259 bytes from distance 2.
    let stream = [0x01, b'x', b'y', 0xE0, 0xFA, 0x01];
    let expected: Vec<u8> = b"xy".iter().copied().cycle().take(261).collect();
    assert_eq!(decompress_with_size(&stream[..], 261).unwrap(), expected);
}

#[test]
fn maximum_distance_reference() {
    // 8192 literal bytes, then copy 3 from distance 8192 (offset 8191).
    let body: Vec<u8> = (0..8192u32).map(|i| (i * 7 % 256) as u8).collect();
    let mut stream = Vec::new();
    for run in body.chunks(32) {
        stream.push((run.len() - 1) as u8);
        stream.extend_from_slice(run);
    }
    stream.extend_from_slice(&[0x3F, 0xFF]);

    let mut expected = body.clone();
    expected.extend_from_slice(&body[..3]);
    assert_eq!(decompress_with_size(&stream, expected.len() as u64).unwrap(), expected);
}

#[test]
fn tagged_wrapper_around_foreign_stream() {
    let stream = [0x01, b'a', b'a', 0x80, 0x00, 0x01, b'a', b'a'];
    assert_eq!(decompress_tagged(&with_prefix(10, &stream)).unwrap(), b"aaaaaaaaaa");
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoder output
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn known_encoding() {
    // "abca" as literals, then 5 bytes from distance 3.
    let packed = Binding::new().compress(b"abcabcabc").unwrap();
    assert_eq!(packed, vec![0x03, b'a', b'b', b'c', b'a', 0x60, 0x02]);
}

#[test]
fn encoder_output_decodes_with_raw_codec() {
    let data = b"interop interop interop, liblzf layout all the way down".repeat(20);
    let packed = Binding::new().compress(&data).unwrap();
    assert_eq!(raw_decode(&packed, data.len()).unwrap(), data);
}

// ─────────────────────────────────────────────────────────────────────────────
// C ABI
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "c-abi")]
mod c_abi {
    use elzf::abi::{lzf_compress, lzf_decompress};
    use libc::c_uint;

    #[test]
    fn c_symbols_agree_with_binding() {
        let data = b"symbols symbols symbols symbols".to_vec();
        let mut packed = vec![0u8; data.len() * 2];
        let n = unsafe {
            lzf_compress(
                data.as_ptr().cast(),
                data.len() as c_uint,
                packed.as_mut_ptr().cast(),
                packed.len() as c_uint,
            )
        };
        packed.truncate(n as usize);
        assert_eq!(packed, elzf::compress(&data).unwrap());

        let mut out = vec![0u8; data.len()];
        let m = unsafe {
            lzf_decompress(packed.as_ptr().cast(), n, out.as_mut_ptr().cast(), out.len() as c_uint)
        };
        assert_eq!(m as usize, data.len());
        assert_eq!(out, data);
    }

    #[test]
    fn c_decompress_reports_small_buffer_as_zero() {
        let packed = elzf::compress(b"abcabcabc").unwrap();
        let mut out = [0u8; 8];
        let m = unsafe {
            lzf_decompress(packed.as_ptr().cast(), packed.len() as c_uint, out.as_mut_ptr().cast(), 8)
        };
        assert_eq!(m, 0);
    }
}
