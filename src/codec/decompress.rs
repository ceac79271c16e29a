//! LZF decoder.
//!
//! Fully bounds-checked: every literal run and back-reference is validated
//! against both the remaining input and the remaining output before a byte is
//! copied, so arbitrary input can never read or write out of range.

use super::types::{CodecError, MAX_LIT};

/// Decompress `src` into `dst`.
///
/// Returns the number of bytes written, `Err(CodecError::OutputTooSmall)` when
/// the decoded data does not fit in `dst`, or `Err(CodecError::MalformedInput)`
/// for a truncated stream or a back-reference reaching before the start of the
/// output.  An empty `src` decodes to nothing (`Ok(0)`).
pub fn decompress(src: &[u8], dst: &mut [u8]) -> Result<usize, CodecError> {
    let in_len = src.len();
    let out_len = dst.len();
    let mut ip = 0usize;
    let mut op = 0usize;

    while ip < in_len {
        let ctrl = src[ip] as usize;
        ip += 1;

        if ctrl < MAX_LIT {
            // literal run
            let run = ctrl + 1;
            if op + run > out_len {
                return Err(CodecError::OutputTooSmall);
            }
            if ip + run > in_len {
                return Err(CodecError::MalformedInput);
            }
            dst[op..op + run].copy_from_slice(&src[ip..ip + run]);
            op += run;
            ip += run;
            continue;
        }

        // back-reference
        let mut len = ctrl >> 5;
        if ip >= in_len {
            return Err(CodecError::MalformedInput);
        }
        if len == 7 {
            len += src[ip] as usize;
            ip += 1;
            if ip >= in_len {
                return Err(CodecError::MalformedInput);
            }
        }
        let distance = ((ctrl & 0x1f) << 8) + src[ip] as usize + 1;
        ip += 1;

        let len = len + 2;
        if op + len > out_len {
            return Err(CodecError::OutputTooSmall);
        }
        if distance > op {
            return Err(CodecError::MalformedInput);
        }

        let start = op - distance;
        if distance >= len {
            dst.copy_within(start..start + len, op);
        } else {
            // Overlapping copy: each byte may depend on one written this loop.
            for i in 0..len {
                dst[op + i] = dst[start + i];
            }
        }
        op += len;
    }

    Ok(op)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::compress::{compress, compress_bound};

    #[test]
    fn empty_stream_decodes_to_nothing() {
        let mut dst = [0u8; 4];
        assert_eq!(decompress(&[], &mut dst), Ok(0));
    }

    #[test]
    fn literal_run() {
        let mut dst = [0u8; 3];
        assert_eq!(decompress(&[0x02, b'x', b'y', b'z'], &mut dst), Ok(3));
        assert_eq!(&dst, b"xyz");
    }

    #[test]
    fn overlapping_back_reference_repeats_byte() {
        let mut dst = [0u8; 10];
        assert_eq!(decompress(&[0x01, b'a', b'a', 0xC0, 0x00], &mut dst), Ok(10));
        assert_eq!(&dst, b"aaaaaaaaaa");
    }

    #[test]
    fn long_back_reference() {
        // 'ab' then 7 + 3 + 2 = 12 bytes copied from distance 2.
        let mut dst = [0u8; 14];
        assert_eq!(decompress(&[0x01, b'a', b'b', 0xE0, 0x03, 0x01], &mut dst), Ok(14));
        assert_eq!(&dst, b"ababababababab");
    }

    #[test]
    fn truncated_literal_run_is_malformed() {
        let mut dst = [0u8; 16];
        assert_eq!(decompress(&[0x05, b'a'], &mut dst), Err(CodecError::MalformedInput));
    }

    #[test]
    fn truncated_back_reference_is_malformed() {
        let mut dst = [0u8; 16];
        assert_eq!(decompress(&[0x00, b'a', 0x20], &mut dst), Err(CodecError::MalformedInput));
        assert_eq!(
            decompress(&[0x00, b'a', 0xE0, 0x01], &mut dst),
            Err(CodecError::MalformedInput)
        );
    }

    #[test]
    fn reference_before_start_is_malformed() {
        let mut dst = [0u8; 16];
        assert_eq!(decompress(&[0x00, b'a', 0x20, 0x05], &mut dst), Err(CodecError::MalformedInput));
    }

    #[test]
    fn small_output_reports_output_too_small() {
        let mut dst = [0u8; 2];
        assert_eq!(decompress(&[0x02, b'x', b'y', b'z'], &mut dst), Err(CodecError::OutputTooSmall));

        let mut dst = [0u8; 5];
        assert_eq!(
            decompress(&[0x01, b'a', b'a', 0xC0, 0x00], &mut dst),
            Err(CodecError::OutputTooSmall)
        );
    }

    #[test]
    fn roundtrip_mixed_content() {
        let mut src = b"header:".to_vec();
        for i in 0..2000u32 {
            src.extend_from_slice(format!("record-{} value={};", i % 37, i * 7).as_bytes());
        }
        let mut packed = vec![0u8; compress_bound(src.len())];
        let n = compress(&src, &mut packed).unwrap();
        assert!(n < src.len());

        let mut out = vec![0u8; src.len()];
        assert_eq!(decompress(&packed[..n], &mut out), Ok(src.len()));
        assert_eq!(out, src);
    }

    #[test]
    fn arbitrary_bytes_never_panic() {
        let mut x = 0x9E37_79B9u32;
        for round in 0..200 {
            let len = (round * 7) % 97;
            let src: Vec<u8> = (0..len)
                .map(|_| {
                    x ^= x << 13;
                    x ^= x >> 17;
                    x ^= x << 5;
                    x as u8
                })
                .collect();
            let mut dst = vec![0u8; 256];
            let _ = decompress(&src, &mut dst);
        }
    }
}
