// Property tests for the binding layer.
//
//   - decompress(compress(b)) == b, with the known size and with the estimate
//   - decompress_tagged(compress_tagged(b)) == b
//   - len(compress(b)) <= len(b) + ceil(len(b) / 25) + 1
//   - chunked input compresses exactly like its flattened bytes
//   - arbitrary bytes never panic any decompression entry point

use elzf::capacity::compress_capacity;
use elzf::{Binding, CallResult, Chunk, ErrorKind, Input};
use proptest::prelude::*;

/// Byte vectors biased toward repetition so matches actually occur.
fn compressible() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 0..2048),
        prop::collection::vec(0u8..4, 0..4096),
        (prop::collection::vec(any::<u8>(), 1..64), 1usize..64)
            .prop_map(|(unit, times)| unit.repeat(times)),
    ]
}

proptest! {
    #[test]
    fn roundtrip_known_size(data in compressible()) {
        let binding = Binding::new();
        let packed = binding.compress(&data).unwrap();
        prop_assert_eq!(binding.decompress_with_size(&packed, data.len() as u64).unwrap(), data);
    }

    #[test]
    fn roundtrip_estimated_size(data in compressible()) {
        let binding = Binding::new();
        let packed = binding.compress(&data).unwrap();
        prop_assert_eq!(binding.decompress(&packed).unwrap(), data);
    }

    #[test]
    fn tagged_roundtrip(data in compressible()) {
        let binding = Binding::new();
        let tagged = binding.compress_reply(&data);
        let CallResult::OkTagged(packed) = tagged else {
            return Err(TestCaseError::fail("compress did not return a tagged success"));
        };
        prop_assert_eq!(binding.decompress_reply(&packed), CallResult::OkTagged(data));
    }

    #[test]
    fn compression_respects_estimator_bound(data in compressible()) {
        let packed = Binding::new().compress(&data).unwrap();
        prop_assert!(packed.len() <= compress_capacity(data.len()).unwrap());
    }

    #[test]
    fn chunked_equals_contiguous(data in compressible(), split in any::<prop::sample::Index>()) {
        let binding = Binding::new();
        let at = split.index(data.len() + 1);
        let (head, tail) = data.split_at(at);
        let chunks = vec![
            Chunk::List(vec![Chunk::Bytes(head)]),
            Chunk::Bytes(tail),
        ];
        prop_assert_eq!(
            binding.compress(Input::Chunks(chunks)).unwrap(),
            binding.compress(&data).unwrap()
        );
    }

    #[test]
    fn arbitrary_bytes_never_panic(data in prop::collection::vec(any::<u8>(), 0..512), size in 0u64..4096) {
        let binding = Binding::new();
        for result in [
            binding.decompress(&data),
            binding.decompress_with_size(&data, size),
            binding.decompress_tagged(&data),
        ] {
            if let Err(e) = result {
                prop_assert!(matches!(
                    e.kind(),
                    ErrorKind::CorruptOrUnknown | ErrorKind::InvalidArgument | ErrorKind::InsufficientMemory
                ));
            }
        }
    }
}
