#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let binding = elzf::Binding::new();
    let compressed = binding.compress(data).expect("compression of in-range input cannot fail");

    // The estimator's slack must always be enough.
    assert!(compressed.len() <= data.len() + data.len().div_ceil(25) + 1);

    let recovered = binding
        .decompress_with_size(&compressed, data.len() as u64)
        .expect("decompress with the exact size");
    assert_eq!(
        recovered, data,
        "round-trip mismatch: compressed {} bytes back to {} bytes (expected {})",
        compressed.len(),
        recovered.len(),
        data.len()
    );

    // The 88x estimate covers every valid stream.
    assert_eq!(binding.decompress(&compressed).expect("estimated size"), data);
});
