#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a bare stream: errors are fine, panics are not.
    let Some((&size, stream)) = data.split_first() else {
        return;
    };
    let binding = elzf::Binding::new();
    if let Ok(out) = binding.decompress_with_size(stream, u64::from(size) * 16) {
        assert!(out.len() <= usize::from(size) * 16);
    }
    if let Ok(out) = binding.decompress(stream) {
        assert!(!out.is_empty() || stream.is_empty());
    }
});
