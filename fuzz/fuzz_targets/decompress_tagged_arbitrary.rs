#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // A forged prefix must never turn into a huge allocation or a panic.
    if let Ok(out) = elzf::decompress_tagged(data) {
        let declared = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        assert_eq!(out.len(), declared as usize);
    }
});
