#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let packed = elzf::reply::compress(data);
    let elzf::CallResult::OkTagged(bytes) = packed else {
        panic!("tagged compression failed: {packed}");
    };
    assert_eq!(elzf::reply::decompress(&bytes), elzf::CallResult::OkTagged(data.to_vec()));
});
