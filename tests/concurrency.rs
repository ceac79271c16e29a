// Concurrency: one Binding shared by many threads.
//
// Calls hold no shared state, so a single binding behind a shared reference
// must give every thread the same answers it would get alone.

use elzf::{Binding, Limits, Retry};
use rayon::prelude::*;

fn payload(seed: usize) -> Vec<u8> {
    format!("worker {seed}: ").repeat(50 + seed % 17).into_bytes()
}

#[test]
fn shared_binding_roundtrips_in_parallel() {
    let binding = Binding::new();
    let results: Vec<bool> = (0..256usize)
        .into_par_iter()
        .map(|seed| {
            let data = payload(seed);
            let packed = binding.compress_tagged(&data).unwrap();
            binding.decompress_tagged(&packed).unwrap() == data
        })
        .collect();
    assert!(results.into_iter().all(|ok| ok));
}

#[test]
fn parallel_output_matches_sequential() {
    let binding = Binding::new().with_limits(Limits::default().with_retry(Retry::Grow { max_attempts: 4 }));
    let inputs: Vec<Vec<u8>> = (0..64).map(payload).collect();

    let sequential: Vec<Vec<u8>> = inputs.iter().map(|d| binding.compress(d).unwrap()).collect();
    let parallel: Vec<Vec<u8>> = inputs.par_iter().map(|d| binding.compress(d).unwrap()).collect();
    assert_eq!(sequential, parallel);

    let decoded: Vec<Vec<u8>> = parallel.par_iter().map(|p| binding.decompress(p).unwrap()).collect();
    assert_eq!(decoded, inputs);
}

#[test]
fn binding_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Binding>();
}
