// Integration tests for lib.rs — top-level wiring and re-exports
//
//   - Version constants and version_number() / version_string()
//   - PREFIX_LEN is the 32-bit prefix width
//   - The default-binding shortcuts (compress, decompress, decompress_with_size,
//     compress_tagged, decompress_tagged) are callable and agree with Binding

use elzf::{
    compress, compress_tagged, decompress, decompress_tagged, decompress_with_size,
    version_number, version_string, Binding, ELZF_VERSION_MAJOR, ELZF_VERSION_MINOR,
    ELZF_VERSION_NUMBER, ELZF_VERSION_RELEASE, ELZF_VERSION_STRING, Limits, Retry, PREFIX_LEN,
};

// ─────────────────────────────────────────────────────────────────────────────
// Version constants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn version_number_constant_components() {
    assert_eq!(
        ELZF_VERSION_NUMBER,
        ELZF_VERSION_MAJOR * 10_000 + ELZF_VERSION_MINOR * 100 + ELZF_VERSION_RELEASE
    );
}

#[test]
fn version_string_matches_components() {
    let expected = format!("{ELZF_VERSION_MAJOR}.{ELZF_VERSION_MINOR}.{ELZF_VERSION_RELEASE}");
    assert_eq!(ELZF_VERSION_STRING, expected);
    assert_eq!(version_string(), expected);
    assert_eq!(version_number(), ELZF_VERSION_NUMBER);
}

#[test]
fn prefix_len_is_four() {
    assert_eq!(PREFIX_LEN, 4);
}

// ─────────────────────────────────────────────────────────────────────────────
// Shortcuts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn shortcuts_match_default_binding() {
    let data = b"shortcut shortcut shortcut shortcut".to_vec();
    let binding = Binding::new();

    let packed = compress(&data).unwrap();
    assert_eq!(packed, binding.compress(&data).unwrap());
    assert_eq!(decompress(&packed).unwrap(), data);
    assert_eq!(decompress_with_size(&packed, data.len() as u64).unwrap(), data);

    let tagged = compress_tagged(&data).unwrap();
    assert_eq!(tagged, binding.compress_tagged(&data).unwrap());
    assert_eq!(decompress_tagged(&tagged).unwrap(), data);
}

#[test]
fn tagged_is_prefix_plus_bare_payload() {
    let data = b"prefix + payload, prefix + payload".to_vec();
    let bare = compress(&data).unwrap();
    let tagged = compress_tagged(&data).unwrap();
    assert_eq!(tagged.len(), PREFIX_LEN + bare.len());
    assert_eq!(&tagged[PREFIX_LEN..], &bare[..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Limits::from_env
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn limits_from_env() {
    // Only test in this binary that touches these variables.
    std::env::set_var("ELZF_MAX_OUTPUT", "8M");
    std::env::set_var("ELZF_UNKNOWN_SIZE_RATIO", "256");
    std::env::set_var("ELZF_RETRY_ATTEMPTS", "5");
    let limits = Limits::from_env();
    std::env::remove_var("ELZF_MAX_OUTPUT");
    std::env::remove_var("ELZF_UNKNOWN_SIZE_RATIO");
    std::env::remove_var("ELZF_RETRY_ATTEMPTS");

    assert_eq!(limits.max_output, 8 << 20);
    assert_eq!(limits.unknown_size_ratio, 256);
    assert_eq!(limits.retry, Retry::Grow { max_attempts: 5 });
    assert_eq!(Binding::new().with_limits(limits).limits(), &limits);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tracing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn roundtrip_with_subscriber_installed() -> anyhow::Result<()> {
    // RUST_LOG=elzf=trace shows the capacity and codec events for this call.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let data = b"traced traced traced traced".to_vec();
    let packed = compress_tagged(&data)?;
    assert_eq!(decompress_tagged(&packed)?, data);
    Ok(())
}
