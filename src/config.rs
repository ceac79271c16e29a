// config.rs: compile-time constants and runtime limits for the binding layer.
//
// The constants fix the framing and the capacity formula.  `Limits` carries
// the knobs a host may tune per binding: the output cap, the unknown-size
// guess, and the retry policy.  `Limits::from_env` reads them from the process
// environment; each variable has a `*_from(Option<&str>)` parser so the
// conversion is testable without touching the environment.

use crate::codec::{self, MAX_EXPANSION_RATIO};

// Width of the length prefix written by tagged compression.
pub const PREFIX_LEN: usize = core::mem::size_of::<u32>();

// Compression slack: one extra byte per this many input bytes, rounded up.
pub const COMPRESS_SLACK_DIVISOR: usize = 25;

// Default multiple of the compressed length allocated when the original size
// is unknown.  Equal to the format's worst-case expansion, so valid streams
// always fit.  The buffer is reserved zeroed (untouched pages stay
// uncommitted), but a call still peaks at this capacity plus the shrunk copy.
pub const UNKNOWN_SIZE_RATIO_DEFAULT: usize = MAX_EXPANSION_RATIO;

// Default cap on any decompression output (1 GiB).
pub const MAX_OUTPUT_DEFAULT: usize = 1 << 30;

// Largest input or declared size any entry point accepts.
pub const MAX_INPUT_SIZE: usize = codec::MAX_INPUT_SIZE;

pub const ENV_MAX_OUTPUT: &str = "ELZF_MAX_OUTPUT";
pub const ENV_UNKNOWN_SIZE_RATIO: &str = "ELZF_UNKNOWN_SIZE_RATIO";
pub const ENV_RETRY_ATTEMPTS: &str = "ELZF_RETRY_ATTEMPTS";

/// What to do when the decompressor reports failure for a guessed capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Retry {
    /// Fail immediately: one codec call per request.
    #[default]
    Never,
    /// Double the capacity and call again, at most `max_attempts` calls in
    /// total.  Applies only to decompression without a known size.
    Grow { max_attempts: u32 },
}

impl Retry {
    /// Total number of codec calls this policy allows.
    pub fn attempts(self) -> u32 {
        match self {
            Retry::Never => 1,
            Retry::Grow { max_attempts } => max_attempts.max(1),
        }
    }
}

/// Runtime limits of a [`Binding`](crate::Binding).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest decompressed output this binding will allocate on the word of a
    /// length prefix or an unknown-size estimate.  An explicit caller-supplied
    /// size is not capped.
    pub max_output: usize,
    /// Multiple of the compressed length used when the original size is unknown.
    pub unknown_size_ratio: usize,
    /// Retry policy for unknown-size decompression.
    pub retry: Retry,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_output: MAX_OUTPUT_DEFAULT,
            unknown_size_ratio: UNKNOWN_SIZE_RATIO_DEFAULT,
            retry: Retry::Never,
        }
    }
}

impl Limits {
    pub fn with_max_output(mut self, max_output: usize) -> Self {
        self.max_output = max_output;
        self
    }

    pub fn with_unknown_size_ratio(mut self, ratio: usize) -> Self {
        self.unknown_size_ratio = ratio.max(1);
        self
    }

    pub fn with_retry(mut self, retry: Retry) -> Self {
        self.retry = retry;
        self
    }

    /// Build limits from `ELZF_MAX_OUTPUT`, `ELZF_UNKNOWN_SIZE_RATIO` and
    /// `ELZF_RETRY_ATTEMPTS`, falling back to the defaults for unset or
    /// malformed values.
    pub fn from_env() -> Self {
        Self {
            max_output: max_output_from(std::env::var(ENV_MAX_OUTPUT).ok().as_deref()),
            unknown_size_ratio: unknown_size_ratio_from(
                std::env::var(ENV_UNKNOWN_SIZE_RATIO).ok().as_deref(),
            ),
            retry: retry_from(std::env::var(ENV_RETRY_ATTEMPTS).ok().as_deref()),
        }
    }
}

/// Parse a decimal size with an optional `K`/`M`/`G` suffix (`KiB`, `MB`, …
/// accepted).  The whole string must be consumed.
pub fn parse_size(s: &str) -> Option<usize> {
    let s = s.trim();
    let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if digits_end == 0 {
        return None;
    }
    let value: usize = s[..digits_end].parse().ok()?;
    let shift = match &s[digits_end..] {
        "" => 0,
        "K" | "KB" | "KiB" => 10,
        "M" | "MB" | "MiB" => 20,
        "G" | "GB" | "GiB" => 30,
        _ => return None,
    };
    value.checked_mul(1usize << shift)
}

/// Testable core of the `ELZF_MAX_OUTPUT` lookup.
pub fn max_output_from(env_val: Option<&str>) -> usize {
    match env_val {
        None => MAX_OUTPUT_DEFAULT,
        Some(raw) => parse_size(raw).unwrap_or_else(|| {
            tracing::warn!(var = ENV_MAX_OUTPUT, value = raw, "ignoring malformed size");
            MAX_OUTPUT_DEFAULT
        }),
    }
}

/// Testable core of the `ELZF_UNKNOWN_SIZE_RATIO` lookup.  Zero is rejected.
pub fn unknown_size_ratio_from(env_val: Option<&str>) -> usize {
    match env_val {
        None => UNKNOWN_SIZE_RATIO_DEFAULT,
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(ratio) if ratio > 0 => ratio,
            _ => {
                tracing::warn!(var = ENV_UNKNOWN_SIZE_RATIO, value = raw, "ignoring malformed ratio");
                UNKNOWN_SIZE_RATIO_DEFAULT
            }
        },
    }
}

/// Testable core of the `ELZF_RETRY_ATTEMPTS` lookup.  `0` and `1` mean no
/// retry; larger values enable [`Retry::Grow`].
pub fn retry_from(env_val: Option<&str>) -> Retry {
    match env_val.map(|raw| (raw, raw.trim().parse::<u32>())) {
        None => Retry::Never,
        Some((_, Ok(0 | 1))) => Retry::Never,
        Some((_, Ok(n))) => Retry::Grow { max_attempts: n },
        Some((raw, Err(_))) => {
            tracing::warn!(var = ENV_RETRY_ATTEMPTS, value = raw, "ignoring malformed attempt count");
            Retry::Never
        }
    }
}
