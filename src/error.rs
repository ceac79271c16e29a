//! Error taxonomy for the binding layer.
//!
//! Every failure carries a detailed [`Error`] for Rust callers and collapses
//! to one of three [`ErrorKind`]s for the host, each with a stable symbolic
//! name.

use std::fmt;

/// The three failure classes visible to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input could not be interpreted as bytes; raised before allocating.
    InvalidArgument,
    /// An allocation or reallocation failed, or a size limit was hit.
    InsufficientMemory,
    /// The codec reported failure; a corrupt stream and a too-small declared
    /// size are indistinguishable here.
    CorruptOrUnknown,
}

impl ErrorKind {
    /// Stable identifier, as returned to the host.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::InsufficientMemory => "insufficient_memory",
            ErrorKind::CorruptOrUnknown => "unknown",
        }
    }

    /// Inverse of [`ErrorKind::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "invalid_argument" => Some(ErrorKind::InvalidArgument),
            "insufficient_memory" => Some(ErrorKind::InsufficientMemory),
            "unknown" => Some(ErrorKind::CorruptOrUnknown),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detailed failure of a binding call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("chunk list element {value} is not a byte")]
    NotAByte { value: i64 },

    #[error("input of {len} bytes exceeds the {max}-byte limit")]
    InputTooLarge { len: usize, max: usize },

    #[error("declared size {size} does not fit in 32 bits")]
    SizeOutOfRange { size: u64 },

    #[error("{len}-byte input is too short to carry a length prefix")]
    MissingLengthPrefix { len: usize },

    #[error("failed to allocate {bytes} bytes")]
    Allocation { bytes: usize },

    #[error("output capacity overflows usize")]
    CapacityOverflow,

    #[error("output of {requested} bytes exceeds the {max}-byte limit")]
    OutputLimit { requested: usize, max: usize },

    #[error("failed to shrink output from {from} to {to} bytes")]
    Shrink { from: usize, to: usize },

    #[error("compressor ran out of space in a {capacity}-byte buffer")]
    CompressFailed { capacity: usize },

    #[error("decompressor failed with a {capacity}-byte buffer")]
    DecompressFailed { capacity: usize },

    #[error("length prefix {declared} is implausible for a {payload}-byte payload")]
    ImplausiblePrefix { declared: usize, payload: usize },

    #[error("decompressed {actual} bytes but the length prefix declared {declared}")]
    LengthMismatch { declared: usize, actual: usize },
}

impl Error {
    /// The host-visible class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotAByte { .. }
            | Error::InputTooLarge { .. }
            | Error::SizeOutOfRange { .. }
            | Error::MissingLengthPrefix { .. } => ErrorKind::InvalidArgument,
            Error::Allocation { .. }
            | Error::CapacityOverflow
            | Error::OutputLimit { .. }
            | Error::Shrink { .. }
            | Error::CompressFailed { .. } => ErrorKind::InsufficientMemory,
            Error::DecompressFailed { .. }
            | Error::ImplausiblePrefix { .. }
            | Error::LengthMismatch { .. } => ErrorKind::CorruptOrUnknown,
        }
    }
}

impl From<Error> for ErrorKind {
    fn from(e: Error) -> Self {
        e.kind()
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
