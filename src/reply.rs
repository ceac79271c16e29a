//! Host-facing results and entry points.
//!
//! A host sees each call as one [`CallResult`].  The bare entry points (`zip`,
//! `unzip`) reply with the bytes themselves; the self-describing ones
//! (`compress`, `decompress`/`uncompress`) wrap success in an explicit `ok`
//! marker.  Failures always carry a symbolic [`ErrorKind`].
//!
//! Note the naming: [`compress`] and [`decompress`] here are the host's
//! length-prefixed pair, i.e. [`crate::compress_tagged`] and
//! [`crate::decompress_tagged`].  The bare crate-root `compress` and
//! `decompress` correspond to [`zip`] and [`unzip`].

use std::fmt;

use crate::binding::Binding;
use crate::codec::Codec;
use crate::error::{ErrorKind, Result};
use crate::input::Input;

/// Outcome of one host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallResult {
    /// Success from a bare entry point.
    Ok(Vec<u8>),
    /// Success from a self-describing entry point, wrapped in an `ok` marker.
    OkTagged(Vec<u8>),
    /// Failure.
    Err(ErrorKind),
}

impl CallResult {
    /// Map a binding result for a bare entry point.
    pub fn bare(result: Result<Vec<u8>>) -> Self {
        match result {
            Ok(bytes) => CallResult::Ok(bytes),
            Err(e) => CallResult::Err(e.kind()),
        }
    }

    /// Map a binding result for a self-describing entry point.
    pub fn tagged(result: Result<Vec<u8>>) -> Self {
        match result {
            Ok(bytes) => CallResult::OkTagged(bytes),
            Err(e) => CallResult::Err(e.kind()),
        }
    }

    pub fn is_ok(&self) -> bool {
        !matches!(self, CallResult::Err(_))
    }

    /// The payload on success, whichever way it was wrapped.
    pub fn into_result(self) -> std::result::Result<Vec<u8>, ErrorKind> {
        match self {
            CallResult::Ok(bytes) | CallResult::OkTagged(bytes) => Ok(bytes),
            CallResult::Err(kind) => Err(kind),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            CallResult::Err(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Renders in the host's term syntax: `<<N bytes>>`, `{ok,<<N bytes>>}` or
/// `{error,kind}`.
impl fmt::Display for CallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallResult::Ok(bytes) => write!(f, "<<{} bytes>>", bytes.len()),
            CallResult::OkTagged(bytes) => write!(f, "{{ok,<<{} bytes>>}}", bytes.len()),
            CallResult::Err(kind) => write!(f, "{{error,{}}}", kind.as_str()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Host entry points
// ─────────────────────────────────────────────────────────────────────────────

impl<C: Codec> Binding<C> {
    /// `zip/1`: bare compression.
    pub fn zip<'a>(&self, data: impl Into<Input<'a>>) -> CallResult {
        CallResult::bare(self.compress(data))
    }

    /// `unzip/1`: bare decompression with an estimated size.
    pub fn unzip<'a>(&self, data: impl Into<Input<'a>>) -> CallResult {
        CallResult::bare(self.decompress(data))
    }

    /// `unzip/2`: bare decompression with a caller-known size.
    pub fn unzip_with_size<'a>(&self, data: impl Into<Input<'a>>, known_size: u64) -> CallResult {
        CallResult::bare(self.decompress_with_size(data, known_size))
    }

    /// `compress/1`: length-prefixed compression.
    pub fn compress_reply<'a>(&self, data: impl Into<Input<'a>>) -> CallResult {
        CallResult::tagged(self.compress_tagged(data))
    }

    /// `decompress/1` and `uncompress/1`: length-prefixed decompression.
    pub fn decompress_reply<'a>(&self, data: impl Into<Input<'a>>) -> CallResult {
        CallResult::tagged(self.decompress_tagged(data))
    }
}

/// `zip/1` with the default binding.
pub fn zip<'a>(data: impl Into<Input<'a>>) -> CallResult {
    Binding::new().zip(data)
}

/// `unzip/1` with the default binding.
pub fn unzip<'a>(data: impl Into<Input<'a>>) -> CallResult {
    Binding::new().unzip(data)
}

/// `unzip/2` with the default binding.
pub fn unzip_with_size<'a>(data: impl Into<Input<'a>>, known_size: u64) -> CallResult {
    Binding::new().unzip_with_size(data, known_size)
}

/// `compress/1` with the default binding.
///
/// **Length-prefixed**: same bytes as [`crate::compress_tagged`], not
/// [`crate::compress`].
pub fn compress<'a>(data: impl Into<Input<'a>>) -> CallResult {
    Binding::new().compress_reply(data)
}

/// `decompress/1` with the default binding.
///
/// **Length-prefixed**: expects [`compress`] output, like
/// [`crate::decompress_tagged`]; bare streams go to [`unzip`].
pub fn decompress<'a>(data: impl Into<Input<'a>>) -> CallResult {
    Binding::new().decompress_reply(data)
}

/// `uncompress/1`: alias of [`decompress`], so also **length-prefixed**.
pub fn uncompress<'a>(data: impl Into<Input<'a>>) -> CallResult {
    decompress(data)
}
