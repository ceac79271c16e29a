//! Input normalization: contiguous or chunked bytes → one contiguous buffer.
//!
//! A host may hand over either a single byte region or a chunk list, a tree of
//! byte slices and single byte values (the shape of an Erlang iolist).  Every
//! entry point runs [`normalize`] first; it validates the whole tree before it
//! allocates anything.  Inputs longer than [`MAX_INPUT_SIZE`] are rejected:
//! codec positions and the length prefix are 32-bit.

use std::borrow::Cow;

use crate::config::MAX_INPUT_SIZE;
use crate::error::{Error, Result};

/// One element of a chunk list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk<'a> {
    /// A run of bytes.
    Bytes(&'a [u8]),
    /// A single byte value; anything outside `0..=255` is rejected.
    Integer(i64),
    /// A nested chunk list.
    List(Vec<Chunk<'a>>),
}

/// Caller-supplied data for one binding call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    /// One contiguous region; used without copying.
    Bytes(&'a [u8]),
    /// A chunk list, coalesced into one buffer unless it holds a single run.
    Chunks(Vec<Chunk<'a>>),
}

impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Input::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Input<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Input::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Input<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(s: &'a str) -> Self {
        Input::Bytes(s.as_bytes())
    }
}

impl<'a> From<Vec<Chunk<'a>>> for Input<'a> {
    fn from(chunks: Vec<Chunk<'a>>) -> Self {
        Input::Chunks(chunks)
    }
}

impl<'a> From<&'a [u8]> for Chunk<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Chunk::Bytes(bytes)
    }
}

impl<'a> From<u8> for Chunk<'a> {
    fn from(byte: u8) -> Self {
        Chunk::Integer(byte as i64)
    }
}

impl<'a> From<Vec<Chunk<'a>>> for Chunk<'a> {
    fn from(list: Vec<Chunk<'a>>) -> Self {
        Chunk::List(list)
    }
}

/// Result of the validation pass over a chunk list.
enum Shape<'a> {
    /// At most one non-empty byte run and no single-byte elements.
    Single(&'a [u8]),
    /// Needs coalescing into a buffer of this many bytes.
    Mixed(usize),
}

fn checked_total(total: usize, more: usize) -> Result<usize> {
    let len = total.saturating_add(more);
    if len > MAX_INPUT_SIZE {
        return Err(Error::InputTooLarge { len, max: MAX_INPUT_SIZE });
    }
    Ok(len)
}

/// Walk the tree once, rejecting bad elements and totalling the length.
///
/// Iterative, so nesting depth is bounded by heap rather than stack.
fn inspect<'a>(chunks: &'a [Chunk<'a>]) -> Result<Shape<'a>> {
    let mut stack: Vec<core::slice::Iter<'a, Chunk<'a>>> = vec![chunks.iter()];
    let mut total = 0usize;
    let mut single: Option<&'a [u8]> = None;
    let mut mixed = false;

    while let Some(iter) = stack.last_mut() {
        let Some(chunk) = iter.next() else {
            stack.pop();
            continue;
        };
        match chunk {
            Chunk::Bytes(bytes) => {
                if bytes.is_empty() {
                    continue;
                }
                total = checked_total(total, bytes.len())?;
                if single.replace(*bytes).is_some() {
                    mixed = true;
                }
            }
            Chunk::Integer(value) => {
                if !(0..=255).contains(value) {
                    return Err(Error::NotAByte { value: *value });
                }
                total = checked_total(total, 1)?;
                mixed = true;
            }
            Chunk::List(list) => stack.push(list.iter()),
        }
    }

    if mixed {
        Ok(Shape::Mixed(total))
    } else {
        Ok(Shape::Single(single.unwrap_or(&[])))
    }
}

fn flatten_into(chunks: &[Chunk<'_>], out: &mut Vec<u8>) {
    let mut stack = vec![chunks.iter()];
    while let Some(iter) = stack.last_mut() {
        match iter.next() {
            None => {
                stack.pop();
            }
            Some(Chunk::Bytes(bytes)) => out.extend_from_slice(bytes),
            Some(Chunk::Integer(value)) => out.push(*value as u8),
            Some(Chunk::List(list)) => stack.push(list.iter()),
        }
    }
}

/// Produce one contiguous view of `input`.
///
/// Contiguous input and chunk lists holding a single byte run are borrowed.
/// Anything else is validated in full, then copied into a buffer of the exact
/// total size; a failed reservation is `Error::Allocation`.
pub fn normalize<'a>(input: &'a Input<'a>) -> Result<Cow<'a, [u8]>> {
    let chunks = match input {
        Input::Bytes(bytes) => {
            checked_total(0, bytes.len())?;
            return Ok(Cow::Borrowed(*bytes));
        }
        Input::Chunks(chunks) => chunks,
    };

    match inspect(chunks)? {
        Shape::Single(bytes) => Ok(Cow::Borrowed(bytes)),
        Shape::Mixed(total) => {
            let mut out = Vec::new();
            out.try_reserve_exact(total)
                .map_err(|_| Error::Allocation { bytes: total })?;
            flatten_into(chunks, &mut out);
            debug_assert_eq!(out.len(), total);
            Ok(Cow::Owned(out))
        }
    }
}
