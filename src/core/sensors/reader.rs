// src/core/sensors/reader.rs

use anyhow::{Context, Result};
use std::io::{BufRead, BufReader, Read, Seek};

// Lines longer than this (minus the terminator slot) are cut short
pub const MAX_LINE_LENGTH: usize = 128;

/// Rewind `handle` and read its first line afresh.
///
/// A new reader is built on every call so no bytes from an earlier read
/// survive in a buffer. Returns `None` when the file is empty.
pub fn read_first_line<R>(handle: &mut R) -> Result<Option<Vec<u8>>>
where
    R: Read + Seek,
{
    handle.rewind().context("Rewinding sensor file")?;

    let limited = (&mut *handle).take((MAX_LINE_LENGTH - 1) as u64);
    let mut reader = BufReader::with_capacity(MAX_LINE_LENGTH, limited);
    let mut line = Vec::with_capacity(MAX_LINE_LENGTH);
    let n = reader
        .read_until(b'\n', &mut line)
        .context("Reading sensor file")?;

    Ok((n > 0).then_some(line))
}

/// Parse a leading decimal integer the way C's `atol` does.
///
/// Leading whitespace and one sign are accepted, digits are consumed up to
/// the first non-digit, and anything unparsable yields `0`. Values beyond
/// the `i64` range saturate.
pub fn parse_leading_int(bytes: &[u8]) -> i64 {
    let mut rest = bytes;
    while let [b, tail @ ..] = rest {
        if !is_c_space(*b) {
            break;
        }
        rest = tail;
    }

    let negative = match rest {
        [b'-', tail @ ..] => {
            rest = tail;
            true
        }
        [b'+', tail @ ..] => {
            rest = tail;
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    for &b in rest.iter().take_while(|b| b.is_ascii_digit()) {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    value
}

// Narrow a parsed `long` into an `int` slot; high bits are dropped
pub fn narrow_to_int(value: i64) -> i32 {
    value as i32
}

// isspace() in the "C" locale
fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}
