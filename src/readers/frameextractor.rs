// src/readers/frameextractor.rs

//! Find the hexadecimal OSP message in a GP2 line and decode it to bytes.
//!
//! Decoding is lenient: the first token that is not two hexadecimal digits
//! ends decoding and the bytes decoded so far are returned. The resulting
//! short buffer is later rejected by [`validate_frame`].
//!
//! [`validate_frame`]: crate::data::frame::validate_frame

use std::fmt;

use ::memchr::memmem;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{
    Bytes,
    LineIndex,
    HEAD_MARKER,
    HEX_TOKEN_LEN,
    MSGSIZE,
    TAIL_MARKER,
    TIMETAG_LEN,
};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::buffer_to_String_noraw;

/// Offset from the start of the head marker where the search for the tail
/// marker begins.
pub const TAIL_SEARCH_OFFSET: LineIndex = 5;

/// Offset from the start of the head marker of the first message byte
/// token; the head marker and its trailing separator.
pub const FIRST_TOKEN_OFFSET: LineIndex = HEAD_MARKER.len() + 1;

/// A GP2 line does not have an OSP message.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExtractError {
    /// head marker `A0 A2` not found
    MissingHeader,
    /// tail marker `B0 B3` not found after the head marker
    MissingTail,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::MissingHeader => write!(f, "No message header"),
            ExtractError::MissingTail => write!(f, "No message tailer"),
        }
    }
}

impl std::error::Error for ExtractError {}

/// The time tag of a GP2 line; the first [`TIMETAG_LEN`] bytes, or the
/// entire line if shorter. Not validated.
pub fn line_timetag(line: &[u8]) -> &[u8] {
    &line[..line.len().min(TIMETAG_LEN)]
}

/// Decode one two-digit hexadecimal token.
#[inline(always)]
fn hex_token_to_byte(hi: u8, lo: u8) -> Option<u8> {
    let hi = (hi as char).to_digit(16)?;
    let lo = (lo as char).to_digit(16)?;

    Some((hi * 16 + lo) as u8)
}

/// Find the OSP message in `line` and decode it into `buffer`.
///
/// `buffer` is cleared first. It is a scratch buffer owned by the caller and
/// reused for each line.
///
/// On success returns the line time tag, see [`line_timetag`].
pub fn extract_frame<'a>(
    line: &'a [u8],
    buffer: &mut Bytes,
) -> Result<&'a [u8], ExtractError> {
    defn!("({:?})", buffer_to_String_noraw(line));
    buffer.clear();
    let timetag = line_timetag(line);

    let head: LineIndex = match memmem::find(line, HEAD_MARKER) {
        Some(at) => at,
        None => {
            defx!("return MissingHeader");
            return Err(ExtractError::MissingHeader);
        }
    };
    defo!("head at {}", head);
    let tail_search = (head + TAIL_SEARCH_OFFSET).min(line.len());
    let tail: LineIndex = match memmem::find(&line[tail_search..], TAIL_MARKER) {
        Some(at) => tail_search + at,
        None => {
            defx!("return MissingTail");
            return Err(ExtractError::MissingTail);
        }
    };
    defo!("tail at {}", tail);

    let mut at: LineIndex = head + FIRST_TOKEN_OFFSET;
    while at < tail && buffer.len() < MSGSIZE {
        // a token is two hex digits followed by a separator, the separator
        // is not checked
        let byte = match (line.get(at), line.get(at + 1)) {
            (Some(hi), Some(lo)) => hex_token_to_byte(*hi, *lo),
            _ => None,
        };
        match byte {
            Some(b) => {
                buffer.push(b);
                at += HEX_TOKEN_LEN;
            }
            None => {
                defo!("token at {} is not hexadecimal; stop decoding", at);
                break;
            }
        }
    }
    defx!("decoded {} bytes", buffer.len());

    Ok(timetag)
}
