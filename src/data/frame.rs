// src/data/frame.rs

//! Validate the raw bytes of an OSP message decoded from a GP2 line.
//!
//! A raw OSP message, as decoded from the hexadecimal text between the head
//! and tail markers of a GP2 line, is
//!
//! ```text
//! ┌────────────────┬─────────────────────────────┬────────────────┐
//! │ payload length │ payload                     │ checksum       │
//! │ 2 bytes, BE    │ payload length bytes        │ 2 bytes, BE    │
//! │                │ byte 0 is the MID           │                │
//! └────────────────┴─────────────────────────────┴────────────────┘
//! ```
//!
//! The checksum is the sum of all payload bytes masked to 15 bits.
//!
//! A valid message is an [`OspFrame`]. The bytes written to an OSP binary
//! file are the payload length and the payload, see
//! [`OspFrame::as_output_bytes`].

use std::fmt;

use ::more_asserts::debug_assert_ge;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{
    Mid,
    CHECKSUM_MASK,
    FRAME_OVERHEAD,
    MSGSIZE,
};

/// Reasons a raw OSP message is rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrameError {
    /// Count of decoded bytes is `<= 4` or `>= MSGSIZE`.
    TooShortOrTooLong {
        bytes_read: usize,
    },
    /// Count of decoded bytes does not agree with the declared payload
    /// length plus framing.
    LengthMismatch {
        payload_len: usize,
        bytes_read: usize,
    },
    /// The computed checksum does not agree with the message checksum.
    ChecksumMismatch {
        computed: u16,
        expected: u16,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::TooShortOrTooLong { .. } => write!(f, "No message data"),
            FrameError::LengthMismatch { payload_len, bytes_read } => write!(
                f,
                "PayloadLen={}<>{}=BytesRead",
                payload_len,
                // reported as the count of bytes that could be payload
                bytes_read.saturating_sub(FRAME_OVERHEAD),
            ),
            FrameError::ChecksumMismatch { .. } => write!(f, "Wrong checksum"),
        }
    }
}

impl std::error::Error for FrameError {}

/// Compute the OSP checksum of `payload`: the sum of all bytes masked to
/// 15 bits.
pub fn osp_checksum(payload: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    for b in payload.iter() {
        sum += *b as u32;
        sum &= CHECKSUM_MASK as u32;
    }

    sum as u16
}

/// A validated OSP message, borrowed from the raw decoded bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OspFrame<'a> {
    /// the raw message; payload length, payload, checksum
    raw: &'a [u8],
    payload_len: usize,
}

impl<'a> OspFrame<'a> {
    /// Declared payload length.
    pub fn payload_len(&self) -> usize {
        self.payload_len
    }

    /// The payload; first byte is the MID.
    pub fn payload(&self) -> &'a [u8] {
        &self.raw[2..2 + self.payload_len]
    }

    /// The Message IDentifier.
    pub fn mid(&self) -> Mid {
        self.raw[2]
    }

    /// The checksum carried by the message.
    pub fn checksum(&self) -> u16 {
        u16::from_be_bytes([self.raw[2 + self.payload_len], self.raw[3 + self.payload_len]])
    }

    /// The bytes written to an OSP binary file: payload length and payload.
    /// Always `payload_len + 2` bytes.
    pub fn as_output_bytes(&self) -> &'a [u8] {
        &self.raw[..2 + self.payload_len]
    }
}

/// Validate raw OSP message bytes.
///
/// Checks are done in order and the first failure is returned:
/// 1. byte count bounds
/// 2. byte count agrees with declared payload length
/// 3. checksum
pub fn validate_frame(raw: &[u8]) -> Result<OspFrame<'_>, FrameError> {
    defn!("({} bytes)", raw.len());
    let bytes_read = raw.len();
    if bytes_read <= FRAME_OVERHEAD || bytes_read >= MSGSIZE {
        defx!("return TooShortOrTooLong");
        return Err(FrameError::TooShortOrTooLong { bytes_read });
    }
    let payload_len: usize = u16::from_be_bytes([raw[0], raw[1]]) as usize;
    if bytes_read != payload_len + FRAME_OVERHEAD {
        defx!("return LengthMismatch payload_len {} bytes_read {}", payload_len, bytes_read);
        return Err(FrameError::LengthMismatch { payload_len, bytes_read });
    }
    debug_assert_ge!(payload_len, 1, "payload must hold a MID");
    let frame = OspFrame { raw, payload_len };
    let computed = osp_checksum(frame.payload());
    let expected = frame.checksum();
    if computed != expected {
        defx!("return ChecksumMismatch computed {:#06X} expected {:#06X}", computed, expected);
        return Err(FrameError::ChecksumMismatch { computed, expected });
    }
    defx!("return Ok MID {}", frame.mid());

    Ok(frame)
}
