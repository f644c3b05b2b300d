// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

//! Common type aliases and constants shared by all modules of _gp2osplib_.

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file-handling, command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use std::fs::File;

/// `F`ile `Path` as passed by the user
pub type FPath = String;

/// A general-purpose counting type, for statistics and returned counts
pub type Count = u64;

/// Sequence of Bytes
pub type Bytes = Vec<u8>;

/// Index into a line of text, in bytes
pub type LineIndex = usize;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GP2 lines and OSP messages
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Maximum OSP payload size in bytes
pub const PAYLOAD_SZ_MAX: usize = 2048;

/// Hard upper bound of message bytes decoded from one GP2 line:
/// the maximum payload size plus the 2-byte payload length.
pub const MSGSIZE: usize = PAYLOAD_SZ_MAX + 2;

/// Bytes of OSP framing around the payload that are kept in the raw
/// decoded buffer: 2-byte payload length and 2-byte checksum.
pub const FRAME_OVERHEAD: usize = 4;

/// Count of characters of the time tag leading each GP2 line,
/// e.g. `29/10/2014 20:31:08.942`
pub const TIMETAG_LEN: LineIndex = 23;

/// The OSP synchro sequence preceding a message, as written in a GP2 line
pub const HEAD_MARKER: &[u8] = b"A0 A2";

/// The OSP end sequence following a message, as written in a GP2 line
pub const TAIL_MARKER: &[u8] = b"B0 B3";

/// Each hexadecimal byte token in a GP2 line is two digits and a separator
pub const HEX_TOKEN_LEN: LineIndex = 3;

/// Mask applied to the additive OSP checksum (15 bits)
pub const CHECKSUM_MASK: u16 = 0x7FFF;

/// An OSP Message IDentifier, the first byte of the payload
pub type Mid = u8;

/// Maximum count of MIDs in a [`Whitelist`].
///
/// [`Whitelist`]: crate::data::whitelist::Whitelist
pub const WMSGSIZE: usize = 100;

/// The list of OSP MIDs needed to generate RINEX data
pub const MIDS_RINEX: [Mid; 12] = [2, 6, 7, 56, 8, 11, 12, 15, 28, 50, 64, 75];
