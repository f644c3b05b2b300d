// src/tests/common.rs

//! Common data and helpers for tests of _gp2osplib_.

#![allow(non_upper_case_globals)]
#![allow(dead_code)]

use std::io::{
    Error,
    ErrorKind,
    Write,
};

use ::lazy_static::lazy_static;

use crate::common::Mid;
use crate::data::datetime::{
    DateTimeL,
    FixedOffset,
    TimeWindow,
    TimeZone,
    TimestampParser,
};
use crate::data::frame::osp_checksum;
use crate::data::whitelist::Whitelist;
use crate::debug::printers::bytes_to_hex_tokens;
use crate::readers::pipeline::PipelineConfig;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// timezones
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

lazy_static! {
    pub static ref FO_0: FixedOffset = FixedOffset::east_opt(0).unwrap();
    pub static ref FO_P1: FixedOffset = FixedOffset::east_opt(3600).unwrap();
    pub static ref FO_M8: FixedOffset = FixedOffset::west_opt(3600 * 8).unwrap();
}

/// A `TimestampParser` at UTC so tests do not depend on the local timezone.
pub fn parser_z() -> TimestampParser {
    TimestampParser::new(Some(*FO_0))
}

/// A `DateTimeL` at UTC.
pub fn dtz(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTimeL {
    FO_0.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap()
}

/// A `TimeWindow` at UTC from `"dd/mm/yyyy hh:mm:ss"` strings.
pub fn window_z(
    from: &str,
    to: &str,
) -> TimeWindow {
    let parser = parser_z();
    TimeWindow::new(parser.parse(from).unwrap(), parser.parse(to).unwrap()).unwrap()
}

/// A `TimeWindow` at UTC covering all of 2014.
pub fn window_z_2014() -> TimeWindow {
    window_z("01/01/2014 00:00:00", "31/12/2014 23:59:59")
}

pub fn config_z(
    window: TimeWindow,
    whitelist: Whitelist,
) -> PipelineConfig {
    PipelineConfig {
        parser: parser_z(),
        window,
        whitelist,
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GP2 lines
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub const TIMETAG_MID51: &str = "29/10/2014 20:31:08.942";

/// A GP2 line with a valid OSP message, MID `0x33`, payload length `0x12`
pub const LINE_MID51: &str = "29/10/2014 20:31:08.942 (0) A0 A2 00 12 33 06 00 00 00 00 00 00 00 19 00 00 00 00 00 00 64 E1 01 97 B0 B3\r\n";

/// The decoded message bytes of [`LINE_MID51`], head and tail removed
pub const RAW_MID51: [u8; 22] = [
    0x00, 0x12, 0x33, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x19, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x64, 0xE1, 0x01, 0x97,
];

/// The bytes of [`LINE_MID51`] written to an OSP binary file
pub const OSP_MID51: [u8; 20] = [
    0x00, 0x12, 0x33, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x19, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x64, 0xE1,
];

/// The raw decoded message bytes for `payload`; payload length, payload,
/// checksum.
pub fn raw_frame(payload: &[u8]) -> Vec<u8> {
    let mut raw: Vec<u8> = Vec::with_capacity(payload.len() + 4);
    raw.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    raw.extend_from_slice(payload);
    raw.extend_from_slice(&osp_checksum(payload).to_be_bytes());

    raw
}

/// The bytes written to an OSP binary file for `payload`.
pub fn osp_record(payload: &[u8]) -> Vec<u8> {
    let mut rec: Vec<u8> = Vec::with_capacity(payload.len() + 2);
    rec.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    rec.extend_from_slice(payload);

    rec
}

/// A GP2 line with `timetag` and raw message bytes `raw`.
pub fn gp2_line_raw(
    timetag: &str,
    raw: &[u8],
) -> String {
    format!("{} (0) A0 A2 {} B0 B3\r\n", timetag, bytes_to_hex_tokens(raw))
}

/// A GP2 line with `timetag` and a valid OSP message for `payload`.
pub fn gp2_line(
    timetag: &str,
    payload: &[u8],
) -> String {
    gp2_line_raw(timetag, &raw_frame(payload))
}

/// A GP2 line with `timetag` and a valid OSP message with MID `mid` and
/// two more payload bytes.
pub fn gp2_line_mid(
    timetag: &str,
    mid: Mid,
) -> String {
    gp2_line(timetag, &[mid, 0x01, 0x02])
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// byte sinks
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Accepts `capacity` bytes then accepts nothing, like a full disk.
#[derive(Debug, Default)]
pub struct FullWriter {
    pub data: Vec<u8>,
    pub capacity: usize,
}

impl FullWriter {
    pub fn new(capacity: usize) -> FullWriter {
        FullWriter {
            data: Vec::new(),
            capacity,
        }
    }
}

impl Write for FullWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = buf.len().min(self.capacity - self.data.len());
        self.data.extend_from_slice(&buf[..n]);

        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Accepts `capacity` bytes then returns an error.
#[derive(Debug, Default)]
pub struct ErrWriter {
    pub data: Vec<u8>,
    pub capacity: usize,
}

impl ErrWriter {
    pub fn new(capacity: usize) -> ErrWriter {
        ErrWriter {
            data: Vec::new(),
            capacity,
        }
    }
}

impl Write for ErrWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.data.len() >= self.capacity {
            return Err(Error::new(ErrorKind::Other, "ErrWriter is full"));
        }
        let n = buf.len().min(self.capacity - self.data.len());
        self.data.extend_from_slice(&buf[..n]);

        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Accepts at most `chunk` bytes per call to `write`. Every other call is
/// interrupted.
#[derive(Debug, Default)]
pub struct ChunkWriter {
    pub data: Vec<u8>,
    pub chunk: usize,
    pub calls: usize,
}

impl ChunkWriter {
    pub fn new(chunk: usize) -> ChunkWriter {
        ChunkWriter {
            data: Vec::new(),
            chunk,
            calls: 0,
        }
    }
}

impl Write for ChunkWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.calls += 1;
        if self.calls % 2 == 1 {
            return Err(Error::new(ErrorKind::Interrupted, "ChunkWriter interrupted"));
        }
        let n = buf.len().min(self.chunk);
        self.data.extend_from_slice(&buf[..n]);

        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Parse the records of an OSP binary file.
pub fn osp_records(data: &[u8]) -> Vec<Vec<u8>> {
    let mut records: Vec<Vec<u8>> = Vec::new();
    let mut at: usize = 0;
    while at < data.len() {
        let len = u16::from_be_bytes([data[at], data[at + 1]]) as usize;
        records.push(data[at + 2..at + 2 + len].to_vec());
        at += 2 + len;
    }
    assert_eq!(at, data.len(), "trailing bytes in OSP data");

    records
}
