// src/readers/summary.rs

//! Implements `SummaryExtraction` statistics tracking struct.

use std::collections::BTreeMap;
use std::fmt;

use crate::common::{Count, Mid};
use crate::data::datetime::{DateTimeL, DateTimeLOpt};

/// Accumulated statistics about processing of one GP2 file by an
/// [`ExtractionPipeline`].
///
/// For CLI option `--summary`.
///
/// [`ExtractionPipeline`]: crate::readers::pipeline::ExtractionPipeline
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SummaryExtraction {
    /// count of lines read
    pub lines: Count,
    /// count of bytes read
    pub bytes_read: Count,
    /// lines with no head marker
    pub missing_header: Count,
    /// lines with a head marker but no tail marker
    pub missing_tail: Count,
    /// lines with a time tag before the time window
    pub before_window: Count,
    /// lines with a time tag after the time window
    pub after_window: Count,
    /// lines with a time tag that could not be parsed
    pub unparsable_timetag: Count,
    /// lines with too few or too many message bytes
    pub no_message_data: Count,
    /// lines where payload length did not agree with bytes read
    pub length_mismatch: Count,
    /// lines where the checksum did not agree
    pub checksum_mismatch: Count,
    /// lines with a MID not wanted
    pub mid_skipped: Count,
    /// OSP messages written
    pub frames_written: Count,
    /// bytes written
    pub bytes_written: Count,
    /// count of OSP messages written per MID
    pub mids_written: BTreeMap<Mid, Count>,
    /// datetime of the first OSP message written
    pub dt_first: DateTimeLOpt,
    /// datetime of the last OSP message written
    pub dt_last: DateTimeLOpt,
}

impl SummaryExtraction {
    /// Update for one OSP message written.
    pub fn written(&mut self, mid: Mid, nbytes: usize, dt: &DateTimeL) {
        self.frames_written += 1;
        self.bytes_written += nbytes as Count;
        *self.mids_written.entry(mid).or_insert(0) += 1;
        match self.dt_first {
            Some(dt_first) if dt_first <= *dt => {}
            _ => self.dt_first = Some(*dt),
        }
        match self.dt_last {
            Some(dt_last) if *dt <= dt_last => {}
            _ => self.dt_last = Some(*dt),
        }
    }

    /// Count of lines that were not written.
    pub fn lines_dropped(&self) -> Count {
        self.missing_header
            + self.missing_tail
            + self.before_window
            + self.after_window
            + self.unparsable_timetag
            + self.no_message_data
            + self.length_mismatch
            + self.checksum_mismatch
            + self.mid_skipped
    }
}

impl fmt::Debug for SummaryExtraction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("")
            .field("lines", &self.lines)
            .field("bytes read", &self.bytes_read)
            .field("missing header", &self.missing_header)
            .field("missing tail", &self.missing_tail)
            .field("before window", &self.before_window)
            .field("after window", &self.after_window)
            .field("unparsable time tag", &self.unparsable_timetag)
            .field("no message data", &self.no_message_data)
            .field("length mismatch", &self.length_mismatch)
            .field("checksum mismatch", &self.checksum_mismatch)
            .field("MID skipped", &self.mid_skipped)
            .field("frames written", &self.frames_written)
            .field("bytes written", &self.bytes_written)
            .finish()
    }
}
