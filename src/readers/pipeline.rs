// src/readers/pipeline.rs

//! Implements an [`ExtractionPipeline`], the driver of processing GP2 lines
//! into an OSP binary file.
//!
//! Each GP2 line passes through these stages. A line failing a stage is
//! dropped and a [`Diagnostic`] is emitted.
//!
//! 1. [`extract_frame`]; find the head and tail markers and decode the
//!    hexadecimal message bytes
//! 2. [`TimeWindow::check`]; the line time tag is within the time window
//! 3. [`validate_frame`]; message bytes count, payload length, checksum
//! 4. [`Whitelist::is_wanted`]; the message MID is wanted
//! 5. [`FrameWriter::write_frame`]
//!
//! A failure to write is fatal and stops processing.
//!
//! Processing is single-threaded. Lines are processed in order, one at a
//! time.
//!
//! [`Diagnostic`]: crate::printer::diagnostics::Diagnostic
//! [`extract_frame`]: crate::readers::frameextractor::extract_frame
//! [`TimeWindow::check`]: crate::data::datetime::TimeWindow::check
//! [`validate_frame`]: crate::data::frame::validate_frame
//! [`Whitelist::is_wanted`]: crate::data::whitelist::Whitelist::is_wanted
//! [`FrameWriter::write_frame`]: crate::writers::framewriter::FrameWriter::write_frame

use std::fmt;
use std::io::{BufRead, ErrorKind, Write};

use ::more_asserts::debug_assert_le;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{Bytes, Count, Mid, MSGSIZE};
use crate::data::datetime::{
    Result_Filter_DateTime2,
    TimeWindow,
    TimestampError,
    TimestampParser,
};
use crate::data::frame::{validate_frame, FrameError};
use crate::data::whitelist::Whitelist;
use crate::printer::diagnostics::{Diagnostic, DiagnosticSink};
use crate::readers::frameextractor::{extract_frame, ExtractError};
use crate::readers::summary::SummaryExtraction;
use crate::writers::framewriter::{FrameWriter, WriteError};

/// Newline byte ending each GP2 line
#[allow(non_upper_case_globals)]
pub const NLu8: u8 = b'\n';

/// Settings resolved before processing begins. Not changed during
/// processing.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub parser: TimestampParser,
    pub window: TimeWindow,
    pub whitelist: Whitelist,
}

/// Processing stage of an [`ExtractionPipeline`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PipelineState {
    /// lines are being read and processed
    Reading,
    /// all lines were processed
    Done,
    /// writing failed or reading failed; no more lines will be processed
    Fatal,
}

/// What happened to one GP2 line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineOutcome {
    /// the OSP message was written
    Written(Mid),
    NoMessage(ExtractError),
    OutsideWindow(Result_Filter_DateTime2),
    UnparsableTimetag(TimestampError),
    BadMessage(FrameError),
    /// the OSP message MID is not wanted
    Skipped(Mid),
}

/// Final result of an [`ExtractionPipeline::run`].
#[derive(Debug)]
pub enum ExtractionResult {
    /// All lines were processed. Count of OSP messages written.
    Done(Count),
    /// Writing failed. Count of OSP messages written before the failure.
    Fatal {
        written: Count,
        error: WriteError,
    },
    /// Reading failed. Count of OSP messages written before the failure.
    ReadError {
        written: Count,
        error: std::io::Error,
    },
}

/// Signed counts at or below this value are failures.
pub const SIGNED_COUNT_FATAL_OFFSET: i64 = 4;

impl ExtractionResult {
    /// Count of OSP messages written.
    pub const fn count(&self) -> Count {
        match self {
            ExtractionResult::Done(count) => *count,
            ExtractionResult::Fatal { written, .. } => *written,
            ExtractionResult::ReadError { written, .. } => *written,
        }
    }

    pub const fn is_done(&self) -> bool {
        matches!(self, ExtractionResult::Done(_))
    }

    pub const fn is_fatal(&self) -> bool {
        !self.is_done()
    }

    /// The result as one signed count.
    /// Non-negative is the count of OSP messages written with no failure.
    /// Negative is a failure after writing `-count - 4` OSP messages.
    pub fn as_signed_count(&self) -> i64 {
        match self {
            ExtractionResult::Done(count) => *count as i64,
            _ => -(self.count() as i64) - SIGNED_COUNT_FATAL_OFFSET,
        }
    }
}

impl fmt::Display for ExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionResult::Done(count) => write!(f, "Done({})", count),
            ExtractionResult::Fatal { written, error } => write!(f, "Fatal(written {}; {})", written, error),
            ExtractionResult::ReadError { written, error } => {
                write!(f, "ReadError(written {}; {})", written, error)
            }
        }
    }
}

/// Drives processing of GP2 lines to OSP messages written by a
/// [`FrameWriter`].
///
/// The line buffer and the message byte buffer are reused for each line.
pub struct ExtractionPipeline {
    config: PipelineConfig,
    state: PipelineState,
    /// scratch buffer for one line
    line: Bytes,
    /// scratch buffer for the bytes decoded from one line
    frame_buffer: Bytes,
    summary: SummaryExtraction,
}

impl fmt::Debug for ExtractionPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionPipeline")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("summary", &self.summary)
            .finish()
    }
}

impl ExtractionPipeline {
    pub fn new(config: PipelineConfig) -> ExtractionPipeline {
        defñ!("({:?})", config);
        ExtractionPipeline {
            config,
            state: PipelineState::Reading,
            line: Bytes::with_capacity(MSGSIZE * 3 + 64),
            frame_buffer: Bytes::with_capacity(MSGSIZE),
            summary: SummaryExtraction::default(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn summary(&self) -> &SummaryExtraction {
        &self.summary
    }

    /// Process one GP2 line.
    ///
    /// Returns `Err` only if writing failed, after which the pipeline is
    /// [`PipelineState::Fatal`].
    pub fn process_line<W: Write>(
        &mut self,
        line: &[u8],
        writer: &mut FrameWriter<W>,
        diag: &mut dyn DiagnosticSink,
    ) -> Result<LineOutcome, WriteError> {
        debug_assert_eq!(self.state, PipelineState::Reading, "process_line called in state {:?}", self.state);
        self.summary.lines += 1;
        self.summary.bytes_read += line.len() as Count;

        // 1. find and decode the message
        let timetag: &[u8] = match extract_frame(line, &mut self.frame_buffer) {
            Ok(timetag) => timetag,
            Err(error) => {
                match error {
                    ExtractError::MissingHeader => self.summary.missing_header += 1,
                    ExtractError::MissingTail => self.summary.missing_tail += 1,
                }
                diag.emit(&Diagnostic::NoMessage { timetag: line_timetag_(line), error });
                return Ok(LineOutcome::NoMessage(error));
            }
        };

        // 2. time window
        let dt = match self.config.parser.parse_bytes(timetag) {
            Ok(dt) => dt,
            Err(error) => {
                self.summary.unparsable_timetag += 1;
                diag.emit(&Diagnostic::UnparsableTimetag { timetag, error });
                return Ok(LineOutcome::UnparsableTimetag(error));
            }
        };
        let check = self.config.window.check(&dt);
        match check {
            Result_Filter_DateTime2::InRange => {}
            Result_Filter_DateTime2::BeforeRange => {
                self.summary.before_window += 1;
                diag.emit(&Diagnostic::OutsideWindow { timetag, check });
                return Ok(LineOutcome::OutsideWindow(check));
            }
            Result_Filter_DateTime2::AfterRange => {
                self.summary.after_window += 1;
                diag.emit(&Diagnostic::OutsideWindow { timetag, check });
                return Ok(LineOutcome::OutsideWindow(check));
            }
        }

        // 3. validate the message
        let frame = match validate_frame(&self.frame_buffer) {
            Ok(frame) => frame,
            Err(error) => {
                match error {
                    FrameError::TooShortOrTooLong { .. } => self.summary.no_message_data += 1,
                    FrameError::LengthMismatch { .. } => self.summary.length_mismatch += 1,
                    FrameError::ChecksumMismatch { .. } => self.summary.checksum_mismatch += 1,
                }
                diag.emit(&Diagnostic::BadMessage { timetag, error });
                return Ok(LineOutcome::BadMessage(error));
            }
        };

        // 4. wanted MID
        let mid = frame.mid();
        if !self.config.whitelist.is_wanted(mid) {
            self.summary.mid_skipped += 1;
            diag.emit(&Diagnostic::Skipped { timetag, mid });
            return Ok(LineOutcome::Skipped(mid));
        }

        // 5. write
        match writer.write_frame(&frame) {
            Ok(_count) => {
                debug_assert_le!(frame.as_output_bytes().len(), MSGSIZE);
                self.summary.written(mid, frame.as_output_bytes().len(), &dt);
                diag.emit(&Diagnostic::Written { timetag, mid });

                Ok(LineOutcome::Written(mid))
            }
            Err(error) => {
                self.state = PipelineState::Fatal;
                diag.emit(&Diagnostic::CannotWrite { timetag, error: &error });

                Err(error)
            }
        }
    }

    /// Process all lines from `reader`, front to back, until the end of
    /// input or a failure.
    ///
    /// Returns the final result and the accumulated statistics.
    pub fn run<R: BufRead, W: Write>(
        mut self,
        mut reader: R,
        writer: &mut FrameWriter<W>,
        diag: &mut dyn DiagnosticSink,
    ) -> (ExtractionResult, SummaryExtraction) {
        defn!();
        let mut line: Bytes = std::mem::take(&mut self.line);
        loop {
            line.clear();
            match reader.read_until(NLu8, &mut line) {
                Ok(0) => {
                    self.state = PipelineState::Done;
                    break;
                }
                Ok(_) => {}
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(error) => {
                    self.state = PipelineState::Fatal;
                    diag.emit(&Diagnostic::CannotRead {
                        lines: self.summary.lines,
                        error: &error,
                    });
                    let result = ExtractionResult::ReadError {
                        written: writer.frames(),
                        error,
                    };
                    defx!("return {}", result);
                    return (result, self.summary);
                }
            }
            match self.process_line(&line, writer, diag) {
                Ok(_outcome) => {
                    defo!("line {} {:?}", self.summary.lines, _outcome);
                }
                Err(error) => {
                    let result = ExtractionResult::Fatal {
                        written: writer.frames(),
                        error,
                    };
                    defx!("return {}", result);
                    return (result, self.summary);
                }
            }
        }
        let result = ExtractionResult::Done(writer.frames());
        defx!("return {}", result);

        (result, self.summary)
    }

    /// Process all `lines` in order. Like [`ExtractionPipeline::run`] for
    /// lines already in memory.
    pub fn run_lines<I, S, W>(
        mut self,
        lines: I,
        writer: &mut FrameWriter<W>,
        diag: &mut dyn DiagnosticSink,
    ) -> (ExtractionResult, SummaryExtraction)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
        W: Write,
    {
        defn!();
        for line in lines {
            if let Err(error) = self.process_line(line.as_ref(), writer, diag) {
                let result = ExtractionResult::Fatal {
                    written: writer.frames(),
                    error,
                };
                defx!("return {}", result);
                return (result, self.summary);
            }
        }
        self.state = PipelineState::Done;
        let result = ExtractionResult::Done(writer.frames());
        defx!("return {}", result);

        (result, self.summary)
    }
}

/// The time tag of a line for diagnostics; the line end is not printed.
fn line_timetag_(line: &[u8]) -> &[u8] {
    let timetag = crate::readers::frameextractor::line_timetag(line);
    let end = timetag
        .iter()
        .position(|b| *b == b'\r' || *b == NLu8)
        .unwrap_or(timetag.len());

    &timetag[..end]
}
