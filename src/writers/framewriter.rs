// src/writers/framewriter.rs

//! Implements a [`FrameWriter`], the writer of OSP binary files.
//!
//! An OSP binary file has no header or footer. It is a sequence of records,
//! one per OSP message, in order of extraction:
//!
//! ```text
//! ┌────────────────┬──────────────────────┐
//! │ payload length │ payload              │ …
//! │ 2 bytes, BE    │ payload length bytes │
//! └────────────────┴──────────────────────┘
//! ```

use std::fmt;
use std::io::{
    ErrorKind,
    Write,
};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::Count;
use crate::data::frame::OspFrame;

/// An OSP message could not be entirely written.
#[derive(Debug)]
pub enum WriteError {
    /// The byte sink stopped accepting bytes.
    Short {
        requested: usize,
        written: usize,
    },
    /// The byte sink returned an error.
    Io {
        requested: usize,
        written: usize,
        error: std::io::Error,
    },
}

impl WriteError {
    /// Count of bytes requested to be written.
    pub fn requested(&self) -> usize {
        match self {
            WriteError::Short { requested, .. } => *requested,
            WriteError::Io { requested, .. } => *requested,
        }
    }

    /// Count of bytes written before the failure.
    pub fn written(&self) -> usize {
        match self {
            WriteError::Short { written, .. } => *written,
            WriteError::Io { written, .. } => *written,
        }
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::Short { requested, written } => {
                write!(f, "Cannot write to binary output file; wrote {} of {} bytes", written, requested)
            }
            WriteError::Io { requested, written, error } => {
                write!(
                    f,
                    "Cannot write to binary output file; wrote {} of {} bytes; {}",
                    written, requested, error
                )
            }
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WriteError::Short { .. } => None,
            WriteError::Io { error, .. } => Some(error),
        }
    }
}

/// Writes [`OspFrame`]s to a byte sink in OSP binary format.
///
/// Only the payload length and payload of each message are written.
/// Writes are checked for the count of bytes accepted by the sink.
pub struct FrameWriter<W: Write> {
    writer: W,
    /// count of OSP messages written
    frames: Count,
    /// count of bytes written
    bytes: Count,
}

impl<W: Write> fmt::Debug for FrameWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameWriter")
            .field("frames", &self.frames)
            .field("bytes", &self.bytes)
            .finish()
    }
}

impl<W: Write> FrameWriter<W> {
    pub fn new(writer: W) -> FrameWriter<W> {
        FrameWriter {
            writer,
            frames: 0,
            bytes: 0,
        }
    }

    /// Write bytes, retrying partial writes until all `data` is accepted,
    /// the sink accepts nothing, or the sink errors.
    fn write_exact(&mut self, data: &[u8]) -> Result<(), WriteError> {
        let requested = data.len();
        let mut written: usize = 0;
        while written < requested {
            match self.writer.write(&data[written..]) {
                Ok(0) => {
                    defo!("writer accepted 0 bytes; wrote {} of {}", written, requested);
                    return Err(WriteError::Short { requested, written });
                }
                Ok(n) => {
                    written += n;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(error) => {
                    defo!("writer error {}; wrote {} of {}", error, written, requested);
                    return Err(WriteError::Io { requested, written, error });
                }
            }
        }

        Ok(())
    }

    /// Write one OSP message; `payload_len + 2` bytes.
    ///
    /// Returns the count of OSP messages written by this call, always `1`.
    pub fn write_frame(&mut self, frame: &OspFrame) -> Result<Count, WriteError> {
        defn!("(MID {}, payload_len {})", frame.mid(), frame.payload_len());
        let data = frame.as_output_bytes();
        match self.write_exact(data) {
            Ok(_) => {}
            Err(err) => {
                defx!("return Err({})", err);
                return Err(err);
            }
        }
        self.frames += 1;
        self.bytes += data.len() as Count;
        defx!("return Ok(1); frames {}", self.frames);

        Ok(1)
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    /// Count of OSP messages written.
    pub fn frames(&self) -> Count {
        self.frames
    }

    /// Count of bytes written.
    pub fn bytes(&self) -> Count {
        self.bytes
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
