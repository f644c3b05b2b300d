// src/printer/diagnostics.rs

//! Leveled diagnostic messages about processing of GP2 lines.
//!
//! Each GP2 line processed results in at most one [`Diagnostic`], passed to a
//! [`DiagnosticSink`]. A sink drops messages with a level more verbose than
//! its maximum [`LogLevel`].
//!
//! Diagnostics are advisory. The result of processing is only the value
//! returned by the [`ExtractionPipeline`].
//!
//! [`ExtractionPipeline`]: crate::readers::pipeline::ExtractionPipeline

use std::fmt;
use std::io::Write;
use std::str::FromStr;

#[doc(hidden)]
pub use ::termcolor::{
    Color,
    ColorChoice,
    ColorSpec,
    NoColor,
    StandardStream,
    WriteColor,
};

use crate::common::{Count, Mid};
use crate::data::datetime::{Result_Filter_DateTime2, TimestampError};
use crate::data::frame::FrameError;
use crate::debug::printers::de_err;
use crate::readers::frameextractor::ExtractError;
use crate::writers::framewriter::WriteError;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LogLevel
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Level of a diagnostic message, from least verbose to most verbose.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum LogLevel {
    Severe,
    Warning,
    Info,
    Config,
    Fine,
    Finer,
    Finest,
}

/// All `LogLevel` in order of verbosity.
pub const LOG_LEVELS: [LogLevel; 7] = [
    LogLevel::Severe,
    LogLevel::Warning,
    LogLevel::Info,
    LogLevel::Config,
    LogLevel::Fine,
    LogLevel::Finer,
    LogLevel::Finest,
];

impl LogLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Severe => "SEVERE",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Config => "CONFIG",
            LogLevel::Fine => "FINE",
            LogLevel::Finer => "FINER",
            LogLevel::Finest => "FINEST",
        }
    }

    /// Color of the level label when printing to a terminal.
    pub const fn color(&self) -> Option<Color> {
        match self {
            LogLevel::Severe => Some(Color::Red),
            LogLevel::Warning => Some(Color::Yellow),
            LogLevel::Info | LogLevel::Config => None,
            LogLevel::Fine | LogLevel::Finer | LogLevel::Finest => Some(Color::Cyan),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for level in LOG_LEVELS.iter() {
            if level.as_str().eq_ignore_ascii_case(s) {
                return Ok(*level);
            }
        }

        Err(format!(
            "Unknown log level {:?}, expected one of SEVERE, WARNING, INFO, CONFIG, FINE, FINER, FINEST",
            s
        ))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Diagnostic
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A diagnostic about one GP2 line. `timetag` is the raw line time tag.
#[derive(Debug)]
pub enum Diagnostic<'a> {
    /// line time tag is before or after the time window
    OutsideWindow {
        timetag: &'a [u8],
        check: Result_Filter_DateTime2,
    },
    /// line time tag could not be parsed; the line is treated as outside
    /// the time window
    UnparsableTimetag {
        timetag: &'a [u8],
        error: TimestampError,
    },
    /// line has no head or tail marker
    NoMessage {
        timetag: &'a [u8],
        error: ExtractError,
    },
    /// line message failed validation
    BadMessage {
        timetag: &'a [u8],
        error: FrameError,
    },
    Written {
        timetag: &'a [u8],
        mid: Mid,
    },
    Skipped {
        timetag: &'a [u8],
        mid: Mid,
    },
    /// writing the OSP binary file failed; processing stops
    CannotWrite {
        timetag: &'a [u8],
        error: &'a WriteError,
    },
    /// reading the GP2 file failed; processing stops
    CannotRead {
        lines: Count,
        error: &'a std::io::Error,
    },
}

impl Diagnostic<'_> {
    pub const fn level(&self) -> LogLevel {
        match self {
            Diagnostic::OutsideWindow { .. } => LogLevel::Finest,
            Diagnostic::UnparsableTimetag { .. } => LogLevel::Finest,
            Diagnostic::NoMessage { .. } => LogLevel::Warning,
            Diagnostic::BadMessage { .. } => LogLevel::Warning,
            Diagnostic::Written { .. } => LogLevel::Fine,
            Diagnostic::Skipped { .. } => LogLevel::Finest,
            Diagnostic::CannotWrite { .. } => LogLevel::Severe,
            Diagnostic::CannotRead { .. } => LogLevel::Severe,
        }
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::OutsideWindow { timetag, check } => {
                let s = match check {
                    Result_Filter_DateTime2::BeforeRange => "before",
                    Result_Filter_DateTime2::AfterRange => "after",
                    Result_Filter_DateTime2::InRange => "inside",
                };
                write!(f, "{} Time tag outside interval ({})", String::from_utf8_lossy(timetag), s)
            }
            Diagnostic::UnparsableTimetag { timetag, error } => {
                write!(f, "{} Time tag outside interval ({})", String::from_utf8_lossy(timetag), error)
            }
            Diagnostic::NoMessage { timetag, error } => {
                write!(f, "{} {}", String::from_utf8_lossy(timetag), error)
            }
            Diagnostic::BadMessage { timetag, error } => {
                write!(f, "{} {}", String::from_utf8_lossy(timetag), error)
            }
            Diagnostic::Written { timetag, mid } => {
                write!(f, "{} written MID {}", String::from_utf8_lossy(timetag), mid)
            }
            Diagnostic::Skipped { timetag, mid } => {
                write!(f, "{} skipped MID {}", String::from_utf8_lossy(timetag), mid)
            }
            Diagnostic::CannotWrite { timetag, error } => {
                write!(f, "{} {}", String::from_utf8_lossy(timetag), error)
            }
            Diagnostic::CannotRead { lines, error } => {
                write!(f, "Cannot read input file after line {}; {}", lines, error)
            }
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DiagnosticSink
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Receiver of diagnostic messages.
pub trait DiagnosticSink {
    /// Would a message at `level` be kept?
    fn enabled(&self, level: LogLevel) -> bool;

    /// Keep one message. Called only when `enabled(level)`.
    fn log(&mut self, level: LogLevel, args: fmt::Arguments<'_>);

    fn emit(&mut self, diagnostic: &Diagnostic<'_>) {
        let level = diagnostic.level();
        if self.enabled(level) {
            self.log(level, format_args!("{}", diagnostic));
        }
    }

    fn severe(&mut self, args: fmt::Arguments<'_>) {
        if self.enabled(LogLevel::Severe) {
            self.log(LogLevel::Severe, args);
        }
    }

    fn warning(&mut self, args: fmt::Arguments<'_>) {
        if self.enabled(LogLevel::Warning) {
            self.log(LogLevel::Warning, args);
        }
    }

    fn info(&mut self, args: fmt::Arguments<'_>) {
        if self.enabled(LogLevel::Info) {
            self.log(LogLevel::Info, args);
        }
    }
}

/// Prints diagnostic messages as lines `LEVEL message` to a [`WriteColor`],
/// e.g. stderr or a log file.
pub struct DiagnosticPrinter<W: WriteColor> {
    out: W,
    level_max: LogLevel,
}

impl DiagnosticPrinter<StandardStream> {
    /// A `DiagnosticPrinter` to stderr.
    pub fn stderr(level_max: LogLevel, color_choice: ColorChoice) -> DiagnosticPrinter<StandardStream> {
        DiagnosticPrinter::new(StandardStream::stderr(color_choice), level_max)
    }
}

impl<W: Write> DiagnosticPrinter<NoColor<W>> {
    /// A `DiagnosticPrinter` without colors, e.g. to a log file.
    pub fn nocolor(out: W, level_max: LogLevel) -> DiagnosticPrinter<NoColor<W>> {
        DiagnosticPrinter::new(NoColor::new(out), level_max)
    }
}

impl<W: WriteColor> DiagnosticPrinter<W> {
    pub fn new(out: W, level_max: LogLevel) -> DiagnosticPrinter<W> {
        DiagnosticPrinter { out, level_max }
    }

    pub fn level_max(&self) -> LogLevel {
        self.level_max
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn print(&mut self, level: LogLevel, args: fmt::Arguments<'_>) -> std::io::Result<()> {
        if let Some(color) = level.color() {
            self.out.set_color(ColorSpec::new().set_fg(Some(color)))?;
        }
        write!(self.out, "{}", level)?;
        self.out.reset()?;
        writeln!(self.out, " {}", args)?;
        self.out.flush()
    }
}

impl<W: WriteColor> DiagnosticSink for DiagnosticPrinter<W> {
    fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level_max
    }

    fn log(&mut self, level: LogLevel, args: fmt::Arguments<'_>) {
        match self.print(level, args) {
            Ok(_) => {}
            Err(_err) => {
                // diagnostics are advisory, do not fail processing
                de_err!("DiagnosticPrinter::print() error {}", _err);
            }
        }
    }
}

/// Keeps diagnostic messages in memory.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    level_max: Option<LogLevel>,
    messages: Vec<(LogLevel, String)>,
}

impl DiagnosticCollector {
    /// A `DiagnosticCollector` that keeps all messages.
    pub fn new() -> DiagnosticCollector {
        DiagnosticCollector {
            level_max: None,
            messages: Vec::new(),
        }
    }

    /// A `DiagnosticCollector` that keeps messages up to `level_max`.
    pub fn with_level(level_max: LogLevel) -> DiagnosticCollector {
        DiagnosticCollector {
            level_max: Some(level_max),
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[(LogLevel, String)] {
        self.messages.as_slice()
    }

    /// Count of messages at `level`.
    pub fn count(&self, level: LogLevel) -> usize {
        self.messages.iter().filter(|(l, _)| *l == level).count()
    }

    /// Is there a message at `level` containing `substr`?
    pub fn contains(&self, level: LogLevel, substr: &str) -> bool {
        self.messages.iter().any(|(l, m)| *l == level && m.contains(substr))
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn enabled(&self, level: LogLevel) -> bool {
        match self.level_max {
            Some(level_max) => level <= level_max,
            None => true,
        }
    }

    fn log(&mut self, level: LogLevel, args: fmt::Arguments<'_>) {
        self.messages.push((level, args.to_string()));
    }
}
