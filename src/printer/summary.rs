// src/printer/summary.rs

//! CLI option `--summary` printing functions.
//! Only used by `gp2osp.rs`.

use std::io::Write;
use std::time::Duration;

use ::chrono::Utc;
use ::si_trace_print::defñ;
use ::termcolor::{Color, ColorSpec, WriteColor};

use crate::common::FPath;
use crate::data::datetime::{DateTimeL, DateTimeLOpt};
use crate::data::whitelist::Whitelist;
use crate::readers::pipeline::ExtractionResult;
use crate::readers::summary::SummaryExtraction;

/// For printing various levels of indentation.
const OPT_SUMMARY_PRINT_INDENT1: &str = "  ";
const OPT_SUMMARY_PRINT_INDENT2: &str = "      ";

/// datetime format for primary printing of datetime
const DATETIMEFMT: &str = "%Y-%m-%d %H:%M:%S %:z";
/// datetime format for secondary printing of datetime
const DATETIMEFMT_SEC: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Color for secondary information
const COLOR_DIMMED: Color = Color::Rgb(0x80, 0x80, 0x80);

/// Everything printed by [`print_summary`].
#[derive(Debug)]
pub struct SummaryPrintData<'a> {
    pub infile: &'a FPath,
    pub outfile: &'a FPath,
    pub window_from: &'a DateTimeL,
    pub window_to: &'a DateTimeL,
    pub whitelist: &'a Whitelist,
    pub result: &'a ExtractionResult,
    pub summary: &'a SummaryExtraction,
    pub duration: Duration,
}

/// print the passed `DateTimeL` as-is and as UTC with dimmed color
fn print_datetime_asis_utc_dimmed<W: WriteColor>(
    out: &mut W,
    dt: &DateTimeL,
) -> std::io::Result<()> {
    write!(out, "{} ", dt.format(DATETIMEFMT))?;
    let dt_utc = dt.with_timezone(&Utc);
    out.set_color(ColorSpec::new().set_fg(Some(COLOR_DIMMED)))?;
    write!(out, "({})", dt_utc.format(DATETIMEFMT_SEC))?;
    out.reset()?;
    writeln!(out)
}

fn print_datetimelopt<W: WriteColor>(
    out: &mut W,
    label: &str,
    dt_opt: &DateTimeLOpt,
) -> std::io::Result<()> {
    write!(out, "{}{:<21}: ", OPT_SUMMARY_PRINT_INDENT1, label)?;
    match dt_opt {
        Some(dt) => print_datetime_asis_utc_dimmed(out, dt),
        None => writeln!(out),
    }
}

/// Print the `--summary` statistics to `out`.
pub fn print_summary<W: WriteColor>(
    out: &mut W,
    data: &SummaryPrintData,
) -> std::io::Result<()> {
    defñ!();
    let summary = data.summary;
    let i1 = OPT_SUMMARY_PRINT_INDENT1;
    let i2 = OPT_SUMMARY_PRINT_INDENT2;

    writeln!(out)?;
    writeln!(out, "Summary:")?;
    writeln!(out, "{}{:<21}: {:?}", i1, "GP2 input file", data.infile)?;
    writeln!(out, "{}{:<21}: {:?}", i1, "OSP output file", data.outfile)?;
    print_datetimelopt(out, "From", &Some(*data.window_from))?;
    print_datetimelopt(out, "To", &Some(*data.window_to))?;
    writeln!(out, "{}{:<21}: {}", i1, "Wanted MIDs", data.whitelist)?;
    if data.whitelist.dropped() != 0 {
        writeln!(out, "{}{:<21}: {}", i1, "Wanted MIDs dropped", data.whitelist.dropped())?;
    }
    writeln!(out, "{}{:<21}: {}", i1, "Lines", summary.lines)?;
    writeln!(out, "{}{:<21}: {}", i1, "Bytes read", summary.bytes_read)?;
    writeln!(out, "{}{:<21}: {}", i1, "Lines dropped", summary.lines_dropped())?;
    for (label, count) in [
        ("missing header", summary.missing_header),
        ("missing tail", summary.missing_tail),
        ("before From", summary.before_window),
        ("after To", summary.after_window),
        ("bad time tag", summary.unparsable_timetag),
        ("no message data", summary.no_message_data),
        ("length mismatch", summary.length_mismatch),
        ("checksum mismatch", summary.checksum_mismatch),
        ("MID skipped", summary.mid_skipped),
    ] {
        writeln!(out, "{}{:<15}: {}", i2, label, count)?;
    }
    writeln!(out, "{}{:<21}: {}", i1, "Messages written", summary.frames_written)?;
    for (mid, count) in summary.mids_written.iter() {
        writeln!(out, "{}MID {:<11}: {}", i2, mid, count)?;
    }
    writeln!(out, "{}{:<21}: {}", i1, "Bytes written", summary.bytes_written)?;
    print_datetimelopt(out, "Datetime first", &summary.dt_first)?;
    print_datetimelopt(out, "Datetime last", &summary.dt_last)?;
    writeln!(out, "{}{:<21}: {}", i1, "Result", data.result)?;
    write!(out, "{}{:<21}: ", i1, "Duration")?;
    out.set_color(ColorSpec::new().set_fg(Some(COLOR_DIMMED)))?;
    write!(out, "{:?}", data.duration)?;
    out.reset()?;
    writeln!(out)?;
    out.flush()
}
