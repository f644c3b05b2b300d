// src/bin/gp2osp.rs

//! Driver program _gp2osp_.
//!
//! Processes user-passed command-line arguments.
//! Then extracts OSP messages from one GP2 debug file into one OSP binary
//! file using an [`ExtractionPipeline`].
//!
//! Exit codes:
//! - `0` success
//! - `1` bad command-line argument; time window, wanted MIDs list, log file
//! - `2` cannot open the GP2 input file
//! - `3` cannot create the OSP output file
//! - `4` writing the OSP output file or reading the GP2 input file failed
//!   during processing
//!
//! [`ExtractionPipeline`]: gp2osplib::readers::pipeline::ExtractionPipeline

#![allow(non_camel_case_types)]

use std::io::{
    BufReader,
    BufWriter,
};
use std::process::ExitCode;
use std::time::Instant;

use ::anyhow::{
    Context,
    Result as AnyResult,
};
use ::chrono::{
    DateTime,
    FixedOffset,
};
use ::clap::{
    Parser,
    ValueEnum,
};
use ::const_format::concatcp;
#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};
use ::si_trace_print::stack::stack_offset_set;

use ::gp2osplib::common::{
    FPath,
    File,
    MIDS_RINEX,
    WMSGSIZE,
};
use ::gp2osplib::data::datetime::{
    TimeWindow,
    TimestampParser,
};
use ::gp2osplib::data::whitelist::{
    Whitelist,
    WMSG_ALL,
    WMSG_RINEX,
};
use ::gp2osplib::debug::printers::{
    e_err,
    e_wrn,
};
use ::gp2osplib::printer::diagnostics::{
    ColorChoice,
    DiagnosticPrinter,
    DiagnosticSink,
    LogLevel,
    StandardStream,
};
use ::gp2osplib::printer::summary::{
    print_summary,
    SummaryPrintData,
};
use ::gp2osplib::readers::pipeline::{
    ExtractionPipeline,
    ExtractionResult,
    PipelineConfig,
};
use ::gp2osplib::writers::framewriter::{
    FrameWriter,
    WriteError,
};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const EXIT_OK: u8 = 0;
const EXIT_ERR_ARGS: u8 = 1;
const EXIT_ERR_INFILE: u8 = 2;
const EXIT_ERR_OUTFILE: u8 = 3;
const EXIT_ERR_PROCESSING: u8 = 4;

const CLI_INFILE_DEF: &str = "SLCLog.GP2";
const CLI_OUTFILE_DEF: &str = "DATA.OSP";
const CLI_FROMDATE_DEF: &str = "01/01/2014";
const CLI_FROMTIME_DEF: &str = "00:00:00";
const CLI_TODATE_DEF: &str = "31/12/2020";
const CLI_TOTIME_DEF: &str = "23:59:59";
const CLI_LLEVEL_DEF: &str = "INFO";

#[cfg(debug_assertions)]
const CLI_HELP_AFTER_NOTE_DEBUG: &str = "\nDEBUG BUILD";
#[cfg(not(debug_assertions))]
const CLI_HELP_AFTER_NOTE_DEBUG: &str = "";

/// `--help` _afterword_ message.
const CLI_HELP_AFTER: &str = concatcp!(
    "\
A GP2 line is a time tag followed by an OSP message in hexadecimal, e.g.
    29/10/2014 20:31:08.942 (0) A0 A2 00 12 33 ... 01 97 B0 B3

Lines with a time tag within the inclusive interval FROMDATE FROMTIME to
TODATE TOTIME, a valid message, and a wanted MID are written to OUTFILE.
Each written message is the 2-byte payload length followed by the payload.

WMSG may be:
    \"", WMSG_ALL, "\"            all MIDs
    \"", WMSG_RINEX, "\"          MIDs needed to generate RINEX files
    \"", WMSG_RINEX, ",<list>\"   MIDs needed for RINEX and MIDs in <list>
    \"<list>\"         MIDs in <list>
A <list> is decimal MIDs separated by any of \",;.:\", e.g. \"2,4,41\".
At most ", WMSGSIZE, " MIDs are kept.

Dates are \"dd/mm/yyyy\", times are \"hh:mm:ss\".
Time tags and dates are in the local system timezone unless --tz-offset is
passed, e.g. \"+01:00\", \"-0800\", \"Z\".

LLEVEL is one of SEVERE, WARNING, INFO, CONFIG, FINE, FINER, FINEST.

Exit codes:
    0  success
    1  bad argument
    2  cannot open INFILE
    3  cannot create OUTFILE
    4  writing OUTFILE or reading INFILE failed",
    CLI_HELP_AFTER_NOTE_DEBUG,
);

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.ColorChoice.html
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    ValueEnum, // from `clap`
)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

/// clap command-line arguments build-time definitions.
//
// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "gp2osp",
    // write expanded information for the `--version` output
    version = concatcp!(
        "\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Author: ", env!("CARGO_PKG_AUTHORS"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// GP2 debug input file.
    #[clap(
        short = 'i',
        long,
        verbatim_doc_comment,
        default_value = CLI_INFILE_DEF,
    )]
    infile: FPath,

    /// OSP binary output file. Overwritten if it exists.
    #[clap(
        short = 'o',
        long,
        verbatim_doc_comment,
        default_value = CLI_OUTFILE_DEF,
    )]
    outfile: FPath,

    /// Start date of the time window, "dd/mm/yyyy".
    #[clap(
        short = 'd',
        long,
        verbatim_doc_comment,
        default_value = CLI_FROMDATE_DEF,
    )]
    fromdate: String,

    /// Start time of the time window, "hh:mm:ss".
    #[clap(
        short = 't',
        long,
        verbatim_doc_comment,
        default_value = CLI_FROMTIME_DEF,
    )]
    fromtime: String,

    /// End date of the time window, "dd/mm/yyyy".
    #[clap(
        short = 'D',
        long,
        verbatim_doc_comment,
        default_value = CLI_TODATE_DEF,
    )]
    todate: String,

    /// End time of the time window, "hh:mm:ss".
    #[clap(
        short = 'T',
        long,
        verbatim_doc_comment,
        default_value = CLI_TOTIME_DEF,
    )]
    totime: String,

    /// Wanted MIDs of OSP messages to write.
    #[clap(
        short = 'w',
        long,
        verbatim_doc_comment,
        default_value = WMSG_RINEX,
    )]
    wmsg: String,

    /// Most verbose level of diagnostic messages printed.
    #[clap(
        short = 'l',
        long,
        verbatim_doc_comment,
        default_value = CLI_LLEVEL_DEF,
        value_parser = cli_parse_llevel,
    )]
    llevel: LogLevel,

    /// Write diagnostic messages to this file instead of stderr.
    #[clap(
        long = "log-file",
        verbatim_doc_comment,
    )]
    log_file: Option<FPath>,

    /// Timezone offset of GP2 time tags and of the time window dates.
    /// Example values, "+12", "-0800", "+02:00", or "Z".
    /// To pass a value with leading "-" use "=" notation,
    /// e.g. "--tz-offset=-0800".
    /// If not passed then the local system timezone is used.
    #[clap(
        long = "tz-offset",
        verbatim_doc_comment,
        value_parser = cli_process_tz_offset,
    )]
    tz_offset: Option<FixedOffset>,

    /// Choose to print diagnostic messages to stderr using colors.
    #[clap(
        required = false,
        short = 'c',
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,

    /// Print a summary of processing to stderr.
    #[clap(
        short,
        long,
        verbatim_doc_comment,
    )]
    summary: bool,
}

/// `clap` argument parser for `--llevel`.
fn cli_parse_llevel(llevel: &str) -> std::result::Result<LogLevel, String> {
    llevel.parse::<LogLevel>()
}

/// `clap` argument parser for `--tz-offset`.
fn cli_process_tz_offset(tzo: &str) -> std::result::Result<FixedOffset, String> {
    defn!("({:?})", tzo);
    let tzo_ = match tzo {
        "Z" | "z" | "UTC" | "utc" => "+00:00",
        _ => tzo,
    };
    // transform the timezone string to a `FixedOffset` instance
    // using a dummy datetime
    let mut data: String = String::from("2000-01-02 03:04:05 ");
    data.push_str(tzo_);
    for pattern in [
        "%Y-%m-%d %H:%M:%S %:z",
        "%Y-%m-%d %H:%M:%S %z",
        "%Y-%m-%d %H:%M:%S %#z",
    ] {
        if let Ok(dt) = DateTime::parse_from_str(data.as_str(), pattern) {
            defx!("return {:?}", dt.offset());
            return Ok(*dt.offset());
        }
    }
    defx!("return Err");

    Err(format!("Unable to parse a timezone offset for --tz-offset {:?}", tzo))
}

/// Settings resolved from the user-passed command-line arguments.
#[derive(Debug)]
struct CLI_Config {
    infile: FPath,
    outfile: FPath,
    pipeline: PipelineConfig,
    llevel: LogLevel,
    log_file: Option<FPath>,
    color_choice: ColorChoice,
    summary: bool,
}

/// Process user-passed CLI argument strings into expected types.
///
/// Returns the process exit code if there is an `Err`.
fn cli_process_args() -> Result<CLI_Config, u8> {
    let args = match CLI_Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // `--help` and `--version` are printed to stdout and are not
            // errors
            let _ = err.print();
            return match err.use_stderr() {
                true => Err(EXIT_ERR_ARGS),
                false => Err(EXIT_OK),
            };
        }
    };
    defo!("args {:?}", args);

    let parser = TimestampParser::new(args.tz_offset);
    let window = match TimeWindow::from_date_time_strs(
        &parser,
        args.fromdate.as_str(),
        args.fromtime.as_str(),
        args.todate.as_str(),
        args.totime.as_str(),
    ) {
        Ok(val) => val,
        Err(err) => {
            e_err!("{}", err);
            return Err(EXIT_ERR_ARGS);
        }
    };
    let whitelist = match Whitelist::from_wmsg(args.wmsg.as_str()) {
        Ok(val) => val,
        Err(err) => {
            e_err!("{}", err);
            return Err(EXIT_ERR_ARGS);
        }
    };
    let color_choice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    };

    Ok(CLI_Config {
        infile: args.infile,
        outfile: args.outfile,
        pipeline: PipelineConfig {
            parser,
            window,
            whitelist,
        },
        llevel: args.llevel,
        log_file: args.log_file,
        color_choice,
        summary: args.summary,
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// processing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Create the sink of diagnostic messages; the `--log-file` or stderr.
fn diagnostic_sink(config: &CLI_Config) -> AnyResult<Box<dyn DiagnosticSink>> {
    let sink: Box<dyn DiagnosticSink> = match &config.log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Cannot create log file {:?}", path))?;
            Box::new(DiagnosticPrinter::nocolor(file, config.llevel))
        }
        None => Box::new(DiagnosticPrinter::<StandardStream>::stderr(config.llevel, config.color_choice)),
    };

    Ok(sink)
}

fn open_infile(path: &FPath) -> AnyResult<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Cannot open input file {:?}", path))?;

    Ok(BufReader::new(file))
}

fn create_outfile(path: &FPath) -> AnyResult<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("Cannot create output file {:?}", path))?;

    Ok(BufWriter::new(file))
}

/// Log the resolved settings.
fn log_config(
    config: &CLI_Config,
    diag: &mut dyn DiagnosticSink,
) {
    diag.info(format_args!("GP2 input file: {}", config.infile));
    diag.info(format_args!("OSP output file: {}", config.outfile));
    diag.info(format_args!(
        "From {} to {}",
        config.pipeline.window.from(),
        config.pipeline.window.to()
    ));
    match config.pipeline.parser.tz_offset() {
        Some(tz_offset) => diag.info(format_args!("Timezone offset: {}", tz_offset)),
        None => diag.info(format_args!("Timezone offset: local")),
    }
    if config.pipeline.whitelist.mids() == &MIDS_RINEX[..] {
        diag.info(format_args!("MID messages to OSP: {} ({})", WMSG_RINEX, config.pipeline.whitelist));
    } else {
        diag.info(format_args!("MID messages to OSP: {}", config.pipeline.whitelist));
    }
    if config.pipeline.whitelist.dropped() != 0 {
        diag.warning(format_args!(
            "Wanted MIDs list is limited to {} MIDs; {} MIDs were dropped",
            WMSGSIZE,
            config.pipeline.whitelist.dropped()
        ));
    }
}

/// Open files, run the [`ExtractionPipeline`], print the summary.
/// Returns the process exit code.
fn processing(
    config: CLI_Config,
    start_time: Instant,
) -> u8 {
    defn!();
    let mut diag: Box<dyn DiagnosticSink> = match diagnostic_sink(&config) {
        Ok(val) => val,
        Err(err) => {
            e_err!("{:#}", err);
            defx!("return {}", EXIT_ERR_ARGS);
            return EXIT_ERR_ARGS;
        }
    };
    log_config(&config, diag.as_mut());

    let reader = match open_infile(&config.infile) {
        Ok(val) => val,
        Err(err) => {
            diag.severe(format_args!("{:#}", err));
            e_err!("{:#}", err);
            defx!("return {}", EXIT_ERR_INFILE);
            return EXIT_ERR_INFILE;
        }
    };
    let mut writer = match create_outfile(&config.outfile) {
        Ok(val) => FrameWriter::new(val),
        Err(err) => {
            diag.severe(format_args!("{:#}", err));
            e_err!("{:#}", err);
            defx!("return {}", EXIT_ERR_OUTFILE);
            return EXIT_ERR_OUTFILE;
        }
    };

    let pipeline = ExtractionPipeline::new(config.pipeline.clone());
    let (mut result, summary) = pipeline.run(reader, &mut writer, diag.as_mut());
    if result.is_done() {
        if let Err(err) = writer.flush() {
            let error = WriteError::Io {
                requested: 0,
                written: 0,
                error: err,
            };
            diag.severe(format_args!("{}", error));
            result = ExtractionResult::Fatal {
                written: result.count(),
                error,
            };
        }
    }
    diag.info(format_args!("End of data extraction. Messages extracted: {}", result.count()));
    defo!("result {}; signed count {}", result, result.as_signed_count());

    if config.summary {
        let mut stderr = StandardStream::stderr(config.color_choice);
        let data = SummaryPrintData {
            infile: &config.infile,
            outfile: &config.outfile,
            window_from: config.pipeline.window.from(),
            window_to: config.pipeline.window.to(),
            whitelist: &config.pipeline.whitelist,
            result: &result,
            summary: &summary,
            duration: start_time.elapsed(),
        };
        if let Err(err) = print_summary(&mut stderr, &data) {
            e_wrn!("Cannot print summary; {}", err);
        }
    }

    let exitcode = match result {
        ExtractionResult::Done(_) => EXIT_OK,
        ExtractionResult::Fatal { .. } | ExtractionResult::ReadError { .. } => EXIT_ERR_PROCESSING,
    };
    defx!("return {}", exitcode);

    exitcode
}

/// Process the user-passed command-line arguments.
/// Start function `processing`.
/// Determine a process return code.
pub fn main() -> ExitCode {
    let start_time = Instant::now();
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let config: CLI_Config = match cli_process_args() {
        Ok(val) => val,
        Err(code) => {
            defx!("exitcode {}", code);
            return ExitCode::from(code);
        }
    };

    let code: u8 = processing(config, start_time);
    defx!("exitcode {}", code);

    ExitCode::from(code)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use ::test_case::test_case;

    #[test_case("+01:00", Some(3600))]
    #[test_case("-0800", Some(-8 * 3600))]
    #[test_case("+12", Some(12 * 3600))]
    #[test_case("Z", Some(0))]
    #[test_case("UTC", Some(0))]
    #[test_case("EST", None)]
    #[test_case("", None)]
    fn test_cli_process_tz_offset(tzo: &str, expect: Option<i32>) {
        let result = cli_process_tz_offset(tzo);
        match expect {
            Some(secs) => {
                assert_eq!(result, Ok(FixedOffset::east_opt(secs).unwrap()));
            }
            None => {
                assert!(result.is_err(), "expected Err, got {:?}", result);
            }
        }
    }

    #[test_case("INFO", Some(LogLevel::Info))]
    #[test_case("finest", Some(LogLevel::Finest))]
    #[test_case("Severe", Some(LogLevel::Severe))]
    #[test_case("DEBUG", None)]
    fn test_cli_parse_llevel(llevel: &str, expect: Option<LogLevel>) {
        assert_eq!(cli_parse_llevel(llevel).ok(), expect);
    }

    #[test]
    fn test_cli_args_defaults() {
        let args = CLI_Args::try_parse_from(["gp2osp"]).unwrap();
        assert_eq!(args.infile, CLI_INFILE_DEF);
        assert_eq!(args.outfile, CLI_OUTFILE_DEF);
        assert_eq!(args.fromdate, CLI_FROMDATE_DEF);
        assert_eq!(args.fromtime, CLI_FROMTIME_DEF);
        assert_eq!(args.todate, CLI_TODATE_DEF);
        assert_eq!(args.totime, CLI_TOTIME_DEF);
        assert_eq!(args.wmsg, WMSG_RINEX);
        assert_eq!(args.llevel, LogLevel::Info);
        assert_eq!(args.log_file, None);
        assert_eq!(args.tz_offset, None);
        assert_eq!(args.color_choice, CLI_Color_Choice::auto);
        assert!(!args.summary);
    }

    #[test]
    fn test_cli_args_short() {
        let args = CLI_Args::try_parse_from([
            "gp2osp", "-i", "in.gp2", "-o", "out.osp", "-d", "02/03/2015", "-t", "01:02:03", "-D", "04/05/2016",
            "-T", "04:05:06", "-w", "ALL", "-l", "FINEST", "-c", "never", "-s",
        ])
        .unwrap();
        assert_eq!(args.infile, "in.gp2");
        assert_eq!(args.outfile, "out.osp");
        assert_eq!(args.fromdate, "02/03/2015");
        assert_eq!(args.fromtime, "01:02:03");
        assert_eq!(args.todate, "04/05/2016");
        assert_eq!(args.totime, "04:05:06");
        assert_eq!(args.wmsg, "ALL");
        assert_eq!(args.llevel, LogLevel::Finest);
        assert_eq!(args.color_choice, CLI_Color_Choice::never);
        assert!(args.summary);
    }

    #[test]
    fn test_cli_args_tz_offset() {
        let args = CLI_Args::try_parse_from(["gp2osp", "--tz-offset=-0500"]).unwrap();
        assert_eq!(args.tz_offset, Some(FixedOffset::west_opt(5 * 3600).unwrap()));
    }

    #[test]
    fn test_cli_args_bad_llevel() {
        assert!(CLI_Args::try_parse_from(["gp2osp", "-l", "VERBOSE"]).is_err());
    }
}
