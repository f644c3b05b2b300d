// src/data/datetime.rs

//! Functions to scan GP2 time tags and user-passed datetime options and
//! transform them to chrono [`DateTime`] instances, and to compare those
//! instances to a time window.
//!
//! A GP2 line begins with a time tag like `29/10/2014 20:31:08.942`.
//! The time tag is scanned as six integers, day, month, year, hour, minute,
//! second, in the manner of C `sscanf("%d/%d/%d %d:%d:%d")`. Trailing text,
//! e.g. the milliseconds `.942`, is ignored.
//!
//! Scanned values are not range checked. They are normalized as C `mktime`
//! would, e.g. month `13` is January of the following year, day `32` of
//! January is February 1.
//!
//! Time tags are presumed to be in the local system timezone unless the
//! [`TimestampParser`] was created with a fixed offset. The same
//! [`TimestampParser`] resolves the [`TimeWindow`] boundaries so both sides
//! of the comparison use the same timezone.
//!
//! [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html

#![allow(non_camel_case_types)]

use std::fmt;

#[doc(hidden)]
pub use ::chrono::{
    DateTime,
    Datelike,
    Duration,
    FixedOffset,
    Local,
    NaiveDate,
    NaiveDateTime,
    Offset,
    TimeZone,
    Timelike,
};
use ::lazy_static::lazy_static;
use ::more_asserts::debug_assert_le;
use ::regex::Regex;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

#[cfg(any(debug_assertions, test))]
use crate::debug::printers::str_to_String_noraw;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime scanning
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A chrono [`DateTime`] type used in _gp2osplib_.
///
/// [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
pub type DateTimeL = DateTime<FixedOffset>;
pub type DateTimeLOpt = Option<DateTimeL>;

/// The six integers scanned from a datetime string, in scanning order:
/// day, month, year, hour, minute, second.
pub type DmyHms = [i64; 6];

/// Regular expression equivalent of C `sscanf` format `"%d/%d/%d %d:%d:%d"`.
///
/// Each `%d` skips leading whitespace and accepts an optional sign.
/// The space in the format matches any amount of whitespace, including none.
pub const RP_DMY_HMS: &str =
    r"^\s*([+-]?\d+)/\s*([+-]?\d+)/\s*([+-]?\d+)\s*([+-]?\d+):\s*([+-]?\d+):\s*([+-]?\d+)";

lazy_static! {
    static ref REGEX_DMY_HMS: Regex = {
        defñ!("lazy_static! REGEX_DMY_HMS");

        Regex::new(RP_DMY_HMS).unwrap()
    };
}

/// Failure to transform a datetime string to a [`DateTimeL`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimestampError {
    /// The six integer fields could not all be scanned, or the scanned
    /// values are beyond the range of the calendar.
    MalformedTimestamp,
    /// The scanned datetime does not exist in the local timezone, e.g. it
    /// falls within a daylight saving time gap.
    NonexistentLocalTime,
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampError::MalformedTimestamp => write!(f, "malformed date or time"),
            TimestampError::NonexistentLocalTime => write!(f, "date and time does not exist in the local timezone"),
        }
    }
}

impl std::error::Error for TimestampError {}

/// Scan the six datetime integers from `data`.
///
/// Returns `None` if any of the six cannot be scanned.
pub fn scan_dmy_hms(data: &str) -> Option<DmyHms> {
    let captures = REGEX_DMY_HMS.captures(data)?;
    let mut dmyhms: DmyHms = [0; 6];
    for (i, val) in dmyhms.iter_mut().enumerate() {
        let s = captures.get(i + 1)?.as_str();
        // `i64::from_str` does not accept a leading '+'
        let s = s.strip_prefix('+').unwrap_or(s);
        *val = s.parse::<i64>().ok()?;
    }

    Some(dmyhms)
}

/// Transform scanned datetime integers to a `NaiveDateTime`, normalizing
/// out-of-range values the way C `mktime` does.
///
/// Returns `None` if the result is beyond the range chrono can represent.
pub fn dmyhms_to_naive(dmyhms: &DmyHms) -> Option<NaiveDateTime> {
    let [day, month, year, hour, minute, second] = *dmyhms;
    // months are normalized first so that day offsets are relative to the
    // normalized month
    let months: i64 = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
    let year_n: i32 = i32::try_from(months.div_euclid(12)).ok()?;
    let month_n: u32 = (months.rem_euclid(12) + 1) as u32;
    debug_assert_le!(month_n, 12);
    let date = NaiveDate::from_ymd_opt(year_n, month_n, 1)?
        .checked_add_signed(Duration::try_days(day.checked_sub(1)?)?)?;
    let naive = date
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::try_hours(hour)?)?
        .checked_add_signed(Duration::try_minutes(minute)?)?
        .checked_add_signed(Duration::try_seconds(second)?)?;

    Some(naive)
}

/// Transforms GP2 time tags and user-passed `dd/mm/yyyy hh:mm:ss` strings
/// into [`DateTimeL`].
///
/// By default datetimes are interpreted in the local system timezone.
/// This also applies to the [`TimeWindow`] boundaries resolved by the same
/// instance. A device may log in a timezone different from the operator's,
/// in which case a fixed offset should be passed to [`TimestampParser::new`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TimestampParser {
    /// `None` is the local system timezone
    tz_offset: Option<FixedOffset>,
}

impl TimestampParser {
    pub fn new(tz_offset: Option<FixedOffset>) -> TimestampParser {
        TimestampParser { tz_offset }
    }

    /// A `TimestampParser` using the local system timezone.
    pub fn local() -> TimestampParser {
        TimestampParser { tz_offset: None }
    }

    pub fn tz_offset(&self) -> Option<FixedOffset> {
        self.tz_offset
    }

    /// Parse a `dd/mm/yyyy hh:mm:ss` string, trailing text is ignored.
    pub fn parse(&self, data: &str) -> Result<DateTimeL, TimestampError> {
        defn!("({:?})", str_to_String_noraw(data));
        let dmyhms = match scan_dmy_hms(data) {
            Some(val) => val,
            None => {
                defx!("scan_dmy_hms failed; return MalformedTimestamp");
                return Err(TimestampError::MalformedTimestamp);
            }
        };
        let naive = match dmyhms_to_naive(&dmyhms) {
            Some(val) => val,
            None => {
                defx!("dmyhms_to_naive({:?}) failed; return MalformedTimestamp", dmyhms);
                return Err(TimestampError::MalformedTimestamp);
            }
        };
        let result = self.naive_to_datetimel(&naive);
        defx!("return {:?}", result);

        result
    }

    /// Parse the bytes of a GP2 time tag.
    ///
    /// Bytes after the first invalid UTF-8 sequence are ignored like any
    /// other trailing text.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<DateTimeL, TimestampError> {
        match std::str::from_utf8(data) {
            Ok(s) => self.parse(s),
            Err(err) => {
                defñ!("from_utf8 failed {}; parse the first {} bytes", err, err.valid_up_to());
                match std::str::from_utf8(&data[..err.valid_up_to()]) {
                    Ok(s) => self.parse(s),
                    Err(_) => Err(TimestampError::MalformedTimestamp),
                }
            }
        }
    }

    /// Parse a separate date option `dd/mm/yyyy` and time option `hh:mm:ss`,
    /// e.g. the CLI `--fromdate` and `--fromtime`.
    pub fn parse_date_time(&self, date: &str, time: &str) -> Result<DateTimeL, TimestampError> {
        let mut dts = String::with_capacity(date.len() + time.len() + 1);
        dts.push_str(date);
        dts.push(' ');
        dts.push_str(time);

        self.parse(dts.as_str())
    }

    fn naive_to_datetimel(&self, naive: &NaiveDateTime) -> Result<DateTimeL, TimestampError> {
        match self.tz_offset {
            Some(fo) => match fo.from_local_datetime(naive).single() {
                Some(dt) => Ok(dt),
                None => Err(TimestampError::MalformedTimestamp),
            },
            None => {
                // during a DST "fall back" the earlier instant is chosen
                match Local.from_local_datetime(naive).earliest() {
                    Some(dt) => Ok(dt.with_timezone(&dt.offset().fix())),
                    None => Err(TimestampError::NonexistentLocalTime),
                }
            }
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime comparisons
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Describe the result of comparing one [`DateTimeL`] to a [`TimeWindow`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Result_Filter_DateTime2 {
    /// like Pass
    InRange,
    /// like Fail
    BeforeRange,
    /// like Fail
    AfterRange,
}

impl Result_Filter_DateTime2 {
    #[inline(always)]
    pub const fn is_pass(&self) -> bool {
        matches!(*self, Result_Filter_DateTime2::InRange)
    }

    #[inline(always)]
    pub const fn is_fail(&self) -> bool {
        matches!(*self, Result_Filter_DateTime2::AfterRange | Result_Filter_DateTime2::BeforeRange)
    }
}

/// Is `dt` before, after, or in between the inclusive range
/// `[dt_from, dt_to]`?
///
/// Comparisons are "inclusive" i.e. `dt` == `dt_from` will return
/// `InRange`.
pub fn dt_pass_filters(
    dt: &DateTimeL,
    dt_from: &DateTimeL,
    dt_to: &DateTimeL,
) -> Result_Filter_DateTime2 {
    defn!("({:?}, {:?}, {:?})", dt, dt_from, dt_to);
    debug_assert_le!(dt_from, dt_to, "Bad datetime range values from {:?} {:?} to", dt_from, dt_to);
    if dt < dt_from {
        defx!("return {:?}", Result_Filter_DateTime2::BeforeRange);
        return Result_Filter_DateTime2::BeforeRange;
    }
    if dt_to < dt {
        defx!("return {:?}", Result_Filter_DateTime2::AfterRange);
        return Result_Filter_DateTime2::AfterRange;
    }
    defx!("return {:?}", Result_Filter_DateTime2::InRange);

    Result_Filter_DateTime2::InRange
}

/// Which boundary of a [`TimeWindow`] failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowBound {
    From,
    To,
}

impl fmt::Display for WindowBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowBound::From => write!(f, "From"),
            WindowBound::To => write!(f, "To"),
        }
    }
}

/// A [`TimeWindow`] could not be created. This is a configuration error;
/// processing must not begin.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WindowError {
    /// A boundary string could not be parsed.
    Unparsable {
        bound: WindowBound,
        value: String,
        error: TimestampError,
    },
    /// `from` is after `to`.
    Inverted {
        from: DateTimeL,
        to: DateTimeL,
    },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::Unparsable { bound, value, error } => {
                write!(f, "Incorrect {} date or time {:?}: {}", bound, value, error)
            }
            WindowError::Inverted { from, to } => {
                write!(f, "From date and time ({}) is after To date and time ({})", from, to)
            }
        }
    }
}

impl std::error::Error for WindowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WindowError::Unparsable { error, .. } => Some(error),
            WindowError::Inverted { .. } => None,
        }
    }
}

/// The inclusive interval `[from, to]` of datetimes for lines to extract.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimeWindow {
    from: DateTimeL,
    to: DateTimeL,
}

impl TimeWindow {
    /// Create a new `TimeWindow`. Fails if `from` is after `to`.
    pub fn new(from: DateTimeL, to: DateTimeL) -> Result<TimeWindow, WindowError> {
        if from > to {
            return Err(WindowError::Inverted { from, to });
        }

        Ok(TimeWindow { from, to })
    }

    /// Create a new `TimeWindow` from user-passed date and time strings,
    /// each boundary being a `dd/mm/yyyy` date combined with a `hh:mm:ss`
    /// time.
    pub fn from_date_time_strs(
        parser: &TimestampParser,
        from_date: &str,
        from_time: &str,
        to_date: &str,
        to_time: &str,
    ) -> Result<TimeWindow, WindowError> {
        defn!("({:?}, {:?}, {:?}, {:?})", from_date, from_time, to_date, to_time);
        let from = parser
            .parse_date_time(from_date, from_time)
            .map_err(|error| WindowError::Unparsable {
                bound: WindowBound::From,
                value: format!("{} {}", from_date, from_time),
                error,
            })?;
        defo!("from {:?}", from);
        let to = parser
            .parse_date_time(to_date, to_time)
            .map_err(|error| WindowError::Unparsable {
                bound: WindowBound::To,
                value: format!("{} {}", to_date, to_time),
                error,
            })?;
        defo!("to {:?}", to);
        let result = TimeWindow::new(from, to);
        defx!("return {:?}", result);

        result
    }

    pub fn from(&self) -> &DateTimeL {
        &self.from
    }

    pub fn to(&self) -> &DateTimeL {
        &self.to
    }

    /// Compare `dt` to this window.
    pub fn check(&self, dt: &DateTimeL) -> Result_Filter_DateTime2 {
        dt_pass_filters(dt, &self.from, &self.to)
    }

    /// `true` iff `from <= dt <= to`.
    pub fn contains(&self, dt: &DateTimeL) -> bool {
        self.check(dt).is_pass()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.from, self.to)
    }
}
