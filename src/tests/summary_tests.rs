// src/tests/summary_tests.rs

//! tests for `readers/summary.rs` and `printer/summary.rs`

#![allow(non_snake_case)]

use std::time::Duration;

use crate::common::FPath;
use crate::data::whitelist::Whitelist;
use crate::printer::diagnostics::NoColor;
use crate::printer::summary::{
    print_summary,
    SummaryPrintData,
};
use crate::readers::pipeline::ExtractionResult;
use crate::readers::summary::SummaryExtraction;
use crate::tests::common::{
    dtz,
    window_z_2014,
};

#[test]
fn test_SummaryExtraction_written() {
    let mut summary = SummaryExtraction::default();
    summary.written(2, 5, &dtz(2014, 6, 1, 0, 0, 1));
    summary.written(2, 5, &dtz(2014, 6, 1, 0, 0, 0));
    summary.written(51, 20, &dtz(2014, 6, 1, 0, 0, 2));
    assert_eq!(summary.frames_written, 3);
    assert_eq!(summary.bytes_written, 30);
    assert_eq!(summary.mids_written.get(&2), Some(&2));
    assert_eq!(summary.mids_written.get(&51), Some(&1));
    assert_eq!(summary.dt_first, Some(dtz(2014, 6, 1, 0, 0, 0)));
    assert_eq!(summary.dt_last, Some(dtz(2014, 6, 1, 0, 0, 2)));
}

#[test]
fn test_SummaryExtraction_lines_dropped() {
    let summary = SummaryExtraction {
        missing_header: 1,
        missing_tail: 2,
        before_window: 3,
        after_window: 4,
        unparsable_timetag: 5,
        no_message_data: 6,
        length_mismatch: 7,
        checksum_mismatch: 8,
        mid_skipped: 9,
        frames_written: 100,
        ..Default::default()
    };
    assert_eq!(summary.lines_dropped(), 45);
}

#[test]
fn test_print_summary() {
    let mut summary = SummaryExtraction {
        lines: 3,
        bytes_read: 300,
        missing_header: 1,
        mid_skipped: 1,
        ..Default::default()
    };
    summary.written(51, 20, &dtz(2014, 10, 29, 20, 31, 8));
    let window = window_z_2014();
    let whitelist = Whitelist::from_mids(&[51, 2]);
    let infile: FPath = FPath::from("SLCLog.GP2");
    let outfile: FPath = FPath::from("DATA.OSP");
    let result = ExtractionResult::Done(1);
    let data = SummaryPrintData {
        infile: &infile,
        outfile: &outfile,
        window_from: window.from(),
        window_to: window.to(),
        whitelist: &whitelist,
        result: &result,
        summary: &summary,
        duration: Duration::from_millis(5),
    };
    let mut out = NoColor::new(Vec::<u8>::new());
    print_summary(&mut out, &data).unwrap();
    let s = String::from_utf8(out.into_inner()).unwrap();
    for expect in [
        "\"SLCLog.GP2\"",
        "\"DATA.OSP\"",
        "2014-01-01 00:00:00 +00:00",
        "2014-12-31 23:59:59 +00:00",
        "51 2",
        "Lines dropped        : 2",
        "missing header : 1",
        "MID skipped    : 1",
        "Messages written     : 1",
        "MID 51         : 1",
        "Bytes written        : 20",
        "2014-10-29 20:31:08 +00:00",
        "Done(1)",
    ] {
        assert!(s.contains(expect), "{:?} not found in\n{}", expect, s);
    }
}
