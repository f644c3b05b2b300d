// src/printer/mod.rs

//! The `printer` module is for printing user-facing messages:
//! leveled [`Diagnostic`s] about processed GP2 lines, and the `--summary`
//! statistics.
//!
//! [`Diagnostic`s]: crate::printer::diagnostics::Diagnostic

pub mod diagnostics;
pub mod summary;
