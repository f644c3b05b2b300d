// src/readers/mod.rs

//! "Readers" for _gp2osplib_.
//!
//! ## Overview of readers
//!
//! * An [`ExtractionPipeline`] reads GP2 lines and drives each through
//!   [`extract_frame`], the time window, [`validate_frame`], the
//!   whitelist, and a [`FrameWriter`].
//! * [`extract_frame`] finds and decodes the hexadecimal OSP message of one
//!   GP2 line.
//! * A [`SummaryExtraction`] accumulates statistics of an
//!   `ExtractionPipeline`.
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [`Read`]: std::io::Read
//! [`ExtractionPipeline`]: crate::readers::pipeline::ExtractionPipeline
//! [`extract_frame`]: crate::readers::frameextractor::extract_frame
//! [`validate_frame`]: crate::data::frame::validate_frame
//! [`FrameWriter`]: crate::writers::framewriter::FrameWriter
//! [`SummaryExtraction`]: crate::readers::summary::SummaryExtraction

pub mod frameextractor;
pub mod pipeline;
pub mod summary;
