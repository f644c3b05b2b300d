// src/lib.rs

//! _gp2osplib_ extracts SiRF IV OSP receiver messages from GP2 debug logs
//! into a binary OSP file.
//!
//! A GP2 debug file is written by some Android devices, e.g. the Samsung
//! Galaxy S2, when `DEBUGGING_FILES=1` is set in `sirfgps.conf`. Each line
//! has a time tag and one OSP message written in hexadecimal.
//!
//! The binary OSP file has each extracted message payload length and
//! payload; the head, checksum, and tail are removed.
//!
//! The driver program is _gp2osp_. Processing is done by an
//! [`ExtractionPipeline`].
//!
//! See [_Definitions of data_].
//!
//! [`ExtractionPipeline`]: crate::readers::pipeline::ExtractionPipeline
//! [_Definitions of data_]: crate::data

pub mod common;
pub mod data;
pub mod debug;
pub mod printer;
pub mod readers;
#[cfg(test)]
pub mod tests;
pub mod writers;
