// src/writers/mod.rs

//! "Writers" for _gp2osplib_.
//!
//! A [`FrameWriter`] writes validated OSP messages to an OSP binary file.
//!
//! [`FrameWriter`]: crate::writers::framewriter::FrameWriter

pub mod framewriter;
