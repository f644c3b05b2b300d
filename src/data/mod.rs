// src/data/mod.rs

//! The `data` module is specialized data containers and functions for
//! GP2 time tags, OSP messages, and the set of wanted OSP messages.
//!
//! ## Definitions of data
//!
//! ### GP2 line
//!
//! A "GP2 line" is one line of text of a GP2 debug file, written by some
//! Android devices with a SiRF IV GNSS receiver, e.g.
//!
//! ```text
//! 29/10/2014 20:31:08.942 (0) A0 A2 00 12 33 06 00 00 00 00 00 00 00 19 00 00 00 00 00 00 64 E1 01 97 B0 B3
//! ```
//!
//! * time tag: `29/10/2014 20:31:08.942`, see [`datetime`]
//! * unknown: `(0)`
//! * head: `A0 A2`
//! * payload length: `00 12`
//! * payload: `33 06 00 00 00 00 00 00 00 19 00 00 00 00 00 00 64 E1`
//! * checksum: `01 97`
//! * tail: `B0 B3`
//!
//! ### OSP message
//!
//! The bytes from "payload length" to "checksum" are an OSP message,
//! see [`frame`]. The first payload byte is the Message IDentifier (MID),
//! see [`whitelist`].
//!
//! OSP messages are described in "SiRFstarIV One Socket Protocol Interface
//! Control Document".
//!
//! [`datetime`]: crate::data::datetime
//! [`frame`]: crate::data::frame
//! [`whitelist`]: crate::data::whitelist

pub mod datetime;
pub mod frame;
pub mod whitelist;
