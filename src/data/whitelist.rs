// src/data/whitelist.rs

//! The set of wanted OSP Message IDentifiers (MIDs).
//!
//! A [`Whitelist`] is built once from the CLI `--wmsg` value by
//! [`Whitelist::from_wmsg`] and is not changed afterwards.
//!
//! | `--wmsg` value   | wanted MIDs                             |
//! |------------------|-----------------------------------------|
//! | `ALL`            | every MID                               |
//! | `RINEX`          | [`MIDS_RINEX`]                          |
//! | `RINEX,<list>`   | [`MIDS_RINEX`] followed by `<list>`     |
//! | `<list>`         | `<list>`                                |
//!
//! A `<list>` is MIDs in decimal separated by any of `,;.:`.
//!
//! [`MIDS_RINEX`]: crate::common::MIDS_RINEX

use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{
    Count,
    Mid,
    MIDS_RINEX,
    WMSGSIZE,
};

/// `--wmsg` value for all MIDs wanted
pub const WMSG_ALL: &str = "ALL";

/// `--wmsg` value for the MIDs needed for RINEX
pub const WMSG_RINEX: &str = "RINEX";

/// `--wmsg` prefix for the MIDs needed for RINEX followed by a list
pub const WMSG_RINEX_PREFIX: &str = "RINEX,";

/// Characters separating MIDs in a `--wmsg` list
pub const WMSG_DELIMITERS: [char; 4] = [',', ';', '.', ':'];

/// A `--wmsg` value could not be transformed to a [`Whitelist`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WhitelistError {
    /// A list item is not a decimal MID in `0..=255`.
    InvalidMid(String),
}

impl fmt::Display for WhitelistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WhitelistError::InvalidMid(s) => write!(f, "Invalid MID {:?} in wanted messages list", s),
        }
    }
}

impl std::error::Error for WhitelistError {}

/// A bounded ordered set of wanted MIDs, or all MIDs.
///
/// Holds at most [`WMSGSIZE`] MIDs. Duplicates are kept.
/// MIDs added beyond capacity are dropped and counted, see
/// [`Whitelist::dropped`].
///
/// An empty `Whitelist` wants all MIDs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Whitelist {
    mids: Vec<Mid>,
    accept_all: bool,
    dropped: Count,
}

impl Whitelist {
    /// A `Whitelist` that wants every MID.
    pub fn all() -> Whitelist {
        Whitelist {
            mids: Vec::with_capacity(0),
            accept_all: true,
            dropped: 0,
        }
    }

    /// A `Whitelist` of [`MIDS_RINEX`].
    pub fn rinex() -> Whitelist {
        let mut wl = Whitelist {
            mids: Vec::with_capacity(WMSGSIZE),
            accept_all: false,
            dropped: 0,
        };
        wl.extend(MIDS_RINEX.iter().copied());

        wl
    }

    /// A `Whitelist` of the passed MIDs only.
    pub fn from_mids(mids: &[Mid]) -> Whitelist {
        let mut wl = Whitelist {
            mids: Vec::with_capacity(WMSGSIZE),
            accept_all: false,
            dropped: 0,
        };
        wl.extend(mids.iter().copied());

        wl
    }

    /// Build a `Whitelist` from a CLI `--wmsg` value.
    pub fn from_wmsg(wmsg: &str) -> Result<Whitelist, WhitelistError> {
        defn!("({:?})", wmsg);
        let wl = if wmsg == WMSG_ALL {
            Whitelist::all()
        } else if wmsg == WMSG_RINEX {
            Whitelist::rinex()
        } else if let Some(list) = wmsg.strip_prefix(WMSG_RINEX_PREFIX) {
            let mut wl = Whitelist::rinex();
            wl.extend(parse_mid_list(list)?);
            wl
        } else {
            Whitelist::from_mids(&parse_mid_list(wmsg)?)
        };
        defx!("return {:?}", wl);

        Ok(wl)
    }

    /// Append `mids`, stopping at capacity. MIDs that did not fit are
    /// counted in `dropped`.
    fn extend<I>(&mut self, mids: I)
    where
        I: IntoIterator<Item = Mid>,
    {
        for mid in mids {
            if self.mids.len() < WMSGSIZE {
                self.mids.push(mid);
            } else {
                defo!("capacity {} reached, dropped MID {}", WMSGSIZE, mid);
                self.dropped += 1;
            }
        }
    }

    /// Is `mid` wanted?
    pub fn is_wanted(&self, mid: Mid) -> bool {
        if self.wants_all() {
            return true;
        }
        self.mids.iter().any(|m| *m == mid)
    }

    /// Are all MIDs wanted?
    pub fn wants_all(&self) -> bool {
        self.accept_all || self.mids.is_empty()
    }

    /// The wanted MIDs in order of insertion. Empty when all MIDs are wanted.
    pub fn mids(&self) -> &[Mid] {
        if self.accept_all {
            return &[];
        }
        self.mids.as_slice()
    }

    pub fn len(&self) -> usize {
        self.mids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.mids().is_empty()
    }

    /// Count of MIDs dropped because the `Whitelist` was at capacity.
    pub fn dropped(&self) -> Count {
        self.dropped
    }
}

/// Prints like `"ALL"` or `"2 6 7"`.
impl fmt::Display for Whitelist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wants_all() {
            return write!(f, "{}", WMSG_ALL);
        }
        for (i, mid) in self.mids.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", mid)?;
        }

        Ok(())
    }
}

/// Parse a list of decimal MIDs separated by any of [`WMSG_DELIMITERS`].
/// Empty items are skipped.
pub fn parse_mid_list(list: &str) -> Result<Vec<Mid>, WhitelistError> {
    let mut mids: Vec<Mid> = Vec::with_capacity(WMSGSIZE);
    for item in list.split(&WMSG_DELIMITERS[..]) {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        match item.parse::<Mid>() {
            Ok(mid) => mids.push(mid),
            Err(_) => {
                defñ!("invalid MID {:?}", item);
                return Err(WhitelistError::InvalidMid(String::from(item)));
            }
        }
    }

    Ok(mids)
}
