//! Cursor probe outcomes and positioning vocabulary.
//!
//! A probe has exactly one of three outcomes: a non-null value, a row whose
//! value is NULL, or a position outside the partition/frame. Keeping this a
//! single tagged type (rather than a value plus two boolean flags) makes the
//! invalid combinations unrepresentable.

use crate::Value;

/// The outcome of probing a partition or frame position.
#[derive(Clone, Debug, PartialEq)]
pub enum Probe {
    /// The probed row exists and holds a non-null value.
    Found(Value),
    /// The probed row exists but its value is NULL.
    FoundNull,
    /// The probed position lies outside the partition or frame.
    OutOfRange,
}

impl Probe {
    /// Classify a row's value: NULLs become [`Probe::FoundNull`].
    pub fn from_value(value: Value) -> Self {
        if value.is_null() {
            Self::FoundNull
        } else {
            Self::Found(value)
        }
    }

    /// Whether the probe landed outside the partition or frame.
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange)
    }
}

/// The frame boundary a positional search begins from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// The first row of the frame; searches advance forward.
    Head,
    /// The last row of the frame; searches advance backward.
    Tail,
}

impl Anchor {
    /// The row increment a scan from this anchor advances by.
    pub const fn step(self) -> i64 {
        match self {
            Self::Head => 1,
            Self::Tail => -1,
        }
    }
}

/// Lookahead vs. lookbehind for offset-based functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Toward later rows (`lead`).
    Forward,
    /// Toward earlier rows (`lag`).
    Backward,
}

impl Direction {
    /// The row increment a scan in this direction advances by.
    pub const fn step(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}
