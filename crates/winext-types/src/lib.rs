//! Value model and cursor probe types shared by the winext evaluators.
//!
//! This crate is dependency-light on purpose: it holds the nullable scalar
//! [`Value`] the window functions operate on, and the [`Probe`] /
//! [`Anchor`] / [`Direction`] vocabulary the partition cursor contract is
//! expressed in.

pub mod probe;
pub mod value;

pub use probe::{Anchor, Direction, Probe};
pub use value::Value;
