//! `first_value` / `last_value` with IGNORE NULLS semantics.
//!
//! Scans the current frame inward from its head (or tail) until the first
//! non-null value, substituting the default argument when the whole frame
//! is NULL or empty.

use winext_error::Result;
use winext_types::{Anchor, Probe, Value};

use crate::{PartitionCursor, PartitionState, WindowFunction};

const VALUE_ARG: usize = 0;
const DEFAULT_ARG: usize = 1;

/// One registered `first_value_ignore_nulls*` / `last_value_ignore_nulls*`
/// variant.
pub struct FirstLastFunc {
    name: &'static str,
    anchor: Anchor,
    with_default: bool,
}

impl FirstLastFunc {
    /// Bind a variant name to its anchor and optional-default shape.
    #[must_use]
    pub const fn new(name: &'static str, anchor: Anchor, with_default: bool) -> Self {
        Self {
            name,
            anchor,
            with_default,
        }
    }
}

impl WindowFunction for FirstLastFunc {
    fn evaluate(
        &self,
        cursor: &dyn PartitionCursor,
        _state: &mut PartitionState,
    ) -> Result<Value> {
        let step = self.anchor.step();
        let mut runner = 0;

        loop {
            match cursor.probe_frame(VALUE_ARG, self.anchor, runner) {
                Probe::Found(value) => return Ok(value),
                Probe::FoundNull => runner += step,
                Probe::OutOfRange => {
                    return Ok(if self.with_default {
                        cursor.current_arg(DEFAULT_ARG)
                    } else {
                        Value::Null
                    });
                }
            }
        }
    }

    fn num_args(&self) -> i32 {
        1 + i32::from(self.with_default)
    }

    fn name(&self) -> &str {
        self.name
    }
}
