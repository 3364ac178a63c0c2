//! `lag` / `lead` with IGNORE NULLS semantics.
//!
//! For offset N, the result is the Nth nearest non-null value in the
//! requested direction within the whole partition, or the default/NULL
//! boundary outcome when fewer than N non-null rows exist before the
//! partition edge. NULL rows are skipped while counting, never reordered.

use winext_error::Result;
use winext_types::{Direction, Probe, Value};

use crate::{PartitionCursor, PartitionState, WindowFunction};

const VALUE_ARG: usize = 0;
const OFFSET_ARG: usize = 1;
const DEFAULT_ARG: usize = 2;

/// One registered `lag_ignore_nulls*` / `lead_ignore_nulls*` variant.
pub struct LeadLagFunc {
    name: &'static str,
    direction: Direction,
    with_offset: bool,
    with_default: bool,
}

impl LeadLagFunc {
    /// Bind a variant name to its direction and optional-argument shape.
    #[must_use]
    pub const fn new(
        name: &'static str,
        direction: Direction,
        with_offset: bool,
        with_default: bool,
    ) -> Self {
        Self {
            name,
            direction,
            with_offset,
            with_default,
        }
    }

    fn boundary_fallback(&self, cursor: &dyn PartitionCursor) -> Value {
        if self.with_default {
            cursor.current_arg(DEFAULT_ARG)
        } else {
            Value::Null
        }
    }
}

impl WindowFunction for LeadLagFunc {
    fn evaluate(
        &self,
        cursor: &dyn PartitionCursor,
        _state: &mut PartitionState,
    ) -> Result<Value> {
        let step = self.direction.step();

        let offset = if self.with_offset {
            let arg = cursor.current_arg(OFFSET_ARG);
            // A NULL offset yields a NULL result, not an error.
            if arg.is_null() {
                return Ok(Value::Null);
            }
            arg.to_integer()
        } else {
            1
        };

        // The displacement still owed, sign-aware: lag(x, 2) travels two
        // rows backward. Skipped NULLs push the target further out.
        // Saturating throughout: a saturated target lies beyond any finite
        // partition, so the scan ends at the boundary fallback.
        let mut target = match self.direction {
            Direction::Forward => offset,
            Direction::Backward => offset.saturating_neg(),
        };
        let mut runner = if target == 0 { 0 } else { step };

        loop {
            match cursor.probe_partition(VALUE_ARG, runner) {
                Probe::OutOfRange => {
                    // Fewer than the requested number of non-null rows
                    // before the partition edge.
                    return Ok(self.boundary_fallback(cursor));
                }
                Probe::FoundNull => {
                    // A NULL row does not count toward the displacement.
                    target = target.saturating_add(step);
                }
                Probe::Found(value) => {
                    if runner == target {
                        return Ok(value);
                    }
                }
            }
            runner += step;
        }
    }

    fn num_args(&self) -> i32 {
        1 + i32::from(self.with_offset) + i32::from(self.with_default)
    }

    fn name(&self) -> &str {
        self.name
    }
}
