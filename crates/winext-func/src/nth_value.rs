//! `nth_value` variants: from head or tail, respecting or ignoring NULLs.
//!
//! The most intricate of the evaluators: the `nth` control argument is
//! validated (1-based, positive) before any probing, and the ignore-nulls
//! mode runs the same null-skipping scan as `lag`/`lead` but anchored to
//! the current frame instead of the current row.

use tracing::trace;
use winext_error::{Result, WinextError};
use winext_types::{Anchor, Probe, Value};

use crate::{PartitionCursor, PartitionState, WindowFunction};

const VALUE_ARG: usize = 0;
const NTH_ARG: usize = 1;
const DEFAULT_ARG: usize = 2;

/// One registered `nth_value*` variant.
pub struct NthValueFunc {
    name: &'static str,
    from_last: bool,
    ignore_nulls: bool,
    with_default: bool,
}

impl NthValueFunc {
    /// Bind a variant name to its anchor, null handling, and
    /// optional-default shape.
    #[must_use]
    pub const fn new(
        name: &'static str,
        from_last: bool,
        ignore_nulls: bool,
        with_default: bool,
    ) -> Self {
        Self {
            name,
            from_last,
            ignore_nulls,
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

impl WindowFunction for NthValueFunc {
    fn evaluate(
        &self,
        cursor: &dyn PartitionCursor,
        _state: &mut PartitionState,
    ) -> Result<Value> {
        let nth_arg = cursor.current_arg(NTH_ARG);
        // A NULL nth yields a NULL result; a non-positive nth is a query
        // error that aborts evaluation.
        if nth_arg.is_null() {
            return Ok(Value::Null);
        }
        let nth = nth_arg.to_integer();
        if nth < 1 {
            return Err(WinextError::invalid_nth(self.name, nth));
        }

        let anchor = if self.from_last {
            Anchor::Tail
        } else {
            Anchor::Head
        };
        // 1-based ordinal to a zero-based frame position, counting away
        // from the anchor (negative when anchored at the tail).
        let mut target = nth - 1;
        if self.from_last {
            target = -target;
        }

        if self.ignore_nulls {
            let step = anchor.step();
            let mut runner = 0;
            loop {
                match cursor.probe_frame(VALUE_ARG, anchor, runner) {
                    Probe::OutOfRange => return Ok(self.boundary_fallback(cursor)),
                    // Saturating: a saturated target lies beyond any
                    // finite frame, so the scan ends at the fallback.
                    Probe::FoundNull => target = target.saturating_add(step),
                    Probe::Found(value) => {
                        if runner == target {
                            return Ok(value);
                        }
                    }
                }
                runner += step;
            }
        }

        if cursor.arg_is_constant(NTH_ARG) {
            // The engine may cache cursor positioning for a constant nth;
            // correctness does not depend on it.
            trace!(function = self.name, nth, "constant nth argument");
        }
        match cursor.probe_frame(VALUE_ARG, anchor, target) {
            Probe::Found(value) => Ok(value),
            Probe::FoundNull => Ok(Value::Null),
            Probe::OutOfRange => Ok(self.boundary_fallback(cursor)),
        }
    }

    fn num_args(&self) -> i32 {
        2 + i32::from(self.with_default)
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use winext_types::Value;

    use super::*;
    use crate::buffer::{FramePolicy, PartitionBuffer, evaluate_partition};

    fn int(v: i64) -> Value {
        Value::Integer(v)
    }

    fn null() -> Value {
        Value::Null
    }

    fn nth(from_last: bool, ignore_nulls: bool, with_default: bool) -> NthValueFunc {
        NthValueFunc::new("nth_value_test", from_last, ignore_nulls, with_default)
    }

    fn column_with_nth(column: Vec<Value>, n: Value) -> PartitionBuffer {
        PartitionBuffer::new(
            column
                .into_iter()
                .map(|v| vec![v, n.clone()])
                .collect(),
        )
    }

    #[test]
    fn second_non_null_from_head() {
        // nth_value_ignore_nulls(col, 2) over [NULL, 5, NULL, 7, 9] -> 7.
        let mut buf = column_with_nth(vec![null(), int(5), null(), int(7), int(9)], int(2));
        let results = evaluate_partition(
            &nth(false, true, false),
            &mut buf,
            FramePolicy::WholePartition,
        )
        .unwrap();
        assert_eq!(results, vec![int(7); 5]);
    }

    #[test]
    fn second_non_null_from_tail() {
        let mut buf = column_with_nth(vec![null(), int(5), null(), int(7), int(9)], int(2));
        let results = evaluate_partition(
            &nth(true, true, false),
            &mut buf,
            FramePolicy::WholePartition,
        )
        .unwrap();
        assert_eq!(results, vec![int(7); 5]);
    }

    #[test]
    fn direct_probe_respects_nulls() {
        // nth_value(col, 2) respecting nulls lands on the NULL row itself.
        let mut buf = column_with_nth(vec![int(5), null(), int(7)], int(2));
        let results = evaluate_partition(
            &nth(false, false, false),
            &mut buf,
            FramePolicy::WholePartition,
        )
        .unwrap();
        assert_eq!(results, vec![null(); 3]);
    }

    #[test]
    fn from_last_direct_probe() {
        let mut buf = column_with_nth(vec![int(1), int(2), int(3)], int(2));
        let results = evaluate_partition(
            &nth(true, false, false),
            &mut buf,
            FramePolicy::WholePartition,
        )
        .unwrap();
        assert_eq!(results, vec![int(2); 3]);
    }

    #[test]
    fn zero_nth_is_a_fatal_error() {
        let mut buf = column_with_nth(vec![int(1)], int(0));
        let err = evaluate_partition(
            &nth(false, false, false),
            &mut buf,
            FramePolicy::WholePartition,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            WinextError::InvalidNthArgument { nth: 0, .. }
        ));
        assert_eq!(
            err.to_string(),
            "argument of nth_value_test must be greater than zero"
        );
    }

    #[test]
    fn negative_nth_is_a_fatal_error() {
        let mut buf = column_with_nth(vec![int(1)], int(-4));
        let err = evaluate_partition(
            &nth(true, true, true),
            &mut buf,
            FramePolicy::WholePartition,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            WinextError::InvalidNthArgument { nth: -4, .. }
        ));
    }

    #[test]
    fn null_nth_yields_null_row_and_continues() {
        let mut buf = PartitionBuffer::new(vec![
            vec![int(1), null()],
            vec![int(2), int(1)],
        ]);
        let results = evaluate_partition(
            &nth(false, false, false),
            &mut buf,
            FramePolicy::WholePartition,
        )
        .unwrap();
        assert_eq!(results, vec![null(), int(1)]);
    }

    #[test]
    fn out_of_range_substitutes_default() {
        let mut buf = PartitionBuffer::new(vec![vec![int(1), int(5), int(-1)]]);
        let results = evaluate_partition(
            &nth(false, false, true),
            &mut buf,
            FramePolicy::WholePartition,
        )
        .unwrap();
        assert_eq!(results, vec![int(-1)]);
    }

    #[test]
    fn ignore_nulls_exhausting_frame_substitutes_default() {
        // Only one non-null value but nth = 2.
        let mut buf = PartitionBuffer::new(vec![
            vec![null(), int(2), int(0)],
            vec![int(9), int(2), int(0)],
        ]);
        let results = evaluate_partition(
            &nth(false, true, true),
            &mut buf,
            FramePolicy::WholePartition,
        )
        .unwrap();
        assert_eq!(results, vec![int(0), int(0)]);
    }

    #[test]
    fn frame_bound_scan_stays_inside_frame() {
        // HeadToCurrent frames: the 2nd non-null only appears once the
        // frame has grown to include it.
        let mut buf = column_with_nth(vec![int(5), null(), int(7)], int(2));
        let results = evaluate_partition(
            &nth(false, true, false),
            &mut buf,
            FramePolicy::HeadToCurrent,
        )
        .unwrap();
        assert_eq!(results, vec![null(), null(), int(7)]);
    }

    #[test]
    fn first_non_null_with_nth_one() {
        let mut buf = column_with_nth(vec![null(), int(3)], int(1));
        let results = evaluate_partition(
            &nth(false, true, false),
            &mut buf,
            FramePolicy::WholePartition,
        )
        .unwrap();
        assert_eq!(results, vec![int(3), int(3)]);
    }

    #[test]
    fn extreme_nth_with_nulls_falls_back_at_the_edge() {
        // nth = i64::MAX with NULL rows in the frame: the target
        // position saturates instead of overflowing.
        let mut buf = column_with_nth(vec![null(), int(5), null()], int(i64::MAX));
        let results = evaluate_partition(
            &nth(false, true, false),
            &mut buf,
            FramePolicy::WholePartition,
        )
        .unwrap();
        assert_eq!(results, vec![null(); 3]);
    }

    #[test]
    fn extreme_nth_from_last_with_nulls_falls_back() {
        let mut buf = column_with_nth(vec![null(), int(5), null()], int(i64::MAX));
        let results = evaluate_partition(
            &nth(true, true, false),
            &mut buf,
            FramePolicy::WholePartition,
        )
        .unwrap();
        assert_eq!(results, vec![null(); 3]);
    }

    #[test]
    fn arity_follows_registered_shape() {
        assert_eq!(nth(false, true, false).num_args(), 2);
        assert_eq!(nth(false, true, true).num_args(), 3);
        assert_eq!(nth(true, false, false).name(), "nth_value_test");
    }
}
