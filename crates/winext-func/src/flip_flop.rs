//! The flip-flop gate: a two-phase stateful boolean window function.
//!
//! Emits true for every row from (and including) the row where the flip
//! condition first becomes true, through and including the row where the
//! flop condition subsequently becomes true; then the cycle can restart.
//! Only one of the two conditions is consulted per row, depending on the
//! current state.

use tracing::debug;
use winext_error::Result;
use winext_types::Value;

use crate::{PartitionCursor, PartitionState, WindowFunction};

/// One registered `flip_flop_1` / `flip_flop_2` variant.
///
/// `flip_flop_1` reads a single shared condition argument for both phases;
/// `flip_flop_2` reads two distinct arguments.
pub struct FlipFlopFunc {
    name: &'static str,
    flip_arg: usize,
    flop_arg: usize,
}

impl FlipFlopFunc {
    /// Bind a variant name to its flip/flop argument positions.
    #[must_use]
    pub const fn new(name: &'static str, flip_arg: usize, flop_arg: usize) -> Self {
        Self {
            name,
            flip_arg,
            flop_arg,
        }
    }
}

impl WindowFunction for FlipFlopFunc {
    fn evaluate(
        &self,
        cursor: &dyn PartitionCursor,
        state: &mut PartitionState,
    ) -> Result<Value> {
        if state.flipped {
            // Active: the flop row itself still belongs to the region.
            if cursor.current_arg(self.flop_arg).is_truthy() {
                state.flipped = false;
                debug!(function = self.name, "flop: region closes after this row");
            }
            Ok(Value::from(true))
        } else {
            if cursor.current_arg(self.flip_arg).is_truthy() {
                state.flipped = true;
                debug!(function = self.name, "flip: region opens at this row");
                return Ok(Value::from(true));
            }
            Ok(Value::from(false))
        }
    }

    fn num_args(&self) -> i32 {
        if self.flip_arg == self.flop_arg { 1 } else { 2 }
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

    fn b(v: bool) -> Value {
        Value::from(v)
    }

    fn one_arg() -> FlipFlopFunc {
        FlipFlopFunc::new("flip_flop_1", 0, 0)
    }

    fn two_arg() -> FlipFlopFunc {
        FlipFlopFunc::new("flip_flop_2", 0, 1)
    }

    fn run_single(conditions: Vec<Value>) -> Vec<Value> {
        let mut buf = PartitionBuffer::from_column(conditions);
        evaluate_partition(&one_arg(), &mut buf, FramePolicy::WholePartition).unwrap()
    }

    #[test]
    fn gate_cycles_through_flip_and_flop() {
        // [F, T, F, T, F, T] -> [false, true, true, true, false, true]
        // The fourth row flops the gate closed but still reports true.
        let results = run_single(vec![b(false), b(true), b(false), b(true), b(false), b(true)]);
        assert_eq!(
            results,
            vec![b(false), b(true), b(true), b(true), b(false), b(true)]
        );
    }

    #[test]
    fn null_condition_is_not_truthy() {
        // NULL neither opens nor closes the gate.
        let results = run_single(vec![Value::Null, b(true), Value::Null, b(true)]);
        assert_eq!(results, vec![b(false), b(true), b(true), b(true)]);
    }

    #[test]
    fn never_flipped_stays_false() {
        let results = run_single(vec![b(false), b(false), b(false)]);
        assert_eq!(results, vec![b(false), b(false), b(false)]);
    }

    #[test]
    fn region_stays_open_until_flop() {
        let results = run_single(vec![b(true), b(false), b(false)]);
        assert_eq!(results, vec![b(true), b(true), b(true)]);
    }

    #[test]
    fn only_one_condition_read_per_row() {
        // Distinct flip/flop columns: a row with both conditions true
        // while idle only flips; its flop column is not consulted.
        let mut buf = PartitionBuffer::new(vec![
            vec![b(true), b(true)],
            vec![b(false), b(false)],
            vec![b(false), b(true)],
            vec![b(false), b(false)],
        ]);
        let results =
            evaluate_partition(&two_arg(), &mut buf, FramePolicy::WholePartition).unwrap();
        assert_eq!(results, vec![b(true), b(true), b(true), b(false)]);
    }

    #[test]
    fn state_is_scoped_to_one_partition() {
        // A fresh pass starts idle even if the previous one ended active.
        let first = run_single(vec![b(true), b(false)]);
        assert_eq!(first, vec![b(true), b(true)]);
        let second = run_single(vec![b(false), b(false)]);
        assert_eq!(second, vec![b(false), b(false)]);
    }

    #[test]
    fn output_is_always_a_definite_boolean() {
        for v in run_single(vec![Value::Null, b(true), Value::Null]) {
            assert!(matches!(v, Value::Integer(0 | 1)));
        }
    }

    #[test]
    fn arity_follows_argument_positions() {
        assert_eq!(one_arg().num_args(), 1);
        assert_eq!(two_arg().num_args(), 2);
        assert_eq!(two_arg().name(), "flip_flop_2");
    }
}
