//! The partition cursor contract every evaluator consumes.
//!
//! The cursor is implemented by the host engine (or by
//! [`PartitionBuffer`](crate::PartitionBuffer) for tests and embedders that
//! materialize partitions). It positions addressably relative to the current
//! row within the whole partition, or relative to the current frame's head
//! or tail, and reports out-of-range as a normal outcome rather than an
//! error.

use winext_types::{Anchor, Probe, Value};

/// Read access to one partition during a strictly sequential evaluation pass.
///
/// Column and argument indices share the function's argument numbering:
/// index 0 is the value expression, higher indices are control arguments
/// (offset, nth, default) evaluated per row.
///
/// This trait is **open** (engine-implementable). Implementations must make
/// every probe total: a position outside the partition or frame yields
/// [`Probe::OutOfRange`], never a panic.
pub trait PartitionCursor {
    /// Probe the argument `column` at `row_offset` rows from the current
    /// row, bounded by the whole partition.
    fn probe_partition(&self, column: usize, row_offset: i64) -> Probe;

    /// Probe the argument `column` at `position` rows from a frame anchor,
    /// bounded by the current frame.
    ///
    /// Positions count away from the anchor into the frame: non-negative
    /// from [`Anchor::Head`], non-positive from [`Anchor::Tail`].
    fn probe_frame(&self, column: usize, anchor: Anchor, position: i64) -> Probe;

    /// The function argument at `index`, evaluated for the current row.
    fn current_arg(&self, index: usize) -> Value;

    /// Optimization hint: whether the argument at `index` is known constant
    /// across the partition. Advisory only; the evaluators remain correct
    /// when this always reports `false`.
    fn arg_is_constant(&self, _index: usize) -> bool {
        false
    }
}
