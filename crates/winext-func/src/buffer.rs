//! In-memory partition cursor and sequential row driver.
//!
//! [`PartitionBuffer`] is a reference [`PartitionCursor`] over a
//! materialized partition: one `Vec<Value>` of argument values per row, a
//! current-row index, and frame bounds recomputed per row by a
//! [`FramePolicy`]. The integration tests drive every evaluator through it,
//! and embedding hosts that already materialize partitions can use it
//! directly.
#![allow(clippy::cast_possible_wrap)]

use winext_types::{Anchor, Probe, Value};

use crate::{PartitionCursor, PartitionState, Result, WindowFunction};

/// How the frame follows the current row during a partition pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramePolicy {
    /// The frame always covers the whole partition
    /// (`ROWS BETWEEN UNBOUNDED PRECEDING AND UNBOUNDED FOLLOWING`).
    WholePartition,
    /// Frame head pinned to the partition head, tail at the current row
    /// (`ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW`).
    HeadToCurrent,
}

/// A materialized partition with a movable current row and frame.
///
/// Row order is fixed at construction and never altered; traversals that
/// skip NULLs skip values only.
pub struct PartitionBuffer {
    /// Per-row argument values; index 0 is the value expression.
    rows: Vec<Vec<Value>>,
    current: usize,
    /// Inclusive head, exclusive tail.
    frame_head: usize,
    frame_tail: usize,
}

impl PartitionBuffer {
    /// Build a buffer over the given rows. The current row starts at 0 and
    /// the frame covers the whole partition.
    #[must_use]
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        let len = rows.len();
        Self {
            rows,
            current: 0,
            frame_head: 0,
            frame_tail: len,
        }
    }

    /// Convenience constructor for single-argument functions: one value
    /// expression per row.
    #[must_use]
    pub fn from_column(column: Vec<Value>) -> Self {
        Self::new(column.into_iter().map(|v| vec![v]).collect())
    }

    /// Number of rows in the partition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the partition holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Move the current row. Clamped to the last row.
    pub fn set_current(&mut self, row: usize) {
        self.current = row.min(self.rows.len().saturating_sub(1));
    }

    /// Set the frame to `head..tail` (inclusive head, exclusive tail).
    /// Bounds are clamped to the partition.
    pub fn set_frame(&mut self, head: usize, tail: usize) {
        self.frame_tail = tail.min(self.rows.len());
        self.frame_head = head.min(self.frame_tail);
    }

    fn value_at(&self, row: usize, column: usize) -> Probe {
        match self.rows[row].get(column) {
            Some(v) => Probe::from_value(v.clone()),
            None => Probe::FoundNull,
        }
    }
}

impl PartitionCursor for PartitionBuffer {
    fn probe_partition(&self, column: usize, row_offset: i64) -> Probe {
        let Some(target) = (self.current as i64).checked_add(row_offset) else {
            return Probe::OutOfRange;
        };
        if target < 0 || target >= self.rows.len() as i64 {
            return Probe::OutOfRange;
        }
        #[allow(clippy::cast_sign_loss)]
        self.value_at(target as usize, column)
    }

    fn probe_frame(&self, column: usize, anchor: Anchor, position: i64) -> Probe {
        if self.frame_head == self.frame_tail {
            return Probe::OutOfRange;
        }
        let base = match anchor {
            Anchor::Head => self.frame_head as i64,
            Anchor::Tail => self.frame_tail as i64 - 1,
        };
        let Some(target) = base.checked_add(position) else {
            return Probe::OutOfRange;
        };
        if target < self.frame_head as i64 || target >= self.frame_tail as i64 {
            return Probe::OutOfRange;
        }
        #[allow(clippy::cast_sign_loss)]
        self.value_at(target as usize, column)
    }

    fn current_arg(&self, index: usize) -> Value {
        self.rows
            .get(self.current)
            .and_then(|row| row.get(index))
            .cloned()
            .unwrap_or(Value::Null)
    }

    fn arg_is_constant(&self, index: usize) -> bool {
        let mut values = self.rows.iter().map(|row| row.get(index));
        let Some(first) = values.next() else {
            return false;
        };
        values.all(|v| v == first)
    }
}

/// Evaluate `func` once per row of a materialized partition, strictly in
/// order, threading one fresh [`PartitionState`] through the whole pass.
///
/// This is the sequential per-partition contract the evaluators rely on:
/// no interleaving, one exclusive state per (function, partition).
pub fn evaluate_partition(
    func: &dyn WindowFunction,
    buffer: &mut PartitionBuffer,
    frame: FramePolicy,
) -> Result<Vec<Value>> {
    let mut state = PartitionState::default();
    let mut results = Vec::with_capacity(buffer.len());
    for row in 0..buffer.len() {
        buffer.set_current(row);
        match frame {
            FramePolicy::WholePartition => buffer.set_frame(0, buffer.len()),
            FramePolicy::HeadToCurrent => buffer.set_frame(0, row + 1),
        }
        results.push(func.evaluate(buffer, &mut state)?);
    }
    Ok(results)
}
