//! Positional window functions with IGNORE NULLS semantics, plus the
//! flip-flop gate.
//!
//! Provides four evaluator families over a narrow [`PartitionCursor`]
//! contract implemented by the host engine:
//!
//! 1. **lag/lead ignore nulls**: offset-based lookahead/lookbehind that
//!    skips NULL rows while counting, bounded by the whole partition.
//! 2. **first_value/last_value ignore nulls**: nearest non-null value from
//!    the current frame's head or tail.
//! 3. **nth_value** (from head or tail, respecting or ignoring NULLs):
//!    1-based positional access with validated `nth`.
//! 4. **flip_flop**: a two-state boolean gate with per-partition state,
//!    marking an active region between a flip and a flop condition.
//!
//! Partitioning, ordering, and frame-bound computation are the engine's
//! job; evaluation here is synchronous, row-driven, and strictly sequential
//! per partition. Per-partition state is an explicit [`PartitionState`]
//! threaded into every call by exclusive mutable reference, so
//! cross-partition parallelism is safe as long as states are never shared.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use winext_error::{Result, WinextError};
use winext_types::{Anchor, Direction, Value};

pub mod buffer;
pub mod cursor;
pub mod first_last;
pub mod flip_flop;
pub mod lead_lag;
pub mod nth_value;

pub use buffer::{FramePolicy, PartitionBuffer, evaluate_partition};
pub use cursor::PartitionCursor;
pub use first_last::FirstLastFunc;
pub use flip_flop::FlipFlopFunc;
pub use lead_lag::LeadLagFunc;
pub use nth_value::NthValueFunc;

/// Per-partition evaluation state.
///
/// Zero-initialized at the start of a partition pass, mutated only by the
/// flip-flop gate, and discarded when the partition changes. Owned by the
/// partition-processing context, never shared between partitions.
#[derive(Clone, Debug, Default)]
pub struct PartitionState {
    pub(crate) flipped: bool,
}

impl PartitionState {
    /// A fresh (idle) state for a new partition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the flip-flop gate is currently in its active region.
    #[must_use]
    pub const fn is_flipped(&self) -> bool {
        self.flipped
    }
}

/// A cursor-driven window function.
///
/// This trait is **open** (engine-implementable). Implementations must be
/// thread-safe so the registry can share them across concurrent query
/// executors via `Arc`; all mutable evaluation state lives in the
/// per-partition [`PartitionState`].
pub trait WindowFunction: Send + Sync {
    /// Compute this function's value for the cursor's current row.
    fn evaluate(&self, cursor: &dyn PartitionCursor, state: &mut PartitionState)
    -> Result<Value>;

    /// The number of arguments this function accepts. Every variant here
    /// has a fixed arity.
    fn num_args(&self) -> i32;

    /// The function name, used in error messages and diagnostics.
    fn name(&self) -> &str;
}

impl std::fmt::Debug for dyn WindowFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowFunction")
            .field("name", &self.name())
            .field("num_args", &self.num_args())
            .finish()
    }
}

/// Composite lookup key for functions: `(UPPERCASE name, num_args)`.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct FunctionKey {
    /// Function name, stored as uppercase ASCII.
    pub name: String,
    /// Expected argument count.
    pub num_args: i32,
}

impl FunctionKey {
    /// Create a new function key with the name canonicalized to uppercase.
    #[must_use]
    pub fn new(name: &str, num_args: i32) -> Self {
        Self {
            name: canonical_name(name),
            num_args,
        }
    }
}

/// Registry of window functions, keyed by `(name, num_args)`.
///
/// Names match case-insensitively. Every registered variant has a fixed
/// arity, so lookup is an exact match with no variadic fallback.
#[derive(Default)]
pub struct FunctionRegistry {
    windows: HashMap<FunctionKey, Arc<dyn WindowFunction>>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a window function, keyed by `(name, num_args)`.
    ///
    /// Overwrites any existing function with the same key. Returns the
    /// previous function if one existed.
    pub fn register<F>(&mut self, function: F) -> Option<Arc<dyn WindowFunction>>
    where
        F: WindowFunction + 'static,
    {
        let key = FunctionKey::new(function.name(), function.num_args());
        self.windows.insert(key, Arc::new(function))
    }

    /// Look up a window function by `(name, num_args)`.
    #[must_use]
    pub fn find(&self, name: &str, num_args: i32) -> Option<Arc<dyn WindowFunction>> {
        let key = FunctionKey::new(name, num_args);
        let result = self.windows.get(&key).map(Arc::clone);
        debug!(
            name = %key.name,
            arity = num_args,
            hit = result.is_some(),
            "registry lookup"
        );
        result
    }

    /// Resolve a function for dispatch with the caller's argument count.
    ///
    /// Distinguishes a known name called at the wrong arity
    /// ([`WinextError::WrongArgumentCount`], carrying the registered
    /// arity) from a name with no registration at all.
    pub fn resolve(&self, name: &str, num_args: usize) -> Result<Arc<dyn WindowFunction>> {
        let arity = i32::try_from(num_args).unwrap_or(i32::MAX);
        if let Some(func) = self.find(name, arity) {
            return Ok(func);
        }
        let canon = canonical_name(name);
        match self.windows.keys().find(|k| k.name == canon) {
            Some(key) => Err(WinextError::wrong_argument_count(
                name,
                key.num_args,
                num_args,
            )),
            None => Err(WinextError::function_error(format!(
                "no such window function: {name}"
            ))),
        }
    }

    /// Whether the registry contains any function with this name
    /// (any arg count).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        let canon = canonical_name(name);
        self.windows.keys().any(|k| k.name == canon)
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

fn canonical_name(name: &str) -> String {
    name.trim().to_ascii_uppercase()
}

/// Register every ignore-nulls variant and the flip-flop gates.
///
/// Plain `nth_value` (respecting NULLs, counting from the head, no default)
/// is the host engine's own built-in and is deliberately not re-registered.
pub fn register_window_extras(registry: &mut FunctionRegistry) {
    info!("registering ignore-nulls window functions");

    registry.register(LeadLagFunc::new(
        "lag_ignore_nulls",
        Direction::Backward,
        false,
        false,
    ));
    registry.register(LeadLagFunc::new(
        "lag_ignore_nulls_with_offset",
        Direction::Backward,
        true,
        false,
    ));
    registry.register(LeadLagFunc::new(
        "lag_ignore_nulls_with_offset_with_default",
        Direction::Backward,
        true,
        true,
    ));
    registry.register(LeadLagFunc::new(
        "lead_ignore_nulls",
        Direction::Forward,
        false,
        false,
    ));
    registry.register(LeadLagFunc::new(
        "lead_ignore_nulls_with_offset",
        Direction::Forward,
        true,
        false,
    ));
    registry.register(LeadLagFunc::new(
        "lead_ignore_nulls_with_offset_with_default",
        Direction::Forward,
        true,
        true,
    ));

    registry.register(FirstLastFunc::new(
        "first_value_ignore_nulls",
        Anchor::Head,
        false,
    ));
    registry.register(FirstLastFunc::new(
        "first_value_ignore_nulls_with_default",
        Anchor::Head,
        true,
    ));
    registry.register(FirstLastFunc::new(
        "last_value_ignore_nulls",
        Anchor::Tail,
        false,
    ));
    registry.register(FirstLastFunc::new(
        "last_value_ignore_nulls_with_default",
        Anchor::Tail,
        true,
    ));

    registry.register(NthValueFunc::new(
        "nth_value_with_default",
        false,
        false,
        true,
    ));
    registry.register(NthValueFunc::new(
        "nth_value_ignore_nulls",
        false,
        true,
        false,
    ));
    registry.register(NthValueFunc::new(
        "nth_value_ignore_nulls_with_default",
        false,
        true,
        true,
    ));
    registry.register(NthValueFunc::new("nth_value_from_last", true, false, false));
    registry.register(NthValueFunc::new(
        "nth_value_from_last_with_default",
        true,
        false,
        true,
    ));
    registry.register(NthValueFunc::new(
        "nth_value_from_last_ignore_nulls",
        true,
        true,
        false,
    ));
    registry.register(NthValueFunc::new(
        "nth_value_from_last_ignore_nulls_with_default",
        true,
        true,
        true,
    ));

    registry.register(FlipFlopFunc::new("flip_flop_1", 0, 0));
    registry.register(FlipFlopFunc::new("flip_flop_2", 0, 1));
}
