use thiserror::Error;

/// Primary error type for winext window-function evaluation.
///
/// Every variant here is fatal to the running query: recoverable conditions
/// (a NULL control argument, a probe landing outside the partition or frame)
/// are ordinary evaluation outcomes and never surface as errors.
#[derive(Error, Debug)]
pub enum WinextError {
    /// The `nth` argument of an `nth_value` variant was zero or negative.
    ///
    /// `nth` is a 1-based ordinal; the diagnostic names the specific
    /// registered variant so the user can find the offending call site.
    #[error("argument of {function} must be greater than zero")]
    InvalidNthArgument { function: String, nth: i64 },

    /// A function was dispatched with an argument count it was not
    /// registered for.
    #[error("wrong number of arguments to {function}: expected {expected}, got {actual}")]
    WrongArgumentCount {
        function: String,
        expected: i32,
        actual: usize,
    },

    /// SQL function domain/runtime error, including dispatch of a name
    /// with no registration.
    #[error("{0}")]
    FunctionError(String),
}

impl WinextError {
    /// Create an [`InvalidNthArgument`](Self::InvalidNthArgument) error for
    /// the named function variant.
    pub fn invalid_nth(function: impl Into<String>, nth: i64) -> Self {
        Self::InvalidNthArgument {
            function: function.into(),
            nth,
        }
    }

    /// Create a [`WrongArgumentCount`](Self::WrongArgumentCount) error.
    pub fn wrong_argument_count(
        function: impl Into<String>,
        expected: i32,
        actual: usize,
    ) -> Self {
        Self::WrongArgumentCount {
            function: function.into(),
            expected,
            actual,
        }
    }

    /// Create a function domain error.
    pub fn function_error(msg: impl Into<String>) -> Self {
        Self::FunctionError(msg.into())
    }

    /// Whether the user can likely fix this by rewriting the query.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidNthArgument { .. } | Self::WrongArgumentCount { .. }
        )
    }

    /// Human-friendly suggestion for fixing this error.
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidNthArgument { .. } => {
                Some("nth is a 1-based position; pass 1 for the first qualifying row")
            }
            Self::WrongArgumentCount { .. } => {
                Some("Check the function's registered arity; each variant has a fixed argument count")
            }
            Self::FunctionError(_) => None,
        }
    }
}

/// Result type alias using `WinextError`.
pub type Result<T> = std::result::Result<T, WinextError>;
