use thiserror::Error;

use crate::error::ErrorKind;

/// The underlying cause of an [`EvalError::Arithmetic`] failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticFault {
    /// A negative base raised to a non-integral power has no real result.
    #[error("a negative number cannot be raised to a fractional power")]
    NegativeFractionalPower,
    /// A float result overflowed or lost its numeric meaning.
    #[error("result out of range")]
    OutOfRange,
    /// A function returned no finite result for finite arguments.
    #[error("math domain error in '{function}'")]
    Domain {
        /// Name of the function.
        function: String,
    },
    /// Exact-decimal powers only support integral exponents.
    #[error("exponent must be an integer in exact-decimal mode")]
    NonIntegralExponent,
    /// Exact-decimal exponent beyond the supported magnitude.
    #[error("exponent magnitude exceeds {limit}")]
    ExponentTooLarge {
        /// Largest accepted magnitude.
        limit: i64,
    },
    /// A literal that the active representation cannot hold.
    #[error("literal '{literal}' cannot be represented")]
    LiteralOutOfRange {
        /// The literal text.
        literal: String,
    },
}

/// Represents all errors that can occur while evaluating a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A name that is neither `ans`, a caller variable, nor a registered
    /// constant, or a call of a name that is not a registered function.
    #[error("Unknown name '{name}' at position {position}.")]
    UnknownName {
        /// The name.
        name:     String,
        /// Byte offset in the source.
        position: usize,
    },
    /// Division or modulo by zero, or zero raised to a negative power.
    #[error("Division by zero at position {position}.")]
    DivisionByZero {
        /// Byte offset of the operator.
        position: usize,
    },
    /// A domain or range failure of an arithmetic primitive.
    #[error("Arithmetic error at position {position}: {cause}.")]
    Arithmetic {
        /// What went wrong.
        #[source]
        cause:    ArithmeticFault,
        /// Byte offset of the operator, literal or call.
        position: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Function '{name}' takes {expected} argument(s) but {found} were given (position \
             {position}).")]
    Arity {
        /// Function name.
        name:     String,
        /// Declared arity.
        expected: usize,
        /// Number of arguments supplied.
        found:    usize,
        /// Byte offset of the call.
        position: usize,
    },
    /// A function call in exact-decimal mode.
    #[error("Function '{name}' cannot be called in exact-decimal mode (position {position}).")]
    Mode {
        /// Function name.
        name:     String,
        /// Byte offset of the call.
        position: usize,
    },
    /// `ans` was used but no previous result was supplied.
    #[error("No previous result is available for 'ans' (position {position}).")]
    NoPreviousResult {
        /// Byte offset of the reference.
        position: usize,
    },
    /// A caller variable bound to something that is not a finite number.
    #[error("Variable '{name}' does not hold a number (position {position}).")]
    NonNumericVariable {
        /// Variable name.
        name:     String,
        /// Byte offset of the reference.
        position: usize,
    },
    /// A hand-built tree deeper than the evaluator's limit.
    #[error("Expression nests deeper than {limit} levels.")]
    NestingTooDeep {
        /// Configured maximum depth.
        limit: usize,
    },
}

impl EvalError {
    /// Returns the taxonomy tag of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownName { .. } => ErrorKind::UnknownName,
            Self::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Self::Arithmetic { .. } => ErrorKind::ArithmeticError,
            Self::Arity { .. } => ErrorKind::ArityError,
            Self::Mode { .. } => ErrorKind::ModeError,
            Self::NoPreviousResult { .. } => ErrorKind::NoPreviousResult,
            Self::NonNumericVariable { .. } => ErrorKind::NonNumericVariable,
            Self::NestingTooDeep { .. } => ErrorKind::LimitExceeded,
        }
    }
}
