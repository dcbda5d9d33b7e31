use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Batch payload errors.
///
/// Raised when a batch request as a whole cannot be read. Failures of single
/// items are reported per item instead.
pub mod batch_error;
/// Evaluation errors.
///
/// Contains every failure that can occur while reducing a parsed tree to a
/// number: unknown names, division by zero, domain failures, arity and mode
/// violations, and missing or malformed context values.
pub mod eval_error;
/// Numeric text conversion errors.
///
/// Raised when text such as a command-line value cannot be read as a number in
/// the requested representation.
pub mod number_error;
/// Parsing errors.
///
/// Defines the errors raised while tokenizing and parsing an expression:
/// syntax errors, constructs outside the arithmetic grammar, and the length and
/// nesting limits.
pub mod parse_error;
/// Registration errors.
///
/// Raised when a mapping handed to the name registry contains a name or value
/// that can never be resolved safely.
pub mod registry_error;

pub use batch_error::BatchError;
pub use eval_error::{ArithmeticFault, EvalError};
pub use number_error::NumberError;
pub use parse_error::ParseError;
pub use registry_error::RegistryError;

/// Any failure of [`crate::Evaluator::evaluate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The expression could not be turned into a tree.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The tree could not be reduced to a number.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    /// Returns the taxonomy tag of this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(e) => e.kind(),
            Self::Eval(e) => e.kind(),
        }
    }
}

/// Flat classification of every failure, used by front ends to report the
/// kind of an error separately from its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Malformed input.
    SyntaxError,
    /// Well-formed input using syntax outside the arithmetic grammar.
    UnsupportedConstruct,
    /// A name outside the whitelist and the caller's variables.
    UnknownName,
    /// Division or modulo by zero.
    DivisionByZero,
    /// Domain or range failure of an arithmetic primitive.
    ArithmeticError,
    /// A function called with the wrong number of arguments.
    ArityError,
    /// An operation unavailable in the active numeric mode.
    ModeError,
    /// `ans` used before any result exists.
    NoPreviousResult,
    /// A caller variable that does not hold a number.
    NonNumericVariable,
    /// Input longer or deeper than the configured limits.
    LimitExceeded,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
