use thiserror::Error;

use crate::error::ErrorKind;

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input does not follow the arithmetic grammar.
    #[error("Syntax error at position {position}: {message}.")]
    Syntax {
        /// What went wrong.
        message:  String,
        /// Byte offset where the error was detected.
        position: usize,
    },
    /// The input uses a construct the evaluator never accepts, such as
    /// assignment, attribute access or a string literal.
    #[error("Unsupported construct at position {position}: {construct} is not allowed.")]
    Unsupported {
        /// Name of the rejected construct.
        construct: &'static str,
        /// Byte offset of the token that introduced it.
        position:  usize,
    },
    /// The input exceeds the configured maximum length.
    #[error("Expression is too long: {length} bytes exceeds the limit of {limit}.")]
    TooLong {
        /// Length of the rejected input in bytes.
        length: usize,
        /// Configured maximum length.
        limit:  usize,
    },
    /// The tree would be deeper than the configured maximum.
    #[error("Expression nests deeper than {limit} levels at position {position}.")]
    NestingTooDeep {
        /// Configured maximum depth.
        limit:    usize,
        /// Byte offset where the limit was crossed.
        position: usize,
    },
}

impl ParseError {
    /// Returns the taxonomy tag of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax { .. } => ErrorKind::SyntaxError,
            Self::Unsupported { .. } => ErrorKind::UnsupportedConstruct,
            Self::TooLong { .. } | Self::NestingTooDeep { .. } => ErrorKind::LimitExceeded,
        }
    }
}
