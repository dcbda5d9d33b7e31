use thiserror::Error;

/// Errors raised when reading numeric text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumberError {
    /// The text is not a number.
    #[error("'{0}' is not a number")]
    Invalid(String),
    /// The text is a number the representation cannot hold.
    #[error("'{0}' is out of range")]
    OutOfRange(String),
}
