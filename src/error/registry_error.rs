use thiserror::Error;

/// Represents the reasons a registration can be refused.
///
/// A refused registration leaves the registry untouched, even for the valid
/// entries of the same mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The previous-result token can never be shadowed by the registry.
    #[error("'{name}' is reserved for the previous result and cannot be registered.")]
    ReservedName {
        /// The rejected name.
        name: String,
    },
    /// The name is not an identifier, or is a reserved keyword, so no
    /// expression could ever refer to it.
    #[error("'{name}' is not a valid name.")]
    InvalidName {
        /// The rejected name.
        name: String,
    },
    /// Constants must be finite numbers.
    #[error("Constant '{name}' must be a finite number.")]
    NonFiniteConstant {
        /// The rejected name.
        name: String,
    },
}
