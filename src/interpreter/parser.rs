/// Parser entry points and shared state.
///
/// Holds [`core::parse`], the depth bookkeeping every rule reports to, and the
/// top-level check that the whole input was consumed.
pub mod core;

/// Binary operator parsing.
///
/// Implements the two left-associative levels of the grammar: additive and
/// multiplicative operators.
pub mod binary;

/// Unary, power, call and primary parsing.
///
/// Handles signs, the right-associative power operator, calls of registered
/// names, parenthesized groups and literals, and refuses postfix constructs
/// such as attribute access and subscripts.
pub mod unary;

/// Helpers shared by the parsing rules.
pub mod utils;
