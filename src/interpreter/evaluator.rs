/// Core evaluation logic and configuration.
///
/// Contains the [`core::Evaluator`], its configuration, the per-call
/// [`core::Context`] and the dispatch over tree nodes.
pub mod core;

/// Binary operator evaluation.
///
/// Implements the arithmetic primitives of both numeric modes.
pub mod binary;

/// Unary operator evaluation.
pub mod unary;

/// Identifier resolution: the previous result, caller variables and registered
/// constants, in that order.
pub mod identifier;

/// Function call evaluation.
///
/// Resolves the callee in the registry, evaluates the arguments and checks
/// the declared arity.
pub mod function;
