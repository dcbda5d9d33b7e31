//! # reckon
//!
//! reckon is a safe arithmetic expression evaluator written in Rust.
//! It parses untrusted text into a restricted expression tree and reduces the
//! tree to a number under a whitelist of names, in either floating-point or
//! exact-decimal mode. Nothing beyond the fixed arithmetic primitives and the
//! registered functions is ever executed.
//!
//! ```
//! use reckon::{Number, NumericMode, evaluate};
//!
//! assert_eq!(evaluate("2 ** 3 ** 2", None, None, NumericMode::Float).unwrap(),
//!            Number::Integer(512));
//! assert_eq!(evaluate("0.1 + 0.2", None, None, NumericMode::Decimal).unwrap().to_string(),
//!            "0.3");
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    missing_docs,
)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use std::collections::HashMap;

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator types that represent
/// an expression as a tree. The tree is built by the parser and walked by the
/// evaluator; it is never modified once built.
pub mod ast;
/// Batch evaluation of independent expressions.
///
/// Items and outcomes are serde types, so a batch can be read from and written
/// back to JSON.
pub mod batch;
/// Provides unified error types for parsing, evaluation and registration.
///
/// Every failure carries the byte position of the offending token where one
/// exists, and maps to a flat [`ErrorKind`] for front ends.
pub mod error;
/// Orchestrates lexing, parsing, name resolution and evaluation.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, registry, value types and evaluator.
/// - Provides entry points for parsing and evaluating expressions.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Numeric conversion helpers shared by the parser and the evaluator.
pub mod util;

pub use crate::{
    error::{Error, ErrorKind},
    interpreter::{
        evaluator::core::{Context, Evaluator, EvaluatorConfig},
        parser::core::parse,
        registry::core::{Binding, Function, PREVIOUS_RESULT, Registry},
        value::{
            core::{Number, NumericMode},
            decimal::ExactDecimal,
        },
    },
};

/// Evaluates one expression with a fresh evaluator holding the built-in names.
///
/// `previous_result` is the value of `ans`; `variables` are extra names the
/// expression may refer to. Neither is retained.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use reckon::{ErrorKind, Number, NumericMode, evaluate};
///
/// let ten = Number::Integer(10);
/// assert_eq!(evaluate("ans + 2", Some(&ten), None, NumericMode::Float).unwrap(),
///            Number::Integer(12));
///
/// let variables = HashMap::from([("x".to_string(), Number::Integer(3))]);
/// assert_eq!(evaluate("x + 2", None, Some(&variables), NumericMode::Float).unwrap(),
///            Number::Integer(5));
///
/// let err = evaluate("ans + 2", None, None, NumericMode::Float).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::NoPreviousResult);
/// ```
pub fn evaluate(expression: &str,
                previous_result: Option<&Number>,
                variables: Option<&HashMap<String, Number>>,
                mode: NumericMode)
                -> Result<Number, Error> {
    let mut context = Context::new(mode);
    if let Some(value) = previous_result {
        context = context.with_previous_result(value);
    }
    if let Some(variables) = variables {
        context = context.with_variables(variables);
    }
    Evaluator::new().evaluate(expression, &context)
}
