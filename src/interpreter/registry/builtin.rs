use std::{
    collections::HashMap,
    f64::consts::{E, PI, TAU},
};

use crate::interpreter::{
    registry::core::{Binding, Function},
    value::core::Number,
};

/// Defines the built-in functions by generating a lookup table and a name
/// list.
///
/// Each entry provides a name and a body. Unary bodies are applied to their
/// single argument; binary bodies to their two arguments.
///
/// The macro produces:
/// - `builtin_functions()`, the name to [`Function`] pairs,
/// - `BUILTIN_FUNCTIONS`, the list of built-in function names.
macro_rules! builtin_functions {
    (
        unary: { $($uname:literal => $ufunc:expr),* $(,)? }
        binary: { $($bname:literal => $bfunc:expr),* $(,)? }
    ) => {
        fn builtin_functions() -> Vec<(&'static str, Function)> {
            vec![
                $(($uname, Function::unary($ufunc)),)*
                $(($bname, Function::binary($bfunc)),)*
            ]
        }

        /// Names of the built-in functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[$($uname,)* $($bname,)*];
    };
}

builtin_functions! {
    unary: {
        "sin"     => f64::sin,
        "cos"     => f64::cos,
        "tan"     => f64::tan,
        "asin"    => f64::asin,
        "acos"    => f64::acos,
        "atan"    => f64::atan,
        "sinh"    => f64::sinh,
        "cosh"    => f64::cosh,
        "tanh"    => f64::tanh,
        "sqrt"    => f64::sqrt,
        "log"     => f64::ln,
        "log10"   => f64::log10,
        "log2"    => f64::log2,
        "exp"     => f64::exp,
        "floor"   => f64::floor,
        "ceil"    => f64::ceil,
        "abs"     => f64::abs,
        "fabs"    => f64::abs,
        "round"   => f64::round_ties_even,
        "degrees" => f64::to_degrees,
        "radians" => f64::to_radians,
    }
    binary: {
        "pow"   => f64::powf,
        "atan2" => f64::atan2,
        "hypot" => f64::hypot,
    }
}

/// Names of the built-in constants.
pub const BUILTIN_CONSTANTS: &[&str] = &["pi", "e", "tau"];

/// The built-in constants and functions, keyed by name.
///
/// # Example
/// ```
/// use reckon::interpreter::registry::builtin::{BUILTIN_CONSTANTS, BUILTIN_FUNCTIONS, bindings};
///
/// let table = bindings();
/// assert_eq!(table.len(), BUILTIN_CONSTANTS.len() + BUILTIN_FUNCTIONS.len());
/// assert!(table.contains_key("hypot"));
/// ```
#[must_use]
pub fn bindings() -> HashMap<String, Binding> {
    let constants = [("pi", PI), ("e", E), ("tau", TAU)];

    constants.into_iter()
             .map(|(name, value)| (name.to_string(), Binding::Constant(Number::Float(value))))
             .chain(builtin_functions().into_iter()
                                       .map(|(name, f)| (name.to_string(), Binding::Function(f))))
             .collect()
}
