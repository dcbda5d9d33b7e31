/// Core numeric value type.
///
/// Defines `Number`, the tagged union of integer, float and exact-decimal
/// values, and `NumericMode`, which selects between the float and the
/// exact-decimal representation. Includes conversion between modes, numeric
/// equality, display, and JSON (de)serialization.
pub mod core;
/// Exact decimal support.
///
/// Defines `ExactDecimal`, an arbitrary-precision base-10 number read from its
/// decimal digits, with exact arithmetic and canonical text output.
pub mod decimal;
