/// Numeric conversion and arithmetic helpers.
///
/// This module collects the small conversions between integer and
/// floating-point types that the evaluator performs in several places, and the
/// floored modulo used by float mode. Casts that may round are kept here, in
/// one place, with their precision loss spelled out.
pub mod num;
