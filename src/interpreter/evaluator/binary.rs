/// Binary operation dispatch across numeric representations.
pub mod core;

/// Integer and float arithmetic of float mode.
pub mod scalar;

/// Exponentiation in both modes.
pub mod power;

/// Exact-decimal arithmetic.
pub mod decimal;
