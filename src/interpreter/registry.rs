/// The registry type, its bindings and registration rules.
pub mod core;

/// The built-in constants and functions every evaluator starts with.
pub mod builtin;
