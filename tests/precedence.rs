//! Property-based tests for operator precedence and associativity.
//!
//! Each property renders an expression from generated operands and compares
//! the evaluated result with the same computation done directly in Rust.

use proptest::prelude::*;
use reckon::{Number, NumericMode, evaluate, parse};

fn eval(src: &str) -> Number {
    evaluate(src, None, None, NumericMode::Float).unwrap_or_else(|e| panic!("'{src}' failed: {e}"))
}

fn eval_decimal(src: &str) -> Number {
    evaluate(src, None, None, NumericMode::Decimal).unwrap_or_else(|e| panic!("'{src}' failed: {e}"))
}

fn arb_operand() -> impl Strategy<Value = i64> {
    0_i64..1000
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn multiplication_binds_tighter_than_addition(a in arb_operand(),
                                                  b in arb_operand(),
                                                  c in arb_operand()) {
        prop_assert_eq!(eval(&format!("{a} + {b} * {c}")), Number::Integer(a + b * c));
        prop_assert_eq!(eval(&format!("{a} * {b} + {c}")), Number::Integer(a * b + c));
    }

    #[test]
    fn subtraction_is_left_associative(a in arb_operand(),
                                       b in arb_operand(),
                                       c in arb_operand()) {
        prop_assert_eq!(eval(&format!("{a} - {b} - {c}")), Number::Integer(a - b - c));
    }

    #[test]
    fn modulo_shares_multiplicative_level(a in arb_operand(),
                                          b in arb_operand(),
                                          c in 1_i64..20) {
        prop_assert_eq!(eval(&format!("{a} * {b} % {c}")), Number::Integer((a * b).rem_euclid(c)));
        prop_assert_eq!(eval(&format!("-{a} % {c}")), Number::Integer((-a).rem_euclid(c)));
    }

    #[test]
    fn power_binds_tighter_than_negation(a in 0_i64..100) {
        prop_assert_eq!(eval(&format!("-{a} ** 2")), Number::Integer(-(a * a)));
        prop_assert_eq!(eval(&format!("(-{a}) ** 2")), Number::Integer(a * a));
    }

    #[test]
    fn power_is_right_associative(a in 1_i64..4, b in 0_u32..3, c in 0_u32..3) {
        let expected = a.pow(b.pow(c));
        prop_assert_eq!(eval(&format!("{a} ** {b} ** {c}")), Number::Integer(expected));
        prop_assert_eq!(eval(&format!("{a} ^ {b} ^ {c}")), Number::Integer(expected));
    }

    #[test]
    fn division_always_yields_a_float(a in arb_operand(), b in 1_i64..100) {
        #[allow(clippy::cast_precision_loss)]
        let expected = a as f64 / b as f64;
        prop_assert_eq!(eval(&format!("{a} / {b}")), Number::Float(expected));
    }

    #[test]
    fn signs_apply_before_multiplication(a in arb_operand(), b in arb_operand()) {
        prop_assert_eq!(eval(&format!("-{a} * {b}")), Number::Integer(-a * b));
        prop_assert_eq!(eval(&format!("{a} - -{b}")), Number::Integer(a + b));
        prop_assert_eq!(eval(&format!("{a} * +{b}")), Number::Integer(a * b));
    }

    #[test]
    fn parentheses_override_precedence(a in arb_operand(),
                                       b in arb_operand(),
                                       c in arb_operand()) {
        prop_assert_eq!(eval(&format!("({a} + {b}) * {c}")), Number::Integer((a + b) * c));
        prop_assert_eq!(eval(&format!("{a} - ({b} - {c})")), Number::Integer(a - (b - c)));
    }

    #[test]
    fn rendered_tree_shows_grouping(a in arb_operand(),
                                    b in arb_operand(),
                                    c in arb_operand()) {
        let tree = parse(&format!("{a} + {b} * {c}")).unwrap();
        prop_assert_eq!(tree.to_string(), format!("({a} + ({b} * {c}))"));
    }

    #[test]
    fn exact_division_round_trips(a in arb_operand(), b in 1_i64..50) {
        prop_assert_eq!(eval_decimal(&format!("{a} / {b} * {b}")), Number::Integer(a));
    }
}
