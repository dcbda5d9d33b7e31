use std::collections::HashMap;

use pretty_assertions::assert_eq;
use reckon::{
    Context, Error, ErrorKind, Evaluator, EvaluatorConfig, Number, NumericMode,
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::{EvalError, ParseError},
    evaluate, parse,
};

fn eval(src: &str) -> Number {
    evaluate(src, None, None, NumericMode::Float).unwrap_or_else(|e| panic!("'{src}' failed: {e}"))
}

fn eval_err(src: &str) -> Error {
    match evaluate(src, None, None, NumericMode::Float) {
        Ok(v) => panic!("'{src}' evaluated to {v} but was expected to fail"),
        Err(e) => e,
    }
}

fn assert_kind(src: &str, kind: ErrorKind) {
    assert_eq!(eval_err(src).kind(), kind, "wrong error kind for '{src}'");
}

fn assert_close(src: &str, expected: f64) {
    let value = eval(src).as_f64().unwrap();
    assert!((value - expected).abs() < 1e-12,
            "'{src}' evaluated to {value}, expected {expected}");
}

#[test]
fn basic_arithmetic() {
    assert_eq!(eval("1 + 2"), Number::Integer(3));
    assert_eq!(eval("7 * 9"), Number::Integer(63));
    assert_eq!(eval("8 - 5"), Number::Integer(3));
    assert_eq!(eval("2 + 3 * 4"), Number::Integer(14));
    assert_eq!(eval("(2 + 3) * 4"), Number::Integer(20));
    assert_eq!(eval("1.5 * 2"), Number::Float(3.0));
}

#[test]
fn true_division_always_yields_a_float() {
    assert!(matches!(eval("10 / 2"), Number::Float(f) if f == 5.0));
    assert!(matches!(eval("7 / 2"), Number::Float(f) if f == 3.5));
}

#[test]
fn modulo_takes_the_sign_of_the_divisor() {
    assert_eq!(eval("7 % 3"), Number::Integer(1));
    assert_eq!(eval("-7 % 3"), Number::Integer(2));
    assert_eq!(eval("7 % -3"), Number::Integer(-2));
    assert_eq!(eval("7.5 % 2"), Number::Float(1.5));
    assert_eq!(eval("-7.5 % 2"), Number::Float(0.5));
}

#[test]
fn power_spellings_agree() {
    assert_eq!(eval("2^3"), Number::Integer(8));
    assert_eq!(eval("2**3"), Number::Integer(8));
    assert_eq!(parse("2^3").unwrap().to_string(), parse("2**3").unwrap().to_string());
}

#[test]
fn power_binds_tighter_than_unary_minus() {
    assert_eq!(eval("-3**2"), Number::Integer(-9));
    assert_eq!(eval("(-3)**2"), Number::Integer(9));
    assert_eq!(eval("-3**2 + 1"), Number::Integer(-8));
    assert_eq!(parse("-3**2").unwrap().to_string(), "(-(3 ** 2))");
}

#[test]
fn power_is_right_associative() {
    assert_eq!(eval("2**3**2"), Number::Integer(512));
    assert_eq!(eval("2^3^2"), Number::Integer(512));
    assert_eq!(eval("(2**3)**2"), Number::Integer(64));
}

#[test]
fn power_accepts_signed_exponents() {
    assert_eq!(eval("2**-1"), Number::Float(0.5));
    assert_eq!(eval("2**+3"), Number::Integer(8));
    assert_eq!(eval("0**0"), Number::Integer(1));
    assert_close("2 ** 0.5", std::f64::consts::SQRT_2);
}

#[test]
fn power_failures() {
    assert_kind("0 ** -1", ErrorKind::DivisionByZero);
    assert_kind("0.0 ** -2.5", ErrorKind::DivisionByZero);
    assert_kind("(-8) ** (1/3)", ErrorKind::ArithmeticError);
    assert_kind("10 ** 400", ErrorKind::ArithmeticError);
    assert_kind("10.0 ** 400", ErrorKind::ArithmeticError);
}

#[test]
fn division_by_zero() {
    assert_kind("1/0", ErrorKind::DivisionByZero);
    assert_kind("1%0", ErrorKind::DivisionByZero);
    assert_kind("1.0/0", ErrorKind::DivisionByZero);
    assert_kind("5 % 0.0", ErrorKind::DivisionByZero);
}

#[test]
fn integer_overflow_falls_back_to_float() {
    assert_eq!(eval("9223372036854775807 + 1"), Number::Float(2f64.powi(63)));
    assert_eq!(eval("3037000500 * 3037000500"), Number::Float(3_037_000_500f64 * 3_037_000_500f64));
    assert_eq!(eval("-(-9223372036854775807 - 1)"), Number::Float(2f64.powi(63)));
}

#[test]
fn literal_forms() {
    assert_eq!(eval(".5"), Number::Float(0.5));
    assert_eq!(eval("5."), Number::Float(5.0));
    assert_eq!(eval("1e3"), Number::Float(1000.0));
    assert_eq!(eval("2.5E-4"), Number::Float(0.00025));
    assert_eq!(eval("0"), Number::Integer(0));
    assert_eq!(eval("000"), Number::Integer(0));
    assert_eq!(eval("99999999999999999999"), Number::Float(1e20));
}

#[test]
fn literal_failures() {
    assert_kind("007", ErrorKind::SyntaxError);
    assert_kind("1 + 01", ErrorKind::SyntaxError);
    assert_kind("1e999", ErrorKind::ArithmeticError);
}

#[test]
fn builtin_functions() {
    assert_close("sin(pi/2)", 1.0);
    assert_eq!(eval("sqrt(16)"), Number::Float(4.0));
    assert_eq!(eval("sqrt(16)"), Number::Integer(4));
    assert_eq!(eval("pow(2, 10)"), Number::Float(1024.0));
    assert_eq!(eval("hypot(3, 4)"), Number::Float(5.0));
    assert_close("atan2(1, 1)", std::f64::consts::FRAC_PI_4);
    assert_close("log(e)", 1.0);
    assert_close("log10(1000)", 3.0);
    assert_close("log2(8)", 3.0);
    assert_close("degrees(pi)", 180.0);
    assert_close("radians(180)", std::f64::consts::PI);
    assert_close("exp(0) + cos(0) + tan(0)", 2.0);
    assert_eq!(eval("round(2.5)"), Number::Float(2.0));
    assert_eq!(eval("round(3.5)"), Number::Float(4.0));
    assert_eq!(eval("floor(-1.5)"), Number::Float(-2.0));
    assert_eq!(eval("ceil(-1.5)"), Number::Float(-1.0));
    assert_eq!(eval("abs(-3) + fabs(-1)"), Number::Float(4.0));
    assert_close("tau - 2 * pi", 0.0);
}

#[test]
fn function_arguments_are_full_expressions() {
    assert_eq!(eval("pow(1 + 1, sqrt(9))"), Number::Float(8.0));
    assert_eq!(eval("-sqrt(4) ** 2"), Number::Float(-4.0));
    assert_eq!(eval("sqrt(16,)"), Number::Float(4.0));
}

#[test]
fn function_failures() {
    assert_kind("sqrt(-1)", ErrorKind::ArithmeticError);
    assert_kind("log(0)", ErrorKind::ArithmeticError);
    assert_kind("asin(2)", ErrorKind::ArithmeticError);
    assert_kind("foo(1)", ErrorKind::UnknownName);
    assert_kind("pi(1)", ErrorKind::UnknownName);
    assert_kind("sin", ErrorKind::UnknownName);
    assert_kind("sin()", ErrorKind::ArityError);
    assert_kind("pow(1)", ErrorKind::ArityError);
}

#[test]
fn arity_error_reports_counts() {
    match eval_err("sqrt(1, 2)") {
        Error::Eval(EvalError::Arity { name,
                                       expected,
                                       found,
                                       position, }) => {
            assert_eq!((name.as_str(), expected, found, position), ("sqrt", 1, 2, 0));
        },
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn arguments_are_evaluated_before_the_arity_check() {
    assert_kind("sin(1/0, 2)", ErrorKind::DivisionByZero);
}

#[test]
fn previous_result() {
    let ten = Number::Integer(10);
    assert_eq!(evaluate("ans+2", Some(&ten), None, NumericMode::Float).unwrap(),
               Number::Integer(12));
    assert_kind("ans+2", ErrorKind::NoPreviousResult);

    let nan = Number::Float(f64::NAN);
    let err = evaluate("ans", Some(&nan), None, NumericMode::Float).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NonNumericVariable);
}

#[test]
fn previous_result_can_be_disabled() {
    let evaluator = Evaluator::with_config(EvaluatorConfig { allow_previous_result: false,
                                                             ..EvaluatorConfig::default() });
    let ten = Number::Integer(10);
    let context = Context::new(NumericMode::Float).with_previous_result(&ten);
    let err = evaluator.evaluate("ans + 1", &context).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownName);

    let variables = HashMap::from([("ans".to_string(), Number::Integer(1))]);
    let context = context.with_variables(&variables);
    assert_eq!(evaluator.evaluate("ans + 1", &context).unwrap(), Number::Integer(2));
}

#[test]
fn variables() {
    let variables = HashMap::from([("x".to_string(), Number::Integer(3)),
                                   ("pi".to_string(), Number::Integer(3)),
                                   ("bad".to_string(), Number::Float(f64::INFINITY))]);
    let run = |src: &str| evaluate(src, None, Some(&variables), NumericMode::Float);

    assert_eq!(run("x+2").unwrap(), Number::Integer(5));
    assert_eq!(run("pi").unwrap(), Number::Integer(3));
    assert_eq!(run("bad + 1").unwrap_err().kind(), ErrorKind::NonNumericVariable);
    assert_eq!(run("y").unwrap_err().kind(), ErrorKind::UnknownName);
}

#[test]
fn resolution_prefers_ans_then_variables_then_constants() {
    let previous = Number::Integer(1);
    let variables = HashMap::from([("ans".to_string(), Number::Integer(2)),
                                   ("e".to_string(), Number::Integer(3))]);
    let context = Context::new(NumericMode::Float).with_previous_result(&previous)
                                                  .with_variables(&variables);
    let evaluator = Evaluator::new();

    assert_eq!(evaluator.evaluate("ans", &context).unwrap(), Number::Integer(1));
    assert_eq!(evaluator.evaluate("e", &context).unwrap(), Number::Integer(3));
    assert_close("e", std::f64::consts::E);
}

#[test]
fn attack_strings_are_refused() {
    for src in ["__import__('os').system('ls')",
                "open('/etc/passwd').read()",
                "eval('1')",
                "exec",
                "__builtins__",
                "globals()",
                "().__class__.__bases__",
                "[c for c in ().__class__.__bases__]",
                "lambda: 1"]
    {
        let kind = eval_err(src).kind();
        assert!(matches!(kind,
                         ErrorKind::UnsupportedConstruct
                         | ErrorKind::UnknownName
                         | ErrorKind::SyntaxError),
                "'{src}' failed with {kind}");
    }
    assert_kind("__import__('os').system('ls')", ErrorKind::UnsupportedConstruct);
}

#[test]
fn unsupported_constructs() {
    for src in ["x = 1",
                "x += 1",
                "(x := 1)",
                "a.b",
                "a[0]",
                "'abc'",
                "\"abc\"",
                "True",
                "None",
                "[1, 2]",
                "{1: 2}",
                "{1, 2}",
                "(1, 2)",
                "sqrt(x=1)",
                "sqrt(*x)",
                "pow(**x)",
                "1; 2",
                "1\n2",
                "lambda x: x",
                "x for x in y",
                "1 if 2 else 3",
                "1 < 2",
                "1 == 2",
                "1 and 2",
                "not 1",
                "1 & 2",
                "~1",
                "1 << 2",
                "1 // 2",
                "1 @ 2",
                "(sin)(1)",
                "sin(1)(2)",
                "2(3)"]
    {
        assert_kind(src, ErrorKind::UnsupportedConstruct);
    }
}

#[test]
fn unsupported_construct_is_named() {
    match parse("x.real") {
        Err(ParseError::Unsupported { construct, position }) => {
            assert_eq!((construct, position), ("attribute access", 1));
        },
        other => panic!("unexpected result {other:?}"),
    }
    match parse("sqrt(x=1)") {
        Err(ParseError::Unsupported { construct, .. }) => assert_eq!(construct, "keyword argument"),
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn syntax_errors() {
    for src in ["", "   ", "1 +", "(1 + 2", "1 + 2)", "2 $ 3", "1 2", "1.2.3", "*3", "()", "sqrt(,)",
                "sqrt(1", "-"]
    {
        assert_kind(src, ErrorKind::SyntaxError);
    }
}

#[test]
fn syntax_errors_carry_positions() {
    assert_eq!(parse("1 + $").unwrap_err(),
               ParseError::Syntax { message:  "unexpected character `$`".to_string(),
                                    position: 4, });
    assert_eq!(parse("(1 + 2").unwrap_err(),
               ParseError::Syntax { message:  "unclosed `(`".to_string(),
                                    position: 0, });
    assert_eq!(parse("1 + 2)").unwrap_err(),
               ParseError::Syntax { message:  "unmatched `)`".to_string(),
                                    position: 5, });
    assert!(eval_err("1 + foo").to_string().contains("position 4"));
}

#[test]
fn parse_builds_positioned_trees() {
    let tree = parse("-x * 2").unwrap();
    let expected =
        Expr::BinaryOp { left:     Box::new(Expr::UnaryOp { op:       UnaryOperator::Negate,
                                                            operand:  Box::new(Expr::Identifier {
                                                                name:     "x".to_string(),
                                                                position: 1,
                                                            }),
                                                            position: 0, }),
                         op:       BinaryOperator::Mul,
                         right:    Box::new(Expr::Literal { text:     "2".to_string(),
                                                            position: 5, }),
                         position: 3, };
    assert_eq!(tree, expected);
}

#[test]
fn one_tree_evaluates_under_many_contexts() {
    let evaluator = Evaluator::new();
    let tree = parse("x * 2 + 0.1").unwrap();

    let results = [1, 2, 3].map(|x| {
                               let variables = HashMap::from([("x".to_string(), Number::Integer(x))]);
                               let context = Context::new(NumericMode::Decimal).with_variables(&variables);
                               evaluator.evaluate_tree(&tree, &context).unwrap().to_string()
                           });
    assert_eq!(results, ["2.1", "4.1", "6.1"]);
    assert_eq!(tree.to_string(), "((x * 2) + 0.1)");
}

#[test]
fn nesting_limit() {
    let signs = |n: usize| format!("{}1", "-".repeat(n));
    let parens = |n: usize| format!("{}1{}", "(".repeat(n), ")".repeat(n));
    let chain = |n: usize| format!("1{}", "+1".repeat(n));

    assert_eq!(eval(&signs(199)), Number::Integer(-1));
    assert_eq!(eval(&parens(199)), Number::Integer(1));
    assert_eq!(eval(&chain(199)), Number::Integer(200));

    assert_kind(&signs(200), ErrorKind::LimitExceeded);
    assert_kind(&parens(200), ErrorKind::LimitExceeded);
    assert_kind(&chain(200), ErrorKind::LimitExceeded);
}

#[test]
fn nesting_limit_holds_without_a_length_limit() {
    let evaluator = Evaluator::with_config(EvaluatorConfig { max_length: None,
                                                             ..EvaluatorConfig::default() });
    let context = Context::default();
    for src in [format!("1{}", "*1".repeat(50_000)),
                format!("{}1{}", "(".repeat(50_000), ")".repeat(50_000)),
                format!("2{}", "**2".repeat(50_000))]
    {
        let err = evaluator.evaluate(&src, &context).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::NestingTooDeep { limit: 200, .. })));
    }
}

#[test]
fn length_limit() {
    let src = format!("1{}", "+1".repeat(1_000));
    assert_eq!(src.len(), 2_001);
    assert!(matches!(eval_err(&src),
                     Error::Parse(ParseError::TooLong { length: 2_001,
                                                        limit:  2_000, })));
}

#[test]
fn evaluator_guards_hand_built_trees() {
    let mut tree = Expr::Literal { text:     "1".to_string(),
                                   position: 0, };
    for _ in 0..300 {
        tree = Expr::UnaryOp { op:       UnaryOperator::Plus,
                               operand:  Box::new(tree),
                               position: 0, };
    }
    let err = Evaluator::new().evaluate_tree(&tree, &Context::default())
                              .unwrap_err();
    assert_eq!(err, EvalError::NestingTooDeep { limit: 200 });
}

#[test]
fn error_kinds_display_as_taxonomy_names() {
    assert_eq!(ErrorKind::DivisionByZero.to_string(), "DivisionByZero");
    assert_eq!(eval_err("1/0").to_string(), "Division by zero at position 1.");
}
