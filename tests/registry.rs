use std::thread;

use pretty_assertions::assert_eq;
use reckon::{
    Binding, Context, ErrorKind, Evaluator, EvaluatorConfig, Function, Number, NumericMode,
    Registry, error::RegistryError, interpreter::registry::builtin::BUILTIN_FUNCTIONS,
};

fn eval(evaluator: &Evaluator, src: &str) -> Result<Number, reckon::Error> {
    evaluator.evaluate(src, &Context::new(NumericMode::Float))
}

#[test]
fn builtin_names() {
    let evaluator = Evaluator::new();
    for name in ["pi", "e", "tau"].iter().chain(BUILTIN_FUNCTIONS) {
        assert!(evaluator.is_registered(name), "'{name}' is missing");
    }
    assert_eq!(BUILTIN_FUNCTIONS.len(), 24);
    assert_eq!(evaluator.registered_names().len(), 27);
}

#[test]
fn registered_function_is_callable() {
    let evaluator = Evaluator::new();
    evaluator.register([("cube", Binding::from(Function::unary(|x| x.powi(3))))])
             .unwrap();
    assert_eq!(eval(&evaluator, "cube(3)").unwrap(), Number::Integer(27));
    assert_eq!(eval(&evaluator, "cube(1, 2)").unwrap_err().kind(), ErrorKind::ArityError);
}

#[test]
fn registered_constants_and_overwrites() {
    let evaluator = Evaluator::new();
    evaluator.register([("answer", Binding::from(42_i64)), ("pi", Binding::from(3_i64))])
             .unwrap();
    assert_eq!(eval(&evaluator, "answer * 2").unwrap(), Number::Integer(84));
    assert_eq!(eval(&evaluator, "pi").unwrap(), Number::Integer(3));

    evaluator.register([("answer", Binding::from(Function::unary(|x| x + 42.0)))])
             .unwrap();
    assert_eq!(eval(&evaluator, "answer(0)").unwrap(), Number::Float(42.0));
    assert_eq!(eval(&evaluator, "answer").unwrap_err().kind(), ErrorKind::UnknownName);
}

#[test]
fn functions_with_other_arities() {
    let evaluator = Evaluator::new();
    evaluator.register([("sum3", Binding::from(Function::new(3, |a| a.iter().sum()))),
                        ("zero", Binding::from(Function::new(0, |_| 0.0))),
                        ("broken", Binding::from(Function::unary(|_| f64::NAN)))])
             .unwrap();

    assert_eq!(eval(&evaluator, "sum3(1, 2, 3)").unwrap(), Number::Float(6.0));
    assert_eq!(eval(&evaluator, "zero() + 1").unwrap(), Number::Float(1.0));
    assert_eq!(eval(&evaluator, "broken(1)").unwrap_err().kind(), ErrorKind::ArithmeticError);
    match eval(&evaluator, "sum3(1)").unwrap_err() {
        reckon::Error::Eval(reckon::error::EvalError::Arity { expected, found, .. }) => {
            assert_eq!((expected, found), (3, 1));
        },
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn registering_ans_is_rejected_and_leaves_the_registry_unchanged() {
    let evaluator = Evaluator::new();
    let before = evaluator.registered_names();

    let err = evaluator.register([("good", Binding::from(1_i64)), ("ans", Binding::from(2_i64))])
                       .unwrap_err();
    assert_eq!(err, RegistryError::ReservedName { name: "ans".to_string() });
    assert_eq!(evaluator.registered_names(), before);
    assert!(!evaluator.is_registered("good"));

    let ten = Number::Integer(10);
    let context = Context::new(NumericMode::Float).with_previous_result(&ten);
    assert_eq!(evaluator.evaluate("ans", &context).unwrap(), Number::Integer(10));
}

#[test]
fn invalid_registrations() {
    let mut registry = Registry::builtin();
    for name in ["", "2x", "with space", "a.b", "lambda", "True"] {
        assert_eq!(registry.register([(name, Binding::from(1_i64))]),
                   Err(RegistryError::InvalidName { name: name.to_string() }));
    }
    assert_eq!(registry.register([("bad", Binding::from(f64::NAN))]),
               Err(RegistryError::NonFiniteConstant { name: "bad".to_string() }));
    assert_eq!(registry.len(), 27);
}

#[test]
fn clones_share_a_registry_and_new_evaluators_do_not() {
    let evaluator = Evaluator::new();
    let clone = evaluator.clone();
    clone.register([("k", Binding::from(7_i64))]).unwrap();

    assert_eq!(eval(&evaluator, "k").unwrap(), Number::Integer(7));
    assert_eq!(eval(&Evaluator::new(), "k").unwrap_err().kind(), ErrorKind::UnknownName);
}

#[test]
fn empty_registry() {
    let evaluator = Evaluator::with_registry(Registry::empty(), EvaluatorConfig::default());
    assert!(evaluator.registered_names().is_empty());
    assert_eq!(eval(&evaluator, "pi").unwrap_err().kind(), ErrorKind::UnknownName);
    assert_eq!(eval(&evaluator, "1 + 1").unwrap(), Number::Integer(2));
}

#[test]
fn concurrent_evaluation_and_registration() {
    let evaluator = Evaluator::new();

    thread::scope(|scope| {
        for i in 0..4_i64 {
            let evaluator = evaluator.clone();
            scope.spawn(move || {
                     for _ in 0..100 {
                         let value = eval(&evaluator, &format!("{i} + sqrt(16)")).unwrap();
                         assert_eq!(value, Number::Float(4.0 + i as f64));
                     }
                 });
        }
        scope.spawn(|| {
                 for n in 0..100_i64 {
                     evaluator.register([(format!("c{n}"), Binding::from(n))]).unwrap();
                 }
             });
    });

    assert_eq!(eval(&evaluator, "c99").unwrap(), Number::Integer(99));
}
