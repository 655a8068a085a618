use proptest::prelude::*;
use simulac_data::{evaluate, SetupValue};

#[test]
fn literals_evaluate_to_typed_values() {
    assert_eq!(evaluate("42").expect("int"), SetupValue::Int(42));
    assert_eq!(evaluate("1.5e3").expect("float"), SetupValue::Float(1500.0));
    assert_eq!(evaluate("'lambda.cfg'").expect("str"), SetupValue::Str("lambda.cfg".into()));
    assert_eq!(evaluate("\"x\"").expect("dq str"), SetupValue::Str("x".into()));
    assert_eq!(evaluate("True").expect("bool"), SetupValue::Bool(true));
}

#[test]
fn arithmetic_follows_usual_precedence() {
    assert_eq!(evaluate("2 + 3 * 4").expect("eval"), SetupValue::Int(14));
    assert_eq!(evaluate("(2 + 3) * 4").expect("eval"), SetupValue::Int(20));
    assert_eq!(evaluate("-2 ** 2").expect("eval"), SetupValue::Int(-4));
    assert_eq!(evaluate("2 ** -1").expect("eval"), SetupValue::Float(0.5));
    assert_eq!(evaluate("7 / 2").expect("eval"), SetupValue::Float(3.5));
    assert_eq!(evaluate("7 // 2").expect("eval"), SetupValue::Int(3));
    assert_eq!(evaluate("-7 // 2").expect("eval"), SetupValue::Int(-4));
    assert_eq!(evaluate("-7 % 3").expect("eval"), SetupValue::Int(2));
    assert_eq!(evaluate("0.5 * 4").expect("eval"), SetupValue::Float(2.0));
    assert_eq!(evaluate("'a' + 'b'").expect("eval"), SetupValue::Str("ab".into()));
}

#[test]
fn names_and_calls_are_rejected() {
    let err = evaluate("__import__('os')").expect_err("names rejected");
    assert_eq!(err.code(), "expr_name");
    assert!(evaluate("open").is_err());
}

#[test]
fn malformed_expressions_fail() {
    assert_eq!(evaluate("1 +").expect_err("dangling").code(), "expr_syntax");
    assert_eq!(evaluate("(1").expect_err("paren").code(), "expr_syntax");
    assert_eq!(evaluate("'abc").expect_err("quote").code(), "expr_syntax");
    assert_eq!(evaluate("1 / 0").expect_err("div").code(), "expr_division_by_zero");
    assert_eq!(evaluate("'a' * 2").expect_err("type").code(), "expr_type");
    assert_eq!(evaluate("1 2").expect_err("trailing").code(), "expr_syntax");
}

proptest! {
    #[test]
    fn integer_sums_match_native_arithmetic(a in -100_000i64..100_000, b in -100_000i64..100_000) {
        let expr = format!("{a} + {b} * 2");
        prop_assert_eq!(evaluate(&expr).expect("eval"), SetupValue::Int(a + b * 2));
    }

    #[test]
    fn floor_division_and_modulo_agree(a in -1000i64..1000, b in 1i64..50) {
        let q = evaluate(&format!("{a} // {b}")).expect("div");
        let r = evaluate(&format!("{a} % {b}")).expect("mod");
        match (q, r) {
            (SetupValue::Int(q), SetupValue::Int(r)) => {
                prop_assert_eq!(q * b + r, a);
                prop_assert!((0..b).contains(&r));
            }
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
