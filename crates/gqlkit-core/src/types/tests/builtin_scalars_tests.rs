use crate::Value;
use crate::types::BooleanScalar;
use crate::types::FloatScalar;
use crate::types::IdScalar;
use crate::types::IntScalar;
use crate::types::LongScalar;
use crate::types::ScalarCoercion;
use crate::types::ScalarLiteral;
use crate::types::StringScalar;
use serde_json::json;

// =============================================================================
// Literals
// =============================================================================

#[test]
fn string_requires_quotes() {
    assert_eq!(
        StringScalar.coerce_literal(ScalarLiteral::String("luke")).unwrap(),
        Value::String("luke".to_string()),
    );
    assert!(StringScalar.coerce_literal(ScalarLiteral::Bare("luke")).is_err());
}

#[test]
fn int_is_32_bits() {
    assert_eq!(IntScalar.coerce_literal(ScalarLiteral::Bare("-42")).unwrap(), Value::Int(-42));
    assert!(IntScalar.coerce_literal(ScalarLiteral::Bare("3000000000")).is_err());
    assert!(IntScalar.coerce_literal(ScalarLiteral::Bare("1.5")).is_err());
    assert!(IntScalar.coerce_literal(ScalarLiteral::String("1")).is_err());
}

#[test]
fn long_accepts_64_bit_values() {
    assert_eq!(
        LongScalar.coerce_literal(ScalarLiteral::Bare("3000000000")).unwrap(),
        Value::Int(3_000_000_000),
    );
}

#[test]
fn float_accepts_integers_and_exponents() {
    assert_eq!(FloatScalar.coerce_literal(ScalarLiteral::Bare("2")).unwrap(), Value::Float(2.0));
    assert_eq!(FloatScalar.coerce_literal(ScalarLiteral::Bare("1e3")).unwrap(), Value::Float(1000.0));
    assert!(FloatScalar.coerce_literal(ScalarLiteral::Bare("NaN")).is_err());
}

#[test]
fn boolean_accepts_only_true_and_false() {
    assert_eq!(BooleanScalar.coerce_literal(ScalarLiteral::Bare("true")).unwrap(), Value::Boolean(true));
    assert_eq!(BooleanScalar.coerce_literal(ScalarLiteral::Bare("false")).unwrap(), Value::Boolean(false));
    assert!(BooleanScalar.coerce_literal(ScalarLiteral::Bare("1")).is_err());
    assert!(BooleanScalar.coerce_literal(ScalarLiteral::String("true")).is_err());
}

#[test]
fn id_accepts_strings_and_integers() {
    assert_eq!(IdScalar.coerce_literal(ScalarLiteral::String("abc")).unwrap(), Value::from("abc"));
    assert_eq!(IdScalar.coerce_literal(ScalarLiteral::Bare("1000")).unwrap(), Value::from("1000"));
    assert!(IdScalar.coerce_literal(ScalarLiteral::Bare("1.5")).is_err());
}

// =============================================================================
// JSON variables
// =============================================================================

#[test]
fn json_coercion() {
    assert_eq!(StringScalar.coerce_json(&json!("x")).unwrap(), Value::from("x"));
    assert!(StringScalar.coerce_json(&json!(1)).is_err());
    assert_eq!(IntScalar.coerce_json(&json!(7)).unwrap(), Value::Int(7));
    assert!(IntScalar.coerce_json(&json!(1u64 << 40)).is_err());
    assert_eq!(FloatScalar.coerce_json(&json!(3)).unwrap(), Value::Float(3.0));
    assert!(BooleanScalar.coerce_json(&json!("true")).is_err());
    assert_eq!(IdScalar.coerce_json(&json!(2001)).unwrap(), Value::from("2001"));
    assert!(IdScalar.coerce_json(&json!(true)).is_err());
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn serialization() {
    assert_eq!(StringScalar.serialize(&Value::Int(3)).unwrap(), json!("3"));
    assert_eq!(StringScalar.serialize(&Value::Enum("JEDI".to_string())).unwrap(), json!("JEDI"));
    assert_eq!(IntScalar.serialize(&Value::Float(4.0)).unwrap(), json!(4));
    assert!(IntScalar.serialize(&Value::Float(4.5)).is_err());
    assert!(IntScalar.serialize(&Value::Int(i64::MAX)).is_err());
    assert_eq!(LongScalar.serialize(&Value::Int(i64::MAX)).unwrap(), json!(i64::MAX));
    assert_eq!(FloatScalar.serialize(&Value::Int(2)).unwrap(), json!(2.0));
    assert_eq!(IdScalar.serialize(&Value::Int(1000)).unwrap(), json!("1000"));
    assert!(BooleanScalar.serialize(&Value::from("yes")).is_err());
}
