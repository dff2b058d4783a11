//! The built-in `String`, `Int`, `Long`, `Float`, `Boolean` and `ID`
//! scalars.

use crate::Value;
use crate::types::ScalarCoercion;
use crate::types::ScalarLiteral;
use anyhow::anyhow;
use anyhow::bail;
use std::sync::Arc;

pub(crate) fn builtin_scalars() -> Vec<(&'static str, Arc<dyn ScalarCoercion>)> {
    let scalars: [(&'static str, Arc<dyn ScalarCoercion>); 6] = [
        ("String", Arc::new(StringScalar)),
        ("Int", Arc::new(IntScalar)),
        ("Long", Arc::new(LongScalar)),
        ("Float", Arc::new(FloatScalar)),
        ("Boolean", Arc::new(BooleanScalar)),
        ("ID", Arc::new(IdScalar)),
    ];
    scalars.into()
}

fn not_serializable(value: &Value, type_name: &str) -> anyhow::Error {
    anyhow!("Cannot serialize {} `{value}` as {type_name}", value.kind_name())
}

#[derive(Debug)]
pub struct StringScalar;

impl ScalarCoercion for StringScalar {
    fn coerce_literal(&self, literal: ScalarLiteral<'_>) -> anyhow::Result<Value> {
        match literal {
            ScalarLiteral::String(s) => Ok(Value::String(s.to_string())),
            ScalarLiteral::Bare(_) => bail!("expected a quoted string"),
        }
    }

    fn coerce_json(&self, json: &serde_json::Value) -> anyhow::Result<Value> {
        match json {
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            _ => bail!("expected a string"),
        }
    }

    fn serialize(&self, value: &Value) -> anyhow::Result<serde_json::Value> {
        match value {
            Value::String(s) | Value::Enum(s) => Ok(serde_json::Value::String(s.clone())),
            Value::Boolean(_) | Value::Int(_) | Value::Float(_) => {
                Ok(serde_json::Value::String(value.to_string()))
            },
            _ => Err(not_serializable(value, "String")),
        }
    }
}

/// 32-bit signed integers.
#[derive(Debug)]
pub struct IntScalar;

impl ScalarCoercion for IntScalar {
    fn coerce_literal(&self, literal: ScalarLiteral<'_>) -> anyhow::Result<Value> {
        match literal {
            ScalarLiteral::Bare(text) => text.parse::<i32>()
                .map(Value::from)
                .map_err(|_| anyhow!("expected a 32-bit integer")),
            ScalarLiteral::String(_) => bail!("expected an integer, found a string"),
        }
    }

    fn coerce_json(&self, json: &serde_json::Value) -> anyhow::Result<Value> {
        json.as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .map(Value::from)
            .ok_or_else(|| anyhow!("expected a 32-bit integer"))
    }

    fn serialize(&self, value: &Value) -> anyhow::Result<serde_json::Value> {
        let int = match value {
            Value::Int(i) => i32::try_from(*i).ok(),
            Value::Float(f) if f.fract() == 0.0 => {
                (*f >= i32::MIN as f64 && *f <= i32::MAX as f64).then_some(*f as i32)
            },
            _ => None,
        };
        int.map(serde_json::Value::from)
            .ok_or_else(|| not_serializable(value, "Int"))
    }
}

/// 64-bit signed integers.
#[derive(Debug)]
pub struct LongScalar;

impl ScalarCoercion for LongScalar {
    fn coerce_literal(&self, literal: ScalarLiteral<'_>) -> anyhow::Result<Value> {
        match literal {
            ScalarLiteral::Bare(text) => text.parse::<i64>()
                .map(Value::Int)
                .map_err(|_| anyhow!("expected a 64-bit integer")),
            ScalarLiteral::String(_) => bail!("expected an integer, found a string"),
        }
    }

    fn coerce_json(&self, json: &serde_json::Value) -> anyhow::Result<Value> {
        json.as_i64()
            .map(Value::Int)
            .ok_or_else(|| anyhow!("expected a 64-bit integer"))
    }

    fn serialize(&self, value: &Value) -> anyhow::Result<serde_json::Value> {
        match value {
            Value::Int(i) => Ok(serde_json::Value::from(*i)),
            _ => Err(not_serializable(value, "Long")),
        }
    }
}

#[derive(Debug)]
pub struct FloatScalar;

impl ScalarCoercion for FloatScalar {
    fn coerce_literal(&self, literal: ScalarLiteral<'_>) -> anyhow::Result<Value> {
        match literal {
            ScalarLiteral::Bare(text) => match text.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(Value::Float(f)),
                _ => bail!("expected a number"),
            },
            ScalarLiteral::String(_) => bail!("expected a number, found a string"),
        }
    }

    fn coerce_json(&self, json: &serde_json::Value) -> anyhow::Result<Value> {
        json.as_f64()
            .map(Value::Float)
            .ok_or_else(|| anyhow!("expected a number"))
    }

    fn serialize(&self, value: &Value) -> anyhow::Result<serde_json::Value> {
        value.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
            .ok_or_else(|| not_serializable(value, "Float"))
    }
}

#[derive(Debug)]
pub struct BooleanScalar;

impl ScalarCoercion for BooleanScalar {
    fn coerce_literal(&self, literal: ScalarLiteral<'_>) -> anyhow::Result<Value> {
        match literal {
            ScalarLiteral::Bare("true") => Ok(Value::Boolean(true)),
            ScalarLiteral::Bare("false") => Ok(Value::Boolean(false)),
            _ => bail!("expected `true` or `false`"),
        }
    }

    fn coerce_json(&self, json: &serde_json::Value) -> anyhow::Result<Value> {
        json.as_bool()
            .map(Value::Boolean)
            .ok_or_else(|| anyhow!("expected a boolean"))
    }

    fn serialize(&self, value: &Value) -> anyhow::Result<serde_json::Value> {
        value.as_bool()
            .map(serde_json::Value::Bool)
            .ok_or_else(|| not_serializable(value, "Boolean"))
    }
}

/// Opaque identifiers. Accepts strings and integers; always serializes as
/// a string.
#[derive(Debug)]
pub struct IdScalar;

impl ScalarCoercion for IdScalar {
    fn coerce_literal(&self, literal: ScalarLiteral<'_>) -> anyhow::Result<Value> {
        match literal {
            ScalarLiteral::String(s) => Ok(Value::String(s.to_string())),
            ScalarLiteral::Bare(text) if text.parse::<i64>().is_ok() => {
                Ok(Value::String(text.to_string()))
            },
            ScalarLiteral::Bare(_) => bail!("expected a string or an integer"),
        }
    }

    fn coerce_json(&self, json: &serde_json::Value) -> anyhow::Result<Value> {
        match json {
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Number(num) if num.is_i64() || num.is_u64() => {
                Ok(Value::String(num.to_string()))
            },
            _ => bail!("expected a string or an integer"),
        }
    }

    fn serialize(&self, value: &Value) -> anyhow::Result<serde_json::Value> {
        match value {
            Value::String(s) => Ok(serde_json::Value::String(s.clone())),
            Value::Int(i) => Ok(serde_json::Value::String(i.to_string())),
            _ => Err(not_serializable(value, "ID")),
        }
    }
}
