use crate::Value;

/// A scalar literal as written in a query document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScalarLiteral<'a> {
    /// A quoted string, with the quotes already removed.
    String(&'a str),

    /// Any bare literal: a number, `true`, `false`, a name.
    Bare(&'a str),
}

impl std::fmt::Display for ScalarLiteral<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Bare(s) => f.write_str(s),
        }
    }
}

/// Conversion rules for one scalar type.
///
/// Literal and JSON coercion produce the [`Value`] handed to resolvers;
/// [`ScalarCoercion::serialize()`] turns a resolver's [`Value`] back into
/// response JSON.
pub trait ScalarCoercion: std::fmt::Debug + Send + Sync {
    fn coerce_literal(&self, literal: ScalarLiteral<'_>) -> anyhow::Result<Value>;

    fn coerce_json(&self, json: &serde_json::Value) -> anyhow::Result<Value>;

    fn serialize(&self, value: &Value) -> anyhow::Result<serde_json::Value>;
}
