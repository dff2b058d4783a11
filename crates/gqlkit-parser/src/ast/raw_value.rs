use indexmap::IndexMap;

/// Ordered `name -> value` argument map, as written in the document.
pub type Arguments = IndexMap<String, RawValue>;

/// An argument value exactly as written in a query document, before any
/// coercion against a schema type.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum RawValue {
    /// A double-quoted string literal. The raw text, quotes included, is
    /// kept so that coercion can tell `"1"` apart from `1`.
    String(String),

    /// Any bare literal: numbers, `true`/`false`, `null`, enum value names.
    Literal(String),

    /// A `$name` variable reference, stored without the leading `$`.
    Variable(String),

    /// A `[ ... ]` list of values.
    List(Vec<RawValue>),
}

impl RawValue {
    /// The content of a string literal with its surrounding quotes removed.
    ///
    /// Returns `None` for non-string values.
    pub fn unquoted(&self) -> Option<&str> {
        match self {
            Self::String(raw) => Some(
                raw.strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .unwrap_or(raw.as_str()),
            ),
            _ => None,
        }
    }

    pub fn is_null_literal(&self) -> bool {
        matches!(self, Self::Literal(text) if text == "null")
    }

    /// Names of every variable referenced by this value, in order.
    pub fn variable_names(&self) -> Vec<&str> {
        match self {
            Self::Variable(name) => vec![name.as_str()],
            Self::List(items) => items.iter()
                .flat_map(|item| item.variable_names())
                .collect(),
            Self::String(_) | Self::Literal(_) => vec![],
        }
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(raw) | Self::Literal(raw) => f.write_str(raw),
            Self::Variable(name) => write!(f, "${name}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
        }
    }
}
