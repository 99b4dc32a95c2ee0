use super::access::{field, pretty, text};
use serde_json::Value;

/// Text shown for an edge direction that carries no condition.
pub const NO_CONDITION: &str = "(none)";

/// A workflow edge condition, narrowed from its raw JSON form.
///
/// Every variant keeps enough of the original value to reproduce it; see
/// [`Condition::raw`].
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `null` or a missing field.
    Absent,
    /// A plain string condition, kept verbatim.
    Text(String),
    /// `{ "type": "llm", "condition": "..." }`
    Llm { condition: Option<String>, raw: Value },
    /// `{ "type": "unconditional" }`
    Unconditional { raw: Value },
    /// `{ "type": "result", "successful": bool }`
    Result { successful: Option<bool>, raw: Value },
    /// `{ "type": "expression", "expression": ... }`
    Expression { expression: Option<Value>, raw: Value },
    /// Anything else: untyped objects, unknown tags, numbers, arrays.
    Other(Value),
}

impl Condition {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Condition::Absent,
            Value::String(s) => Condition::Text(s.clone()),
            Value::Object(_) => match text(field(value, "type")).as_deref() {
                Some("llm") => Condition::Llm {
                    condition: text(field(value, "condition")),
                    raw: value.clone(),
                },
                Some("unconditional") => Condition::Unconditional { raw: value.clone() },
                Some("result") => Condition::Result {
                    successful: field(value, "successful").as_bool(),
                    raw: value.clone(),
                },
                Some("expression") => Condition::Expression {
                    expression: value
                        .as_object()
                        .and_then(|object| object.get("expression"))
                        .cloned(),
                    raw: value.clone(),
                },
                _ => Condition::Other(value.clone()),
            },
            other => Condition::Other(other.clone()),
        }
    }

    /// Human-readable rendering of the condition.
    pub fn to_text(&self) -> String {
        match self {
            Condition::Absent => NO_CONDITION.to_string(),
            Condition::Text(s) => s.clone(),
            Condition::Llm { condition, raw } => {
                condition.clone().unwrap_or_else(|| pretty(raw))
            }
            Condition::Unconditional { .. } => "unconditional".to_string(),
            Condition::Result { successful, raw } => match successful {
                Some(flag) => format!("successful == {}", flag),
                None => pretty(raw),
            },
            Condition::Expression { expression, raw } => match expression {
                Some(expression) => pretty(expression),
                None => pretty(raw),
            },
            Condition::Other(value) => pretty(value),
        }
    }

    /// The original JSON value, `null` when absent.
    pub fn raw(&self) -> Value {
        match self {
            Condition::Absent => Value::Null,
            Condition::Text(s) => Value::String(s.clone()),
            Condition::Llm { raw, .. }
            | Condition::Unconditional { raw }
            | Condition::Result { raw, .. }
            | Condition::Expression { raw, .. } => raw.clone(),
            Condition::Other(value) => value.clone(),
        }
    }
}

impl From<&Value> for Condition {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}
