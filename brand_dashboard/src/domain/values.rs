use serde_json::Value;

// Loose-payload helpers. The brand API is not strict about field types, so a
// field counts as present by JavaScript truthiness rather than by its JSON type.

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Strings are shown without quotes; everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Text of a truthy string, number or boolean.
///
/// Structured values and falsy scalars (`null`, `""`, `0`, `false`) yield `None`.
pub fn truthy_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Array(_) | Value::Object(_) => None,
        scalar if is_truthy(scalar) => Some(display_value(scalar)),
        _ => None,
    }
}
