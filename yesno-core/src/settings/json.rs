//! Lenient value coercion
//!
//! Settings documents are hand edited, so a field of the wrong type is not
//! an error: it reads as the zero value of the expected type. Numbers read
//! as booleans (non-zero is true) and booleans as numbers, because the
//! shipped documents write flags as `0`/`1`.

use serde_json::Value;

/// String value, or `""`
pub fn as_str(value: Option<&Value>) -> &str {
    match value {
        Some(Value::String(s)) => s.as_str(),
        _ => "",
    }
}

/// Numeric value, or `0.0`
pub fn as_f32(value: Option<&Value>) -> f32 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0) as f32,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Boolean value, or `false`
pub fn as_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f != 0.0),
        _ => false,
    }
}

/// Array elements, or an empty slice
pub fn as_array(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items.as_slice(),
        _ => &[],
    }
}
