//! Request body building and response field filtering for `htp req`

use serde_json::{Map, Number, Value};

use super::error::ClientError;

/// Turn `key=value` pairs into a JSON object
///
/// Values containing a `.` are tried as floats, everything else as an
/// integer; whatever fails to parse stays a string. Later keys overwrite
/// earlier ones.
pub fn parse_key_value_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Map<String, Value>, ClientError> {
    let mut body = Map::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| ClientError::InvalidPair(pair.to_string()))?;
        body.insert(key.to_string(), parse_scalar(value));
    }
    Ok(body)
}

/// Number when the text parses as one, string otherwise
pub fn parse_scalar(value: &str) -> Value {
    let trimmed = value.trim();
    let number = if value.contains('.') {
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
    } else {
        trimmed
            .parse::<i64>()
            .map(Number::from)
            .or_else(|_| trimmed.parse::<u64>().map(Number::from))
            .ok()
    };

    number.map_or_else(|| Value::String(value.to_string()), Value::Number)
}

/// Keep only `fields` (comma separated) of an object, or of each element of
/// an array. Missing fields come back as `null`.
pub fn filter_fields(value: &Value, fields: &str) -> Value {
    let field_list: Vec<&str> = fields.split(',').collect();
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| pick_fields(item, &field_list))
                .collect(),
        ),
        other => pick_fields(other, &field_list),
    }
}

fn pick_fields(value: &Value, fields: &[&str]) -> Value {
    let picked = fields
        .iter()
        .map(|field| {
            let v = value.get(*field).cloned().unwrap_or(Value::Null);
            ((*field).to_string(), v)
        })
        .collect();
    Value::Object(picked)
}

/// What `htp req` prints for a response body
///
/// JSON bodies are (optionally filtered and) pretty-printed with two-space
/// indentation; anything else is returned untouched.
pub fn render_response(text: &str, fields: Option<&str>) -> String {
    let Ok(parsed) = serde_json::from_str::<Value>(text) else {
        return text.to_string();
    };

    let shown = match fields {
        Some(f) => filter_fields(&parsed, f),
        None => parsed,
    };
    serde_json::to_string_pretty(&shown).unwrap_or_else(|_| text.to_string())
}
