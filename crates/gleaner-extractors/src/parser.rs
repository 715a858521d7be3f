//! Locate and parse the JSON payload inside a model reply
//!
//! Models wrap JSON in markdown code fences or surround it with prose, so
//! the parser first strips any fence, then scans for the outermost object
//! or array delimiters before handing the slice to serde.

use serde_json::Value;

/// Strip one layer of markdown code fences, if present
pub fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        // Drop the opening fence line and a trailing fence line
        let without_open = match trimmed.find('\n') {
            Some(idx) => &trimmed[idx + 1..],
            None => return trimmed,
        };
        match without_open.rfind("```") {
            Some(idx) => without_open[..idx].trim(),
            None => without_open.trim(),
        }
    } else {
        trimmed
    }
}

/// Find and parse the outermost JSON object in a reply
pub fn find_json_object(response: &str) -> Option<Value> {
    let cleaned = strip_code_fences(response);
    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&cleaned[start..=end]).ok()
}

/// Find and parse the outermost JSON array in a reply
pub fn find_json_array(response: &str) -> Option<Value> {
    let cleaned = strip_code_fences(response);
    let start = cleaned.find('[')?;
    let end = cleaned.rfind(']')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&cleaned[start..=end]).ok()
}

/// Read a confidence number from a JSON value, tolerating string encodings
pub fn confidence_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Render a JSON scalar as the string an extractor should record
///
/// Models sometimes emit numbers or booleans for cell values; anything
/// non-scalar is rejected.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_json_language() {
        let response = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(response), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_fences_no_language() {
        let response = "```\n[1, 2]\n```";
        assert_eq!(strip_code_fences(response), "[1, 2]");
    }

    #[test]
    fn test_strip_fences_passthrough() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_find_object_in_prose() {
        let response = "Here is the result:\n{\"First name\": {\"value\": \"John\", \"confidence\": 0.9}}\nLet me know!";
        let value = find_json_object(response).unwrap();
        assert_eq!(value["First name"]["value"], "John");
    }

    #[test]
    fn test_find_object_rejects_garbage() {
        assert!(find_json_object("no json here").is_none());
        assert!(find_json_object("{broken").is_none());
    }

    #[test]
    fn test_find_array_in_fenced_reply() {
        let response = "```json\n[{\"dataType\": \"financial_data\"}]\n```";
        let value = find_json_array(response).unwrap();
        assert_eq!(value[0]["dataType"], "financial_data");
    }

    #[test]
    fn test_find_array_rejects_object_only() {
        assert!(find_json_array("{\"a\": 1}").is_none());
    }

    #[test]
    fn test_confidence_from_variants() {
        assert_eq!(confidence_from(&serde_json::json!(0.8)), Some(0.8));
        assert_eq!(confidence_from(&serde_json::json!("0.75")), Some(0.75));
        assert_eq!(confidence_from(&serde_json::json!(null)), None);
    }

    #[test]
    fn test_scalar_to_string() {
        assert_eq!(scalar_to_string(&serde_json::json!("x")), Some("x".into()));
        assert_eq!(scalar_to_string(&serde_json::json!(5000)), Some("5000".into()));
        assert_eq!(scalar_to_string(&serde_json::json!([1])), None);
    }
}
