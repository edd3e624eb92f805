use serde_json::Value;

/// String or number as display text; blank strings count as absent.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Plain text, or a language-keyed object (`{"ua": "...", "en": "..."}`)
/// resolved by the first key in `preferred` that has a value.
pub fn localized(value: &Value, preferred: &[&str]) -> Option<String> {
    match value {
        Value::Object(map) => preferred
            .iter()
            .find_map(|key| map.get(*key).and_then(text)),
        other => text(other),
    }
}
