//! Input sanitization applied to every JSON body and query filter before
//! validation.

use serde_json::Value;

/// Normalize the textual fields of a request payload in place.
///
/// Implementations call [`sanitize_field`] or [`sanitize_email_field`] on
/// each free-text field. Password fields are left untouched: they are
/// only ever hashed.
pub trait Sanitize {
    fn sanitize(&mut self);
}

/// Remove control characters (except newline, carriage return and tab)
/// and angle brackets, then trim surrounding whitespace.
///
/// Applying it twice yields the same result as applying it once.
pub fn sanitize_text(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
        .filter(|c| !matches!(c, '<' | '>'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// [`sanitize_text`] followed by lowercasing.
pub fn normalize_email(s: &str) -> String {
    sanitize_text(s).to_lowercase()
}

/// Sanitize an optional text field. Nothing left means the field is absent.
pub fn sanitize_field(field: &mut Option<String>) {
    if let Some(value) = field {
        *value = sanitize_text(value);
    }
    drop_empty(field);
}

pub fn sanitize_email_field(field: &mut Option<String>) {
    if let Some(value) = field {
        *value = normalize_email(value);
    }
    drop_empty(field);
}

/// Treat an empty string as a missing value, so that a required field
/// reports only "required" and an optional one skips its checks.
pub fn drop_empty(field: &mut Option<String>) {
    if field.as_deref().is_some_and(str::is_empty) {
        *field = None;
    }
}

/// Numbers pass through; strings are trimmed. Null and blank strings are
/// treated as a missing value.
pub fn sanitize_json_field(field: &mut Option<Value>) {
    if let Some(Value::String(s)) = field {
        *s = sanitize_text(s);
    }
    if matches!(field, Some(Value::Null)) || matches!(field, Some(Value::String(s)) if s.is_empty())
    {
        *field = None;
    }
}
