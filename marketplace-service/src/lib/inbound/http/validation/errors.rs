use std::collections::HashMap;

use serde::Serialize;
use validator::Validate;
use validator::ValidationErrors;

/// A single validation failure, reported to clients as `{field, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Field names of a request body, in the order failures are reported.
pub trait FieldOrder {
    const FIELDS: &'static [&'static str];
}

/// Run the `validator` checks of `value` and report failures in field order.
pub fn check<T: Validate + FieldOrder>(value: &T) -> Result<(), Vec<FieldError>> {
    value.validate().map_err(|errors| field_errors::<T>(&errors))
}

/// Flatten `validator` output into `{field, message}` pairs.
///
/// Fields follow `T::FIELDS`; anything not listed there comes last, by name.
pub fn field_errors<T: FieldOrder>(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut by_field: HashMap<String, Vec<String>> = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Valor inválido para {}", field))
            })
            .collect();
        by_field.insert(field.to_string(), messages);
    }

    let mut unlisted: Vec<String> = by_field
        .keys()
        .filter(|field| !T::FIELDS.contains(&field.as_str()))
        .cloned()
        .collect();
    unlisted.sort();

    let order = T::FIELDS
        .iter()
        .map(|field| field.to_string())
        .chain(unlisted);

    let mut ordered = Vec::new();
    for field in order {
        if let Some(messages) = by_field.remove(&field) {
            ordered.extend(
                messages
                    .into_iter()
                    .map(|message| FieldError::new(field.as_str(), message)),
            );
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use validator::ValidationError;

    use super::*;

    struct Signup;

    impl FieldOrder for Signup {
        const FIELDS: &'static [&'static str] = &["name", "email", "password"];
    }

    fn error(message: &'static str) -> ValidationError {
        ValidationError::new("test").with_message(Cow::Borrowed(message))
    }

    #[test]
    fn test_failures_follow_declared_field_order() {
        let mut errors = ValidationErrors::new();
        errors.add("password", error("password required"));
        errors.add("extra", error("unexpected"));
        errors.add("name", error("name length"));

        assert_eq!(
            field_errors::<Signup>(&errors),
            vec![
                FieldError::new("name", "name length"),
                FieldError::new("password", "password required"),
                FieldError::new("extra", "unexpected"),
            ]
        );
    }

    #[test]
    fn test_missing_message_falls_back_to_field_name() {
        let mut errors = ValidationErrors::new();
        errors.add("email", ValidationError::new("email"));

        assert_eq!(
            field_errors::<Signup>(&errors),
            vec![FieldError::new("email", "Valor inválido para email")]
        );
    }
}
