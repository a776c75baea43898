//! Custom validators used in `#[validate(custom(function = ...))]`
//! attributes of request bodies.

use std::borrow::Cow;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use validator::ValidationError;

use crate::domain::user::models::Role;
use crate::domain::user::models::TaxId;

fn failure(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// CPF with valid check digits; punctuation is allowed.
pub fn tax_id(value: &str) -> Result<(), ValidationError> {
    TaxId::new(value)
        .map(|_| ())
        .map_err(|_| failure("tax_id", "CPF inválido"))
}

/// At least one lower-case letter, one upper-case letter and one digit.
pub fn password_strength(value: &str) -> Result<(), ValidationError> {
    let strong = value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit());

    if !strong {
        return Err(failure(
            "password_strength",
            "Senha deve conter ao menos uma letra minúscula, uma maiúscula e um número",
        ));
    }
    Ok(())
}

pub fn positive_price(value: &Value) -> Result<(), ValidationError> {
    match decimal_from_json(value) {
        Some(amount) if amount > Decimal::ZERO => Ok(()),
        _ => Err(failure("positive", "Preço deve ser um número positivo")),
    }
}

pub fn known_role(value: &str) -> Result<(), ValidationError> {
    Role::from_str(value)
        .map(|_| ())
        .map_err(|_| failure("role", "Papel deve ser user ou admin"))
}

/// Numeric reading of a JSON value: numbers and numeric strings.
pub fn decimal_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let repr = n.to_string();
            Decimal::from_str(&repr)
                .or_else(|_| Decimal::from_scientific(&repr))
                .ok()
        }
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn message(error: ValidationError) -> String {
        error.message.map(|m| m.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_password_strength() {
        assert!(password_strength("Abcdef12").is_ok());
        assert!(password_strength("abcdef12").is_err());
        assert!(password_strength("ABCDEF12").is_err());
        assert!(password_strength("Abcdefgh").is_err());
    }

    #[test]
    fn test_tax_id() {
        assert!(tax_id("529.982.247-25").is_ok());
        assert_eq!(message(tax_id("111.111.111-11").unwrap_err()), "CPF inválido");
        assert!(tax_id("123").is_err());
    }

    #[test]
    fn test_positive_price_accepts_numbers_and_numeric_strings() {
        assert!(positive_price(&json!(12.5)).is_ok());
        assert!(positive_price(&json!("0.01")).is_ok());
        assert!(positive_price(&json!(0)).is_err());
        assert!(positive_price(&json!(-3)).is_err());
        assert!(positive_price(&json!("abc")).is_err());
        assert!(positive_price(&json!(true)).is_err());
    }

    #[test]
    fn test_known_role() {
        assert!(known_role("admin").is_ok());
        assert!(known_role("user").is_ok());
        assert_eq!(
            message(known_role("root").unwrap_err()),
            "Papel deve ser user ou admin"
        );
    }

    #[test]
    fn test_decimal_from_json_handles_exponents() {
        assert_eq!(decimal_from_json(&json!(1e2)), Some(Decimal::from(100)));
        assert_eq!(decimal_from_json(&json!(" 2.50 ")), Decimal::from_str("2.50").ok());
    }
}
