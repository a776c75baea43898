use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::product::errors::DetailError;
use crate::domain::product::errors::ProductError;
use crate::inbound::http::validation::FieldError;
use crate::user::errors::UserError;

pub mod auth;
pub mod health;
pub mod products;
pub mod users;

/// Successful response: `{success: true, message?, ...data}`.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(data)))
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.1 .0.message = Some(message.into());
        self
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(flatten)]
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }
}

/// Failure envelope: `{success: false, message, code, errors?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub success: bool,
    pub message: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    NotFound {
        code: &'static str,
        message: String,
    },
    Conflict {
        code: &'static str,
        message: String,
    },
    InvalidCredentials,
    ValidationFailed(Vec<FieldError>),
    Unauthorized {
        code: &'static str,
        message: String,
    },
    Forbidden {
        code: &'static str,
        message: String,
    },
    /// Detail is logged, never sent.
    Internal(String),
}

impl ApiError {
    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code,
            message: message.into(),
        }
    }

    pub fn forbidden(code: &'static str, message: impl Into<String>) -> Self {
        Self::Forbidden {
            code,
            message: message.into(),
        }
    }

    fn invalid_field(field: &str, message: impl ToString) -> Self {
        Self::ValidationFailed(vec![FieldError::new(field, message.to_string())])
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_body(self) -> ApiErrorBody {
        let (code, message, errors) = match self {
            ApiError::NotFound { code, message }
            | ApiError::Conflict { code, message }
            | ApiError::Unauthorized { code, message }
            | ApiError::Forbidden { code, message } => (code, message, None),
            ApiError::InvalidCredentials => (
                "INVALID_CREDENTIALS",
                "Credenciais inválidas".to_string(),
                None,
            ),
            ApiError::ValidationFailed(errors) => (
                "VALIDATION_ERROR",
                "Dados inválidos".to_string(),
                Some(errors),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Internal server error");
                (
                    "INTERNAL_ERROR",
                    "Erro interno do servidor".to_string(),
                    None,
                )
            }
        };

        ApiErrorBody {
            success: false,
            message,
            code,
            errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(self.into_body())).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => {
                ApiError::not_found("USER_NOT_FOUND", "Usuário não encontrado")
            }
            UserError::EmailAlreadyExists(_) => ApiError::Conflict {
                code: "USER_ALREADY_EXISTS",
                message: "Usuário já existe".to_string(),
            },
            UserError::InvalidCredentials => ApiError::InvalidCredentials,
            UserError::InvalidUserId(e) => ApiError::invalid_field("id", e),
            UserError::InvalidName(e) => ApiError::invalid_field("name", e),
            UserError::InvalidEmail(e) => ApiError::invalid_field("email", e),
            UserError::InvalidTaxId(e) => ApiError::invalid_field("cpf", e),
            UserError::InvalidAddress(e) => ApiError::invalid_field("address", e),
            UserError::InvalidRole(e) => ApiError::invalid_field("role", e),
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => {
                ApiError::not_found("PRODUCT_NOT_FOUND", "Produto não encontrado")
            }
            ProductError::InvalidProductId(e) => ApiError::invalid_field("id", e),
            ProductError::InvalidName(e) => ApiError::invalid_field("name", e),
            ProductError::InvalidPrice(e) => ApiError::invalid_field("price", e),
            ProductError::InvalidCategory(e) => ApiError::invalid_field("category", e),
            ProductError::InvalidDetail(e) => {
                let DetailError::TooLong { field, .. } = &e;
                let field = field.to_lowercase();
                ApiError::invalid_field(&field, e)
            }
            ProductError::DatabaseError(_) | ProductError::Unknown(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::user::errors::TaxIdError;

    fn body(err: ApiError) -> serde_json::Value {
        serde_json::to_value(err.into_body()).unwrap()
    }

    #[test]
    fn test_user_error_status_mapping() {
        assert_eq!(
            ApiError::from(UserError::NotFound("1".to_string())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(UserError::EmailAlreadyExists("a@b.com".to_string())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(UserError::InvalidCredentials).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(UserError::DatabaseError("boom".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_product_not_found_code() {
        let err = ApiError::from(ProductError::NotFound("3".to_string()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(err)["code"], "PRODUCT_NOT_FOUND");
    }

    #[test]
    fn test_validation_envelope_lists_field_errors() {
        let err = ApiError::ValidationFailed(vec![
            FieldError::new("name", "Nome é obrigatório"),
            FieldError::new("email", "Email inválido"),
        ]);

        assert_eq!(
            body(err),
            json!({
                "success": false,
                "message": "Dados inválidos",
                "code": "VALIDATION_ERROR",
                "errors": [
                    {"field": "name", "message": "Nome é obrigatório"},
                    {"field": "email", "message": "Email inválido"}
                ]
            })
        );
    }

    #[test]
    fn test_value_object_errors_name_their_field() {
        let err = ApiError::from(UserError::InvalidTaxId(TaxIdError::Checksum));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(err)["errors"][0]["field"], "cpf");

        let err = ApiError::from(ProductError::InvalidDetail(DetailError::TooLong {
            field: "Unit",
            max: 50,
            actual: 51,
        }));
        assert_eq!(body(err)["errors"][0]["field"], "unit");
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err = ApiError::from(UserError::DatabaseError("password=secret".to_string()));
        let body = body(err);

        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(!body.to_string().contains("secret"));
        assert!(body.get("errors").is_none());
    }

    #[test]
    fn test_success_envelope_flattens_data() {
        #[derive(Debug, PartialEq, Serialize)]
        struct Data {
            token: String,
        }

        let success = ApiSuccess::new(
            StatusCode::CREATED,
            Data {
                token: "t".to_string(),
            },
        )
        .with_message("ok");

        assert_eq!(
            serde_json::to_value(&success.1 .0).unwrap(),
            json!({"success": true, "message": "ok", "token": "t"})
        );
    }
}
