use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use validator::Validate;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::AuthResponseData;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::sanitize::drop_empty;
use crate::inbound::http::validation::sanitize::sanitize_email_field;
use crate::inbound::http::validation::FieldOrder;
use crate::inbound::http::validation::Sanitize;
use crate::inbound::http::validation::ValidatedJson;

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    // A syntactically valid address that fails to parse here is still
    // just a failed login.
    let email = EmailAddress::new(body.email.unwrap_or_default())
        .map_err(|_| ApiError::InvalidCredentials)?;

    let command = LoginCommand {
        email,
        password: body.password.unwrap_or_default(),
    };

    state
        .user_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|session| {
            ApiSuccess::new(
                StatusCode::OK,
                AuthResponseData {
                    user: (&session.user).into(),
                    token: session.token,
                },
            )
            .with_message("Login realizado com sucesso")
        })
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(
        required(message = "Email é obrigatório"),
        email(message = "Email inválido")
    )]
    email: Option<String>,
    #[validate(required(message = "Senha é obrigatória"))]
    password: Option<String>,
}

impl Sanitize for LoginRequest {
    fn sanitize(&mut self) {
        sanitize_email_field(&mut self.email);
        drop_empty(&mut self.password);
    }
}

impl FieldOrder for LoginRequest {
    const FIELDS: &'static [&'static str] = &["email", "password"];
}
