use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use validator::Validate;

use crate::domain::user::models::Address;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::TaxId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::AuthResponseData;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::sanitize::drop_empty;
use crate::inbound::http::validation::sanitize::sanitize_email_field;
use crate::inbound::http::validation::sanitize::sanitize_field;
use crate::inbound::http::validation::validators;
use crate::inbound::http::validation::FieldOrder;
use crate::inbound::http::validation::Sanitize;
use crate::inbound::http::validation::ValidatedJson;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    state
        .user_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|session| {
            ApiSuccess::new(
                StatusCode::CREATED,
                AuthResponseData {
                    user: (&session.user).into(),
                    token: session.token,
                },
            )
            .with_message("Usuário criado com sucesso")
        })
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        required(message = "Nome é obrigatório"),
        length(min = 2, max = 100, message = "Nome deve ter entre 2 e 100 caracteres")
    )]
    name: Option<String>,
    #[validate(
        required(message = "Email é obrigatório"),
        email(message = "Email inválido")
    )]
    email: Option<String>,
    #[validate(
        required(message = "Senha é obrigatória"),
        length(min = 8, message = "Senha deve ter ao menos 8 caracteres"),
        custom(function = "validators::password_strength")
    )]
    password: Option<String>,
    #[validate(custom(function = "validators::tax_id"))]
    cpf: Option<String>,
    #[validate(length(max = 500, message = "Endereço deve ter no máximo 500 caracteres"))]
    address: Option<String>,
}

impl Sanitize for RegisterRequest {
    fn sanitize(&mut self) {
        sanitize_field(&mut self.name);
        sanitize_email_field(&mut self.email);
        drop_empty(&mut self.password);
        sanitize_field(&mut self.cpf);
        sanitize_field(&mut self.address);
    }
}

impl FieldOrder for RegisterRequest {
    const FIELDS: &'static [&'static str] = &["name", "email", "password", "cpf", "address"];
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, UserError> {
        let name = PersonName::new(self.name.unwrap_or_default())?;
        let email = EmailAddress::new(self.email.unwrap_or_default())?;
        let tax_id = self.cpf.map(|cpf| TaxId::new(&cpf)).transpose()?;
        let address = self.address.map(Address::new).transpose()?;

        Ok(RegisterUserCommand {
            name,
            email,
            password: self.password.unwrap_or_default(),
            tax_id,
            address,
        })
    }
}
