use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use validator::Validate;

use crate::domain::user::models::Address;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::Role;
use crate::domain::user::models::TaxId;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::ProfileResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::sanitize::sanitize_field;
use crate::inbound::http::validation::validators;
use crate::inbound::http::validation::FieldOrder;
use crate::inbound::http::validation::Sanitize;
use crate::inbound::http::validation::ValidatedJson;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// HTTP request body for an administrative user update (raw JSON)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100, message = "Nome deve ter entre 2 e 100 caracteres"))]
    name: Option<String>,
    #[validate(custom(function = "validators::tax_id"))]
    cpf: Option<String>,
    #[validate(length(max = 500, message = "Endereço deve ter no máximo 500 caracteres"))]
    address: Option<String>,
    #[validate(custom(function = "validators::known_role"))]
    role: Option<String>,
}

impl Sanitize for UpdateUserRequest {
    fn sanitize(&mut self) {
        sanitize_field(&mut self.name);
        sanitize_field(&mut self.cpf);
        sanitize_field(&mut self.address);
        sanitize_field(&mut self.role);
    }
}

impl FieldOrder for UpdateUserRequest {
    const FIELDS: &'static [&'static str] = &["name", "cpf", "address", "role"];
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        Ok(UpdateUserCommand {
            name: self.name.map(PersonName::new).transpose()?,
            tax_id: self.cpf.map(|cpf| TaxId::new(&cpf)).transpose()?,
            address: self.address.map(Address::new).transpose()?,
            role: self.role.map(|r| r.parse::<Role>()).transpose()?,
        })
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateUserRequest>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    let command = body.try_into_command()?;

    tracing::info!(admin_id = %caller.user_id, user_id = %user_id, "Admin updating user");

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| {
            ApiSuccess::new(
                StatusCode::OK,
                ProfileResponseData {
                    user: profile.into(),
                },
            )
            .with_message("Usuário atualizado com sucesso")
        })
}
