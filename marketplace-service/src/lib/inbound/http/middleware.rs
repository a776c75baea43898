use auth::JwtError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

fn invalid_token() -> Response {
    ApiError::unauthorized("INVALID_TOKEN", "Token inválido").into_response()
}

/// Middleware that validates JWT tokens and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims: auth::Claims = state
        .authenticator
        .validate_token(token)
        .map_err(|e| match e {
            JwtError::TokenExpired => {
                tracing::debug!("Rejected expired token");
                ApiError::unauthorized("TOKEN_EXPIRED", "Token expirado").into_response()
            }
            other => {
                tracing::warn!(error = %other, "JWT validation failed");
                invalid_token()
            }
        })?;

    if claims.user_id <= 0 {
        tracing::warn!(user_id = claims.user_id, "Token carries an invalid user id");
        return Err(invalid_token());
    }

    let role = claims.role.parse::<Role>().map_err(|e| {
        tracing::warn!(error = %e, "Token carries an unknown role");
        invalid_token()
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(claims.user_id),
        email: claims.email,
        role,
    });

    Ok(next.run(req).await)
}

/// Middleware that lets only admins through. Must run after `authenticate`.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, Response> {
    let Some(caller) = req.extensions().get::<AuthenticatedUser>() else {
        return Err(ApiError::unauthorized("NO_TOKEN", "Token de acesso não fornecido")
            .into_response());
    };

    if caller.role != Role::Admin {
        tracing::warn!(user_id = %caller.user_id, "Admin route refused");
        return Err(
            ApiError::forbidden("ADMIN_REQUIRED", "Acesso restrito a administradores")
                .into_response(),
        );
    }

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let no_token =
        || ApiError::unauthorized("NO_TOKEN", "Token de acesso não fornecido").into_response();

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(no_token)?;

    let auth_str = auth_header.to_str().map_err(|_| invalid_token())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(no_token()),
    }
}
