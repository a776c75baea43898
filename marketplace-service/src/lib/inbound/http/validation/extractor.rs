use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::errors::check;
use super::errors::FieldError;
use super::errors::FieldOrder;
use super::sanitize::Sanitize;
use crate::inbound::http::handlers::ApiError;

/// JSON body extractor that sanitizes and then validates the payload.
///
/// Handlers taking `ValidatedJson<T>` only run when the body parsed and
/// `T::validate` passed; otherwise the request is answered with
/// `ApiError::ValidationFailed`.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Sanitize + Validate + FieldOrder,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "Request body rejected");
            ApiError::ValidationFailed(vec![FieldError::new(
                "body",
                "Corpo da requisição inválido",
            )])
        })?;

        value.sanitize();

        check(&value).map_err(|errors| {
            tracing::debug!(
                body = std::any::type_name::<T>(),
                failures = errors.len(),
                "Validation failed"
            );
            ApiError::ValidationFailed(errors)
        })?;

        Ok(ValidatedJson(value))
    }
}
