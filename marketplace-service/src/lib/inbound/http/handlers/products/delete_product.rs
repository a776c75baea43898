use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::Empty;
use crate::inbound::http::router::AppState;

/// Soft delete; the product row is kept with `active = false`.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<Empty>, ApiError> {
    let product_id = ProductId::from_string(&id).map_err(ProductError::from)?;

    state
        .product_service
        .remove_product(&product_id)
        .await
        .map_err(ApiError::from)
        .map(|()| {
            ApiSuccess::new(StatusCode::OK, Empty {}).with_message("Produto removido com sucesso")
        })
}
