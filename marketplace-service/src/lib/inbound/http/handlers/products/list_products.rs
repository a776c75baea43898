use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::product::models::ProductFilter;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::ProductListResponseData;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::sanitize::sanitize_field;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProductsQuery {
    category: Option<String>,
    search: Option<String>,
}

impl From<ListProductsQuery> for ProductFilter {
    fn from(mut query: ListProductsQuery) -> Self {
        sanitize_field(&mut query.category);
        sanitize_field(&mut query.search);
        ProductFilter::new(query.category, query.search)
    }
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<ApiSuccess<ProductListResponseData>, ApiError> {
    state
        .product_service
        .list_products(query.into())
        .await
        .map_err(ApiError::from)
        .map(|products| {
            ApiSuccess::new(
                StatusCode::OK,
                ProductListResponseData {
                    products: products.iter().map(|p| p.into()).collect(),
                },
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_sanitized_into_filter() {
        let filter = ProductFilter::from(ListProductsQuery {
            category: Some(" Todas ".to_string()),
            search: Some(" <caneta> ".to_string()),
        });

        assert_eq!(filter.category, None);
        assert_eq!(filter.search.as_deref(), Some("caneta"));
    }
}
