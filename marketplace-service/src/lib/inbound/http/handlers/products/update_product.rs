use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use super::create_product::parse_price;
use super::create_product::PRODUCT_FIELDS;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Category;
use crate::domain::product::models::Description;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductImage;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::Unit;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::ProductResponseData;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::sanitize::sanitize_field;
use crate::inbound::http::validation::sanitize::sanitize_json_field;
use crate::inbound::http::validation::validators;
use crate::inbound::http::validation::FieldOrder;
use crate::inbound::http::validation::Sanitize;
use crate::inbound::http::validation::ValidatedJson;

/// Body of `PUT /api/products/:id`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(
        min = 2,
        max = 200,
        message = "Nome do produto deve ter entre 2 e 200 caracteres"
    ))]
    name: Option<String>,
    #[validate(length(max = 1000, message = "Descrição deve ter no máximo 1000 caracteres"))]
    description: Option<String>,
    #[validate(custom(function = "validators::positive_price"))]
    price: Option<Value>,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Categoria deve ter entre 1 e 100 caracteres"
    ))]
    category: Option<String>,
    #[validate(length(max = 50, message = "Unidade deve ter no máximo 50 caracteres"))]
    unit: Option<String>,
    #[validate(length(max = 500, message = "Imagem deve ter no máximo 500 caracteres"))]
    image: Option<String>,
    active: Option<bool>,
}

impl Sanitize for UpdateProductRequest {
    fn sanitize(&mut self) {
        sanitize_field(&mut self.name);
        sanitize_field(&mut self.description);
        sanitize_json_field(&mut self.price);
        sanitize_field(&mut self.category);
        sanitize_field(&mut self.unit);
        sanitize_field(&mut self.image);
    }
}

impl FieldOrder for UpdateProductRequest {
    const FIELDS: &'static [&'static str] = PRODUCT_FIELDS;
}

impl UpdateProductRequest {
    fn try_into_command(self) -> Result<UpdateProductCommand, ProductError> {
        Ok(UpdateProductCommand {
            name: self.name.map(ProductName::new).transpose()?,
            description: self.description.map(Description::new).transpose()?,
            price: parse_price(self.price.as_ref())?,
            category: self.category.map(Category::new).transpose()?,
            unit: self.unit.map(Unit::new).transpose()?,
            image: self.image.map(ProductImage::new).transpose()?,
            active: self.active,
        })
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateProductRequest>,
) -> Result<ApiSuccess<ProductResponseData>, ApiError> {
    let product_id = ProductId::from_string(&id).map_err(ProductError::from)?;
    let command = body.try_into_command()?;

    state
        .product_service
        .update_product(&product_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref product| {
            ApiSuccess::new(
                StatusCode::OK,
                ProductResponseData {
                    product: product.into(),
                },
            )
            .with_message("Produto atualizado com sucesso")
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::inbound::http::validation::check;

    #[test]
    fn test_partial_update_keeps_absent_fields_unset() {
        let mut request: UpdateProductRequest =
            serde_json::from_value(json!({"price": "9.99", "active": false, "unit": ""}))
                .unwrap();
        request.sanitize();

        assert!(check(&request).is_ok());

        let command = request.try_into_command().unwrap();
        assert_eq!(command.price.unwrap().amount().to_string(), "9.99");
        assert_eq!(command.active, Some(false));
        assert!(command.name.is_none());
        assert!(command.unit.is_none());
    }

    #[test]
    fn test_present_fields_still_checked() {
        let mut request: UpdateProductRequest =
            serde_json::from_value(json!({"price": 0, "name": "X"})).unwrap();
        request.sanitize();

        let errors = check(&request).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "price"]);
    }
}
