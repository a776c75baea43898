use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::domain::product::errors::PriceError;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Category;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Description;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductImage;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::Unit;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::messages::ProductResponseData;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::sanitize::sanitize_field;
use crate::inbound::http::validation::sanitize::sanitize_json_field;
use crate::inbound::http::validation::validators;
use crate::inbound::http::validation::validators::decimal_from_json;
use crate::inbound::http::validation::FieldOrder;
use crate::inbound::http::validation::Sanitize;
use crate::inbound::http::validation::ValidatedJson;

pub(super) const PRODUCT_FIELDS: &[&str] =
    &["name", "description", "price", "category", "unit", "image"];

/// Read a price sent as a JSON number or numeric string.
pub(super) fn parse_price(value: Option<&Value>) -> Result<Option<Price>, ProductError> {
    match value {
        None => Ok(None),
        Some(value) => {
            let amount = decimal_from_json(value).ok_or(PriceError::NotPositive)?;
            Ok(Some(Price::new(amount)?))
        }
    }
}

/// Body of `POST /api/products`.
///
/// `price` is kept as raw JSON so that numbers and numeric strings are both
/// accepted and a bad value is reported as a field error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(
        required(message = "Nome do produto é obrigatório"),
        length(
            min = 2,
            max = 200,
            message = "Nome do produto deve ter entre 2 e 200 caracteres"
        )
    )]
    name: Option<String>,
    #[validate(length(max = 1000, message = "Descrição deve ter no máximo 1000 caracteres"))]
    description: Option<String>,
    #[validate(
        required(message = "Preço é obrigatório"),
        custom(function = "validators::positive_price")
    )]
    price: Option<Value>,
    #[validate(
        required(message = "Categoria é obrigatória"),
        length(min = 1, max = 100, message = "Categoria deve ter entre 1 e 100 caracteres")
    )]
    category: Option<String>,
    #[validate(length(max = 50, message = "Unidade deve ter no máximo 50 caracteres"))]
    unit: Option<String>,
    #[validate(length(max = 500, message = "Imagem deve ter no máximo 500 caracteres"))]
    image: Option<String>,
}

impl Sanitize for CreateProductRequest {
    fn sanitize(&mut self) {
        sanitize_field(&mut self.name);
        sanitize_field(&mut self.description);
        sanitize_json_field(&mut self.price);
        sanitize_field(&mut self.category);
        sanitize_field(&mut self.unit);
        sanitize_field(&mut self.image);
    }
}

impl FieldOrder for CreateProductRequest {
    const FIELDS: &'static [&'static str] = PRODUCT_FIELDS;
}

impl CreateProductRequest {
    fn try_into_command(self) -> Result<CreateProductCommand, ProductError> {
        let price = parse_price(self.price.as_ref())?.ok_or(PriceError::NotPositive)?;

        Ok(CreateProductCommand {
            name: ProductName::new(self.name.unwrap_or_default())?,
            description: self.description.map(Description::new).transpose()?,
            price,
            category: Category::new(self.category.unwrap_or_default())?,
            unit: self.unit.map(Unit::new).transpose()?.unwrap_or_default(),
            image: self
                .image
                .map(ProductImage::new)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateProductRequest>,
) -> Result<ApiSuccess<ProductResponseData>, ApiError> {
    state
        .product_service
        .create_product(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref product| {
            ApiSuccess::new(
                StatusCode::CREATED,
                ProductResponseData {
                    product: product.into(),
                },
            )
            .with_message("Produto criado com sucesso")
        })
}
