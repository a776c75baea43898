use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductFilter;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;

/// Domain service for the product catalogue.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn list_products(&self, filter: ProductFilter) -> Result<Vec<Product>, ProductError> {
        self.repository.list(&filter).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        match self.repository.find_by_id(id).await? {
            Some(product) if product.active => Ok(product),
            _ => Err(ProductError::NotFound(id.to_string())),
        }
    }

    async fn create_product(
        &self,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError> {
        let product = self.repository.create(command).await?;

        tracing::info!(
            product_id = %product.id,
            category = product.category.as_str(),
            "Product created"
        );

        Ok(product)
    }

    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let product = self.repository.update(id, command).await?;

        tracing::info!(product_id = %product.id, active = product.active, "Product updated");

        Ok(product)
    }

    async fn remove_product(&self, id: &ProductId) -> Result<(), ProductError> {
        self.repository.deactivate(id).await?;

        tracing::info!(product_id = %id, "Product deactivated");

        Ok(())
    }
}
