use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductFilter;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;

/// Port for product catalogue operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// List active products, newest first.
    async fn list_products(&self, filter: ProductFilter) -> Result<Vec<Product>, ProductError>;

    /// Retrieve an active product.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist or was removed
    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError>;

    async fn create_product(&self, command: CreateProductCommand)
        -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// Soft delete: the product stays stored with `active = false`.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn remove_product(&self, id: &ProductId) -> Result<(), ProductError>;
}

/// Persistence operations for the product catalogue.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// Active products matching the filter, ordered by creation time descending.
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, ProductError>;

    /// Retrieve a product regardless of its `active` flag.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;

    async fn create(&self, product: CreateProductCommand) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn update(
        &self,
        id: &ProductId,
        changes: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn deactivate(&self, id: &ProductId) -> Result<(), ProductError>;
}
