use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Category;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Description;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductFilter;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductImage;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::Unit;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductRepository;

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, category, unit, image, active, created_at, updated_at";

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    price: Decimal,
    category: String,
    unit: String,
    image: String,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = ProductError;

    fn try_from(r: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: ProductId(r.id),
            name: ProductName::new(r.name)?,
            description: r.description.map(Description::new).transpose()?,
            price: Price::new(r.price)?,
            category: Category::new(r.category)?,
            unit: Unit::new(r.unit)?,
            image: ProductImage::new(r.image)?,
            active: r.active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn database_error(e: sqlx::Error) -> ProductError {
    ProductError::DatabaseError(e.to_string())
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, ProductError> {
        let pattern = filter
            .search
            .as_deref()
            .map(|s| format!("%{}%", escape_like(s)));

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE active = TRUE
              AND ($1::TEXT IS NULL OR category = $1)
              AND ($2::TEXT IS NULL OR name ILIKE $2 ESCAPE '\')
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(filter.category.as_deref())
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Product::try_from).transpose()
    }

    async fn create(&self, product: CreateProductCommand) -> Result<Product, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (name, description, price, category, unit, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(product.name.as_str())
        .bind(product.description.as_ref().map(|d| d.as_str()))
        .bind(product.price.amount())
        .bind(product.category.as_str())
        .bind(product.unit.as_str())
        .bind(product.image.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Product::try_from(row)
    }

    async fn update(
        &self,
        id: &ProductId,
        changes: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                unit = COALESCE($6, unit),
                image = COALESCE($7, image),
                active = COALESCE($8, active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id.0)
        .bind(changes.name.as_ref().map(|n| n.as_str()))
        .bind(changes.description.as_ref().map(|d| d.as_str()))
        .bind(changes.price.map(|p| p.amount()))
        .bind(changes.category.as_ref().map(|c| c.as_str()))
        .bind(changes.unit.as_ref().map(|u| u.as_str()))
        .bind(changes.image.as_ref().map(|i| i.as_str()))
        .bind(changes.active)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        match row {
            Some(r) => Product::try_from(r),
            None => Err(ProductError::NotFound(id.to_string())),
        }
    }

    async fn deactivate(&self, id: &ProductId) -> Result<(), ProductError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET active = FALSE, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_metacharacters() {
        assert_eq!(escape_like("caneta"), "caneta");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("c:\\x"), "c:\\\\x");
    }
}
