use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use marketplace_service::domain::product::errors::ProductError;
use marketplace_service::domain::product::models::CreateProductCommand;
use marketplace_service::domain::product::models::Product;
use marketplace_service::domain::product::models::ProductFilter;
use marketplace_service::domain::product::models::ProductId;
use marketplace_service::domain::product::models::UpdateProductCommand;
use marketplace_service::domain::product::ports::ProductRepository;
use marketplace_service::domain::user::errors::UserError;
use marketplace_service::domain::user::models::NewUser;
use marketplace_service::domain::user::models::UpdateUserCommand;
use marketplace_service::domain::user::models::User;
use marketplace_service::domain::user::models::UserId;
use marketplace_service::domain::user::models::UserProfile;
use marketplace_service::domain::user::ports::UserRepository;

/// User store backed by a vector. The lock makes the email check and the
/// insert one step, like the unique constraint does in Postgres.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

fn poisoned<T>(_: T) -> UserError {
    UserError::Unknown("user store lock poisoned".to_string())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserError> {
        let users = self.users.lock().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.id == *id).map(UserProfile::from))
    }

    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().map_err(poisoned)?;

        if users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        let now = Utc::now();
        let created = User {
            id: UserId(users.len() as i64 + 1),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            tax_id: user.tax_id,
            address: user.address,
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());

        Ok(created)
    }

    async fn update(
        &self,
        id: &UserId,
        changes: UpdateUserCommand,
    ) -> Result<UserProfile, UserError> {
        let mut users = self.users.lock().map_err(poisoned)?;

        let user = users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(tax_id) = changes.tax_id {
            user.tax_id = Some(tax_id);
        }
        if let Some(address) = changes.address {
            user.address = Some(address);
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        user.updated_at = Utc::now();

        Ok(UserProfile::from(&*user))
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

fn product_lock_poisoned<T>(_: T) -> ProductError {
    ProductError::Unknown("product store lock poisoned".to_string())
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, ProductError> {
        let products = self.products.lock().map_err(product_lock_poisoned)?;
        let search = filter.search.as_ref().map(|s| s.to_lowercase());

        let mut found: Vec<Product> = products
            .iter()
            .filter(|p| p.active)
            .filter(|p| {
                filter
                    .category
                    .as_deref()
                    .map_or(true, |c| p.category.as_str() == c)
            })
            .filter(|p| {
                search
                    .as_deref()
                    .map_or(true, |s| p.name.as_str().to_lowercase().contains(s))
            })
            .cloned()
            .collect();

        found.sort_by(|a, b| (b.created_at, b.id.0).cmp(&(a.created_at, a.id.0)));
        Ok(found)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let products = self.products.lock().map_err(product_lock_poisoned)?;
        Ok(products.iter().find(|p| p.id == *id).cloned())
    }

    async fn create(&self, product: CreateProductCommand) -> Result<Product, ProductError> {
        let mut products = self.products.lock().map_err(product_lock_poisoned)?;

        let now = Utc::now();
        let created = Product {
            id: ProductId(products.len() as i64 + 1),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            unit: product.unit,
            image: product.image,
            active: true,
            created_at: now,
            updated_at: now,
        };
        products.push(created.clone());

        Ok(created)
    }

    async fn update(
        &self,
        id: &ProductId,
        changes: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let mut products = self.products.lock().map_err(product_lock_poisoned)?;

        let product = products
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or(ProductError::NotFound(id.to_string()))?;

        if let Some(name) = changes.name {
            product.name = name;
        }
        if let Some(description) = changes.description {
            product.description = Some(description);
        }
        if let Some(price) = changes.price {
            product.price = price;
        }
        if let Some(category) = changes.category {
            product.category = category;
        }
        if let Some(unit) = changes.unit {
            product.unit = unit;
        }
        if let Some(image) = changes.image {
            product.image = image;
        }
        if let Some(active) = changes.active {
            product.active = active;
        }
        product.updated_at = Utc::now();

        Ok(product.clone())
    }

    async fn deactivate(&self, id: &ProductId) -> Result<(), ProductError> {
        let mut products = self.products.lock().map_err(product_lock_poisoned)?;

        let product = products
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or(ProductError::NotFound(id.to_string()))?;

        product.active = false;
        product.updated_at = Utc::now();

        Ok(())
    }
}
