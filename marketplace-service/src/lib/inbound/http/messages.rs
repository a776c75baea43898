/// Serializable response types for the HTTP layer.
///
/// Domain models carry no serde impls; these are the only shapes that
/// reach the wire. None of them has a password field.
use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::product::models::Product;
use crate::domain::user::models::User;
use crate::domain::user::models::UserProfile;

/// Account summary returned by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub cpf: Option<String>,
    pub address: Option<String>,
    pub role: String,
}

impl From<&UserProfile> for ProfileData {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.0,
            name: profile.name.as_str().to_string(),
            email: profile.email.as_str().to_string(),
            cpf: profile.tax_id.as_ref().map(|t| t.as_str().to_string()),
            address: profile.address.as_ref().map(|a| a.as_str().to_string()),
            role: profile.role.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub unit: String,
    pub image: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.0,
            name: product.name.as_str().to_string(),
            description: product.description.as_ref().map(|d| d.as_str().to_string()),
            price: product.price.amount(),
            category: product.category.as_str().to_string(),
            unit: product.unit.as_str().to_string(),
            image: product.image.as_str().to_string(),
            active: product.active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub token: String,
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub user: ProfileData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductResponseData {
    pub product: ProductData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductListResponseData {
    pub products: Vec<ProductData>,
}

/// Body for responses that carry only `success` and `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Empty {}
