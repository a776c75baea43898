use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::product::errors::CategoryError;
use crate::domain::product::errors::DetailError;
use crate::domain::product::errors::PriceError;
use crate::domain::product::errors::ProductIdError;
use crate::domain::product::errors::ProductNameError;

/// Catalogue entry.
///
/// Products are never removed; `active == false` hides them from the
/// public listing and lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: Option<Description>,
    pub price: Price,
    pub category: Category,
    pub unit: Unit,
    pub image: ProductImage,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub i64);

impl ProductId {
    /// Parse a product ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a positive integer
    pub fn from_string(s: &str) -> Result<Self, ProductIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(ProductId(id)),
            _ => Err(ProductIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Product display name, 2 to 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    pub const MIN_LENGTH: usize = 2;
    pub const MAX_LENGTH: usize = 200;

    pub fn new(name: String) -> Result<Self, ProductNameError> {
        let length = name.chars().count();
        if length < Self::MIN_LENGTH {
            Err(ProductNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(ProductNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unit price with two decimal places, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(Decimal);

impl Price {
    /// Largest value a `NUMERIC(12,2)` column holds.
    pub const MAX: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        let mut amount = amount.round_dp(2);
        amount.rescale(2);
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive);
        }
        if amount > Self::MAX {
            return Err(PriceError::TooLarge {
                max: Self::MAX.to_string(),
            });
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

/// Catalogue category, 1 to 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category(String);

impl Category {
    pub const MAX_LENGTH: usize = 100;

    pub fn new(category: String) -> Result<Self, CategoryError> {
        let length = category.chars().count();
        if length == 0 {
            return Err(CategoryError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(CategoryError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(category))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn bounded(field: &'static str, value: String, max: usize) -> Result<String, DetailError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(DetailError::TooLong { field, max, actual });
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    pub const MAX_LENGTH: usize = 1000;

    pub fn new(description: String) -> Result<Self, DetailError> {
        bounded("Description", description, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Sale unit (`caixa`, `kg`, ...). Defaults to `unidade`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit(String);

impl Unit {
    pub const MAX_LENGTH: usize = 50;
    pub const DEFAULT: &'static str = "unidade";

    pub fn new(unit: String) -> Result<Self, DetailError> {
        bounded("Unit", unit, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

/// Image URL or emoji shown in the catalogue. Defaults to `📦`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage(String);

impl ProductImage {
    pub const MAX_LENGTH: usize = 500;
    pub const DEFAULT: &'static str = "📦";

    pub fn new(image: String) -> Result<Self, DetailError> {
        bounded("Image", image, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProductImage {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

/// Listing filter.
///
/// Empty values and the `Todas` ("all") category sentinel mean no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ProductFilter {
    pub const ALL_CATEGORIES: &'static str = "Todas";

    pub fn new(category: Option<String>, search: Option<String>) -> Self {
        Self {
            category: category.filter(|c| !c.is_empty() && c != Self::ALL_CATEGORIES),
            search: search.filter(|s| !s.is_empty()),
        }
    }
}

/// Command to create a product with domain types
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: ProductName,
    pub description: Option<Description>,
    pub price: Price,
    pub category: Category,
    pub unit: Unit,
    pub image: ProductImage,
}

/// Partial product update. Only provided fields are changed.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductCommand {
    pub name: Option<ProductName>,
    pub description: Option<Description>,
    pub price: Option<Price>,
    pub category: Option<Category>,
    pub unit: Option<Unit>,
    pub image: Option<ProductImage>,
    pub active: Option<bool>,
}
