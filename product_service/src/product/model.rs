use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constant::DEFAULT_CATEGORY;
use crate::error::ProductError;

/// Scale of the `price` column, `DECIMAL(10, 2)`.
pub const PRICE_SCALE: u32 = 2;

/// Rounds to the column scale the way Postgres NUMERIC does, halves away
/// from zero.
pub fn to_price_scale(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /products`. Every field is optional at the wire level so a
/// missing one can be reported by name.
#[derive(Deserialize, Debug, Default)]
pub struct CreateProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

/// A validated create request with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category: String,
    pub image_url: String,
}

impl TryFrom<CreateProductForm> for NewProduct {
    type Error = ProductError;

    fn try_from(form: CreateProductForm) -> Result<Self, ProductError> {
        let name = form
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or(ProductError::MissingField("name"))?;
        let price = form.price.ok_or(ProductError::MissingField("price"))?;
        let stock_quantity = form
            .stock_quantity
            .ok_or(ProductError::MissingField("stock_quantity"))?;
        Ok(Self {
            name,
            description: form.description.unwrap_or_default(),
            price: to_price_scale(price),
            stock_quantity,
            category: form
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            image_url: form.image_url.unwrap_or_default(),
        })
    }
}

/// Body of `PUT /products/{id}`.
#[derive(Deserialize, Debug, Default)]
pub struct UpdateProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

/// Full replacement of a product's mutable columns. `None` is written as
/// NULL; `name` and `price` are NOT NULL, so leaving them out fails in the
/// database.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: i32,
    pub category: Option<String>,
    pub image_url: Option<String>,
}

impl From<UpdateProductForm> for ProductChanges {
    fn from(form: UpdateProductForm) -> Self {
        Self {
            name: form.name,
            description: form.description,
            price: form.price.map(to_price_scale),
            stock_quantity: form.stock_quantity.unwrap_or(0),
            category: form.category,
            image_url: form.image_url,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Created {
    pub id: Uuid,
    pub message: String,
}
