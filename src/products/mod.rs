//! Products - named items with a price per kilogram.

mod store;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::record::Content;
use crate::Record;

pub use store::{filter_products, ProductStore};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(collection = "products")]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Currency units per kilogram.
    pub price_per_kg: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Content of a product about to be added. Only constructible through
/// validation, so a store never sees an empty name or a non-positive price.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    name: String,
    price_per_kg: f64,
}

impl NewProduct {
    pub fn new(name: impl AsRef<str>, price_per_kg: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name(name.as_ref())?,
            price_per_kg: validate_price(price_per_kg)?,
        })
    }

    /// Validate raw form input; the price text is parsed like the calculator
    /// inputs are.
    pub fn parse(name: &str, price_per_kg: &str) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        let price = crate::calculator::parse_amount(price_per_kg).ok_or(ValidationError::InvalidPrice)?;
        Ok(Self {
            name,
            price_per_kg: validate_price(price)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price_per_kg(&self) -> f64 {
        self.price_per_kg
    }
}

/// Fields to change on an existing product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price_per_kg: Option<f64>,
}

impl ProductPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price_per_kg(mut self, price_per_kg: f64) -> Self {
        self.price_per_kg = Some(price_per_kg);
        self
    }

    /// Apply the same rules as [`NewProduct::new`] to whatever is present,
    /// trimming the name.
    pub fn validate(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: self.name.as_deref().map(validate_name).transpose()?,
            price_per_kg: self.price_per_kg.map(validate_price).transpose()?,
        })
    }
}

impl Content for Product {
    type Draft = NewProduct;
    type Patch = ProductPatch;

    fn from_draft(id: String, now: i64, draft: NewProduct) -> Self {
        Product {
            id,
            name: draft.name,
            price_per_kg: draft.price_per_kg,
            created_at: now,
            updated_at: now,
        }
    }

    fn validate_patch(patch: ProductPatch) -> Result<ProductPatch, ValidationError> {
        patch.validate()
    }

    fn merge(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price_per_kg) = patch.price_per_kg {
            self.price_per_kg = price_per_kg;
        }
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

fn validate_price(price: f64) -> Result<f64, ValidationError> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(ValidationError::InvalidPrice)
    }
}
