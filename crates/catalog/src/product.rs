use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelfscan_core::{DomainError, ProductId};

/// A catalog product.
///
/// Only `name` takes part in label matching; the remaining fields are carried
/// for registration and checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price in the store currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Units on hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            price: None,
            quantity: None,
            barcode: None,
            created_at: at,
            updated_at: at,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_barcode(mut self, barcode: impl Into<String>) -> Self {
        self.barcode = Some(barcode.into());
        self
    }

    /// Price used for totals: a product without a price counts as free.
    pub fn unit_price(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Check the record-level invariants (non-blank name, sane price).
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(DomainError::validation(format!(
                    "price must be a non-negative number (got {price})"
                )));
            }
        }
        Ok(())
    }
}
