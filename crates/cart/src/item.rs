use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelfscan_catalog::Product;
use shelfscan_core::{CartItemId, ProductId};

/// Cart row: a product snapshot and how many units were scanned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub product: Product,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(product: Product, quantity: u32, added_at: DateTime<Utc>) -> Self {
        Self {
            id: CartItemId::new(),
            product_id: product.id.clone(),
            product,
            quantity,
            added_at,
        }
    }

    /// `unit_price * quantity`; unpriced products contribute nothing.
    pub fn line_total(&self) -> f64 {
        self.product.unit_price() * f64::from(self.quantity)
    }
}

/// Sum of line totals.
pub fn cart_total(items: &[CartItem]) -> f64 {
    items.iter().map(CartItem::line_total).sum()
}
