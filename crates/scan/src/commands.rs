//! Builders turning scan decisions into catalog and cart commands.

use chrono::{DateTime, Utc};

use shelfscan_cart::{AddItem, CartCommand, CartItem};
use shelfscan_catalog::{AddProduct, CatalogCommand, Product};
use shelfscan_core::ProductId;

/// Description given to products registered straight from a label.
pub const SCANNED_PRODUCT_DESCRIPTION: &str = "Scanned product";

/// `AddProduct` for a label registered as new stock, under a fresh id.
///
/// Validation (e.g. blank names) happens when the catalog handles it.
pub fn register_command(name: &str, at: DateTime<Utc>) -> CatalogCommand {
    let product = Product::new(ProductId::generate(), name.trim(), at)
        .with_description(SCANNED_PRODUCT_DESCRIPTION);

    CatalogCommand::AddProduct(AddProduct {
        product,
        occurred_at: at,
    })
}

/// `AddItem` putting `quantity` units of a resolved product into the cart.
pub fn add_to_cart_command(product: &Product, quantity: u32, at: DateTime<Utc>) -> CartCommand {
    CartCommand::AddItem(AddItem {
        item: CartItem::new(product.clone(), quantity, at),
        occurred_at: at,
    })
}
