//! Product catalog module.
//!
//! Holds the product records scanned labels are matched against, and the
//! catalog aggregate that registers, edits and removes them. Pure domain logic
//! (no IO, no storage).

pub mod catalog;
pub mod product;

pub use catalog::{
    AddProduct, Catalog, CatalogCommand, CatalogEvent, CatalogReplaced, DeleteProduct,
    ProductAdded, ProductDeleted, ProductUpdated, ReplaceProducts, UpdateProduct,
};
pub use product::Product;
