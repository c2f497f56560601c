use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelfscan_core::{Aggregate, DomainError, Event, ProductId};

use crate::product::Product;

/// Aggregate root: Catalog.
///
/// Keeps products in registration order; that order is the candidate order
/// reported by label matching.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    products: Vec<Product>,
    version: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered snapshot handed to the matcher.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|p| &p.id == id)
    }
}

/// Command: AddProduct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddProduct {
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateProduct (replace the product carrying the same id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProduct {
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeleteProduct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteProduct {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReplaceProducts (load a whole snapshot, e.g. after a refresh).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceProducts {
    pub products: Vec<Product>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CatalogCommand {
    AddProduct(AddProduct),
    UpdateProduct(UpdateProduct),
    DeleteProduct(DeleteProduct),
    ReplaceProducts(ReplaceProducts),
}

/// Event: ProductAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAdded {
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdated {
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductDeleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDeleted {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CatalogReplaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogReplaced {
    pub products: Vec<Product>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CatalogEvent {
    ProductAdded(ProductAdded),
    ProductUpdated(ProductUpdated),
    ProductDeleted(ProductDeleted),
    CatalogReplaced(CatalogReplaced),
}

impl Event for CatalogEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::ProductAdded(_) => "catalog.product.added",
            CatalogEvent::ProductUpdated(_) => "catalog.product.updated",
            CatalogEvent::ProductDeleted(_) => "catalog.product.deleted",
            CatalogEvent::CatalogReplaced(_) => "catalog.replaced",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CatalogEvent::ProductAdded(e) => e.occurred_at,
            CatalogEvent::ProductUpdated(e) => e.occurred_at,
            CatalogEvent::ProductDeleted(e) => e.occurred_at,
            CatalogEvent::CatalogReplaced(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Catalog {
    type Command = CatalogCommand;
    type Event = CatalogEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CatalogEvent::ProductAdded(e) => {
                self.products.push(e.product.clone());
            }
            CatalogEvent::ProductUpdated(e) => {
                if let Some(idx) = self.position(&e.product.id) {
                    self.products[idx] = e.product.clone();
                }
            }
            CatalogEvent::ProductDeleted(e) => {
                self.products.retain(|p| p.id != e.product_id);
            }
            CatalogEvent::CatalogReplaced(e) => {
                self.products = e.products.clone();
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CatalogCommand::AddProduct(cmd) => self.handle_add(cmd),
            CatalogCommand::UpdateProduct(cmd) => self.handle_update(cmd),
            CatalogCommand::DeleteProduct(cmd) => self.handle_delete(cmd),
            CatalogCommand::ReplaceProducts(cmd) => self.handle_replace(cmd),
        }
    }
}

impl Catalog {
    fn handle_add(&self, cmd: &AddProduct) -> Result<Vec<CatalogEvent>, DomainError> {
        cmd.product.validate()?;
        if self.position(&cmd.product.id).is_some() {
            return Err(DomainError::conflict(format!(
                "product {} already exists",
                cmd.product.id
            )));
        }

        tracing::debug!(product_id = %cmd.product.id, name = %cmd.product.name, "adding product");
        Ok(vec![CatalogEvent::ProductAdded(ProductAdded {
            product: cmd.product.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdateProduct) -> Result<Vec<CatalogEvent>, DomainError> {
        cmd.product.validate()?;
        let Some(idx) = self.position(&cmd.product.id) else {
            return Err(DomainError::not_found());
        };

        let mut product = cmd.product.clone();
        product.created_at = self.products[idx].created_at;
        product.updated_at = cmd.occurred_at;

        Ok(vec![CatalogEvent::ProductUpdated(ProductUpdated {
            product,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_delete(&self, cmd: &DeleteProduct) -> Result<Vec<CatalogEvent>, DomainError> {
        if self.position(&cmd.product_id).is_none() {
            return Err(DomainError::not_found());
        }

        Ok(vec![CatalogEvent::ProductDeleted(ProductDeleted {
            product_id: cmd.product_id.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_replace(&self, cmd: &ReplaceProducts) -> Result<Vec<CatalogEvent>, DomainError> {
        let mut seen = HashSet::with_capacity(cmd.products.len());
        for product in &cmd.products {
            product.validate()?;
            if !seen.insert(&product.id) {
                return Err(DomainError::conflict(format!(
                    "duplicate product id {} in snapshot",
                    product.id
                )));
            }
        }

        Ok(vec![CatalogEvent::CatalogReplaced(CatalogReplaced {
            products: cmd.products.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}
