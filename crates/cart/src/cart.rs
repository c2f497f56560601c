use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelfscan_core::{Aggregate, CartItemId, DomainError, Event};

use crate::item::{CartItem, cart_total};

/// Aggregate root: Cart.
///
/// At most one row per product: adding a product already in the cart grows
/// that row's quantity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    version: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn total(&self) -> f64 {
        cart_total(&self.items)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: CartItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }
}

/// Row-level checks shared by add and replace.
fn validate_row(item: &CartItem) -> Result<(), DomainError> {
    if item.quantity == 0 {
        return Err(DomainError::validation("quantity must be positive"));
    }
    if item.product_id != item.product.id {
        return Err(DomainError::invariant(format!(
            "cart item {} references product {} but carries product {}",
            item.id, item.product_id, item.product.id
        )));
    }
    Ok(())
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddItem {
    pub item: CartItem,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub item_id: CartItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateItemQuantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateItemQuantity {
    pub item_id: CartItemId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearCart {
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReplaceItems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceItems {
    pub items: Vec<CartItem>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartCommand {
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    UpdateItemQuantity(UpdateItemQuantity),
    ClearCart(ClearCart),
    ReplaceItems(ReplaceItems),
}

/// Event: ItemAdded (new row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub item: CartItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemQuantityChanged (absolute quantity after the change).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemQuantityChanged {
    pub item_id: CartItemId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub item_id: CartItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCleared {
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemsReplaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsReplaced {
    pub items: Vec<CartItem>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    ItemQuantityChanged(ItemQuantityChanged),
    ItemRemoved(ItemRemoved),
    CartCleared(CartCleared),
    ItemsReplaced(ItemsReplaced),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "cart.item.added",
            CartEvent::ItemQuantityChanged(_) => "cart.item.quantity_changed",
            CartEvent::ItemRemoved(_) => "cart.item.removed",
            CartEvent::CartCleared(_) => "cart.cleared",
            CartEvent::ItemsReplaced(_) => "cart.replaced",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::ItemQuantityChanged(e) => e.occurred_at,
            CartEvent::ItemRemoved(e) => e.occurred_at,
            CartEvent::CartCleared(e) => e.occurred_at,
            CartEvent::ItemsReplaced(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => {
                self.items.push(e.item.clone());
            }
            CartEvent::ItemQuantityChanged(e) => {
                if let Some(idx) = self.position(e.item_id) {
                    self.items[idx].quantity = e.quantity;
                }
            }
            CartEvent::ItemRemoved(e) => {
                self.items.retain(|i| i.id != e.item_id);
            }
            CartEvent::CartCleared(_) => {
                self.items.clear();
            }
            CartEvent::ItemsReplaced(e) => {
                self.items = e.items.clone();
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem(cmd) => self.handle_add(cmd),
            CartCommand::RemoveItem(cmd) => self.handle_remove(cmd),
            CartCommand::UpdateItemQuantity(cmd) => self.handle_update_quantity(cmd),
            CartCommand::ClearCart(cmd) => Ok(vec![CartEvent::CartCleared(CartCleared {
                occurred_at: cmd.occurred_at,
            })]),
            CartCommand::ReplaceItems(cmd) => self.handle_replace(cmd),
        }
    }
}

impl Cart {
    fn handle_add(&self, cmd: &AddItem) -> Result<Vec<CartEvent>, DomainError> {
        validate_row(&cmd.item)?;

        let existing = self
            .items
            .iter()
            .find(|i| i.product_id == cmd.item.product_id);

        if let Some(row) = existing {
            let quantity = row
                .quantity
                .checked_add(cmd.item.quantity)
                .ok_or_else(|| DomainError::validation("quantity overflow"))?;

            tracing::debug!(product_id = %row.product_id, quantity, "merging cart row");
            return Ok(vec![CartEvent::ItemQuantityChanged(ItemQuantityChanged {
                item_id: row.id,
                quantity,
                occurred_at: cmd.occurred_at,
            })]);
        }

        if self.position(cmd.item.id).is_some() {
            return Err(DomainError::conflict(format!(
                "cart item {} already exists",
                cmd.item.id
            )));
        }

        tracing::debug!(
            product_id = %cmd.item.product_id,
            quantity = cmd.item.quantity,
            "adding cart row"
        );
        Ok(vec![CartEvent::ItemAdded(ItemAdded {
            item: cmd.item.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Result<Vec<CartEvent>, DomainError> {
        if self.position(cmd.item_id).is_none() {
            return Err(DomainError::not_found());
        }

        Ok(vec![CartEvent::ItemRemoved(ItemRemoved {
            item_id: cmd.item_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update_quantity(
        &self,
        cmd: &UpdateItemQuantity,
    ) -> Result<Vec<CartEvent>, DomainError> {
        if self.position(cmd.item_id).is_none() {
            return Err(DomainError::not_found());
        }

        // Zero would leave an empty row behind; RemoveItem covers that.
        if cmd.quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        Ok(vec![CartEvent::ItemQuantityChanged(ItemQuantityChanged {
            item_id: cmd.item_id,
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_replace(&self, cmd: &ReplaceItems) -> Result<Vec<CartEvent>, DomainError> {
        let mut item_ids = HashSet::with_capacity(cmd.items.len());
        let mut product_ids = HashSet::with_capacity(cmd.items.len());
        for item in &cmd.items {
            validate_row(item)?;
            if !item_ids.insert(item.id) {
                return Err(DomainError::conflict(format!(
                    "duplicate cart item id {} in snapshot",
                    item.id
                )));
            }
            if !product_ids.insert(&item.product_id) {
                return Err(DomainError::conflict(format!(
                    "product {} appears in more than one cart row",
                    item.product_id
                )));
            }
        }

        Ok(vec![CartEvent::ItemsReplaced(ItemsReplaced {
            items: cmd.items.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}
