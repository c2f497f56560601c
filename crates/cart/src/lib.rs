//! Checkout cart module.
//!
//! Rows resolved from scanned labels accumulate here until checkout. Pure
//! domain logic (no IO, no storage).

pub mod cart;
pub mod item;

pub use cart::{
    AddItem, Cart, CartCleared, CartCommand, CartEvent, ClearCart, ItemAdded, ItemQuantityChanged,
    ItemRemoved, ItemsReplaced, RemoveItem, ReplaceItems, UpdateItemQuantity,
};
pub use item::{CartItem, cart_total};
