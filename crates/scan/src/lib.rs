//! Scan routing.
//!
//! Decides what a freshly recognized label means for the app: register it as
//! a new product (inventory mode), or resolve it against the catalog for the
//! cart (checkout mode). The router only decides; turning a decision into
//! catalog or cart state goes through the command builders in [`commands`].

pub mod commands;
pub mod router;

pub use commands::{SCANNED_PRODUCT_DESCRIPTION, add_to_cart_command, register_command};
pub use router::{ScanDecision, ScanMode, ScanRouter};
