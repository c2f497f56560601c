//! `shelfscan-core` — shared domain building blocks.
//!
//! Pure domain primitives only: errors, identifiers, and the command/event
//! traits the catalog and cart aggregates implement.

pub mod aggregate;
pub mod error;
pub mod event;
pub mod id;

pub use aggregate::Aggregate;
pub use error::{DomainError, DomainResult};
pub use event::Event;
pub use id::{CartItemId, ProductId};
