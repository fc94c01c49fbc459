//! `restock-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the inventory and
//! purchasing crates (no IO, no infrastructure concerns).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{InventoryItemId, ListId, VendorId};
pub use value_object::ValueObject;
