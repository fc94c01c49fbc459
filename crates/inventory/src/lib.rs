//! Inventory snapshot + replenishment sizing.
//!
//! This crate contains business rules for deciding what to re-order,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).
//! Stock levels arrive as an already-materialized snapshot from callers.

pub mod item;
pub mod replenishment;

pub use item::{InventoryItem, InventoryRecord, InventorySnapshot};
pub use replenishment::{
    ExcludedItem, Replenishment, ReplenishmentLine, ReplenishmentPlan, is_low_stock, plan,
    purchase_quantity,
};
