//! Purchasing domain module: vendor catalog, shopping list, suggestions, export.
//!
//! This crate contains business rules for turning low stock into a priced,
//! vendor-grouped shopping list, implemented purely as deterministic domain
//! logic (no IO, no HTTP, no storage).

pub mod catalog;
pub mod config;
pub mod export;
pub mod list;
pub mod suggestion;
pub mod vendor;

pub use catalog::{VendorCatalog, VendorOffer};
pub use config::PlanningConfig;
pub use export::{ExportRow, ExportSummary, VendorBucket, VendorRef};
pub use list::{
    AddManualItem, AssignVendor, ClearVendor, GenerationReport, ItemAdded, ItemPatch,
    ItemRemoved, ItemUpdated, ListRegenerated, ListTotals, ManualItem, RegenerateFromLowStock,
    RemoveItem, ShoppingList, ShoppingListCommand, ShoppingListEvent, ShoppingListItem,
    ShoppingListItemId, UpdateItem, VendorAssigned,
};
pub use suggestion::{Suggestion, SuggestionAction, SuggestionKind, derive_suggestions};
pub use vendor::{PriceComparison, cheapest_offer, compare_prices, find_offer, select_default};
