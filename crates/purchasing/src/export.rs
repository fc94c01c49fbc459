//! Vendor-grouped export payload for document generators.
//!
//! Layout and styling are left to the consumer; this module only decides
//! grouping, ordering and totals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use restock_core::{ListId, VendorId};

use crate::list::{ListTotals, ShoppingList, ShoppingListItem, ShoppingListItemId};

pub const UNASSIGNED_LABEL: &str = "Unassigned";
const UNKNOWN_VENDOR_LABEL: &str = "Unknown Vendor";

/// Vendor heading of a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRef {
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub is_preferred: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub item_id: ShoppingListItemId,
    pub name: String,
    pub quantity: Decimal,
    pub unit: String,
    pub low_stock: bool,
    /// Selected offer price, else `total / quantity`.
    pub unit_price: Option<Decimal>,
    pub total: Decimal,
    pub notes: Option<String>,
    pub lead_time_days: Option<u32>,
    /// Selected offer is the lowest price on file.
    pub is_cheapest: bool,
    /// Set when another offer undercuts the selected one.
    pub cheaper_vendor: Option<String>,
    pub saving_per_unit: Option<Decimal>,
}

impl ExportRow {
    fn from_item(item: &ShoppingListItem) -> Self {
        let comparison = item.price_comparison();
        let unit_price = comparison
            .selected
            .map(|o| o.price)
            .or_else(|| item.estimated_cost.checked_div(item.quantity_needed));
        let cheaper_vendor = comparison
            .saving_per_unit
            .and(comparison.cheapest)
            .map(|o| o.vendor_name.clone());

        Self {
            item_id: item.id,
            name: item.name.clone(),
            quantity: item.quantity_needed,
            unit: item.unit.clone(),
            low_stock: item.is_low_stock,
            unit_price,
            total: item.estimated_cost,
            notes: item.notes.clone(),
            lead_time_days: comparison.lead_time_days(),
            is_cheapest: comparison.is_cheapest(),
            cheaper_vendor,
            saving_per_unit: comparison.saving_per_unit,
        }
    }
}

/// Entries sharing one selected vendor (or none, for the unassigned bucket).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorBucket {
    /// `None` for the unassigned bucket.
    pub vendor: Option<VendorRef>,
    pub label: String,
    pub rows: Vec<ExportRow>,
    pub subtotal: Decimal,
}

impl VendorBucket {
    pub fn is_unassigned(&self) -> bool {
        self.vendor.is_none()
    }

    fn push(&mut self, item: &ShoppingListItem) {
        self.subtotal += item.estimated_cost;
        self.rows.push(ExportRow::from_item(item));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub list_id: ListId,
    pub generated_at: DateTime<Utc>,
    pub totals: ListTotals,
    /// Vendor buckets in order of first appearance; unassigned last.
    pub buckets: Vec<VendorBucket>,
    pub grand_total: Decimal,
}

impl ExportSummary {
    pub fn from_list(list: &ShoppingList, generated_at: DateTime<Utc>) -> Self {
        let buckets = group_by_vendor(list.items());
        let grand_total = buckets.iter().map(|b| b.subtotal).sum();

        Self {
            list_id: list.id_typed(),
            generated_at,
            totals: list.totals().clone(),
            buckets,
            grand_total,
        }
    }

    /// File stem for the rendered document, e.g. `shopping-list-2024-10-05`.
    pub fn document_name(&self) -> String {
        format!("shopping-list-{}", self.generated_at.format("%Y-%m-%d"))
    }

    pub fn unassigned(&self) -> Option<&VendorBucket> {
        self.buckets.iter().find(|b| b.is_unassigned())
    }
}

/// Partition entries by selected vendor.
pub fn group_by_vendor(items: &[ShoppingListItem]) -> Vec<VendorBucket> {
    let mut buckets: Vec<VendorBucket> = Vec::new();
    let mut unassigned = VendorBucket {
        vendor: None,
        label: UNASSIGNED_LABEL.to_string(),
        rows: Vec::new(),
        subtotal: Decimal::ZERO,
    };

    for item in items {
        let Some(vendor_id) = &item.selected_vendor_id else {
            unassigned.push(item);
            continue;
        };

        let existing = buckets.iter_mut().find(|b| {
            b.vendor
                .as_ref()
                .is_some_and(|v| &v.vendor_id == vendor_id)
        });
        match existing {
            Some(bucket) => bucket.push(item),
            None => {
                let offer = item.selected_offer();
                let vendor = VendorRef {
                    vendor_id: vendor_id.clone(),
                    vendor_name: offer
                        .map(|o| o.vendor_name.clone())
                        .unwrap_or_else(|| UNKNOWN_VENDOR_LABEL.to_string()),
                    is_preferred: offer.is_some_and(|o| o.is_preferred),
                };
                let mut bucket = VendorBucket {
                    label: vendor.vendor_name.clone(),
                    vendor: Some(vendor),
                    rows: Vec::new(),
                    subtotal: Decimal::ZERO,
                };
                bucket.push(item);
                buckets.push(bucket);
            }
        }
    }

    if !unassigned.rows.is_empty() {
        buckets.push(unassigned);
    }
    buckets
}
