use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use restock_core::InventoryItemId;

const DEFAULT_REORDER_POINT: i64 = 10;
const DEFAULT_TOP_UP_LEVEL: i64 = 20;
const DEFAULT_CAPACITY_MAX: i64 = 40;

/// Stock levels and cost baseline for a single inventory item.
///
/// Thresholds are expected to satisfy
/// `0 <= reorder_point <= top_up_level <= capacity_max`, but snapshots come
/// from outside and are not guaranteed to. See [`InventoryItem::thresholds_consistent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "InventoryRecord")]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub current_qty: Decimal,
    pub reorder_point: Decimal,
    pub top_up_level: Decimal,
    pub capacity_max: Decimal,
    /// Average unit cost; fallback price when no vendor is selected.
    pub avg_cost: Decimal,
    pub preferred_vendor: Option<String>,
    pub last_order_date: Option<NaiveDate>,
}

impl InventoryItem {
    pub fn thresholds_consistent(&self) -> bool {
        Decimal::ZERO <= self.reorder_point
            && self.reorder_point <= self.top_up_level
            && self.top_up_level <= self.capacity_max
    }

    /// One-line stock summary, e.g. `Current: 5kg | Top-up: 50kg | Max: 100kg`.
    pub fn stock_summary(&self) -> String {
        format!(
            "Current: {}{unit} | Top-up: {}{unit} | Max: {}{unit}",
            self.current_qty.normalize(),
            self.top_up_level.normalize(),
            self.capacity_max.normalize(),
            unit = self.unit,
        )
    }
}

/// Inventory item as it arrives on the wire.
///
/// Upstream feeds are allowed to omit thresholds and costs; conversion into
/// [`InventoryItem`] fills the gaps. Only absent fields are defaulted, an
/// explicit zero is kept as zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct InventoryRecord {
    pub id: InventoryItemId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub unit: String,
    pub current_qty: Option<Decimal>,
    pub reorder_point: Option<Decimal>,
    pub top_up_level: Option<Decimal>,
    pub capacity_max: Option<Decimal>,
    pub avg_cost: Option<Decimal>,
    pub preferred_vendor: Option<String>,
    pub last_order_date: Option<NaiveDate>,
}

impl From<InventoryRecord> for InventoryItem {
    fn from(r: InventoryRecord) -> Self {
        let top_up_level = r.top_up_level.unwrap_or_else(|| {
            r.reorder_point
                .map(|rp| rp * Decimal::TWO)
                .unwrap_or(Decimal::from(DEFAULT_TOP_UP_LEVEL))
        });
        let capacity_max = r.capacity_max.unwrap_or_else(|| {
            r.reorder_point
                .map(|rp| rp * Decimal::from(4))
                .unwrap_or(Decimal::from(DEFAULT_CAPACITY_MAX))
        });

        Self {
            id: r.id,
            name: r.name,
            category: r.category,
            unit: r.unit,
            current_qty: r.current_qty.unwrap_or(Decimal::ZERO),
            reorder_point: r.reorder_point.unwrap_or(Decimal::from(DEFAULT_REORDER_POINT)),
            top_up_level,
            capacity_max,
            avg_cost: r.avg_cost.unwrap_or(Decimal::ZERO),
            preferred_vendor: r.preferred_vendor,
            last_order_date: r.last_order_date,
        }
    }
}

/// Ordered collection of inventory items, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventorySnapshot {
    items: Vec<InventoryItem>,
}

impl InventorySnapshot {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items at or below their reorder point, in snapshot order.
    ///
    /// Includes items that replenishment will later exclude as inconsistent.
    pub fn low_stock_items(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter().filter(|i| crate::is_low_stock(i))
    }
}

impl From<Vec<InventoryItem>> for InventorySnapshot {
    fn from(items: Vec<InventoryItem>) -> Self {
        Self::new(items)
    }
}
