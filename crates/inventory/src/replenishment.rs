//! Replenishment sizing: is an item low, and how much of it should be bought.
//!
//! Rules, in order:
//! - low stock means `current_qty <= reorder_point`;
//! - desired purchase is `top_up_level - current_qty`;
//! - the purchase is clamped to the free capacity `capacity_max - current_qty`;
//! - a clamped amount `<= 0` is a data-quality fault and the item is excluded;
//! - the final amount is rounded up to a whole unit.
//!
//! Ceiling rounding is applied to every unit, including continuously measured
//! ones such as kilograms.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use restock_core::InventoryItemId;

use crate::item::{InventoryItem, InventorySnapshot};

/// Outcome of sizing a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replenishment {
    /// Stock is above the reorder point.
    NotNeeded,
    /// Buy this many whole units (always > 0).
    Purchase(Decimal),
    /// The item is low, but its thresholds leave nothing to buy.
    Inconsistent(ExcludedItem),
}

/// A low-stock item left out of the generated list because its configured
/// thresholds do not allow a positive purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedItem {
    pub item_id: InventoryItemId,
    pub name: String,
    pub current_qty: Decimal,
    pub top_up_level: Decimal,
    pub capacity_max: Decimal,
    /// `min(top_up_level, capacity_max) - current_qty`, before rounding.
    pub clamped_quantity: Decimal,
}

impl ExcludedItem {
    pub fn reason(&self) -> String {
        format!(
            "computed purchase quantity {} is not positive (current={}, top_up={}, capacity={})",
            self.clamped_quantity, self.current_qty, self.top_up_level, self.capacity_max
        )
    }
}

pub fn is_low_stock(item: &InventoryItem) -> bool {
    item.current_qty <= item.reorder_point
}

/// Size the purchase for one item.
pub fn purchase_quantity(item: &InventoryItem) -> Replenishment {
    if !is_low_stock(item) {
        return Replenishment::NotNeeded;
    }

    let desired = item.top_up_level - item.current_qty;
    let headroom = item.capacity_max - item.current_qty;
    let clamped = desired.min(headroom);

    if clamped <= Decimal::ZERO {
        return Replenishment::Inconsistent(ExcludedItem {
            item_id: item.id.clone(),
            name: item.name.clone(),
            current_qty: item.current_qty,
            top_up_level: item.top_up_level,
            capacity_max: item.capacity_max,
            clamped_quantity: clamped,
        });
    }

    Replenishment::Purchase(clamped.ceil())
}

/// A low-stock item together with the amount to buy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplenishmentLine<'a> {
    pub item: &'a InventoryItem,
    pub quantity: Decimal,
}

/// Result of sizing a whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplenishmentPlan<'a> {
    /// One line per purchasable low-stock item, in snapshot order.
    pub lines: Vec<ReplenishmentLine<'a>>,
    /// Low-stock items dropped as data-inconsistent.
    pub excluded: Vec<ExcludedItem>,
}

impl ReplenishmentPlan<'_> {
    pub fn total_units(&self) -> Decimal {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// Size every low-stock item in the snapshot.
pub fn plan(snapshot: &InventorySnapshot) -> ReplenishmentPlan<'_> {
    let mut out = ReplenishmentPlan::default();

    for item in snapshot.items() {
        match purchase_quantity(item) {
            Replenishment::NotNeeded => {}
            Replenishment::Purchase(quantity) => {
                if !item.thresholds_consistent() {
                    tracing::debug!(
                        item_id = %item.id,
                        reorder_point = %item.reorder_point,
                        top_up_level = %item.top_up_level,
                        capacity_max = %item.capacity_max,
                        "inventory thresholds out of order"
                    );
                }
                out.lines.push(ReplenishmentLine { item, quantity });
            }
            Replenishment::Inconsistent(excluded) => {
                tracing::warn!(
                    item_id = %excluded.item_id,
                    name = %excluded.name,
                    clamped_quantity = %excluded.clamped_quantity,
                    "excluding low-stock item: {}",
                    excluded.reason()
                );
                out.excluded.push(excluded);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::InventoryRecord;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn test_item(
        id: &str,
        current: Decimal,
        reorder: Decimal,
        top_up: Decimal,
        cap: Decimal,
    ) -> InventoryItem {
        InventoryItem::from(InventoryRecord {
            id: InventoryItemId::new(id),
            name: format!("Item {id}"),
            category: "FOOD_GRADE".into(),
            unit: "kg".into(),
            current_qty: Some(current),
            reorder_point: Some(reorder),
            top_up_level: Some(top_up),
            capacity_max: Some(cap),
            avg_cost: Some(dec!(2.50)),
            ..Default::default()
        })
    }

    #[test]
    fn tops_up_to_target_level() {
        let item = test_item("inv-1", dec!(5), dec!(20), dec!(50), dec!(100));
        assert_eq!(purchase_quantity(&item), Replenishment::Purchase(dec!(45)));
    }

    #[test]
    fn purchase_is_clamped_to_free_capacity() {
        // Stock is above the target, but still at the reorder point.
        let item = test_item("inv-1", dec!(60), dec!(60), dec!(120), dec!(100));
        assert_eq!(purchase_quantity(&item), Replenishment::Purchase(dec!(40)));
    }

    #[test]
    fn item_exactly_at_reorder_point_is_low() {
        let item = test_item("inv-1", dec!(20), dec!(20), dec!(50), dec!(100));
        assert!(is_low_stock(&item));
        assert_eq!(purchase_quantity(&item), Replenishment::Purchase(dec!(30)));
    }

    #[test]
    fn item_above_reorder_point_needs_nothing() {
        let item = test_item("inv-5", dec!(8), dec!(6), dec!(20), dec!(40));
        assert_eq!(purchase_quantity(&item), Replenishment::NotNeeded);
    }

    #[test]
    fn fractional_shortfall_rounds_up() {
        let item = test_item("inv-1", dec!(2.3), dec!(5), dec!(12), dec!(25));
        assert_eq!(purchase_quantity(&item), Replenishment::Purchase(dec!(10)));
    }

    #[test]
    fn top_up_below_current_stock_is_excluded() {
        let item = test_item("inv-9", dec!(10), dec!(10), dec!(8), dec!(40));
        match purchase_quantity(&item) {
            Replenishment::Inconsistent(excluded) => {
                assert_eq!(excluded.item_id, InventoryItemId::new("inv-9"));
                assert_eq!(excluded.clamped_quantity, dec!(-2));
                assert!(excluded.reason().contains("not positive"));
            }
            other => panic!("Expected exclusion, got {other:?}"),
        }
    }

    #[test]
    fn zero_purchase_is_excluded_not_emitted() {
        let item = test_item("inv-9", dec!(10), dec!(10), dec!(10), dec!(10));
        assert!(matches!(purchase_quantity(&item), Replenishment::Inconsistent(_)));
    }

    #[test]
    fn plan_keeps_snapshot_order_and_reports_exclusions() {
        let snapshot = InventorySnapshot::new(vec![
            test_item("a", dec!(5), dec!(20), dec!(50), dec!(100)),
            test_item("b", dec!(30), dec!(20), dec!(50), dec!(100)),
            test_item("c", dec!(10), dec!(10), dec!(5), dec!(100)),
            test_item("d", dec!(0), dec!(3), dec!(8), dec!(15)),
        ]);

        let plan = plan(&snapshot);
        let ids: Vec<&str> = plan.lines.iter().map(|l| l.item.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);
        assert_eq!(plan.total_units(), dec!(53));
        assert_eq!(plan.excluded.len(), 1);
        assert_eq!(plan.excluded[0].item_id, InventoryItemId::new("c"));

        // The low-stock view still includes the excluded item.
        assert_eq!(snapshot.low_stock_items().count(), 3);
    }

    fn qty() -> impl Strategy<Value = Decimal> {
        // Two decimal places, 0.00 ..= 500.00
        (0i64..=50_000).prop_map(|cents| Decimal::new(cents, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: quantity = ceil(min(top_up - current, cap - current)), and
        /// never pushes projected stock past capacity by a whole unit or more.
        #[test]
        fn quantity_matches_clamped_ceiling(
            current in qty(),
            reorder in qty(),
            top_up in qty(),
            cap in qty(),
        ) {
            let item = test_item("p", current, reorder, top_up, cap);
            let expected = (top_up - current).min(cap - current);

            match purchase_quantity(&item) {
                Replenishment::NotNeeded => prop_assert!(current > reorder),
                Replenishment::Purchase(q) => {
                    prop_assert!(current <= reorder);
                    prop_assert!(expected > Decimal::ZERO);
                    prop_assert_eq!(q, expected.ceil());
                    prop_assert!(q > Decimal::ZERO);
                    prop_assert!(q - (cap - current) < Decimal::ONE);
                }
                Replenishment::Inconsistent(ex) => {
                    prop_assert!(current <= reorder);
                    prop_assert!(expected <= Decimal::ZERO);
                    prop_assert_eq!(ex.clamped_quantity, expected);
                }
            }
        }

        /// Property: every low-stock item lands in exactly one of lines/excluded.
        #[test]
        fn plan_partitions_low_stock_items(
            rows in prop::collection::vec((qty(), qty(), qty(), qty()), 0..20)
        ) {
            let items: Vec<InventoryItem> = rows
                .iter()
                .enumerate()
                .map(|(i, (c, r, t, m))| test_item(&format!("inv-{i}"), *c, *r, *t, *m))
                .collect();
            let snapshot = InventorySnapshot::new(items);
            let plan = plan(&snapshot);

            let low = snapshot.low_stock_items().count();
            prop_assert_eq!(plan.lines.len() + plan.excluded.len(), low);

            let mut seen: Vec<&InventoryItemId> = plan
                .lines
                .iter()
                .map(|l| &l.item.id)
                .chain(plan.excluded.iter().map(|e| &e.item_id))
                .collect();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), low);
        }
    }
}
