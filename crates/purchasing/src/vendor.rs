//! Vendor selection over an item's offer list.

use rust_decimal::Decimal;
use serde::Serialize;

use restock_core::VendorId;

use crate::catalog::VendorOffer;

/// Default vendor for a new list entry: the first offer flagged preferred.
///
/// `None` leaves the entry unassigned.
pub fn select_default(offers: &[VendorOffer]) -> Option<&VendorOffer> {
    offers.iter().find(|o| o.is_preferred)
}

pub fn find_offer<'a>(offers: &'a [VendorOffer], vendor_id: &VendorId) -> Option<&'a VendorOffer> {
    offers.iter().find(|o| &o.vendor_id == vendor_id)
}

/// Lowest-priced offer; the latest one wins a tie.
pub fn cheapest_offer(offers: &[VendorOffer]) -> Option<&VendorOffer> {
    offers.iter().rev().min_by(|a, b| a.price.cmp(&b.price))
}

/// How an entry's current vendor stacks up against its alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceComparison<'a> {
    pub selected: Option<&'a VendorOffer>,
    pub cheapest: Option<&'a VendorOffer>,
    pub has_alternatives: bool,
    /// Per-unit saving from switching to the cheapest offer, when positive.
    pub saving_per_unit: Option<Decimal>,
}

impl PriceComparison<'_> {
    /// True when no offer undercuts the selected one.
    pub fn is_cheapest(&self) -> bool {
        match (self.selected, self.cheapest) {
            (Some(s), Some(c)) => s.price <= c.price,
            _ => false,
        }
    }

    pub fn lead_time_days(&self) -> Option<u32> {
        self.selected.and_then(|o| o.lead_time_days)
    }
}

pub fn compare_prices<'a>(
    offers: &'a [VendorOffer],
    selected: Option<&VendorId>,
) -> PriceComparison<'a> {
    let selected = selected.and_then(|id| find_offer(offers, id));
    let cheapest = cheapest_offer(offers);
    let saving_per_unit = match (selected, cheapest) {
        (Some(s), Some(c)) if s.price > c.price => Some(s.price - c.price),
        _ => None,
    };

    PriceComparison {
        selected,
        cheapest,
        has_alternatives: offers.len() > 1,
        saving_per_unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn offer(id: &str, price: Decimal, preferred: bool) -> VendorOffer {
        VendorOffer {
            vendor_id: VendorId::new(id),
            vendor_name: format!("Vendor {id}"),
            price,
            unit: "kg".into(),
            min_order_qty: None,
            lead_time_days: Some(3),
            is_preferred: preferred,
        }
    }

    #[test]
    fn preferred_offer_is_the_default() {
        let offers = vec![offer("v2", dec!(2.20), false), offer("v1", dec!(2.50), true)];
        assert_eq!(select_default(&offers).unwrap().vendor_id, VendorId::new("v1"));
    }

    #[test]
    fn no_preferred_offer_leaves_entry_unassigned() {
        let offers = vec![offer("v2", dec!(2.20), false), offer("v3", dec!(2.75), false)];
        assert!(select_default(&offers).is_none());
        assert!(select_default(&[]).is_none());
    }

    #[test]
    fn cheapest_prefers_latest_on_tie() {
        let offers = vec![
            offer("v1", dec!(3.00), true),
            offer("v2", dec!(2.00), false),
            offer("v3", dec!(2.00), false),
        ];
        assert_eq!(cheapest_offer(&offers).unwrap().vendor_id, VendorId::new("v3"));
        assert!(cheapest_offer(&[]).is_none());

        // A tied selection is still the cheapest.
        let cmp = compare_prices(&offers, Some(&VendorId::new("v2")));
        assert!(cmp.is_cheapest());
        assert_eq!(cmp.saving_per_unit, None);
    }

    #[test]
    fn comparison_reports_per_unit_saving() {
        let offers = vec![offer("v1", dec!(2.50), true), offer("v2", dec!(2.20), false)];

        let cmp = compare_prices(&offers, Some(&VendorId::new("v1")));
        assert!(cmp.has_alternatives);
        assert!(!cmp.is_cheapest());
        assert_eq!(cmp.saving_per_unit, Some(dec!(0.30)));
        assert_eq!(cmp.lead_time_days(), Some(3));

        let cmp = compare_prices(&offers, Some(&VendorId::new("v2")));
        assert!(cmp.is_cheapest());
        assert_eq!(cmp.saving_per_unit, None);

        let cmp = compare_prices(&offers, None);
        assert!(cmp.selected.is_none());
        assert_eq!(cmp.saving_per_unit, None);
    }
}
