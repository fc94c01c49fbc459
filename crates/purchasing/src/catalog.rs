use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use restock_core::{ValueObject, VendorId};

/// A vendor's price and terms for a named item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorOffer {
    pub vendor_id: VendorId,
    pub vendor_name: String,
    /// Price per `unit`.
    pub price: Decimal,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_order_qty: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_time_days: Option<u32>,
    #[serde(default)]
    pub is_preferred: bool,
}

impl ValueObject for VendorOffer {}

/// Vendor offers keyed by item name.
///
/// The name is the only join key between inventory, catalog and manual list
/// entries. Lookups are exact string matches; anything else yields no offers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorCatalog {
    offers: BTreeMap<String, Vec<VendorOffer>>,
}

impl VendorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offers(mut self, item_name: impl Into<String>, offers: Vec<VendorOffer>) -> Self {
        self.insert(item_name, offers);
        self
    }

    pub fn insert(&mut self, item_name: impl Into<String>, offers: Vec<VendorOffer>) {
        self.offers.insert(item_name.into(), offers);
    }

    /// Offers for `item_name`, in catalog order. Empty when the name is unknown.
    pub fn offers_for(&self, item_name: &str) -> &[VendorOffer] {
        self.offers.get(item_name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}
