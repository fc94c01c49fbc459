//! Cost-saving and vendor-consolidation suggestions.
//!
//! Suggestions are a pure function of the list entries. Deriving them never
//! mutates anything; a cost-saving suggestion carries an action that the list
//! can execute later (see `ShoppingList::apply_suggestion`).

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use restock_core::VendorId;

use crate::config::PlanningConfig;
use crate::list::{ShoppingListItem, ShoppingListItemId};
use crate::vendor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    CostSavings,
    Consolidation,
}

/// Executable part of a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SuggestionAction {
    #[serde(rename_all = "camelCase")]
    SwitchVendor {
        item_id: ShoppingListItemId,
        vendor_id: VendorId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub item_id: Option<ShoppingListItemId>,
    /// Total saving for cost-saving suggestions.
    pub savings: Option<Decimal>,
    /// `None` for informational suggestions.
    pub action: Option<SuggestionAction>,
    /// List version the suggestion was derived from.
    pub list_version: u64,
}

impl Suggestion {
    pub fn is_actionable(&self) -> bool {
        self.action.is_some()
    }
}

/// Derive all suggestions for the given entries.
///
/// Cost-saving suggestions come first, in entry order; the consolidation
/// suggestion, if any, is last.
pub fn derive_suggestions(
    items: &[ShoppingListItem],
    list_version: u64,
    config: &PlanningConfig,
) -> Vec<Suggestion> {
    let mut out: Vec<Suggestion> = items
        .iter()
        .filter_map(|item| cost_saving(item, list_version, config.savings_threshold))
        .collect();

    if let Some(s) = consolidation(items, list_version, config.fragmentation_threshold) {
        out.push(s);
    }

    out
}

fn cost_saving(
    item: &ShoppingListItem,
    list_version: u64,
    threshold: Decimal,
) -> Option<Suggestion> {
    if item.vendor_prices.len() < 2 {
        return None;
    }

    let current = item.selected_offer()?;
    let cheapest = vendor::cheapest_offer(&item.vendor_prices)?;
    if cheapest.vendor_id == current.vendor_id {
        return None;
    }

    let savings = (current.price - cheapest.price) * item.quantity_needed;
    if savings <= threshold {
        return None;
    }

    Some(Suggestion {
        id: format!("sug-{}", item.id),
        kind: SuggestionKind::CostSavings,
        title: format!("Save ${savings:.2} on {}", item.name),
        description: format!(
            "Switch from {} (${:.2}) to {} (${:.2})",
            current.vendor_name, current.price, cheapest.vendor_name, cheapest.price
        ),
        item_id: Some(item.id),
        savings: Some(savings),
        action: Some(SuggestionAction::SwitchVendor {
            item_id: item.id,
            vendor_id: cheapest.vendor_id.clone(),
        }),
        list_version,
    })
}

fn consolidation(
    items: &[ShoppingListItem],
    list_version: u64,
    threshold: usize,
) -> Option<Suggestion> {
    let vendors: BTreeSet<&VendorId> = items
        .iter()
        .filter_map(|i| i.selected_vendor_id.as_ref())
        .collect();

    if vendors.len() <= threshold {
        return None;
    }

    Some(Suggestion {
        id: "sug-consolidate".to_string(),
        kind: SuggestionKind::Consolidation,
        title: "Consider Vendor Consolidation".to_string(),
        description: format!(
            "You're ordering from {} different vendors. Consolidating orders could reduce shipping costs.",
            vendors.len()
        ),
        item_id: None,
        savings: None,
        action: None,
        list_version,
    })
}
