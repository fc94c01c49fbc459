//! Shopping list aggregate.
//!
//! The list is the single owner of its entries. Every change goes through
//! `handle` (validate, decide) and `apply` (mutate); after each applied event
//! the list recomputes its totals and re-derives suggestions, so neither is
//! ever observed stale.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use restock_core::{
    Aggregate, AggregateRoot, DomainError, DomainResult, Entity, ExpectedVersion, InventoryItemId,
    ListId, ValueObject, VendorId,
};
use restock_events::{Event, EventHistory};
use restock_inventory::{ExcludedItem, InventorySnapshot};

use crate::catalog::{VendorCatalog, VendorOffer};
use crate::config::PlanningConfig;
use crate::suggestion::{Suggestion, SuggestionAction, derive_suggestions};
use crate::vendor::{self, PriceComparison};

/// List-scoped entry identifier. Assigned in increasing order, never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingListItemId(u32);

impl ShoppingListItemId {
    pub fn new(n: u32) -> Self {
        Self(n)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ShoppingListItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One entry of the shopping list.
///
/// `estimated_cost` is `quantity_needed × unit price`, where the unit price is
/// the selected offer's price, else `fallback_unit_cost`. Manual entries have
/// neither and carry the flat total the user typed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    pub id: ShoppingListItemId,
    /// Set only for entries generated from inventory.
    pub inventory_item_id: Option<InventoryItemId>,
    pub name: String,
    pub category: String,
    pub quantity_needed: Decimal,
    pub unit: String,
    pub estimated_cost: Decimal,
    pub vendor_prices: Vec<VendorOffer>,
    pub selected_vendor_id: Option<VendorId>,
    pub is_low_stock: bool,
    pub notes: Option<String>,
    /// Inventory average cost, for generated entries.
    pub fallback_unit_cost: Option<Decimal>,
}

impl ShoppingListItem {
    pub fn selected_offer(&self) -> Option<&VendorOffer> {
        self.selected_vendor_id
            .as_ref()
            .and_then(|id| vendor::find_offer(&self.vendor_prices, id))
    }

    /// Price per unit the cost is derived from, if any.
    pub fn unit_price(&self) -> Option<Decimal> {
        self.selected_offer()
            .map(|o| o.price)
            .or(self.fallback_unit_cost)
    }

    pub fn price_comparison(&self) -> PriceComparison<'_> {
        vendor::compare_prices(&self.vendor_prices, self.selected_vendor_id.as_ref())
    }

    pub fn is_manual(&self) -> bool {
        self.inventory_item_id.is_none()
    }

    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
            || self
                .notes
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(needle))
    }
}

impl Entity for ShoppingListItem {
    type Id = ShoppingListItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// User-entered fields for a standalone entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualItem {
    pub name: String,
    pub category: String,
    pub quantity_needed: Decimal,
    pub unit: String,
    /// Flat total for the entry, not a unit price.
    pub estimated_cost: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial edit of an entry; `None` keeps the current value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity_needed: Option<Decimal>,
    pub unit: Option<String>,
    pub estimated_cost: Option<Decimal>,
    pub notes: Option<String>,
}

/// Aggregate figures over the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTotals {
    pub total_cost: Decimal,
    pub total_units: Decimal,
    /// Distinct selected vendors; unassigned entries do not count.
    pub vendor_count: usize,
    pub low_stock_count: usize,
    pub item_count: usize,
}

impl ValueObject for ListTotals {}

impl ListTotals {
    pub fn from_items(items: &[ShoppingListItem]) -> Self {
        let mut vendors: Vec<&VendorId> =
            items.iter().filter_map(|i| i.selected_vendor_id.as_ref()).collect();
        vendors.sort();
        vendors.dedup();

        Self {
            total_cost: items.iter().map(|i| i.estimated_cost).sum(),
            total_units: items.iter().map(|i| i.quantity_needed).sum(),
            vendor_count: vendors.len(),
            low_stock_count: items.iter().filter(|i| i.is_low_stock).count(),
            item_count: items.len(),
        }
    }
}

/// Outcome of a regeneration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub item_count: usize,
    pub total_units: Decimal,
    pub excluded: Vec<ExcludedItem>,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Command: RegenerateFromLowStock (replaces every entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegenerateFromLowStock {
    pub list_id: ListId,
    pub inventory: InventorySnapshot,
    pub catalog: VendorCatalog,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddManualItem. `offers` are the catalog offers for the item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddManualItem {
    pub list_id: ListId,
    pub item: ManualItem,
    pub offers: Vec<VendorOffer>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateItem {
    pub list_id: ListId,
    pub item_id: ShoppingListItemId,
    pub patch: ItemPatch,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub list_id: ListId,
    pub item_id: ShoppingListItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AssignVendor. The vendor must be one of the entry's offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignVendor {
    pub list_id: ListId,
    pub item_id: ShoppingListItemId,
    pub vendor_id: VendorId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearVendor (back to unassigned).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearVendor {
    pub list_id: ListId,
    pub item_id: ShoppingListItemId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShoppingListCommand {
    RegenerateFromLowStock(RegenerateFromLowStock),
    AddManualItem(AddManualItem),
    UpdateItem(UpdateItem),
    RemoveItem(RemoveItem),
    AssignVendor(AssignVendor),
    ClearVendor(ClearVendor),
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Event: ListRegenerated. Carries the complete new entry set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRegenerated {
    pub list_id: ListId,
    pub items: Vec<ShoppingListItem>,
    pub excluded: Vec<ExcludedItem>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub list_id: ListId,
    pub item: ShoppingListItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemUpdated. Carries the full entry after the edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdated {
    pub list_id: ListId,
    pub item: ShoppingListItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub list_id: ListId,
    pub item_id: ShoppingListItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: VendorAssigned. `vendor_id = None` means the entry became unassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorAssigned {
    pub list_id: ListId,
    pub item_id: ShoppingListItemId,
    pub vendor_id: Option<VendorId>,
    pub estimated_cost: Decimal,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShoppingListEvent {
    ListRegenerated(ListRegenerated),
    ItemAdded(ItemAdded),
    ItemUpdated(ItemUpdated),
    ItemRemoved(ItemRemoved),
    VendorAssigned(VendorAssigned),
}

impl Event for ShoppingListEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ShoppingListEvent::ListRegenerated(_) => "purchasing.shopping_list.regenerated",
            ShoppingListEvent::ItemAdded(_) => "purchasing.shopping_list.item_added",
            ShoppingListEvent::ItemUpdated(_) => "purchasing.shopping_list.item_updated",
            ShoppingListEvent::ItemRemoved(_) => "purchasing.shopping_list.item_removed",
            ShoppingListEvent::VendorAssigned(_) => "purchasing.shopping_list.vendor_assigned",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ShoppingListEvent::ListRegenerated(e) => e.occurred_at,
            ShoppingListEvent::ItemAdded(e) => e.occurred_at,
            ShoppingListEvent::ItemUpdated(e) => e.occurred_at,
            ShoppingListEvent::ItemRemoved(e) => e.occurred_at,
            ShoppingListEvent::VendorAssigned(e) => e.occurred_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// Aggregate root: ShoppingList.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingList {
    id: ListId,
    items: Vec<ShoppingListItem>,
    next_item_no: u32,
    config: PlanningConfig,
    totals: ListTotals,
    suggestions: Vec<Suggestion>,
    history: EventHistory<ShoppingListEvent>,
    version: u64,
}

impl ShoppingList {
    pub fn new(id: ListId) -> Self {
        Self {
            id,
            items: Vec::new(),
            next_item_no: 1,
            config: PlanningConfig::default(),
            totals: ListTotals::default(),
            suggestions: Vec::new(),
            history: EventHistory::new(),
            version: 0,
        }
    }

    pub fn with_config(mut self, config: PlanningConfig) -> Self {
        self.config = config;
        self.refresh();
        self
    }

    pub fn id_typed(&self) -> ListId {
        self.id
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn item(&self, id: ShoppingListItemId) -> Option<&ShoppingListItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn totals(&self) -> &ListTotals {
        &self.totals
    }

    /// Suggestions derived from the current state (see [`derive_suggestions`]).
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Events applied through [`ShoppingList::execute`], oldest first.
    pub fn history(&self) -> &EventHistory<ShoppingListEvent> {
        &self.history
    }

    /// Entries whose name, category or notes contain `query`, ignoring case.
    ///
    /// An empty query matches everything. Never modifies the list.
    pub fn filter(&self, query: &str) -> Vec<&ShoppingListItem> {
        if query.is_empty() {
            return self.items.iter().collect();
        }
        let needle = query.to_lowercase();
        self.items.iter().filter(|i| i.matches(&needle)).collect()
    }

    fn refresh(&mut self) {
        self.totals = ListTotals::from_items(&self.items);
        self.suggestions = derive_suggestions(&self.items, self.version, &self.config);
    }
}

impl AggregateRoot for ShoppingList {
    type Id = ListId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for ShoppingList {
    type Command = ShoppingListCommand;
    type Event = ShoppingListEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ShoppingListEvent::ListRegenerated(e) => {
                self.items = e.items.clone();
                if let Some(max) = e.items.iter().map(|i| i.id.get()).max() {
                    self.next_item_no = self.next_item_no.max(max + 1);
                }
            }
            ShoppingListEvent::ItemAdded(e) => {
                self.next_item_no = self.next_item_no.max(e.item.id.get() + 1);
                self.items.push(e.item.clone());
            }
            ShoppingListEvent::ItemUpdated(e) => {
                if let Some(slot) = self.items.iter_mut().find(|i| i.id == e.item.id) {
                    *slot = e.item.clone();
                }
            }
            ShoppingListEvent::ItemRemoved(e) => {
                self.items.retain(|i| i.id != e.item_id);
            }
            ShoppingListEvent::VendorAssigned(e) => {
                if let Some(item) = self.items.iter_mut().find(|i| i.id == e.item_id) {
                    item.selected_vendor_id = e.vendor_id.clone();
                    item.estimated_cost = e.estimated_cost;
                }
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
        self.refresh();
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ShoppingListCommand::RegenerateFromLowStock(cmd) => self.handle_regenerate(cmd),
            ShoppingListCommand::AddManualItem(cmd) => self.handle_add_manual(cmd),
            ShoppingListCommand::UpdateItem(cmd) => self.handle_update(cmd),
            ShoppingListCommand::RemoveItem(cmd) => self.handle_remove(cmd),
            ShoppingListCommand::AssignVendor(cmd) => self.handle_assign_vendor(cmd),
            ShoppingListCommand::ClearVendor(cmd) => self.handle_clear_vendor(cmd),
        }
    }
}

impl ShoppingList {
    fn ensure_list_id(&self, list_id: ListId) -> Result<(), DomainError> {
        if self.id != list_id {
            return Err(DomainError::invariant("list_id mismatch"));
        }
        Ok(())
    }

    fn find(&self, item_id: ShoppingListItemId) -> Result<&ShoppingListItem, DomainError> {
        self.item(item_id).ok_or_else(DomainError::not_found)
    }

    fn handle_regenerate(
        &self,
        cmd: &RegenerateFromLowStock,
    ) -> Result<Vec<ShoppingListEvent>, DomainError> {
        self.ensure_list_id(cmd.list_id)?;

        let plan = restock_inventory::plan(&cmd.inventory);
        let items = plan
            .lines
            .iter()
            .zip(self.next_item_no..)
            .map(|(line, no)| {
                let offers = cmd.catalog.offers_for(&line.item.name).to_vec();
                let default = vendor::select_default(&offers);
                let unit_price = default.map(|o| o.price).unwrap_or(line.item.avg_cost);
                let selected_vendor_id = default.map(|o| o.vendor_id.clone());

                ShoppingListItem {
                    id: ShoppingListItemId::new(no),
                    inventory_item_id: Some(line.item.id.clone()),
                    name: line.item.name.clone(),
                    category: line.item.category.clone(),
                    quantity_needed: line.quantity,
                    unit: line.item.unit.clone(),
                    estimated_cost: unit_price * line.quantity,
                    vendor_prices: offers,
                    selected_vendor_id,
                    is_low_stock: true,
                    notes: Some(line.item.stock_summary()),
                    fallback_unit_cost: Some(line.item.avg_cost),
                }
            })
            .collect();

        Ok(vec![ShoppingListEvent::ListRegenerated(ListRegenerated {
            list_id: cmd.list_id,
            items,
            excluded: plan.excluded,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_manual(&self, cmd: &AddManualItem) -> Result<Vec<ShoppingListEvent>, DomainError> {
        self.ensure_list_id(cmd.list_id)?;

        let input = &cmd.item;
        let name = validate_name(&input.name)?;
        validate_quantity(input.quantity_needed)?;
        validate_cost(input.estimated_cost)?;

        let item = ShoppingListItem {
            id: ShoppingListItemId::new(self.next_item_no),
            inventory_item_id: None,
            name,
            category: input.category.clone(),
            quantity_needed: input.quantity_needed,
            unit: input.unit.clone(),
            estimated_cost: input.estimated_cost,
            vendor_prices: cmd.offers.clone(),
            selected_vendor_id: None,
            is_low_stock: false,
            notes: input.notes.clone().filter(|n| !n.trim().is_empty()),
            fallback_unit_cost: None,
        };

        Ok(vec![ShoppingListEvent::ItemAdded(ItemAdded {
            list_id: cmd.list_id,
            item,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdateItem) -> Result<Vec<ShoppingListEvent>, DomainError> {
        self.ensure_list_id(cmd.list_id)?;
        let current = self.find(cmd.item_id)?;
        let patch = &cmd.patch;

        let mut item = current.clone();

        if let Some(name) = &patch.name {
            item.name = validate_name(name)?;
        }
        if let Some(category) = &patch.category {
            item.category = category.clone();
        }
        if let Some(unit) = &patch.unit {
            item.unit = unit.clone();
        }
        if let Some(notes) = &patch.notes {
            item.notes = Some(notes.clone()).filter(|n| !n.trim().is_empty());
        }

        if let Some(quantity) = patch.quantity_needed {
            validate_quantity(quantity)?;
            item.quantity_needed = quantity;
        }

        match (item.unit_price(), patch.estimated_cost) {
            (Some(_), Some(_)) => {
                return Err(DomainError::validation(
                    "estimated cost is derived from the unit price for this item",
                ));
            }
            (Some(price), None) => item.estimated_cost = price * item.quantity_needed,
            (None, Some(cost)) => {
                validate_cost(cost)?;
                item.estimated_cost = cost;
            }
            (None, None) => {}
        }

        Ok(vec![ShoppingListEvent::ItemUpdated(ItemUpdated {
            list_id: cmd.list_id,
            item,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Result<Vec<ShoppingListEvent>, DomainError> {
        self.ensure_list_id(cmd.list_id)?;
        self.find(cmd.item_id)?;

        Ok(vec![ShoppingListEvent::ItemRemoved(ItemRemoved {
            list_id: cmd.list_id,
            item_id: cmd.item_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_assign_vendor(
        &self,
        cmd: &AssignVendor,
    ) -> Result<Vec<ShoppingListEvent>, DomainError> {
        self.ensure_list_id(cmd.list_id)?;
        let item = self.find(cmd.item_id)?;

        let offer = vendor::find_offer(&item.vendor_prices, &cmd.vendor_id).ok_or_else(|| {
            DomainError::validation(format!(
                "vendor {} has no offer for {}",
                cmd.vendor_id, item.name
            ))
        })?;

        Ok(vec![ShoppingListEvent::VendorAssigned(VendorAssigned {
            list_id: cmd.list_id,
            item_id: cmd.item_id,
            vendor_id: Some(offer.vendor_id.clone()),
            estimated_cost: offer.price * item.quantity_needed,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_clear_vendor(&self, cmd: &ClearVendor) -> Result<Vec<ShoppingListEvent>, DomainError> {
        self.ensure_list_id(cmd.list_id)?;
        let item = self.find(cmd.item_id)?;

        let estimated_cost = item
            .fallback_unit_cost
            .map(|c| c * item.quantity_needed)
            .unwrap_or(item.estimated_cost);

        Ok(vec![ShoppingListEvent::VendorAssigned(VendorAssigned {
            list_id: cmd.list_id,
            item_id: cmd.item_id,
            vendor_id: None,
            estimated_cost,
            occurred_at: cmd.occurred_at,
        })])
    }
}

fn validate_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("item name cannot be empty"));
    }
    Ok(name.to_string())
}

fn validate_quantity(quantity: Decimal) -> DomainResult<()> {
    if quantity <= Decimal::ZERO {
        return Err(DomainError::validation("quantity must be positive"));
    }
    Ok(())
}

fn validate_cost(cost: Decimal) -> DomainResult<()> {
    if cost <= Decimal::ZERO {
        return Err(DomainError::validation("estimated cost must be positive"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Operations (command + apply in one call, stamped with the current time)
// ---------------------------------------------------------------------------

impl ShoppingList {
    /// Handle a command and apply every resulting event.
    ///
    /// On error nothing is applied.
    pub fn execute(&mut self, command: &ShoppingListCommand) -> DomainResult<Vec<ShoppingListEvent>> {
        let events = self.handle(command)?;
        for event in &events {
            tracing::debug!(
                list_id = %self.id,
                event_type = event.event_type(),
                version = self.version + 1,
                "applying shopping list event"
            );
            self.apply(event);
            self.history.record(event.clone());
        }
        Ok(events)
    }

    /// Replace the whole list with one entry per purchasable low-stock item.
    pub fn generate_from_low_stock(
        &mut self,
        inventory: &InventorySnapshot,
        catalog: &VendorCatalog,
    ) -> DomainResult<GenerationReport> {
        let cmd = ShoppingListCommand::RegenerateFromLowStock(RegenerateFromLowStock {
            list_id: self.id,
            inventory: inventory.clone(),
            catalog: catalog.clone(),
            occurred_at: Utc::now(),
        });

        let events = self.execute(&cmd)?;
        let excluded = events
            .into_iter()
            .find_map(|e| match e {
                ShoppingListEvent::ListRegenerated(e) => Some(e.excluded),
                _ => None,
            })
            .unwrap_or_default();

        let report = GenerationReport {
            item_count: self.totals.item_count,
            total_units: self.totals.total_units,
            excluded,
        };
        tracing::info!(
            list_id = %self.id,
            items = report.item_count,
            total_units = %report.total_units,
            excluded = report.excluded.len(),
            "generated shopping list from low stock"
        );
        Ok(report)
    }

    /// Append a standalone entry; offers are looked up by exact name.
    pub fn add_manual_item(
        &mut self,
        item: ManualItem,
        catalog: &VendorCatalog,
    ) -> DomainResult<ShoppingListItemId> {
        let offers = catalog.offers_for(item.name.trim()).to_vec();
        let id = ShoppingListItemId::new(self.next_item_no);
        self.execute(&ShoppingListCommand::AddManualItem(AddManualItem {
            list_id: self.id,
            item,
            offers,
            occurred_at: Utc::now(),
        }))?;
        Ok(id)
    }

    pub fn update_item(&mut self, item_id: ShoppingListItemId, patch: ItemPatch) -> DomainResult<()> {
        self.execute(&ShoppingListCommand::UpdateItem(UpdateItem {
            list_id: self.id,
            item_id,
            patch,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    pub fn remove_item(&mut self, item_id: ShoppingListItemId) -> DomainResult<()> {
        self.execute(&ShoppingListCommand::RemoveItem(RemoveItem {
            list_id: self.id,
            item_id,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    /// Select `vendor_id` for an entry and re-price it. Quantity is untouched.
    pub fn assign_vendor(&mut self, item_id: ShoppingListItemId, vendor_id: VendorId) -> DomainResult<()> {
        self.execute(&ShoppingListCommand::AssignVendor(AssignVendor {
            list_id: self.id,
            item_id,
            vendor_id,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    pub fn clear_vendor(&mut self, item_id: ShoppingListItemId) -> DomainResult<()> {
        self.execute(&ShoppingListCommand::ClearVendor(ClearVendor {
            list_id: self.id,
            item_id,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    /// Run a suggestion's action.
    ///
    /// Fails with `Conflict` if the list changed since the suggestion was
    /// derived, and with `Validation` for informational suggestions.
    pub fn apply_suggestion(&mut self, suggestion: &Suggestion) -> DomainResult<()> {
        ExpectedVersion::Exact(suggestion.list_version).check(self.version)?;

        match &suggestion.action {
            Some(SuggestionAction::SwitchVendor { item_id, vendor_id }) => {
                self.assign_vendor(*item_id, vendor_id.clone())
            }
            None => Err(DomainError::validation(format!(
                "suggestion {} has no action",
                suggestion.id
            ))),
        }
    }
}
