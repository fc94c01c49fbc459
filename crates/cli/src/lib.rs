//! `restock` command line: load an inventory snapshot and a vendor catalog,
//! build the shopping list, and print the vendor-grouped export.

pub mod render;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;

use restock_core::ListId;
use restock_inventory::{InventoryItem, InventorySnapshot};
use restock_purchasing::{
    ExportSummary, GenerationReport, PlanningConfig, ShoppingList, ShoppingListItemId, Suggestion,
    VendorCatalog,
};

#[derive(Debug, Clone, Parser)]
#[clap(about, version, name = "restock")]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Build a shopping list from low stock and print it grouped by vendor.
    Plan(PlanArgs),
    /// List inventory items at or below their reorder point.
    LowStock(LowStockArgs),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, clap::Args)]
pub struct PlanArgs {
    /// Inventory snapshot (JSON array of items).
    #[clap(long, short)]
    pub inventory: PathBuf,

    /// Vendor catalog (JSON object keyed by item name). Empty when omitted.
    #[clap(long, short)]
    pub catalog: Option<PathBuf>,

    #[clap(long, short, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Apply every actionable cost-saving suggestion before printing.
    #[clap(long, default_value_t = false)]
    pub apply_savings: bool,

    /// Only print entries whose name, category or notes contain this text.
    #[clap(long, short)]
    pub search: Option<String>,

    /// Overrides RESTOCK_SAVINGS_THRESHOLD.
    #[clap(long)]
    pub savings_threshold: Option<Decimal>,

    /// Overrides RESTOCK_FRAGMENTATION_THRESHOLD.
    #[clap(long)]
    pub fragmentation_threshold: Option<usize>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LowStockArgs {
    #[clap(long, short)]
    pub inventory: PathBuf,

    #[clap(long, short, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Everything `restock plan` prints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOutput {
    pub document_name: String,
    pub generation: GenerationReport,
    pub applied: Vec<Suggestion>,
    pub suggestions: Vec<Suggestion>,
    pub export: ExportSummary,
    /// Entries matching `--search`; `None` when no search was given.
    pub matches: Option<Vec<ShoppingListItemId>>,
    /// Event types applied to the list, in order.
    pub events: Vec<&'static str>,
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))
}

impl PlanArgs {
    pub fn planning_config(&self) -> PlanningConfig {
        let mut config = PlanningConfig::from_env();
        if let Some(threshold) = self.savings_threshold {
            config = config.with_savings_threshold(threshold);
        }
        if let Some(threshold) = self.fragmentation_threshold {
            config = config.with_fragmentation_threshold(threshold);
        }
        config
    }
}

pub fn run_plan(args: &PlanArgs) -> anyhow::Result<PlanOutput> {
    let inventory: InventorySnapshot = read_json(&args.inventory)?;
    let catalog: VendorCatalog = match &args.catalog {
        Some(path) => read_json(path)?,
        None => VendorCatalog::new(),
    };
    tracing::debug!(
        items = inventory.len(),
        catalog_entries = catalog.len(),
        "loaded planning inputs"
    );

    let mut list = ShoppingList::new(ListId::new()).with_config(args.planning_config());
    let generation = list
        .generate_from_low_stock(&inventory, &catalog)
        .context("generating shopping list")?;

    let mut applied = Vec::new();
    if args.apply_savings {
        while let Some(suggestion) = list.suggestions().iter().find(|s| s.is_actionable()).cloned() {
            list.apply_suggestion(&suggestion)
                .with_context(|| format!("applying suggestion {}", suggestion.id))?;
            tracing::info!(suggestion = %suggestion.id, "applied suggestion");
            applied.push(suggestion);
        }
    }

    let matches = args
        .search
        .as_deref()
        .map(|q| list.filter(q).into_iter().map(|i| i.id).collect());

    let export = ExportSummary::from_list(&list, Utc::now());
    Ok(PlanOutput {
        document_name: export.document_name(),
        generation,
        applied,
        suggestions: list.suggestions().to_vec(),
        export,
        matches,
        events: list.history().entries().iter().map(|e| e.event_type).collect(),
    })
}

pub fn run_low_stock(args: &LowStockArgs) -> anyhow::Result<Vec<InventoryItem>> {
    let inventory: InventorySnapshot = read_json(&args.inventory)?;
    Ok(inventory.low_stock_items().cloned().collect())
}

/// Execute a parsed command line and return what should go to stdout.
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    match &cli.command {
        Command::Plan(args) => {
            let output = run_plan(args)?;
            match args.format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&output)?),
                OutputFormat::Text => Ok(render::plan_text(&output)),
            }
        }
        Command::LowStock(args) => {
            let items = run_low_stock(args)?;
            match args.format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&items)?),
                OutputFormat::Text => Ok(render::low_stock_text(&items)),
            }
        }
    }
}
