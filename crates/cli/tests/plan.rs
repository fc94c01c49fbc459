use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

use restock_cli::{Cli, Command, LowStockArgs, OutputFormat, PlanArgs, run, run_low_stock, run_plan};

const INVENTORY: &str = r#"[
  {"id": "inv-1", "name": "Flour", "category": "FOOD_GRADE", "unit": "kg",
   "current_qty": 0, "reorder_point": 10, "top_up_level": 20, "capacity_max": 40, "avg_cost": "2.50"},
  {"id": "inv-2", "name": "Eggs", "category": "FOOD_GRADE", "unit": "dozen",
   "current_qty": 10, "reorder_point": 10, "top_up_level": 20, "capacity_max": 40, "avg_cost": "3.50"},
  {"id": "inv-3", "name": "Sugar", "category": "FOOD_GRADE", "unit": "kg",
   "current_qty": 5, "reorder_point": 10, "top_up_level": 20, "capacity_max": 40, "avg_cost": "1.80"},
  {"id": "inv-4", "name": "Salt", "category": "FOOD_GRADE", "unit": "kg",
   "current_qty": 5, "reorder_point": 10, "top_up_level": 4, "capacity_max": 3, "avg_cost": "0.90"},
  {"id": "inv-5", "name": "Oil", "category": "FOOD_GRADE", "unit": "L",
   "current_qty": 50, "reorder_point": 10, "top_up_level": 20, "capacity_max": 80, "avg_cost": "4.00"}
]"#;

const CATALOG: &str = r#"{
  "Flour": [
    {"vendorId": "v1", "vendorName": "ABC Suppliers", "price": "2.40", "unit": "kg", "leadTimeDays": 3, "isPreferred": true},
    {"vendorId": "v2", "vendorName": "Bulk Foods", "price": "2.00", "unit": "kg", "leadTimeDays": 7}
  ],
  "Eggs": [
    {"vendorId": "v6", "vendorName": "Farm Fresh Dairy", "price": "3.50", "unit": "dozen", "isPreferred": true}
  ],
  "Sugar": [
    {"vendorId": "v1", "vendorName": "ABC Suppliers", "price": "1.80", "unit": "kg", "isPreferred": true}
  ]
}"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn args(inventory: PathBuf, catalog: Option<PathBuf>) -> PlanArgs {
    PlanArgs {
        inventory,
        catalog,
        format: OutputFormat::Json,
        apply_savings: false,
        search: None,
        savings_threshold: Some(dec!(5)),
        fragmentation_threshold: Some(3),
    }
}

#[test]
fn plan_builds_vendor_grouped_export() {
    let inventory = write_temp(INVENTORY);
    let catalog = write_temp(CATALOG);

    let output = run_plan(&args(
        inventory.path().to_path_buf(),
        Some(catalog.path().to_path_buf()),
    ))
    .unwrap();

    // Flour 20, Eggs 10, Sugar 15; Salt excluded, Oil not low.
    assert_eq!(output.generation.item_count, 3);
    assert_eq!(output.generation.total_units, dec!(45));
    assert_eq!(output.generation.excluded.len(), 1);
    assert_eq!(output.generation.excluded[0].name, "Salt");

    let labels: Vec<&str> = output.export.buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["ABC Suppliers", "Farm Fresh Dairy"]);
    assert_eq!(output.export.buckets[0].subtotal, dec!(75.00));
    assert_eq!(output.export.grand_total, dec!(110.00));
    assert_eq!(output.export.totals.vendor_count, 2);

    assert_eq!(output.suggestions.len(), 1);
    assert_eq!(output.suggestions[0].title, "Save $8.00 on Flour");
    assert!(output.applied.is_empty());
    assert!(output.document_name.starts_with("shopping-list-"));
}

#[test]
fn apply_savings_switches_to_cheapest_vendor() {
    let inventory = write_temp(INVENTORY);
    let catalog = write_temp(CATALOG);
    let mut plan = args(
        inventory.path().to_path_buf(),
        Some(catalog.path().to_path_buf()),
    );
    plan.apply_savings = true;

    let output = run_plan(&plan).unwrap();

    assert_eq!(output.applied.len(), 1);
    assert!(output.suggestions.is_empty());
    assert_eq!(output.export.grand_total, dec!(102.00));
    assert_eq!(
        output.events,
        vec![
            "purchasing.shopping_list.regenerated",
            "purchasing.shopping_list.vendor_assigned",
        ]
    );

    let labels: Vec<&str> = output.export.buckets.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Bulk Foods", "Farm Fresh Dairy", "ABC Suppliers"]);
}

#[test]
fn higher_threshold_suppresses_savings_suggestion() {
    let inventory = write_temp(INVENTORY);
    let catalog = write_temp(CATALOG);
    let mut plan = args(
        inventory.path().to_path_buf(),
        Some(catalog.path().to_path_buf()),
    );
    plan.savings_threshold = Some(dec!(8));

    let output = run_plan(&plan).unwrap();
    assert!(output.suggestions.is_empty());
}

#[test]
fn missing_catalog_leaves_everything_unassigned() {
    let inventory = write_temp(INVENTORY);

    let output = run_plan(&args(inventory.path().to_path_buf(), None)).unwrap();

    assert_eq!(output.export.buckets.len(), 1);
    assert!(output.export.buckets[0].is_unassigned());
    // Fallback to avg_cost: 20×2.50 + 10×3.50 + 15×1.80
    assert_eq!(output.export.grand_total, dec!(112.00));
    assert_eq!(output.export.totals.vendor_count, 0);
}

#[test]
fn search_narrows_matches_but_not_totals() {
    let inventory = write_temp(INVENTORY);
    let catalog = write_temp(CATALOG);
    let mut plan = args(
        inventory.path().to_path_buf(),
        Some(catalog.path().to_path_buf()),
    );
    plan.search = Some("SUG".to_string());

    let output = run_plan(&plan).unwrap();
    let matches = output.matches.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(output.export.grand_total, dec!(110.00));
}

#[test]
fn text_output_lists_buckets_and_exclusions() {
    let inventory = write_temp(INVENTORY);
    let catalog = write_temp(CATALOG);
    let cli = Cli::try_parse_from([
        "restock",
        "plan",
        "--inventory",
        inventory.path().to_str().unwrap(),
        "--catalog",
        catalog.path().to_str().unwrap(),
        "--format",
        "text",
        "--savings-threshold",
        "5",
        "--fragmentation-threshold",
        "3",
    ])
    .unwrap();

    let text = run(&cli).unwrap();
    assert!(text.contains("ABC Suppliers  $75.00"));
    assert!(text.contains("Grand total: $110.00"));
    assert!(text.contains("Save $8.00 on Flour"));
    assert!(text.contains("Salt: computed purchase quantity"));
}

#[test]
fn text_output_sums_only_matching_rows_under_search() {
    let inventory = write_temp(INVENTORY);
    let catalog = write_temp(CATALOG);
    let cli = Cli::try_parse_from([
        "restock",
        "plan",
        "-i",
        inventory.path().to_str().unwrap(),
        "-c",
        catalog.path().to_str().unwrap(),
        "-f",
        "text",
        "-s",
        "sugar",
        "--savings-threshold",
        "5",
    ])
    .unwrap();

    let text = run(&cli).unwrap();
    // Sugar 15×1.80 only; Flour's 48.00 is hidden.
    assert!(text.contains("ABC Suppliers  $27.00"));
    assert!(!text.contains("ABC Suppliers  $75.00"));
    assert!(!text.contains("Farm Fresh Dairy"));
    assert!(text.contains("Shown total: $27.00"));
    assert!(text.contains("Grand total: $110.00"));
}

#[test]
fn text_output_points_at_cheaper_vendor() {
    let inventory = write_temp(INVENTORY);
    let catalog = write_temp(CATALOG);
    let cli = Cli::try_parse_from([
        "restock",
        "plan",
        "-i",
        inventory.path().to_str().unwrap(),
        "-c",
        catalog.path().to_str().unwrap(),
        "-f",
        "text",
    ])
    .unwrap();

    let text = run(&cli).unwrap();
    assert!(text.contains("cheaper at Bulk Foods (-$0.40/kg)"));
    assert!(!text.contains("Shown total"));
}

#[test]
fn json_output_is_valid_json() {
    let inventory = write_temp(INVENTORY);
    let cli = Cli::try_parse_from([
        "restock",
        "plan",
        "-i",
        inventory.path().to_str().unwrap(),
    ])
    .unwrap();

    let json = run(&cli).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value.get("export").is_some());
    assert!(value.get("generation").is_some());
}

#[test]
fn unreadable_inventory_is_reported_with_path() {
    let err = run_plan(&args(PathBuf::from("/nonexistent/inventory.json"), None)).unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/inventory.json"));
}

#[test]
fn malformed_inventory_is_rejected() {
    let inventory = write_temp("{not json");
    assert!(run_plan(&args(inventory.path().to_path_buf(), None)).is_err());
}

#[test]
fn low_stock_lists_items_at_or_below_reorder_point() {
    let inventory = write_temp(INVENTORY);
    let items = run_low_stock(&LowStockArgs {
        inventory: inventory.path().to_path_buf(),
        format: OutputFormat::Text,
    })
    .unwrap();

    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Flour", "Eggs", "Sugar", "Salt"]);
}

#[test]
fn parses_plan_flags() {
    let cli = Cli::try_parse_from([
        "restock",
        "plan",
        "--inventory",
        "inv.json",
        "--apply-savings",
        "--search",
        "flour",
        "--savings-threshold",
        "2.5",
    ])
    .unwrap();

    let Command::Plan(plan) = cli.command else {
        panic!("expected plan subcommand");
    };
    assert!(plan.apply_savings);
    assert_eq!(plan.search.as_deref(), Some("flour"));
    assert_eq!(plan.savings_threshold, Some(dec!(2.5)));
    assert_eq!(plan.format, OutputFormat::Json);
    assert_eq!(plan.planning_config().savings_threshold, dec!(2.5));
}
