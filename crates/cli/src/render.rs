//! Plain-text rendering for terminal output.

use std::collections::BTreeSet;
use std::fmt::Write;

use rust_decimal::Decimal;

use restock_inventory::InventoryItem;
use restock_purchasing::ShoppingListItemId;

use crate::PlanOutput;

fn money(amount: Decimal) -> String {
    format!("${amount:.2}")
}

pub fn plan_text(output: &PlanOutput) -> String {
    let export = &output.export;
    let totals = &export.totals;
    let visible: Option<BTreeSet<ShoppingListItemId>> =
        output.matches.as_ref().map(|ids| ids.iter().copied().collect());

    let mut out = String::new();
    let mut shown_total = Decimal::ZERO;
    let _ = writeln!(out, "{}", output.document_name);
    let _ = writeln!(
        out,
        "Items: {}  Low stock: {}  Vendors: {}  Total: {}",
        totals.item_count,
        totals.low_stock_count,
        totals.vendor_count,
        money(totals.total_cost)
    );

    for bucket in &export.buckets {
        let rows: Vec<_> = bucket
            .rows
            .iter()
            .filter(|r| visible.as_ref().is_none_or(|v| v.contains(&r.item_id)))
            .collect();
        if rows.is_empty() {
            continue;
        }

        // Under --search only the matching rows are summed.
        let shown: Decimal = rows.iter().map(|r| r.total).sum();
        shown_total += shown;
        let _ = writeln!(out);
        let _ = writeln!(out, "{}  {}", bucket.label, money(shown));
        for row in rows {
            let qty = format!("{} {}", row.quantity.normalize(), row.unit);
            let unit_price = row.unit_price.map(money).unwrap_or_else(|| "-".to_string());
            let flag = if row.low_stock { "  LOW" } else { "" };
            let _ = writeln!(
                out,
                "  {:<28} {:>12} @ {:>9} {:>10}{flag}",
                row.name,
                qty,
                unit_price,
                money(row.total)
            );
            if let (Some(vendor), Some(saving)) = (&row.cheaper_vendor, row.saving_per_unit) {
                let _ = writeln!(out, "      cheaper at {vendor} (-{}/{})", money(saving), row.unit);
            }
        }
    }

    let _ = writeln!(out);
    if visible.is_some() {
        let _ = writeln!(out, "Shown total: {}", money(shown_total));
    }
    let _ = writeln!(out, "Grand total: {}", money(export.grand_total));

    if !output.applied.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Applied:");
        for s in &output.applied {
            let _ = writeln!(out, "  - {}", s.title);
        }
    }

    if !output.suggestions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Suggestions:");
        for s in &output.suggestions {
            let _ = writeln!(out, "  - {}: {}", s.title, s.description);
        }
    }

    if !output.generation.excluded.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Excluded:");
        for e in &output.generation.excluded {
            let _ = writeln!(out, "  - {}: {}", e.name, e.reason());
        }
    }

    out
}

pub fn low_stock_text(items: &[InventoryItem]) -> String {
    if items.is_empty() {
        return "No items at or below their reorder point.\n".to_string();
    }
    let mut out = String::new();
    for item in items {
        let _ = writeln!(out, "{:<28} {}", item.name, item.stock_summary());
    }
    out
}
