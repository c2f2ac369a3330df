//! Terminal rendering: inventory table, reorder alerts, stock bar chart.

use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, Color, Table};

use stockbook_inventory::{InventoryItem, StockTransaction};

/// Width, in characters, of a full bar in the stock chart.
const BAR_WIDTH: usize = 40;

/// Write the full status screen: table, reorder alerts, bar chart.
pub fn write_status<W: Write>(items: &[InventoryItem], writer: &mut W) -> io::Result<()> {
    writeln!(writer, "Current Inventory")?;
    writeln!(writer, "{}", inventory_table(items))?;
    writeln!(writer)?;

    let alerts = reorder_alerts(items);
    if !alerts.is_empty() {
        writeln!(writer, "Reorder needed for:")?;
        for name in &alerts {
            writeln!(writer, "  * {name}")?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "Inventory Status")?;
    write_bar_chart(items, writer)
}

fn inventory_table(items: &[InventoryItem]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        "ID",
        "Item",
        "Price",
        "Units sold",
        "Units left",
        "Cost",
        "Reorder point",
        "Description",
    ]);

    for item in items {
        let units_left = Cell::new(item.units_left.to_string());
        let units_left = if item.needs_reorder() {
            units_left.fg(Color::Red)
        } else {
            units_left
        };
        table.add_row(vec![
            Cell::new(item.id.to_string()),
            Cell::new(&item.item_name),
            Cell::new(format!("{:.2}", item.price)),
            Cell::new(item.units_sold.to_string()),
            units_left,
            Cell::new(format!("{:.2}", item.cost_price)),
            Cell::new(item.reorder_point.to_string()),
            Cell::new(&item.description),
        ]);
    }

    table
}

/// Names of items currently below their reorder point, in listing order.
pub fn reorder_alerts(items: &[InventoryItem]) -> Vec<&str> {
    items
        .iter()
        .filter(|item| item.needs_reorder())
        .map(|item| item.item_name.as_str())
        .collect()
}

/// Horizontal bar chart of `units_left` per item.
pub fn write_bar_chart<W: Write>(items: &[InventoryItem], writer: &mut W) -> io::Result<()> {
    let max = items.iter().map(|item| item.units_left).max().unwrap_or(0);
    let name_width = items
        .iter()
        .map(|item| item.item_name.chars().count())
        .max()
        .unwrap_or(0);

    for item in items {
        let bar = "█".repeat(bar_len(item.units_left, max));
        writeln!(
            writer,
            "{name:>name_width$}  {bar:<bar_width$} {value}",
            name = item.item_name,
            bar = bar,
            bar_width = BAR_WIDTH,
            value = item.units_left,
        )?;
    }
    Ok(())
}

/// Bar length for one value, scaled against the largest stock count.
///
/// Non-positive stock draws an empty bar (the numeric value still shows);
/// any positive stock draws at least one cell.
fn bar_len(units_left: i64, max: i64) -> usize {
    if max <= 0 || units_left <= 0 {
        return 0;
    }
    let scaled = (units_left as f64 / max as f64) * BAR_WIDTH as f64;
    (scaled.round() as usize).clamp(1, BAR_WIDTH)
}

/// Write the transaction log table, newest first.
pub fn write_history<W: Write>(log: &[StockTransaction], writer: &mut W) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["ID", "SKU", "Quantity", "Type", "Recorded at"]);

    for entry in log {
        table.add_row(vec![
            Cell::new(entry.id.to_string()),
            Cell::new(entry.sku_id.to_string()),
            Cell::new(entry.quantity.to_string()),
            Cell::new(entry.kind.to_string()),
            Cell::new(entry.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ]);
    }

    writeln!(writer, "{table}")
}
