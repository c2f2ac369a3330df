//! Subcommand implementations.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

use stockbook_core::ItemId;
use stockbook_inventory::{AdjustDirection, StockAdjustment};
use stockbook_store::InventoryStore;

use crate::render;

#[derive(Args, Debug, Clone)]
pub struct AdjustArgs {
    /// SKU (item id) to adjust
    #[arg(long)]
    pub sku: i64,

    /// Number of units (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub qty: u32,
}

#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Maximum number of entries to show
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

/// Read-then-render cycle: inventory table, reorder alerts, stock chart.
pub async fn status(store: &dyn InventoryStore) -> Result<()> {
    let items = store.list_items().await?;
    let mut out = io::stdout().lock();
    render::write_status(&items, &mut out)?;
    Ok(())
}

/// Write-then-render cycle: apply one adjustment, confirm, re-render.
pub async fn adjust(
    store: &dyn InventoryStore,
    args: AdjustArgs,
    direction: AdjustDirection,
) -> Result<()> {
    let adjustment = StockAdjustment::new(ItemId::new(args.sku), i64::from(args.qty), direction);
    store.adjust(&adjustment).await?;

    match direction {
        AdjustDirection::Increase => println!("Added {} units to SKU {}", args.qty, args.sku),
        AdjustDirection::Decrease => println!("Removed {} units from SKU {}", args.qty, args.sku),
    }
    println!();

    status(store).await
}

pub async fn skus(store: &dyn InventoryStore) -> Result<()> {
    let skus = store.list_skus().await?;
    let mut out = io::stdout().lock();
    for entry in &skus {
        writeln!(out, "{}", entry.label())?;
    }
    Ok(())
}

pub async fn history(store: &dyn InventoryStore, args: HistoryArgs) -> Result<()> {
    let log = store.list_transactions(args.limit).await?;
    let mut out = io::stdout().lock();
    render::write_history(&log, &mut out)?;
    Ok(())
}
