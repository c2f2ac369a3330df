//! `stockbook` — terminal front end for the inventory store.
//!
//! Thin presentation layer: every subcommand reads from the store, renders,
//! and (for receive/remove) forwards one adjustment before re-rendering.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use stockbook_inventory::AdjustDirection;
use stockbook_store::SqliteInventoryStore;

mod commands;
mod render;

#[derive(Parser, Debug)]
#[command(name = "stockbook", version, about = "Local inventory tracker")]
struct Cli {
    /// Path to the inventory database file
    #[arg(long, global = true, value_name = "FILE")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the inventory table, reorder alerts and stock chart
    Status,
    /// Record received stock for a SKU
    Receive(commands::AdjustArgs),
    /// Record removed stock for a SKU
    Remove(commands::AdjustArgs),
    /// List the SKU dictionary
    Skus,
    /// Show recent stock transactions
    History(commands::HistoryArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    stockbook_observability::init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db);

    let store = SqliteInventoryStore::open(&db_path)
        .await
        .with_context(|| format!("failed to open inventory database at {}", db_path.display()))?;

    match cli.command.unwrap_or(Command::Status) {
        Command::Status => commands::status(&store).await,
        Command::Receive(args) => commands::adjust(&store, args, AdjustDirection::Increase).await,
        Command::Remove(args) => commands::adjust(&store, args, AdjustDirection::Decrease).await,
        Command::Skus => commands::skus(&store).await,
        Command::History(args) => commands::history(&store, args).await,
    }
}

/// Database path: `--db` flag, then `STOCKBOOK_DB`, then `./inventory.db`.
fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    match std::env::var("STOCKBOOK_DB") {
        Ok(value) if !value.is_empty() => PathBuf::from(value),
        _ => {
            tracing::debug!("STOCKBOOK_DB not set; using ./inventory.db");
            PathBuf::from("inventory.db")
        }
    }
}
