//! The Store component boundary.

use async_trait::async_trait;

use stockbook_inventory::{InventoryItem, SkuEntry, StockAdjustment, StockTransaction};

use crate::error::StoreResult;

/// Inventory store abstraction.
///
/// One implementation per backing medium; callers hold `&dyn InventoryStore`
/// and stay agnostic of where rows live.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All inventory rows, in insertion (id) order. No pagination, no
    /// filtering; the reorder flag is recomputed by the caller from the
    /// returned rows.
    async fn list_items(&self) -> StoreResult<Vec<InventoryItem>>;

    /// Apply a stock adjustment: `units_left := units_left ± quantity` on the
    /// matching row, then append one entry to the transaction log.
    ///
    /// An `item_id` that matches no row is NOT an error: the update targets
    /// zero rows and inventory is left unchanged (the transaction is still
    /// logged). The quantity must be at least 1; no other validation, no
    /// floor on the resulting stock.
    async fn adjust(&self, adjustment: &StockAdjustment) -> StoreResult<()>;

    /// The SKU dictionary, in id order.
    async fn list_skus(&self) -> StoreResult<Vec<SkuEntry>>;

    /// The most recent `limit` transaction log entries, newest first.
    async fn list_transactions(&self, limit: usize) -> StoreResult<Vec<StockTransaction>>;
}
