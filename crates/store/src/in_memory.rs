//! In-memory inventory store for tests/dev.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use stockbook_core::TransactionId;
use stockbook_inventory::{InventoryItem, SkuEntry, StockAdjustment, StockTransaction};

use crate::error::StoreResult;
use crate::store::InventoryStore;

/// In-memory inventory store.
///
/// Rows live in process memory; nothing survives the process. Useful for
/// tests and for exercising callers without touching the filesystem.
#[derive(Debug, Default)]
pub struct InMemoryInventoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    items: Vec<InventoryItem>,
    skus: Vec<SkuEntry>,
    transactions: Vec<StockTransaction>,
}

impl InMemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given rows (seeding stand-in).
    pub fn with_rows(items: Vec<InventoryItem>, skus: Vec<SkuEntry>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                items,
                skus,
                transactions: Vec::new(),
            }),
        }
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn list_items(&self) -> StoreResult<Vec<InventoryItem>> {
        Ok(self.inner.read().unwrap().items.clone())
    }

    async fn adjust(&self, adjustment: &StockAdjustment) -> StoreResult<()> {
        adjustment.validate()?;

        let mut inner = self.inner.write().unwrap();
        if let Some(item) = inner
            .items
            .iter_mut()
            .find(|item| item.id == adjustment.item_id)
        {
            adjustment.apply_to(item);
        }
        // No matching row is a silent no-op on inventory; the transaction is
        // appended either way.

        let id = TransactionId::new(inner.transactions.len() as i64 + 1);
        inner.transactions.push(StockTransaction {
            id,
            sku_id: adjustment.item_id,
            quantity: adjustment.quantity,
            kind: adjustment.transaction_kind(),
            recorded_at: Utc::now(),
        });

        Ok(())
    }

    async fn list_skus(&self) -> StoreResult<Vec<SkuEntry>> {
        Ok(self.inner.read().unwrap().skus.clone())
    }

    async fn list_transactions(&self, limit: usize) -> StoreResult<Vec<StockTransaction>> {
        Ok(self
            .inner
            .read()
            .unwrap()
            .transactions
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use stockbook_core::ItemId;
    use stockbook_inventory::{AdjustDirection, TransactionKind};

    use super::*;

    fn seeded() -> InMemoryInventoryStore {
        InMemoryInventoryStore::with_rows(
            vec![
                InventoryItem {
                    id: ItemId::new(1),
                    item_name: "Bottled Water".to_string(),
                    price: 1.5,
                    units_sold: 120,
                    units_left: 15,
                    cost_price: 0.8,
                    reorder_point: 16,
                    description: "500ml still water".to_string(),
                },
                InventoryItem {
                    id: ItemId::new(2),
                    item_name: "Soda".to_string(),
                    price: 2.0,
                    units_sold: 95,
                    units_left: 42,
                    cost_price: 1.2,
                    reorder_point: 20,
                    description: "330ml can".to_string(),
                },
            ],
            vec![SkuEntry {
                sku_id: ItemId::new(1),
                sku_description: "Bottled Water".to_string(),
            }],
        )
    }

    fn adjust(id: i64, quantity: i64, direction: AdjustDirection) -> StockAdjustment {
        StockAdjustment::new(ItemId::new(id), quantity, direction)
    }

    async fn units_left(store: &InMemoryInventoryStore, id: i64) -> i64 {
        store
            .list_items()
            .await
            .unwrap()
            .into_iter()
            .find(|item| item.id == ItemId::new(id))
            .unwrap()
            .units_left
    }

    #[tokio::test]
    async fn increase_adds_exactly_quantity() {
        let store = seeded();
        store
            .adjust(&adjust(1, 5, AdjustDirection::Increase))
            .await
            .unwrap();
        assert_eq!(units_left(&store, 1).await, 20);
    }

    #[tokio::test]
    async fn decrease_goes_below_zero_without_floor() {
        let store = seeded();
        store
            .adjust(&adjust(1, 40, AdjustDirection::Decrease))
            .await
            .unwrap();
        assert_eq!(units_left(&store, 1).await, -25);
    }

    #[tokio::test]
    async fn unknown_id_leaves_all_rows_unchanged() {
        let store = seeded();
        let before = store.list_items().await.unwrap();
        store
            .adjust(&adjust(99, 5, AdjustDirection::Increase))
            .await
            .unwrap();
        assert_eq!(store.list_items().await.unwrap(), before);
    }

    #[tokio::test]
    async fn reorder_flag_clears_after_restock() {
        let store = seeded();
        let items = store.list_items().await.unwrap();
        assert!(items[0].needs_reorder());

        store
            .adjust(&adjust(1, 5, AdjustDirection::Increase))
            .await
            .unwrap();

        let items = store.list_items().await.unwrap();
        assert_eq!(items[0].units_left, 20);
        assert!(!items[0].needs_reorder());
    }

    #[tokio::test]
    async fn every_adjustment_appends_one_transaction() {
        let store = seeded();
        store
            .adjust(&adjust(1, 5, AdjustDirection::Increase))
            .await
            .unwrap();
        store
            .adjust(&adjust(2, 3, AdjustDirection::Decrease))
            .await
            .unwrap();

        let log = store.list_transactions(10).await.unwrap();
        assert_eq!(log.len(), 2);
        // Newest first.
        assert_eq!(log[0].sku_id, ItemId::new(2));
        assert_eq!(log[0].quantity, 3);
        assert_eq!(log[0].kind, TransactionKind::Remove);
        assert_eq!(log[1].kind, TransactionKind::Add);
    }

    #[tokio::test]
    async fn invalid_quantity_is_rejected_and_changes_nothing() {
        let store = seeded();
        let before = store.list_items().await.unwrap();

        let err = store
            .adjust(&adjust(1, 0, AdjustDirection::Increase))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::StoreError::Domain(_)));

        assert_eq!(store.list_items().await.unwrap(), before);
        assert!(store.list_transactions(10).await.unwrap().is_empty());
    }
}
