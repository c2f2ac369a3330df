//! SQLite-backed inventory store (one local database file).

use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use stockbook_core::{ItemId, TransactionId};
use stockbook_inventory::{
    AdjustDirection, InventoryItem, SkuEntry, StockAdjustment, StockTransaction, TransactionKind,
};

use crate::error::StoreResult;
use crate::store::InventoryStore;

/// SQLite-backed inventory store.
///
/// Owns a connection pool over a single local database file. Opening the
/// store creates the file and schema when missing and seeds the demo
/// catalogue on first run. There is no concurrent-writer protocol: two
/// processes against the same file race last-write-wins.
#[derive(Debug, Clone)]
pub struct SqliteInventoryStore {
    pool: SqlitePool,
}

impl SqliteInventoryStore {
    /// Open (and if necessary create and seed) the database at `path`.
    pub async fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| crate::StoreError::Storage(e.to_string()))?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect(options).await
    }

    /// Open a private in-memory database (tests).
    pub async fn open_in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::new().in_memory(true);
        Self::connect(options).await
    }

    async fn connect(options: SqliteConnectOptions) -> StoreResult<Self> {
        // Single connection: the app is single-user request-response, and an
        // in-memory database exists per connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;
        store.seed_if_empty().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS inventory (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                item_name TEXT,
                price REAL,
                units_sold INTEGER,
                units_left INTEGER,
                cost_price REAL,
                reorder_point INTEGER,
                description TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sku_id INTEGER,
                quantity INTEGER,
                transaction_type TEXT,
                timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sku_dictionary (
                sku_id INTEGER PRIMARY KEY AUTOINCREMENT,
                sku_description TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Seed the demo catalogue on first run (empty inventory table).
    async fn seed_if_empty(&self) -> StoreResult<()> {
        let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM inventory")
            .fetch_one(&self.pool)
            .await?
            .try_get("n")?;
        if count > 0 {
            return Ok(());
        }

        tracing::info!("empty inventory database, seeding sample data");

        sqlx::query(
            r#"
            INSERT INTO inventory
                (item_name, price, units_sold, units_left, cost_price, reorder_point, description)
            VALUES
                ('Bottled Water', 1.50, 120, 15, 0.80, 16, '500ml still water'),
                ('Soda', 2.00, 95, 42, 1.20, 20, '330ml can'),
                ('Energy Drink', 3.25, 60, 8, 2.10, 10, '250ml can'),
                ('Granola Bar', 1.25, 180, 55, 0.60, 25, 'Oat and honey bar')
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO sku_dictionary (sku_description)
            VALUES
                ('Bottled Water'),
                ('Soda'),
                ('Energy Drink'),
                ('Granola Bar')
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl InventoryStore for SqliteInventoryStore {
    async fn list_items(&self) -> StoreResult<Vec<InventoryItem>> {
        let rows = sqlx::query(
            "SELECT id, item_name, price, units_sold, units_left, cost_price, reorder_point, description \
             FROM inventory ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(InventoryItem {
                id: ItemId::new(row.try_get("id")?),
                item_name: row.try_get("item_name")?,
                price: row.try_get("price")?,
                units_sold: row.try_get("units_sold")?,
                units_left: row.try_get("units_left")?,
                cost_price: row.try_get("cost_price")?,
                reorder_point: row.try_get("reorder_point")?,
                description: row.try_get("description")?,
            });
        }
        Ok(items)
    }

    async fn adjust(&self, adjustment: &StockAdjustment) -> StoreResult<()> {
        adjustment.validate()?;

        let sql = match adjustment.direction {
            AdjustDirection::Increase => {
                "UPDATE inventory SET units_left = units_left + ?1 WHERE id = ?2"
            }
            AdjustDirection::Decrease => {
                "UPDATE inventory SET units_left = units_left - ?1 WHERE id = ?2"
            }
        };

        let result = sqlx::query(sql)
            .bind(adjustment.quantity)
            .bind(adjustment.item_id.as_i64())
            .execute(&self.pool)
            .await?;

        // Zero matched rows is a silent no-op on inventory, per contract.
        if result.rows_affected() == 0 {
            tracing::debug!(item_id = %adjustment.item_id, "adjustment matched no inventory row");
        } else {
            tracing::info!(
                item_id = %adjustment.item_id,
                quantity = adjustment.quantity,
                kind = %adjustment.transaction_kind(),
                "stock adjusted",
            );
        }

        sqlx::query("INSERT INTO transactions (sku_id, quantity, transaction_type) VALUES (?1, ?2, ?3)")
            .bind(adjustment.item_id.as_i64())
            .bind(adjustment.quantity)
            .bind(adjustment.transaction_kind().as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_skus(&self) -> StoreResult<Vec<SkuEntry>> {
        let rows = sqlx::query("SELECT sku_id, sku_description FROM sku_dictionary ORDER BY sku_id")
            .fetch_all(&self.pool)
            .await?;

        let mut skus = Vec::with_capacity(rows.len());
        for row in rows {
            skus.push(SkuEntry {
                sku_id: ItemId::new(row.try_get("sku_id")?),
                sku_description: row.try_get("sku_description")?,
            });
        }
        Ok(skus)
    }

    async fn list_transactions(&self, limit: usize) -> StoreResult<Vec<StockTransaction>> {
        let rows = sqlx::query(
            "SELECT id, sku_id, quantity, transaction_type, timestamp \
             FROM transactions ORDER BY id DESC LIMIT ?1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut log = Vec::with_capacity(rows.len());
        for row in rows {
            let kind: String = row.try_get("transaction_type")?;
            let recorded_at: NaiveDateTime = row.try_get("timestamp")?;
            log.push(StockTransaction {
                id: TransactionId::new(row.try_get("id")?),
                sku_id: ItemId::new(row.try_get("sku_id")?),
                quantity: row.try_get("quantity")?,
                kind: kind.parse::<TransactionKind>()?,
                recorded_at: recorded_at.and_utc(),
            });
        }
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use stockbook_inventory::AdjustDirection;

    use super::*;

    fn adjust(id: i64, quantity: i64, direction: AdjustDirection) -> StockAdjustment {
        StockAdjustment::new(ItemId::new(id), quantity, direction)
    }

    async fn units_left(store: &SqliteInventoryStore, id: i64) -> i64 {
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
    async fn first_run_seeds_demo_catalogue() {
        let store = SqliteInventoryStore::open_in_memory().await.unwrap();

        let items = store.list_items().await.unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].id, ItemId::new(1));
        assert_eq!(items[0].item_name, "Bottled Water");
        assert_eq!(items[0].units_left, 15);
        assert_eq!(items[0].reorder_point, 16);

        let skus = store.list_skus().await.unwrap();
        assert_eq!(skus.len(), 4);
        assert_eq!(skus[2].label(), "3 - Energy Drink");
    }

    #[tokio::test]
    async fn increase_adds_exactly_quantity_and_clears_reorder_flag() {
        let store = SqliteInventoryStore::open_in_memory().await.unwrap();

        // Seed item 1 sits at 15 with reorder point 16.
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
    async fn decrease_subtracts_exactly_quantity_even_below_zero() {
        let store = SqliteInventoryStore::open_in_memory().await.unwrap();

        store
            .adjust(&adjust(3, 11, AdjustDirection::Decrease))
            .await
            .unwrap();
        assert_eq!(units_left(&store, 3).await, -3);
    }

    #[tokio::test]
    async fn unknown_id_leaves_all_rows_unchanged() {
        let store = SqliteInventoryStore::open_in_memory().await.unwrap();

        let before = store.list_items().await.unwrap();
        store
            .adjust(&adjust(999, 5, AdjustDirection::Increase))
            .await
            .unwrap();
        assert_eq!(store.list_items().await.unwrap(), before);

        // The transaction is still logged even when no inventory row matched.
        let log = store.list_transactions(10).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].sku_id, ItemId::new(999));
    }

    #[tokio::test]
    async fn transactions_come_back_newest_first() {
        let store = SqliteInventoryStore::open_in_memory().await.unwrap();

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
        assert_eq!(log[0].sku_id, ItemId::new(2));
        assert_eq!(log[0].kind, TransactionKind::Remove);
        assert_eq!(log[1].sku_id, ItemId::new(1));
        assert_eq!(log[1].kind, TransactionKind::Add);

        let limited = store.list_transactions(1).await.unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].sku_id, ItemId::new(2));
    }

    #[tokio::test]
    async fn invalid_quantity_is_rejected_before_storage() {
        let store = SqliteInventoryStore::open_in_memory().await.unwrap();

        let err = store
            .adjust(&adjust(1, 0, AdjustDirection::Increase))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::StoreError::Domain(_)));
        assert_eq!(units_left(&store, 1).await, 15);
        assert!(store.list_transactions(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reopening_the_same_file_sees_persisted_stock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.db");

        {
            let store = SqliteInventoryStore::open(&path).await.unwrap();
            store
                .adjust(&adjust(2, 8, AdjustDirection::Increase))
                .await
                .unwrap();
        }

        let store = SqliteInventoryStore::open(&path).await.unwrap();
        // Seeding must not run again on a populated file.
        let items = store.list_items().await.unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(units_left(&store, 2).await, 50);
    }
}
