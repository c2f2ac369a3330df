use serde::{Deserialize, Serialize};

use stockbook_core::ItemId;

/// A single tracked inventory record.
///
/// Items are created only at initial seeding; there is no runtime
/// create/delete. `units_left` is the only field mutated afterwards, and
/// exclusively through [`crate::StockAdjustment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique, immutable identifier (storage-assigned).
    pub id: ItemId,
    pub item_name: String,
    /// Unit sale price.
    pub price: f64,
    /// Cumulative units sold counter.
    pub units_sold: i64,
    /// Current stock count. May go negative; no floor is enforced.
    pub units_left: i64,
    /// Unit cost.
    pub cost_price: f64,
    /// Threshold below which the item is flagged for restock.
    pub reorder_point: i64,
    pub description: String,
}

impl InventoryItem {
    /// True when stock has fallen below the reorder point.
    ///
    /// Strictly below: an item sitting exactly at its reorder point is not
    /// flagged. Recomputed on every read, never persisted.
    pub fn needs_reorder(&self) -> bool {
        self.units_left < self.reorder_point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(units_left: i64, reorder_point: i64) -> InventoryItem {
        InventoryItem {
            id: ItemId::new(1),
            item_name: "Bottled Water".to_string(),
            price: 1.5,
            units_sold: 0,
            units_left,
            cost_price: 0.8,
            reorder_point,
            description: "500ml still water".to_string(),
        }
    }

    #[test]
    fn flags_reorder_below_threshold() {
        assert!(item(15, 16).needs_reorder());
    }

    #[test]
    fn does_not_flag_at_threshold() {
        assert!(!item(16, 16).needs_reorder());
    }

    #[test]
    fn does_not_flag_above_threshold() {
        assert!(!item(20, 16).needs_reorder());
    }

    #[test]
    fn negative_stock_is_flagged() {
        assert!(item(-3, 0).needs_reorder());
    }
}
