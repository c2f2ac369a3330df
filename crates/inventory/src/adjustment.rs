use serde::{Deserialize, Serialize};

use stockbook_core::{DomainError, DomainResult, ItemId};

use crate::item::InventoryItem;
use crate::transaction::TransactionKind;

/// Direction of a stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustDirection {
    Increase,
    Decrease,
}

/// Command: adjust the stock level of one item.
///
/// The quantity is an unsigned magnitude; the direction decides the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub item_id: ItemId,
    pub quantity: i64,
    pub direction: AdjustDirection,
}

impl StockAdjustment {
    pub fn new(item_id: ItemId, quantity: i64, direction: AdjustDirection) -> Self {
        Self {
            item_id,
            quantity,
            direction,
        }
    }

    /// The only input validation in the system: quantity must be >= 1.
    pub fn validate(&self) -> DomainResult<()> {
        if self.quantity < 1 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        Ok(())
    }

    /// The signed stock delta this adjustment applies.
    pub fn signed_delta(&self) -> i64 {
        match self.direction {
            AdjustDirection::Increase => self.quantity,
            AdjustDirection::Decrease => -self.quantity,
        }
    }

    /// The transaction kind recorded in the audit log for this adjustment.
    pub fn transaction_kind(&self) -> TransactionKind {
        match self.direction {
            AdjustDirection::Increase => TransactionKind::Add,
            AdjustDirection::Decrease => TransactionKind::Remove,
        }
    }

    /// Apply the adjustment to an item, unconditionally.
    ///
    /// No floor or ceiling check: stock may go negative.
    pub fn apply_to(&self, item: &mut InventoryItem) {
        item.units_left += self.signed_delta();
    }
}
