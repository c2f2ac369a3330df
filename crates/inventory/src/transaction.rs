use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{DomainError, ItemId, TransactionId};

/// Kind of stock transaction recorded in the audit log.
///
/// Persisted as `"add"` / `"remove"` in the `transactions` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Add,
    Remove,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Add => "add",
            TransactionKind::Remove => "remove",
        }
    }
}

impl core::str::FromStr for TransactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(TransactionKind::Add),
            "remove" => Ok(TransactionKind::Remove),
            other => Err(DomainError::validation(format!(
                "unknown transaction kind: {other}"
            ))),
        }
    }
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the append-only stock transaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: TransactionId,
    /// The item adjusted (SKU and item id are synonymous).
    pub sku_id: ItemId,
    /// Positive magnitude; the kind carries the direction.
    pub quantity: i64,
    pub kind: TransactionKind,
    /// Storage-assigned timestamp.
    pub recorded_at: DateTime<Utc>,
}
