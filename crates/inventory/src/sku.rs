use serde::{Deserialize, Serialize};

use stockbook_core::ItemId;

/// One entry in the SKU dictionary.
///
/// Read-only lookup data used by the presentation layer to label SKUs when
/// transacting stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuEntry {
    pub sku_id: ItemId,
    pub sku_description: String,
}

impl SkuEntry {
    /// Display label in `"<id> - <description>"` form.
    pub fn label(&self) -> String {
        format!("{} - {}", self.sku_id, self.sku_description)
    }
}
