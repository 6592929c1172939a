//! Inventory ledgers. Both are append-only: rows are never edited or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{impl_entity, EntityId};

/// Direction of a manual stock correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Addition,
    Subtraction,
}

/// A manual stock correction (damage, recount, shrinkage...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustment {
    pub id: EntityId,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub product_id: EntityId,
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    /// Always positive; the direction comes from `kind`.
    pub quantity: i64,
    pub reason: String,
}

impl_entity!(StockAdjustment, StockAdjustment, dated);

impl StockAdjustment {
    /// The change this row applies to the product's stock.
    pub fn signed_quantity(&self) -> i64 {
        match self.kind {
            AdjustmentKind::Addition => self.quantity,
            AdjustmentKind::Subtraction => -self.quantity,
        }
    }
}

/// A movement of stock between two business locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockTransfer {
    pub id: EntityId,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub product_id: EntityId,
    pub from_location_id: EntityId,
    pub to_location_id: EntityId,
    pub quantity: i64,
    #[serde(default)]
    pub note: Option<String>,
}

impl_entity!(StockTransfer, StockTransfer, dated);
