//! Stock ledgers: manual adjustments and inter-location transfers.
//!
//! Both ledgers only ever grow. A wrong adjustment is corrected by an
//! opposite one, never by editing the row.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tally_core::validation::validate_quantity;
use tally_core::{
    AdjustmentKind, BusinessLocation, EntityId, Product, StockAdjustment, StockTransfer,
    ValidationError,
};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::StoreResult;
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustmentDraft {
    pub product_id: EntityId,
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    pub quantity: i64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockTransferDraft {
    pub product_id: EntityId,
    pub from_location_id: EntityId,
    pub to_location_id: EntityId,
    pub quantity: i64,
    #[serde(default)]
    pub note: Option<String>,
}

impl Store {
    /// Appends a manual correction and applies it to the product's stock.
    pub fn add_stock_adjustment(&mut self, draft: StockAdjustmentDraft) -> StoreResult<StockAdjustment> {
        debug!(product_id = %draft.product_id, kind = ?draft.kind, quantity = draft.quantity, "Adjusting stock");

        validate_quantity(draft.quantity)?;
        if draft.reason.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "reason".to_string(),
            }
            .into());
        }
        self.require_ref::<Product>("productId", &draft.product_id)?;

        let adjustment = StockAdjustment {
            id: EntityId::generate(),
            date: Utc::now(),
            product_id: draft.product_id,
            kind: draft.kind,
            quantity: draft.quantity,
            reason: draft.reason.trim().to_string(),
        };

        self.apply_stock_delta(&adjustment.product_id, adjustment.signed_quantity())?;
        self.data.stock_adjustments.push(adjustment.clone());

        info!(id = %adjustment.id, product_id = %adjustment.product_id, delta = adjustment.signed_quantity(), "Stock adjusted");
        Ok(adjustment)
    }

    /// Appends a transfer between two locations.
    ///
    /// Stock is tracked per product, not per location, so the product's
    /// count is unchanged.
    pub fn add_stock_transfer(&mut self, draft: StockTransferDraft) -> StoreResult<StockTransfer> {
        debug!(
            product_id = %draft.product_id,
            from = %draft.from_location_id,
            to = %draft.to_location_id,
            "Transferring stock"
        );

        validate_quantity(draft.quantity)?;
        if draft.from_location_id == draft.to_location_id {
            return Err(ValidationError::InvalidFormat {
                field: "toLocationId".to_string(),
                reason: "must differ from the source location".to_string(),
            }
            .into());
        }
        self.require_ref::<Product>("productId", &draft.product_id)?;
        self.require_ref::<BusinessLocation>("fromLocationId", &draft.from_location_id)?;
        self.require_ref::<BusinessLocation>("toLocationId", &draft.to_location_id)?;

        let transfer = StockTransfer {
            id: EntityId::generate(),
            date: Utc::now(),
            product_id: draft.product_id,
            from_location_id: draft.from_location_id,
            to_location_id: draft.to_location_id,
            quantity: draft.quantity,
            note: draft.note,
        };
        self.data.stock_transfers.push(transfer.clone());

        info!(id = %transfer.id, quantity = transfer.quantity, "Stock transfer recorded");
        Ok(transfer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::testing::{dimensions, product};

    fn adjustment(product_id: &EntityId, kind: AdjustmentKind, quantity: i64) -> StockAdjustmentDraft {
        StockAdjustmentDraft {
            product_id: product_id.clone(),
            kind,
            quantity,
            reason: "recount".to_string(),
        }
    }

    #[test]
    fn test_adjustments_apply_signed_quantity() {
        let mut store = dimensions();
        let p = store.add(product("A", 500, 10)).unwrap();

        store
            .add_stock_adjustment(adjustment(&p.id, AdjustmentKind::Subtraction, 4))
            .unwrap();
        store
            .add_stock_adjustment(adjustment(&p.id, AdjustmentKind::Addition, 1))
            .unwrap();

        assert_eq!(store.find::<Product>(&p.id).unwrap().stock, 7);
        assert_eq!(store.list::<StockAdjustment>().len(), 2);
    }

    #[test]
    fn test_adjustment_rejects_bad_input_without_mutation() {
        let mut store = dimensions();
        let p = store.add(product("A", 500, 10)).unwrap();

        assert!(store
            .add_stock_adjustment(adjustment(&p.id, AdjustmentKind::Addition, 0))
            .is_err());

        let mut blank = adjustment(&p.id, AdjustmentKind::Addition, 1);
        blank.reason = "  ".to_string();
        assert!(store.add_stock_adjustment(blank).is_err());

        assert!(matches!(
            store.add_stock_adjustment(adjustment(&EntityId::from("ghost"), AdjustmentKind::Addition, 1)),
            Err(StoreError::UnknownReference { .. })
        ));

        assert!(store.list::<StockAdjustment>().is_empty());
        assert_eq!(store.find::<Product>(&p.id).unwrap().stock, 10);
    }

    #[test]
    fn test_transfer_requires_distinct_known_locations() {
        let mut store = dimensions();
        let p = store.add(product("A", 500, 10)).unwrap();
        let annex = store
            .add(BusinessLocation {
                id: EntityId::default(),
                name: "Annex".to_string(),
                address: None,
            })
            .unwrap();

        let same = store.add_stock_transfer(StockTransferDraft {
            product_id: p.id.clone(),
            from_location_id: EntityId::from("loc-1"),
            to_location_id: EntityId::from("loc-1"),
            quantity: 2,
            note: None,
        });
        assert!(matches!(same, Err(StoreError::Validation(_))));

        let transfer = store
            .add_stock_transfer(StockTransferDraft {
                product_id: p.id.clone(),
                from_location_id: EntityId::from("loc-1"),
                to_location_id: annex.id,
                quantity: 2,
                note: Some("weekend restock".to_string()),
            })
            .unwrap();

        assert_eq!(transfer.quantity, 2);
        assert_eq!(store.list::<StockTransfer>().len(), 1);
        assert_eq!(store.find::<Product>(&p.id).unwrap().stock, 10);
    }
}
