//! # Purchasing
//!
//! Stock bought from suppliers, and stock sent back to them.
//!
//! ```text
//! add_purchase         ──► Purchase       stock += quantity   (priced at cost)
//! add_purchase_return  ──► PurchaseReturn stock -= quantity   (≤ still returnable)
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tally_core::{
    BusinessLocation, Discount, EntityId, LineItem, Purchase, PurchaseReturn, Supplier, TaxBasis,
    Totals,
};
use tracing::{debug, info};
use ts_rs::TS;

use crate::drafts::{check_discount, return_items, DraftLine, ReturnLine};
use crate::error::StoreResult;
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDraft {
    pub supplier_id: EntityId,
    pub business_location_id: EntityId,
    /// Supplier's invoice number; generated when absent.
    #[serde(default)]
    pub reference_no: Option<String>,
    /// `unit_price` on these lines is the unit cost.
    pub lines: Vec<DraftLine>,
    #[serde(default)]
    pub discount: Option<Discount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReturnDraft {
    pub original_purchase_id: EntityId,
    pub lines: Vec<ReturnLine>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Generates a purchase reference such as `PO-261016-1a2b3c4d`.
fn generate_reference(id: &EntityId) -> String {
    let short: String = id.as_str().chars().filter(|c| *c != '-').take(8).collect();
    format!("PO-{}-{}", Utc::now().format("%y%m%d"), short)
}

impl Store {
    /// Records a purchase and adds its quantities to stock.
    pub fn add_purchase(&mut self, draft: PurchaseDraft) -> StoreResult<Purchase> {
        debug!(supplier_id = %draft.supplier_id, lines = draft.lines.len(), "Creating purchase");

        self.require_ref::<Supplier>("supplierId", &draft.supplier_id)?;
        self.require_ref::<BusinessLocation>("businessLocationId", &draft.business_location_id)?;

        let items = self.price_lines(&draft.lines, TaxBasis::Cost)?;
        check_discount(draft.discount.as_ref(), &items)?;
        let totals = Totals::compute(&items, draft.discount.as_ref());

        let id = EntityId::generate();
        let reference_no = draft
            .reference_no
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| generate_reference(&id));

        let purchase = Purchase {
            id,
            date: Utc::now(),
            supplier_id: draft.supplier_id,
            business_location_id: draft.business_location_id,
            reference_no,
            items,
            discount: draft.discount,
            totals,
        };

        self.move_stock(&purchase.items, 1)?;
        self.data.purchases.push(purchase.clone());

        info!(
            id = %purchase.id,
            reference_no = %purchase.reference_no,
            total = %purchase.totals.total,
            "Purchase recorded"
        );
        Ok(purchase)
    }

    /// Sends goods from an earlier purchase back to its supplier.
    pub fn add_purchase_return(&mut self, draft: PurchaseReturnDraft) -> StoreResult<PurchaseReturn> {
        debug!(purchase_id = %draft.original_purchase_id, "Recording purchase return");

        let purchase = self.find::<Purchase>(&draft.original_purchase_id)?;
        let previous: Vec<&LineItem> = self
            .data
            .purchase_returns
            .iter()
            .filter(|r| r.original_purchase_id == purchase.id)
            .flat_map(|r| r.items.iter())
            .collect();
        let items = return_items(&purchase.items, &previous, &draft.lines)?;
        let totals = Totals::compute(&items, None);

        let ret = PurchaseReturn {
            id: EntityId::generate(),
            date: Utc::now(),
            supplier_id: purchase.supplier_id.clone(),
            original_purchase_id: purchase.id.clone(),
            items,
            totals,
            reason: draft.reason,
        };

        self.move_stock(&ret.items, -1)?;
        self.data.purchase_returns.push(ret.clone());

        info!(id = %ret.id, purchase_id = %ret.original_purchase_id, total = %ret.totals.total, "Purchase return recorded");
        Ok(ret)
    }
}
