//! # Sales
//!
//! Recording, voiding and returning sales.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. DRAFT                                                               │
//! │     └── SaleDraft { customer, location, lines, payments, discount }     │
//! │                                                                         │
//! │  2. add_sale()                                                          │
//! │     ├── validate customer, location, lines, payments                    │
//! │     ├── snapshot products, compute subtotal / discount / tax / total    │
//! │     ├── push Sale { status: Completed }                                 │
//! │     └── stock -= quantity for every line (no floor)                     │
//! │                                                                         │
//! │  3. (OPTIONAL) void_sale()                                              │
//! │     └── Completed → Voided. Stock is NOT restored.                      │
//! │                                                                         │
//! │  4. (OPTIONAL) add_customer_return()                                    │
//! │     └── against a completed sale, stock += quantity                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tally_core::validation::validate_amount;
use tally_core::{
    BusinessLocation, Customer, CustomerGroup, CustomerRef, CustomerReturn, Discount, EntityId,
    EntityKind, LineItem, Payment, PaymentMethod, Product, Sale, SaleStatus, TaxBasis, Totals,
};
use tracing::{debug, info};
use ts_rs::TS;

use crate::drafts::{check_discount, return_items, DraftLine, ReturnLine};
use crate::error::{StoreError, StoreResult};
use crate::store::Store;

/// A sale as entered at the till, before pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    pub customer_id: EntityId,
    pub business_location_id: EntityId,
    pub lines: Vec<DraftLine>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    /// When absent, the customer's group discount applies (if any).
    #[serde(default)]
    pub discount: Option<Discount>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReturnDraft {
    pub original_sale_id: EntityId,
    pub lines: Vec<ReturnLine>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Store {
    /// Records a completed sale and takes its quantities out of stock.
    pub fn add_sale(&mut self, draft: SaleDraft) -> StoreResult<Sale> {
        debug!(customer_id = %draft.customer_id, lines = draft.lines.len(), "Creating sale");

        let customer = self.find::<Customer>(&draft.customer_id)?;
        let customer_ref = CustomerRef {
            id: customer.id.clone(),
            name: customer.name.clone(),
        };
        let discount = draft.discount.or_else(|| self.group_discount(customer));

        self.require_ref::<BusinessLocation>("businessLocationId", &draft.business_location_id)?;
        for payment in &draft.payments {
            self.require_ref::<PaymentMethod>("methodId", &payment.method_id)?;
            validate_amount("amount", payment.amount)?;
        }

        let items = self.price_lines(&draft.lines, TaxBasis::Price)?;
        check_discount(discount.as_ref(), &items)?;
        let totals = Totals::compute(&items, discount.as_ref());

        let sale = Sale {
            id: EntityId::generate(),
            date: Utc::now(),
            customer: customer_ref,
            business_location_id: draft.business_location_id,
            items,
            payments: draft.payments,
            status: SaleStatus::Completed,
            discount,
            totals,
            note: draft.note,
        };

        self.move_stock(&sale.items, -1)?;
        self.data.sales.push(sale.clone());

        info!(id = %sale.id, total = %sale.totals.total, items = sale.item_count(), "Sale completed");
        Ok(sale)
    }

    /// `Completed → Voided`. Stock is not restored.
    pub fn void_sale(&mut self, id: &EntityId) -> StoreResult<Sale> {
        debug!(id = %id, "Voiding sale");

        let sale = self
            .data
            .sales
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Sale, id))?;

        if sale.status != SaleStatus::Completed {
            return Err(StoreError::InvalidSaleStatus {
                id: id.to_string(),
                status: status_name(sale.status).to_string(),
                expected: status_name(SaleStatus::Completed).to_string(),
            });
        }

        sale.status = SaleStatus::Voided;
        info!(id = %id, total = %sale.totals.total, "Sale voided");
        Ok(sale.clone())
    }

    /// Takes goods back against a completed sale and returns them to stock.
    pub fn add_customer_return(&mut self, draft: CustomerReturnDraft) -> StoreResult<CustomerReturn> {
        debug!(sale_id = %draft.original_sale_id, "Recording customer return");

        let sale = self.find::<Sale>(&draft.original_sale_id)?;
        if !sale.is_completed() {
            return Err(StoreError::InvalidSaleStatus {
                id: sale.id.to_string(),
                status: status_name(sale.status).to_string(),
                expected: status_name(SaleStatus::Completed).to_string(),
            });
        }

        let previous: Vec<&LineItem> = self
            .data
            .customer_returns
            .iter()
            .filter(|r| r.original_sale_id == sale.id)
            .flat_map(|r| r.items.iter())
            .collect();
        let items = return_items(&sale.items, &previous, &draft.lines)?;
        let totals = Totals::compute(&items, None);

        let ret = CustomerReturn {
            id: EntityId::generate(),
            date: Utc::now(),
            customer: sale.customer.clone(),
            original_sale_id: sale.id.clone(),
            items,
            totals,
            reason: draft.reason,
        };

        self.move_stock(&ret.items, 1)?;
        self.data.customer_returns.push(ret.clone());

        info!(id = %ret.id, sale_id = %ret.original_sale_id, total = %ret.totals.total, "Customer return recorded");
        Ok(ret)
    }

    fn group_discount(&self, customer: &Customer) -> Option<Discount> {
        let group = self.get::<CustomerGroup>(customer.customer_group_id.as_ref()?)?;
        (!group.discount.is_zero()).then_some(Discount::Percentage(group.discount))
    }

    /// Applies `sign × quantity` of every item to its product's stock.
    ///
    /// Every product must still exist; otherwise nothing is applied.
    pub(crate) fn move_stock(&mut self, items: &[LineItem], sign: i64) -> StoreResult<()> {
        for item in items {
            self.require_ref::<Product>("productId", &item.product.product_id)?;
        }
        for item in items {
            self.apply_stock_delta(&item.product.product_id, sign * item.quantity)?;
        }
        Ok(())
    }
}

fn status_name(status: SaleStatus) -> &'static str {
    match status {
        SaleStatus::Completed => "completed",
        SaleStatus::Voided => "voided",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
