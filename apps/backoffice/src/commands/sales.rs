//! # Sale Commands
//!
//! Money in and money out: sales, voids, customer returns, purchases,
//! purchase returns and expenses.

use tally_core::{CustomerReturn, EntityId, Expense, Purchase, PurchaseReturn, Sale};
use tally_store::{CustomerReturnDraft, PurchaseDraft, PurchaseReturnDraft, SaleDraft};
use tracing::{debug, info};

use super::records;
use super::{SALES_CREATE, SALES_VOID, SUPPLIERS_MANAGE};
use crate::error::ApiError;
use crate::state::StoreState;

// =============================================================================
// Sales
// =============================================================================

pub fn list_sales(store: &StoreState) -> Result<Vec<Sale>, ApiError> {
    store.view(|s| s.list::<Sale>().to_vec())
}

pub fn create_sale(store: &StoreState, draft: SaleDraft) -> Result<Sale, ApiError> {
    debug!(lines = draft.lines.len(), "create_sale command");
    let sale = store.write(SALES_CREATE, |s| s.add_sale(draft))?;
    info!(sale_id = %sale.id, total = %sale.totals.total, "Sale created");
    Ok(sale)
}

pub fn void_sale(store: &StoreState, id: EntityId) -> Result<Sale, ApiError> {
    debug!(sale_id = %id, "void_sale command");
    store.write(SALES_VOID, |s| s.void_sale(&id))
}

pub fn create_customer_return(
    store: &StoreState,
    draft: CustomerReturnDraft,
) -> Result<CustomerReturn, ApiError> {
    debug!(sale_id = %draft.original_sale_id, "create_customer_return command");
    store.write(SALES_VOID, |s| s.add_customer_return(draft))
}

// =============================================================================
// Purchases
// =============================================================================

pub fn create_purchase(store: &StoreState, draft: PurchaseDraft) -> Result<Purchase, ApiError> {
    debug!(supplier = %draft.supplier_id, "create_purchase command");
    store.write(SUPPLIERS_MANAGE, |s| s.add_purchase(draft))
}

pub fn create_purchase_return(
    store: &StoreState,
    draft: PurchaseReturnDraft,
) -> Result<PurchaseReturn, ApiError> {
    store.write(SUPPLIERS_MANAGE, |s| s.add_purchase_return(draft))
}

// =============================================================================
// Expenses
// =============================================================================

pub fn create_expense(store: &StoreState, expense: Expense) -> Result<Expense, ApiError> {
    records::create(store, expense)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tally_core::{Money, Product, SaleStatus};
    use tally_store::seed::demo_store;
    use tally_store::{DraftLine, ReturnLine};

    fn as_user(id: &str) -> StoreState {
        let state = StoreState::new(demo_store(chrono::Utc::now()));
        state.session(|s| s.sign_in_as(&EntityId::from(id))).unwrap();
        state
    }

    fn soda_sale(qty: i64) -> SaleDraft {
        SaleDraft {
            customer_id: EntityId::from("cust-walk-in"),
            business_location_id: EntityId::from("loc-main"),
            lines: vec![DraftLine::new("p-soda", qty)],
            payments: vec![],
            discount: None,
            note: None,
        }
    }

    fn stock_of(state: &StoreState, id: &str) -> i64 {
        state
            .view(|s| s.find::<Product>(&EntityId::from(id)).map(|p| p.stock))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_cashier_sells_but_cannot_void() {
        let state = as_user("user-cashier");
        let sale = create_sale(&state, soda_sale(3)).unwrap();
        assert_eq!(stock_of(&state, "p-soda"), 57);

        let err = void_sale(&state, sale.id.clone()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[test]
    fn test_manager_voids_once() {
        let state = as_user("user-manager");
        let sale = create_sale(&state, soda_sale(1)).unwrap();

        let voided = void_sale(&state, sale.id.clone()).unwrap();
        assert_eq!(voided.status, SaleStatus::Voided);

        let err = void_sale(&state, sale.id).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[test]
    fn test_return_restocks() {
        let state = as_user("user-manager");
        let sale = create_sale(&state, soda_sale(4)).unwrap();

        let ret = create_customer_return(
            &state,
            CustomerReturnDraft {
                original_sale_id: sale.id,
                lines: vec![ReturnLine::new("p-soda", 2)],
                reason: Some("Flat".into()),
            },
        )
        .unwrap();

        assert_eq!(ret.totals.total, Money::from_cents(315));
        assert_eq!(stock_of(&state, "p-soda"), 58);
    }

    #[test]
    fn test_purchase_adds_stock() {
        let state = as_user("user-manager");
        let purchase = create_purchase(
            &state,
            PurchaseDraft {
                supplier_id: EntityId::from("sup-fresh"),
                business_location_id: EntityId::from("loc-main"),
                reference_no: None,
                lines: vec![DraftLine::new("p-chips", 24)],
                discount: None,
            },
        )
        .unwrap();

        assert!(purchase.reference_no.starts_with("PO-"));
        assert_eq!(stock_of(&state, "p-chips"), 24);
    }
}
