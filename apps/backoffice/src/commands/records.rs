//! # Record Commands
//!
//! Generic create / update / delete, and delete-by-kind for the front-end's
//! record tables.

use tally_core::{EntityId, EntityKind};
use tally_store::Managed;
use tracing::debug;

use super::{
    CUSTOMERS_MANAGE, EXPENSES_MANAGE, PRODUCTS_MANAGE, ROLES_MANAGE, SALES_VOID,
    SETTINGS_MANAGE, SUPPLIERS_MANAGE, USERS_MANAGE,
};
use crate::error::ApiError;
use crate::state::StoreState;

/// Permission required to change records of `kind`.
pub fn permission_for(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Product
        | EntityKind::Category
        | EntityKind::Brand
        | EntityKind::Unit
        | EntityKind::Variation
        | EntityKind::VariationValue
        | EntityKind::StockAdjustment
        | EntityKind::StockTransfer => PRODUCTS_MANAGE,
        EntityKind::Role => ROLES_MANAGE,
        EntityKind::User => USERS_MANAGE,
        EntityKind::Supplier | EntityKind::Purchase | EntityKind::PurchaseReturn => {
            SUPPLIERS_MANAGE
        }
        EntityKind::Customer | EntityKind::CustomerGroup => CUSTOMERS_MANAGE,
        EntityKind::Expense | EntityKind::ExpenseCategory => EXPENSES_MANAGE,
        EntityKind::BusinessLocation | EntityKind::PaymentMethod | EntityKind::BankAccount => {
            SETTINGS_MANAGE
        }
        EntityKind::Sale | EntityKind::CustomerReturn => SALES_VOID,
    }
}

pub(crate) fn create<T: Managed>(store: &StoreState, record: T) -> Result<T, ApiError> {
    debug!(kind = %T::KIND, "create command");
    store.write(permission_for(T::KIND), |s| s.add(record))
}

pub(crate) fn update<T: Managed>(store: &StoreState, record: T) -> Result<T, ApiError> {
    debug!(kind = %T::KIND, "update command");
    store.write(permission_for(T::KIND), |s| s.update(record))
}

pub(crate) fn delete<T: Managed>(store: &StoreState, id: &EntityId) -> Result<T, ApiError> {
    debug!(kind = %T::KIND, id = %id, "delete command");
    store.write(permission_for(T::KIND), |s| s.delete::<T>(id))
}

/// Deletes any record by kind. Transactions and ledgers answer
/// `BUSINESS_LOGIC` (append-only).
pub fn delete_record(store: &StoreState, kind: EntityKind, id: EntityId) -> Result<(), ApiError> {
    debug!(kind = %kind, id = %id, "delete_record command");
    store.write(permission_for(kind), |s| s.delete_kind(kind, &id))
}
