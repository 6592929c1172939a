//! # Store Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (tally-core)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds entity kind, id, blocking relation     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in backoffice app) ← Serialized for the front-end            │
//! │                                                                         │
//! │  Every variant is raised BEFORE the collections are touched.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tally_core::{CoreError, EntityKind, ValidationError};
use thiserror::Error;
use ts_rs::TS;

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record of this kind has the id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// A record still references the one being deleted.
    ///
    /// ## When This Occurs
    /// - Deleting a role that users still hold
    /// - Deleting a category, brand or unit products still use
    /// - Deleting a payment method that appears on a sale
    #[error("Cannot delete {entity} '{id}': {blocker} ({count})")]
    ReferentialIntegrity {
        entity: EntityKind,
        id: String,
        blocker: Blocker,
        count: usize,
    },

    /// A record points at another record that does not exist.
    #[error("{field} refers to a missing {target}: {id}")]
    UnknownReference {
        field: &'static str,
        target: EntityKind,
        id: String,
    },

    /// The signed-in user tried to delete their own account.
    #[error("You cannot delete your own account")]
    SelfDeletion,

    /// Ledger and transaction rows are never changed after being written.
    #[error("{entity} records are append-only")]
    AppendOnly { entity: EntityKind },

    /// The sale is not in a state that allows the operation.
    #[error("Sale {id} is {status}, expected {expected}")]
    InvalidSaleStatus {
        id: String,
        status: String,
        expected: String,
    },

    /// The operation exists in the interface but has no demo implementation.
    #[error("{0} is not available in the demo")]
    NotImplemented(&'static str),

    /// No user is signed in, or the credentials match nobody.
    #[error("Not signed in: {0}")]
    Unauthenticated(String),

    /// Input failed a business rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity kind and id.
    pub fn not_found(entity: EntityKind, id: impl fmt::Display) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates an UnknownReference error.
    pub fn unknown_reference(field: &'static str, target: EntityKind, id: impl fmt::Display) -> Self {
        StoreError::UnknownReference {
            field,
            target,
            id: id.to_string(),
        }
    }
}

impl From<CoreError> for StoreError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => StoreError::Validation(v),
            CoreError::InvalidDateRange { start, end } => {
                StoreError::Validation(ValidationError::InvalidFormat {
                    field: "dateRange".to_string(),
                    reason: format!("{start} is after {end}"),
                })
            }
        }
    }
}

// =============================================================================
// Blocker
// =============================================================================

/// The relationship that prevents a delete.
///
/// One variant per guarded `parent ← dependent` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Blocker {
    /// Role ← User
    RoleAssignedToUsers,
    /// Supplier ← Purchase
    SupplierHasPurchases,
    /// Supplier ← PurchaseReturn
    SupplierHasPurchaseReturns,
    /// CustomerGroup ← Customer
    CustomerGroupHasCustomers,
    /// ExpenseCategory ← Expense
    ExpenseCategoryHasExpenses,
    /// Brand ← Product
    BrandHasProducts,
    /// Category ← Product
    CategoryHasProducts,
    /// Unit ← Product
    UnitHasProducts,
    /// BusinessLocation ← User
    LocationHasUsers,
    /// BusinessLocation ← Product
    LocationHasProducts,
    /// BankAccount ← PaymentMethod
    BankAccountHasPaymentMethods,
    /// PaymentMethod ← Sale payments
    PaymentMethodUsedBySales,
    /// Variation ← VariationValue
    VariationHasValues,
    /// VariationValue ← Product
    VariationValueUsedByProducts,
    /// Customer ← Sale
    CustomerHasSales,
    /// Product ← variant Product
    ProductHasVariants,
}

impl Blocker {
    pub const fn describe(&self) -> &'static str {
        match self {
            Blocker::RoleAssignedToUsers => "role is assigned to users",
            Blocker::SupplierHasPurchases => "supplier has purchases",
            Blocker::SupplierHasPurchaseReturns => "supplier has purchase returns",
            Blocker::CustomerGroupHasCustomers => "customer group has customers",
            Blocker::ExpenseCategoryHasExpenses => "expense category has expenses",
            Blocker::BrandHasProducts => "brand is used by products",
            Blocker::CategoryHasProducts => "category is used by products",
            Blocker::UnitHasProducts => "unit is used by products",
            Blocker::LocationHasUsers => "location has users",
            Blocker::LocationHasProducts => "location has products",
            Blocker::BankAccountHasPaymentMethods => "bank account is linked to payment methods",
            Blocker::PaymentMethodUsedBySales => "payment method is used by sales",
            Blocker::VariationHasValues => "variation has values",
            Blocker::VariationValueUsedByProducts => "variation value is used by products",
            Blocker::CustomerHasSales => "customer has sales",
            Blocker::ProductHasVariants => "product has variants",
        }
    }
}

impl fmt::Display for Blocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
