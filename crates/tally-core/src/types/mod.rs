//! # Domain Types
//!
//! Every record kind the back-office knows about.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  catalog         transaction        inventory        people             │
//! │  ─────────       ───────────        ─────────        ──────             │
//! │  Product         Sale               StockAdjustment  Role               │
//! │  Category        Purchase           StockTransfer    User               │
//! │  Brand           PurchaseReturn                      Customer           │
//! │  Unit            CustomerReturn                      CustomerGroup      │
//! │  Variation       LineItem                            Supplier           │
//! │  VariationValue  Payment                                                │
//! │                                                                         │
//! │  finance                                                                │
//! │  ───────                                                                │
//! │  BusinessLocation  PaymentMethod  BankAccount  ExpenseCategory  Expense │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every record carries an [`EntityId`]. Ids are assigned by the store when a
//! record is added; whatever id the caller put on a new record is replaced.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub mod catalog;
pub mod finance;
pub mod inventory;
pub mod people;
pub mod transaction;

pub use catalog::*;
pub use finance::*;
pub use inventory::*;
pub use people::*;
pub use transaction::*;

// =============================================================================
// Entity Id
// =============================================================================

/// Opaque record identifier.
///
/// Freshly generated ids are UUID v4 strings; seeded ids may be any
/// non-empty string (the admin role is simply `admin`). Uniqueness is the
/// only contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generates a fresh UUID v4 id.
    pub fn generate() -> Self {
        EntityId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the placeholder id of a record not yet added to the store.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        EntityId(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        EntityId(s)
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Entity Kind
// =============================================================================

/// Discriminant for every record kind, used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Product,
    Category,
    Brand,
    Unit,
    Variation,
    VariationValue,
    Sale,
    Purchase,
    PurchaseReturn,
    CustomerReturn,
    StockAdjustment,
    StockTransfer,
    Role,
    User,
    Customer,
    CustomerGroup,
    Supplier,
    BusinessLocation,
    PaymentMethod,
    BankAccount,
    ExpenseCategory,
    Expense,
}

impl EntityKind {
    /// Human-readable name used in user-facing messages.
    pub const fn label(&self) -> &'static str {
        match self {
            EntityKind::Product => "Product",
            EntityKind::Category => "Category",
            EntityKind::Brand => "Brand",
            EntityKind::Unit => "Unit",
            EntityKind::Variation => "Variation",
            EntityKind::VariationValue => "Variation value",
            EntityKind::Sale => "Sale",
            EntityKind::Purchase => "Purchase",
            EntityKind::PurchaseReturn => "Purchase return",
            EntityKind::CustomerReturn => "Customer return",
            EntityKind::StockAdjustment => "Stock adjustment",
            EntityKind::StockTransfer => "Stock transfer",
            EntityKind::Role => "Role",
            EntityKind::User => "User",
            EntityKind::Customer => "Customer",
            EntityKind::CustomerGroup => "Customer group",
            EntityKind::Supplier => "Supplier",
            EntityKind::BusinessLocation => "Business location",
            EntityKind::PaymentMethod => "Payment method",
            EntityKind::BankAccount => "Bank account",
            EntityKind::ExpenseCategory => "Expense category",
            EntityKind::Expense => "Expense",
        }
    }

    /// Ledger and transaction kinds are never updated or deleted once
    /// written. A sale is voided instead; a purchase is corrected by a return.
    pub const fn is_append_only(&self) -> bool {
        matches!(
            self,
            EntityKind::StockAdjustment
                | EntityKind::StockTransfer
                | EntityKind::Sale
                | EntityKind::Purchase
                | EntityKind::PurchaseReturn
                | EntityKind::CustomerReturn
        )
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Entity Traits
// =============================================================================

/// A record the store can own.
pub trait Entity: Clone + fmt::Debug {
    const KIND: EntityKind;

    fn id(&self) -> &EntityId;

    fn set_id(&mut self, id: EntityId);

    /// Sets the creation date on dated kinds; a no-op for the others.
    fn stamp(&mut self, _at: DateTime<Utc>) {}
}

/// A record that carries a transaction date, filterable by report period.
pub trait Dated {
    fn date(&self) -> DateTime<Utc>;
}

macro_rules! impl_entity {
    ($ty:ty, $kind:ident) => {
        impl $crate::types::Entity for $ty {
            const KIND: $crate::types::EntityKind = $crate::types::EntityKind::$kind;

            fn id(&self) -> &$crate::types::EntityId {
                &self.id
            }

            fn set_id(&mut self, id: $crate::types::EntityId) {
                self.id = id;
            }
        }
    };
    ($ty:ty, $kind:ident, dated) => {
        impl $crate::types::Entity for $ty {
            const KIND: $crate::types::EntityKind = $crate::types::EntityKind::$kind;

            fn id(&self) -> &$crate::types::EntityId {
                &self.id
            }

            fn set_id(&mut self, id: $crate::types::EntityId) {
                self.id = id;
            }

            fn stamp(&mut self, at: ::chrono::DateTime<::chrono::Utc>) {
                self.date = at;
            }
        }

        impl $crate::types::Dated for $ty {
            fn date(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.date
            }
        }
    };
}

pub(crate) use impl_entity;

// =============================================================================
// Unit Tests
// =============================================================================
