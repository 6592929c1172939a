//! Transactions: sales, purchases and their returns.
//!
//! ## Snapshot Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product (live, editable)                                               │
//! │     │ snapshot() at transaction time                                    │
//! │     ▼                                                                   │
//! │  LineItem { product: ProductSnapshot, quantity, unit_price }            │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Sale / Purchase / Return totals are computed once and stored.          │
//! │  Tax is the snapshot's terms applied to unit_price, never the live      │
//! │  product's price.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{impl_entity, EntityId, ProductSnapshot};
use crate::money::Money;
use crate::pricing::{discount_amount, line_tax, Discount};

// =============================================================================
// Line Items and Payments
// =============================================================================

/// One product line on a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product: ProductSnapshot,
    pub quantity: i64,
    /// Price per unit charged on this line (sale price or purchase cost).
    pub unit_price: Money,
}

impl LineItem {
    /// `unit_price × quantity`, before tax and discount.
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Tax owed on this line, on the price actually charged.
    pub fn tax(&self) -> Money {
        line_tax(&self.product.tax, self.unit_price, self.quantity)
    }
}

/// A payment towards a sale. A sale may be split across several methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub method_id: EntityId,
    pub amount: Money,
}

/// Customer identity frozen onto a sale or return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRef {
    pub id: EntityId,
    pub name: String,
}

/// Stored money figures of a transaction.
///
/// `total = subtotal - discount + tax`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
}

impl Totals {
    /// Prices a list of lines with an optional transaction discount.
    pub fn compute(items: &[LineItem], discount: Option<&Discount>) -> Self {
        let subtotal: Money = items.iter().map(LineItem::subtotal).sum();
        let tax: Money = items.iter().map(LineItem::tax).sum();
        let discount = discount_amount(discount, subtotal);
        Totals {
            subtotal,
            discount,
            tax,
            total: subtotal - discount + tax,
        }
    }

    /// Subtotal after the discount, before tax.
    pub fn net(&self) -> Money {
        self.subtotal - self.discount
    }
}

// =============================================================================
// Sale
// =============================================================================

/// The status of a sale.
///
/// `Completed → Voided` is the only transition; `Voided` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Paid and counted in revenue.
    #[default]
    Completed,
    /// Cancelled. Kept for the audit trail, excluded from revenue.
    Voided,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: EntityId,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub customer: CustomerRef,
    pub business_location_id: EntityId,
    pub items: Vec<LineItem>,
    pub payments: Vec<Payment>,
    pub status: SaleStatus,
    #[serde(default)]
    pub discount: Option<Discount>,
    pub totals: Totals,
    #[serde(default)]
    pub note: Option<String>,
}

impl_entity!(Sale, Sale, dated);

impl Sale {
    pub fn is_completed(&self) -> bool {
        self.status == SaleStatus::Completed
    }

    /// Units sold across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of payments; not reconciled against the total here.
    pub fn amount_paid(&self) -> Money {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// True when any payment used `method_id`.
    pub fn paid_with(&self, method_id: &EntityId) -> bool {
        self.payments.iter().any(|p| &p.method_id == method_id)
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// Stock bought from a supplier. Lines are priced at cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: EntityId,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub supplier_id: EntityId,
    pub business_location_id: EntityId,
    pub reference_no: String,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub discount: Option<Discount>,
    pub totals: Totals,
}

impl_entity!(Purchase, Purchase, dated);

// =============================================================================
// Returns
// =============================================================================

/// Stock sent back to a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReturn {
    pub id: EntityId,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub supplier_id: EntityId,
    pub original_purchase_id: EntityId,
    pub items: Vec<LineItem>,
    pub totals: Totals,
    #[serde(default)]
    pub reason: Option<String>,
}

impl_entity!(PurchaseReturn, PurchaseReturn, dated);

/// Goods brought back by a customer against an earlier sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerReturn {
    pub id: EntityId,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub customer: CustomerRef,
    pub original_sale_id: EntityId,
    pub items: Vec<LineItem>,
    pub totals: Totals,
    #[serde(default)]
    pub reason: Option<String>,
}

impl_entity!(CustomerReturn, CustomerReturn, dated);

// =============================================================================
// Unit Tests
// =============================================================================
