//! # Pricing Rules
//!
//! Tax and discount arithmetic shared by the store (when it prices a new
//! transaction) and the reports (when they split tax out of totals).
//!
//! ## Formulas
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TAX (per line)                                                         │
//! │    percentage:  base × qty × rate                                       │
//! │    fixed:       amount × qty                                            │
//! │    base = price on sale-side lines, cost price on purchase-side lines   │
//! │                                                                         │
//! │  DISCOUNT (per transaction)                                             │
//! │    percentage:  subtotal × rate                                         │
//! │    fixed:       value                                                   │
//! │    none:        0                                                       │
//! │    net = subtotal - discount                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Percentage tax is applied to the line total rather than per unit so that
//! half-cent unit taxes (2.50 at 5% = 0.125) never round twice.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Rate};

// =============================================================================
// Tax
// =============================================================================

/// Tax terms attached to a product and frozen into every line item.
///
/// Serialized as `{ "type": "percentage", "amount": 500 }` or
/// `{ "type": "fixed", "amount": 25 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "amount", rename_all = "snake_case")]
pub enum Tax {
    /// A share of the base price.
    Percentage(Rate),
    /// A flat amount per unit.
    Fixed(Money),
}

impl Tax {
    /// No tax at all.
    pub const fn exempt() -> Self {
        Tax::Percentage(Rate::zero())
    }

    /// Tax owed on one unit at `base_price`.
    pub fn per_unit(&self, base_price: Money) -> Money {
        line_tax(self, base_price, 1)
    }
}

impl Default for Tax {
    fn default() -> Self {
        Tax::exempt()
    }
}

/// Which catalog price a new line is charged at when the draft names none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxBasis {
    /// Selling price: sales and customer returns.
    Price,
    /// Cost price: purchases and purchase returns.
    Cost,
}

/// Tax on `quantity` units at `base_price`.
///
/// ## Example
/// ```rust
/// use tally_core::money::{Money, Rate};
/// use tally_core::pricing::{line_tax, Tax};
///
/// let pct = Tax::Percentage(Rate::from_bps(500));
/// assert_eq!(line_tax(&pct, Money::from_cents(250), 2).cents(), 25);
///
/// let fixed = Tax::Fixed(Money::from_cents(10));
/// assert_eq!(line_tax(&fixed, Money::from_cents(250), 3).cents(), 30);
/// ```
pub fn line_tax(tax: &Tax, base_price: Money, quantity: i64) -> Money {
    match tax {
        Tax::Percentage(rate) => base_price.multiply_quantity(quantity).apply_rate(*rate),
        Tax::Fixed(amount) => amount.multiply_quantity(quantity),
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A transaction-level discount.
///
/// Serialized as `{ "type": "percentage", "value": 1000 }` or
/// `{ "type": "fixed", "value": 500 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Discount {
    Percentage(Rate),
    Fixed(Money),
}

impl Discount {
    /// Amount taken off `subtotal`.
    pub fn amount_on(&self, subtotal: Money) -> Money {
        match self {
            Discount::Percentage(rate) => subtotal.apply_rate(*rate),
            Discount::Fixed(value) => *value,
        }
    }
}

/// Discount amount for an optional discount; absence means zero.
pub fn discount_amount(discount: Option<&Discount>, subtotal: Money) -> Money {
    discount.map_or(Money::zero(), |d| d.amount_on(subtotal))
}

/// `subtotal` minus its discount.
pub fn net_of_discount(discount: Option<&Discount>, subtotal: Money) -> Money {
    subtotal - discount_amount(discount, subtotal)
}

// =============================================================================
// Unit Tests
// =============================================================================
