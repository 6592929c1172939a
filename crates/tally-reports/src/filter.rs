//! # Report Filters and Sources
//!
//! What a report reads ([`Sources`]) and which slice of it ([`ReportFilter`]).
//!
//! ## Filter Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  range           inclusive local calendar days, open sides unbounded    │
//! │  utcOffsetMin.   the local offset those days are measured in            │
//! │  location        sales, purchases, expenses, stock rows                 │
//! │  category        stock rows                                             │
//! │  paymentMethod   sales paid (at least partly) with the method           │
//! │  product         stock adjustment rows                                  │
//! │  topN            size of the product rankings                           │
//! │                                                                         │
//! │  A dimension left unset matches everything.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};
use tally_core::{
    Category, CustomerReturn, DateRange, DateWindow, EntityId, Expense, ExpenseCategory,
    PaymentMethod, Product, Purchase, PurchaseReturn, Sale, StockAdjustment, DEFAULT_TOP_N,
};
use ts_rs::TS;

/// Narrows the records a report folds over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportFilter {
    pub range: DateRange,
    /// Offset of the shop's local time from UTC, in minutes. `None` means
    /// the caller left it to the shop's configured offset.
    pub utc_offset_minutes: Option<i32>,
    pub business_location_id: Option<EntityId>,
    pub category_id: Option<EntityId>,
    pub payment_method_id: Option<EntityId>,
    pub product_id: Option<EntityId>,
    pub top_n: usize,
}

impl Default for ReportFilter {
    fn default() -> Self {
        ReportFilter {
            range: DateRange::all(),
            utc_offset_minutes: None,
            business_location_id: None,
            category_id: None,
            payment_method_id: None,
            product_id: None,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl ReportFilter {
    /// Everything, at UTC.
    pub fn all() -> Self {
        ReportFilter::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        ReportFilter {
            range: DateRange::between(start, end),
            ..ReportFilter::default()
        }
    }

    pub fn with_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = Some(minutes);
        self
    }

    pub fn at_location(mut self, id: impl Into<EntityId>) -> Self {
        self.business_location_id = Some(id.into());
        self
    }

    pub fn in_category(mut self, id: impl Into<EntityId>) -> Self {
        self.category_id = Some(id.into());
        self
    }

    pub fn paid_with(mut self, id: impl Into<EntityId>) -> Self {
        self.payment_method_id = Some(id.into());
        self
    }

    pub fn for_product(mut self, id: impl Into<EntityId>) -> Self {
        self.product_id = Some(id.into());
        self
    }

    pub fn top(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    /// The local offset; an unset or out-of-range value falls back to UTC.
    pub fn offset(&self) -> FixedOffset {
        self.utc_offset_minutes
            .unwrap_or(0)
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix())
    }

    pub fn window(&self) -> DateWindow {
        self.range.window(self.offset())
    }

    pub(crate) fn matches_location(&self, location_id: &EntityId) -> bool {
        self.business_location_id.as_ref().map_or(true, |id| id == location_id)
    }
}

/// Read-only views of the store collections a report may need.
///
/// Build it from whatever holds the records; fields a report does not
/// read can stay empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sources<'a> {
    pub products: &'a [Product],
    pub categories: &'a [Category],
    pub sales: &'a [Sale],
    pub purchases: &'a [Purchase],
    pub purchase_returns: &'a [PurchaseReturn],
    pub customer_returns: &'a [CustomerReturn],
    pub stock_adjustments: &'a [StockAdjustment],
    pub payment_methods: &'a [PaymentMethod],
    pub expenses: &'a [Expense],
    pub expense_categories: &'a [ExpenseCategory],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_unbounded_top_five() {
        let f = ReportFilter::all();
        assert!(f.range.is_unbounded());
        assert_eq!(f.top_n, 5);
        assert_eq!(f.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_offset_minutes() {
        let f = ReportFilter::all().with_offset_minutes(-300);
        assert_eq!(f.offset().local_minus_utc(), -18_000);

        let absurd = ReportFilter::all().with_offset_minutes(100_000);
        assert_eq!(absurd.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_explicit_utc_is_distinct_from_unset() {
        assert_eq!(ReportFilter::all().utc_offset_minutes, None);

        let utc = ReportFilter::all().with_offset_minutes(0);
        assert_eq!(utc.utc_offset_minutes, Some(0));
        assert_eq!(utc.offset().local_minus_utc(), 0);

        let f: ReportFilter = serde_json::from_str(r#"{"utcOffsetMinutes":0}"#).unwrap();
        assert_eq!(f.utc_offset_minutes, Some(0));
        let f: ReportFilter = serde_json::from_str("{}").unwrap();
        assert_eq!(f.utc_offset_minutes, None);
    }

    #[test]
    fn test_filter_deserializes_with_defaults() {
        let f: ReportFilter = serde_json::from_str(r#"{"businessLocationId":"loc-1"}"#).unwrap();
        assert!(f.matches_location(&EntityId::from("loc-1")));
        assert!(!f.matches_location(&EntityId::from("loc-2")));
        assert_eq!(f.top_n, 5);
    }
}
