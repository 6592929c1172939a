//! Purchase / sale summary: what came in, what went out, net of returns.
//!
//! All figures are after transaction discount and before tax.

use serde::{Deserialize, Serialize};
use tally_core::{Dated, Money};
use tracing::debug;
use ts_rs::TS;

use crate::filter::{ReportFilter, Sources};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseSaleSummary {
    pub gross_sales: Money,
    pub gross_purchases: Money,
    pub sales_returns: Money,
    pub purchase_returns: Money,
    /// `gross_sales - sales_returns`
    pub net_sales: Money,
    /// `gross_purchases - purchase_returns`
    pub net_purchases: Money,
}

/// Sums completed sales, purchases and both kinds of return in the filter.
///
/// A return is placed at the location of the transaction it reverses.
pub fn purchase_sale_summary(src: &Sources<'_>, filter: &ReportFilter) -> PurchaseSaleSummary {
    let window = filter.window();

    let gross_sales: Money = src
        .sales
        .iter()
        .filter(|s| s.is_completed() && window.contains(s.date()))
        .filter(|s| filter.matches_location(&s.business_location_id))
        .map(|s| s.totals.net())
        .sum();

    let gross_purchases: Money = src
        .purchases
        .iter()
        .filter(|p| window.contains(p.date()))
        .filter(|p| filter.matches_location(&p.business_location_id))
        .map(|p| p.totals.net())
        .sum();

    let sales_returns: Money = src
        .customer_returns
        .iter()
        .filter(|r| window.contains(r.date()))
        .filter(|r| {
            filter.business_location_id.is_none()
                || src
                    .sales
                    .iter()
                    .find(|s| s.id == r.original_sale_id)
                    .is_some_and(|s| filter.matches_location(&s.business_location_id))
        })
        .map(|r| r.totals.net())
        .sum();

    let purchase_returns: Money = src
        .purchase_returns
        .iter()
        .filter(|r| window.contains(r.date()))
        .filter(|r| {
            filter.business_location_id.is_none()
                || src
                    .purchases
                    .iter()
                    .find(|p| p.id == r.original_purchase_id)
                    .is_some_and(|p| filter.matches_location(&p.business_location_id))
        })
        .map(|r| r.totals.net())
        .sum();

    debug!(
        gross_sales = %gross_sales,
        gross_purchases = %gross_purchases,
        "Purchase/sale summary computed"
    );

    PurchaseSaleSummary {
        gross_sales,
        gross_purchases,
        sales_returns,
        purchase_returns,
        net_sales: gross_sales - sales_returns,
        net_purchases: gross_purchases - purchase_returns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use tally_core::{Discount, Rate, SaleStatus};

    #[test]
    fn test_empty_sources_yield_zeroes() {
        let summary = purchase_sale_summary(&Sources::default(), &ReportFilter::all());
        assert_eq!(summary, PurchaseSaleSummary::default());
    }

    #[test]
    fn test_net_figures_subtract_returns() {
        let a = product("A", 500, 300);
        let mut discounted = sale("s1", at(2024, 3, 5, 12), &[(&a, 4)]);
        discounted.discount = Some(Discount::Percentage(Rate::from_bps(1000)));
        discounted.totals =
            tally_core::Totals::compute(&discounted.items, discounted.discount.as_ref());
        let mut voided = sale("s2", at(2024, 3, 5, 13), &[(&a, 10)]);
        voided.status = SaleStatus::Voided;
        let sales = vec![discounted, voided];
        let purchases = vec![purchase("po1", at(2024, 3, 1, 9), &[(&a, 10)])];
        let customer_returns = vec![customer_return("cr1", "s1", at(2024, 3, 6, 9), &[(&a, 1)])];
        let purchase_returns = vec![purchase_return("pr1", "po1", at(2024, 3, 2, 9), &[(&a, 2)])];

        let src = Sources {
            sales: &sales,
            purchases: &purchases,
            customer_returns: &customer_returns,
            purchase_returns: &purchase_returns,
            ..Sources::default()
        };
        let s = purchase_sale_summary(&src, &ReportFilter::all());

        // 4 × 5.00 = 20.00, less 10% = 18.00; the voided sale is ignored.
        assert_eq!(s.gross_sales, Money::from_cents(1800));
        assert_eq!(s.sales_returns, Money::from_cents(500));
        assert_eq!(s.net_sales, Money::from_cents(1300));
        // Purchases at cost 3.00
        assert_eq!(s.gross_purchases, Money::from_cents(3000));
        assert_eq!(s.purchase_returns, Money::from_cents(600));
        assert_eq!(s.net_purchases, Money::from_cents(2400));
    }

    #[test]
    fn test_location_filter_follows_original_transaction() {
        let a = product("A", 500, 300);
        let mut elsewhere = sale("s1", at(2024, 3, 5, 12), &[(&a, 2)]);
        elsewhere.business_location_id = "loc-2".into();
        let sales = vec![elsewhere];
        let customer_returns = vec![customer_return("cr1", "s1", at(2024, 3, 6, 9), &[(&a, 1)])];

        let src = Sources {
            sales: &sales,
            customer_returns: &customer_returns,
            ..Sources::default()
        };
        let s = purchase_sale_summary(&src, &ReportFilter::all().at_location("loc-1"));

        assert_eq!(s.gross_sales, Money::zero());
        assert_eq!(s.sales_returns, Money::zero());
    }
}
