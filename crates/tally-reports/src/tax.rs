//! Tax report: tax collected on sales against tax paid on purchases.
//!
//! ```text
//!   output tax  = Σ line tax of completed sales
//!               − Σ line tax of customer returns
//!   input tax   = Σ line tax of purchases
//!               − Σ line tax of purchase returns
//!   net payable = output tax − input tax             (negative: refundable)
//!
//!   line tax    = the line's tax terms on unit_price × quantity
//! ```

use serde::{Deserialize, Serialize};
use tally_core::{Dated, LineItem, Money};
use tracing::debug;
use ts_rs::TS;

use crate::filter::{ReportFilter, Sources};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxReport {
    pub sales_tax: Money,
    pub customer_return_tax: Money,
    pub purchase_tax: Money,
    pub purchase_return_tax: Money,
    pub output_tax: Money,
    pub input_tax: Money,
    pub net_payable: Money,
}

fn lines_tax(items: &[LineItem]) -> Money {
    items.iter().map(LineItem::tax).sum()
}

pub fn tax_report(src: &Sources<'_>, filter: &ReportFilter) -> TaxReport {
    let window = filter.window();

    let sales_tax: Money = src
        .sales
        .iter()
        .filter(|s| s.is_completed() && window.contains(s.date()))
        .filter(|s| filter.matches_location(&s.business_location_id))
        .map(|s| lines_tax(&s.items))
        .sum();

    let customer_return_tax: Money = src
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
        .map(|r| lines_tax(&r.items))
        .sum();

    let purchase_tax: Money = src
        .purchases
        .iter()
        .filter(|p| window.contains(p.date()))
        .filter(|p| filter.matches_location(&p.business_location_id))
        .map(|p| lines_tax(&p.items))
        .sum();

    let purchase_return_tax: Money = src
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
        .map(|r| lines_tax(&r.items))
        .sum();

    let output_tax = sales_tax - customer_return_tax;
    let input_tax = purchase_tax - purchase_return_tax;

    debug!(output_tax = %output_tax, input_tax = %input_tax, "Tax report computed");

    TaxReport {
        sales_tax,
        customer_return_tax,
        purchase_tax,
        purchase_return_tax,
        output_tax,
        input_tax,
        net_payable: output_tax - input_tax,
    }
}
