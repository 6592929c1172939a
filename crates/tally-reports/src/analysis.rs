//! # Sales Analysis
//!
//! Revenue, volume and rankings over the completed sales in a filter.
//!
//! ## Folding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sales ──► completed? ──► in window? ──► location? ──► paid with?        │
//! │                                                         │               │
//! │          ┌──────────────────────────────────────────────┘               │
//! │          ▼                                                              │
//! │  per sale:  revenue += totals.total        count += 1                   │
//! │             per payment:  by_payment_method[method] += amount           │
//! │  per line:  items_sold += qty                                           │
//! │             per_product[id]      += (qty, unit_price × qty)             │
//! │             by_category[cat]     += unit_price × qty                    │
//! │                                                                         │
//! │  Rankings sort per_product by qty / revenue, descending and STABLE:     │
//! │  ties keep the order in which products were first sold.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tally_core::{Dated, EntityId, Money, Sale};
use tracing::debug;
use ts_rs::TS;

use crate::filter::{ReportFilter, Sources};

/// One product's place in a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductRanking {
    pub product_id: EntityId,
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    /// Line revenue before the sale's discount and tax.
    pub revenue: Money,
}

/// An amount attributed to a named dimension record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub id: EntityId,
    pub name: String,
    pub amount: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesAnalysis {
    pub total_revenue: Money,
    pub sale_count: usize,
    /// Zero when there are no sales.
    pub average_sale: Money,
    pub items_sold: i64,
    pub top_by_quantity: Vec<ProductRanking>,
    pub top_by_revenue: Vec<ProductRanking>,
    pub revenue_by_category: Vec<Breakdown>,
    pub revenue_by_payment_method: Vec<Breakdown>,
}

/// Accumulates amounts per key, remembering first-seen order.
#[derive(Default)]
struct Tally<V> {
    index: HashMap<EntityId, usize>,
    entries: Vec<(EntityId, V)>,
}

impl<V: Default> Tally<V> {
    fn entry(&mut self, key: &EntityId) -> &mut V {
        let i = match self.index.get(key) {
            Some(&i) => i,
            None => {
                self.entries.push((key.clone(), V::default()));
                self.index.insert(key.clone(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }
}

#[derive(Default)]
struct ProductTotals {
    sku: String,
    name: String,
    quantity: i64,
    revenue: Money,
}

/// Whether a sale counts towards the analysis.
pub fn sale_matches(sale: &Sale, filter: &ReportFilter) -> bool {
    sale.is_completed()
        && filter.window().contains(sale.date())
        && filter.matches_location(&sale.business_location_id)
        && filter
            .payment_method_id
            .as_ref()
            .map_or(true, |m| sale.paid_with(m))
}

pub fn sales_analysis(src: &Sources<'_>, filter: &ReportFilter) -> SalesAnalysis {
    let mut total_revenue = Money::zero();
    let mut sale_count = 0usize;
    let mut items_sold = 0i64;
    let mut per_product: Tally<ProductTotals> = Tally::default();
    let mut per_category: Tally<Money> = Tally::default();
    let mut per_method: Tally<Money> = Tally::default();

    for sale in src.sales.iter().filter(|s| sale_matches(s, filter)) {
        total_revenue += sale.totals.total;
        sale_count += 1;

        for payment in &sale.payments {
            *per_method.entry(&payment.method_id) += payment.amount;
        }

        for item in &sale.items {
            let revenue = item.subtotal();
            items_sold += item.quantity;

            let totals = per_product.entry(&item.product.product_id);
            if totals.sku.is_empty() {
                totals.sku = item.product.sku.clone();
                totals.name = item.product.name.clone();
            }
            totals.quantity += item.quantity;
            totals.revenue += revenue;

            *per_category.entry(&item.product.category_id) += revenue;
        }
    }

    let rankings: Vec<ProductRanking> = per_product
        .entries
        .into_iter()
        .map(|(product_id, t)| ProductRanking {
            product_id,
            sku: t.sku,
            name: t.name,
            quantity: t.quantity,
            revenue: t.revenue,
        })
        .collect();

    let mut top_by_quantity = rankings.clone();
    top_by_quantity.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    top_by_quantity.truncate(filter.top_n);

    let mut top_by_revenue = rankings;
    top_by_revenue.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    top_by_revenue.truncate(filter.top_n);

    let category_name = |id: &EntityId| {
        src.categories
            .iter()
            .find(|c| &c.id == id)
            .map_or_else(|| "Uncategorized".to_string(), |c| c.name.clone())
    };
    let method_name = |id: &EntityId| {
        src.payment_methods
            .iter()
            .find(|m| &m.id == id)
            .map_or_else(|| id.to_string(), |m| m.name.clone())
    };

    let revenue_by_category = breakdown(per_category, category_name);
    let revenue_by_payment_method = breakdown(per_method, method_name);

    debug!(sale_count, total_revenue = %total_revenue, "Sales analysis computed");

    SalesAnalysis {
        total_revenue,
        sale_count,
        average_sale: total_revenue.average_over(sale_count),
        items_sold,
        top_by_quantity,
        top_by_revenue,
        revenue_by_category,
        revenue_by_payment_method,
    }
}

fn breakdown(tally: Tally<Money>, name_of: impl Fn(&EntityId) -> String) -> Vec<Breakdown> {
    tally
        .entries
        .into_iter()
        .map(|(id, amount)| Breakdown {
            name: name_of(&id),
            id,
            amount,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
