//! # Stock Reports
//!
//! The current stock position per product, and the adjustment ledger.
//!
//! ## Status
//! ```text
//!   stock ≤ 0                    OutOfStock   (negative stock included)
//!   0 < stock ≤ reorder_point    LowStock
//!   stock > reorder_point        InStock
//! ```
//!
//! Parents of variable products carry no stock of their own and are left
//! out; their variants are listed instead.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tally_core::{AdjustmentKind, Dated, EntityId, Money, Product};
use tracing::debug;
use ts_rs::TS;

use crate::filter::{ReportFilter, Sources};

// =============================================================================
// Stock Report
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn classify(stock: i64, reorder_point: i64) -> Self {
        if stock <= 0 {
            StockStatus::OutOfStock
        } else if stock <= reorder_point {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockRow {
    pub product_id: EntityId,
    pub sku: String,
    pub name: String,
    pub category_id: EntityId,
    pub business_location_id: EntityId,
    pub stock: i64,
    pub reorder_point: i64,
    pub cost_price: Money,
    pub price: Money,
    pub cost_value: Money,
    pub price_value: Money,
    pub status: StockStatus,
}

impl StockRow {
    fn from_product(p: &Product) -> Self {
        StockRow {
            product_id: p.id.clone(),
            sku: p.sku.clone(),
            name: p.name.clone(),
            category_id: p.category_id.clone(),
            business_location_id: p.business_location_id.clone(),
            stock: p.stock,
            reorder_point: p.reorder_point,
            cost_price: p.cost_price,
            price: p.price,
            cost_value: p.cost_value(),
            price_value: p.price_value(),
            status: StockStatus::classify(p.stock, p.reorder_point),
        }
    }
}

/// Column a stock report is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum StockSortKey {
    #[default]
    Sku,
    Name,
    Stock,
    ReorderPoint,
    CostPrice,
    Price,
    CostValue,
    PriceValue,
    Status,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct StockSort {
    pub key: StockSortKey,
    pub direction: SortDirection,
}

impl StockSort {
    pub fn by(key: StockSortKey, direction: SortDirection) -> Self {
        StockSort { key, direction }
    }

    fn compare(&self, a: &StockRow, b: &StockRow) -> Ordering {
        let ord = match self.key {
            StockSortKey::Sku => a.sku.cmp(&b.sku),
            StockSortKey::Name => a.name.cmp(&b.name),
            StockSortKey::Stock => a.stock.cmp(&b.stock),
            StockSortKey::ReorderPoint => a.reorder_point.cmp(&b.reorder_point),
            StockSortKey::CostPrice => a.cost_price.cmp(&b.cost_price),
            StockSortKey::Price => a.price.cmp(&b.price),
            StockSortKey::CostValue => a.cost_value.cmp(&b.cost_value),
            StockSortKey::PriceValue => a.price_value.cmp(&b.price_value),
            StockSortKey::Status => a.status.cmp(&b.status),
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub rows: Vec<StockRow>,
    pub total_cost_value: Money,
    pub total_price_value: Money,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

/// One row per stocked product, filtered by location and category.
///
/// Sorting is stable: rows that compare equal keep catalogue order in
/// either direction.
pub fn stock_report(src: &Sources<'_>, filter: &ReportFilter, sort: StockSort) -> StockReport {
    let has_variants = |p: &Product| src.products.iter().any(|c| c.is_variant_of(&p.id));

    let mut rows: Vec<StockRow> = src
        .products
        .iter()
        .filter(|p| filter.matches_location(&p.business_location_id))
        .filter(|p| filter.category_id.as_ref().map_or(true, |c| c == &p.category_id))
        .filter(|p| !has_variants(p))
        .map(StockRow::from_product)
        .collect();

    rows.sort_by(|a, b| sort.compare(a, b));

    let mut report = StockReport::default();
    for row in &rows {
        report.total_cost_value += row.cost_value;
        report.total_price_value += row.price_value;
        match row.status {
            StockStatus::InStock => report.in_stock += 1,
            StockStatus::LowStock => report.low_stock += 1,
            StockStatus::OutOfStock => report.out_of_stock += 1,
        }
    }
    report.rows = rows;

    debug!(
        rows = report.rows.len(),
        out_of_stock = report.out_of_stock,
        "Stock report computed"
    );
    report
}

// =============================================================================
// Stock Adjustment Report
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustmentRow {
    pub id: EntityId,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub product_id: EntityId,
    /// Empty when the product no longer exists.
    pub product_name: String,
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    pub quantity: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustmentReport {
    pub rows: Vec<StockAdjustmentRow>,
    pub total_added: i64,
    pub total_subtracted: i64,
    /// `total_added - total_subtracted`
    pub net_change: i64,
}

/// Ledger rows in the window, optionally for one product, in ledger order.
pub fn stock_adjustment_report(src: &Sources<'_>, filter: &ReportFilter) -> StockAdjustmentReport {
    let window = filter.window();
    let mut report = StockAdjustmentReport::default();

    for adj in src
        .stock_adjustments
        .iter()
        .filter(|a| window.contains(a.date()))
        .filter(|a| filter.product_id.as_ref().map_or(true, |p| p == &a.product_id))
    {
        match adj.kind {
            AdjustmentKind::Addition => report.total_added += adj.quantity,
            AdjustmentKind::Subtraction => report.total_subtracted += adj.quantity,
        }
        let product_name = src
            .products
            .iter()
            .find(|p| p.id == adj.product_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        report.rows.push(StockAdjustmentRow {
            id: adj.id.clone(),
            date: adj.date,
            product_id: adj.product_id.clone(),
            product_name,
            kind: adj.kind,
            quantity: adj.quantity,
            reason: adj.reason.clone(),
        });
    }
    report.net_change = report.total_added - report.total_subtracted;

    debug!(rows = report.rows.len(), net_change = report.net_change, "Adjustment report computed");
    report
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn stocked(sku: &str, stock: i64, reorder_point: i64) -> Product {
        let mut p = product(sku, 500, 200);
        p.stock = stock;
        p.reorder_point = reorder_point;
        p
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(StockStatus::classify(-3, 5), StockStatus::OutOfStock);
        assert_eq!(StockStatus::classify(0, 5), StockStatus::OutOfStock);
        assert_eq!(StockStatus::classify(1, 5), StockStatus::LowStock);
        assert_eq!(StockStatus::classify(5, 5), StockStatus::LowStock);
        assert_eq!(StockStatus::classify(6, 5), StockStatus::InStock);
    }

    #[test]
    fn test_values_and_status_totals() {
        let products = vec![stocked("A", 10, 2), stocked("B", 1, 2), stocked("C", 0, 2)];
        let src = Sources {
            products: &products,
            ..Sources::default()
        };

        let r = stock_report(&src, &ReportFilter::all(), StockSort::default());

        assert_eq!(r.rows[0].cost_value, Money::from_cents(2000));
        assert_eq!(r.rows[0].price_value, Money::from_cents(5000));
        assert_eq!(r.total_cost_value, Money::from_cents(2200));
        assert_eq!((r.in_stock, r.low_stock, r.out_of_stock), (1, 1, 1));
    }

    #[test]
    fn test_descending_sort_is_stable_on_ties() {
        let products = vec![stocked("A", 3, 0), stocked("B", 7, 0), stocked("C", 3, 0)];
        let src = Sources {
            products: &products,
            ..Sources::default()
        };

        let desc = stock_report(
            &src,
            &ReportFilter::all(),
            StockSort::by(StockSortKey::Stock, SortDirection::Desc),
        );
        let order: Vec<&str> = desc.rows.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);

        let asc = stock_report(
            &src,
            &ReportFilter::all(),
            StockSort::by(StockSortKey::Stock, SortDirection::Asc),
        );
        let order: Vec<&str> = asc.rows.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(order, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_filters_and_variant_parents() {
        let parent = stocked("SHIRT", 0, 0);
        let mut child = stocked("SHIRT-S", 4, 1);
        child.parent_product_id = Some(parent.id.clone());
        let mut elsewhere = stocked("X", 4, 1);
        elsewhere.business_location_id = "loc-2".into();
        let mut other_cat = stocked("Y", 4, 1);
        other_cat.category_id = "cat-2".into();
        let products = vec![parent, child, elsewhere, other_cat];
        let src = Sources {
            products: &products,
            ..Sources::default()
        };

        let all = stock_report(&src, &ReportFilter::all(), StockSort::default());
        assert!(all.rows.iter().all(|r| r.sku != "SHIRT"));
        assert_eq!(all.rows.len(), 3);

        let filtered = stock_report(
            &src,
            &ReportFilter::all().at_location("loc-1").in_category("cat-1"),
            StockSort::default(),
        );
        let skus: Vec<&str> = filtered.rows.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, vec!["SHIRT-S"]);
    }

    #[test]
    fn test_adjustment_totals_and_product_filter() {
        let a = product("A", 500, 200);
        let b = product("B", 300, 100);
        let products = vec![a.clone(), b.clone()];
        let adjustments = vec![
            adjustment("adj-1", &a, AdjustmentKind::Addition, 10, at(2024, 3, 1, 9)),
            adjustment("adj-2", &a, AdjustmentKind::Subtraction, 3, at(2024, 3, 2, 9)),
            adjustment("adj-3", &b, AdjustmentKind::Subtraction, 1, at(2024, 3, 3, 9)),
        ];
        let src = Sources {
            products: &products,
            stock_adjustments: &adjustments,
            ..Sources::default()
        };

        let all = stock_adjustment_report(&src, &ReportFilter::all());
        assert_eq!(all.rows.len(), 3);
        assert_eq!(all.total_added, 10);
        assert_eq!(all.total_subtracted, 4);
        assert_eq!(all.net_change, 6);
        assert_eq!(all.rows[0].product_name, "Product A");

        let only_b = stock_adjustment_report(&src, &ReportFilter::all().for_product(b.id.clone()));
        assert_eq!(only_b.rows.len(), 1);
        assert_eq!(only_b.net_change, -1);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(
            stock_report(&Sources::default(), &ReportFilter::all(), StockSort::default()),
            StockReport::default()
        );
        assert_eq!(
            stock_adjustment_report(&Sources::default(), &ReportFilter::all()),
            StockAdjustmentReport::default()
        );
    }
}
