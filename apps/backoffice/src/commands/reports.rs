//! # Report Commands
//!
//! Lends the store's collections to the report folds and wraps each
//! report in a `reports:view` check.
//!
//! ## Filters
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  filter: None           ──► configured offset, all time, top_n          │
//! │  filter: Some(f)        ──► f, with the configured offset if f has none │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tally_core::{
    Category, CustomerReturn, Expense, ExpenseCategory, PaymentMethod, Product, Purchase,
    PurchaseReturn, Sale, StockAdjustment,
};
use tally_reports::{
    ExpenseSummary, PurchaseSaleSummary, ReportFilter, SalesAnalysis, SortDirection, Sources,
    StockAdjustmentReport, StockReport, StockRow, StockSort, StockSortKey, StockStatus, TaxReport,
};
use tally_store::Store;
use tracing::debug;

use super::REPORTS_VIEW;
use crate::error::ApiError;
use crate::state::{ConfigState, StoreState};

/// Borrows every collection a report can read.
pub fn sources(store: &Store) -> Sources<'_> {
    Sources {
        products: store.list::<Product>(),
        categories: store.list::<Category>(),
        sales: store.list::<Sale>(),
        purchases: store.list::<Purchase>(),
        purchase_returns: store.list::<PurchaseReturn>(),
        customer_returns: store.list::<CustomerReturn>(),
        stock_adjustments: store.list::<StockAdjustment>(),
        payment_methods: store.list::<PaymentMethod>(),
        expenses: store.list::<Expense>(),
        expense_categories: store.list::<ExpenseCategory>(),
    }
}

fn resolve(config: &ConfigState, filter: Option<ReportFilter>) -> ReportFilter {
    match filter {
        Some(filter) => config.localize(filter),
        None => config.default_filter(),
    }
}

/// Runs `report` against the store after the permission check.
fn run_report<R>(
    store: &StoreState,
    config: &ConfigState,
    filter: Option<ReportFilter>,
    report: impl FnOnce(&Sources<'_>, &ReportFilter) -> R,
) -> Result<R, ApiError> {
    let filter = resolve(config, filter);
    store.read(REPORTS_VIEW, |s| report(&sources(s), &filter))
}

// =============================================================================
// Reports
// =============================================================================

pub fn purchase_sale_summary(
    store: &StoreState,
    config: &ConfigState,
    filter: Option<ReportFilter>,
) -> Result<PurchaseSaleSummary, ApiError> {
    run_report(store, config, filter, tally_reports::purchase_sale_summary)
}

pub fn sales_analysis(
    store: &StoreState,
    config: &ConfigState,
    filter: Option<ReportFilter>,
) -> Result<SalesAnalysis, ApiError> {
    run_report(store, config, filter, tally_reports::sales_analysis)
}

pub fn stock_report(
    store: &StoreState,
    config: &ConfigState,
    filter: Option<ReportFilter>,
    sort: Option<StockSort>,
) -> Result<StockReport, ApiError> {
    let sort = sort.unwrap_or_default();
    run_report(store, config, filter, |src, f| tally_reports::stock_report(src, f, sort))
}

pub fn stock_adjustment_report(
    store: &StoreState,
    config: &ConfigState,
    filter: Option<ReportFilter>,
) -> Result<StockAdjustmentReport, ApiError> {
    run_report(store, config, filter, tally_reports::stock_adjustment_report)
}

pub fn tax_report(
    store: &StoreState,
    config: &ConfigState,
    filter: Option<ReportFilter>,
) -> Result<TaxReport, ApiError> {
    run_report(store, config, filter, tally_reports::tax_report)
}

pub fn expense_summary(
    store: &StoreState,
    config: &ConfigState,
    filter: Option<ReportFilter>,
) -> Result<ExpenseSummary, ApiError> {
    run_report(store, config, filter, tally_reports::expense_summary)
}

// =============================================================================
// Dashboard
// =============================================================================

/// Everything the landing page shows, computed under one lock.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub store_name: String,
    pub sales: SalesAnalysis,
    pub summary: PurchaseSaleSummary,
    pub tax: TaxReport,
    pub expenses: ExpenseSummary,
    /// Products at or below their reorder point, out of stock first.
    pub restock: Vec<StockRow>,
}

pub fn dashboard(
    store: &StoreState,
    config: &ConfigState,
    filter: Option<ReportFilter>,
) -> Result<Dashboard, ApiError> {
    let filter = resolve(config, filter);
    debug!(top_n = filter.top_n, "dashboard command");
    store.read(REPORTS_VIEW, |s| build_dashboard(s, config, &filter))
}

/// Builds the dashboard from a store the caller has already authorized.
pub(crate) fn build_dashboard(store: &Store, config: &ConfigState, filter: &ReportFilter) -> Dashboard {
    let src = sources(store);
    let sort = StockSort::by(StockSortKey::Status, SortDirection::Desc);
    let restock = tally_reports::stock_report(&src, filter, sort)
        .rows
        .into_iter()
        .filter(|row| row.status != StockStatus::InStock)
        .collect();

    Dashboard {
        store_name: config.store_name().to_string(),
        sales: tally_reports::sales_analysis(&src, filter),
        summary: tally_reports::purchase_sale_summary(&src, filter),
        tax: tally_reports::tax_report(&src, filter),
        expenses: tally_reports::expense_summary(&src, filter),
        restock,
    }
}
