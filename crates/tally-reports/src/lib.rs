//! # tally-reports: Report/Aggregation Engine
//!
//! Pure functions from `(records, filter)` to a summary. Nothing here
//! mutates a record, reads the clock or talks to the store directly: the
//! caller lends slices through [`Sources`].
//!
//! ## Reports
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Sources (borrowed slices)        ReportFilter (range, offset, dims)   │
//! │          │                                   │                          │
//! │          └──────────────┬────────────────────┘                          │
//! │                         ▼                                               │
//! │   ┌──────────────────────────────────────────────────────────────────┐  │
//! │   │ purchase_sale_summary   gross / returns / net, both directions   │  │
//! │   │ sales_analysis          revenue, count, average, top-N, splits   │  │
//! │   │ stock_report            value, status, sortable rows             │  │
//! │   │ stock_adjustment_report ledger rows, added vs subtracted         │  │
//! │   │ tax_report              output − input = net payable             │  │
//! │   │ expense_summary         total and per category                   │  │
//! │   └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │   Only COMPLETED sales count. Empty input gives zeroes, never a panic.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Date Windows
//!
//! A range of calendar days `[start, end]` covers `start 00:00:00.000`
//! through `end 23:59:59.999` in the filter's UTC offset. A missing side is
//! unbounded.
//!
//! ## Usage
//!
//! ```rust
//! use tally_reports::{sales_analysis, ReportFilter, Sources};
//!
//! let report = sales_analysis(&Sources::default(), &ReportFilter::all());
//! assert_eq!(report.sale_count, 0);
//! assert!(report.average_sale.is_zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analysis;
pub mod expenses;
pub mod filter;
pub mod stock;
pub mod summary;
pub mod tax;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use analysis::{sales_analysis, Breakdown, ProductRanking, SalesAnalysis};
pub use expenses::{expense_summary, ExpenseSummary};
pub use filter::{ReportFilter, Sources};
pub use stock::{
    stock_adjustment_report, stock_report, SortDirection, StockAdjustmentReport,
    StockAdjustmentRow, StockReport, StockRow, StockSort, StockSortKey, StockStatus,
};
pub use summary::{purchase_sale_summary, PurchaseSaleSummary};
pub use tax::{tax_report, TaxReport};
