//! # tally-core: Pure Domain Model for the Tally Back-Office
//!
//! This crate is the **vocabulary** shared by every other crate in the
//! workspace. It defines the entities, the money arithmetic and the date
//! boundaries, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Tally Back-Office Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser Front-End                            │   │
//! │  │   Dashboard ──► Reports ──► Admin screens ──► Insights panel    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │  apps/backoffice  (permission checks, ApiError, config)         │   │
//! │  └──────────┬──────────────────┬───────────────────┬───────────────┘   │
//! │             │                  │                   │                    │
//! │  ┌──────────▼──────┐  ┌────────▼────────┐  ┌───────▼─────────┐        │
//! │  │  tally-store    │  │  tally-reports  │  │ tally-insights  │        │
//! │  │  collections    │  │  pure folds     │  │ HTTP proxy      │        │
//! │  └──────────┬──────┘  └────────┬────────┘  └─────────────────┘        │
//! │             │                  │                                        │
//! │  ┌──────────▼──────────────────▼──────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │  period   │  │   │
//! │  │   │  Product  │  │   Money   │  │   Tax     │  │ DateRange │  │   │
//! │  │   │   Sale    │  │   Rate    │  │ Discount  │  │ DateWindow│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entity definitions (Product, Sale, Role, ...)
//! - [`money`] - Money and Rate types with integer arithmetic
//! - [`pricing`] - Tax and discount rules shared by the store and reports
//! - [`period`] - Inclusive calendar-date ranges and their UTC windows
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::money::{Money, Rate};
//! use tally_core::pricing::{line_tax, Tax};
//!
//! // 2.50 at 5% tax, two units
//! let tax = Tax::Percentage(Rate::from_bps(500));
//! let line = line_tax(&tax, Money::from_cents(250), 2);
//! assert_eq!(line.cents(), 25);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod period;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Rate};
pub use period::{DateRange, DateWindow};
pub use pricing::{Discount, Tax, TaxBasis};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Id of the role that is granted every permission.
///
/// A role with this id passes every permission check regardless of the
/// permissions it lists.
pub const ADMIN_ROLE_ID: &str = "admin";

/// Number of entries in the "top products" rankings.
pub const DEFAULT_TOP_N: usize = 5;

/// Maximum quantity of a single product on one transaction line.
///
/// Catches fat-fingered entries (10000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 9_999;
