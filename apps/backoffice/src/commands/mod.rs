//! # Commands Module
//!
//! Everything the front-end can ask of the back-office.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (permission names, exports)
//! ├── auth.rs     ◄─── Demo sign-in / sign-out
//! ├── catalog.rs  ◄─── Products, variants, stock ledgers
//! ├── people.rs   ◄─── Roles, users, suppliers, customers
//! ├── records.rs  ◄─── Delete any record by kind
//! ├── sales.rs    ◄─── Sales, voids, returns, purchases
//! ├── reports.rs  ◄─── Report folds and the dashboard
//! └── insights.rs ◄─── Insights prompt and chat
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_sale(&StoreState, SaleDraft)                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  StoreState::write(SALES_CREATE, |store| store.add_sale(draft))         │
//! │         │        permission check + mutation under one lock             │
//! │         ▼                                                               │
//! │  Result<Sale, ApiError>  ──►  JSON to the front-end                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod catalog;
pub mod insights;
pub mod people;
pub mod records;
pub mod reports;
pub mod sales;

// =============================================================================
// Permissions
// =============================================================================

pub const PRODUCTS_MANAGE: &str = "products:manage";
pub const SALES_CREATE: &str = "sales:create";
pub const SALES_VOID: &str = "sales:void";
pub const ROLES_MANAGE: &str = "roles:manage";
pub const USERS_MANAGE: &str = "users:manage";
pub const SUPPLIERS_MANAGE: &str = "suppliers:manage";
pub const CUSTOMERS_MANAGE: &str = "customers:manage";
pub const EXPENSES_MANAGE: &str = "expenses:manage";
pub const SETTINGS_MANAGE: &str = "settings:manage";
pub const REPORTS_VIEW: &str = "reports:view";
pub const INSIGHTS_USE: &str = "insights:use";
