//! # tally-store: In-Memory Domain Store
//!
//! This crate owns every entity collection of the back-office and the
//! operations that change them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Data Flow                                  │
//! │                                                                         │
//! │  Backoffice command (create_sale, delete_record, ...)                   │
//! │       │  permission check first                                         │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tally-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │  Operations   │    │   Guards     │  │   │
//! │  │   │  (store.rs)   │    │  sales.rs     │    │ (guards.rs)  │  │   │
//! │  │   │               │    │  purchasing   │    │              │  │   │
//! │  │   │ Collections   │◄───│  inventory    │    │ Role ← User  │  │   │
//! │  │   │ Session       │    │  catalog      │    │ Brand← Prod. │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │  read-only slices                                               │
//! │       ▼                                                                 │
//! │  tally-reports (pure folds)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Collections and the generic add / update / delete path
//! - [`guards`] - Per-kind validation and referential-integrity guards
//! - [`sales`] - Sales, voids and customer returns
//! - [`purchasing`] - Purchases and purchase returns
//! - [`inventory`] - Stock adjustment and transfer ledgers
//! - [`catalog`] - Variable products
//! - [`session`] - Permission check and the demo session
//! - [`seed`] - Demo data
//! - [`shared`] - Mutex-wrapped store handle
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Utc;
//! use tally_core::{EntityId, Product};
//! use tally_store::{seed::demo_store, DraftLine, SaleDraft};
//!
//! let mut store = demo_store(Utc::now());
//! let sale = store
//!     .add_sale(SaleDraft {
//!         customer_id: EntityId::from("cust-walk-in"),
//!         business_location_id: EntityId::from("loc-main"),
//!         lines: vec![DraftLine::new("p-soda", 2)],
//!         payments: vec![],
//!         discount: None,
//!         note: None,
//!     })
//!     .unwrap();
//!
//! assert_eq!(sale.item_count(), 2);
//! assert_eq!(store.find::<Product>(&EntityId::from("p-soda")).unwrap().stock, 58);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod drafts;
pub mod error;
pub mod guards;
pub mod inventory;
pub mod purchasing;
pub mod sales;
pub mod seed;
pub mod session;
pub mod shared;
pub mod store;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::VariantDraft;
pub use drafts::{DraftLine, ReturnLine};
pub use error::{Blocker, StoreError, StoreResult};
pub use inventory::{StockAdjustmentDraft, StockTransferDraft};
pub use purchasing::{PurchaseDraft, PurchaseReturnDraft};
pub use sales::{CustomerReturnDraft, SaleDraft};
pub use shared::SharedStore;
pub use store::{Collections, Managed, Store, Stored};
