//! # State Module
//!
//! Separate state types instead of one `AppState`: each command declares
//! exactly the state it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐               │
//! │  │  StoreState  │  │ ConfigState  │  │  InsightsState   │               │
//! │  │              │  │              │  │                  │               │
//! │  │ SharedStore  │  │ Backoffice-  │  │ InsightsClient   │               │
//! │  │ Arc<Mutex<   │  │ Config       │  │ (reqwest, Arc    │               │
//! │  │   Store>>    │  │              │  │  inside)         │               │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘               │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • StoreState: one mutex; a permission check and its mutation run       │
//! │    under the same lock                                                  │
//! │  • ConfigState: read-only after initialization                          │
//! │  • InsightsState: the client is Clone + Send + Sync                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod insights;
mod store;

pub use config::ConfigState;
pub use insights::InsightsState;
pub use store::StoreState;
