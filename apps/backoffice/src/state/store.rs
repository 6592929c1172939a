//! # Store State
//!
//! The application's handle on the domain store.
//!
//! ## Permission-Checked Access
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  write("sales:void", |s| s.void_sale(&id))                              │
//! │    │                                                                    │
//! │    ├── lock store                                                       │
//! │    ├── session user?            no  ──► UNAUTHENTICATED                 │
//! │    ├── current_user_can(perm)?  no  ──► FORBIDDEN                       │
//! │    ├── run closure                                                      │
//! │    └── unlock                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The check and the operation share one lock, so a sign-out cannot slip
//! in between them.

use chrono::{DateTime, Utc};
use tally_store::{seed::demo_store, SharedStore, Store};
use tracing::{info, warn};

use crate::config::StoreSettings;
use crate::error::ApiError;

#[derive(Debug, Clone, Default)]
pub struct StoreState {
    shared: SharedStore,
}

impl StoreState {
    pub fn new(store: Store) -> Self {
        StoreState {
            shared: SharedStore::new(store),
        }
    }

    /// Demo data or an empty store, per `[store] seed_demo_data`.
    pub fn from_settings(settings: &StoreSettings, now: DateTime<Utc>) -> Self {
        if settings.seed_demo_data {
            info!(store = %settings.name, "Seeding demo data");
            StoreState::new(demo_store(now))
        } else {
            info!(store = %settings.name, "Starting with an empty store");
            StoreState::new(Store::new())
        }
    }

    pub fn shared(&self) -> &SharedStore {
        &self.shared
    }

    /// Reads the store after checking `permission`.
    pub fn read<R>(&self, permission: &str, f: impl FnOnce(&Store) -> R) -> Result<R, ApiError> {
        self.shared.with_store(|store| {
            authorize(store, permission)?;
            Ok(f(store))
        })
    }

    /// Reads the store for any signed-in user.
    pub fn view<R>(&self, f: impl FnOnce(&Store) -> R) -> Result<R, ApiError> {
        self.shared.with_store(|store| {
            store.require_user()?;
            Ok(f(store))
        })
    }

    /// Mutates the store after checking `permission`.
    pub fn write<R, E>(
        &self,
        permission: &str,
        f: impl FnOnce(&mut Store) -> Result<R, E>,
    ) -> Result<R, ApiError>
    where
        E: Into<ApiError>,
    {
        self.shared.with_store_mut(|store| {
            authorize(store, permission)?;
            f(store).map_err(Into::into)
        })
    }

    /// Session changes need no permission.
    pub fn session<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        self.shared.with_store_mut(f)
    }
}

fn authorize(store: &Store, permission: &str) -> Result<(), ApiError> {
    let user = store.require_user()?;
    if store.current_user_can(permission) {
        Ok(())
    } else {
        warn!(user = %user.id, permission, "Permission denied");
        Err(ApiError::forbidden(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tally_core::{EntityId, Product};
    use tally_store::StoreError;

    fn seeded() -> StoreState {
        StoreState::from_settings(&StoreSettings::default(), Utc::now())
    }

    #[test]
    fn test_anonymous_access_is_unauthenticated() {
        let state = seeded();
        let err = state.read("reports:view", |s| s.list::<Product>().len()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);
    }

    #[test]
    fn test_missing_permission_is_forbidden() {
        let state = seeded();
        state.session(|s| s.sign_in_as(&EntityId::from("user-cashier"))).unwrap();

        let err = state
            .write("sales:void", |s| s.void_sale(&EntityId::from("sale-1001")))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        // Nothing ran.
        let voided = state.shared().with_store(|s| {
            s.list::<tally_core::Sale>()
                .iter()
                .filter(|sale| !sale.is_completed())
                .count()
        });
        assert_eq!(voided, 1);
    }

    #[test]
    fn test_store_errors_pass_through() {
        let state = seeded();
        state.session(|s| s.sign_in_as(&EntityId::from("user-admin"))).unwrap();

        let err = state
            .write("products:manage", |s| s.delete::<Product>(&EntityId::from("p-missing")))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let ok: Result<usize, ApiError> =
            state.write("products:manage", |s| Ok::<_, StoreError>(s.list::<Product>().len()));
        assert!(ok.unwrap() > 0);
    }

    #[test]
    fn test_empty_store_when_seeding_disabled() {
        let settings = StoreSettings {
            seed_demo_data: false,
            ..StoreSettings::default()
        };
        let state = StoreState::from_settings(&settings, Utc::now());
        assert_eq!(state.shared().with_store(|s| s.list::<Product>().len()), 0);
    }
}
