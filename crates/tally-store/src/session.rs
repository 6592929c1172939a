//! # Session and Permissions
//!
//! The demo session and the role-based permission check.
//!
//! ## Demo Auth
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sign_in_as(user_id)      ──► session = Some(user_id)                   │
//! │  sign_in_with_email(...)  ──► looks the user up, same as above          │
//! │                                                                         │
//! │  sign_in_with_password    ──┐                                           │
//! │  sign_up                    ├──► StoreError::NotImplemented             │
//! │  reset_password           ──┘                                           │
//! │                                                                         │
//! │  No credential is ever checked: the demo trusts whoever it is told.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_core::{EntityId, Role, User};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

impl Store {
    // =========================================================================
    // Permission Check
    // =========================================================================

    /// Whether `user_id` may perform `permission`.
    ///
    /// The admin role passes every check. An unknown user, or a user whose
    /// role no longer resolves, is granted nothing.
    pub fn has_permission(&self, user_id: &EntityId, permission: &str) -> bool {
        let granted = self
            .get::<User>(user_id)
            .and_then(|user| self.get::<Role>(&user.role_id))
            .is_some_and(|role| role.grants(permission));

        debug!(user_id = %user_id, permission, granted, "Permission check");
        granted
    }

    /// [`Store::has_permission`] for the signed-in user; false when signed out.
    pub fn current_user_can(&self, permission: &str) -> bool {
        self.session_user_id
            .as_ref()
            .is_some_and(|id| self.has_permission(id, permission))
    }

    // =========================================================================
    // Session
    // =========================================================================

    pub fn current_user(&self) -> Option<&User> {
        self.session_user_id.as_ref().and_then(|id| self.get::<User>(id))
    }

    /// The signed-in user, or `Unauthenticated`.
    pub fn require_user(&self) -> StoreResult<&User> {
        self.current_user()
            .ok_or_else(|| StoreError::Unauthenticated("no active session".to_string()))
    }

    /// Starts a demo session as `user_id`.
    pub fn sign_in_as(&mut self, user_id: &EntityId) -> StoreResult<User> {
        let user = self
            .get::<User>(user_id)
            .cloned()
            .ok_or_else(|| StoreError::Unauthenticated(format!("unknown user {user_id}")))?;

        self.session_user_id = Some(user.id.clone());
        info!(user_id = %user.id, name = %user.name, "Signed in");
        Ok(user)
    }

    /// Starts a demo session for the user with `email` (case-insensitive).
    pub fn sign_in_with_email(&mut self, email: &str) -> StoreResult<User> {
        let email = email.trim();
        let user_id = self
            .list::<User>()
            .iter()
            .find(|u| u.email.trim().eq_ignore_ascii_case(email))
            .map(|u| u.id.clone())
            .ok_or_else(|| StoreError::Unauthenticated(format!("no user with email {email}")))?;

        self.sign_in_as(&user_id)
    }

    pub fn sign_out(&mut self) {
        if let Some(id) = self.session_user_id.take() {
            info!(user_id = %id, "Signed out");
        }
    }

    pub fn sign_in_with_password(&mut self, _email: &str, _password: &str) -> StoreResult<User> {
        Err(StoreError::NotImplemented("Password sign-in"))
    }

    pub fn sign_up(&mut self, _name: &str, _email: &str, _password: &str) -> StoreResult<User> {
        Err(StoreError::NotImplemented("Sign-up"))
    }

    pub fn reset_password(&mut self, _email: &str) -> StoreResult<()> {
        Err(StoreError::NotImplemented("Password reset"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dimensions;
    use std::collections::BTreeSet;
    use tally_core::ADMIN_ROLE_ID;

    /// Store with an empty-permission admin role, a cashier role and one
    /// user on each.
    fn staffed() -> (Store, EntityId, EntityId) {
        let mut store = dimensions();
        store.data.roles.push(Role {
            id: EntityId::from(ADMIN_ROLE_ID),
            name: "Administrator".to_string(),
            permissions: BTreeSet::new(),
        });
        let cashier = store
            .add(Role {
                id: EntityId::default(),
                name: "Cashier".to_string(),
                permissions: BTreeSet::from(["sales:create".to_string()]),
            })
            .unwrap();

        let admin = store
            .add(User {
                id: EntityId::default(),
                name: "Root".to_string(),
                email: "root@example.com".to_string(),
                role_id: EntityId::from(ADMIN_ROLE_ID),
                business_location_id: EntityId::from("loc-1"),
            })
            .unwrap();
        let clerk = store
            .add(User {
                id: EntityId::default(),
                name: "Clerk".to_string(),
                email: "clerk@example.com".to_string(),
                role_id: cashier.id,
                business_location_id: EntityId::from("loc-1"),
            })
            .unwrap();

        (store, admin.id, clerk.id)
    }

    #[test]
    fn test_admin_override_with_empty_permissions() {
        let (store, admin, _) = staffed();
        assert!(store.has_permission(&admin, "anything:at-all"));
    }

    #[test]
    fn test_role_permissions_are_set_membership() {
        let (store, _, clerk) = staffed();
        assert!(store.has_permission(&clerk, "sales:create"));
        assert!(!store.has_permission(&clerk, "sales:void"));
    }

    #[test]
    fn test_unknown_user_has_no_permissions() {
        let (store, _, _) = staffed();
        assert!(!store.has_permission(&EntityId::from("ghost"), "sales:create"));
    }

    #[test]
    fn test_current_user_can_requires_session() {
        let (mut store, _, clerk) = staffed();
        assert!(!store.current_user_can("sales:create"));

        store.sign_in_as(&clerk).unwrap();
        assert!(store.current_user_can("sales:create"));

        store.sign_out();
        assert!(store.current_user().is_none());
    }

    #[test]
    fn test_sign_in_with_email_ignores_case() {
        let (mut store, admin, _) = staffed();
        let user = store.sign_in_with_email(" ROOT@example.com ").unwrap();
        assert_eq!(user.id, admin);
    }

    #[test]
    fn test_password_flows_not_implemented() {
        let (mut store, _, _) = staffed();
        assert!(matches!(
            store.sign_in_with_password("root@example.com", "hunter2"),
            Err(StoreError::NotImplemented(_))
        ));
        assert!(matches!(store.reset_password("root@example.com"), Err(StoreError::NotImplemented(_))));
        assert!(store.current_user().is_none());
    }
}
