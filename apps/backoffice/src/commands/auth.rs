//! # Auth Commands
//!
//! Demo authentication: a session is fabricated for an existing user.
//! Password flows answer `NOT_IMPLEMENTED`.

use tally_core::{EntityId, User};
use tracing::debug;

use crate::error::ApiError;
use crate::state::StoreState;

pub fn sign_in_as(store: &StoreState, user_id: EntityId) -> Result<User, ApiError> {
    debug!(user = %user_id, "sign_in_as command");
    Ok(store.session(|s| s.sign_in_as(&user_id))?)
}

pub fn sign_in_with_email(store: &StoreState, email: String) -> Result<User, ApiError> {
    debug!("sign_in_with_email command");
    Ok(store.session(|s| s.sign_in_with_email(&email))?)
}

pub fn sign_in_with_password(
    store: &StoreState,
    email: String,
    password: String,
) -> Result<User, ApiError> {
    Ok(store.session(|s| s.sign_in_with_password(&email, &password))?)
}

pub fn sign_up(
    store: &StoreState,
    name: String,
    email: String,
    password: String,
) -> Result<User, ApiError> {
    Ok(store.session(|s| s.sign_up(&name, &email, &password))?)
}

pub fn reset_password(store: &StoreState, email: String) -> Result<(), ApiError> {
    Ok(store.session(|s| s.reset_password(&email))?)
}

pub fn sign_out(store: &StoreState) {
    debug!("sign_out command");
    store.session(|s| s.sign_out());
}

pub fn current_user(store: &StoreState) -> Option<User> {
    store.shared().with_store(|s| s.current_user().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tally_store::seed::demo_store;

    fn state() -> StoreState {
        StoreState::new(demo_store(chrono::Utc::now()))
    }

    #[test]
    fn test_sign_in_and_out() {
        let store = state();
        let user = sign_in_as(&store, EntityId::from("user-manager")).unwrap();
        assert_eq!(current_user(&store).map(|u| u.id), Some(user.id));

        sign_out(&store);
        assert!(current_user(&store).is_none());
    }

    #[test]
    fn test_unknown_user_is_unauthenticated() {
        let err = sign_in_as(&state(), EntityId::from("ghost")).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);
    }

    #[test]
    fn test_password_flows_are_not_implemented() {
        let store = state();
        let err = sign_in_with_password(&store, "a@b.co".into(), "pw".into()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotImplemented);
        let err = reset_password(&store, "a@b.co".into()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotImplemented);
    }
}
