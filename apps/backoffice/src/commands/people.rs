//! # People Commands
//!
//! Roles, users, suppliers and customers.

use tally_core::{Customer, EntityId, Role, Supplier, User};

use super::records;
use crate::error::ApiError;
use crate::state::StoreState;

// =============================================================================
// Roles
// =============================================================================

pub fn list_roles(store: &StoreState) -> Result<Vec<Role>, ApiError> {
    store.view(|s| s.list::<Role>().to_vec())
}

pub fn create_role(store: &StoreState, role: Role) -> Result<Role, ApiError> {
    records::create(store, role)
}

pub fn update_role(store: &StoreState, role: Role) -> Result<Role, ApiError> {
    records::update(store, role)
}

pub fn delete_role(store: &StoreState, id: EntityId) -> Result<Role, ApiError> {
    records::delete(store, &id)
}

// =============================================================================
// Users
// =============================================================================

pub fn list_users(store: &StoreState) -> Result<Vec<User>, ApiError> {
    store.view(|s| s.list::<User>().to_vec())
}

pub fn create_user(store: &StoreState, user: User) -> Result<User, ApiError> {
    records::create(store, user)
}

pub fn update_user(store: &StoreState, user: User) -> Result<User, ApiError> {
    records::update(store, user)
}

pub fn delete_user(store: &StoreState, id: EntityId) -> Result<User, ApiError> {
    records::delete(store, &id)
}

// =============================================================================
// Suppliers
// =============================================================================

pub fn list_suppliers(store: &StoreState) -> Result<Vec<Supplier>, ApiError> {
    store.view(|s| s.list::<Supplier>().to_vec())
}

pub fn create_supplier(store: &StoreState, supplier: Supplier) -> Result<Supplier, ApiError> {
    records::create(store, supplier)
}

pub fn update_supplier(store: &StoreState, supplier: Supplier) -> Result<Supplier, ApiError> {
    records::update(store, supplier)
}

pub fn delete_supplier(store: &StoreState, id: EntityId) -> Result<Supplier, ApiError> {
    records::delete(store, &id)
}

// =============================================================================
// Customers
// =============================================================================

pub fn list_customers(store: &StoreState) -> Result<Vec<Customer>, ApiError> {
    store.view(|s| s.list::<Customer>().to_vec())
}

pub fn create_customer(store: &StoreState, customer: Customer) -> Result<Customer, ApiError> {
    records::create(store, customer)
}

pub fn update_customer(store: &StoreState, customer: Customer) -> Result<Customer, ApiError> {
    records::update(store, customer)
}

pub fn delete_customer(store: &StoreState, id: EntityId) -> Result<Customer, ApiError> {
    records::delete(store, &id)
}
