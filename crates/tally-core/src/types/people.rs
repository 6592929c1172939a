//! People: staff (roles and users), customers and suppliers.
//!
//! ## Permission Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User ──role_id──► Role { permissions: {"sales:create", ...} }          │
//! │                                                                         │
//! │  grants(p) = role.id == "admin"  ||  p ∈ role.permissions               │
//! │                                                                         │
//! │  The admin role passes every check, whatever it lists.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{impl_entity, EntityId};
use crate::money::Rate;
use crate::ADMIN_ROLE_ID;

// =============================================================================
// Staff
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: EntityId,
    pub name: String,
    /// Flat, unscoped permission strings such as `products:manage`.
    #[serde(default)]
    pub permissions: BTreeSet<String>,
}

impl_entity!(Role, Role);

impl Role {
    /// True for the designated all-powerful role.
    pub fn is_admin(&self) -> bool {
        self.id == ADMIN_ROLE_ID
    }

    /// Whether holders of this role may perform `permission`.
    pub fn grants(&self, permission: &str) -> bool {
        self.is_admin() || self.permissions.contains(permission)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub role_id: EntityId,
    pub business_location_id: EntityId,
}

impl_entity!(User, User);

// =============================================================================
// Customers
// =============================================================================

/// Pricing tier for customers (e.g. "Wholesale").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerGroup {
    pub id: EntityId,
    pub name: String,
    /// Default discount applied to members of this group.
    #[serde(default)]
    pub discount: Rate,
}

impl_entity!(CustomerGroup, CustomerGroup);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub customer_group_id: Option<EntityId>,
}

impl_entity!(Customer, Customer);

// =============================================================================
// Suppliers
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl_entity!(Supplier, Supplier);
