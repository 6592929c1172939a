//! Locations, money movement dimensions and expenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{impl_entity, EntityId};
use crate::money::Money;

/// A shop, warehouse or other place stock and staff belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BusinessLocation {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl_entity!(BusinessLocation, BusinessLocation);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: EntityId,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
}

impl_entity!(BankAccount, BankAccount);

/// How a customer pays ("Cash", "Card"). Card-type methods settle into a
/// bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub bank_account_id: Option<EntityId>,
}

impl_entity!(PaymentMethod, PaymentMethod);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub id: EntityId,
    pub name: String,
}

impl_entity!(ExpenseCategory, ExpenseCategory);

/// Money spent running the business (rent, utilities...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: EntityId,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub expense_category_id: EntityId,
    pub business_location_id: EntityId,
    pub amount: Money,
    #[serde(default)]
    pub note: Option<String>,
}

impl_entity!(Expense, Expense, dated);
