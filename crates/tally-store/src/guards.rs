//! # Referential-Integrity Guards
//!
//! Per-kind validation for the generic write path, and the dependents that
//! block a delete.
//!
//! ## Guarded Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  parent             ← dependent                                         │
//! │  ──────────────────   ─────────────────────────────────────────         │
//! │  Role               ← User.role_id                                      │
//! │  Supplier           ← Purchase.supplier_id, PurchaseReturn.supplier_id  │
//! │  CustomerGroup      ← Customer.customer_group_id                        │
//! │  ExpenseCategory    ← Expense.expense_category_id                       │
//! │  Brand/Category/Unit← Product                                           │
//! │  BusinessLocation   ← User, Product                                     │
//! │  BankAccount        ← PaymentMethod.bank_account_id                     │
//! │  PaymentMethod      ← Sale.payments[].method_id                         │
//! │  Variation          ← VariationValue.variation_id                       │
//! │  VariationValue     ← Product.variation_value_id                        │
//! │  Customer           ← Sale.customer.id                                  │
//! │  Product            ← Product.parent_product_id                         │
//! │                                                                         │
//! │  User: the signed-in user cannot delete themselves.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_core::validation::{
    validate_amount, validate_email, validate_name, validate_permission, validate_price,
    validate_rate, validate_sku,
};
use tally_core::{
    BankAccount, Brand, BusinessLocation, Category, Customer, CustomerGroup, EntityId,
    EntityKind, Expense, ExpenseCategory, PaymentMethod, Product, Role, Sale, Supplier, Tax,
    Unit, User, ValidationError, Variation, VariationValue,
};

use crate::error::{Blocker, StoreError, StoreResult};
use crate::store::{Managed, Store};

/// Fails with `blocker` when `count` dependents exist.
fn guard(entity: EntityKind, id: &EntityId, blocker: Blocker, count: usize) -> StoreResult<()> {
    if count == 0 {
        return Ok(());
    }
    Err(StoreError::ReferentialIntegrity {
        entity,
        id: id.to_string(),
        blocker,
        count,
    })
}

fn count_where<T>(records: &[T], pred: impl Fn(&T) -> bool) -> usize {
    records.iter().filter(|r| pred(r)).count()
}

// =============================================================================
// Catalog
// =============================================================================

impl Managed for Product {
    fn validate(&self, store: &Store) -> StoreResult<()> {
        validate_sku(&self.sku)?;
        validate_name("name", &self.name)?;
        validate_price("costPrice", self.cost_price)?;
        validate_price("price", self.price)?;
        match self.tax {
            Tax::Percentage(rate) => validate_rate("tax", rate)?,
            Tax::Fixed(amount) => validate_price("tax", amount)?,
        }
        if self.reorder_point < 0 {
            return Err(ValidationError::OutOfRange {
                field: "reorderPoint".to_string(),
                min: 0,
                max: i64::MAX,
            }
            .into());
        }

        let sku = self.sku.trim();
        if store
            .list::<Product>()
            .iter()
            .any(|p| p.id != self.id && p.sku.trim().eq_ignore_ascii_case(sku))
        {
            return Err(ValidationError::Duplicate {
                field: "sku".to_string(),
                value: sku.to_string(),
            }
            .into());
        }

        store.require_ref::<Category>("categoryId", &self.category_id)?;
        store.require_ref::<Brand>("brandId", &self.brand_id)?;
        store.require_ref::<Unit>("unitId", &self.unit_id)?;
        store.require_ref::<BusinessLocation>("businessLocationId", &self.business_location_id)?;

        if let Some(parent) = &self.parent_product_id {
            if parent == &self.id {
                return Err(ValidationError::InvalidFormat {
                    field: "parentProductId".to_string(),
                    reason: "a product cannot be its own parent".to_string(),
                }
                .into());
            }
            store.require_ref::<Product>("parentProductId", parent)?;
        }
        if let Some(value) = &self.variation_value_id {
            store.require_ref::<VariationValue>("variationValueId", value)?;
        }
        Ok(())
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        let variants = count_where(store.list::<Product>(), |p| p.is_variant_of(id));
        guard(EntityKind::Product, id, Blocker::ProductHasVariants, variants)
    }
}

impl Managed for Category {
    fn validate(&self, _store: &Store) -> StoreResult<()> {
        validate_name("name", &self.name)?;
        Ok(())
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        let n = count_where(store.list::<Product>(), |p| &p.category_id == id);
        guard(EntityKind::Category, id, Blocker::CategoryHasProducts, n)
    }
}

impl Managed for Brand {
    fn validate(&self, _store: &Store) -> StoreResult<()> {
        validate_name("name", &self.name)?;
        Ok(())
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        let n = count_where(store.list::<Product>(), |p| &p.brand_id == id);
        guard(EntityKind::Brand, id, Blocker::BrandHasProducts, n)
    }
}

impl Managed for Unit {
    fn validate(&self, _store: &Store) -> StoreResult<()> {
        validate_name("name", &self.name)?;
        validate_name("shortName", &self.short_name)?;
        Ok(())
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        let n = count_where(store.list::<Product>(), |p| &p.unit_id == id);
        guard(EntityKind::Unit, id, Blocker::UnitHasProducts, n)
    }
}

impl Managed for Variation {
    fn validate(&self, _store: &Store) -> StoreResult<()> {
        validate_name("name", &self.name)?;
        Ok(())
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        let n = count_where(store.list::<VariationValue>(), |v| &v.variation_id == id);
        guard(EntityKind::Variation, id, Blocker::VariationHasValues, n)
    }
}

impl Managed for VariationValue {
    fn validate(&self, store: &Store) -> StoreResult<()> {
        validate_name("name", &self.name)?;
        store.require_ref::<Variation>("variationId", &self.variation_id)
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        let n = count_where(store.list::<Product>(), |p| p.variation_value_id.as_ref() == Some(id));
        guard(EntityKind::VariationValue, id, Blocker::VariationValueUsedByProducts, n)
    }
}

// =============================================================================
// People
// =============================================================================

impl Managed for Role {
    fn validate(&self, _store: &Store) -> StoreResult<()> {
        validate_name("name", &self.name)?;
        for permission in &self.permissions {
            validate_permission(permission)?;
        }
        Ok(())
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        let n = count_where(store.list::<User>(), |u| &u.role_id == id);
        guard(EntityKind::Role, id, Blocker::RoleAssignedToUsers, n)
    }
}

impl Managed for User {
    fn validate(&self, store: &Store) -> StoreResult<()> {
        validate_name("name", &self.name)?;
        if self.email.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "email".to_string(),
            }
            .into());
        }
        validate_email(Some(&self.email))?;

        let email = self.email.trim();
        if store
            .list::<User>()
            .iter()
            .any(|u| u.id != self.id && u.email.trim().eq_ignore_ascii_case(email))
        {
            return Err(ValidationError::Duplicate {
                field: "email".to_string(),
                value: email.to_string(),
            }
            .into());
        }

        store.require_ref::<Role>("roleId", &self.role_id)?;
        store.require_ref::<BusinessLocation>("businessLocationId", &self.business_location_id)
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        if store.session_user_id.as_ref() == Some(id) {
            return Err(StoreError::SelfDeletion);
        }
        Ok(())
    }
}

impl Managed for Customer {
    fn validate(&self, store: &Store) -> StoreResult<()> {
        validate_name("name", &self.name)?;
        validate_email(self.email.as_deref())?;
        if let Some(group) = &self.customer_group_id {
            store.require_ref::<CustomerGroup>("customerGroupId", group)?;
        }
        Ok(())
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        let n = count_where(store.list::<Sale>(), |s| &s.customer.id == id);
        guard(EntityKind::Customer, id, Blocker::CustomerHasSales, n)
    }
}

impl Managed for CustomerGroup {
    fn validate(&self, _store: &Store) -> StoreResult<()> {
        validate_name("name", &self.name)?;
        validate_rate("discount", self.discount)?;
        Ok(())
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        let n = count_where(store.list::<Customer>(), |c| c.customer_group_id.as_ref() == Some(id));
        guard(EntityKind::CustomerGroup, id, Blocker::CustomerGroupHasCustomers, n)
    }
}

impl Managed for Supplier {
    fn validate(&self, _store: &Store) -> StoreResult<()> {
        validate_name("name", &self.name)?;
        validate_email(self.email.as_deref())?;
        Ok(())
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        let purchases = count_where(store.list::<tally_core::Purchase>(), |p| &p.supplier_id == id);
        guard(EntityKind::Supplier, id, Blocker::SupplierHasPurchases, purchases)?;

        let returns = count_where(store.list::<tally_core::PurchaseReturn>(), |r| &r.supplier_id == id);
        guard(EntityKind::Supplier, id, Blocker::SupplierHasPurchaseReturns, returns)
    }
}

// =============================================================================
// Finance
// =============================================================================

impl Managed for BusinessLocation {
    fn validate(&self, _store: &Store) -> StoreResult<()> {
        validate_name("name", &self.name)?;
        Ok(())
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        let users = count_where(store.list::<User>(), |u| &u.business_location_id == id);
        guard(EntityKind::BusinessLocation, id, Blocker::LocationHasUsers, users)?;

        let products = count_where(store.list::<Product>(), |p| &p.business_location_id == id);
        guard(EntityKind::BusinessLocation, id, Blocker::LocationHasProducts, products)
    }
}

impl Managed for PaymentMethod {
    fn validate(&self, store: &Store) -> StoreResult<()> {
        validate_name("name", &self.name)?;
        if let Some(account) = &self.bank_account_id {
            store.require_ref::<BankAccount>("bankAccountId", account)?;
        }
        Ok(())
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        let n = count_where(store.list::<Sale>(), |s| s.paid_with(id));
        guard(EntityKind::PaymentMethod, id, Blocker::PaymentMethodUsedBySales, n)
    }
}

impl Managed for BankAccount {
    fn validate(&self, _store: &Store) -> StoreResult<()> {
        validate_name("bankName", &self.bank_name)?;
        validate_name("accountName", &self.account_name)?;
        validate_name("accountNumber", &self.account_number)?;
        Ok(())
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        let n = count_where(store.list::<PaymentMethod>(), |m| m.bank_account_id.as_ref() == Some(id));
        guard(EntityKind::BankAccount, id, Blocker::BankAccountHasPaymentMethods, n)
    }
}

impl Managed for ExpenseCategory {
    fn validate(&self, _store: &Store) -> StoreResult<()> {
        validate_name("name", &self.name)?;
        Ok(())
    }

    fn guard_delete(store: &Store, id: &EntityId) -> StoreResult<()> {
        let n = count_where(store.list::<Expense>(), |e| &e.expense_category_id == id);
        guard(EntityKind::ExpenseCategory, id, Blocker::ExpenseCategoryHasExpenses, n)
    }
}

impl Managed for Expense {
    fn validate(&self, store: &Store) -> StoreResult<()> {
        validate_amount("amount", self.amount)?;
        store.require_ref::<ExpenseCategory>("expenseCategoryId", &self.expense_category_id)?;
        store.require_ref::<BusinessLocation>("businessLocationId", &self.business_location_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{dimensions, product, supplier};
    use chrono::Utc;
    use std::collections::BTreeSet;
    use tally_core::{Money, PurchaseReturn, Rate, Totals};

    fn cashier_role() -> Role {
        Role {
            id: EntityId::default(),
            name: "Cashier".to_string(),
            permissions: BTreeSet::from(["sales:create".to_string()]),
        }
    }

    fn user(name: &str, email: &str, role_id: &EntityId) -> User {
        User {
            id: EntityId::default(),
            name: name.to_string(),
            email: email.to_string(),
            role_id: role_id.clone(),
            business_location_id: EntityId::from("loc-1"),
        }
    }

    #[test]
    fn test_role_delete_blocked_by_users() {
        let mut store = dimensions();
        let role = store.add(cashier_role()).unwrap();
        store.add(user("Ana", "ana@example.com", &role.id)).unwrap();

        let err = store.delete::<Role>(&role.id).unwrap_err();

        assert!(matches!(
            err,
            StoreError::ReferentialIntegrity {
                blocker: Blocker::RoleAssignedToUsers,
                count: 1,
                ..
            }
        ));
        assert_eq!(store.list::<Role>().len(), 1);
    }

    #[test]
    fn test_unreferenced_role_can_be_deleted() {
        let mut store = dimensions();
        let role = store.add(cashier_role()).unwrap();

        let removed = store.delete::<Role>(&role.id).unwrap();

        assert_eq!(removed.name, "Cashier");
        assert!(store.list::<Role>().is_empty());
    }

    #[test]
    fn test_category_delete_blocked_by_products() {
        let mut store = dimensions();
        store.add(product("A", 500, 10)).unwrap();

        let err = store.delete::<Category>(&EntityId::from("cat-1")).unwrap_err();

        assert!(matches!(
            err,
            StoreError::ReferentialIntegrity {
                blocker: Blocker::CategoryHasProducts,
                ..
            }
        ));
        assert_eq!(store.list::<Category>().len(), 1);
    }

    #[test]
    fn test_location_delete_names_users_first() {
        let mut store = dimensions();
        let role = store.add(cashier_role()).unwrap();
        store.add(user("Ana", "ana@example.com", &role.id)).unwrap();
        store.add(product("A", 500, 10)).unwrap();

        let err = store
            .delete::<BusinessLocation>(&EntityId::from("loc-1"))
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::ReferentialIntegrity {
                blocker: Blocker::LocationHasUsers,
                ..
            }
        ));
    }

    #[test]
    fn test_signed_in_user_cannot_delete_self() {
        let mut store = dimensions();
        let role = store.add(cashier_role()).unwrap();
        let ana = store.add(user("Ana", "ana@example.com", &role.id)).unwrap();
        store.sign_in_as(&ana.id).unwrap();

        let err = store.delete::<User>(&ana.id).unwrap_err();

        assert!(matches!(err, StoreError::SelfDeletion));
        assert_eq!(store.list::<User>().len(), 1);
    }

    #[test]
    fn test_duplicate_sku_rejected_case_insensitively() {
        let mut store = dimensions();
        store.add(product("tea-1", 500, 10)).unwrap();

        let err = store.add(product("TEA-1", 600, 1)).unwrap_err();

        assert!(matches!(err, StoreError::Validation(ValidationError::Duplicate { .. })));
    }

    #[test]
    fn test_update_keeps_own_sku() {
        let mut store = dimensions();
        let mut p = store.add(product("TEA-1", 500, 10)).unwrap();
        p.stock = 3;

        assert!(store.update(p).is_ok());
    }

    #[test]
    fn test_invalid_permission_string_rejected() {
        let mut store = dimensions();
        let mut role = cashier_role();
        role.permissions.insert("Everything".to_string());

        assert!(matches!(store.add(role), Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_variation_delete_blocked_by_values() {
        let mut store = dimensions();
        let size = store
            .add(Variation {
                id: EntityId::default(),
                name: "Size".to_string(),
            })
            .unwrap();
        store
            .add(VariationValue {
                id: EntityId::default(),
                variation_id: size.id.clone(),
                name: "Large".to_string(),
            })
            .unwrap();

        let err = store.delete::<Variation>(&size.id).unwrap_err();
        assert!(matches!(
            err,
            StoreError::ReferentialIntegrity {
                blocker: Blocker::VariationHasValues,
                ..
            }
        ));
    }

    #[test]
    fn test_customer_group_delete_blocked_by_members() {
        let mut store = dimensions();
        let group = store
            .add(CustomerGroup {
                id: EntityId::default(),
                name: "Wholesale".to_string(),
                discount: Rate::from_bps(500),
            })
            .unwrap();
        store
            .add(Customer {
                id: EntityId::default(),
                name: "Corner Cafe".to_string(),
                email: None,
                phone: None,
                customer_group_id: Some(group.id.clone()),
            })
            .unwrap();

        let err = store.delete::<CustomerGroup>(&group.id).unwrap_err();

        assert!(matches!(
            err,
            StoreError::ReferentialIntegrity {
                blocker: Blocker::CustomerGroupHasCustomers,
                count: 1,
                ..
            }
        ));
        assert_eq!(store.list::<CustomerGroup>().len(), 1);
    }

    #[test]
    fn test_expense_category_delete_blocked_by_expenses() {
        let mut store = dimensions();
        let rent = store
            .add(ExpenseCategory {
                id: EntityId::default(),
                name: "Rent".to_string(),
            })
            .unwrap();
        store
            .add(Expense {
                id: EntityId::default(),
                date: Utc::now(),
                expense_category_id: rent.id.clone(),
                business_location_id: EntityId::from("loc-1"),
                amount: Money::from_cents(120_000),
                note: None,
            })
            .unwrap();

        let err = store.delete::<ExpenseCategory>(&rent.id).unwrap_err();

        assert!(matches!(
            err,
            StoreError::ReferentialIntegrity {
                blocker: Blocker::ExpenseCategoryHasExpenses,
                count: 1,
                ..
            }
        ));
        assert_eq!(store.list::<ExpenseCategory>().len(), 1);
    }

    #[test]
    fn test_bank_account_delete_blocked_by_payment_methods() {
        let mut store = dimensions();
        let account = store
            .add(BankAccount {
                id: EntityId::default(),
                bank_name: "First Bank".to_string(),
                account_name: "Till".to_string(),
                account_number: "0042".to_string(),
            })
            .unwrap();
        store
            .add(PaymentMethod {
                id: EntityId::default(),
                name: "Card".to_string(),
                bank_account_id: Some(account.id.clone()),
            })
            .unwrap();

        let err = store.delete::<BankAccount>(&account.id).unwrap_err();

        assert!(matches!(
            err,
            StoreError::ReferentialIntegrity {
                blocker: Blocker::BankAccountHasPaymentMethods,
                count: 1,
                ..
            }
        ));
        assert_eq!(store.list::<BankAccount>().len(), 1);
    }

    #[test]
    fn test_brand_and_unit_delete_blocked_by_products() {
        let mut store = dimensions();
        store.add(product("A", 500, 10)).unwrap();
        store.add(product("B", 300, 4)).unwrap();

        let brand = store.delete::<Brand>(&EntityId::from("brand-1")).unwrap_err();
        let unit = store.delete::<Unit>(&EntityId::from("unit-1")).unwrap_err();

        assert!(matches!(
            brand,
            StoreError::ReferentialIntegrity {
                blocker: Blocker::BrandHasProducts,
                count: 2,
                ..
            }
        ));
        assert!(matches!(
            unit,
            StoreError::ReferentialIntegrity {
                blocker: Blocker::UnitHasProducts,
                count: 2,
                ..
            }
        ));
        assert_eq!(store.list::<Brand>().len(), 1);
        assert_eq!(store.list::<Unit>().len(), 1);
    }

    #[test]
    fn test_supplier_delete_blocked_by_purchase_returns() {
        let mut store = dimensions();
        let supplier_id = supplier(&mut store);
        store.data.purchase_returns.push(PurchaseReturn {
            id: EntityId::from("pr-1"),
            date: Utc::now(),
            supplier_id: supplier_id.clone(),
            original_purchase_id: EntityId::from("po-gone"),
            items: Vec::new(),
            totals: Totals::default(),
            reason: None,
        });

        let err = store.delete::<Supplier>(&supplier_id).unwrap_err();

        assert!(matches!(
            err,
            StoreError::ReferentialIntegrity {
                blocker: Blocker::SupplierHasPurchaseReturns,
                count: 1,
                ..
            }
        ));
        assert_eq!(store.list::<Supplier>().len(), 1);
    }
}
