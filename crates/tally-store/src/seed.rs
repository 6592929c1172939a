//! # Demo Seed Data
//!
//! Builds the store the back-office starts with.
//!
//! ## What Gets Seeded
//! - 2 locations, 4 categories, 2 brands, 2 units, a Size variation
//! - Roles `admin` (no listed permissions, passes every check), `manager`,
//!   `cashier`, with one user each
//! - Retail and wholesale customer groups, a walk-in customer
//! - 2 suppliers, a bank account, Cash and Card payment methods
//! - 8 products, one of them a variable shirt with two variants
//! - Two weeks of history: sales (one voided), a purchase, a purchase
//!   return, a customer return, stock adjustments, a transfer, expenses
//!
//! History is dated relative to `now` so the dashboards always have recent
//! activity. Stock levels are the seeded values; the history does not
//! replay into them.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};
use tally_core::{
    AdjustmentKind, BankAccount, Brand, BusinessLocation, Category, Customer, CustomerGroup,
    CustomerRef, CustomerReturn, Discount, EntityId, Expense, ExpenseCategory, LineItem, Money,
    Payment, PaymentMethod, Product, Purchase, PurchaseReturn, Rate, Role, Sale, SaleStatus,
    StockAdjustment, StockTransfer, Supplier, Tax, TaxBasis, Totals, Unit, User, Variation,
    VariationValue, ADMIN_ROLE_ID,
};
use tracing::info;

use crate::store::{Collections, Store};

/// `(id, name)` pairs for the simple dimension tables.
const CATEGORIES: &[(&str, &str)] = &[
    ("cat-beverages", "Beverages"),
    ("cat-snacks", "Snacks"),
    ("cat-apparel", "Apparel"),
    ("cat-household", "Household"),
];

const MANAGER_PERMISSIONS: &[&str] = &[
    "products:manage",
    "sales:create",
    "sales:void",
    "suppliers:manage",
    "reports:view",
    "insights:use",
];

const CASHIER_PERMISSIONS: &[&str] = &["sales:create"];

/// `(id, sku, name, category, price, cost, tax bps, stock, reorder point)`
const PRODUCTS: &[(&str, &str, &str, &str, i64, i64, u32, i64, i64)] = &[
    ("p-coffee", "BEV-COFFEE", "House Coffee Beans 500g", "cat-beverages", 1299, 650, 500, 40, 10),
    ("p-tea", "BEV-TEA", "Green Tea 20 bags", "cat-beverages", 250, 120, 500, 8, 10),
    ("p-soda", "BEV-SODA", "Sparkling Water 330ml", "cat-beverages", 150, 60, 500, 60, 12),
    ("p-chips", "SNK-CHIPS", "Sea Salt Chips", "cat-snacks", 199, 90, 0, 0, 6),
    ("p-soap", "HH-SOAP", "Olive Oil Soap", "cat-household", 399, 150, 800, 25, 5),
];

fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

fn days_ago(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now - TimeDelta::days(days)
}

fn line(product: &Product, quantity: i64, basis: TaxBasis) -> LineItem {
    let unit_price = match basis {
        TaxBasis::Price => product.price,
        TaxBasis::Cost => product.cost_price,
    };
    LineItem {
        product: product.snapshot(),
        quantity,
        unit_price,
    }
}

fn product_by<'a>(products: &'a [Product], product_id: &str) -> &'a Product {
    // Only called with ids from the tables above.
    products
        .iter()
        .find(|p| p.id == product_id)
        .unwrap_or(&products[0])
}

/// Builds the demo store. Nobody is signed in.
pub fn demo_store(now: DateTime<Utc>) -> Store {
    let mut data = Collections::default();

    // =========================================================================
    // Dimensions
    // =========================================================================

    data.business_locations = vec![
        BusinessLocation {
            id: id("loc-main"),
            name: "Main Street Store".to_string(),
            address: Some("12 Main Street".to_string()),
        },
        BusinessLocation {
            id: id("loc-warehouse"),
            name: "Warehouse".to_string(),
            address: None,
        },
    ];
    data.categories = CATEGORIES
        .iter()
        .map(|(cid, name)| Category {
            id: id(cid),
            name: name.to_string(),
            description: None,
        })
        .collect();
    data.brands = vec![
        Brand {
            id: id("brand-house"),
            name: "Tally Basics".to_string(),
        },
        Brand {
            id: id("brand-acme"),
            name: "Acme".to_string(),
        },
    ];
    data.units = vec![
        Unit {
            id: id("unit-pc"),
            name: "Piece".to_string(),
            short_name: "pc".to_string(),
        },
        Unit {
            id: id("unit-pack"),
            name: "Pack".to_string(),
            short_name: "pk".to_string(),
        },
    ];
    data.variations = vec![Variation {
        id: id("var-size"),
        name: "Size".to_string(),
    }];
    data.variation_values = vec![
        VariationValue {
            id: id("val-small"),
            variation_id: id("var-size"),
            name: "Small".to_string(),
        },
        VariationValue {
            id: id("val-large"),
            variation_id: id("var-size"),
            name: "Large".to_string(),
        },
    ];

    // =========================================================================
    // People
    // =========================================================================

    let perms = |list: &[&str]| list.iter().map(|p| p.to_string()).collect::<BTreeSet<_>>();
    data.roles = vec![
        Role {
            id: id(ADMIN_ROLE_ID),
            name: "Administrator".to_string(),
            permissions: BTreeSet::new(),
        },
        Role {
            id: id("manager"),
            name: "Store Manager".to_string(),
            permissions: perms(MANAGER_PERMISSIONS),
        },
        Role {
            id: id("cashier"),
            name: "Cashier".to_string(),
            permissions: perms(CASHIER_PERMISSIONS),
        },
    ];
    data.users = [
        ("user-admin", "Alex Admin", "admin@tally.example", ADMIN_ROLE_ID),
        ("user-manager", "Morgan Manager", "manager@tally.example", "manager"),
        ("user-cashier", "Casey Cashier", "cashier@tally.example", "cashier"),
    ]
    .iter()
    .map(|(uid, name, email, role)| User {
        id: id(uid),
        name: name.to_string(),
        email: email.to_string(),
        role_id: id(role),
        business_location_id: id("loc-main"),
    })
    .collect();

    data.customer_groups = vec![
        CustomerGroup {
            id: id("grp-retail"),
            name: "Retail".to_string(),
            discount: Rate::zero(),
        },
        CustomerGroup {
            id: id("grp-wholesale"),
            name: "Wholesale".to_string(),
            discount: Rate::from_bps(1000),
        },
    ];
    data.customers = vec![
        Customer {
            id: id("cust-walk-in"),
            name: "Walk-in Customer".to_string(),
            email: None,
            phone: None,
            customer_group_id: Some(id("grp-retail")),
        },
        Customer {
            id: id("cust-cafe"),
            name: "Corner Cafe".to_string(),
            email: Some("orders@cornercafe.example".to_string()),
            phone: Some("555-0134".to_string()),
            customer_group_id: Some(id("grp-wholesale")),
        },
    ];
    data.suppliers = vec![
        Supplier {
            id: id("sup-fresh"),
            name: "Fresh Farms".to_string(),
            contact_name: Some("Dana".to_string()),
            email: Some("sales@freshfarms.example".to_string()),
            phone: None,
        },
        Supplier {
            id: id("sup-acme"),
            name: "Acme Wholesale".to_string(),
            contact_name: None,
            email: None,
            phone: Some("555-0199".to_string()),
        },
    ];

    // =========================================================================
    // Finance
    // =========================================================================

    data.bank_accounts = vec![BankAccount {
        id: id("bank-main"),
        bank_name: "First Street Bank".to_string(),
        account_name: "Tally Store Ltd".to_string(),
        account_number: "00123456".to_string(),
    }];
    data.payment_methods = vec![
        PaymentMethod {
            id: id("pm-cash"),
            name: "Cash".to_string(),
            bank_account_id: None,
        },
        PaymentMethod {
            id: id("pm-card"),
            name: "Card".to_string(),
            bank_account_id: Some(id("bank-main")),
        },
    ];
    data.expense_categories = vec![
        ExpenseCategory {
            id: id("exp-rent"),
            name: "Rent".to_string(),
        },
        ExpenseCategory {
            id: id("exp-utilities"),
            name: "Utilities".to_string(),
        },
    ];
    data.expenses = vec![
        Expense {
            id: id("expense-rent"),
            date: days_ago(now, 12),
            expense_category_id: id("exp-rent"),
            business_location_id: id("loc-main"),
            amount: Money::from_cents(120_000),
            note: Some("Monthly rent".to_string()),
        },
        Expense {
            id: id("expense-power"),
            date: days_ago(now, 2),
            expense_category_id: id("exp-utilities"),
            business_location_id: id("loc-main"),
            amount: Money::from_cents(8_450),
            note: None,
        },
    ];

    // =========================================================================
    // Catalog
    // =========================================================================

    data.products = PRODUCTS
        .iter()
        .map(|&(pid, sku, name, category, price, cost, tax_bps, stock, reorder)| Product {
            id: id(pid),
            sku: sku.to_string(),
            name: name.to_string(),
            category_id: id(category),
            brand_id: id("brand-house"),
            unit_id: id("unit-pc"),
            business_location_id: id("loc-main"),
            cost_price: Money::from_cents(cost),
            price: Money::from_cents(price),
            stock,
            reorder_point: reorder,
            tax: Tax::Percentage(Rate::from_bps(tax_bps)),
            is_age_restricted: false,
            parent_product_id: None,
            variation_value_id: None,
        })
        .collect();

    let shirt = |pid: &str, sku: &str, name: &str, stock: i64, parent: Option<&str>, value: Option<&str>| Product {
        id: id(pid),
        sku: sku.to_string(),
        name: name.to_string(),
        category_id: id("cat-apparel"),
        brand_id: id("brand-acme"),
        unit_id: id("unit-pc"),
        business_location_id: id("loc-main"),
        cost_price: Money::from_cents(800),
        price: Money::from_cents(1999),
        stock,
        reorder_point: 3,
        tax: Tax::Fixed(Money::from_cents(100)),
        is_age_restricted: false,
        parent_product_id: parent.map(id),
        variation_value_id: value.map(id),
    };
    data.products.push(shirt("p-shirt", "APP-TEE", "Classic Tee", 0, None, None));
    data.products.push(shirt("p-shirt-s", "APP-TEE-S", "Classic Tee Small", 12, Some("p-shirt"), Some("val-small")));
    data.products.push(shirt("p-shirt-l", "APP-TEE-L", "Classic Tee Large", 2, Some("p-shirt"), Some("val-large")));

    // =========================================================================
    // History
    // =========================================================================

    let products = data.products.clone();
    let p = |pid: &str| product_by(&products, pid);

    let walk_in = CustomerRef {
        id: id("cust-walk-in"),
        name: "Walk-in Customer".to_string(),
    };
    let cafe = CustomerRef {
        id: id("cust-cafe"),
        name: "Corner Cafe".to_string(),
    };

    let sale = |sid: &str, days: i64, customer: &CustomerRef, lines: Vec<LineItem>, method: &str, discount: Option<Discount>| {
        let totals = Totals::compute(&lines, discount.as_ref());
        Sale {
            id: id(sid),
            date: days_ago(now, days),
            customer: customer.clone(),
            business_location_id: id("loc-main"),
            items: lines,
            payments: vec![Payment {
                method_id: id(method),
                amount: totals.total,
            }],
            status: SaleStatus::Completed,
            discount,
            totals,
            note: None,
        }
    };

    data.sales = vec![
        sale(
            "sale-1001",
            13,
            &walk_in,
            vec![line(p("p-coffee"), 1, TaxBasis::Price), line(p("p-soda"), 4, TaxBasis::Price)],
            "pm-cash",
            None,
        ),
        sale(
            "sale-1002",
            9,
            &cafe,
            vec![line(p("p-coffee"), 6, TaxBasis::Price), line(p("p-tea"), 10, TaxBasis::Price)],
            "pm-card",
            Some(Discount::Percentage(Rate::from_bps(1000))),
        ),
        sale(
            "sale-1003",
            5,
            &walk_in,
            vec![line(p("p-shirt-s"), 2, TaxBasis::Price), line(p("p-chips"), 3, TaxBasis::Price)],
            "pm-card",
            None,
        ),
        sale(
            "sale-1004",
            1,
            &walk_in,
            vec![line(p("p-soap"), 2, TaxBasis::Price)],
            "pm-cash",
            Some(Discount::Fixed(Money::from_cents(50))),
        ),
        sale("sale-1005", 0, &walk_in, vec![line(p("p-tea"), 2, TaxBasis::Price)], "pm-cash", None),
    ];
    if let Some(voided) = data.sales.get_mut(3) {
        voided.status = SaleStatus::Voided;
        voided.note = Some("Customer changed their mind".to_string());
    }

    let restock = vec![line(p("p-coffee"), 24, TaxBasis::Cost), line(p("p-chips"), 12, TaxBasis::Cost)];
    let restock_totals = Totals::compute(&restock, None);
    data.purchases = vec![Purchase {
        id: id("purchase-501"),
        date: days_ago(now, 11),
        supplier_id: id("sup-fresh"),
        business_location_id: id("loc-main"),
        reference_no: "FF-2291".to_string(),
        items: restock,
        discount: None,
        totals: restock_totals,
    }];

    let sent_back = vec![line(p("p-chips"), 2, TaxBasis::Cost)];
    data.purchase_returns = vec![PurchaseReturn {
        id: id("preturn-1"),
        date: days_ago(now, 10),
        supplier_id: id("sup-fresh"),
        original_purchase_id: id("purchase-501"),
        totals: Totals::compute(&sent_back, None),
        items: sent_back,
        reason: Some("Crushed bags".to_string()),
    }];

    let brought_back = vec![line(p("p-tea"), 1, TaxBasis::Price)];
    data.customer_returns = vec![CustomerReturn {
        id: id("creturn-1"),
        date: days_ago(now, 8),
        customer: cafe.clone(),
        original_sale_id: id("sale-1002"),
        totals: Totals::compute(&brought_back, None),
        items: brought_back,
        reason: Some("Damaged box".to_string()),
    }];

    data.stock_adjustments = vec![
        StockAdjustment {
            id: id("adj-1"),
            date: days_ago(now, 7),
            product_id: id("p-soda"),
            kind: AdjustmentKind::Subtraction,
            quantity: 3,
            reason: "Damaged".to_string(),
        },
        StockAdjustment {
            id: id("adj-2"),
            date: days_ago(now, 3),
            product_id: id("p-soap"),
            kind: AdjustmentKind::Addition,
            quantity: 5,
            reason: "Recount".to_string(),
        },
    ];
    data.stock_transfers = vec![StockTransfer {
        id: id("transfer-1"),
        date: days_ago(now, 4),
        product_id: id("p-soda"),
        from_location_id: id("loc-warehouse"),
        to_location_id: id("loc-main"),
        quantity: 24,
        note: None,
    }];

    info!(
        products = data.products.len(),
        sales = data.sales.len(),
        users = data.users.len(),
        "Seeded demo store"
    );
    Store::from_collections(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Managed;

    #[test]
    fn test_demo_store_is_internally_consistent() {
        let store = demo_store(Utc::now());

        // Every master record passes the same checks a fresh add would.
        for p in store.list::<Product>() {
            p.validate(&store).unwrap();
        }
        for u in store.list::<User>() {
            u.validate(&store).unwrap();
        }
        for c in store.list::<Customer>() {
            c.validate(&store).unwrap();
        }
        for m in store.list::<PaymentMethod>() {
            m.validate(&store).unwrap();
        }
        for e in store.list::<Expense>() {
            e.validate(&store).unwrap();
        }
    }

    #[test]
    fn test_demo_admin_has_no_listed_permissions() {
        let store = demo_store(Utc::now());
        let admin = store.find::<Role>(&EntityId::from(ADMIN_ROLE_ID)).unwrap();

        assert!(admin.permissions.is_empty());
        assert!(store.has_permission(&EntityId::from("user-admin"), "roles:manage"));
        assert!(!store.has_permission(&EntityId::from("user-cashier"), "sales:void"));
    }

    #[test]
    fn test_demo_history_is_dated_in_the_past() {
        let now = Utc::now();
        let store = demo_store(now);

        assert!(store.list::<Sale>().iter().all(|s| s.date <= now));
        assert_eq!(
            store.list::<Sale>().iter().filter(|s| !s.is_completed()).count(),
            1
        );
    }

    #[test]
    fn test_demo_store_starts_signed_out() {
        assert!(demo_store(Utc::now()).current_user().is_none());
    }
}
