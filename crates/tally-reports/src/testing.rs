//! Record builders shared by the report tests.

use chrono::{DateTime, TimeZone, Utc};
use tally_core::{
    AdjustmentKind, CustomerRef, CustomerReturn, EntityId, Expense, LineItem, Money, Payment,
    Product, Purchase, PurchaseReturn, Sale, SaleStatus, StockAdjustment, Tax, TaxBasis, Totals,
};

pub(crate) fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// Untaxed product `p-{sku}` in `cat-1` at `loc-1`.
pub(crate) fn product(sku: &str, price: i64, cost: i64) -> Product {
    Product {
        id: EntityId::from(format!("p-{sku}")),
        sku: sku.to_string(),
        name: format!("Product {sku}"),
        category_id: EntityId::from("cat-1"),
        brand_id: EntityId::from("brand-1"),
        unit_id: EntityId::from("unit-1"),
        business_location_id: EntityId::from("loc-1"),
        cost_price: Money::from_cents(cost),
        price: Money::from_cents(price),
        stock: 0,
        reorder_point: 0,
        tax: Tax::exempt(),
        is_age_restricted: false,
        parent_product_id: None,
        variation_value_id: None,
    }
}

fn lines(items: &[(&Product, i64)], basis: TaxBasis) -> Vec<LineItem> {
    items
        .iter()
        .map(|(p, qty)| LineItem {
            product: p.snapshot(),
            quantity: *qty,
            unit_price: match basis {
                TaxBasis::Price => p.price,
                TaxBasis::Cost => p.cost_price,
            },
        })
        .collect()
}

/// Completed sale at `loc-1`, paid in full with `pm-cash`.
pub(crate) fn sale(id: &str, date: DateTime<Utc>, items: &[(&Product, i64)]) -> Sale {
    let items = lines(items, TaxBasis::Price);
    let totals = Totals::compute(&items, None);
    Sale {
        id: EntityId::from(id),
        date,
        customer: CustomerRef {
            id: EntityId::from("cust-1"),
            name: "Walk-in".to_string(),
        },
        business_location_id: EntityId::from("loc-1"),
        items,
        payments: vec![Payment {
            method_id: EntityId::from("pm-cash"),
            amount: totals.total,
        }],
        status: SaleStatus::Completed,
        discount: None,
        totals,
        note: None,
    }
}

pub(crate) fn purchase(id: &str, date: DateTime<Utc>, items: &[(&Product, i64)]) -> Purchase {
    let items = lines(items, TaxBasis::Cost);
    Purchase {
        id: EntityId::from(id),
        date,
        supplier_id: EntityId::from("sup-1"),
        business_location_id: EntityId::from("loc-1"),
        reference_no: id.to_uppercase(),
        totals: Totals::compute(&items, None),
        items,
        discount: None,
    }
}

pub(crate) fn customer_return(
    id: &str,
    sale_id: &str,
    date: DateTime<Utc>,
    items: &[(&Product, i64)],
) -> CustomerReturn {
    let items = lines(items, TaxBasis::Price);
    CustomerReturn {
        id: EntityId::from(id),
        date,
        customer: CustomerRef {
            id: EntityId::from("cust-1"),
            name: "Walk-in".to_string(),
        },
        original_sale_id: EntityId::from(sale_id),
        totals: Totals::compute(&items, None),
        items,
        reason: None,
    }
}

pub(crate) fn purchase_return(
    id: &str,
    purchase_id: &str,
    date: DateTime<Utc>,
    items: &[(&Product, i64)],
) -> PurchaseReturn {
    let items = lines(items, TaxBasis::Cost);
    PurchaseReturn {
        id: EntityId::from(id),
        date,
        supplier_id: EntityId::from("sup-1"),
        original_purchase_id: EntityId::from(purchase_id),
        totals: Totals::compute(&items, None),
        items,
        reason: None,
    }
}

pub(crate) fn adjustment(
    id: &str,
    product: &Product,
    kind: AdjustmentKind,
    quantity: i64,
    date: DateTime<Utc>,
) -> StockAdjustment {
    StockAdjustment {
        id: EntityId::from(id),
        date,
        product_id: product.id.clone(),
        kind,
        quantity,
        reason: "recount".to_string(),
    }
}

pub(crate) fn expense(id: &str, category: &str, cents: i64, date: DateTime<Utc>) -> Expense {
    Expense {
        id: EntityId::from(id),
        date,
        expense_category_id: EntityId::from(category),
        business_location_id: EntityId::from("loc-1"),
        amount: Money::from_cents(cents),
        note: None,
    }
}
