//! Fixtures shared by the unit tests in this crate.

use tally_core::{
    Brand, BusinessLocation, Category, Customer, EntityId, Money, Product, Supplier, Tax, Unit,
};

use crate::store::Store;

/// A store holding one category, brand, unit and location
/// (`cat-1`, `brand-1`, `unit-1`, `loc-1`).
pub(crate) fn dimensions() -> Store {
    let mut store = Store::new();
    store.data.categories.push(Category {
        id: EntityId::from("cat-1"),
        name: "General".to_string(),
        description: None,
    });
    store.data.brands.push(Brand {
        id: EntityId::from("brand-1"),
        name: "House".to_string(),
    });
    store.data.units.push(Unit {
        id: EntityId::from("unit-1"),
        name: "Piece".to_string(),
        short_name: "pc".to_string(),
    });
    store.data.business_locations.push(BusinessLocation {
        id: EntityId::from("loc-1"),
        name: "Main".to_string(),
        address: None,
    });
    store
}

/// An untaxed product on the `dimensions()` records; cost is half the price.
pub(crate) fn product(sku: &str, price_cents: i64, stock: i64) -> Product {
    Product {
        id: EntityId::default(),
        sku: sku.to_string(),
        name: format!("Product {sku}"),
        category_id: EntityId::from("cat-1"),
        brand_id: EntityId::from("brand-1"),
        unit_id: EntityId::from("unit-1"),
        business_location_id: EntityId::from("loc-1"),
        cost_price: Money::from_cents(price_cents / 2),
        price: Money::from_cents(price_cents),
        stock,
        reorder_point: 2,
        tax: Tax::exempt(),
        is_age_restricted: false,
        parent_product_id: None,
        variation_value_id: None,
    }
}

pub(crate) fn walk_in(store: &mut Store) -> EntityId {
    store
        .add(Customer {
            id: EntityId::default(),
            name: "Walk-in".to_string(),
            email: None,
            phone: None,
            customer_group_id: None,
        })
        .unwrap()
        .id
}

pub(crate) fn supplier(store: &mut Store) -> EntityId {
    store
        .add(Supplier {
            id: EntityId::default(),
            name: "Fresh Farms".to_string(),
            contact_name: None,
            email: None,
            phone: None,
        })
        .unwrap()
        .id
}
