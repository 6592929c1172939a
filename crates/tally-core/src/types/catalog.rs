//! Catalog records: products and the dimension tables they reference.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{impl_entity, EntityId};
use crate::money::Money;
use crate::pricing::Tax;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// ## Variants
/// A variable product is stored as one parent (stock always 0) plus one
/// child per variant whose `parent_product_id` points at the parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: EntityId,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    pub name: String,

    pub category_id: EntityId,
    pub brand_id: EntityId,
    pub unit_id: EntityId,
    pub business_location_id: EntityId,

    /// What the shop pays per unit.
    pub cost_price: Money,

    /// What the customer pays per unit, before tax.
    pub price: Money,

    /// Units on hand. May go negative: sales never block on stock.
    pub stock: i64,

    /// At or below this level the product counts as low stock.
    pub reorder_point: i64,

    pub tax: Tax,

    /// Requires an ID check at the till.
    #[serde(default)]
    pub is_age_restricted: bool,

    #[serde(default)]
    pub parent_product_id: Option<EntityId>,

    #[serde(default)]
    pub variation_value_id: Option<EntityId>,
}

impl_entity!(Product, Product);

impl Product {
    /// Freezes the fields a transaction line needs.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            product_id: self.id.clone(),
            sku: self.sku.clone(),
            name: self.name.clone(),
            category_id: self.category_id.clone(),
            price: self.price,
            cost_price: self.cost_price,
            tax: self.tax,
        }
    }

    /// True when this product is a variant of `parent_id`.
    pub fn is_variant_of(&self, parent_id: &EntityId) -> bool {
        self.parent_product_id.as_ref() == Some(parent_id)
    }

    /// Stock valued at cost.
    pub fn cost_value(&self) -> Money {
        self.cost_price.multiply_quantity(self.stock)
    }

    /// Stock valued at selling price.
    pub fn price_value(&self) -> Money {
        self.price.multiply_quantity(self.stock)
    }
}

/// Product fields frozen at transaction time.
///
/// Later edits to the live product never change historical totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub product_id: EntityId,
    pub sku: String,
    pub name: String,
    pub category_id: EntityId,
    pub price: Money,
    pub cost_price: Money,
    pub tax: Tax,
}

// =============================================================================
// Dimension Tables
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl_entity!(Category, Category);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: EntityId,
    pub name: String,
}

impl_entity!(Brand, Brand);

/// Unit of measure ("Piece", "Kilogram").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: EntityId,
    pub name: String,
    pub short_name: String,
}

impl_entity!(Unit, Unit);

/// A variation axis such as "Size" or "Colour".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub id: EntityId,
    pub name: String,
}

impl_entity!(Variation, Variation);

/// One value on a variation axis ("Large" on "Size").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariationValue {
    pub id: EntityId,
    pub variation_id: EntityId,
    pub name: String,
}

impl_entity!(VariationValue, VariationValue);

// =============================================================================
// Unit Tests
// =============================================================================
