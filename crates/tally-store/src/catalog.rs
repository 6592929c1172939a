//! Variable products: a parent plus one child product per variant.

use serde::{Deserialize, Serialize};
use tally_core::{EntityId, Money, Product, ValidationError};
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::StoreResult;
use crate::store::{Managed, Store};

/// The per-variant fields of a variable product. Everything else is
/// inherited from the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariantDraft {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub variation_value_id: Option<EntityId>,
    pub cost_price: Money,
    pub price: Money,
    #[serde(default)]
    pub stock: i64,
}

impl VariantDraft {
    fn into_child(self, parent: &Product) -> Product {
        Product {
            id: EntityId::generate(),
            sku: self.sku,
            name: self.name,
            category_id: parent.category_id.clone(),
            brand_id: parent.brand_id.clone(),
            unit_id: parent.unit_id.clone(),
            business_location_id: parent.business_location_id.clone(),
            cost_price: self.cost_price,
            price: self.price,
            stock: self.stock,
            reorder_point: parent.reorder_point,
            tax: parent.tax,
            is_age_restricted: parent.is_age_restricted,
            parent_product_id: Some(parent.id.clone()),
            variation_value_id: self.variation_value_id,
        }
    }
}

impl Store {
    /// Adds a parent product (stock forced to 0) and one child per variant.
    ///
    /// Every record is validated, SKUs included, before any is stored.
    pub fn add_variable_product(
        &mut self,
        mut parent: Product,
        variants: Vec<VariantDraft>,
    ) -> StoreResult<(Product, Vec<Product>)> {
        debug!(sku = %parent.sku, variants = variants.len(), "Adding variable product");

        if variants.is_empty() {
            return Err(ValidationError::Empty {
                field: "variants".to_string(),
            }
            .into());
        }

        parent.id = EntityId::generate();
        parent.stock = 0;
        parent.parent_product_id = None;
        parent.validate(self)?;

        let children: Vec<Product> = variants.into_iter().map(|v| v.into_child(&parent)).collect();

        // Each child is checked with the parent and earlier siblings already
        // staged, so a SKU clash inside the batch fails too. Any failure
        // truncates the staged records away.
        let mark = self.data.products.len();
        self.data.products.push(parent.clone());
        for child in &children {
            if let Err(err) = child.validate(self) {
                self.data.products.truncate(mark);
                return Err(err);
            }
            self.data.products.push(child.clone());
        }

        info!(id = %parent.id, sku = %parent.sku, variants = children.len(), "Variable product added");
        Ok((parent, children))
    }
}
