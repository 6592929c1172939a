//! # Catalog Commands
//!
//! Products, variable products and the two stock ledgers.

use tally_core::{EntityId, Product, StockAdjustment, StockTransfer};
use tally_store::{StockAdjustmentDraft, StockTransferDraft, VariantDraft};
use tracing::debug;

use super::records;
use super::PRODUCTS_MANAGE;
use crate::error::ApiError;
use crate::state::StoreState;

pub fn list_products(store: &StoreState) -> Result<Vec<Product>, ApiError> {
    store.view(|s| s.list::<Product>().to_vec())
}

/// Products whose SKU or name contains `query`, ignoring case.
pub fn search_products(store: &StoreState, query: String) -> Result<Vec<Product>, ApiError> {
    debug!(query = %query, "search_products command");
    let needle = query.trim().to_lowercase();
    store.view(|s| {
        s.list::<Product>()
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.sku.to_lowercase().contains(&needle)
                    || p.name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    })
}

pub fn get_product(store: &StoreState, id: EntityId) -> Result<Product, ApiError> {
    store.view(|s| s.find::<Product>(&id).cloned())?.map_err(Into::into)
}

pub fn create_product(store: &StoreState, product: Product) -> Result<Product, ApiError> {
    records::create(store, product)
}

pub fn update_product(store: &StoreState, product: Product) -> Result<Product, ApiError> {
    records::update(store, product)
}

pub fn delete_product(store: &StoreState, id: EntityId) -> Result<Product, ApiError> {
    records::delete(store, &id)
}

pub fn create_variable_product(
    store: &StoreState,
    parent: Product,
    variants: Vec<VariantDraft>,
) -> Result<(Product, Vec<Product>), ApiError> {
    debug!(sku = %parent.sku, "create_variable_product command");
    store.write(PRODUCTS_MANAGE, |s| s.add_variable_product(parent, variants))
}

pub fn adjust_stock(
    store: &StoreState,
    draft: StockAdjustmentDraft,
) -> Result<StockAdjustment, ApiError> {
    store.write(PRODUCTS_MANAGE, |s| s.add_stock_adjustment(draft))
}

pub fn transfer_stock(
    store: &StoreState,
    draft: StockTransferDraft,
) -> Result<StockTransfer, ApiError> {
    store.write(PRODUCTS_MANAGE, |s| s.add_stock_transfer(draft))
}
