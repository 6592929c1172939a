//! Draft lines shared by every transaction operation, and the pricing of
//! drafts into stored [`LineItem`]s.

use serde::{Deserialize, Serialize};
use tally_core::validation::{validate_discount, validate_price, validate_quantity};
use tally_core::{Discount, EntityId, LineItem, Money, Product, TaxBasis, ValidationError};
use ts_rs::TS;

use crate::error::StoreResult;
use crate::store::Store;

/// A line the caller wants on a sale or purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DraftLine {
    pub product_id: EntityId,
    pub quantity: i64,
    /// Overrides the catalog price (sale) or cost (purchase) when set.
    #[serde(default)]
    pub unit_price: Option<Money>,
}

impl DraftLine {
    pub fn new(product_id: impl Into<EntityId>, quantity: i64) -> Self {
        DraftLine {
            product_id: product_id.into(),
            quantity,
            unit_price: None,
        }
    }
}

/// A line being returned against an earlier transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReturnLine {
    pub product_id: EntityId,
    pub quantity: i64,
}

impl ReturnLine {
    pub fn new(product_id: impl Into<EntityId>, quantity: i64) -> Self {
        ReturnLine {
            product_id: product_id.into(),
            quantity,
        }
    }
}

fn empty(field: &str) -> ValidationError {
    ValidationError::Empty {
        field: field.to_string(),
    }
}

impl Store {
    /// Prices draft lines against the live catalog.
    ///
    /// Fails on an empty draft, a non-positive quantity, an unknown product
    /// or a negative price override. Nothing is mutated.
    pub(crate) fn price_lines(&self, lines: &[DraftLine], basis: TaxBasis) -> StoreResult<Vec<LineItem>> {
        if lines.is_empty() {
            return Err(empty("items").into());
        }

        lines
            .iter()
            .map(|line| -> StoreResult<LineItem> {
                validate_quantity(line.quantity)?;
                let product = self.find::<Product>(&line.product_id)?;
                let catalog_price = match basis {
                    TaxBasis::Price => product.price,
                    TaxBasis::Cost => product.cost_price,
                };
                let unit_price = line.unit_price.unwrap_or(catalog_price);
                validate_price("unitPrice", unit_price)?;

                Ok(LineItem {
                    product: product.snapshot(),
                    quantity: line.quantity,
                    unit_price,
                })
            })
            .collect()
    }
}

fn quantity_of<'a>(items: impl Iterator<Item = &'a LineItem>, product_id: &EntityId) -> i64 {
    items
        .filter(|i| &i.product.product_id == product_id)
        .map(|i| i.quantity)
        .sum()
}

/// Rejects a discount the priced lines cannot carry.
pub(crate) fn check_discount(discount: Option<&Discount>, items: &[LineItem]) -> StoreResult<()> {
    if let Some(discount) = discount {
        let subtotal: Money = items.iter().map(LineItem::subtotal).sum();
        validate_discount(discount, subtotal)?;
    }
    Ok(())
}

/// Builds return items from the original transaction's lines.
///
/// Each product may be returned up to what was originally on the
/// transaction, minus what `previous` returns already took back.
pub(crate) fn return_items(
    original: &[LineItem],
    previous: &[&LineItem],
    lines: &[ReturnLine],
) -> StoreResult<Vec<LineItem>> {
    if lines.is_empty() {
        return Err(empty("items").into());
    }

    let mut built: Vec<LineItem> = Vec::with_capacity(lines.len());
    for line in lines {
        validate_quantity(line.quantity)?;

        let source = original
            .iter()
            .find(|i| i.product.product_id == line.product_id)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "productId".to_string(),
                reason: format!("{} is not on the original transaction", line.product_id),
            })?;

        let bought = quantity_of(original.iter(), &line.product_id);
        let taken_back = quantity_of(previous.iter().copied(), &line.product_id)
            + quantity_of(built.iter(), &line.product_id);
        let available = bought - taken_back;

        if line.quantity > available {
            return Err(ValidationError::ExceedsReturnable {
                product: source.product.name.clone(),
                available,
                requested: line.quantity,
            }
            .into());
        }

        built.push(LineItem {
            product: source.product.clone(),
            quantity: line.quantity,
            unit_price: source.unit_price,
        });
    }
    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::testing::{dimensions, product};

    #[test]
    fn test_price_lines_defaults_to_catalog_price() {
        let mut store = dimensions();
        let a = store.add(product("A", 500, 10)).unwrap();

        let items = store
            .price_lines(&[DraftLine::new(a.id.clone(), 2)], TaxBasis::Price)
            .unwrap();
        assert_eq!(items[0].unit_price, Money::from_cents(500));

        let items = store
            .price_lines(&[DraftLine::new(a.id, 2)], TaxBasis::Cost)
            .unwrap();
        assert_eq!(items[0].unit_price, a.cost_price);
    }

    #[test]
    fn test_price_lines_rejects_bad_input() {
        let mut store = dimensions();
        let a = store.add(product("A", 500, 10)).unwrap();

        assert!(store.price_lines(&[], TaxBasis::Price).is_err());
        assert!(store
            .price_lines(&[DraftLine::new(a.id, 0)], TaxBasis::Price)
            .is_err());
        assert!(matches!(
            store.price_lines(&[DraftLine::new("ghost", 1)], TaxBasis::Price),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_return_items_caps_at_remaining_quantity() {
        let mut store = dimensions();
        let a = store.add(product("A", 500, 10)).unwrap();
        let sold = store
            .price_lines(&[DraftLine::new(a.id.clone(), 3)], TaxBasis::Price)
            .unwrap();

        let first = return_items(&sold, &[], &[ReturnLine::new(a.id.clone(), 2)]).unwrap();
        let previous: Vec<&LineItem> = first.iter().collect();

        let err = return_items(&sold, &previous, &[ReturnLine::new(a.id.clone(), 2)]).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::ExceedsReturnable {
                available: 1,
                requested: 2,
                ..
            })
        ));

        assert!(return_items(&sold, &previous, &[ReturnLine::new(a.id, 1)]).is_ok());
    }

    #[test]
    fn test_return_items_counts_lines_within_one_draft() {
        let mut store = dimensions();
        let a = store.add(product("A", 500, 10)).unwrap();
        let sold = store
            .price_lines(&[DraftLine::new(a.id.clone(), 2)], TaxBasis::Price)
            .unwrap();

        let lines = [ReturnLine::new(a.id.clone(), 1), ReturnLine::new(a.id, 2)];
        assert!(return_items(&sold, &[], &lines).is_err());
    }
}
