//! Thread-safe handle to the store for the application layer.
//!
//! ## Thread Safety
//! Commands may run on several threads at once. The store sits behind a
//! `Mutex`, so every mutation runs to completion before the next starts.

use std::sync::{Arc, Mutex, PoisonError};

use crate::store::Store;

/// Cloneable, mutex-wrapped [`Store`].
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    store: Arc<Mutex<Store>>,
}

impl SharedStore {
    pub fn new(store: Store) -> Self {
        SharedStore {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = shared.with_store(|store| store.list::<Product>().len());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Store) -> R,
    {
        // Operations write only after validating, so a poisoned store is
        // still consistent.
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// shared.with_store_mut(|store| store.void_sale(&id))?;
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Store) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_store;
    use chrono::Utc;
    use std::thread;
    use tally_core::{AdjustmentKind, EntityId, Product};

    use crate::inventory::StockAdjustmentDraft;

    #[test]
    fn test_concurrent_mutations_are_serialized() {
        let shared = SharedStore::new(demo_store(Utc::now()));
        let soda = EntityId::from("p-soda");
        let before = shared.with_store(|s| s.find::<Product>(&soda).map(|p| p.stock).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                let soda = soda.clone();
                thread::spawn(move || {
                    shared.with_store_mut(|s| {
                        s.add_stock_adjustment(StockAdjustmentDraft {
                            product_id: soda,
                            kind: AdjustmentKind::Addition,
                            quantity: 1,
                            reason: "recount".to_string(),
                        })
                        .unwrap();
                    })
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let after = shared.with_store(|s| s.find::<Product>(&soda).map(|p| p.stock).unwrap());
        assert_eq!(after, before + 8);
    }
}
