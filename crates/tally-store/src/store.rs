//! # Store
//!
//! The single owner of every entity collection.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Write Path                                     │
//! │                                                                         │
//! │  add(record)                                                            │
//! │    ├── 1. fresh EntityId (UUID v4), creation date for dated kinds       │
//! │    ├── 2. record.validate(store)  fields, uniqueness, references        │
//! │    └── 3. push ──────────────────────────────────────► Collections      │
//! │                                                                         │
//! │  update(record)                                                         │
//! │    ├── 1. locate by id            NotFound if missing                   │
//! │    ├── 2. record.validate(store)                                        │
//! │    └── 3. replace in place                                              │
//! │                                                                         │
//! │  delete::<T>(id)                                                        │
//! │    ├── 1. locate by id            NotFound if missing                   │
//! │    ├── 2. T::guard_delete(store)  ReferentialIntegrity / SelfDeletion   │
//! │    └── 3. remove                                                        │
//! │                                                                         │
//! │  Nothing is written until every check has passed.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only master data goes through the generic path ([`Managed`] kinds).
//! Transactions and ledgers are written by their dedicated operations
//! (`add_sale`, `add_purchase`, `add_stock_adjustment`, ...) and are never
//! updated or deleted.

use chrono::Utc;
use tally_core::{
    BankAccount, Brand, BusinessLocation, Category, Customer, CustomerGroup, CustomerReturn,
    Entity, EntityId, EntityKind, Expense, ExpenseCategory, PaymentMethod, Product, Purchase,
    PurchaseReturn, Role, Sale, StockAdjustment, StockTransfer, Supplier, Unit, User, Variation,
    VariationValue,
};
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Collections
// =============================================================================

/// Every entity collection, insertion order preserved.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub(crate) products: Vec<Product>,
    pub(crate) categories: Vec<Category>,
    pub(crate) brands: Vec<Brand>,
    pub(crate) units: Vec<Unit>,
    pub(crate) variations: Vec<Variation>,
    pub(crate) variation_values: Vec<VariationValue>,
    pub(crate) sales: Vec<Sale>,
    pub(crate) purchases: Vec<Purchase>,
    pub(crate) purchase_returns: Vec<PurchaseReturn>,
    pub(crate) customer_returns: Vec<CustomerReturn>,
    pub(crate) stock_adjustments: Vec<StockAdjustment>,
    pub(crate) stock_transfers: Vec<StockTransfer>,
    pub(crate) roles: Vec<Role>,
    pub(crate) users: Vec<User>,
    pub(crate) customers: Vec<Customer>,
    pub(crate) customer_groups: Vec<CustomerGroup>,
    pub(crate) suppliers: Vec<Supplier>,
    pub(crate) business_locations: Vec<BusinessLocation>,
    pub(crate) payment_methods: Vec<PaymentMethod>,
    pub(crate) bank_accounts: Vec<BankAccount>,
    pub(crate) expense_categories: Vec<ExpenseCategory>,
    pub(crate) expenses: Vec<Expense>,
}

/// An entity kind with a collection in the store.
pub trait Stored: Entity {
    fn records(data: &Collections) -> &Vec<Self>;

    fn records_mut(data: &mut Collections) -> &mut Vec<Self>;
}

/// A master-data kind that supports generic add, update and delete.
pub trait Managed: Stored {
    /// Field rules, uniqueness and outgoing references.
    fn validate(&self, store: &Store) -> StoreResult<()>;

    /// Rejects the delete while any dependent still references `id`.
    fn guard_delete(_store: &Store, _id: &EntityId) -> StoreResult<()> {
        Ok(())
    }
}

macro_rules! impl_stored {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl Stored for $ty {
                fn records(data: &Collections) -> &Vec<Self> {
                    &data.$field
                }

                fn records_mut(data: &mut Collections) -> &mut Vec<Self> {
                    &mut data.$field
                }
            }
        )*
    };
}

impl_stored! {
    Product => products,
    Category => categories,
    Brand => brands,
    Unit => units,
    Variation => variations,
    VariationValue => variation_values,
    Sale => sales,
    Purchase => purchases,
    PurchaseReturn => purchase_returns,
    CustomerReturn => customer_returns,
    StockAdjustment => stock_adjustments,
    StockTransfer => stock_transfers,
    Role => roles,
    User => users,
    Customer => customers,
    CustomerGroup => customer_groups,
    Supplier => suppliers,
    BusinessLocation => business_locations,
    PaymentMethod => payment_methods,
    BankAccount => bank_accounts,
    ExpenseCategory => expense_categories,
    Expense => expenses,
}

// =============================================================================
// Store
// =============================================================================

/// The in-memory domain store.
///
/// Passed explicitly by reference; see [`crate::SharedStore`] for the
/// mutex-wrapped handle the application layer holds.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub(crate) data: Collections,
    pub(crate) session_user_id: Option<EntityId>,
}

impl Store {
    /// Creates an empty store with nobody signed in.
    pub fn new() -> Self {
        Store::default()
    }

    pub(crate) fn from_collections(data: Collections) -> Self {
        Store {
            data,
            session_user_id: None,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// All records of a kind, in insertion order.
    pub fn list<T: Stored>(&self) -> &[T] {
        T::records(&self.data)
    }

    pub fn get<T: Stored>(&self, id: &EntityId) -> Option<&T> {
        self.list::<T>().iter().find(|r| r.id() == id)
    }

    /// Like [`Store::get`] but a missing id is an error.
    pub fn find<T: Stored>(&self, id: &EntityId) -> StoreResult<&T> {
        self.get(id).ok_or_else(|| StoreError::not_found(T::KIND, id))
    }

    pub fn contains<T: Stored>(&self, id: &EntityId) -> bool {
        self.get::<T>(id).is_some()
    }

    fn position<T: Stored>(&self, id: &EntityId) -> StoreResult<usize> {
        self.list::<T>()
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| StoreError::not_found(T::KIND, id))
    }

    /// Checks that `id` resolves to a `T`, naming `field` on failure.
    pub(crate) fn require_ref<T: Stored>(&self, field: &'static str, id: &EntityId) -> StoreResult<()> {
        if self.contains::<T>(id) {
            Ok(())
        } else {
            Err(StoreError::unknown_reference(field, T::KIND, id))
        }
    }

    // =========================================================================
    // Generic Writes
    // =========================================================================

    /// Adds a record with a freshly generated id and returns the stored copy.
    pub fn add<T: Managed>(&mut self, mut record: T) -> StoreResult<T> {
        debug!(kind = %T::KIND, "Adding record");

        record.set_id(EntityId::generate());
        record.stamp(Utc::now());
        record.validate(self)?;

        T::records_mut(&mut self.data).push(record.clone());

        info!(kind = %T::KIND, id = %record.id(), "Record added");
        Ok(record)
    }

    /// Replaces the record carrying the same id.
    pub fn update<T: Managed>(&mut self, record: T) -> StoreResult<T> {
        debug!(kind = %T::KIND, id = %record.id(), "Updating record");

        let index = self.position::<T>(record.id())?;
        record.validate(self)?;

        T::records_mut(&mut self.data)[index] = record.clone();

        info!(kind = %T::KIND, id = %record.id(), "Record updated");
        Ok(record)
    }

    /// Deletes a record once no dependent references it.
    pub fn delete<T: Managed>(&mut self, id: &EntityId) -> StoreResult<T> {
        debug!(kind = %T::KIND, id = %id, "Deleting record");

        let index = self.position::<T>(id)?;
        if let Err(err) = T::guard_delete(self, id) {
            warn!(kind = %T::KIND, id = %id, error = %err, "Delete rejected");
            return Err(err);
        }

        let removed = T::records_mut(&mut self.data).remove(index);

        info!(kind = %T::KIND, id = %id, "Record deleted");
        Ok(removed)
    }

    /// Deletes by kind discriminant, as the front-end addresses records.
    pub fn delete_kind(&mut self, kind: EntityKind, id: &EntityId) -> StoreResult<()> {
        match kind {
            EntityKind::Product => self.delete::<Product>(id).map(drop),
            EntityKind::Category => self.delete::<Category>(id).map(drop),
            EntityKind::Brand => self.delete::<Brand>(id).map(drop),
            EntityKind::Unit => self.delete::<Unit>(id).map(drop),
            EntityKind::Variation => self.delete::<Variation>(id).map(drop),
            EntityKind::VariationValue => self.delete::<VariationValue>(id).map(drop),
            EntityKind::Role => self.delete::<Role>(id).map(drop),
            EntityKind::User => self.delete::<User>(id).map(drop),
            EntityKind::Customer => self.delete::<Customer>(id).map(drop),
            EntityKind::CustomerGroup => self.delete::<CustomerGroup>(id).map(drop),
            EntityKind::Supplier => self.delete::<Supplier>(id).map(drop),
            EntityKind::BusinessLocation => self.delete::<BusinessLocation>(id).map(drop),
            EntityKind::PaymentMethod => self.delete::<PaymentMethod>(id).map(drop),
            EntityKind::BankAccount => self.delete::<BankAccount>(id).map(drop),
            EntityKind::ExpenseCategory => self.delete::<ExpenseCategory>(id).map(drop),
            EntityKind::Expense => self.delete::<Expense>(id).map(drop),
            EntityKind::Sale
            | EntityKind::Purchase
            | EntityKind::PurchaseReturn
            | EntityKind::CustomerReturn
            | EntityKind::StockAdjustment
            | EntityKind::StockTransfer => {
                warn!(kind = %kind, id = %id, "Delete of append-only record rejected");
                Err(StoreError::AppendOnly { entity: kind })
            }
        }
    }

    // =========================================================================
    // Stock
    // =========================================================================

    /// Applies `delta` to a product's stock. There is no floor.
    pub(crate) fn apply_stock_delta(&mut self, product_id: &EntityId, delta: i64) -> StoreResult<i64> {
        let product = self
            .data
            .products
            .iter_mut()
            .find(|p| &p.id == product_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, product_id))?;

        product.stock += delta;
        debug!(id = %product.id, delta = %delta, stock = %product.stock, "Updating stock");

        if product.stock < 0 {
            warn!(id = %product.id, sku = %product.sku, stock = %product.stock, "Stock is negative");
        }
        Ok(product.stock)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
