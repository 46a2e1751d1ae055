//! # Shopping Cart Repository
//!
//! Persistent [`Cart`] over the `shoppingcart` table.
//!
//! ## Table
//! ```text
//! ┌──────────────┬──────────────┬──────────┬──────────────┐
//! │ name (TEXT)  │ type (TEXT)  │ quantity │ priceperunit │
//! ├──────────────┼──────────────┼──────────┼──────────────┤
//! │ phone        │ ELECTRONIC   │        1 │         10.0 │
//! │ milk         │ OTHER        │        2 │         2.49 │
//! └──────────────┴──────────────┴──────────┴──────────────┘
//! ```
//!
//! Every call is one unit of work: `add` inserts and commits, `get_items`
//! reads the whole table. Rows come back in insertion order.

use async_trait::async_trait;
use tracing::{debug, warn};

use storefront_core::validation::{FIELD_CATEGORY, FIELD_NAME, FIELD_QUANTITY, FIELD_UNIT_PRICE};
use storefront_core::{Cart, Item, ItemCategory, Money, ValidationError};

use crate::error::{DbError, DbResult};
use crate::store::{Record, Session, SqlValue, Store};

/// Insert one cart line.
pub const INSERT_ITEM_SQL: &str =
    "insert into shoppingcart (name, type, quantity, priceperunit) values (?,?,?,?)";

/// Read every cart line.
pub const SELECT_ITEMS_SQL: &str = "select * from shoppingcart";

/// Empty the cart.
pub const CLEAR_ITEMS_SQL: &str = "delete from shoppingcart";

/// Cart whose lines live in the store.
///
/// ## Usage
/// ```rust,ignore
/// let mut cart = ShoppingCartAdaptor::new(db.clone());
/// cart.add(phone).await?;
/// let items = cart.get_items().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ShoppingCartAdaptor<S> {
    store: S,
}

impl<S: Store> ShoppingCartAdaptor<S> {
    pub fn new(store: S) -> Self {
        ShoppingCartAdaptor { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Deletes every line and commits. Returns how many lines were removed.
    pub async fn clear(&self) -> DbResult<u64> {
        let removed = self
            .store
            .run_unit_of_work(|session| {
                Box::pin(async move {
                    let removed = session.execute(CLEAR_ITEMS_SQL, &[]).await?;
                    session.commit().await?;
                    Ok(removed)
                })
            })
            .await?;

        debug!(removed, "Cleared shopping cart");
        Ok(removed)
    }
}

#[async_trait]
impl<S: Store> Cart for ShoppingCartAdaptor<S> {
    type Error = DbError;

    async fn add(&mut self, item: Item) -> DbResult<()> {
        debug!(
            name = %item.name(),
            category = %item.category(),
            quantity = item.quantity(),
            "Persisting cart line"
        );

        let params = item_params(&item);

        self.store
            .run_unit_of_work(move |session| {
                Box::pin(async move {
                    session.execute(INSERT_ITEM_SQL, &params).await?;
                    session.commit().await
                })
            })
            .await
    }

    async fn get_items(&self) -> DbResult<Vec<Item>> {
        let records = self
            .store
            .run_unit_of_work(|session| {
                Box::pin(async move { session.query(SELECT_ITEMS_SQL, &[]).await })
            })
            .await?;

        debug!(lines = records.len(), "Loaded shopping cart");

        records.iter().map(item_from_record).collect()
    }
}

/// Parameters in `INSERT_ITEM_SQL` order.
fn item_params(item: &Item) -> Vec<SqlValue> {
    vec![
        SqlValue::Text(item.name().to_string()),
        SqlValue::Text(item.category().as_str().to_string()),
        SqlValue::Integer(item.quantity()),
        SqlValue::Real(item.unit_price().as_decimal()),
    ]
}

fn item_from_record(record: &Record) -> DbResult<Item> {
    let category: ItemCategory = record
        .text("type")?
        .parse()
        .map_err(|e: ValidationError| DbError::row_mapping("type", e.to_string()))?;

    let name = record.text("name")?;
    let quantity = record.integer("quantity")?;
    let stored_price = record.real("priceperunit")?;
    let unit_price = Money::from_decimal(stored_price).ok_or_else(|| {
        DbError::row_mapping("priceperunit", format!("not a finite amount: {stored_price}"))
    })?;

    Item::new(category, name, quantity, unit_price)
        .map_err(|e| DbError::row_mapping(column_for(&e), e.to_string()))
}

/// Table column holding the value a validation error refers to.
fn column_for(err: &ValidationError) -> &'static str {
    match err.field() {
        FIELD_NAME => "name",
        FIELD_CATEGORY => "type",
        FIELD_QUANTITY => "quantity",
        FIELD_UNIT_PRICE => "priceperunit",
        other => {
            warn!(field = %other, "Validation field has no shopping cart column");
            "name"
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::BoxFuture;
    use std::sync::{Arc, Mutex};

    /// Everything the fake store saw.
    #[derive(Debug, Default)]
    struct Journal {
        executed: Vec<(String, Vec<SqlValue>)>,
        queried: Vec<String>,
        commits: usize,
        opened: usize,
        released: usize,
    }

    #[derive(Clone, Default)]
    struct FakeStore {
        journal: Arc<Mutex<Journal>>,
        rows: Vec<Record>,
        fail_on_execute: bool,
        fail_on_query: bool,
    }

    impl FakeStore {
        fn with_rows(rows: Vec<Record>) -> Self {
            FakeStore {
                rows,
                ..Default::default()
            }
        }

        fn journal(&self) -> std::sync::MutexGuard<'_, Journal> {
            self.journal.lock().unwrap()
        }
    }

    struct FakeSession {
        store: FakeStore,
    }

    #[async_trait]
    impl Session for FakeSession {
        async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> DbResult<u64> {
            if self.store.fail_on_execute {
                return Err(DbError::QueryFailed("no such table: shoppingcart".to_string()));
            }
            self.store
                .journal()
                .executed
                .push((sql.to_string(), params.to_vec()));
            Ok(1)
        }

        async fn query(&mut self, sql: &str, _params: &[SqlValue]) -> DbResult<Vec<Record>> {
            if self.store.fail_on_query {
                return Err(DbError::QueryFailed("disk I/O error".to_string()));
            }
            self.store.journal().queried.push(sql.to_string());
            Ok(self.store.rows.clone())
        }

        async fn commit(&mut self) -> DbResult<()> {
            self.store.journal().commits += 1;
            Ok(())
        }
    }

    #[async_trait]
    impl Store for FakeStore {
        type Session = FakeSession;

        async fn run_unit_of_work<R, F>(&self, work: F) -> DbResult<R>
        where
            R: Send + 'static,
            F: for<'s> FnOnce(&'s mut Self::Session) -> BoxFuture<'s, DbResult<R>> + Send + 'static,
        {
            self.journal().opened += 1;
            let mut session = FakeSession {
                store: self.clone(),
            };
            let outcome = work(&mut session).await;
            self.journal().released += 1;
            outcome
        }
    }

    fn row(name: &str, category: &str, quantity: i64, price: f64) -> Record {
        Record::new()
            .with("name", name)
            .with("type", category)
            .with("quantity", quantity)
            .with("priceperunit", price)
    }

    fn phone() -> Item {
        Item::new(ItemCategory::Electronic, "phone", 1, Money::from_cents(1000)).unwrap()
    }

    #[tokio::test]
    async fn test_add_binds_columns_and_commits() {
        let store = FakeStore::default();
        let mut cart = ShoppingCartAdaptor::new(store.clone());

        cart.add(phone()).await.unwrap();

        let journal = store.journal();
        assert_eq!(
            journal.executed,
            vec![(
                INSERT_ITEM_SQL.to_string(),
                vec![
                    SqlValue::Text("phone".to_string()),
                    SqlValue::Text("ELECTRONIC".to_string()),
                    SqlValue::Integer(1),
                    SqlValue::Real(10.0),
                ]
            )]
        );
        assert_eq!(journal.commits, 1);
        assert_eq!(journal.opened, 1);
        assert_eq!(journal.released, 1);
    }

    #[tokio::test]
    async fn test_failed_add_skips_commit_but_releases() {
        let store = FakeStore {
            fail_on_execute: true,
            ..Default::default()
        };
        let mut cart = ShoppingCartAdaptor::new(store.clone());

        let err = cart.add(phone()).await.unwrap_err();

        assert!(matches!(err, DbError::QueryFailed(_)));
        let journal = store.journal();
        assert_eq!(journal.commits, 0);
        assert_eq!(journal.released, 1);
    }

    #[tokio::test]
    async fn test_get_items_maps_rows_in_order() {
        let store = FakeStore::with_rows(vec![
            row("phone", "ELECTRONIC", 1, 10.0),
            row("milk", "OTHER", 2, 2.49),
        ]);
        let cart = ShoppingCartAdaptor::new(store.clone());

        let items = cart.get_items().await.unwrap();

        assert_eq!(
            items,
            vec![
                phone(),
                Item::new(ItemCategory::Other, "milk", 2, Money::from_cents(249)).unwrap(),
            ]
        );
        assert_eq!(store.journal().queried, vec![SELECT_ITEMS_SQL.to_string()]);
        assert_eq!(store.journal().commits, 0);
    }

    #[tokio::test]
    async fn test_empty_table_gives_empty_cart() {
        let cart = ShoppingCartAdaptor::new(FakeStore::default());
        assert!(cart.get_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_category_is_a_mapping_error() {
        let store = FakeStore::with_rows(vec![row("bread", "FOOD", 1, 1.0)]);
        let cart = ShoppingCartAdaptor::new(store);

        let err = cart.get_items().await.unwrap_err();
        assert!(matches!(err, DbError::RowMapping { ref column, .. } if column == "type"));
    }

    #[tokio::test]
    async fn test_invalid_stored_values_name_their_column() {
        let zero_quantity = ShoppingCartAdaptor::new(FakeStore::with_rows(vec![row(
            "phone",
            "ELECTRONIC",
            0,
            10.0,
        )]));
        let err = zero_quantity.get_items().await.unwrap_err();
        assert!(matches!(err, DbError::RowMapping { ref column, .. } if column == "quantity"));

        let missing_price = ShoppingCartAdaptor::new(FakeStore::with_rows(vec![Record::new()
            .with("name", "phone")
            .with("type", "ELECTRONIC")
            .with("quantity", 1i64)]));
        let err = missing_price.get_items().await.unwrap_err();
        assert!(matches!(err, DbError::RowMapping { ref column, .. } if column == "priceperunit"));
    }

    #[tokio::test]
    async fn test_out_of_range_price_names_its_column() {
        for price in [-1.0, f64::INFINITY, f64::NAN, 1e12] {
            let cart = ShoppingCartAdaptor::new(FakeStore::with_rows(vec![row(
                "phone",
                "ELECTRONIC",
                1,
                price,
            )]));
            let err = cart.get_items().await.unwrap_err();
            assert!(
                matches!(err, DbError::RowMapping { ref column, .. } if column == "priceperunit"),
                "price {price} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_every_item_field_maps_to_a_column() {
        let bad_name = Item::new(ItemCategory::Other, "", 1, Money::zero()).unwrap_err();
        let bad_category = "FOOD".parse::<ItemCategory>().unwrap_err();
        let bad_quantity = Item::new(ItemCategory::Other, "x", 1000, Money::zero()).unwrap_err();
        let bad_price = Item::new(ItemCategory::Other, "x", 1, Money::from_cents(-1)).unwrap_err();

        assert_eq!(column_for(&bad_name), "name");
        assert_eq!(column_for(&bad_category), "type");
        assert_eq!(column_for(&bad_quantity), "quantity");
        assert_eq!(column_for(&bad_price), "priceperunit");
    }

    #[tokio::test]
    async fn test_read_failure_propagates() {
        let store = FakeStore {
            fail_on_query: true,
            ..Default::default()
        };
        let cart = ShoppingCartAdaptor::new(store.clone());

        assert!(matches!(cart.get_items().await, Err(DbError::QueryFailed(_))));
        assert_eq!(store.journal().released, 1);
    }

    #[tokio::test]
    async fn test_clear_deletes_and_commits() {
        let store = FakeStore::default();
        let cart = ShoppingCartAdaptor::new(store.clone());

        assert_eq!(cart.clear().await.unwrap(), 1);

        let journal = store.journal();
        assert_eq!(journal.executed[0].0, CLEAR_ITEMS_SQL);
        assert_eq!(journal.commits, 1);
    }
}
