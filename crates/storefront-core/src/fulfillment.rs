//! # Book Fulfillment
//!
//! Matches an order (ISBN → requested quantity) against finite book stock.
//!
//! ## Per-ISBN Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  order["1234"] = 3                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BookDatabase::find_by_isbn("1234") → Book { stock: 2, price: $2.00 }  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  purchasable = min(3, 2) = 2                                           │
//! │       │                                                                 │
//! │       ├── BuyBookProcess::buy_book(book, 2)                            │
//! │       ├── total += 2 × $2.00                                           │
//! │       └── unavailable[book] = 3 - 2 = 1                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No order in, no summary out: `price_for_cart(None)` is `None`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::money::Money;

// =============================================================================
// Book
// =============================================================================

/// A catalog entry with its unit price and available stock.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub price: Money,
    pub quantity: u32,
}

impl Book {
    pub fn new(isbn: impl Into<String>, price: Money, quantity: u32) -> Self {
        Book {
            isbn: isbn.into(),
            price,
            quantity,
        }
    }
}

// =============================================================================
// Collaborators
// =============================================================================

/// Catalog lookup.
pub trait BookDatabase {
    fn find_by_isbn(&self, isbn: &str) -> Option<Book>;
}

/// Purchase action for a quantity that is known to be in stock.
pub trait BuyBookProcess {
    fn buy_book(&self, book: &Book, amount: u32);
}

// =============================================================================
// Purchase Summary
// =============================================================================

/// Outcome of pricing one order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseSummary {
    total_price: Money,
    unavailable: HashMap<Book, u32>,
    unknown_isbns: Vec<String>,
}

impl PurchaseSummary {
    /// Total for the purchasable quantities.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Shortfall per book, only for books that could not be fully supplied.
    pub fn unavailable(&self) -> &HashMap<Book, u32> {
        &self.unavailable
    }

    /// ISBNs the catalog did not know, sorted.
    pub fn unknown_isbns(&self) -> &[String] {
        &self.unknown_isbns
    }

    fn add_to_total_price(&mut self, amount: Money) {
        self.total_price += amount;
    }

    fn add_unavailable(&mut self, book: Book, shortfall: u32) {
        *self.unavailable.entry(book).or_insert(0) += shortfall;
    }
}

// =============================================================================
// Bookstore
// =============================================================================

/// Prices book orders against the catalog and triggers purchases.
pub struct Bookstore<D, P> {
    book_database: D,
    process: P,
}

impl<D: BookDatabase, P: BuyBookProcess> Bookstore<D, P> {
    pub fn new(book_database: D, process: P) -> Self {
        Bookstore {
            book_database,
            process,
        }
    }

    /// Prices `order`, buying whatever is in stock.
    ///
    /// Returns `None` for a `None` order without calling either
    /// collaborator. An empty order yields an empty summary.
    pub fn price_for_cart(&self, order: Option<&HashMap<String, u32>>) -> Option<PurchaseSummary> {
        let order = order?;
        let mut summary = PurchaseSummary::default();

        for (isbn, &requested) in order {
            self.retrieve_book(isbn, requested, &mut summary);
        }

        summary.unknown_isbns.sort();
        Some(summary)
    }

    fn retrieve_book(&self, isbn: &str, requested: u32, summary: &mut PurchaseSummary) {
        let Some(book) = self.book_database.find_by_isbn(isbn) else {
            warn!(isbn = %isbn, "Book not in catalog");
            summary.unknown_isbns.push(isbn.to_string());
            return;
        };

        let purchasable = requested.min(book.quantity);
        debug!(isbn = %isbn, requested, purchasable, "Matched order line against stock");

        if purchasable > 0 {
            self.process.buy_book(&book, purchasable);
        }
        summary.add_to_total_price(book.price * purchasable);

        let shortfall = requested - purchasable;
        if shortfall > 0 {
            summary.add_unavailable(book, shortfall);
        }
    }

    pub fn book_database(&self) -> &D {
        &self.book_database
    }

    pub fn process(&self) -> &P {
        &self.process
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
