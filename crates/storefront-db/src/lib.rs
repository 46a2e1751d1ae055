//! # storefront-db: Persistence Layer for Storefront
//!
//! SQLite-backed cart storage, using sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  Checkout::calculate() (storefront-core)                               │
//! │       │  Cart::get_items()                                             │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (shopping_cart)│    │  (embedded)  │  │   │
//! │  │   │               │    │                │    │              │  │   │
//! │  │   │ impl Store    │◄───│ ShoppingCart-  │    │ 001_create_  │  │   │
//! │  │   │ SqliteSession │    │ Adaptor: Cart  │    │ shoppingcart │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                SQLite Database (shoppingcart)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - `Store`/`Session` capabilities, `SqlValue`, `Record`
//! - [`pool`] - Connection pool and the SQLite `Store`
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_core::{Checkout, PricingConfig};
//! use storefront_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/storefront.db")).await?;
//!
//! let mut checkout = Checkout::new(db.cart(), PricingConfig::default().rules());
//! checkout.add_to_cart(phone).await?;
//! let total = checkout.calculate().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, SqliteSession};
pub use store::{Record, Session, SqlValue, Store};

// Repository re-exports for convenience
pub use repository::shopping_cart::ShoppingCartAdaptor;
