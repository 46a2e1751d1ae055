//! # Repository Module
//!
//! Domain-facing repositories built on the [`Store`](crate::store::Store)
//! capability.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Checkout<ShoppingCartAdaptor<Database>>                                │
//! │       │                                                                 │
//! │       │  cart.add(item) / cart.get_items()                             │
//! │       ▼                                                                 │
//! │  ShoppingCartAdaptor<S: Store>                                         │
//! │  ├── add(&mut self, item)      insert + commit                         │
//! │  ├── get_items(&self)          select, rows → Item                     │
//! │  └── clear(&self)              delete + commit                         │
//! │       │                                                                 │
//! │       │  run_unit_of_work(|session| ...)                               │
//! │       ▼                                                                 │
//! │  Store (Database in production, recording doubles in tests)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ShoppingCartAdaptor`](shopping_cart::ShoppingCartAdaptor) - persistent cart

pub mod shopping_cart;
