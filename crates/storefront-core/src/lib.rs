//! # storefront-core: Pure Pricing Logic for Storefront
//!
//! This crate holds the cart model and the rule-based pricing engine with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 checkout binary (storefront-db)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   rules   │  │   cart    │  │ checkout  │  │   │
//! │  │   │   Item    │  │ PriceRule │  │   Cart    │  │ Checkout  │  │   │
//! │  │   │ Category  │  │ Delivery… │  │ InMemory  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              storefront-db (ShoppingCartAdaptor: Cart)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Item` and `ItemCategory`
//! - [`money`] - Money type with integer arithmetic
//! - [`rules`] - `PriceRule` and the standard rules
//! - [`config`] - `PricingConfig` for the standard rules
//! - [`cart`] - `Cart` capability and `InMemoryCart`
//! - [`checkout`] - `Checkout` orchestrator
//! - [`fulfillment`] - Book orders against finite stock
//! - [`error`] - Domain error types
//! - [`validation`] - Item validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Checkout, InMemoryCart, Item, ItemCategory, Money, PricingConfig};
//!
//! # tokio_test();
//! # fn tokio_test() {
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let mut checkout = Checkout::new(InMemoryCart::new(), PricingConfig::default().rules());
//!
//! let phone = Item::new(ItemCategory::Electronic, "phone", 1, Money::from_cents(1000)).unwrap();
//! checkout.add_to_cart(phone).await.unwrap();
//!
//! // $5.00 delivery + $7.50 electronics + $10.00 goods
//! assert_eq!(checkout.calculate().await.unwrap(), Money::from_cents(2250));
//! # });
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod fulfillment;
pub mod money;
pub mod rules;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, InMemoryCart};
pub use checkout::Checkout;
pub use config::PricingConfig;
pub use error::{CoreError, CoreResult, ValidationError};
pub use fulfillment::{Book, BookDatabase, Bookstore, BuyBookProcess, PurchaseSummary};
pub use money::Money;
pub use rules::{DeliveryPrice, DeliveryTier, ExtraCostForElectronics, PriceRule, RegularCost};
pub use types::{Item, ItemCategory};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in an in-memory cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity on a single cart line.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest accepted unit price ($1,000,000.00). Also caps configured fees.
pub const MAX_UNIT_PRICE_CENTS: i64 = 100_000_000;
