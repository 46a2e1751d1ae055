//! # Checkout CLI
//!
//! Adds items to the persistent cart and prints the priced total.
//!
//! ## Usage
//! ```bash
//! # One phone, default pricing
//! cargo run -p storefront-db --bin checkout -- ELECTRONIC:phone:1:10.00
//!
//! # Start from an empty cart, custom pricing
//! cargo run -p storefront-db --bin checkout -- --clear --pricing pricing.json OTHER:milk:2:2.49
//!
//! # Specify database path
//! cargo run -p storefront-db --bin checkout -- --db ./data/storefront.db
//! ```
//!
//! Items are `CATEGORY:NAME:QTY:PRICE`; the name may itself contain `:`.
//! Without `--db`, `STOREFRONT_DB_PATH` is used, then `./storefront_dev.db`.

use std::env;
use std::fs;

use storefront_core::{Cart, Checkout, Item, ItemCategory, Money, PricingConfig};
use storefront_db::{Database, DbConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_DB_PATH: &str = "./storefront_dev.db";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("STOREFRONT_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    let mut pricing_path: Option<String> = None;
    let mut clear = false;
    let mut items = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--pricing" | "-p" => {
                if i + 1 < args.len() {
                    pricing_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--clear" => clear = true,
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            other => items.push(parse_item(other)?),
        }
        i += 1;
    }

    let pricing = match &pricing_path {
        Some(path) => PricingConfig::from_json(&fs::read_to_string(path)?)?,
        None => PricingConfig::default(),
    };

    let db = Database::new(DbConfig::new(&db_path)).await?;
    info!(path = %db_path, "Connected to database");

    let cart = db.cart();
    if clear {
        cart.clear().await?;
    }

    let mut checkout = Checkout::new(cart, pricing.rules());
    for item in items {
        checkout.add_to_cart(item).await?;
    }

    let lines = checkout.cart().get_items().await?;
    let total = checkout.calculate().await?;

    println!("Storefront Checkout");
    println!("===================");
    for item in &lines {
        println!(
            "  {:<10} {:<24} {:>4} x {:>10} = {:>10}",
            item.category().as_str(),
            item.name(),
            item.quantity(),
            item.unit_price().to_string(),
            item.line_total().to_string()
        );
    }
    println!();
    println!("Lines: {}", lines.len());
    println!("Total: {}", total);

    db.close().await;
    Ok(())
}

/// Log filter from `RUST_LOG`, else `info,storefront=debug,sqlx=warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Parses `CATEGORY:NAME:QTY:PRICE`.
fn parse_item(arg: &str) -> Result<Item, Box<dyn std::error::Error>> {
    let (category, rest) = arg
        .split_once(':')
        .ok_or_else(|| format!("expected CATEGORY:NAME:QTY:PRICE, got '{arg}'"))?;

    let mut tail = rest.rsplitn(3, ':');
    let (Some(price), Some(quantity), Some(name)) = (tail.next(), tail.next(), tail.next()) else {
        return Err(format!("expected CATEGORY:NAME:QTY:PRICE, got '{arg}'").into());
    };

    let category: ItemCategory = category.parse()?;
    let quantity: i64 = quantity.parse()?;
    let unit_price = price
        .parse::<f64>()
        .ok()
        .and_then(Money::from_decimal)
        .ok_or_else(|| format!("price must be a finite decimal amount, got '{price}'"))?;

    Ok(Item::new(category, name, quantity, unit_price)?)
}

fn print_help() {
    println!("Storefront Checkout");
    println!();
    println!("Usage: checkout [OPTIONS] [CATEGORY:NAME:QTY:PRICE]...");
    println!();
    println!("Options:");
    println!("  -d, --db <PATH>        Database file path (default: {DEFAULT_DB_PATH})");
    println!("  -p, --pricing <FILE>   Pricing configuration (JSON)");
    println!("      --clear            Empty the cart before adding items");
    println!("  -h, --help             Show this help message");
}
