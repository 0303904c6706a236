//! # Seed Data Generator
//!
//! Populates the database with demo products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 products (default)
//! cargo run -p inventario-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p inventario-db --bin seed -- --count 200
//!
//! # Specify database path
//! cargo run -p inventario-db --bin seed -- --db ./data/inventario.db
//! ```
//!
//! Output is deterministic: the same count always yields the same names,
//! prices and stock levels.

use std::env;

use inventario_core::{Money, NewProduct};
use inventario_db::{Database, DbConfig};

/// Base product names, combined with a variant to build the full name.
const NAMES: &[&str] = &[
    "Cuaderno",
    "Lapicero",
    "Borrador",
    "Regla",
    "Tijeras",
    "Marcador",
    "Carpeta",
    "Calculadora",
    "Mochila",
    "Resaltador",
];

/// Variant suffixes with their price addon in cents.
const VARIANTS: &[(&str, i64)] = &[
    ("Chico", 0),
    ("Mediano", 150),
    ("Grande", 300),
    ("Pack x3", 450),
    ("Pack x10", 1200),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./inventario.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Inventario Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: ./inventario.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Inventario Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count.min(NAMES.len() * VARIANTS.len()) {
        let product = generate_product(seed);

        if let Err(e) = db.products().insert(&product).await {
            eprintln!("Failed to insert {}: {}", product.name, e);
            continue;
        }
        generated += 1;
    }

    println!();
    println!("✓ Generated {} products in {:?}", generated, start.elapsed());

    db.close().await;
    Ok(())
}

/// Generates the product for a given position in the catalog.
fn generate_product(seed: usize) -> NewProduct {
    let name = NAMES[seed % NAMES.len()];
    let (variant, price_addon) = VARIANTS[(seed / NAMES.len()) % VARIANTS.len()];

    // $0.99 - $8.98 base, plus the variant addon
    let base_price = 99 + ((seed * 37) % 800) as i64;

    NewProduct {
        name: format!("{} {}", name, variant),
        price: Money::from_cents(base_price + price_addon),
        stock: ((seed * 7) % 51) as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_products_are_valid() {
        for seed in 0..NAMES.len() * VARIANTS.len() {
            let product = generate_product(seed);
            assert!(!product.name.is_empty());
            assert!(!product.price.is_negative());
            assert!(product.stock >= 0);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate_product(3), generate_product(3));
        assert_ne!(generate_product(3).name, generate_product(13).name);
    }
}
