//! # Validation Module
//!
//! Input validation for everything that reaches the sale processor or the
//! product store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (axum extractors)                                        │
//! │  └── Type validation (JSON deserialization, path parameters)            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  └── Business rules: quantity > 0, price ≥ 0, stock ≥ 0, name length    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── CHECK constraints (stock >= 0, quantity > 0)                       │
//! │  └── Foreign key constraints                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewProduct, ProductUpdate};
use crate::{MAX_PRICE_CENTS, MAX_PRODUCT_NAME_LEN, MAX_STOCK};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use inventario_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name("  Widget ").unwrap(), "Widget");
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity: a positive integer.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock level: between zero and [`MAX_STOCK`].
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if !(0..=MAX_STOCK).contains(&stock) {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_STOCK,
        });
    }

    Ok(())
}

/// Validates a store identifier (ids start at 1).
pub fn validate_id(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Parses and validates a unit price given as decimal text.
///
/// ## Rules
/// - Plain decimal, at most two fraction digits
/// - Non-negative (zero is allowed: free items)
/// - At most [`MAX_PRICE_CENTS`]
///
/// ## Example
/// ```rust
/// use inventario_core::validation::parse_price;
///
/// assert_eq!(parse_price("9.99").unwrap().cents(), 999);
/// assert!(parse_price("0").is_ok());
/// assert!(parse_price("-1").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    if text.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "price".to_string(),
        });
    }

    let price = Money::parse_decimal(text).map_err(|reason| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: reason.to_string(),
    })?;

    if price.is_negative() || price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS / 100,
        });
    }

    Ok(price)
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates the fields of a product to be created.
pub fn validate_new_product(name: &str, price: &str, stock: i64) -> ValidationResult<NewProduct> {
    let name = validate_product_name(name)?;
    let price = parse_price(price)?;
    validate_stock(stock)?;

    Ok(NewProduct { name, price, stock })
}

/// Validates the fields of a product update.
pub fn validate_product_update(
    name: &str,
    price: &str,
    stock: Option<i64>,
) -> ValidationResult<ProductUpdate> {
    let name = validate_product_name(name)?;
    let price = parse_price(price)?;
    if let Some(stock) = stock {
        validate_stock(stock)?;
    }

    Ok(ProductUpdate { name, price, stock })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Widget").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_ok());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
        // Length counts characters, not bytes
        assert!(validate_product_name(&"ñ".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(10_000).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(5).is_ok());
        assert!(validate_stock(MAX_STOCK).is_ok());
        assert!(validate_stock(-1).is_err());
        assert!(matches!(
            validate_stock(MAX_STOCK + 1),
            Err(ValidationError::OutOfRange { max: MAX_STOCK, .. })
        ));
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("product_id", 1).is_ok());
        assert!(validate_id("product_id", 0).is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("9.99").unwrap().cents(), 999);
        assert_eq!(parse_price("0").unwrap().cents(), 0);

        assert!(matches!(
            parse_price(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_price("-0.01"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_price("nine"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_price_upper_bound() {
        assert_eq!(
            parse_price("1000000000.00").unwrap().cents(),
            MAX_PRICE_CENTS
        );
        assert!(matches!(
            parse_price("1000000000.01"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            parse_price("90000000000000000.00"),
            Err(ValidationError::OutOfRange { .. })
        ));

        // Largest storable price times largest stock still fits
        let price = parse_price("1000000000").unwrap();
        assert!(price.multiply_quantity(MAX_STOCK).is_some());
    }

    #[test]
    fn test_validate_new_product() {
        let product = validate_new_product(" Widget ", "9.99", 5).unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price.cents(), 999);
        assert_eq!(product.stock, 5);

        assert!(validate_new_product("Widget", "9.99", -1).is_err());
    }

    #[test]
    fn test_validate_product_update_without_stock() {
        let update = validate_product_update("Widget", "1.50", None).unwrap();
        assert_eq!(update.stock, None);
        assert_eq!(update.price.cents(), 150);
    }
}
