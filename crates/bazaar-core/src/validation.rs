//! # Validation Module
//!
//! Field-level input checks for product records and shopper input.
//!
//! ## Where These Run
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI shell                                                     │
//! │  └── Form hints, immediate feedback                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (fail fast, one error)                           │
//! │  ├── Names, quantities, non-negative amounts                           │
//! │  └── Discount priority and date window shape                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: ConflictValidator (collects every business violation)        │
//! │  └── Margins, bounds, cross-product discount clashes                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::validation::{validate_priority, validate_quantity};
//!
//! validate_quantity(5).unwrap();
//! assert!(validate_priority(6).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_DISCOUNT_PRIORITY, MAX_ITEM_QUANTITY, MIN_DISCOUNT_PRIORITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a monetary field. Zero is allowed.
///
/// ## Example
/// ```rust
/// use bazaar_core::money::Money;
/// use bazaar_core::validation::validate_amount;
///
/// assert!(validate_amount("price", Money::from_cents(1099)).is_ok());
/// assert!(validate_amount("price", Money::zero()).is_ok());
/// assert!(validate_amount("price", Money::from_cents(-100)).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock level.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount priority (1 lowest, 5 highest).
pub fn validate_priority(priority: u8) -> ValidationResult<()> {
    if !(MIN_DISCOUNT_PRIORITY..=MAX_DISCOUNT_PRIORITY).contains(&priority) {
        return Err(ValidationError::OutOfRange {
            field: "priority".to_string(),
            min: MIN_DISCOUNT_PRIORITY as i64,
            max: MAX_DISCOUNT_PRIORITY as i64,
        });
    }

    Ok(())
}

/// Validates that a discount window does not end before it starts.
pub fn validate_discount_window(
    starts_on: Option<NaiveDate>,
    ends_on: Option<NaiveDate>,
) -> ValidationResult<()> {
    if let (Some(start), Some(end)) = (starts_on, ends_on) {
        if start > end {
            return Err(ValidationError::InvalidFormat {
                field: "discount window".to_string(),
                reason: format!("starts on {start} but ends on {end}"),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Shape checks on a product record before it reaches the catalog service.
///
/// Business rules (margins, bounds, discount clashes) are the conflict
/// validator's job, not this one's.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_amount("price", product.price)?;
    validate_amount("purchase_price", product.purchase_price)?;
    if let Some(base) = product.base_price {
        validate_amount("base_price", base)?;
    }
    validate_stock(product.stock)?;
    validate_stock(product.min_stock)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
