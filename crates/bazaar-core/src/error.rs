//! # Error Types
//!
//! Domain-specific error types for bazaar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bazaar-core errors (this file)                                        │
//! │  ├── PricingError     - Fail-fast errors (Money, tier resolution)      │
//! │  ├── ValidationError  - Field-level input failures                     │
//! │  └── ConflictKind     - Taxonomy used inside a ConflictReport          │
//! │                                                                         │
//! │  bazaar-catalog errors (separate crate)                                │
//! │  └── StoreError       - Catalog service failures                       │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → StoreError → UI shell          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Failure Styles
//! Money and the tier resolver treat malformed numbers as programming errors
//! and return `Err(PricingError)` immediately. The conflict validator never
//! returns an error; it collects every violation as a [`ConflictKind`] entry
//! so the admin console can show all of them at once.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Pricing Error
// =============================================================================

/// Fail-fast pricing errors.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A numeric input was NaN, infinite or otherwise unusable.
    #[error("Invalid amount for {field}: {reason}")]
    InvalidAmount { field: String, reason: String },

    /// The product record cannot be priced.
    ///
    /// ## When This Occurs
    /// - Negative base price
    /// - Negative seasonal discount (configuration bug, never clamped)
    #[error("Product {product_id} cannot be priced: {reason}")]
    InvalidProduct { product_id: i64, reason: String },

    /// Quantity must be at least 1.
    #[error("Quantity {0} is invalid, must be at least 1")]
    InvalidQuantity(i64),

    /// Selling price would not exceed the purchase price.
    #[error("Price {price} does not exceed purchase price {purchase_price}")]
    MarginViolation {
        price: crate::Money,
        purchase_price: crate::Money,
    },

    /// Price outside the configured floor/ceiling.
    #[error("Price {price} outside allowed range {min}..={max}")]
    BoundsViolation {
        price: crate::Money,
        min: crate::Money,
        max: crate::Money,
    },

    /// Discount value breaks a discount rule.
    #[error("Discount conflict: {0}")]
    DiscountConflict(String),

    /// Pricing policy or bulk request is internally inconsistent.
    #[error("Configuration conflict: {0}")]
    ConfigurationConflict(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl PricingError {
    /// Creates an InvalidAmount error for a field.
    pub fn invalid_amount(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingError::InvalidAmount {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an InvalidProduct error.
    pub fn invalid_product(product_id: i64, reason: impl Into<String>) -> Self {
        PricingError::InvalidProduct {
            product_id,
            reason: reason.into(),
        }
    }

    /// Returns the conflict taxonomy entry matching this error.
    pub fn kind(&self) -> ConflictKind {
        match self {
            PricingError::InvalidAmount { .. } | PricingError::InvalidQuantity(_) => {
                ConflictKind::InvalidAmount
            }
            PricingError::InvalidProduct { .. } | PricingError::Validation(_) => {
                ConflictKind::InvalidProduct
            }
            PricingError::MarginViolation { .. } => ConflictKind::MarginViolation,
            PricingError::BoundsViolation { .. } => ConflictKind::BoundsViolation,
            PricingError::DiscountConflict(_) => ConflictKind::DiscountConflict,
            PricingError::ConfigurationConflict(_) => ConflictKind::ConfigurationConflict,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before pricing logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparsable decimal).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Conflict Kind
// =============================================================================

/// Classification of a single entry in a `ConflictReport`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    InvalidAmount,
    InvalidProduct,
    MarginViolation,
    BoundsViolation,
    DiscountConflict,
    ConfigurationConflict,
    /// Product already carries an active discount that a bulk discount would collide with.
    ExistingDiscount,
}

impl ConflictKind {
    /// Stable snake_case label, used in logs and stats keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::InvalidAmount => "invalid_amount",
            ConflictKind::InvalidProduct => "invalid_product",
            ConflictKind::MarginViolation => "margin_violation",
            ConflictKind::BoundsViolation => "bounds_violation",
            ConflictKind::DiscountConflict => "discount_conflict",
            ConflictKind::ConfigurationConflict => "configuration_conflict",
            ConflictKind::ExistingDiscount => "existing_discount",
        }
    }
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Money;

    #[test]
    fn test_error_messages() {
        let err = PricingError::MarginViolation {
            price: Money::from_cents(60000),
            purchase_price: Money::from_cents(70000),
        };
        assert_eq!(
            err.to_string(),
            "Price Rs. 600.00 does not exceed purchase price Rs. 700.00"
        );

        let err = PricingError::invalid_product(7, "negative base price");
        assert_eq!(
            err.to_string(),
            "Product 7 cannot be priced: negative base price"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "priority".to_string(),
            min: 1,
            max: 5,
        };
        assert_eq!(err.to_string(), "priority must be between 1 and 5");
    }

    #[test]
    fn test_validation_converts_to_pricing_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let err: PricingError = validation_err.into();
        assert!(matches!(err, PricingError::Validation(_)));
        assert_eq!(err.kind(), ConflictKind::InvalidProduct);
    }

    #[test]
    fn test_conflict_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ConflictKind::MarginViolation).unwrap();
        assert_eq!(json, "\"margin_violation\"");
        assert_eq!(ConflictKind::ExistingDiscount.to_string(), "existing_discount");
    }
}
