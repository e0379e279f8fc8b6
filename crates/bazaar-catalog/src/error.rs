//! # Catalog Error Types
//!
//! Error types for catalog store and pricing service operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  PricingError (bazaar-core)     ConflictReport (invalid)               │
//! │       │                                │                                │
//! │       ▼                                ▼                                │
//! │  StoreError (this module) ← Pricing(#[from])  /  Rejected(report)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  classify_store_error() → ErrorClass → should_retry()                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UI shell shows a message, the caller decides whether to retry         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bazaar_core::{ConflictReport, PricingError};
use thiserror::Error;

/// Catalog and pricing service errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No product with this id.
    #[error("Product not found: {0}")]
    NotFound(i64),

    /// A product with this id already exists.
    #[error("Product {0} already exists")]
    Duplicate(i64),

    /// The configuration failed validation; the report lists every conflict.
    #[error("Pricing configuration rejected: {}", .0.summary())]
    Rejected(ConflictReport),

    /// The catalog service could not be reached or timed out.
    ///
    /// ## When This Occurs
    /// - Remote catalog is down or slow
    /// - The in-memory store was told to fail (tests)
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    /// Invalid service configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Config file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),

    /// Pricing computation failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

/// Result type for catalog operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Error Classification (for retry advice)
// =============================================================================

/// Coarse category of a failure, used for retry advice and user messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Transient service failure.
    Unavailable,
    /// Input or configuration was rejected.
    Validation,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::Unavailable => "unavailable",
            ErrorClass::Validation => "validation",
            ErrorClass::NotFound => "not_found",
            ErrorClass::Conflict => "conflict",
            ErrorClass::Internal => "internal",
        }
    }

    /// Message suitable for showing to an admin user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorClass::Unavailable => "The catalog service is unavailable. Please try again.",
            ErrorClass::Validation => "Invalid pricing data. Please check your input.",
            ErrorClass::NotFound => "Requested product not found.",
            ErrorClass::Conflict => "The product was changed by someone else.",
            ErrorClass::Internal => "An unexpected error occurred.",
        }
    }
}

/// Maps a store error to its class.
pub fn classify_store_error(err: &StoreError) -> ErrorClass {
    match err {
        StoreError::Unavailable(_) => ErrorClass::Unavailable,
        StoreError::NotFound(_) => ErrorClass::NotFound,
        StoreError::Duplicate(_) => ErrorClass::Conflict,
        StoreError::Rejected(_) | StoreError::Pricing(_) | StoreError::Config(_) => {
            ErrorClass::Validation
        }
        StoreError::Io(_) => ErrorClass::Internal,
    }
}

/// Whether the caller should try again after `attempt` failed attempts.
///
/// Only transient failures are retried, and never more than `max_attempts`.
pub fn should_retry(class: ErrorClass, attempt: u32, max_attempts: u32) -> bool {
    attempt < max_attempts && class == ErrorClass::Unavailable
}

impl StoreError {
    pub fn class(&self) -> ErrorClass {
        classify_store_error(self)
    }

    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Unavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(
            classify_store_error(&StoreError::Unavailable("timeout".into())),
            ErrorClass::Unavailable
        );
        assert_eq!(classify_store_error(&StoreError::NotFound(3)), ErrorClass::NotFound);
        assert_eq!(
            classify_store_error(&StoreError::Rejected(ConflictReport::new())),
            ErrorClass::Validation
        );
        assert_eq!(
            classify_store_error(&PricingError::InvalidQuantity(0).into()),
            ErrorClass::Validation
        );
    }

    #[test]
    fn test_should_retry() {
        assert!(should_retry(ErrorClass::Unavailable, 0, 3));
        assert!(should_retry(ErrorClass::Unavailable, 2, 3));
        assert!(!should_retry(ErrorClass::Unavailable, 3, 3));
        assert!(!should_retry(ErrorClass::Validation, 0, 3));
        assert!(!should_retry(ErrorClass::NotFound, 0, 3));
    }

    #[test]
    fn test_error_display() {
        let mut report = ConflictReport::new();
        report.push(bazaar_core::ConflictKind::MarginViolation, "too cheap");
        let err = StoreError::Rejected(report);
        assert_eq!(
            err.to_string(),
            "Pricing configuration rejected: margin_violation: too cheap"
        );
        assert_eq!(StoreError::NotFound(9).to_string(), "Product not found: 9");
    }
}
