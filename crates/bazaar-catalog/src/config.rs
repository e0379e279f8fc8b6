//! # Service Configuration
//!
//! Configuration for the pricing service and its catalog connection.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BAZAAR_MIN_PRICE=5                                                 │
//! │     BAZAAR_MAX_PRODUCT_DISCOUNT=80                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/bazaar/pricing.toml (Linux)                              │
//! │     ~/Library/Application Support/com.bazaar.bazaar/pricing.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     PricingPolicy::default(), empty catalog                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! [policy]
//! min_price = 100              # paisa
//! max_price = 10000000
//! max_product_discount = 9000  # basis points
//! max_bulk_discount = 10000
//! recommended_margin = 1000
//! low_stock_threshold = 10
//!
//! [catalog]
//! name = "Bazaar Main Store"
//! seed_demo = true
//! max_attempts = 3
//! ```
//!
//! Environment overrides use whole rupees and whole percentages, as an
//! operator would type them.

use bazaar_core::{Money, Percent, PricingPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Catalog Settings
// =============================================================================

/// Settings for the catalog connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Display name of the catalog (shown in logs and the admin console).
    #[serde(default = "default_catalog_name")]
    pub name: String,

    /// Load demo products into an empty catalog on startup.
    #[serde(default)]
    pub seed_demo: bool,

    /// Attempts a caller should make for a transient failure before
    /// giving up. Used with [`crate::should_retry`].
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_catalog_name() -> String {
    "Bazaar".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            name: default_catalog_name(),
            seed_demo: false,
            max_attempts: default_max_attempts(),
        }
    }
}

// =============================================================================
// Main Service Configuration
// =============================================================================

/// Complete pricing service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Price guards and discount limits.
    #[serde(default)]
    pub policy: PricingPolicy,

    /// Catalog connection settings.
    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pricing.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading pricing config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load pricing config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::Config("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Pricing config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        self.policy
            .validate()
            .map_err(|e| StoreError::Config(e.to_string()))?;

        if self.catalog.name.trim().is_empty() {
            return Err(StoreError::Config("catalog name must not be empty".into()));
        }

        if self.catalog.max_attempts == 0 {
            return Err(StoreError::Config(
                "max_attempts must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`. Unparseable values are logged and
    /// ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("BAZAAR_MIN_PRICE") {
            match value.trim().parse::<i64>() {
                Ok(rupees) => {
                    debug!(min_price = rupees, "Overriding min price from environment");
                    self.policy.min_price = Money::from_major(rupees);
                }
                Err(_) => warn!(value = %value, "Invalid BAZAAR_MIN_PRICE"),
            }
        }

        if let Some(value) = lookup("BAZAAR_MAX_PRICE") {
            match value.trim().parse::<i64>() {
                Ok(rupees) => {
                    debug!(max_price = rupees, "Overriding max price from environment");
                    self.policy.max_price = Money::from_major(rupees);
                }
                Err(_) => warn!(value = %value, "Invalid BAZAAR_MAX_PRICE"),
            }
        }

        if let Some(value) = lookup("BAZAAR_MAX_PRODUCT_DISCOUNT") {
            let parsed = value
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(|pct| Percent::try_from_percentage(pct).ok());
            match parsed {
                Some(pct) => {
                    debug!(max_product_discount = %pct, "Overriding discount limit from environment");
                    self.policy.max_product_discount = pct;
                }
                None => warn!(value = %value, "Invalid BAZAAR_MAX_PRODUCT_DISCOUNT"),
            }
        }

        if let Some(value) = lookup("BAZAAR_LOW_STOCK_THRESHOLD") {
            match value.trim().parse::<i64>() {
                Ok(threshold) => self.policy.low_stock_threshold = threshold,
                Err(_) => warn!(value = %value, "Invalid BAZAAR_LOW_STOCK_THRESHOLD"),
            }
        }

        if let Some(value) = lookup("BAZAAR_SEED_DEMO") {
            match value.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.catalog.seed_demo = true,
                "0" | "false" | "no" | "off" => self.catalog.seed_demo = false,
                _ => warn!(value = %value, "Invalid BAZAAR_SEED_DEMO"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bazaar", "bazaar")
            .map(|dirs| dirs.config_dir().join("pricing.toml"))
    }
}
