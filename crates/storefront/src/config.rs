//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CART_STORAGE_DIR` - Directory holding persisted slots (default: `.shopping-cart`)
//! - `CART_STORAGE_KEY` - Slot key for cart items (default: `shopping-cart`)
//! - `CART_CURRENCY` - ISO 4217 code used for display (default: `USD`)
//! - `CART_CATALOG_PATH` - Catalog JSON file (default: built-in catalog)

use std::path::PathBuf;

use shopping_cart_core::CurrencyCode;
use thiserror::Error;

use crate::cart::DEFAULT_CART_KEY;
use crate::storage::validate_key;

const DEFAULT_STORAGE_DIR: &str = ".shopping-cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shopping cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Directory for the file-backed store
    pub storage_dir: PathBuf,
    /// Slot key the cart items are mirrored into
    pub storage_key: String,
    /// Currency used to format prices
    pub currency: CurrencyCode,
    /// Catalog file; `None` uses the built-in catalog
    pub catalog_path: Option<PathBuf>,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_CART_KEY.to_string(),
            currency: CurrencyCode::default(),
            catalog_path: None,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_dir = lookup("CART_STORAGE_DIR").map_or(defaults.storage_dir, PathBuf::from);

        let storage_key = lookup("CART_STORAGE_KEY").unwrap_or(defaults.storage_key);
        validate_key(&storage_key).map_err(|e| {
            ConfigError::InvalidEnvVar("CART_STORAGE_KEY".to_string(), e.to_string())
        })?;

        let currency = match lookup("CART_CURRENCY") {
            Some(code) => code.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("CART_CURRENCY".to_string(), e.to_string())
            })?,
            None => defaults.currency,
        };

        let catalog_path = lookup("CART_CATALOG_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            storage_dir,
            storage_key,
            currency,
            catalog_path,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CartConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.storage_key, "shopping-cart");
        assert_eq!(config.currency, CurrencyCode::USD);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup(&[
            ("CART_STORAGE_DIR", "/var/lib/cart"),
            ("CART_STORAGE_KEY", "cart-v2"),
            ("CART_CURRENCY", "eur"),
            ("CART_CATALOG_PATH", "data/items.json"),
        ]))
        .unwrap();

        assert_eq!(config.storage_dir, PathBuf::from("/var/lib/cart"));
        assert_eq!(config.storage_key, "cart-v2");
        assert_eq!(config.currency, CurrencyCode::EUR);
        assert_eq!(config.catalog_path, Some(PathBuf::from("data/items.json")));
    }

    #[test]
    fn test_blank_catalog_path_uses_builtin() {
        let config = CartConfig::from_lookup(lookup(&[("CART_CATALOG_PATH", "  ")])).unwrap();
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_invalid_currency() {
        let result = CartConfig::from_lookup(lookup(&[("CART_CURRENCY", "DOGE")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar(var, _)) if var == "CART_CURRENCY"
        ));
    }

    #[test]
    fn test_invalid_storage_key() {
        let result = CartConfig::from_lookup(lookup(&[("CART_STORAGE_KEY", "../cart")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvVar(var, _)) if var == "CART_STORAGE_KEY"
        ));
    }
}
