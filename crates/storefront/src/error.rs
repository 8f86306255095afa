//! Unified error handling.
//!
//! Cart operations themselves never fail. Errors only arise while wiring a
//! provider together (configuration, storage, catalog) or rendering the panel.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::persisted::PersistError;
use crate::storage::StorageError;

/// Application-level error type for the storefront cart.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Explicit save of persisted state failed.
    #[error("Persist error: {0}")]
    Persist(#[from] PersistError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Panel template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
