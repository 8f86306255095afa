//! Shopping Cart Storefront library.
//!
//! Client-side cart state for the storefront: item IDs and quantities mirrored
//! into a durable key-value slot, plus the slide-out cart panel that renders
//! the contents and total.
//!
//! # Architecture
//!
//! - [`storage`] - Key-value backends (`MemoryStore`, `FileStore`)
//! - [`persisted`] - Load-on-init / save-on-change mirror over a single slot
//! - [`cart`] - Cart state manager (quantities, visibility)
//! - [`catalog`] - Read-only product catalog
//! - [`panel`] - Askama-rendered cart panel
//! - [`provider`] - Explicitly constructed owner tying the pieces together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod panel;
pub mod persisted;
pub mod provider;
pub mod storage;

pub use cart::{DEFAULT_CART_KEY, ShoppingCart, Visibility};
pub use catalog::Catalog;
pub use config::CartConfig;
pub use error::{AppError, Result};
pub use panel::CartPanel;
pub use persisted::Persisted;
pub use provider::CartProvider;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
