//! Shopping Cart Core - Shared types library.
//!
//! This crate provides the types used across the shopping cart components:
//! - `storefront` - Cart state, persistence, catalog and cart panel
//! - `integration-tests` - Cross-module scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure transforms - no I/O, no storage
//! access, no rendering. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, cart items, catalog products, prices and currencies

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
