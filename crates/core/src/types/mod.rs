//! Core types for the shopping cart.
//!
//! This module provides type-safe wrappers for cart and catalog concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{CartItem, CartItems, CartItemsError};
pub use id::*;
pub use price::{
    CurrencyCode, CurrencyCodeError, Price, format_currency, line_amount, saturating_sum,
};
pub use product::Product;
