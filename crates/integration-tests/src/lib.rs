//! Integration tests for the shopping cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopping-cart-integration-tests
//! ```
//!
//! Set `RUST_LOG=shopping_cart_storefront=debug` to see cart tracing output.
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart state mirrored through storage backends
//! - `cart_panel` - Panel rendering and totals against a catalog

use shopping_cart_core::ProductId;
use shopping_cart_storefront::Catalog;
use tracing_subscriber::EnvFilter;

/// Install a test-friendly tracing subscriber once per test binary.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Shorthand for a product ID.
#[must_use]
pub const fn id(n: i64) -> ProductId {
    ProductId::new(n)
}

/// Small catalog with round prices.
///
/// # Panics
///
/// Panics if the fixture JSON is malformed.
#[must_use]
#[allow(clippy::expect_used)]
pub fn sample_catalog() -> Catalog {
    Catalog::from_json(
        r#"[
            {"id": 1, "name": "Notebook", "price": 10.00, "imageUrl": "/imgs/notebook.jpg"},
            {"id": 2, "name": "Desk Lamp", "price": 24.50, "imageUrl": "/imgs/lamp.jpg"},
            {"id": 3, "name": "Standing Desk", "price": 1499.99, "imageUrl": "/imgs/desk.jpg"}
        ]"#,
    )
    .expect("fixture catalog is valid")
}
