//! Cart provider: the single owner of cart state for a page.
//!
//! A [`CartProvider`] is constructed once, handed by reference to whatever
//! triggers cart operations, and dropped when the page goes away. It owns the
//! cart, the catalog the panel prices against, and the display currency.

use shopping_cart_core::CurrencyCode;

use crate::cart::ShoppingCart;
use crate::catalog::Catalog;
use crate::config::CartConfig;
use crate::error::Result;
use crate::panel::{CartPanel, CartView};
use crate::storage::{FileStore, KeyValueStore};

/// Owns a shopping cart together with the data needed to display it.
#[derive(Debug)]
pub struct CartProvider<S> {
    cart: ShoppingCart<S>,
    catalog: Catalog,
    currency: CurrencyCode,
}

impl CartProvider<FileStore> {
    /// Build a provider from configuration, backed by a [`FileStore`].
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the storage directory cannot be created, the
    /// storage key is invalid, or the catalog cannot be loaded.
    pub fn from_config(config: &CartConfig) -> Result<Self> {
        let store = FileStore::open(&config.storage_dir)?;
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin()?,
        };
        let cart = ShoppingCart::with_key(store, config.storage_key.as_str())?;

        tracing::info!(
            storage_dir = %config.storage_dir.display(),
            key = %config.storage_key,
            currency = config.currency.code(),
            lines = cart.items().len(),
            "Cart provider ready"
        );

        Ok(Self {
            cart,
            catalog,
            currency: config.currency,
        })
    }
}

impl<S: KeyValueStore> CartProvider<S> {
    /// Build a provider around an existing cart.
    #[must_use]
    pub const fn new(cart: ShoppingCart<S>, catalog: Catalog, currency: CurrencyCode) -> Self {
        Self {
            cart,
            catalog,
            currency,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &ShoppingCart<S> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut ShoppingCart<S> {
        &mut self.cart
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Panel bound to this provider's catalog and currency.
    #[must_use]
    pub const fn panel(&self) -> CartPanel<'_> {
        CartPanel::new(&self.catalog, self.currency)
    }

    /// Display data for the current cart contents.
    #[must_use]
    pub fn view(&self) -> CartView {
        self.panel().view(self.cart.cart_items())
    }

    /// Render the cart panel; empty while the cart is closed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Template` if rendering fails.
    pub fn render_panel(&self) -> Result<String> {
        Ok(self.panel().render(&self.cart)?)
    }

    /// Handle the panel's close affordance.
    pub const fn dismiss(&mut self) {
        self.cart.close_cart();
    }

    /// Confirm the slot holds the current items.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Persist` if the write fails.
    pub fn flush(&self) -> Result<()> {
        Ok(self.cart.save()?)
    }

    /// Dispose of the provider, returning the cart's backend.
    pub fn into_store(self) -> S {
        self.cart.into_store()
    }
}
