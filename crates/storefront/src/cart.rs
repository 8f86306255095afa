//! Cart state manager.
//!
//! [`ShoppingCart`] owns the item list (mirrored into a storage slot through
//! [`Persisted`]) and the panel visibility flag (transient, never stored).
//! Each mutation computes a new list from the previous one and hands the
//! whole list to the mirror, which writes the slot as a side effect.
//!
//! Operations are total: unknown IDs read as quantity 0, and decreasing or
//! removing an unknown ID leaves the cart unchanged.

use shopping_cart_core::{CartItem, CartItems, ProductId};
use tracing::instrument;

use crate::persisted::{PersistError, Persisted};
use crate::storage::{KeyValueStore, StorageError, validate_key};

/// Slot key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "shopping-cart";

/// Cart panel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

/// Shopping cart backed by a key-value store.
#[derive(Debug)]
pub struct ShoppingCart<S> {
    items: Persisted<CartItems, S>,
    visibility: Visibility,
}

impl<S: KeyValueStore> ShoppingCart<S> {
    /// Restore the cart from the default slot, or start empty.
    pub fn new(store: S) -> Self {
        Self::restore(store, DEFAULT_CART_KEY.to_string())
    }

    /// Restore the cart from `key`, or start empty.
    ///
    /// Keys must pass [`validate_key`] so that every backend can hold the
    /// slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` if `key` is not a valid slot key.
    pub fn with_key(store: S, key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self::restore(store, key))
    }

    fn restore(store: S, key: String) -> Self {
        let items = Persisted::load_with(store, key, CartItems::new);
        tracing::debug!(
            key = items.key(),
            lines = items.get().len(),
            "Cart restored"
        );
        Self {
            items,
            visibility: Visibility::Closed,
        }
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.items.get().as_slice()
    }

    /// The full validated item list.
    #[must_use]
    pub const fn cart_items(&self) -> &CartItems {
        self.items.get()
    }

    /// Quantity held for `id`, or 0.
    #[must_use]
    pub fn get_item_quantity(&self, id: ProductId) -> u32 {
        self.items.get().quantity_of(id)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn cart_quantity(&self) -> u64 {
        self.items.get().total_quantity()
    }

    /// Add one unit of `id`.
    #[instrument(skip(self), fields(key = self.items.key()))]
    pub fn increase_cart_quantity(&mut self, id: ProductId) {
        self.items.update(|items| items.with_increased(id));
    }

    /// Remove one unit of `id`, dropping the line at zero.
    #[instrument(skip(self), fields(key = self.items.key()))]
    pub fn decrease_cart_quantity(&mut self, id: ProductId) {
        if self.items.get().get(id).is_none() {
            tracing::debug!("Decrease for item not in cart ignored");
            return;
        }
        self.items.update(|items| items.with_decreased(id));
    }

    /// Drop the line for `id`.
    #[instrument(skip(self), fields(key = self.items.key()))]
    pub fn remove_from_cart(&mut self, id: ProductId) {
        if self.items.get().get(id).is_none() {
            tracing::debug!("Remove for item not in cart ignored");
            return;
        }
        self.items.update(|items| items.without(id));
    }

    /// Show the cart panel.
    pub const fn open_cart(&mut self) {
        self.visibility = Visibility::Open;
    }

    /// Hide the cart panel.
    pub const fn close_cart(&mut self) {
        self.visibility = Visibility::Closed;
    }

    #[must_use]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    /// Slot key the items are mirrored into.
    #[must_use]
    pub fn key(&self) -> &str {
        self.items.key()
    }

    /// Backend the items are mirrored into.
    #[must_use]
    pub const fn store(&self) -> &S {
        self.items.store()
    }

    /// Write the current items to the slot and report any failure.
    ///
    /// Mutations already write through; this is for callers that need to
    /// know the slot is current, e.g. before the page is torn down.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if the backend write fails.
    pub fn save(&self) -> Result<(), PersistError> {
        self.items.save()
    }

    /// Dispose of the cart, returning its backend.
    pub fn into_store(self) -> S {
        self.items.into_store()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn id(n: i64) -> ProductId {
        ProductId::new(n)
    }

    fn slot(store: &MemoryStore) -> String {
        store.get(DEFAULT_CART_KEY).unwrap().unwrap()
    }

    #[test]
    fn test_new_cart_is_empty_and_closed() {
        let store = MemoryStore::new();
        let cart = ShoppingCart::new(&store);

        assert!(cart.items().is_empty());
        assert_eq!(cart.cart_quantity(), 0);
        assert_eq!(cart.visibility(), Visibility::Closed);
        assert_eq!(slot(&store), "[]");
    }

    #[test]
    fn test_increase_decrease_scenario() {
        let store = MemoryStore::new();
        let mut cart = ShoppingCart::new(&store);

        cart.increase_cart_quantity(id(5));
        cart.increase_cart_quantity(id(5));
        assert_eq!(cart.get_item_quantity(id(5)), 2);
        assert_eq!(cart.cart_quantity(), 2);
        assert_eq!(slot(&store), r#"[{"id":5,"quantity":2}]"#);

        cart.decrease_cart_quantity(id(5));
        assert_eq!(slot(&store), r#"[{"id":5,"quantity":1}]"#);

        cart.decrease_cart_quantity(id(5));
        assert!(cart.items().is_empty());
        assert_eq!(slot(&store), "[]");
    }

    #[test]
    fn test_remove_ignores_quantity() {
        let store = MemoryStore::new();
        let mut cart = ShoppingCart::new(&store);
        for _ in 0..4 {
            cart.increase_cart_quantity(id(1));
        }
        cart.increase_cart_quantity(id(2));

        cart.remove_from_cart(id(1));
        assert_eq!(cart.get_item_quantity(id(1)), 0);
        assert_eq!(cart.cart_quantity(), 1);
    }

    #[test]
    fn test_absent_id_operations_are_noops() {
        let store = MemoryStore::new();
        let mut cart = ShoppingCart::new(&store);
        cart.increase_cart_quantity(id(1));
        let before = slot(&store);

        cart.decrease_cart_quantity(id(99));
        cart.remove_from_cart(id(99));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(slot(&store), before);
    }

    #[test]
    fn test_visibility_is_not_persisted() {
        let store = MemoryStore::new();
        let mut cart = ShoppingCart::new(&store);

        cart.open_cart();
        assert!(cart.is_open());
        assert_eq!(slot(&store), "[]");

        let restored = ShoppingCart::new(&store);
        assert!(!restored.is_open());

        cart.close_cart();
        assert_eq!(cart.visibility(), Visibility::Closed);
    }

    #[test]
    fn test_custom_key() {
        let store = MemoryStore::new();
        let mut cart = ShoppingCart::with_key(&store, "cart-b").unwrap();
        cart.increase_cart_quantity(id(3));

        assert_eq!(cart.key(), "cart-b");
        assert_eq!(store.get(DEFAULT_CART_KEY).unwrap(), None);
        assert_eq!(
            store.get("cart-b").unwrap().as_deref(),
            Some(r#"[{"id":3,"quantity":1}]"#)
        );
    }

    #[test]
    fn test_with_key_rejects_invalid_key() {
        let store = MemoryStore::new();
        for key in ["", "my cart", "../cart", "carts/a"] {
            assert!(
                matches!(
                    ShoppingCart::with_key(&store, key),
                    Err(StorageError::InvalidKey(_))
                ),
                "{key:?} should be rejected"
            );
        }
        assert!(store.get("my cart").unwrap().is_none());
    }
}
