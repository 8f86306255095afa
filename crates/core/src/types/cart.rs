//! Cart line items and the pure transforms over them.
//!
//! [`CartItems`] is an insertion-ordered list in which every product ID
//! appears at most once and every quantity is at least one. The zero case is
//! unrepresentable: quantities are [`NonZeroU32`], and an item whose quantity
//! would drop to zero is removed instead.
//!
//! Every transform borrows the list and returns a fresh one, leaving the
//! original untouched. Callers swap the whole list in one step.

use std::collections::HashSet;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;

/// One product line in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub quantity: NonZeroU32,
}

impl CartItem {
    /// A new line holding a single unit.
    #[must_use]
    pub const fn single(id: ProductId) -> Self {
        Self {
            id,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Quantity as a plain integer.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }
}

/// Errors raised when a raw item list violates the cart invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartItemsError {
    /// The same product appears on more than one line.
    #[error("Duplicate cart item: {0}")]
    DuplicateId(ProductId),
}

/// Validated, insertion-ordered cart contents.
///
/// Serializes as a plain JSON array of `{"id", "quantity"}` objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct CartItems(Vec<CartItem>);

impl CartItems {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[CartItem] {
        &self.0
    }

    /// Iterate over the lines in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.0.iter().find(|item| item.id == id)
    }

    /// Quantity held for `id`, or 0 when the product is not in the cart.
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.get(id).map_or(0, CartItem::quantity)
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.0.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Add one unit of `id`, appending a new line if it is not present yet.
    #[must_use]
    pub fn with_increased(&self, id: ProductId) -> Self {
        if self.get(id).is_none() {
            let mut items = self.0.clone();
            items.push(CartItem::single(id));
            return Self(items);
        }

        self.map_line(id, |item| CartItem {
            quantity: item.quantity.saturating_add(1),
            ..item
        })
    }

    /// Remove one unit of `id`, dropping the line when it reaches zero.
    ///
    /// Returns an identical list when `id` is not present.
    #[must_use]
    pub fn with_decreased(&self, id: ProductId) -> Self {
        let Some(item) = self.get(id) else {
            return self.clone();
        };

        match NonZeroU32::new(item.quantity() - 1) {
            Some(quantity) => self.map_line(id, |item| CartItem { quantity, ..item }),
            None => self.without(id),
        }
    }

    /// Drop the line for `id` regardless of its quantity.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Self {
        Self(self.0.iter().filter(|item| item.id != id).copied().collect())
    }

    fn map_line(&self, id: ProductId, f: impl Fn(CartItem) -> CartItem) -> Self {
        Self(
            self.0
                .iter()
                .map(|&item| if item.id == id { f(item) } else { item })
                .collect(),
        )
    }
}

impl TryFrom<Vec<CartItem>> for CartItems {
    type Error = CartItemsError;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CartItemsError::DuplicateId(item.id));
            }
        }
        Ok(Self(items))
    }
}

impl From<CartItems> for Vec<CartItem> {
    fn from(items: CartItems) -> Self {
        items.0
    }
}

impl<'a> IntoIterator for &'a CartItems {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
