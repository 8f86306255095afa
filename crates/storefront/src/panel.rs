//! Slide-out cart panel.
//!
//! Joins the cart lines against the catalog and renders them through an
//! Askama template. Lines whose product is missing from the catalog are not
//! shown and contribute nothing to the total.

use askama::Template;
use rust_decimal::Decimal;
use shopping_cart_core::{
    CartItems, CurrencyCode, Price, Product, format_currency, line_amount, saturating_sum,
};

use crate::cart::ShoppingCart;
use crate::catalog::Catalog;
use crate::storage::KeyValueStore;

/// Cart line display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl CartView {
    /// Build the view for `items` priced from `catalog`.
    #[must_use]
    pub fn build(items: &CartItems, catalog: &Catalog, currency: CurrencyCode) -> Self {
        Self {
            items: items
                .iter()
                .filter_map(|item| {
                    let product = catalog.find(item.id)?;
                    Some(CartItemView::new(product, item.quantity(), currency))
                })
                .collect(),
            total: format_currency(cart_total(items, catalog), currency),
            item_count: items.total_quantity(),
        }
    }
}

impl CartItemView {
    fn new(product: &Product, quantity: u32, currency: CurrencyCode) -> Self {
        let unit = Price::new(product.price, currency);
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            image_url: product.image_url.clone(),
            quantity,
            price: unit.display(),
            line_price: unit.times(quantity).display(),
        }
    }
}

/// Σ(unit price × quantity) over the cart; unknown products count as zero.
///
/// Saturates at the `Decimal` bounds rather than overflowing.
#[must_use]
pub fn cart_total(items: &CartItems, catalog: &Catalog) -> Decimal {
    let total = saturating_sum(items.iter().map(|item| {
        let unit = catalog
            .find(item.id)
            .map_or(Decimal::ZERO, |product| product.price);
        line_amount(unit, item.quantity())
    }));
    if total == Decimal::MAX || total == Decimal::MIN {
        tracing::warn!(lines = items.len(), "Cart total saturated");
    }
    total
}

/// Cart panel template.
#[derive(Template)]
#[template(path = "cart/panel.html")]
pub struct CartPanelTemplate<'a> {
    pub cart: &'a CartView,
}

/// Renders the cart panel for a catalog and currency.
#[derive(Debug, Clone, Copy)]
pub struct CartPanel<'a> {
    catalog: &'a Catalog,
    currency: CurrencyCode,
}

impl<'a> CartPanel<'a> {
    #[must_use]
    pub const fn new(catalog: &'a Catalog, currency: CurrencyCode) -> Self {
        Self { catalog, currency }
    }

    /// Render the panel HTML, or an empty string while the cart is closed.
    ///
    /// # Errors
    ///
    /// Returns `askama::Error` if the template fails to render.
    pub fn render<S: KeyValueStore>(&self, cart: &ShoppingCart<S>) -> askama::Result<String> {
        if !cart.is_open() {
            return Ok(String::new());
        }
        let view = self.view(cart.cart_items());
        CartPanelTemplate { cart: &view }.render()
    }

    /// Display data for `items`, regardless of visibility.
    #[must_use]
    pub fn view(&self, items: &CartItems) -> CartView {
        CartView::build(items, self.catalog, self.currency)
    }
}
