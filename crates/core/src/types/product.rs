//! Catalog product entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A read-only catalog entry the cart joins against by ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the storefront currency.
    pub price: Decimal,
    #[serde(alias = "imgUrl")]
    pub image_url: String,
}
