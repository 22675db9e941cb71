//! Catalog product records.
//!
//! A `ProductRecord` is what the backend catalog returns for a product
//! lookup. The cart copies a subset of these fields into its line items at
//! add-time; everything else is looked up fresh from the catalog at render
//! time.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};
use super::price::Price;

/// A product as returned by the catalog.
///
/// `stock`, when present, is the authoritative stock count at the moment of
/// the lookup. A missing `stock` means the product carries no stock
/// constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the store currency. No rounding is applied at this
    /// layer; display formatting is a presentation concern.
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
}

impl ProductRecord {
    /// Create a record with just the required fields.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            img: None,
            stock: None,
            brand: None,
            category: None,
        }
    }

    /// Set the authoritative stock count.
    #[must_use]
    pub const fn with_stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Set the product image URL.
    #[must_use]
    pub fn with_img(mut self, img: impl Into<String>) -> Self {
        self.img = Some(img.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_with_numeric_id_and_missing_optionals() {
        let record: ProductRecord =
            serde_json::from_str(r#"{"id": 7, "name": "Mechanical Keyboard", "price": "349.90"}"#)
                .unwrap();
        assert_eq!(record.id, ProductId::from("7"));
        assert_eq!(record.stock, None);
        assert_eq!(record.img, None);
    }
}
