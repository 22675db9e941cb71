//! Cart line items and the persisted wire format.

use serde::{Deserialize, Serialize};

use tech_nexus_core::{CategoryId, Price, ProductId, ProductRecord};

/// One entry in the cart: a product and its requested quantity.
///
/// Product fields are copied at add-time and are not refreshed afterwards;
/// anything that must be current (stock, price changes) is looked up fresh
/// from the catalog by whoever needs it. The `id` is always the canonical
/// string form of the product identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price at add-time. Totals are computed without rounding;
    /// monetary formatting is a presentation concern.
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    /// Stock figure seen at add-time. Advisory only; quantity edits
    /// re-check the catalog instead of trusting this copy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    pub quantity: u32,
}

impl LineItem {
    /// Copy a catalog record into a new line item.
    #[must_use]
    pub fn from_product(product: &ProductRecord, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            img: product.img.clone(),
            stock: product.stock,
            brand: product.brand.clone(),
            category: product.category.clone(),
            quantity,
        }
    }

    /// Line total: unit price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.quantity
    }
}

/// Decode a persisted cart blob.
///
/// Any structurally invalid value (non-JSON, a JSON object where a list is
/// expected, wrong field shapes) is treated identically to "absent":
/// corruption never propagates as an error, only as a silent reset to the
/// empty cart.
#[must_use]
pub(crate) fn decode_cart(raw: &str) -> Vec<LineItem> {
    match serde_json::from_str::<Vec<LineItem>>(raw) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!("Discarding unreadable persisted cart: {err}");
            Vec::new()
        }
    }
}
