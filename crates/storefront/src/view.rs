//! Cart view signalling seam.
//!
//! The cart store does not own any rendering; it only signals the active
//! view that state changed. Two signals exist: the badge count (refreshed on
//! every persist, whatever page is showing) and the cart page itself
//! (re-rendered only when that page is active).

use crate::cart::LineItem;

/// Render signals consumed by whatever is presenting the cart.
pub trait CartPageView: Send + Sync {
    /// Whether the cart page is the active view.
    fn is_cart_page_active(&self) -> bool;

    /// Re-render the cart page from the given snapshot.
    fn render_cart(&self, items: &[LineItem]);

    /// Refresh the cart badge with the total unit count.
    fn update_badge(&self, unit_count: u64);
}

/// View that is never active and ignores every signal.
#[derive(Debug, Default)]
pub struct NoopView;

impl CartPageView for NoopView {
    fn is_cart_page_active(&self) -> bool {
        false
    }

    fn render_cart(&self, _items: &[LineItem]) {}

    fn update_badge(&self, _unit_count: u64) {}
}
