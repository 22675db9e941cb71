//! Shared helpers for Tech Nexus integration tests.
//!
//! The storefront crate ships in-memory collaborators (`MemoryStore`,
//! `MemoryCatalog`, `RecordingNotifier`); this crate adds the fixtures and
//! the view double the scenario tests need.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tech_nexus_core::{Price, ProductRecord};
use tech_nexus_storefront::{LineItem, view::CartPageView};

/// Parse a decimal price literal.
///
/// # Panics
///
/// Panics if `s` is not a valid decimal.
#[must_use]
pub fn price(s: &str) -> Price {
    s.parse().expect("valid decimal literal")
}

/// A small stocked product fixture.
#[must_use]
pub fn stocked_product(id: i64, name: &str, unit_price: &str, stock: u32) -> ProductRecord {
    ProductRecord::new(id, name, price(unit_price)).with_stock(stock)
}

/// View double that records render and badge signals.
#[derive(Debug, Default)]
pub struct TrackingView {
    active: AtomicBool,
    renders: Mutex<Vec<Vec<LineItem>>>,
    badge_counts: Mutex<Vec<u64>>,
}

impl TrackingView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate navigating onto or off the cart page.
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    /// Snapshots passed to `render_cart`, in order.
    #[must_use]
    pub fn renders(&self) -> Vec<Vec<LineItem>> {
        self.renders
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Badge counts received, in order.
    #[must_use]
    pub fn badge_counts(&self) -> Vec<u64> {
        self.badge_counts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl CartPageView for TrackingView {
    fn is_cart_page_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn render_cart(&self, items: &[LineItem]) {
        self.renders
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(items.to_vec());
    }

    fn update_badge(&self, unit_count: u64) {
        self.badge_counts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(unit_count);
    }
}
