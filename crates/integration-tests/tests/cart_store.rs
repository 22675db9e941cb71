//! End-to-end cart store scenarios against in-memory collaborators.
//!
//! These exercise the cart the way the storefront pages do: adds from the
//! product page, quantity edits from the cart page, removals, and the
//! badge/render signals the UI consumes.

use std::sync::Arc;

use tech_nexus_core::ProductId;
use tech_nexus_integration_tests::{TrackingView, price, stocked_product};
use tech_nexus_storefront::catalog::MemoryCatalog;
use tech_nexus_storefront::notify::{NotifyLevel, RecordingNotifier};
use tech_nexus_storefront::storage::MemoryStore;
use tech_nexus_storefront::{CartStore, ProductCatalog as _};

struct Harness {
    cart: CartStore,
    catalog: Arc<MemoryCatalog>,
    notifier: Arc<RecordingNotifier>,
    view: Arc<TrackingView>,
}

fn harness(products: Vec<tech_nexus_core::ProductRecord>) -> Harness {
    let catalog = Arc::new(MemoryCatalog::new(products));
    let notifier = Arc::new(RecordingNotifier::new());
    let view = Arc::new(TrackingView::new());
    let cart = CartStore::builder(Arc::new(MemoryStore::new()))
        .catalog(catalog.clone())
        .notifier(notifier.clone())
        .view(view.clone())
        .build();
    Harness {
        cart,
        catalog,
        notifier,
        view,
    }
}

#[tokio::test]
async fn product_page_add_then_cart_page_edit() {
    let h = harness(vec![stocked_product(1, "Ultrawide Monitor", "1899.00", 10)]);

    h.cart
        .add_to_cart(&stocked_product(1, "Ultrawide Monitor", "1899.00", 10), 1);
    assert_eq!(h.notifier.last().unwrap().1, NotifyLevel::Success);

    h.view.set_active(true);
    h.cart.update_quantity(1i64, 4).await;

    assert_eq!(h.cart.cart_item_count(), 4);
    assert_eq!(h.cart.cart_total(), price("7596.00"));
    // The in-bounds edit re-rendered the active cart page.
    let renders = h.view.renders();
    assert_eq!(renders.last().unwrap()[0].quantity, 4);
}

#[tokio::test]
async fn stock_shrink_between_add_and_edit_clamps() {
    let h = harness(vec![stocked_product(1, "Ultrawide Monitor", "1899.00", 10)]);
    h.cart
        .add_to_cart(&stocked_product(1, "Ultrawide Monitor", "1899.00", 10), 3);

    // Someone else bought most of the stock.
    h.catalog.set_stock(&ProductId::from("1"), 2);
    h.cart.update_quantity(1i64, 10).await;

    assert_eq!(h.cart.cart()[0].quantity, 2);
    let (message, level) = h.notifier.last().unwrap();
    assert_eq!(level, NotifyLevel::Error);
    assert!(message.contains("quantity adjusted"), "got: {message}");
}

#[tokio::test]
async fn sold_out_product_is_dropped_on_edit() {
    let h = harness(vec![stocked_product(1, "Ultrawide Monitor", "1899.00", 10)]);
    h.cart
        .add_to_cart(&stocked_product(1, "Ultrawide Monitor", "1899.00", 10), 3);

    h.catalog.set_stock(&ProductId::from("1"), 0);
    h.cart.update_quantity(1i64, 5).await;

    assert!(h.cart.cart().is_empty());
    // The user is told why the item disappeared, not just that it did.
    let (message, level) = h.notifier.last().unwrap();
    assert_eq!(level, NotifyLevel::Error);
    assert!(
        message.contains("Ultrawide Monitor is sold out"),
        "got: {message}"
    );
}

#[test]
fn badge_refreshes_on_every_persist_regardless_of_page() {
    let h = harness(Vec::new());
    // Not on the cart page.
    h.view.set_active(false);

    h.cart.add_to_cart(&stocked_product(1, "Mouse", "59.90", 9), 2);
    h.cart.add_to_cart(&stocked_product(2, "Mousepad", "19.90", 9), 1);
    h.cart.remove_from_cart(2i64);
    h.cart.clear_cart();

    assert_eq!(h.view.badge_counts(), vec![2, 3, 2, 0]);
    // Off the cart page, removal still notified but never rendered.
    assert!(h.view.renders().is_empty());
}

#[test]
fn rejection_reports_the_three_stock_cases() {
    let h = harness(Vec::new());
    let product = stocked_product(1, "Headset", "149.90", 5);

    // (a) not in cart, more than stock requested
    h.cart.add_to_cart(&product, 6);
    assert!(h.notifier.last().unwrap().0.contains("Only 5 unit(s)"));
    assert!(h.cart.cart().is_empty());

    // (b) partially in cart, room for fewer than requested
    h.cart.add_to_cart(&product, 4);
    h.cart.add_to_cart(&product, 3);
    assert!(h.notifier.last().unwrap().0.contains("1 more unit(s)"));
    assert_eq!(h.cart.cart()[0].quantity, 4);

    // (c) at the ceiling
    h.cart.add_to_cart(&product, 1);
    h.cart.add_to_cart(&product, 1);
    assert!(
        h.notifier
            .last()
            .unwrap()
            .0
            .contains("maximum available quantity")
    );
    assert_eq!(h.cart.cart()[0].quantity, 5);
}

#[tokio::test]
async fn catalog_lookup_of_missing_product_fails_open() {
    // Catalog no longer knows the product: no stock figure, no clamp.
    let h = harness(Vec::new());
    h.cart.add_to_cart(&stocked_product(1, "Headset", "149.90", 5), 2);

    h.cart.update_quantity(1i64, 50).await;
    assert_eq!(h.cart.cart()[0].quantity, 50);
}

#[tokio::test]
async fn memory_catalog_returns_none_for_unknown_ids() {
    let h = harness(vec![stocked_product(1, "Headset", "149.90", 5)]);
    let found = h
        .catalog
        .fetch_product_by_id(&ProductId::from("999"))
        .await
        .unwrap();
    assert!(found.is_none());
}

#[test]
fn insertion_order_is_preserved() {
    let h = harness(Vec::new());
    for (id, name) in [(3i64, "C"), (1, "A"), (2, "B")] {
        h.cart.add_to_cart(&stocked_product(id, name, "10.00", 9), 1);
    }
    let names: Vec<_> = h.cart.cart().into_iter().map(|i| i.name).collect();
    assert_eq!(names, ["C", "A", "B"]);
}
