//! The cart store.
//!
//! An in-memory + persisted collection of line items, keyed by the
//! string-normalized product identifier and re-serialized in full to the
//! persisted store on every mutation. Exactly one store exists per page
//! lifetime: [`CartStore`] is a cheap clonable handle over shared state, and
//! event handlers receive clones of the same instance rather than
//! constructing their own (two independent copies of the same persisted key
//! would silently lose writes from whichever copy is discarded).
//!
//! # Consistency
//!
//! All operations run on the UI thread in response to discrete user actions.
//! [`CartStore::update_quantity`] is the only suspending operation (it
//! awaits a catalog round-trip to re-check stock); the state lock is not
//! held across that await, so a concurrent operation interleaving with it is
//! possible and last-write-wins on persistence is the accepted model. No
//! multi-tab reconciliation is attempted.

mod line_item;

pub use line_item::LineItem;

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, instrument, warn};

use tech_nexus_core::{Price, ProductId, ProductRecord};

use crate::catalog::ProductCatalog;
use crate::notify::{Notifier, NoopNotifier, NotifyLevel};
use crate::storage::{CART_STORAGE_KEY, KeyValueStore};
use crate::view::{CartPageView, NoopView};

/// The shopping cart store.
///
/// Construct once via [`CartStore::builder`] and clone the handle wherever
/// it is needed; all clones share the same state. Mutation goes exclusively
/// through the named operations, and every mutation persists the whole
/// state immediately.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    items: Mutex<Vec<LineItem>>,
    storage: Arc<dyn KeyValueStore>,
    storage_key: String,
    catalog: Option<Arc<dyn ProductCatalog>>,
    notifier: Arc<dyn Notifier>,
    view: Arc<dyn CartPageView>,
}

/// Builder for [`CartStore`].
///
/// The persisted store is required; the catalog, notifier and view
/// collaborators are optional (no catalog means quantity edits skip the
/// stock re-check, the default notifier and view discard every signal).
#[must_use]
pub struct CartStoreBuilder {
    storage: Arc<dyn KeyValueStore>,
    storage_key: String,
    catalog: Option<Arc<dyn ProductCatalog>>,
    notifier: Arc<dyn Notifier>,
    view: Arc<dyn CartPageView>,
}

impl CartStoreBuilder {
    /// Use a storage key other than [`CART_STORAGE_KEY`].
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Attach the product catalog used for stock re-checks.
    pub fn catalog(mut self, catalog: Arc<dyn ProductCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Attach the user-visible notification sink.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Attach the cart view signal consumer.
    pub fn view(mut self, view: Arc<dyn CartPageView>) -> Self {
        self.view = view;
        self
    }

    /// Load the persisted state and construct the store.
    ///
    /// A missing or structurally invalid persisted value initializes the
    /// cart to empty; corruption never propagates as an error.
    #[must_use]
    pub fn build(self) -> CartStore {
        let items = match self.storage.get(&self.storage_key) {
            Ok(Some(raw)) => line_item::decode_cart(&raw),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("Failed to read persisted cart, starting empty: {err}");
                Vec::new()
            }
        };
        debug!(item_count = items.len(), "Cart loaded");

        CartStore {
            inner: Arc::new(CartStoreInner {
                items: Mutex::new(items),
                storage: self.storage,
                storage_key: self.storage_key,
                catalog: self.catalog,
                notifier: self.notifier,
                view: self.view,
            }),
        }
    }
}

impl CartStore {
    /// Start building a store over the given persisted key-value store.
    pub fn builder(storage: Arc<dyn KeyValueStore>) -> CartStoreBuilder {
        CartStoreBuilder {
            storage,
            storage_key: CART_STORAGE_KEY.to_owned(),
            catalog: None,
            notifier: Arc::new(NoopNotifier),
            view: Arc::new(NoopView),
        }
    }

    /// Add `quantity` units of a product to the cart.
    ///
    /// Quantity accumulates into the existing line item for the same
    /// product, if any. When the record carries a stock figure, an addition
    /// that would push the cart past it is rejected whole (no partial add)
    /// and reported through the notifier. This operation never fails from
    /// the caller's perspective.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&self, product: &ProductRecord, quantity: u32) {
        if quantity == 0 {
            debug!("Ignoring add of zero units");
            return;
        }

        let snapshot = {
            let mut items = self.lock_items();
            let current_quantity = items
                .iter()
                .find(|item| item.id == product.id)
                .map_or(0, |item| item.quantity);
            // A total past u32::MAX can never be satisfied; reject it the
            // same way an over-stock request is rejected instead of
            // wrapping into an invalid quantity.
            let Some(requested_total) = current_quantity.checked_add(quantity) else {
                drop(items);
                self.inner.notifier.notify(
                    &format!("Cannot add that many units of {}.", product.name),
                    NotifyLevel::Error,
                );
                return;
            };

            if let Some(stock) = product.stock {
                if requested_total > stock {
                    let message = stock_rejection_message(product, current_quantity, stock);
                    drop(items);
                    self.inner.notifier.notify(&message, NotifyLevel::Error);
                    return;
                }
            }

            match items.iter_mut().find(|item| item.id == product.id) {
                Some(existing) => existing.quantity = requested_total,
                None => items.push(LineItem::from_product(product, quantity)),
            }
            items.clone()
        };

        self.persist(&snapshot);
        self.inner.notifier.notify(
            &format!("{} added to cart.", product.name),
            NotifyLevel::Success,
        );
    }

    /// Remove a product from the cart.
    ///
    /// Removing an id that is not present is a no-op that still persists
    /// and still notifies (idempotent delete).
    #[instrument(skip(self, product_id))]
    pub fn remove_from_cart(&self, product_id: impl Into<ProductId>) {
        let product_id = product_id.into();
        let snapshot = {
            let mut items = self.lock_items();
            items.retain(|item| item.id != product_id);
            items.clone()
        };

        self.persist(&snapshot);
        self.inner
            .notifier
            .notify("Item removed from cart.", NotifyLevel::Success);
        if self.inner.view.is_cart_page_active() {
            self.inner.view.render_cart(&snapshot);
        }
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// A quantity of zero removes the item. Otherwise the catalog is asked
    /// for the authoritative stock figure and the request is clamped down
    /// to it when it exceeds it; the correction still persists and is
    /// reported through the notifier. Without a resolvable stock figure
    /// (catalog absent, unreachable, or the product gone) the requested
    /// quantity is accepted as-is.
    ///
    /// The state lock is released for the duration of the catalog
    /// round-trip; see the module docs for the consistency model.
    #[instrument(skip(self, product_id))]
    pub async fn update_quantity(&self, product_id: impl Into<ProductId> + Send, quantity: u32) {
        let product_id = product_id.into();

        if !self.contains(&product_id) {
            return;
        }
        if quantity == 0 {
            self.remove_from_cart(product_id);
            return;
        }

        let stock = self.fetch_stock(&product_id).await;

        if let Some(stock) = stock {
            if quantity > stock {
                if stock == 0 {
                    // Sold out since the item was added: quantity zero
                    // means remove, but the correction is still reported.
                    let (snapshot, name) = {
                        let mut items = self.lock_items();
                        let Some(index) =
                            items.iter().position(|item| item.id == product_id)
                        else {
                            return;
                        };
                        let removed = items.remove(index);
                        (items.clone(), removed.name)
                    };
                    self.persist(&snapshot);
                    self.inner.notifier.notify(
                        &format!("{name} is sold out and was removed from the cart."),
                        NotifyLevel::Error,
                    );
                    if self.inner.view.is_cart_page_active() {
                        self.inner.view.render_cart(&snapshot);
                    }
                    return;
                }
                let snapshot = {
                    let mut items = self.lock_items();
                    let Some(item) = items.iter_mut().find(|item| item.id == product_id) else {
                        // Removed while the stock check was in flight.
                        return;
                    };
                    item.quantity = stock;
                    items.clone()
                };
                self.persist(&snapshot);
                self.inner.notifier.notify(
                    &format!("Only {stock} unit(s) available; quantity adjusted."),
                    NotifyLevel::Error,
                );
                return;
            }
        }

        let snapshot = {
            let mut items = self.lock_items();
            let Some(item) = items.iter_mut().find(|item| item.id == product_id) else {
                return;
            };
            item.quantity = quantity;
            items.clone()
        };
        self.persist(&snapshot);
        if self.inner.view.is_cart_page_active() {
            self.inner.view.render_cart(&snapshot);
        }
    }

    /// Snapshot of the current line items, in insertion order.
    ///
    /// The snapshot is detached: mutating it does not affect the cart. All
    /// mutation goes through the named operations.
    #[must_use]
    pub fn cart(&self) -> Vec<LineItem> {
        self.lock_items().clone()
    }

    /// Sum of `price * quantity` over all items, unrounded.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.lock_items().iter().map(LineItem::line_total).sum()
    }

    /// Total units across all items (the badge figure), as opposed to the
    /// number of distinct line items.
    #[must_use]
    pub fn cart_item_count(&self) -> u64 {
        unit_count(&self.lock_items())
    }

    /// Empty the cart and persist the empty state.
    #[instrument(skip(self))]
    pub fn clear_cart(&self) {
        let snapshot = {
            let mut items = self.lock_items();
            items.clear();
            items.clone()
        };
        self.persist(&snapshot);
    }

    fn contains(&self, product_id: &ProductId) -> bool {
        self.lock_items().iter().any(|item| &item.id == product_id)
    }

    /// Authoritative stock for a product, or `None` when no figure is
    /// resolvable (fail open on the stock constraint).
    async fn fetch_stock(&self, product_id: &ProductId) -> Option<u32> {
        let catalog = self.inner.catalog.as_ref()?;
        match catalog.fetch_product_by_id(product_id).await {
            Ok(Some(product)) => product.stock,
            Ok(None) => None,
            Err(err) => {
                warn!("Stock re-check failed, accepting requested quantity: {err}");
                None
            }
        }
    }

    /// Re-serialize the whole state to the persisted store and refresh the
    /// badge. Persistence failures degrade to a log line; the in-memory
    /// state is already updated.
    fn persist(&self, items: &[LineItem]) {
        match serde_json::to_string(items) {
            Ok(raw) => {
                if let Err(err) = self.inner.storage.set(&self.inner.storage_key, &raw) {
                    warn!("Failed to persist cart: {err}");
                }
            }
            Err(err) => warn!("Failed to serialize cart: {err}"),
        }
        self.inner.view.update_badge(unit_count(items));
    }

    fn lock_items(&self) -> std::sync::MutexGuard<'_, Vec<LineItem>> {
        self.inner
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn unit_count(items: &[LineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Message for a rejected add, distinguishing the three stock cases: the
/// item is not in the cart yet, there is still room for a smaller addition,
/// or the cart already sits at the stock ceiling.
fn stock_rejection_message(product: &ProductRecord, current_quantity: u32, stock: u32) -> String {
    if current_quantity == 0 {
        format!("Only {stock} unit(s) of {} are available.", product.name)
    } else if current_quantity < stock {
        let room = stock - current_quantity;
        format!("Only {room} more unit(s) of {} can be added.", product.name)
    } else {
        format!(
            "{} is already at the maximum available quantity.",
            product.name
        )
    }
}
