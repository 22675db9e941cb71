//! Tech Nexus Storefront library.
//!
//! Client-side logic of the Tech Nexus storefront. All persistence, auth and
//! query execution are delegated to a hosted backend reached through narrow
//! trait seams; this crate contains no server and no database engine.
//!
//! The one component with real state is the [`cart::CartStore`]: a persisted
//! collection of line items with stock-aware quantity reconciliation. Its
//! collaborators are:
//!
//! - [`catalog::ProductCatalog`] - product lookups (network-backed)
//! - [`storage::KeyValueStore`] - the per-browser persisted blob store
//! - [`notify::Notifier`] - fire-and-forget user-visible toasts
//! - [`view::CartPageView`] - cart page re-render and badge refresh signals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod notify;
pub mod storage;
pub mod view;

pub use cart::{CartStore, LineItem};
pub use catalog::{CatalogError, ProductCatalog};
pub use notify::{Notifier, NotifyLevel};
pub use storage::{KeyValueStore, StorageError};
pub use view::CartPageView;
