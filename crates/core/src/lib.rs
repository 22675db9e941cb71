//! Tech Nexus Core - Shared types library.
//!
//! This crate provides common types used across all Tech Nexus components:
//! - `storefront` - Client-side storefront logic (cart, catalog seams)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! network clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - String-normalized IDs and catalog record types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
