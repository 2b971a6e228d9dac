//! Seller Pro Core - Shared types library.
//!
//! This crate provides common types used across all Seller Pro components:
//! - `dashboard` - Seller dashboard (pages, insights, saved products)
//! - `gateway` - Marketplace API passthrough service
//! - `cli` - Command-line tools for the local product store
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, validated emails, product records and categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
