//! Domain models for the dashboard.
//!
//! - [`catalog`] - Rows of the local product store
//! - [`session`] - Per-visit UI state kept in the session

pub mod catalog;
pub mod session;

pub use catalog::{CatalogProduct, NewCatalogProduct};
pub use session::{CurrentSeller, DashboardSession, Page, Workspace, session_keys};
