//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `seller`: Seller roster entries and their composite key
//! - `product`: Product catalog entries
//! - `sale`: Transient sale lines read from transaction files
//! - `error`: Error and skip-reason types for the report engine

pub mod error;
pub mod product;
pub mod sale;
pub mod seller;

pub use error::{CatalogKind, ErrorCategory, SalesError, SkipReason};
pub use product::{Product, ProductCode};
pub use sale::SaleLine;
pub use seller::{Seller, SellerKey};
