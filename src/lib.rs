//! Sales Report Engine Library
//! # Overview
//!
//! This library reads flat `;`-separated files describing sellers, products and
//! per-seller sales, and produces two ranked reports: sellers by revenue and
//! products by units sold.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Seller, Product, SaleLine, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::catalog`] - Seller roster and product catalog loading
//!   - [`core::aggregator`] - Revenue and quantity aggregation over transaction files
//!   - [`core::report`] - Ranking aggregates into report rows
//! - [`io`] - Record reading and parsing, file discovery, report output
//! - [`pipeline`] - Orchestration of a complete run
//! - [`generator`] - Synthetic input files for testing
//!
//! # Input Files
//!
//! - `vendedores.txt`: `docType;docNumber;names;surnames`
//! - `productos.txt`: `code;name;price` (price with `.` or `,` decimal separator)
//! - `ventas_*.txt`: header `docType;docNumber`, then `productCode;quantity` lines
//!
//! # Error Model
//!
//! - Malformed lines are skipped with a warning
//! - Transaction files that are empty or name an unknown seller are skipped with a warning
//! - Missing or empty reference files, and runs without any usable sale, are fatal

// Module declarations
pub mod cli;
pub mod core;
pub mod generator;
pub mod io;
pub mod pipeline;
pub mod types;

pub use crate::core::{
    build_product_report, build_seller_report, ProductCatalog, SalesAggregates, SellerRoster,
    TransactionAggregator,
};
pub use io::{write_product_report, write_seller_report};
pub use types::{ErrorCategory, Product, SaleLine, SalesError, Seller, SellerKey, SkipReason};
