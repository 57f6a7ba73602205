//! Core business logic module
//!
//! This module contains the aggregation pipeline components:
//! - `catalog` - Seller roster and product catalog loading
//! - `aggregator` - Folding transaction files into revenue and quantity aggregates
//! - `report` - Ranking aggregates into report rows

pub mod aggregator;
pub mod catalog;
pub mod report;

pub use aggregator::{AggregationSummary, SalesAggregates, TransactionAggregator};
pub use catalog::{load_products, load_sellers, ProductCatalog, SellerRoster};
pub use report::{build_product_report, build_seller_report, ProductReportRow, SellerReportRow};
