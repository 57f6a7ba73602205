//! Report building
//!
//! Ranks the aggregates and joins them with the reference tables. Rows are
//! sorted by value, descending; equal values keep key order (seller key, then
//! product code) because the aggregates are ordered maps and the sort is stable.

use crate::core::catalog::{ProductCatalog, SellerRoster};
use crate::types::{ProductCode, SellerKey};
use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// One row of the seller revenue report
#[derive(Debug, Clone, PartialEq)]
pub struct SellerReportRow {
    pub full_name: String,
    pub revenue: Decimal,
}

/// One row of the product quantity report
#[derive(Debug, Clone, PartialEq)]
pub struct ProductReportRow {
    pub name: String,
    pub price: Decimal,
    pub quantity: u64,
}

/// Sellers ranked by revenue, highest first
///
/// Keys missing from the roster are left out of the report.
pub fn build_seller_report(
    revenue: &BTreeMap<SellerKey, Decimal>,
    sellers: &SellerRoster,
) -> Vec<SellerReportRow> {
    let mut ranked: Vec<(&SellerKey, Decimal)> =
        revenue.iter().map(|(key, value)| (key, *value)).collect();
    ranked.sort_by_key(|&(_, value)| Reverse(value));

    ranked
        .into_iter()
        .filter_map(|(key, revenue)| {
            sellers.get(key).map(|seller| SellerReportRow {
                full_name: seller.full_name(),
                revenue,
            })
        })
        .collect()
}

/// Products ranked by units sold, highest first
///
/// Codes missing from the catalog are left out of the report.
pub fn build_product_report(
    quantities: &BTreeMap<ProductCode, u64>,
    products: &ProductCatalog,
) -> Vec<ProductReportRow> {
    let mut ranked: Vec<(&ProductCode, u64)> =
        quantities.iter().map(|(code, sold)| (code, *sold)).collect();
    ranked.sort_by_key(|&(_, sold)| Reverse(sold));

    ranked
        .into_iter()
        .filter_map(|(code, quantity)| {
            products.get(code).map(|product| ProductReportRow {
                name: product.name.clone(),
                price: product.price,
                quantity,
            })
        })
        .collect()
}
