//! Product catalog types

use rust_decimal::Decimal;

/// Product identifier, e.g. `PROD001`
pub type ProductCode = String;

/// Product catalog entry
///
/// The unit price is always non-negative; the loader rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub code: ProductCode,
    /// Display name used in the product report
    pub name: String,
    /// Unit price as read from the catalog (exact decimal)
    pub price: Decimal,
}
