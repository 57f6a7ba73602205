//! Sale line type
//!
//! Sale lines only live while a transaction file is being folded into the
//! aggregates; they are never stored.

use super::product::ProductCode;

/// One `productCode;quantity` line of a transaction file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLine {
    pub product: ProductCode,
    /// Units sold; negative quantities never make it into a SaleLine
    pub quantity: u64,
}
