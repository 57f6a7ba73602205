//! Seller-related types
//!
//! A seller is identified by the pair (document type, document number). The
//! pair is rendered as `docType;docNumber`, which is also the header line of
//! every transaction file.

use std::fmt;

/// Composite seller identity: (document type, document number)
///
/// Ordering is lexicographic on document type, then document number. Reports
/// rely on this ordering to break ties between equal revenues.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SellerKey {
    /// Document type, e.g. `CC`, `CE`, `TI`, `PP`
    pub doc_type: String,
    /// Document number, kept as text so leading zeros survive
    pub doc_number: String,
}

impl SellerKey {
    pub fn new(doc_type: impl Into<String>, doc_number: impl Into<String>) -> Self {
        SellerKey {
            doc_type: doc_type.into(),
            doc_number: doc_number.into(),
        }
    }
}

impl fmt::Display for SellerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.doc_type, self.doc_number)
    }
}

/// Seller roster entry
///
/// Loaded once from the roster file and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seller {
    pub key: SellerKey,
    /// Given names (one or more, space separated)
    pub names: String,
    /// Family names (one or more, space separated)
    pub surnames: String,
}

impl Seller {
    /// Full display name: given names followed by family names
    pub fn full_name(&self) -> String {
        format!("{} {}", self.names, self.surnames)
    }
}
