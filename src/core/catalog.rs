//! Reference data loading
//!
//! This module provides the [`SellerRoster`] and [`ProductCatalog`] lookup
//! tables, loaded once from `vendedores.txt` and `productos.txt` and read-only
//! afterwards.
//!
//! Loading is line tolerant: a malformed line is logged and skipped. Loading
//! fails only when the file is missing, unreadable, or yields no entry at all.

use crate::io::record_format::{parse_product, parse_seller};
use crate::io::record_reader::RecordReader;
use crate::types::{CatalogKind, Product, ProductCode, SalesError, Seller, SellerKey, SkipReason};
use csv::StringRecord;
use log::warn;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Fold every record of `reader` into a keyed table
///
/// Later duplicates replace earlier ones. An empty result is reported as
/// `EmptyCatalog` carrying the number of rejected lines.
fn load_table<R, K, T>(
    reader: RecordReader<R>,
    source: &str,
    kind: CatalogKind,
    parse: fn(&StringRecord) -> Result<T, SkipReason>,
    key_of: fn(&T) -> K,
) -> Result<BTreeMap<K, T>, SalesError>
where
    R: Read,
    K: Ord + std::fmt::Display,
{
    let mut table = BTreeMap::new();
    let mut rejected = 0;

    for result in reader {
        let record = match result {
            Ok(record) => record,
            Err(e @ SalesError::ParseError { .. }) => {
                warn!("Skipping unreadable line in {} {}: {}", kind, source, e);
                rejected += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        match parse(&record.fields) {
            Ok(entry) => {
                let key = key_of(&entry);
                if table.contains_key(&key) {
                    warn!(
                        "Duplicate entry {} at line {} of {}; keeping the later one",
                        key, record.line, source
                    );
                }
                table.insert(key, entry);
            }
            Err(reason) => {
                warn!(
                    "Skipping line {} of {} {}: {}",
                    record.line, kind, source, reason
                );
                rejected += 1;
            }
        }
    }

    if table.is_empty() {
        return Err(SalesError::empty_catalog(kind, source, rejected));
    }

    Ok(table)
}

/// Seller roster keyed by (document type, document number)
#[derive(Debug, Clone, PartialEq)]
pub struct SellerRoster {
    sellers: BTreeMap<SellerKey, Seller>,
}

impl SellerRoster {
    /// Load the roster from `path`
    ///
    /// # Errors
    ///
    /// * `SalesError::FileNotFound` if the file does not exist
    /// * `SalesError::EmptyCatalog` if no line produced a seller
    pub fn load(path: &Path) -> Result<Self, SalesError> {
        let reader = RecordReader::open(path)?;
        Self::from_records(reader, &path.display().to_string())
    }

    /// Load the roster from any byte source; `source` names it in log messages
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self, SalesError> {
        Self::from_records(RecordReader::from_reader(reader), source)
    }

    fn from_records<R: Read>(reader: RecordReader<R>, source: &str) -> Result<Self, SalesError> {
        let sellers = load_table(
            reader,
            source,
            CatalogKind::Sellers,
            parse_seller,
            |s: &Seller| s.key.clone(),
        )?;
        Ok(SellerRoster { sellers })
    }

    pub fn get(&self, key: &SellerKey) -> Option<&Seller> {
        self.sellers.get(key)
    }

    pub fn contains(&self, key: &SellerKey) -> bool {
        self.sellers.contains_key(key)
    }

    /// Sellers in key order
    pub fn iter(&self) -> impl Iterator<Item = &Seller> {
        self.sellers.values()
    }

    pub fn len(&self) -> usize {
        self.sellers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sellers.is_empty()
    }
}

/// Product catalog keyed by product code
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCatalog {
    products: BTreeMap<ProductCode, Product>,
}

impl ProductCatalog {
    /// Load the catalog from `path`
    ///
    /// # Errors
    ///
    /// * `SalesError::FileNotFound` if the file does not exist
    /// * `SalesError::EmptyCatalog` if no line produced a product
    pub fn load(path: &Path) -> Result<Self, SalesError> {
        let reader = RecordReader::open(path)?;
        Self::from_records(reader, &path.display().to_string())
    }

    /// Load the catalog from any byte source; `source` names it in log messages
    pub fn from_reader<R: Read>(reader: R, source: &str) -> Result<Self, SalesError> {
        Self::from_records(RecordReader::from_reader(reader), source)
    }

    fn from_records<R: Read>(reader: RecordReader<R>, source: &str) -> Result<Self, SalesError> {
        let products = load_table(
            reader,
            source,
            CatalogKind::Products,
            parse_product,
            |p: &Product| p.code.clone(),
        )?;
        Ok(ProductCatalog { products })
    }

    pub fn get(&self, code: &str) -> Option<&Product> {
        self.products.get(code)
    }

    /// Products in code order
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Load the seller roster from `path`
pub fn load_sellers(path: &Path) -> Result<SellerRoster, SalesError> {
    SellerRoster::load(path)
}

/// Load the product catalog from `path`
pub fn load_products(path: &Path) -> Result<ProductCatalog, SalesError> {
    ProductCatalog::load(path)
}
