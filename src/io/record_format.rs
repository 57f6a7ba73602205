//! Record conversion for roster, catalog and transaction lines
//!
//! This module turns already-split records into domain types. Every function
//! returns either the typed record or a [`SkipReason`] the caller logs before
//! moving on to the next line.
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Product, SaleLine, Seller, SellerKey, SkipReason};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Field separator shared by every input and output file
pub const FIELD_SEPARATOR: u8 = b';';

const SELLER_FIELDS: usize = 4;
const PRODUCT_FIELDS: usize = 3;
const SALE_FIELDS: usize = 2;
const HEADER_FIELDS: usize = 2;

fn require_fields(record: &StringRecord, expected: usize) -> Result<(), SkipReason> {
    if record.len() < expected {
        return Err(SkipReason::MissingFields {
            expected,
            found: record.len(),
        });
    }
    Ok(())
}

/// Like [`require_fields`], but an empty field counts as missing
fn require_non_empty_fields(record: &StringRecord, expected: usize) -> Result<(), SkipReason> {
    let found = record
        .iter()
        .take(expected)
        .filter(|field| !field.is_empty())
        .count();
    if found < expected {
        return Err(SkipReason::MissingFields { expected, found });
    }
    Ok(())
}

/// Convert a roster line `docType;docNumber;names;surnames` into a Seller
///
/// All four fields must be non-empty. Extra trailing fields are ignored.
pub fn parse_seller(record: &StringRecord) -> Result<Seller, SkipReason> {
    require_non_empty_fields(record, SELLER_FIELDS)?;

    Ok(Seller {
        key: SellerKey::new(&record[0], &record[1]),
        names: record[2].to_string(),
        surnames: record[3].to_string(),
    })
}

/// Parse a price written with either `.` or `,` as decimal separator
///
/// Returns `None` when the text is not a decimal number.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// Convert a catalog line `code;name;price` into a Product
///
/// # Returns
///
/// * `Ok(Product)` - Successfully converted record
/// * `Err(SkipReason::MissingFields)` - fewer than three fields
/// * `Err(SkipReason::InvalidPrice)` - price is not a decimal
/// * `Err(SkipReason::NegativePrice)` - price is below zero
pub fn parse_product(record: &StringRecord) -> Result<Product, SkipReason> {
    require_fields(record, PRODUCT_FIELDS)?;

    let code = &record[0];
    let raw_price = &record[2];
    let price = parse_price(raw_price).ok_or_else(|| SkipReason::InvalidPrice {
        code: code.to_string(),
        value: raw_price.to_string(),
    })?;

    if price < Decimal::ZERO {
        return Err(SkipReason::NegativePrice {
            code: code.to_string(),
            price,
        });
    }

    Ok(Product {
        code: code.to_string(),
        name: record[1].to_string(),
        price,
    })
}

/// Read the seller identity header of a transaction file
///
/// Returns `None` unless the line carries exactly two non-empty fields
/// (a trailing separator is tolerated); the caller reports that as an
/// unknown seller.
pub fn parse_seller_header(record: &StringRecord) -> Option<SellerKey> {
    if require_non_empty_fields(record, HEADER_FIELDS).is_err() {
        return None;
    }
    if record.iter().skip(HEADER_FIELDS).any(|field| !field.is_empty()) {
        return None;
    }
    Some(SellerKey::new(&record[0], &record[1]))
}

/// Convert a transaction line `productCode;quantity[;]` into a SaleLine
///
/// The product code is not checked against the catalog here; that happens
/// when the line is folded into the aggregates.
pub fn parse_sale_line(record: &StringRecord) -> Result<SaleLine, SkipReason> {
    require_fields(record, SALE_FIELDS)?;

    let product = &record[0];
    let raw_quantity = &record[1];
    let quantity: i64 = raw_quantity
        .parse()
        .map_err(|_| SkipReason::InvalidQuantity {
            product: product.to_string(),
            value: raw_quantity.to_string(),
        })?;

    let quantity = u64::try_from(quantity).map_err(|_| SkipReason::NegativeQuantity {
        product: product.to_string(),
        quantity,
    })?;

    Ok(SaleLine {
        product: product.to_string(),
        quantity,
    })
}
