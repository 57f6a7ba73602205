//! Report serialization
//!
//! Writes the two output reports as `;`-separated text with a header row.
//! Monetary values are rendered with exactly two fractional digits and
//! quantities as plain integers.

use crate::core::report::{ProductReportRow, SellerReportRow};
use crate::io::record_format::FIELD_SEPARATOR;
use crate::types::SalesError;
use csv::{QuoteStyle, WriterBuilder};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io::Write;

/// Header of the seller revenue report
pub const SELLER_REPORT_HEADER: [&str; 2] = ["Vendedor", "Recaudacion"];

/// Header of the product quantity report
pub const PRODUCT_REPORT_HEADER: [&str; 3] = ["Producto", "Precio", "Cantidad_Vendida"];

#[derive(Serialize)]
struct SellerReportRecord<'a> {
    seller: &'a str,
    revenue: String,
}

#[derive(Serialize)]
struct ProductReportRecord<'a> {
    product: &'a str,
    price: String,
    quantity: u64,
}

/// Render a monetary value with two fractional digits
///
/// Midpoints round away from zero, so `1.235` becomes `1.24`.
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

fn report_writer(output: &mut dyn Write) -> csv::Writer<&mut dyn Write> {
    WriterBuilder::new()
        .delimiter(FIELD_SEPARATOR)
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(output)
}

/// Write the seller report: `Vendedor;Recaudacion` then one row per seller
///
/// Rows are written in the order given; sorting is the report builder's job.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(SalesError)` if a write error occurred
pub fn write_seller_report(
    rows: &[SellerReportRow],
    output: &mut dyn Write,
) -> Result<(), SalesError> {
    let mut writer = report_writer(output);
    writer.write_record(SELLER_REPORT_HEADER)?;

    for row in rows {
        writer.serialize(SellerReportRecord {
            seller: &row.full_name,
            revenue: format_money(row.revenue),
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the product report: `Producto;Precio;Cantidad_Vendida` then one row per product
pub fn write_product_report(
    rows: &[ProductReportRow],
    output: &mut dyn Write,
) -> Result<(), SalesError> {
    let mut writer = report_writer(output);
    writer.write_record(PRODUCT_REPORT_HEADER)?;

    for row in rows {
        writer.serialize(ProductReportRecord {
            product: &row.name,
            price: format_money(row.price),
            quantity: row.quantity,
        })?;
    }

    writer.flush()?;
    Ok(())
}
