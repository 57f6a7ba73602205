//! I/O module
//!
//! Handles delimited input parsing, transaction file discovery and report output.
//!
//! # Components
//!
//! - `record_reader` - Streaming reader over the non-blank records of a `;` file
//! - `record_format` - Record conversion (roster, catalog, sale lines, seller header)
//! - `discovery` - Directory listing filtered by the transaction file naming convention
//! - `report_format` - Report serialization and number formatting

pub mod discovery;
pub mod record_format;
pub mod record_reader;
pub mod report_format;

pub use discovery::discover_transaction_files;
pub use record_format::{
    parse_price, parse_product, parse_sale_line, parse_seller, parse_seller_header,
    FIELD_SEPARATOR,
};
pub use record_reader::{Record, RecordReader};
pub use report_format::{format_money, write_product_report, write_seller_report};
