//! Report pipeline orchestration
//!
//! This module sequences a complete run:
//! 1. Load the seller roster
//! 2. Load the product catalog
//! 3. Discover and aggregate the transaction files
//! 4. Write the seller revenue report
//! 5. Write the product quantity report
//!
//! The run owns every table and aggregate it builds and passes them along
//! explicitly; nothing is kept in global state.
//!
//! # Error Handling
//!
//! Fatal errors stop the run at the failing step and are returned to the
//! caller. Reports are written only once aggregation has succeeded; the two
//! reports are independent, so a failure writing the product report leaves an
//! already written seller report in place.

mod config;

pub use config::{
    PipelineConfig, PRODUCTS_FILE, PRODUCT_REPORT_FILE, SELLERS_FILE, SELLER_REPORT_FILE,
    TRANSACTION_PREFIX, TRANSACTION_SUFFIX,
};

use crate::core::{
    build_product_report, build_seller_report, load_products, load_sellers,
    TransactionAggregator,
};
use crate::io::{discover_transaction_files, write_product_report, write_seller_report};
use crate::types::SalesError;
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// What a successful run loaded, processed and produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    pub sellers_loaded: usize,
    pub products_loaded: usize,
    /// Transaction files that recorded at least one sale
    pub files_processed: usize,
    /// Transaction files rejected as a whole
    pub files_skipped: usize,
    /// All transaction files found
    pub files_total: usize,
    pub seller_report: PathBuf,
    pub product_report: PathBuf,
}

/// Create `path` and hand a buffered writer to `write`
fn write_report_file<F>(path: &Path, write: F) -> Result<(), SalesError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), SalesError>,
{
    let file = File::create(path).map_err(|e| SalesError::IoError {
        message: format!("Failed to create '{}': {}", path.display(), e),
    })?;
    let mut output = BufWriter::new(file);
    write(&mut output)?;
    output.flush()?;
    Ok(())
}

/// Run the full load → aggregate → report pipeline
///
/// # Returns
///
/// * `Ok(PipelineSummary)` if both reports were written
/// * `Err(SalesError)` on the first fatal error
///
/// # Examples
///
/// ```no_run
/// use sales_report_engine::pipeline::{self, PipelineConfig};
///
/// match pipeline::run(&PipelineConfig::default()) {
///     Ok(summary) => println!("Wrote {}", summary.seller_report.display()),
///     Err(e) => eprintln!("Fatal error ({}): {}", e.category(), e),
/// }
/// ```
pub fn run(config: &PipelineConfig) -> Result<PipelineSummary, SalesError> {
    let sellers = load_sellers(&config.sellers_path())?;
    info!(
        "Seller roster loaded: {} seller(s) from {}",
        sellers.len(),
        config.sellers_path().display()
    );

    let products = load_products(&config.products_path())?;
    info!(
        "Product catalog loaded: {} product(s) from {}",
        products.len(),
        config.products_path().display()
    );

    let files = discover_transaction_files(
        &config.input_dir,
        &config.transaction_prefix,
        &config.transaction_suffix,
    )?;
    let mut aggregator = TransactionAggregator::new(&sellers, &products);
    let aggregation = aggregator.process_all(&files)?;
    let aggregates = aggregator.into_aggregates();
    info!("Transaction files aggregated");

    fs::create_dir_all(&config.output_dir).map_err(|e| SalesError::IoError {
        message: format!(
            "Failed to create output directory '{}': {}",
            config.output_dir.display(),
            e
        ),
    })?;

    let seller_report = config.seller_report_path();
    let seller_rows = build_seller_report(aggregates.revenue(), &sellers);
    write_report_file(&seller_report, |output| {
        write_seller_report(&seller_rows, output)
    })?;
    info!("Seller report written: {}", seller_report.display());

    let product_report = config.product_report_path();
    let product_rows = build_product_report(aggregates.quantities(), &products);
    write_report_file(&product_report, |output| {
        write_product_report(&product_rows, output)
    })?;
    info!("Product report written: {}", product_report.display());

    Ok(PipelineSummary {
        sellers_loaded: sellers.len(),
        products_loaded: products.len(),
        files_processed: aggregation.files_with_sales,
        files_skipped: aggregation.files_skipped,
        files_total: aggregation.files_total,
        seller_report,
        product_report,
    })
}
