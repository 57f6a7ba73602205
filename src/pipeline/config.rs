//! Pipeline configuration
//!
//! File names and directories used by a pipeline run. The defaults reproduce
//! the flat-file convention: everything lives in the current directory.

use log::warn;
use std::path::PathBuf;

/// Default seller roster file name
pub const SELLERS_FILE: &str = "vendedores.txt";
/// Default product catalog file name
pub const PRODUCTS_FILE: &str = "productos.txt";
/// Default transaction file name prefix
pub const TRANSACTION_PREFIX: &str = "ventas_";
/// Default transaction file name suffix
pub const TRANSACTION_SUFFIX: &str = ".txt";
/// Default seller report file name
pub const SELLER_REPORT_FILE: &str = "reporte_vendedores.csv";
/// Default product report file name
pub const PRODUCT_REPORT_FILE: &str = "reporte_productos.csv";

/// Configuration for one pipeline run
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Directory holding the roster, the catalog and the transaction files
    pub input_dir: PathBuf,
    /// Directory the reports are written to
    pub output_dir: PathBuf,
    pub sellers_file: String,
    pub products_file: String,
    pub transaction_prefix: String,
    pub transaction_suffix: String,
    pub seller_report_file: String,
    pub product_report_file: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            sellers_file: SELLERS_FILE.to_string(),
            products_file: PRODUCTS_FILE.to_string(),
            transaction_prefix: TRANSACTION_PREFIX.to_string(),
            transaction_suffix: TRANSACTION_SUFFIX.to_string(),
            seller_report_file: SELLER_REPORT_FILE.to_string(),
            product_report_file: PRODUCT_REPORT_FILE.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create a config reading from `input_dir` and writing to `output_dir`
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Override the transaction file naming convention
    ///
    /// An empty prefix and suffix together would match every file in the
    /// directory, including the roster and the catalog; that combination falls
    /// back to the defaults.
    pub fn with_transaction_pattern(mut self, prefix: &str, suffix: &str) -> Self {
        if prefix.is_empty() && suffix.is_empty() {
            warn!(
                "Invalid transaction file pattern (empty prefix and suffix), using default ({}*{})",
                TRANSACTION_PREFIX, TRANSACTION_SUFFIX
            );
            self.transaction_prefix = TRANSACTION_PREFIX.to_string();
            self.transaction_suffix = TRANSACTION_SUFFIX.to_string();
        } else {
            self.transaction_prefix = prefix.to_string();
            self.transaction_suffix = suffix.to_string();
        }
        self
    }

    pub fn sellers_path(&self) -> PathBuf {
        self.input_dir.join(&self.sellers_file)
    }

    pub fn products_path(&self) -> PathBuf {
        self.input_dir.join(&self.products_file)
    }

    pub fn seller_report_path(&self) -> PathBuf {
        self.output_dir.join(&self.seller_report_file)
    }

    pub fn product_report_path(&self) -> PathBuf {
        self.output_dir.join(&self.product_report_file)
    }
}
