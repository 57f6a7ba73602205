//! Error types for the Sales Report Engine
//!
//! This module defines every error that can occur while loading reference
//! data, aggregating transaction files and writing reports. Errors are designed
//! to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Fatal errors** ([`SalesError`]): abort the whole run (missing roster,
//!   empty catalog, no transaction files, no usable sale anywhere).
//! - **Per-file errors** ([`SalesError::EmptyFile`], [`SalesError::UnknownSeller`]):
//!   abort one transaction file; the run continues with the next file.
//! - **Per-line skips** ([`SkipReason`]): the offending line is ignored with a
//!   warning and processing continues on the next line.

use rust_decimal::Decimal;
use std::fmt;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Which reference table a loader was building
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Sellers,
    Products,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::Sellers => write!(f, "seller roster"),
            CatalogKind::Products => write!(f, "product catalog"),
        }
    }
}

/// User-facing classification of a fatal error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A required input file or directory entry does not exist
    MissingFile,
    /// Input exists but none of it could be parsed
    MalformedContent,
    /// Input parsed but contained nothing to report on
    NoUsableData,
    /// Reading or writing failed at the operating-system level
    Io,
    /// A caller supplied an unusable argument
    InvalidArgument,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorCategory::MissingFile => "missing file",
            ErrorCategory::MalformedContent => "malformed content",
            ErrorCategory::NoUsableData => "no usable data",
            ErrorCategory::Io => "I/O failure",
            ErrorCategory::InvalidArgument => "invalid argument",
        };
        f.write_str(label)
    }
}

/// Main error type for the report engine
///
/// Each variant includes enough context (file name, offending value) to
/// diagnose the problem from the log alone.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SalesError {
    /// File not found at the specified path
    ///
    /// Fatal when it concerns the roster or the catalog.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// The delimited reader could not decode a record
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// No usable entry was loaded from a reference file
    ///
    /// Fatal: reports cannot be produced without sellers and products.
    #[error("No valid entries found in {kind} {path} ({rejected} line(s) rejected)")]
    EmptyCatalog {
        /// Which table was empty
        kind: CatalogKind,
        /// Source file of the table
        path: String,
        /// Number of non-blank lines that were skipped as malformed
        rejected: usize,
    },

    /// The input directory holds no file matching the transaction naming convention
    #[error("No transaction files matching '{pattern}' found in {dir}")]
    NoTransactionFiles {
        /// Directory that was scanned
        dir: String,
        /// File name pattern that was expected
        pattern: String,
    },

    /// Transaction files existed but none of them recorded a single valid sale
    #[error("None of the {candidates} transaction file(s) contained a valid sale")]
    NoValidTransactions {
        /// Number of candidate files that were examined
        candidates: usize,
    },

    /// A transaction file has no seller header line
    ///
    /// Per-file: the file is skipped and the run continues.
    #[error("Empty transaction file: {file}")]
    EmptyFile {
        /// Name of the transaction file
        file: String,
    },

    /// A transaction file names a seller that is not in the roster
    ///
    /// Per-file: the file is skipped and the run continues.
    #[error("Unknown seller '{key}' in transaction file {file}")]
    UnknownSeller {
        /// Name of the transaction file
        file: String,
        /// The header value as written in the file
        key: String,
    },

    /// A caller-supplied argument is out of range
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument
        message: String,
    },
}

impl SalesError {
    /// Classify the error for the final user-facing message
    pub fn category(&self) -> ErrorCategory {
        match self {
            SalesError::FileNotFound { .. } | SalesError::NoTransactionFiles { .. } => {
                ErrorCategory::MissingFile
            }
            SalesError::EmptyCatalog { rejected, .. } if *rejected > 0 => {
                ErrorCategory::MalformedContent
            }
            SalesError::EmptyCatalog { .. }
            | SalesError::NoValidTransactions { .. }
            | SalesError::EmptyFile { .. } => ErrorCategory::NoUsableData,
            SalesError::ParseError { .. } | SalesError::UnknownSeller { .. } => {
                ErrorCategory::MalformedContent
            }
            SalesError::IoError { .. } => ErrorCategory::Io,
            SalesError::InvalidArgument { .. } => ErrorCategory::InvalidArgument,
        }
    }

    /// Build the error for a failed open of `path`
    ///
    /// A missing file becomes [`SalesError::FileNotFound`]; anything else is
    /// reported as an I/O error naming the path.
    pub fn open_failed(path: &Path, error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::NotFound {
            SalesError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            SalesError::IoError {
                message: format!("Failed to open '{}': {}", path.display(), error),
            }
        }
    }

    /// Create an EmptyCatalog error
    pub fn empty_catalog(kind: CatalogKind, path: &str, rejected: usize) -> Self {
        SalesError::EmptyCatalog {
            kind,
            path: path.to_string(),
            rejected,
        }
    }

    /// Create an EmptyFile error
    pub fn empty_file(file: &str) -> Self {
        SalesError::EmptyFile {
            file: file.to_string(),
        }
    }

    /// Create an UnknownSeller error
    pub fn unknown_seller(file: &str, key: &str) -> Self {
        SalesError::UnknownSeller {
            file: file.to_string(),
            key: key.to_string(),
        }
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        SalesError::InvalidArgument {
            message: message.into(),
        }
    }
}

// Conversion from io::Error to SalesError
impl From<io::Error> for SalesError {
    fn from(error: io::Error) -> Self {
        SalesError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to SalesError
impl From<csv::Error> for SalesError {
    fn from(error: csv::Error) -> Self {
        if let csv::ErrorKind::Io(_) = error.kind() {
            return SalesError::IoError {
                message: error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());
        SalesError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

/// Why a single input line was skipped
///
/// Returned by the record parser instead of an error: the caller logs it and
/// moves on to the next line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The line has fewer fields than the record needs
    #[error("expected at least {expected} fields, found {found}")]
    MissingFields { expected: usize, found: usize },

    /// The price field is not a decimal number
    #[error("invalid price '{value}' for product {code}")]
    InvalidPrice { code: String, value: String },

    /// The price field parsed but is below zero
    #[error("negative price {price} for product {code}")]
    NegativePrice { code: String, price: Decimal },

    /// The quantity field is not an integer
    #[error("invalid quantity '{value}' for product {product}")]
    InvalidQuantity { product: String, value: String },

    /// The quantity field parsed but is below zero
    #[error("negative quantity {quantity} for product {product}")]
    NegativeQuantity { product: String, quantity: i64 },

    /// The product code is not in the catalog
    #[error("unknown product {code}")]
    UnknownProduct { code: String },

    /// Folding the line would overflow an aggregate
    #[error("arithmetic overflow while adding sale of product {product}")]
    ArithmeticOverflow { product: String },
}
