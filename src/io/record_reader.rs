//! Streaming reader over `;`-separated input files
//!
//! Yields one [`Record`] per non-blank line, together with its 1-based line
//! number. Delegates record interpretation to the record_format module.
//!
//! # Design
//!
//! The RecordReader wraps a `csv::Reader` configured for the flat-file
//! convention shared by the roster, the catalog and the transaction files:
//! - `;` as field separator
//! - no header row
//! - a variable number of fields per line (trailing separators are common)
//! - every field trimmed
//! - no quoting, so a `"` inside a name is kept verbatim
//!
//! Lines whose fields are all empty after trimming are skipped.
//!
//! # Error Handling
//!
//! - Open failures are returned from [`RecordReader::open`]
//! - A record that cannot be decoded is yielded as an `Err` and iteration continues
//! - An I/O failure is yielded once, after which the iterator is exhausted

use crate::io::record_format::FIELD_SEPARATOR;
use crate::types::SalesError;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A non-blank input line split into trimmed fields
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based line number in the source file
    pub line: u64,
    pub fields: StringRecord,
}

/// Streaming reader over the records of one input file
///
/// # Examples
///
/// ```no_run
/// use sales_report_engine::io::RecordReader;
/// use std::path::Path;
///
/// let reader = RecordReader::open(Path::new("productos.txt")).unwrap();
/// for record in reader.filter_map(Result::ok) {
///     println!("line {}: {:?}", record.line, record.fields);
/// }
/// ```
#[derive(Debug)]
pub struct RecordReader<R> {
    reader: csv::Reader<R>,
    exhausted: bool,
}

impl RecordReader<File> {
    /// Open `path` for streaming
    ///
    /// # Returns
    ///
    /// * `Ok(RecordReader)` if the file opened successfully
    /// * `Err(SalesError::FileNotFound)` if the file does not exist
    /// * `Err(SalesError::IoError)` for any other open failure
    pub fn open(path: &Path) -> Result<Self, SalesError> {
        let file = File::open(path).map_err(|e| SalesError::open_failed(path, e))?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> RecordReader<R> {
    /// Wrap any byte source, e.g. an in-memory buffer in tests
    pub fn from_reader(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .delimiter(FIELD_SEPARATOR)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .buffer_capacity(8 * 1024)
            .from_reader(source);

        Self {
            reader,
            exhausted: false,
        }
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Record, SalesError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        loop {
            let mut fields = StringRecord::new();
            match self.reader.read_record(&mut fields) {
                Ok(false) => {
                    self.exhausted = true;
                    return None;
                }
                Ok(true) if is_blank(&fields) => continue,
                Ok(true) => {
                    let line = fields.position().map(|pos| pos.line()).unwrap_or_default();
                    return Some(Ok(Record { line, fields }));
                }
                Err(e) => {
                    let error = SalesError::from(e);
                    if matches!(error, SalesError::IoError { .. }) {
                        self.exhausted = true;
                    }
                    return Some(Err(error));
                }
            }
        }
    }
}
