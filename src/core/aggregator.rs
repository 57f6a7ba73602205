//! Transaction aggregation
//!
//! This module provides the [`SalesAggregates`] (revenue per seller, units per
//! product) and the [`TransactionAggregator`] that folds transaction files into
//! them.
//!
//! The aggregator enforces:
//! - Both aggregates hold exactly one entry per roster/catalog key, seeded to zero
//! - A file whose header names no known seller contributes nothing
//! - A sale line with a bad quantity or an unknown product contributes nothing
//! - A file is merged only after it has been read completely

use crate::core::catalog::{ProductCatalog, SellerRoster};
use crate::io::record_format::{parse_sale_line, parse_seller_header};
use crate::io::record_reader::{Record, RecordReader};
use crate::types::{ProductCode, SaleLine, SalesError, SellerKey, SkipReason};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Revenue per seller and units sold per product
///
/// Both maps are total over their reference tables: every loaded seller and
/// every loaded product has an entry, possibly zero, and there are no others.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesAggregates {
    revenue: BTreeMap<SellerKey, Decimal>,
    quantities: BTreeMap<ProductCode, u64>,
}

impl SalesAggregates {
    /// Zero-valued aggregates for every seller and product
    pub fn seeded(sellers: &SellerRoster, products: &ProductCatalog) -> Self {
        SalesAggregates {
            revenue: sellers
                .iter()
                .map(|seller| (seller.key.clone(), Decimal::ZERO))
                .collect(),
            quantities: products
                .iter()
                .map(|product| (product.code.clone(), 0))
                .collect(),
        }
    }

    /// Revenue per seller, in key order
    pub fn revenue(&self) -> &BTreeMap<SellerKey, Decimal> {
        &self.revenue
    }

    /// Units sold per product, in code order
    pub fn quantities(&self) -> &BTreeMap<ProductCode, u64> {
        &self.quantities
    }

    pub fn revenue_of(&self, key: &SellerKey) -> Option<Decimal> {
        self.revenue.get(key).copied()
    }

    pub fn quantity_of(&self, code: &str) -> Option<u64> {
        self.quantities.get(code).copied()
    }

    /// Fold a completed file tally into the aggregates
    ///
    /// Every line of the tally was checked against these aggregates when it
    /// was folded, so the additions cannot overflow.
    fn merge(&mut self, tally: FileTally) {
        if let Some(revenue) = self.revenue.get_mut(&tally.seller) {
            *revenue += tally.revenue;
        }
        for (code, quantity) in tally.quantities {
            if let Some(total) = self.quantities.get_mut(&code) {
                *total += quantity;
            }
        }
    }
}

/// Sales recorded from one transaction file, not yet merged
#[derive(Debug)]
struct FileTally {
    seller: SellerKey,
    revenue: Decimal,
    quantities: BTreeMap<ProductCode, u64>,
    sales: usize,
}

impl FileTally {
    fn new(seller: SellerKey) -> Self {
        FileTally {
            seller,
            revenue: Decimal::ZERO,
            quantities: BTreeMap::new(),
            sales: 0,
        }
    }

    /// Add one sale line, or explain why it cannot be added
    ///
    /// The running totals are checked against the merged aggregates so the
    /// later merge stays within range.
    fn record(
        &mut self,
        sale: SaleLine,
        products: &ProductCatalog,
        aggregates: &SalesAggregates,
    ) -> Result<(), SkipReason> {
        let product = products
            .get(&sale.product)
            .ok_or_else(|| SkipReason::UnknownProduct {
                code: sale.product.clone(),
            })?;

        let overflow = || SkipReason::ArithmeticOverflow {
            product: sale.product.clone(),
        };

        let amount = Decimal::from(sale.quantity)
            .checked_mul(product.price)
            .ok_or_else(overflow)?;
        let new_revenue = self.revenue.checked_add(amount).ok_or_else(overflow)?;
        aggregates
            .revenue_of(&self.seller)
            .unwrap_or_default()
            .checked_add(new_revenue)
            .ok_or_else(overflow)?;

        let sold = self.quantities.get(&sale.product).copied().unwrap_or(0);
        let new_sold = sold.checked_add(sale.quantity).ok_or_else(overflow)?;
        aggregates
            .quantity_of(&sale.product)
            .unwrap_or(0)
            .checked_add(new_sold)
            .ok_or_else(overflow)?;

        self.revenue = new_revenue;
        self.quantities.insert(sale.product, new_sold);
        self.sales += 1;
        Ok(())
    }
}

/// Outcome of a pass over all transaction files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationSummary {
    /// Files that recorded at least one sale
    pub files_with_sales: usize,
    /// Files rejected as a whole (empty, unknown seller, unreadable)
    pub files_skipped: usize,
    /// All candidate files
    pub files_total: usize,
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn header_text(record: &Record) -> String {
    record.fields.iter().collect::<Vec<_>>().join(";")
}

/// Folds transaction files into [`SalesAggregates`]
///
/// Borrows the reference tables and owns the aggregates until
/// [`TransactionAggregator::into_aggregates`] hands them to the report builder.
pub struct TransactionAggregator<'a> {
    sellers: &'a SellerRoster,
    products: &'a ProductCatalog,
    aggregates: SalesAggregates,
}

impl<'a> TransactionAggregator<'a> {
    /// Create an aggregator with zero-seeded aggregates
    pub fn new(sellers: &'a SellerRoster, products: &'a ProductCatalog) -> Self {
        TransactionAggregator {
            sellers,
            products,
            aggregates: SalesAggregates::seeded(sellers, products),
        }
    }

    pub fn aggregates(&self) -> &SalesAggregates {
        &self.aggregates
    }

    pub fn into_aggregates(self) -> SalesAggregates {
        self.aggregates
    }

    /// Process one transaction file
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if at least one sale line was recorded
    /// * `Ok(false)` if the file was valid but had no usable sale line
    /// * `Err(SalesError)` if the file was rejected as a whole; the aggregates
    ///   are left untouched
    ///
    /// # Errors
    ///
    /// * `SalesError::EmptyFile` if the file has no seller header
    /// * `SalesError::UnknownSeller` if the header names no roster entry
    /// * `SalesError::FileNotFound` / `SalesError::IoError` if reading fails
    pub fn process_transaction_file(&mut self, path: &Path) -> Result<bool, SalesError> {
        let reader = RecordReader::open(path)?;
        self.process_records(reader, &display_name(path))
    }

    /// Process transaction lines from any byte source; `name` identifies it in logs and errors
    pub fn process_transactions<R: Read>(
        &mut self,
        source: R,
        name: &str,
    ) -> Result<bool, SalesError> {
        self.process_records(RecordReader::from_reader(source), name)
    }

    fn process_records<R: Read>(
        &mut self,
        mut records: RecordReader<R>,
        name: &str,
    ) -> Result<bool, SalesError> {
        let header = records
            .next()
            .ok_or_else(|| SalesError::empty_file(name))??;

        let seller = parse_seller_header(&header.fields)
            .filter(|key| self.sellers.contains(key))
            .ok_or_else(|| SalesError::unknown_seller(name, &header_text(&header)))?;

        let mut tally = FileTally::new(seller);

        for result in records {
            let record = match result {
                Ok(record) => record,
                Err(e @ SalesError::ParseError { .. }) => {
                    warn!("Skipping unreadable line in {}: {}", name, e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let outcome = parse_sale_line(&record.fields)
                .and_then(|sale| tally.record(sale, self.products, &self.aggregates));
            if let Err(reason) = outcome {
                warn!("Skipping line {} of {}: {}", record.line, name, reason);
            }
        }

        let recorded = tally.sales > 0;
        debug!(
            "{}: {} sale line(s) recorded for seller {}",
            name, tally.sales, tally.seller
        );
        self.aggregates.merge(tally);
        Ok(recorded)
    }

    /// Process every candidate file, skipping files that are rejected as a whole
    ///
    /// # Errors
    ///
    /// Returns `SalesError::NoValidTransactions` if no file recorded a sale.
    pub fn process_all(&mut self, files: &[PathBuf]) -> Result<AggregationSummary, SalesError> {
        let mut files_with_sales = 0;
        let mut files_skipped = 0;

        for path in files {
            match self.process_transaction_file(path) {
                Ok(true) => files_with_sales += 1,
                Ok(false) => warn!("No valid sale lines in {}", display_name(path)),
                Err(e) => {
                    warn!("Skipping transaction file {}: {}", display_name(path), e);
                    files_skipped += 1;
                }
            }
        }

        if files_with_sales == 0 {
            return Err(SalesError::NoValidTransactions {
                candidates: files.len(),
            });
        }

        info!(
            "Transaction files processed: {}/{}",
            files_with_sales,
            files.len()
        );

        Ok(AggregationSummary {
            files_with_sales,
            files_skipped,
            files_total: files.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    #[fixture]
    fn sellers() -> SellerRoster {
        SellerRoster::from_reader(
            "CC;111;Ana;Diaz\nCE;222;Luis;Gil\n".as_bytes(),
            "vendedores.txt",
        )
        .unwrap()
    }

    #[fixture]
    fn products() -> ProductCatalog {
        ProductCatalog::from_reader(
            "PROD001;Mouse;10.00\nPROD002;Teclado;2,50\n".as_bytes(),
            "productos.txt",
        )
        .unwrap()
    }

    fn write_files(files: &[(&str, &str)]) -> (TempDir, Vec<PathBuf>) {
        let dir = tempdir().unwrap();
        let paths = files
            .iter()
            .map(|(name, content)| {
                let path = dir.path().join(name);
                fs::write(&path, content).unwrap();
                path
            })
            .collect();
        (dir, paths)
    }

    #[rstest]
    fn test_seeded_aggregates_are_total_and_zero(sellers: SellerRoster, products: ProductCatalog) {
        let aggregates = SalesAggregates::seeded(&sellers, &products);

        assert_eq!(aggregates.revenue().len(), sellers.len());
        assert_eq!(aggregates.quantities().len(), products.len());
        assert!(aggregates.revenue().values().all(|v| v.is_zero()));
        assert!(aggregates.quantities().values().all(|&q| q == 0));
        for seller in sellers.iter() {
            assert_eq!(aggregates.revenue_of(&seller.key), Some(Decimal::ZERO));
        }
    }

    #[rstest]
    fn test_single_sale_line(sellers: SellerRoster, products: ProductCatalog) {
        let mut aggregator = TransactionAggregator::new(&sellers, &products);
        let recorded = aggregator
            .process_transactions("CC;111\nPROD001;3;\n".as_bytes(), "ventas_CC_111.txt")
            .unwrap();

        assert!(recorded);
        let aggregates = aggregator.aggregates();
        assert_eq!(
            aggregates.revenue_of(&SellerKey::new("CC", "111")),
            Some(Decimal::new(3000, 2))
        );
        assert_eq!(aggregates.quantity_of("PROD001"), Some(3));
        assert_eq!(aggregates.quantity_of("PROD002"), Some(0));
    }

    #[rstest]
    fn test_header_after_blank_lines(sellers: SellerRoster, products: ProductCatalog) {
        let mut aggregator = TransactionAggregator::new(&sellers, &products);
        let recorded = aggregator
            .process_transactions("\n  \nCE;222;\n\nPROD002;4\n".as_bytes(), "f.txt")
            .unwrap();

        assert!(recorded);
        assert_eq!(
            aggregator.aggregates().revenue_of(&SellerKey::new("CE", "222")),
            Some(Decimal::new(1000, 2))
        );
    }

    #[rstest]
    #[case::negative_quantity("CC;111\nPROD001;-3\n")]
    #[case::unknown_product("CC;111\nPROD999;3\n")]
    #[case::decimal_quantity("CC;111\nPROD001;1.5\n")]
    #[case::missing_quantity("CC;111\nPROD001\n")]
    fn test_skipped_lines_leave_aggregates_unchanged(
        sellers: SellerRoster,
        products: ProductCatalog,
        #[case] content: &str,
    ) {
        let mut aggregator = TransactionAggregator::new(&sellers, &products);
        let before = aggregator.aggregates().clone();

        let recorded = aggregator
            .process_transactions(content.as_bytes(), "f.txt")
            .unwrap();

        assert!(!recorded);
        assert_eq!(aggregator.aggregates(), &before);
    }

    #[rstest]
    fn test_bad_lines_do_not_stop_the_file(sellers: SellerRoster, products: ProductCatalog) {
        let mut aggregator = TransactionAggregator::new(&sellers, &products);
        aggregator
            .process_transactions(
                "CC;111\nPROD001;2\nPROD999;5\nPROD001;-1\nPROD002;x\nPROD002;2\n".as_bytes(),
                "f.txt",
            )
            .unwrap();

        let aggregates = aggregator.aggregates();
        assert_eq!(
            aggregates.revenue_of(&SellerKey::new("CC", "111")),
            Some(Decimal::new(2500, 2))
        );
        assert_eq!(aggregates.quantity_of("PROD001"), Some(2));
        assert_eq!(aggregates.quantity_of("PROD002"), Some(2));
        assert!(!aggregates.quantities().contains_key("PROD999"));
    }

    #[rstest]
    #[case::empty("", SalesError::empty_file("f.txt"))]
    #[case::only_blank_lines("\n   \n", SalesError::empty_file("f.txt"))]
    #[case::unknown_seller("CC;999\nPROD001;3\n", SalesError::unknown_seller("f.txt", "CC;999"))]
    #[case::header_without_number("CC\nPROD001;3\n", SalesError::unknown_seller("f.txt", "CC"))]
    #[case::header_with_extra_field(
        "CC;111;junk\nPROD001;3\n",
        SalesError::unknown_seller("f.txt", "CC;111;junk")
    )]
    fn test_rejected_files(
        sellers: SellerRoster,
        products: ProductCatalog,
        #[case] content: &str,
        #[case] expected: SalesError,
    ) {
        let mut aggregator = TransactionAggregator::new(&sellers, &products);
        let before = aggregator.aggregates().clone();

        let result = aggregator.process_transactions(content.as_bytes(), "f.txt");

        assert_eq!(result, Err(expected));
        assert_eq!(aggregator.aggregates(), &before);
    }

    #[rstest]
    fn test_zero_quantity_counts_as_a_sale(sellers: SellerRoster, products: ProductCatalog) {
        let mut aggregator = TransactionAggregator::new(&sellers, &products);
        let recorded = aggregator
            .process_transactions("CC;111\nPROD001;0\n".as_bytes(), "f.txt")
            .unwrap();

        assert!(recorded);
        assert_eq!(aggregator.aggregates().quantity_of("PROD001"), Some(0));
    }

    #[rstest]
    fn test_quantity_overflow_skips_line(sellers: SellerRoster, products: ProductCatalog) {
        let max = i64::MAX;
        let content = format!("CC;111\nPROD002;{max}\nPROD002;{max}\nPROD002;{max}\n");
        let mut aggregator = TransactionAggregator::new(&sellers, &products);
        aggregator
            .process_transactions(content.as_bytes(), "f.txt")
            .unwrap();

        assert_eq!(
            aggregator.aggregates().quantity_of("PROD002"),
            Some(u64::MAX - 1)
        );
    }

    #[rstest]
    fn test_process_all_skips_bad_files(sellers: SellerRoster, products: ProductCatalog) {
        let (_dir, files) = write_files(&[
            ("ventas_a.txt", "CC;111\nPROD001;1\n"),
            ("ventas_b.txt", "XX;000\nPROD001;100\n"),
            ("ventas_c.txt", ""),
            ("ventas_d.txt", "CE;222\nPROD999;1\n"),
        ]);

        let mut aggregator = TransactionAggregator::new(&sellers, &products);
        let summary = aggregator.process_all(&files).unwrap();

        assert_eq!(
            summary,
            AggregationSummary {
                files_with_sales: 1,
                files_skipped: 2,
                files_total: 4,
            }
        );
        assert_eq!(aggregator.aggregates().quantity_of("PROD001"), Some(1));
    }

    #[rstest]
    fn test_process_all_without_any_sale(sellers: SellerRoster, products: ProductCatalog) {
        let (_dir, files) = write_files(&[
            ("ventas_a.txt", "XX;000\nPROD001;1\n"),
            ("ventas_b.txt", "CC;111\nPROD001;-1\n"),
        ]);

        let mut aggregator = TransactionAggregator::new(&sellers, &products);
        let result = aggregator.process_all(&files);

        assert_eq!(result, Err(SalesError::NoValidTransactions { candidates: 2 }));
    }

    #[rstest]
    fn test_missing_file_is_skipped(sellers: SellerRoster, products: ProductCatalog) {
        let (dir, mut files) = write_files(&[("ventas_a.txt", "CC;111\nPROD001;1\n")]);
        files.push(dir.path().join("ventas_gone.txt"));

        let mut aggregator = TransactionAggregator::new(&sellers, &products);
        let summary = aggregator.process_all(&files).unwrap();

        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.files_with_sales, 1);
    }

    #[rstest]
    fn test_file_order_does_not_change_aggregates(
        sellers: SellerRoster,
        products: ProductCatalog,
    ) {
        let (_dir, files) = write_files(&[
            ("ventas_a.txt", "CC;111\nPROD001;3\nPROD002;7\n"),
            ("ventas_b.txt", "CE;222\nPROD001;1\n"),
            ("ventas_c.txt", "CC;111\nPROD002;5\nPROD001;2\n"),
        ]);

        let mut forward = TransactionAggregator::new(&sellers, &products);
        forward.process_all(&files).unwrap();

        let reversed_files: Vec<PathBuf> = files.iter().rev().cloned().collect();
        let mut reversed = TransactionAggregator::new(&sellers, &products);
        reversed.process_all(&reversed_files).unwrap();

        assert_eq!(forward.aggregates(), reversed.aggregates());
        assert_eq!(
            forward.aggregates().revenue_of(&SellerKey::new("CC", "111")),
            Some(Decimal::new(8000, 2))
        );
    }
}
