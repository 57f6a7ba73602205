//! Benchmark suite for the report pipeline
//!
//! Input directories are produced by the seeded generator before timing
//! starts, so every run measures the same data.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! Each benchmark is parameterized by the number of sellers; every seller gets
//! one transaction file of 5 to 19 sale lines over a 25 product catalog.

use sales_report_engine::generator::{GeneratorConfig, InfoFileGenerator};
use sales_report_engine::io::discover_transaction_files;
use sales_report_engine::pipeline::{self, PipelineConfig, TRANSACTION_PREFIX, TRANSACTION_SUFFIX};
use sales_report_engine::{ProductCatalog, SellerRoster, TransactionAggregator};
use tempfile::TempDir;

const SELLER_COUNTS: &[usize] = &[10, 100, 1_000];

fn main() {
    divan::main();
}

fn generate(sellers: usize) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = GeneratorConfig {
        sellers,
        ..GeneratorConfig::default()
    };
    InfoFileGenerator::new(dir.path(), Some(42))
        .generate(&config)
        .expect("Generation failed");
    dir
}

/// Full run: load both tables, aggregate every file, write both reports
#[divan::bench(args = SELLER_COUNTS)]
fn full_pipeline(bencher: divan::Bencher, sellers: usize) {
    let dir = generate(sellers);
    let config = PipelineConfig::new(dir.path(), dir.path());

    bencher.bench(|| pipeline::run(&config).expect("Processing failed"));
}

/// Aggregation alone over already loaded tables
#[divan::bench(args = SELLER_COUNTS)]
fn aggregation_only(bencher: divan::Bencher, sellers: usize) {
    let dir = generate(sellers);
    let roster = SellerRoster::load(&dir.path().join("vendedores.txt")).expect("Roster failed");
    let catalog = ProductCatalog::load(&dir.path().join("productos.txt")).expect("Catalog failed");
    let files = discover_transaction_files(dir.path(), TRANSACTION_PREFIX, TRANSACTION_SUFFIX)
        .expect("Discovery failed");

    bencher.bench(|| {
        let mut aggregator = TransactionAggregator::new(&roster, &catalog);
        aggregator.process_all(&files).expect("Aggregation failed");
        aggregator.into_aggregates()
    });
}
