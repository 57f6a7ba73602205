//! Sales Report Engine CLI
//!
//! Command-line interface for ranking sellers and products from flat sales files.
//!
//! # Usage
//!
//! ```bash
//! # Read vendedores.txt, productos.txt and ventas_*.txt from the current directory
//! cargo run
//! cargo run -- --input-dir data --output-dir reports
//! cargo run -- --prefix sales_ --suffix .dat
//!
//! # Write synthetic input files
//! cargo run -- generate --products 25 --sellers 10 --seed 42
//! ```
//!
//! The pipeline writes `reporte_vendedores.csv` and `reporte_productos.csv`.
//! Progress and skipped lines are logged to stderr; set `RUST_LOG` to change
//! the verbosity (default `info`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (missing input file, nothing usable in the input, I/O failure, etc.)

use sales_report_engine::cli::{self, CliArgs, Command, GenerateArgs};
use sales_report_engine::generator::InfoFileGenerator;
use sales_report_engine::pipeline;
use sales_report_engine::SalesError;
use std::process;

fn run_pipeline(args: &CliArgs) -> Result<(), SalesError> {
    let summary = pipeline::run(&args.to_pipeline_config())?;

    println!(
        "Transaction files processed: {}/{} ({} skipped)",
        summary.files_processed, summary.files_total, summary.files_skipped
    );
    println!("Reports written:");
    println!("- {}", summary.seller_report.display());
    println!("- {}", summary.product_report.display());
    Ok(())
}

fn run_generator(args: &GenerateArgs) -> Result<(), SalesError> {
    let mut generator = InfoFileGenerator::new(&args.dir, args.seed);
    let summary = generator.generate(&args.to_generator_config())?;

    println!("Files written:");
    println!("- {}", summary.products_file.display());
    println!("- {}", summary.sellers_file.display());
    println!("- {} transaction file(s)", summary.sales_files.len());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    let result = match &args.command {
        Some(Command::Generate(generate)) => run_generator(generate),
        None => run_pipeline(&args),
    };

    if let Err(e) = result {
        eprintln!("Error ({}): {}", e.category(), e);
        process::exit(1);
    }
}
