use crate::generator::GeneratorConfig;
use crate::pipeline::{PipelineConfig, TRANSACTION_PREFIX, TRANSACTION_SUFFIX};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Rank sellers by revenue and products by units sold from flat sales files
#[derive(Parser, Debug)]
#[command(name = "sales-report")]
#[command(about = "Rank sellers by revenue and products by units sold", long_about = None)]
pub struct CliArgs {
    /// Directory holding vendedores.txt, productos.txt and the ventas_*.txt files
    #[arg(
        long = "input-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory with the roster, the catalog and the transaction files"
    )]
    pub input_dir: PathBuf,

    /// Directory the two reports are written to
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory the reports are written to"
    )]
    pub output_dir: PathBuf,

    /// File name prefix of the transaction files
    #[arg(long = "prefix", value_name = "TEXT", default_value = TRANSACTION_PREFIX)]
    pub prefix: String,

    /// File name suffix of the transaction files
    #[arg(long = "suffix", value_name = "TEXT", default_value = TRANSACTION_SUFFIX)]
    pub suffix: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write synthetic roster, catalog and transaction files
    Generate(GenerateArgs),
}

/// Options of the `generate` subcommand
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of products in the catalog
    #[arg(long = "products", value_name = "COUNT", default_value_t = 25)]
    pub products: usize,

    /// Number of sellers in the roster
    #[arg(long = "sellers", value_name = "COUNT", default_value_t = 10)]
    pub sellers: usize,

    /// Fewest sale lines per transaction file
    #[arg(long = "min-sales", value_name = "COUNT", default_value_t = 5)]
    pub min_sales: usize,

    /// Most sale lines per transaction file
    #[arg(long = "max-sales", value_name = "COUNT", default_value_t = 19)]
    pub max_sales: usize,

    /// Seed for reproducible output
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Directory the files are written to
    #[arg(long = "dir", value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,
}

impl CliArgs {
    /// Build the pipeline configuration from the directory and pattern options
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::new(&self.input_dir, &self.output_dir)
            .with_transaction_pattern(&self.prefix, &self.suffix)
    }
}

impl GenerateArgs {
    /// Build the generator configuration from the count options
    pub fn to_generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            products: self.products,
            sellers: self.sellers,
            min_sales: self.min_sales,
            max_sales: self.max_sales,
        }
    }
}
