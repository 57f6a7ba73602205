//! Synthetic input generation
//!
//! Writes pseudo-random seller rosters, product catalogs and per-seller
//! transaction files in the same flat format the pipeline reads:
//! - `productos.txt`: `PRODnnn;name;price`
//! - `vendedores.txt`: `docType;docNumber;names;surnames`
//! - `ventas_<docType>_<docNumber>.txt`: header `docType;docNumber`, then
//!   `PRODnnn;quantity;` lines
//!
//! A fixed seed makes every generated file reproducible.

use crate::io::record_format::FIELD_SEPARATOR;
use crate::io::report_format::format_money;
use crate::pipeline::{PRODUCTS_FILE, SELLERS_FILE, TRANSACTION_PREFIX, TRANSACTION_SUFFIX};
use crate::types::{Product, SalesError, Seller, SellerKey};
use csv::{QuoteStyle, WriterBuilder};
use log::info;
use rand::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Document types a generated seller can carry
pub const DOCUMENT_TYPES: [&str; 4] = ["CC", "CE", "TI", "PP"];

const GIVEN_NAMES: [&str; 30] = [
    "Carlos", "María", "José", "Ana", "Luis", "Carmen", "Miguel", "Rosa", "Juan", "Isabel",
    "Antonio", "Pilar", "Manuel", "Mercedes", "Francisco", "Dolores", "Jesús", "Josefa", "Javier",
    "Teresa", "Daniel", "Concepción", "Rafael", "Francisca", "David", "Antonia", "Pedro",
    "Esperanza", "Alejandro", "Cristina",
];

const SURNAMES: [&str; 30] = [
    "García", "González", "Rodríguez", "Fernández", "López", "Martínez", "Sánchez", "Pérez",
    "Gómez", "Martín", "Jiménez", "Ruiz", "Hernández", "Díaz", "Moreno", "Muñoz", "Álvarez",
    "Romero", "Alonso", "Gutiérrez", "Navarro", "Torres", "Domínguez", "Vázquez", "Ramos", "Gil",
    "Ramírez", "Serrano", "Blanco", "Suárez",
];

const PRODUCT_NAMES: [&str; 25] = [
    "Laptop", "Mouse", "Teclado", "Monitor", "Impresora", "Cámara Web", "Auriculares", "Tablet",
    "Smartphone", "Cargador", "Disco Duro", "Memoria USB", "Router", "Parlantes", "Micrófono",
    "Proyector", "Scanner", "Webcam", "Mousepad", "Cable HDMI", "Adaptador", "Batería", "Funda",
    "Soporte", "Hub USB",
];

const MODELS: [&str; 12] = [
    "Pro", "Max", "Plus", "Lite", "Standard", "Premium", "v2.0", "v3.0", "2024", "2025", "Ultra",
    "Mini",
];

/// Price range in cents: 50.00 to 5000.00
const PRICE_CENTS: std::ops::RangeInclusive<i64> = 5_000..=500_000;
const DOCUMENT_NUMBER_MIN: u64 = 10_000_000;
const DOCUMENT_NUMBER_MAX: u64 = 99_999_999;
/// Eight-digit document numbers
const DOCUMENT_NUMBERS: std::ops::RangeInclusive<u64> = DOCUMENT_NUMBER_MIN..=DOCUMENT_NUMBER_MAX;
/// Number of distinct seller keys the generator can produce
pub const MAX_SELLERS: u64 =
    DOCUMENT_TYPES.len() as u64 * (DOCUMENT_NUMBER_MAX - DOCUMENT_NUMBER_MIN + 1);
/// Units per generated sale line
const QUANTITY: std::ops::RangeInclusive<u64> = 1..=20;
const SECOND_NAME_PROBABILITY: f64 = 0.3;

/// How much data [`InfoFileGenerator::generate`] produces
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub products: usize,
    pub sellers: usize,
    /// Fewest sale lines per transaction file
    pub min_sales: usize,
    /// Most sale lines per transaction file
    pub max_sales: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            products: 25,
            sellers: 10,
            min_sales: 5,
            max_sales: 19,
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> Result<(), SalesError> {
        if self.products == 0 {
            return Err(SalesError::invalid_argument(
                "product count must be greater than 0",
            ));
        }
        check_seller_count(self.sellers)?;
        if self.min_sales == 0 || self.min_sales > self.max_sales {
            return Err(SalesError::invalid_argument(format!(
                "sales per seller must be a non-empty range, got {}..={}",
                self.min_sales, self.max_sales
            )));
        }
        Ok(())
    }
}

fn check_seller_count(count: usize) -> Result<(), SalesError> {
    if count == 0 {
        return Err(SalesError::invalid_argument(
            "seller count must be greater than 0",
        ));
    }
    if count as u64 > MAX_SELLERS {
        return Err(SalesError::invalid_argument(format!(
            "seller count must be at most {}, got {}",
            MAX_SELLERS, count
        )));
    }
    Ok(())
}

/// Files written by a full generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub products_file: PathBuf,
    pub sellers_file: PathBuf,
    pub sales_files: Vec<PathBuf>,
}

/// Pseudo-random generator of pipeline input files
pub struct InfoFileGenerator {
    rng: StdRng,
    dir: PathBuf,
}

fn create_writer(path: &Path) -> Result<csv::Writer<File>, SalesError> {
    let file = File::create(path).map_err(|e| SalesError::IoError {
        message: format!("Failed to create '{}': {}", path.display(), e),
    })?;
    Ok(WriterBuilder::new()
        .delimiter(FIELD_SEPARATOR)
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Never)
        .from_writer(file))
}

impl InfoFileGenerator {
    /// Create a generator writing into `dir`, seeded when `seed` is given
    pub fn new(dir: impl Into<PathBuf>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        Self {
            rng,
            dir: dir.into(),
        }
    }

    /// Write `productos.txt` with `count` products `PROD001..`
    pub fn create_products_file(&mut self, count: usize) -> Result<Vec<Product>, SalesError> {
        if count == 0 {
            return Err(SalesError::invalid_argument(
                "product count must be greater than 0",
            ));
        }

        let products: Vec<Product> = (1..=count)
            .map(|i| {
                let base = PRODUCT_NAMES[self.rng.gen_range(0..PRODUCT_NAMES.len())];
                let model = MODELS[self.rng.gen_range(0..MODELS.len())];
                Product {
                    code: format!("PROD{:03}", i),
                    name: format!("{} {}", base, model),
                    price: Decimal::new(self.rng.gen_range(PRICE_CENTS), 2),
                }
            })
            .collect();

        let path = self.dir.join(PRODUCTS_FILE);
        let mut writer = create_writer(&path)?;
        for product in &products {
            writer.write_record([
                product.code.as_str(),
                product.name.as_str(),
                format_money(product.price).as_str(),
            ])?;
        }
        writer.flush()?;

        Ok(products)
    }

    fn given_names(&mut self) -> String {
        let first = GIVEN_NAMES[self.rng.gen_range(0..GIVEN_NAMES.len())];
        if self.rng.gen_bool(SECOND_NAME_PROBABILITY) {
            let second = GIVEN_NAMES[self.rng.gen_range(0..GIVEN_NAMES.len())];
            format!("{} {}", first, second)
        } else {
            first.to_string()
        }
    }

    fn surnames(&mut self) -> String {
        let first = SURNAMES[self.rng.gen_range(0..SURNAMES.len())];
        let second = SURNAMES[self.rng.gen_range(0..SURNAMES.len())];
        format!("{} {}", first, second)
    }

    /// Write `vendedores.txt` with `count` sellers with distinct keys
    pub fn create_sales_man_info_file(&mut self, count: usize) -> Result<Vec<Seller>, SalesError> {
        check_seller_count(count)?;

        let mut keys = HashSet::with_capacity(count);
        let mut sellers = Vec::with_capacity(count);
        while sellers.len() < count {
            let doc_type = DOCUMENT_TYPES[self.rng.gen_range(0..DOCUMENT_TYPES.len())];
            let doc_number = self.rng.gen_range(DOCUMENT_NUMBERS).to_string();
            let key = SellerKey::new(doc_type, doc_number);
            if !keys.insert(key.clone()) {
                continue;
            }
            let names = self.given_names();
            let surnames = self.surnames();
            sellers.push(Seller {
                key,
                names,
                surnames,
            });
        }

        let path = self.dir.join(SELLERS_FILE);
        let mut writer = create_writer(&path)?;
        for seller in &sellers {
            writer.write_record([
                seller.key.doc_type.as_str(),
                seller.key.doc_number.as_str(),
                seller.names.as_str(),
                seller.surnames.as_str(),
            ])?;
        }
        writer.flush()?;

        Ok(sellers)
    }

    /// Write `ventas_<docType>_<docNumber>.txt` with `sales_count` random sale lines
    ///
    /// Every line names one of `products` and sells between 1 and 20 units.
    pub fn create_sales_men_file(
        &mut self,
        seller: &SellerKey,
        sales_count: usize,
        products: &[Product],
    ) -> Result<PathBuf, SalesError> {
        if sales_count == 0 {
            return Err(SalesError::invalid_argument(
                "sales count must be greater than 0",
            ));
        }
        if products.is_empty() {
            return Err(SalesError::invalid_argument(
                "cannot generate sales without products",
            ));
        }

        let name = format!(
            "{}{}_{}{}",
            TRANSACTION_PREFIX, seller.doc_type, seller.doc_number, TRANSACTION_SUFFIX
        );
        let path = self.dir.join(name);
        let mut writer = create_writer(&path)?;
        writer.write_record([seller.doc_type.as_str(), seller.doc_number.as_str()])?;

        for _ in 0..sales_count {
            let product = &products[self.rng.gen_range(0..products.len())];
            let quantity = self.rng.gen_range(QUANTITY);
            writer.write_record([product.code.as_str(), quantity.to_string().as_str(), ""])?;
        }
        writer.flush()?;

        Ok(path)
    }

    /// Write the catalog, the roster and one transaction file per seller
    pub fn generate(&mut self, config: &GeneratorConfig) -> Result<GenerationSummary, SalesError> {
        config.validate()?;

        let products = self.create_products_file(config.products)?;
        info!("Product catalog generated: {} product(s)", products.len());

        let sellers = self.create_sales_man_info_file(config.sellers)?;
        info!("Seller roster generated: {} seller(s)", sellers.len());

        let mut sales_files = Vec::with_capacity(sellers.len());
        for seller in &sellers {
            let sales = self.rng.gen_range(config.min_sales..=config.max_sales);
            sales_files.push(self.create_sales_men_file(&seller.key, sales, &products)?);
        }
        info!("Transaction files generated: {}", sales_files.len());

        Ok(GenerationSummary {
            products_file: self.dir.join(PRODUCTS_FILE),
            sellers_file: self.dir.join(SELLERS_FILE),
            sales_files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ProductCatalog, SellerRoster};
    use crate::io::record_reader::RecordReader;
    use rstest::rstest;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_products_file_round_trips_through_loader() {
        let dir = tempdir().unwrap();
        let mut generator = InfoFileGenerator::new(dir.path(), Some(7));

        let products = generator.create_products_file(25).unwrap();
        let catalog = ProductCatalog::load(&dir.path().join(PRODUCTS_FILE)).unwrap();

        assert_eq!(catalog.len(), 25);
        assert_eq!(products[0].code, "PROD001");
        assert_eq!(products[24].code, "PROD025");
        for product in &products {
            assert_eq!(catalog.get(&product.code), Some(product));
            assert!(product.price >= Decimal::new(50, 0));
            assert!(product.price <= Decimal::new(5000, 0));
        }
    }

    #[test]
    fn test_roster_has_distinct_keys_and_loads() {
        let dir = tempdir().unwrap();
        let mut generator = InfoFileGenerator::new(dir.path(), Some(11));

        let sellers = generator.create_sales_man_info_file(40).unwrap();
        let roster = SellerRoster::load(&dir.path().join(SELLERS_FILE)).unwrap();

        assert_eq!(roster.len(), 40);
        for seller in &sellers {
            assert!(DOCUMENT_TYPES.contains(&seller.key.doc_type.as_str()));
            assert_eq!(seller.key.doc_number.len(), 8);
            assert_eq!(roster.get(&seller.key), Some(seller));
        }
    }

    #[test]
    fn test_sales_file_layout() {
        let dir = tempdir().unwrap();
        let mut generator = InfoFileGenerator::new(dir.path(), Some(3));
        let products = generator.create_products_file(5).unwrap();
        let key = SellerKey::new("CC", "12345678");

        let path = generator.create_sales_men_file(&key, 8, &products).unwrap();

        assert_eq!(path.file_name().unwrap(), "ventas_CC_12345678.txt");
        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("CC;12345678"));
        let sale_lines: Vec<&str> = lines.collect();
        assert_eq!(sale_lines.len(), 8);
        assert!(sale_lines.iter().all(|line| line.ends_with(';')));

        let records: Vec<_> = RecordReader::open(&path)
            .unwrap()
            .skip(1)
            .map(|r| r.unwrap())
            .collect();
        for record in records {
            let quantity: u64 = record.fields[1].parse().unwrap();
            assert!(QUANTITY.contains(&quantity));
            assert!(products.iter().any(|p| p.code == record.fields[0]));
        }
    }

    #[test]
    fn test_same_seed_same_files() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        let config = GeneratorConfig::default();

        InfoFileGenerator::new(first.path(), Some(42))
            .generate(&config)
            .unwrap();
        InfoFileGenerator::new(second.path(), Some(42))
            .generate(&config)
            .unwrap();

        for name in [PRODUCTS_FILE, SELLERS_FILE] {
            assert_eq!(
                fs::read_to_string(first.path().join(name)).unwrap(),
                fs::read_to_string(second.path().join(name)).unwrap()
            );
        }
    }

    #[test]
    fn test_generate_writes_one_sales_file_per_seller() {
        let dir = tempdir().unwrap();
        let config = GeneratorConfig {
            products: 3,
            sellers: 4,
            min_sales: 2,
            max_sales: 2,
        };

        let summary = InfoFileGenerator::new(dir.path(), Some(1))
            .generate(&config)
            .unwrap();

        assert_eq!(summary.sales_files.len(), 4);
        for path in &summary.sales_files {
            let content = fs::read_to_string(path).unwrap();
            assert_eq!(content.lines().count(), 3);
        }
    }

    #[rstest]
    #[case::no_products(GeneratorConfig { products: 0, ..GeneratorConfig::default() })]
    #[case::no_sellers(GeneratorConfig { sellers: 0, ..GeneratorConfig::default() })]
    #[case::more_sellers_than_keys(
        GeneratorConfig { sellers: MAX_SELLERS as usize + 1, ..GeneratorConfig::default() }
    )]
    #[case::no_sales(GeneratorConfig { min_sales: 0, ..GeneratorConfig::default() })]
    #[case::inverted_range(GeneratorConfig { min_sales: 9, max_sales: 3, ..GeneratorConfig::default() })]
    fn test_generate_rejects_invalid_config(#[case] config: GeneratorConfig) {
        let dir = tempdir().unwrap();
        let result = InfoFileGenerator::new(dir.path(), Some(1)).generate(&config);

        assert!(matches!(result, Err(SalesError::InvalidArgument { .. })));
        assert!(!dir.path().join(PRODUCTS_FILE).exists());
    }

    #[test]
    fn test_roster_larger_than_key_space_is_rejected() {
        let dir = tempdir().unwrap();
        let mut generator = InfoFileGenerator::new(dir.path(), Some(1));

        let result = generator.create_sales_man_info_file(MAX_SELLERS as usize + 1);

        assert!(matches!(result, Err(SalesError::InvalidArgument { .. })));
        assert!(!dir.path().join(SELLERS_FILE).exists());
    }

    #[test]
    fn test_sales_file_requires_products() {
        let dir = tempdir().unwrap();
        let mut generator = InfoFileGenerator::new(dir.path(), None);
        let result = generator.create_sales_men_file(&SellerKey::new("CC", "1"), 3, &[]);
        assert!(matches!(result, Err(SalesError::InvalidArgument { .. })));
    }
}
