use log::debug;
use std::path::PathBuf;

use crate::config::{load_products, load_transactions, Product, StockTransaction};
use crate::error::Result;

/// Source of product and transaction records.
///
/// Both calls return a full copy of the current records. Reports never write
/// back through a provider.
pub trait DataProvider {
    fn products(&self) -> Result<Vec<Product>>;
    fn transactions(&self) -> Result<Vec<StockTransaction>>;
}

/// Reads products.toml and transactions.toml from a data directory
#[derive(Debug, Clone)]
pub struct TomlStore {
    dir: PathBuf,
}

impl TomlStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DataProvider for TomlStore {
    fn products(&self) -> Result<Vec<Product>> {
        load_products(&self.dir)
    }

    fn transactions(&self) -> Result<Vec<StockTransaction>> {
        load_transactions(&self.dir)
    }
}

/// Records loaded once per command and only read afterwards
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    products: Vec<Product>,
    transactions: Vec<StockTransaction>,
}

impl Snapshot {
    pub fn new(products: Vec<Product>, transactions: Vec<StockTransaction>) -> Self {
        Self {
            products,
            transactions,
        }
    }

    pub fn load(provider: &impl DataProvider) -> Result<Self> {
        let products = provider.products()?;
        let transactions = provider.transactions()?;
        debug!(
            "snapshot loaded: {} products, {} transactions",
            products.len(),
            transactions.len()
        );
        Ok(Self::new(products, transactions))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn transactions(&self) -> &[StockTransaction] {
        &self.transactions
    }
}
