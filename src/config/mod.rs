mod product;
mod settings;
mod transaction;

pub use product::{Product, ProductFile, ProductStatus};
pub use settings::{Config, DisplaySettings, ExportSettings, StoreSettings};
pub use transaction::{StockTransaction, TransactionFile, TransactionType};

use crate::error::{Result, StockError};
use directories::ProjectDirs;
use log::debug;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the data directory path (XDG config dir, or ~/.stockdash/)
pub fn data_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "stockdash") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        StockError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".stockdash"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the export directory; relative paths are anchored at the data dir
pub fn resolve_output_dir(output_dir: &str, data_dir: &Path) -> PathBuf {
    let path = expand_path(output_dir);
    if path.is_absolute() {
        path
    } else {
        data_dir.join(path)
    }
}

fn read_toml<T: DeserializeOwned>(path: PathBuf) -> Result<T> {
    if !path.exists() {
        return Err(StockError::FileNotFound(path));
    }
    debug!("loading {}", path.display());
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| StockError::Parse { path, source: e })
}

/// Load config.toml (defaults if missing)
pub fn load_config(data_dir: &Path) -> Result<Config> {
    let path = data_dir.join("config.toml");
    if !path.exists() {
        debug!("no config.toml in {}, using defaults", data_dir.display());
        return Ok(Config::default());
    }
    read_toml(path)
}

/// Load products.toml in file order
pub fn load_products(data_dir: &Path) -> Result<Vec<Product>> {
    let file: ProductFile = read_toml(data_dir.join("products.toml"))?;
    Ok(file.products)
}

/// Load transactions.toml in file order
pub fn load_transactions(data_dir: &Path) -> Result<Vec<StockTransaction>> {
    let file: TransactionFile = read_toml(data_dir.join("transactions.toml"))?;
    Ok(file.transactions)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[store]
name = "My Store"

[display]
currency_symbol = "$"   # or "R$"

[export]
# Absolute, ~/..., or relative to this directory
output_dir = "exports"
"#;

/// Template content for products.toml
pub const PRODUCTS_TEMPLATE: &str = r#"# One [[products]] table per product. File order is report order.
#
# status is usually "Active" or "Inactive"; supplier is optional.

[[products]]
sku = "WID-001"
name = "Steel Widget"
category_name = "Hardware"
quantity = 120
unit = "pcs"
unit_cost = 2.5
selling_price = 4.0
reorder_level = 50
location = "Aisle 1"
supplier = "Acme Supply"
status = "Active"

[[products]]
sku = "GAD-002"
name = "Brass Gadget"
category_name = "Hardware"
quantity = 8
unit = "pcs"
unit_cost = 12.0
selling_price = 19.9
reorder_level = 10
location = "Aisle 2"
status = "Active"
"#;

/// Template content for transactions.toml
pub const TRANSACTIONS_TEMPLATE: &str = r#"# One [[transactions]] table per stock movement.
#
# transaction_date is an RFC 3339 timestamp, quoted or bare; without an
# offset it is local time. transaction_type is inbound, outbound or
# adjustment (other values are kept as written); reason is optional.

[[transactions]]
transaction_date = "2026-01-10T09:30:00+00:00"
product_name = "Steel Widget"
transaction_type = "inbound"
quantity = 100
user_name = "admin"
reason = "Initial stock"
"#;
