use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a product. Unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum ProductStatus {
    Active,
    Inactive,
    Other(String),
}

impl From<String> for ProductStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Active" => ProductStatus::Active,
            "Inactive" => ProductStatus::Inactive,
            _ => ProductStatus::Other(value),
        }
    }
}

impl From<ProductStatus> for String {
    fn from(status: ProductStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductStatus::Active => write!(f, "Active"),
            ProductStatus::Inactive => write!(f, "Inactive"),
            ProductStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub category_name: String,
    pub quantity: i64,
    pub unit: String,
    pub unit_cost: f64,
    pub selling_price: f64,
    pub reorder_level: i64,
    pub location: String,
    #[serde(default)]
    pub supplier: Option<String>,
    pub status: ProductStatus,
}

impl Product {
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }

    /// At or below the reorder threshold, regardless of status
    pub fn at_or_below_reorder(&self) -> bool {
        self.quantity <= self.reorder_level
    }

    pub fn stock_value(&self) -> f64 {
        self.quantity as f64 * self.unit_cost
    }

    pub fn potential_revenue(&self) -> f64 {
        self.quantity as f64 * self.selling_price
    }
}

/// On-disk layout of products.toml
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ProductFile {
    #[serde(default)]
    pub products: Vec<Product>,
}
