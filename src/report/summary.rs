use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{Product, StockTransaction};

/// Headline numbers shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub active_products: usize,
    pub total_stock_value: f64,
    pub total_transactions: usize,
    /// Products at or below reorder level, any status. Intentionally wider
    /// than the low stock report, which only lists active products.
    pub low_stock_count: usize,
    pub today_transactions: usize,
}

/// Recompute the dashboard cards from the current records. `today` is a
/// local calendar day.
pub fn summarize(
    products: &[Product],
    transactions: &[StockTransaction],
    today: NaiveDate,
) -> DashboardSummary {
    DashboardSummary {
        active_products: products.iter().filter(|p| p.is_active()).count(),
        total_stock_value: products.iter().map(Product::stock_value).sum(),
        total_transactions: transactions.len(),
        low_stock_count: products.iter().filter(|p| p.at_or_below_reorder()).count(),
        today_transactions: transactions
            .iter()
            .filter(|t| t.local_date() == today)
            .count(),
    }
}
