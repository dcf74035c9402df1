mod builder;
mod summary;

pub use builder::{
    build_report, end_of_day_report, inventory_report, low_stock_report, transaction_report,
    valuation_report,
};
pub use summary::{summarize, DashboardSummary};

use std::fmt;

/// A single value in a report row
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    /// Raw decimal, shortest form (`10`, `12.5`)
    Number(f64),
    /// Fixed two decimal places
    Money(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn blank() -> Self {
        Cell::Text(String::new())
    }

    pub fn or_na(value: Option<&str>) -> Self {
        Cell::text(value.unwrap_or("N/A"))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Integer(n) => write!(f, "{n}"),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Money(n) => {
                let text = format!("{n:.2}");
                // negatives that round to zero print unsigned
                if text == "-0.00" {
                    write!(f, "0.00")
                } else {
                    write!(f, "{text}")
                }
            }
        }
    }
}

/// The exportable reports, each with a fixed column schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportKind {
    Inventory,
    LowStock,
    Transactions,
    Valuation,
    EndOfDay,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::Inventory,
        ReportKind::LowStock,
        ReportKind::Transactions,
        ReportKind::Valuation,
        ReportKind::EndOfDay,
    ];

    /// Base name of the exported file
    pub fn report_id(self) -> &'static str {
        match self {
            ReportKind::Inventory => "inventory_report",
            ReportKind::LowStock => "low_stock_report",
            ReportKind::Transactions => "transaction_report",
            ReportKind::Valuation => "valuation_report",
            ReportKind::EndOfDay => "end_of_day_report",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Inventory => "Inventory report",
            ReportKind::LowStock => "Low stock report",
            ReportKind::Transactions => "Transaction report",
            ReportKind::Valuation => "Valuation report",
            ReportKind::EndOfDay => "End of day report",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            ReportKind::Inventory => &[
                "SKU",
                "Name",
                "Category",
                "Quantity",
                "Unit",
                "Unit Cost",
                "Selling Price",
                "Total Value",
                "Reorder Level",
                "Location",
                "Status",
            ],
            ReportKind::LowStock => &[
                "SKU",
                "Name",
                "Category",
                "Current Quantity",
                "Reorder Level",
                "Units Below Reorder",
                "Unit",
                "Supplier",
                "Location",
            ],
            ReportKind::Transactions => &["Date", "Product", "Type", "Quantity", "User", "Reason"],
            ReportKind::Valuation => &[
                "SKU",
                "Name",
                "Category",
                "Quantity",
                "Unit Cost",
                "Stock Value",
                "Potential Revenue",
                "Potential Profit",
            ],
            ReportKind::EndOfDay => &[
                "Product",
                "Transactions",
                "Inbound",
                "Outbound",
                "Adjustments",
                "Net Change",
            ],
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Rows of one report, each aligned with `kind.columns()`
#[derive(Debug, Clone)]
pub struct Report {
    pub kind: ReportKind,
    pub rows: Vec<Vec<Cell>>,
}

impl Report {
    pub fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.kind.columns()
    }

    pub fn push(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.kind.columns().len());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Look up a cell by row index and column label
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.columns().iter().position(|c| *c == column)?;
        self.rows.get(row)?.get(idx)
    }
}
