pub mod config;
pub mod error;
pub mod export;
pub mod report;
pub mod store;

pub use config::{Config, Product, ProductStatus, StockTransaction, TransactionType};
pub use error::{Result, StockError};
pub use export::{export_csv, export_report, to_csv, ConsoleNotifier, Notifier};
pub use report::{build_report, summarize, Cell, DashboardSummary, Report, ReportKind};
pub use store::{DataProvider, Snapshot, TomlStore};
