use chrono::Local;
use clap::{Parser, Subcommand};
use log::debug;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use stockdash::config::{
    data_dir, load_config, resolve_output_dir, CONFIG_TEMPLATE, PRODUCTS_TEMPLATE,
    TRANSACTIONS_TEMPLATE,
};
use stockdash::{
    build_report, export_report, summarize, to_csv, ConsoleNotifier, Notifier, ReportKind,
    Result, Snapshot, StockError, TomlStore,
};

#[derive(Parser)]
#[command(name = "stockdash")]
#[command(version, about = "Inventory dashboard and CSV report exports", long_about = None)]
struct Cli {
    /// Path to data directory (default: XDG config dir or ~/.stockdash)
    #[arg(short = 'C', long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data directory with template files
    Init,

    /// Show dashboard summary cards
    Summary {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List products
    Products,

    /// List stock transactions, newest first
    Transactions {
        /// Number of transactions to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export one report as CSV
    Export {
        /// Report to export
        #[arg(value_enum)]
        report: ReportKind,

        /// Output directory (default: [export].output_dir from config.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print CSV to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Export every report as CSV, skipping empty ones
    ExportAll {
        /// Output directory (default: [export].output_dir from config.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let dir = match cli.data_dir {
        Some(p) => p,
        None => data_dir()?,
    };
    debug!("data directory: {}", dir.display());

    match cli.command {
        Commands::Init => cmd_init(&dir),
        Commands::Summary { json } => cmd_summary(&dir, json),
        Commands::Products => cmd_products(&dir),
        Commands::Transactions { limit } => cmd_transactions(&dir, limit),
        Commands::Export {
            report,
            output,
            stdout,
        } => cmd_export(&dir, report, output, stdout),
        Commands::ExportAll { output } => cmd_export_all(&dir, output),
    }
}

/// Initialize data directory with template files
fn cmd_init(dir: &Path) -> Result<()> {
    use std::fs;

    if dir.exists() {
        return Err(StockError::AlreadyInitialized(dir.to_path_buf()));
    }

    fs::create_dir_all(dir)?;
    fs::write(dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(dir.join("products.toml"), PRODUCTS_TEMPLATE)?;
    fs::write(dir.join("transactions.toml"), TRANSACTIONS_TEMPLATE)?;

    println!("Initialized stockdash data at: {}", dir.display());
    println!();
    println!("Next steps:");
    println!("  1. Add your products:      $EDITOR {}/products.toml", dir.display());
    println!(
        "  2. Record stock movements: $EDITOR {}/transactions.toml",
        dir.display()
    );
    println!();
    println!("Then check the dashboard:");
    println!("  stockdash summary");

    Ok(())
}

fn load_snapshot(dir: &Path) -> Result<Snapshot> {
    if !dir.exists() {
        return Err(StockError::DataDirNotFound(dir.to_path_buf()));
    }
    Snapshot::load(&TomlStore::new(dir))
}

// Table row structs for tabled
#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "METRIC")]
    metric: &'static str,
    #[tabled(rename = "VALUE")]
    value: String,
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "QTY")]
    quantity: String,
    #[tabled(rename = "REORDER")]
    reorder_level: i64,
    #[tabled(rename = "VALUE")]
    value: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "PRODUCT")]
    product: String,
    #[tabled(rename = "TYPE")]
    kind: String,
    #[tabled(rename = "QTY")]
    quantity: i64,
    #[tabled(rename = "USER")]
    user: String,
    #[tabled(rename = "REASON")]
    reason: String,
}

fn format_grouped_int(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// Money with two decimals and thousands separators, e.g. `$1,234.50`
fn format_money(value: f64, currency_symbol: &str) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let grouped = format_grouped_int(whole.parse::<i64>().unwrap_or(0));
    let sign = if value < 0.0 && rounded != "0.00" { "-" } else { "" };
    format!("{sign}{currency_symbol}{grouped}.{frac}")
}

/// Show dashboard summary cards
fn cmd_summary(dir: &Path, json: bool) -> Result<()> {
    let config = load_config(dir)?;
    let snapshot = load_snapshot(dir)?;
    let today = Local::now().date_naive();
    let summary = summarize(snapshot.products(), snapshot.transactions(), today);

    if json {
        let out = serde_json::to_string_pretty(&summary)
            .map_err(|e| StockError::Serialize(e.to_string()))?;
        println!("{out}");
        return Ok(());
    }

    let cards = vec![
        CardRow {
            metric: "Active products",
            value: summary.active_products.to_string(),
        },
        CardRow {
            metric: "Total stock value",
            value: format_money(summary.total_stock_value, &config.display.currency_symbol),
        },
        CardRow {
            metric: "Transactions",
            value: summary.total_transactions.to_string(),
        },
        CardRow {
            metric: "Low stock items",
            value: summary.low_stock_count.to_string(),
        },
        CardRow {
            metric: "Today's transactions",
            value: summary.today_transactions.to_string(),
        },
    ];

    println!("{} Dashboard", config.store.name);
    let table = Table::new(cards).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// List products
fn cmd_products(dir: &Path) -> Result<()> {
    let config = load_config(dir)?;
    let snapshot = load_snapshot(dir)?;

    if snapshot.products().is_empty() {
        println!("No products recorded.");
        println!("Add products to: {}/products.toml", dir.display());
        return Ok(());
    }

    let rows: Vec<ProductRow> = snapshot
        .products()
        .iter()
        .map(|p| ProductRow {
            sku: p.sku.clone(),
            name: p.name.clone(),
            category: p.category_name.clone(),
            quantity: if p.at_or_below_reorder() {
                format!("{} {} (low)", p.quantity, p.unit)
            } else {
                format!("{} {}", p.quantity, p.unit)
            },
            reorder_level: p.reorder_level,
            value: format_money(p.stock_value(), &config.display.currency_symbol),
            status: p.status.to_string(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("Total: {} products", snapshot.products().len());

    Ok(())
}

/// List transactions, newest first
fn cmd_transactions(dir: &Path, limit: Option<usize>) -> Result<()> {
    let snapshot = load_snapshot(dir)?;

    if snapshot.transactions().is_empty() {
        println!("No transactions recorded.");
        return Ok(());
    }

    let shown = limit
        .unwrap_or(usize::MAX)
        .min(snapshot.transactions().len());

    let rows: Vec<TransactionRow> = snapshot
        .transactions()
        .iter()
        .rev()
        .take(shown)
        .enumerate()
        .map(|(idx, t)| TransactionRow {
            index: idx + 1,
            date: t
                .transaction_date
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            product: t.product_name.clone(),
            kind: t.transaction_type.to_string(),
            quantity: t.quantity,
            user: t.user_name.clone(),
            reason: t.reason.clone().unwrap_or_default(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!(
        "Showing {} of {} transactions",
        shown,
        snapshot.transactions().len()
    );

    Ok(())
}

fn output_dir(dir: &Path, output: Option<PathBuf>) -> Result<PathBuf> {
    match output {
        Some(p) => Ok(p),
        None => {
            let config = load_config(dir)?;
            Ok(resolve_output_dir(&config.export.output_dir, dir))
        }
    }
}

/// Export one report as CSV
fn cmd_export(dir: &Path, kind: ReportKind, output: Option<PathBuf>, stdout: bool) -> Result<()> {
    let snapshot = load_snapshot(dir)?;
    let today = Local::now().date_naive();
    let notifier = ConsoleNotifier;

    if stdout {
        let report = build_report(kind, &snapshot, today);
        match to_csv(&report) {
            Ok(csv) => println!("{csv}"),
            Err(e @ StockError::NoData(_)) => notifier.error(&e.to_string()),
            Err(e) => return Err(e),
        }
        return Ok(());
    }

    let out_dir = output_dir(dir, output)?;
    export_report(kind, &snapshot, today, &out_dir, &notifier)?;
    Ok(())
}

/// Export every report as CSV
fn cmd_export_all(dir: &Path, output: Option<PathBuf>) -> Result<()> {
    let snapshot = load_snapshot(dir)?;
    let today = Local::now().date_naive();
    let out_dir = output_dir(dir, output)?;
    let notifier = ConsoleNotifier;

    let mut written = 0;
    for kind in ReportKind::ALL {
        if export_report(kind, &snapshot, today, &out_dir, &notifier)?.is_some() {
            written += 1;
        }
    }

    println!();
    println!(
        "Exported {} of {} reports to {}",
        written,
        ReportKind::ALL.len(),
        out_dir.display()
    );

    Ok(())
}
