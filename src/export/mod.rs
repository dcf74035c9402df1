mod csv;
mod notify;

pub use self::csv::to_csv;
pub use notify::{ConsoleNotifier, Notifier};

use chrono::NaiveDate;
use log::debug;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, StockError};
use crate::report::{build_report, ReportKind};
use crate::store::Snapshot;

/// `{base}_{YYYY-MM-DD}.csv`
pub fn export_filename(base: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", base, date.format("%Y-%m-%d"))
}

/// Write CSV text to `dir`, creating it if needed. The file is flushed and
/// closed before this returns.
pub fn export_csv(csv: &str, base: &str, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(base, date));

    let mut file = File::create(&path)?;
    file.write_all(csv.as_bytes())?;
    file.flush()?;
    drop(file);

    debug!("wrote {} bytes to {}", csv.len(), path.display());
    Ok(path)
}

/// Build, serialize and write one report, reporting the outcome through
/// `notifier`.
///
/// An empty report is not an error for the caller: it is announced as
/// "no data" and `Ok(None)` is returned with nothing written.
pub fn export_report(
    kind: ReportKind,
    snapshot: &Snapshot,
    today: NaiveDate,
    dir: &Path,
    notifier: &impl Notifier,
) -> Result<Option<PathBuf>> {
    let report = build_report(kind, snapshot, today);
    let csv = match to_csv(&report) {
        Ok(csv) => csv,
        Err(e @ StockError::NoData(_)) => {
            debug!("skipping {}: empty", kind.report_id());
            notifier.error(&e.to_string());
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let path = export_csv(&csv, kind.report_id(), dir, today)?;
    notifier.success(&format!(
        "{} exported successfully: {}",
        kind.title(),
        path.display()
    ));
    Ok(Some(path))
}
