use crate::error::{Result, StockError};
use crate::report::Report;

/// Join a report into CSV text: header line from the column schema, then one
/// line per row.
///
/// Values are written as-is. A value containing a comma or newline will
/// shift or split its line; callers own that limitation.
pub fn to_csv(report: &Report) -> Result<String> {
    if report.is_empty() {
        return Err(StockError::NoData(report.kind.title().to_string()));
    }

    let mut lines = Vec::with_capacity(report.len() + 1);
    lines.push(report.columns().join(","));
    for row in &report.rows {
        let values: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        lines.push(values.join(","));
    }
    Ok(lines.join("\n"))
}
