use chrono::{Local, NaiveDate};
use log::debug;

use super::{Cell, Report, ReportKind};
use crate::config::{Product, StockTransaction, TransactionType};
use crate::store::Snapshot;

/// Build any report from a loaded snapshot. `today` only matters for the
/// end-of-day report.
pub fn build_report(kind: ReportKind, snapshot: &Snapshot, today: NaiveDate) -> Report {
    let report = match kind {
        ReportKind::Inventory => inventory_report(snapshot.products()),
        ReportKind::LowStock => low_stock_report(snapshot.products()),
        ReportKind::Transactions => transaction_report(snapshot.transactions()),
        ReportKind::Valuation => valuation_report(snapshot.products()),
        ReportKind::EndOfDay => end_of_day_report(snapshot.transactions(), today),
    };
    debug!("built {} with {} rows", kind.report_id(), report.len());
    report
}

/// One row per product, in input order
pub fn inventory_report(products: &[Product]) -> Report {
    let mut report = Report::new(ReportKind::Inventory);
    for p in products {
        report.push(vec![
            Cell::text(&p.sku),
            Cell::text(&p.name),
            Cell::text(&p.category_name),
            Cell::Integer(p.quantity),
            Cell::text(&p.unit),
            Cell::Number(p.unit_cost),
            Cell::Number(p.selling_price),
            Cell::Money(p.stock_value()),
            Cell::Integer(p.reorder_level),
            Cell::text(&p.location),
            Cell::text(p.status.to_string()),
        ]);
    }
    report
}

/// Active products at or below their reorder level
pub fn low_stock_report(products: &[Product]) -> Report {
    let mut report = Report::new(ReportKind::LowStock);
    for p in products
        .iter()
        .filter(|p| p.at_or_below_reorder() && p.is_active())
    {
        report.push(vec![
            Cell::text(&p.sku),
            Cell::text(&p.name),
            Cell::text(&p.category_name),
            Cell::Integer(p.quantity),
            Cell::Integer(p.reorder_level),
            Cell::Integer(p.reorder_level - p.quantity),
            Cell::text(&p.unit),
            Cell::or_na(p.supplier.as_deref()),
            Cell::text(&p.location),
        ]);
    }
    report
}

/// One row per transaction, dates rendered in local time
pub fn transaction_report(transactions: &[StockTransaction]) -> Report {
    let mut report = Report::new(ReportKind::Transactions);
    for t in transactions {
        let date = t
            .transaction_date
            .with_timezone(&Local)
            .format("%m/%d/%Y %I:%M:%S %p")
            .to_string();
        report.push(vec![
            Cell::Text(date),
            Cell::text(&t.product_name),
            Cell::text(t.transaction_type.to_string()),
            Cell::Integer(t.quantity),
            Cell::text(&t.user_name),
            Cell::or_na(t.reason.as_deref()),
        ]);
    }
    report
}

/// Per-product value lines followed by a TOTAL line. Never empty.
pub fn valuation_report(products: &[Product]) -> Report {
    let mut report = Report::new(ReportKind::Valuation);
    let mut total_value = 0.0;
    let mut total_revenue = 0.0;

    for p in products {
        let value = p.stock_value();
        let revenue = p.potential_revenue();
        total_value += value;
        total_revenue += revenue;

        report.push(vec![
            Cell::text(&p.sku),
            Cell::text(&p.name),
            Cell::text(&p.category_name),
            Cell::Integer(p.quantity),
            Cell::Number(p.unit_cost),
            Cell::Money(value),
            Cell::Money(revenue),
            Cell::Money(p.quantity as f64 * (p.selling_price - p.unit_cost)),
        ]);
    }

    report.push(vec![
        Cell::blank(),
        Cell::blank(),
        Cell::blank(),
        Cell::text("TOTAL"),
        Cell::blank(),
        Cell::Money(total_value),
        Cell::Money(total_revenue),
        Cell::Money(total_revenue - total_value),
    ]);
    report
}

#[derive(Default)]
struct DayTally {
    count: i64,
    inbound: i64,
    outbound: i64,
    adjustments: i64,
}

/// Movements on `day` (local calendar day), one line per product in order
/// of first appearance
pub fn end_of_day_report(transactions: &[StockTransaction], day: NaiveDate) -> Report {
    let mut tallies: Vec<(&str, DayTally)> = Vec::new();

    for t in transactions.iter().filter(|t| t.local_date() == day) {
        let idx = match tallies.iter().position(|(name, _)| *name == t.product_name) {
            Some(idx) => idx,
            None => {
                tallies.push((t.product_name.as_str(), DayTally::default()));
                tallies.len() - 1
            }
        };
        let tally = &mut tallies[idx].1;
        tally.count += 1;
        match t.transaction_type {
            TransactionType::Inbound => tally.inbound += t.quantity,
            TransactionType::Outbound => tally.outbound += t.quantity,
            TransactionType::Adjustment => tally.adjustments += t.quantity,
            // counted, but unknown movements don't move stock
            TransactionType::Other(_) => {}
        }
    }

    let mut report = Report::new(ReportKind::EndOfDay);
    for (name, tally) in tallies {
        report.push(vec![
            Cell::text(name),
            Cell::Integer(tally.count),
            Cell::Integer(tally.inbound),
            Cell::Integer(tally.outbound),
            Cell::Integer(tally.adjustments),
            Cell::Integer(tally.inbound - tally.outbound + tally.adjustments),
        ]);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProductStatus;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    fn product(sku: &str, quantity: i64, cost: f64, price: f64, reorder: i64) -> Product {
        Product {
            sku: sku.to_string(),
            name: format!("Product {sku}"),
            category_name: "General".to_string(),
            quantity,
            unit: "pcs".to_string(),
            unit_cost: cost,
            selling_price: price,
            reorder_level: reorder,
            location: "A".to_string(),
            supplier: None,
            status: ProductStatus::Active,
        }
    }

    fn at(hour: u32) -> DateTime<FixedOffset> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0)
            .unwrap()
            .fixed_offset()
    }

    fn tx(
        name: &str,
        kind: TransactionType,
        quantity: i64,
        when: DateTime<FixedOffset>,
    ) -> StockTransaction {
        StockTransaction {
            transaction_date: when,
            product_name: name.to_string(),
            transaction_type: kind,
            quantity,
            user_name: "sam".to_string(),
            reason: None,
        }
    }

    fn text(report: &Report, row: usize, column: &str) -> String {
        report.cell(row, column).unwrap().to_string()
    }

    #[test]
    fn inventory_has_one_row_per_product_in_order() {
        let products = vec![
            product("B2", 3, 1.25, 2.0, 1),
            product("A1", 7, 10.0, 15.0, 10),
        ];
        let report = inventory_report(&products);

        assert_eq!(report.len(), 2);
        assert_eq!(text(&report, 0, "SKU"), "B2");
        assert_eq!(text(&report, 0, "Total Value"), "3.75");
        assert_eq!(text(&report, 1, "SKU"), "A1");
        assert_eq!(text(&report, 1, "Unit Cost"), "10");
        assert_eq!(text(&report, 1, "Total Value"), "70.00");
        assert_eq!(text(&report, 1, "Status"), "Active");
    }

    #[test]
    fn low_stock_filters_active_at_or_below_reorder() {
        let mut inactive = product("C3", 0, 1.0, 1.0, 5);
        inactive.status = ProductStatus::Inactive;
        let mut supplied = product("D4", 5, 1.0, 1.0, 5);
        supplied.supplier = Some("Acme".to_string());

        let products = vec![
            product("A1", 5, 10.0, 15.0, 10),
            product("B2", 11, 1.0, 1.0, 10),
            inactive,
            supplied,
        ];
        let report = low_stock_report(&products);

        assert_eq!(report.len(), 2);
        assert_eq!(text(&report, 0, "SKU"), "A1");
        assert_eq!(text(&report, 0, "Units Below Reorder"), "5");
        assert_eq!(text(&report, 0, "Supplier"), "N/A");
        assert_eq!(text(&report, 1, "SKU"), "D4");
        assert_eq!(text(&report, 1, "Units Below Reorder"), "0");
        assert_eq!(text(&report, 1, "Supplier"), "Acme");
    }

    #[test]
    fn transaction_report_defaults_missing_reason() {
        let mut with_reason = tx("Widget", TransactionType::Inbound, 4, at(9));
        with_reason.reason = Some("restock".to_string());
        let without_reason = tx("Widget", TransactionType::Outbound, 1, at(10));
        let report = transaction_report(&[with_reason, without_reason]);

        assert_eq!(report.len(), 2);
        assert_eq!(text(&report, 0, "Reason"), "restock");
        assert_eq!(text(&report, 1, "Reason"), "N/A");
        assert_eq!(text(&report, 1, "Type"), "outbound");
        let expected = at(10)
            .with_timezone(&Local)
            .format("%m/%d/%Y %I:%M:%S %p")
            .to_string();
        assert_eq!(text(&report, 1, "Date"), expected);
    }

    #[test]
    fn transaction_report_exports_type_as_stored() {
        let file: crate::config::TransactionFile = toml::from_str(
            r#"[[transactions]]
transaction_date = "2026-01-10T09:30:00+00:00"
product_name = "Widget"
transaction_type = "IN"
quantity = 3
user_name = "alex"

[[transactions]]
transaction_date = "2026-01-10T10:30:00+00:00"
product_name = "Widget"
transaction_type = "outbound"
quantity = 1
user_name = "alex"
"#,
        )
        .unwrap();

        let csv = crate::export::to_csv(&transaction_report(&file.transactions)).unwrap();
        let types: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(2).unwrap())
            .collect();
        assert_eq!(types, ["IN", "outbound"]);
    }

    #[test]
    fn end_of_day_does_not_guess_unknown_types() {
        let day = at(12).with_timezone(&Local).date_naive();
        let transactions = vec![
            tx("Widget", TransactionType::from("IN".to_string()), 10, at(12)),
            tx("Widget", TransactionType::Inbound, 4, at(12)),
        ];
        let report = end_of_day_report(&transactions, day);

        assert_eq!(text(&report, 0, "Transactions"), "2");
        assert_eq!(text(&report, 0, "Inbound"), "4");
        assert_eq!(text(&report, 0, "Net Change"), "4");
    }

    #[test]
    fn valuation_appends_total_row() {
        let report = valuation_report(&[product("A1", 5, 10.0, 15.0, 10)]);

        assert_eq!(report.len(), 2);
        assert_eq!(text(&report, 0, "Potential Profit"), "25.00");
        assert_eq!(text(&report, 1, "Quantity"), "TOTAL");
        assert_eq!(text(&report, 1, "SKU"), "");
        assert_eq!(text(&report, 1, "Unit Cost"), "");
        assert_eq!(text(&report, 1, "Stock Value"), "50.00");
        assert_eq!(text(&report, 1, "Potential Revenue"), "75.00");
        assert_eq!(text(&report, 1, "Potential Profit"), "25.00");
    }

    #[test]
    fn valuation_total_sums_product_rows() {
        let products = vec![
            product("A1", 5, 10.0, 15.0, 10),
            product("B2", 4, 2.5, 3.0, 1),
            product("C3", 0, 99.0, 120.0, 1),
        ];
        let report = valuation_report(&products);
        assert_eq!(report.len(), products.len() + 1);

        let last = report.len() - 1;
        let sum: f64 = (0..last)
            .map(|i| text(&report, i, "Stock Value").parse::<f64>().unwrap())
            .sum();
        let total: f64 = text(&report, last, "Stock Value").parse().unwrap();
        assert!((sum - total).abs() < 1e-9);

        let revenue: f64 = text(&report, last, "Potential Revenue").parse().unwrap();
        let profit: f64 = text(&report, last, "Potential Profit").parse().unwrap();
        assert!((revenue - total - profit).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs() {
        assert!(inventory_report(&[]).is_empty());
        assert!(low_stock_report(&[]).is_empty());
        assert!(transaction_report(&[]).is_empty());

        let valuation = valuation_report(&[]);
        assert_eq!(valuation.len(), 1);
        assert_eq!(text(&valuation, 0, "Stock Value"), "0.00");
        assert_eq!(text(&valuation, 0, "Potential Revenue"), "0.00");
        assert_eq!(text(&valuation, 0, "Potential Profit"), "0.00");
    }

    #[test]
    fn end_of_day_groups_todays_movements() {
        let day = at(12).with_timezone(&Local).date_naive();
        let yesterday = at(12) - chrono::Duration::days(1);
        let transactions = vec![
            tx("Widget", TransactionType::Inbound, 10, at(12)),
            tx("Gadget", TransactionType::Outbound, 2, at(12)),
            tx("Widget", TransactionType::Outbound, 3, at(12)),
            tx("Widget", TransactionType::Adjustment, -1, at(12)),
            tx("Widget", TransactionType::Inbound, 50, yesterday),
        ];
        let report = end_of_day_report(&transactions, day);

        assert_eq!(report.len(), 2);
        assert_eq!(text(&report, 0, "Product"), "Widget");
        assert_eq!(text(&report, 0, "Transactions"), "3");
        assert_eq!(text(&report, 0, "Inbound"), "10");
        assert_eq!(text(&report, 0, "Outbound"), "3");
        assert_eq!(text(&report, 0, "Net Change"), "6");
        assert_eq!(text(&report, 1, "Product"), "Gadget");
        assert_eq!(text(&report, 1, "Net Change"), "-2");
    }

    #[test]
    fn build_report_dispatches_by_kind() {
        let snapshot = Snapshot::new(vec![product("A1", 5, 10.0, 15.0, 10)], Vec::new());
        let today = Local::now().date_naive();

        assert_eq!(build_report(ReportKind::Inventory, &snapshot, today).len(), 1);
        assert_eq!(build_report(ReportKind::Valuation, &snapshot, today).len(), 2);
        assert!(build_report(ReportKind::Transactions, &snapshot, today).is_empty());
        assert!(build_report(ReportKind::EndOfDay, &snapshot, today).is_empty());
    }
}
