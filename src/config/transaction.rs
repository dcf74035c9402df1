use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Kind of stock movement. Only exact lowercase names map to the known
/// kinds; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Inbound,
    Outbound,
    Adjustment,
    Other(String),
}

impl From<String> for TransactionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "inbound" => TransactionType::Inbound,
            "outbound" => TransactionType::Outbound,
            "adjustment" => TransactionType::Adjustment,
            _ => TransactionType::Other(value),
        }
    }
}

impl From<TransactionType> for String {
    fn from(kind: TransactionType) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Inbound => write!(f, "inbound"),
            TransactionType::Outbound => write!(f, "outbound"),
            TransactionType::Adjustment => write!(f, "adjustment"),
            TransactionType::Other(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StockTransaction {
    /// RFC 3339 timestamp, quoted or as a native TOML datetime. Without an
    /// offset it is taken as local time.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub transaction_date: DateTime<FixedOffset>,
    pub product_name: String,
    pub transaction_type: TransactionType,
    pub quantity: i64,
    pub user_name: String,
    #[serde(default)]
    pub reason: Option<String>,
}

impl StockTransaction {
    /// Calendar day of the transaction in the local time zone
    pub fn local_date(&self) -> NaiveDate {
        self.transaction_date.with_timezone(&Local).date_naive()
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match toml::Value::deserialize(deserializer)? {
        toml::Value::String(s) => s,
        toml::Value::Datetime(dt) => dt.to_string(),
        other => {
            return Err(de::Error::custom(format!(
                "expected a timestamp, found {}",
                other.type_str()
            )))
        }
    };
    parse_timestamp(&raw)
        .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}', expected RFC 3339")))
}

/// On-disk layout of transactions.toml
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct TransactionFile {
    #[serde(default)]
    pub transactions: Vec<StockTransaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transactions_file() {
        let file: TransactionFile = toml::from_str(
            r#"[[transactions]]
transaction_date = "2026-01-10T09:30:00+00:00"
product_name = "Widget"
transaction_type = "outbound"
quantity = 3
user_name = "alex"
"#,
        )
        .unwrap();

        let tx = &file.transactions[0];
        assert_eq!(tx.transaction_type, TransactionType::Outbound);
        assert!(tx.reason.is_none());
        assert_eq!(tx.quantity, 3);
    }

    #[test]
    fn transaction_type_keeps_stored_spelling() {
        assert_eq!(
            TransactionType::from("inbound".to_string()),
            TransactionType::Inbound
        );
        for raw in ["IN", "Inbound", "out", "transfer"] {
            let kind = TransactionType::from(raw.to_string());
            assert_eq!(kind, TransactionType::Other(raw.to_string()));
            assert_eq!(kind.to_string(), raw);
        }
    }

    #[test]
    fn accepts_native_toml_datetime() {
        let file: TransactionFile = toml::from_str(
            r#"[[transactions]]
transaction_date = 2026-01-10T09:30:00Z
product_name = "Widget"
transaction_type = "inbound"
quantity = 3
user_name = "alex"

[[transactions]]
transaction_date = 2026-01-10T09:30:00-03:00
product_name = "Widget"
transaction_type = "inbound"
quantity = 1
user_name = "alex"
"#,
        )
        .unwrap();

        let expected = DateTime::parse_from_rfc3339("2026-01-10T09:30:00Z").unwrap();
        assert_eq!(file.transactions[0].transaction_date, expected);
        let offset = file.transactions[1].transaction_date.offset().local_minus_utc();
        assert_eq!(offset, -3 * 3600);
    }

    #[test]
    fn datetime_without_offset_is_local() {
        let file: TransactionFile = toml::from_str(
            r#"[[transactions]]
transaction_date = 2026-01-10T09:30:00
product_name = "Widget"
transaction_type = "inbound"
quantity = 3
user_name = "alex"
"#,
        )
        .unwrap();

        let tx = &file.transactions[0];
        let local = tx.transaction_date.with_timezone(&Local);
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2026-01-10 09:30");
    }

    #[test]
    fn rejects_non_timestamp_values() {
        let err = toml::from_str::<TransactionFile>(
            r#"[[transactions]]
transaction_date = 42
product_name = "Widget"
transaction_type = "inbound"
quantity = 3
user_name = "alex"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("expected a timestamp"));
    }
}
