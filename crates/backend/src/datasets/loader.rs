use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Load failures are fatal to the whole dataset: every chart may reference
/// any table, so there is no partial-success mode. The data is static, so
/// neither variant is retried.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A required source file is missing or unreadable
    #[error("table '{table}' unavailable at {path}: {source}")]
    Unavailable {
        table: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A required column is absent or a row has the wrong shape
    #[error("table '{table}' malformed: {detail}")]
    Malformed { table: &'static str, detail: String },
}

/// Read one CSV table into typed records. Strips a UTF-8 BOM if present.
pub(crate) fn read_table<T: DeserializeOwned>(
    dir: &Path,
    table: &'static str,
    file: &str,
) -> Result<Vec<T>, DatasetError> {
    let path = dir.join(file);
    let raw = std::fs::read_to_string(&path).map_err(|source| DatasetError::Unavailable {
        table,
        path: path.clone(),
        source,
    })?;

    let text = raw.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let record: T = result.map_err(|e| DatasetError::Malformed {
            table,
            detail: e.to_string(),
        })?;
        rows.push(record);
    }

    tracing::debug!("loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::records::Order;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "olist-loader-{name}-{}-{:?}",
            std::process::id(),
            std::thread::current().id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    const ORDER_HEADER: &str = "order_id,customer_id,order_status,order_purchase_timestamp,order_approved_at,order_delivered_carrier_date,order_delivered_customer_date,order_estimated_delivery_date";

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = scratch_dir("missing");
        let err = read_table::<Order>(&dir, "orders", "nope.csv").unwrap_err();
        assert!(matches!(err, DatasetError::Unavailable { table: "orders", .. }));
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let dir = scratch_dir("column");
        // no order_status column
        std::fs::write(
            dir.join("orders.csv"),
            "order_id,customer_id\no1,c1\n",
        )
        .unwrap();
        let err = read_table::<Order>(&dir, "orders", "orders.csv").unwrap_err();
        match err {
            DatasetError::Malformed { table, .. } => assert_eq!(table, "orders"),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_lenient_timestamps() {
        let dir = scratch_dir("lenient");
        std::fs::write(
            dir.join("orders.csv"),
            format!(
                "{ORDER_HEADER}\n\
                 o1,c1,delivered,2018-01-01 10:00:00,,not-a-date,2018-01-06 10:00:00,\n"
            ),
        )
        .unwrap();
        let orders = read_table::<Order>(&dir, "orders", "orders.csv").unwrap();
        assert_eq!(orders.len(), 1);
        assert!(orders[0].order_purchase_timestamp.is_some());
        assert!(orders[0].order_approved_at.is_none());
        assert!(orders[0].order_delivered_carrier_date.is_none());
        assert!(orders[0].order_delivered_customer_date.is_some());
    }

    #[test]
    fn test_bom_is_stripped() {
        let dir = scratch_dir("bom");
        std::fs::write(
            dir.join("orders.csv"),
            format!("\u{FEFF}{ORDER_HEADER}\no1,c1,created,,,,,\n"),
        )
        .unwrap();
        let orders = read_table::<Order>(&dir, "orders", "orders.csv").unwrap();
        assert_eq!(orders[0].order_id, "o1");
    }
}
