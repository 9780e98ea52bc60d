use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Row count of one loaded table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    pub table: String,
    pub rows: usize,
}

/// Summary of a loaded dataset snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Row counts per table, in load order
    pub tables: Vec<TableSummary>,
    /// Earliest known purchase date
    pub first_purchase: Option<NaiveDate>,
    /// Latest known purchase date
    pub last_purchase: Option<NaiveDate>,
}

impl DatasetSummary {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }
}
