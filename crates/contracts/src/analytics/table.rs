use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role of a column in an aggregated table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// Grouping (dimension) column
    Grouping,
    /// Aggregated (measure) column
    Aggregated,
}

/// Column header information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnHeader {
    /// Column identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Column role
    pub column_type: ColumnType,
}

impl ColumnHeader {
    pub fn grouping(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            column_type: ColumnType::Grouping,
        }
    }

    pub fn aggregated(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            column_type: ColumnType::Aggregated,
        }
    }
}

/// Value in a table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Text value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Integer value
    Integer(i64),
    /// Absent value (e.g., an unmatched join)
    Null,
}

impl CellValue {
    /// Numeric view of the cell, `None` for text and null cells
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Text(_) | CellValue::Null => None,
        }
    }

    /// Display representation for tabular output
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format!("{n}"),
            CellValue::Integer(i) => format!("{i}"),
            CellValue::Null => String::new(),
        }
    }
}

/// A single row of an aggregated table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Values by column ID
    pub values: HashMap<String, CellValue>,
}

/// Result of a group-by/reduce computation: column headers plus rows of
/// cell values keyed by column ID. Consumed as-is by chart specifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedTable {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<TableRow>,
}

impl AggregatedTable {
    pub fn new(columns: Vec<ColumnHeader>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row from (column id, value) pairs
    pub fn push_row(&mut self, cells: Vec<(&str, CellValue)>) {
        let values = cells
            .into_iter()
            .map(|(id, value)| (id.to_string(), value))
            .collect();
        self.rows.push(TableRow { values });
    }

    /// Convenience constructor for the common dimension/measure shape:
    /// one grouping column and one aggregated column.
    pub fn two_columns(
        x: (&str, &str),
        y: (&str, &str),
        rows: impl IntoIterator<Item = (CellValue, CellValue)>,
    ) -> Self {
        let mut table = Self::new(vec![
            ColumnHeader::grouping(x.0, x.1),
            ColumnHeader::aggregated(y.0, y.1),
        ]);
        for (key, value) in rows {
            table.push_row(vec![(x.0, key), (y.0, value)]);
        }
        table
    }
}
