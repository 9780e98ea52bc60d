use serde::{Deserialize, Serialize};

use super::table::AggregatedTable;

/// Reduce operation applied to each group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "field", rename_all = "snake_case")]
pub enum Reduce {
    /// Number of rows in the group
    Count,
    /// Sum of a numeric field; absent values contribute nothing
    Sum(String),
    /// Mean of a numeric field; absent values are excluded from both the
    /// numerator and the denominator
    Mean(String),
}

impl Reduce {
    /// Parse the CLI form: "count", "sum:field" or "mean:field"
    pub fn parse(spec: &str) -> Option<Reduce> {
        if spec == "count" {
            return Some(Reduce::Count);
        }
        let (op, field) = spec.split_once(':')?;
        if field.is_empty() {
            return None;
        }
        match op {
            "sum" => Some(Reduce::Sum(field.to_string())),
            "mean" => Some(Reduce::Mean(field.to_string())),
            _ => None,
        }
    }

    /// Column ID of the measure in the result table
    pub fn measure_id(&self) -> String {
        match self {
            Reduce::Count => "count".to_string(),
            Reduce::Sum(field) => format!("sum_{field}"),
            Reduce::Mean(field) => format!("mean_{field}"),
        }
    }

    /// The reduced field, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Reduce::Count => None,
            Reduce::Sum(field) | Reduce::Mean(field) => Some(field),
        }
    }
}

/// Request to run one group-by/reduce over a dataset table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRequest {
    /// Table identifier (e.g., "customers")
    pub table: String,
    /// Field to group by
    pub group_by: String,
    /// Reduce operation per group
    pub reduce: Reduce,
    /// Optional equality filter, "field=value"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Result of one group-by/reduce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResponse {
    /// Table that was queried
    pub table: String,
    /// Field the rows were grouped by
    pub group_by: String,
    /// Resulting (group key, reduced value) rows
    pub result: AggregatedTable,
}
