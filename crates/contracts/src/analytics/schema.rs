use serde::{Deserialize, Serialize};

/// Value type of a dataset field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    /// Integer type
    Integer,
    /// Numeric type (floating point)
    Numeric,
    /// Text/string type
    Text,
    /// Date type (YYYY-MM-DD)
    Date,
    /// DateTime type (date with time)
    DateTime,
}

/// Definition of a single field in a dataset table (static version for the
/// backend registry)
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Unique field identifier (e.g., "customer_state")
    pub id: &'static str,
    /// Human-readable field name (e.g., "Customer state")
    pub name: &'static str,
    /// Type of the field value
    pub value_type: ValueType,
    /// Can this field be used as a group-by dimension
    pub can_group: bool,
    /// Can this field be aggregated (sum, mean)
    pub can_aggregate: bool,
}

/// Owned version of FieldDef for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefOwned {
    pub id: String,
    pub name: String,
    pub value_type: ValueType,
    pub can_group: bool,
    pub can_aggregate: bool,
}

impl From<&FieldDef> for FieldDefOwned {
    fn from(field: &FieldDef) -> Self {
        Self {
            id: field.id.to_string(),
            name: field.name.to_string(),
            value_type: field.value_type,
            can_group: field.can_group,
            can_aggregate: field.can_aggregate,
        }
    }
}

/// Schema of one dataset table (static version for the backend registry)
#[derive(Debug, Clone)]
pub struct TableSchema {
    /// Unique identifier for the table (e.g., "order_payments")
    pub id: &'static str,
    /// Human-readable name (e.g., "Order payments")
    pub name: &'static str,
    /// Fields addressable by group-by/reduce requests
    pub fields: &'static [FieldDef],
}

/// Owned version of TableSchema for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchemaOwned {
    pub id: String,
    pub name: String,
    pub fields: Vec<FieldDefOwned>,
}

impl From<&TableSchema> for TableSchemaOwned {
    fn from(schema: &TableSchema) -> Self {
        Self {
            id: schema.id.to_string(),
            name: schema.name.to_string(),
            fields: schema.fields.iter().map(|f| f.into()).collect(),
        }
    }
}
