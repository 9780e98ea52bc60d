pub mod query;
pub mod schema;
pub mod table;

pub use query::{AggregateRequest, AggregateResponse, Reduce};
pub use schema::{FieldDef, FieldDefOwned, TableSchema, TableSchemaOwned, ValueType};
pub use table::{AggregatedTable, CellValue, ColumnHeader, ColumnType, TableRow};
