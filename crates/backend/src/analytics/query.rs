use std::collections::HashMap;

use contracts::analytics::{
    AggregateRequest, AggregateResponse, AggregatedTable, CellValue, ColumnHeader, FieldDef,
    Reduce, TableSchema, TableSchemaOwned, ValueType,
};
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::datasets::Dataset;

use super::{aggregate, derive};

/// Per-aggregation failures are local: a bad request reports which
/// aggregation failed and never aborts sibling aggregations.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unknown table '{0}'")]
    UnknownTable(String),
    #[error("unknown field '{field}' on table '{table}'")]
    UnknownField { table: String, field: String },
    #[error("field '{field}' on table '{table}' cannot be used as a group key")]
    NotGroupable { table: String, field: String },
    #[error("field '{field}' on table '{table}' is not an aggregatable numeric field")]
    NotNumeric { table: String, field: String },
    #[error("bad filter expression '{0}', expected field=value")]
    BadFilter(String),
}

/// Dynamic view over one dataset table: group keys and numeric measures
/// addressed by field ID. Rows whose group key is absent are skipped,
/// matching the dropna behavior of a group-by over a nullable column.
struct TableDef {
    schema: TableSchema,
    len: fn(&Dataset) -> usize,
    /// Group key of row `i` for a field, `None` when the value is absent
    key: fn(&Dataset, usize, &str) -> Option<String>,
    /// Numeric measure of row `i` for a field, `None` when absent
    number: fn(&Dataset, usize, &str) -> Option<f64>,
}

const fn text_dim(id: &'static str, name: &'static str) -> FieldDef {
    FieldDef {
        id,
        name,
        value_type: ValueType::Text,
        can_group: true,
        can_aggregate: false,
    }
}

const fn numeric_measure(id: &'static str, name: &'static str) -> FieldDef {
    FieldDef {
        id,
        name,
        value_type: ValueType::Numeric,
        can_group: false,
        can_aggregate: true,
    }
}

static ORDERS_FIELDS: &[FieldDef] = &[
    text_dim("order_status", "Order status"),
    text_dim("customer_id", "Customer"),
    FieldDef {
        id: "purchase_date",
        name: "Purchase date",
        value_type: ValueType::Date,
        can_group: true,
        can_aggregate: false,
    },
    FieldDef {
        id: "purchase_hour",
        name: "Purchase hour",
        value_type: ValueType::Integer,
        can_group: true,
        can_aggregate: false,
    },
    text_dim("purchase_month", "Purchase month"),
    numeric_measure("delivery_time_days", "Delivery time (days)"),
];

static ORDER_ITEMS_FIELDS: &[FieldDef] = &[
    text_dim("order_id", "Order"),
    text_dim("product_id", "Product"),
    text_dim("seller_id", "Seller"),
    numeric_measure("price", "Price"),
    numeric_measure("freight_value", "Freight value"),
];

static PRODUCTS_FIELDS: &[FieldDef] = &[
    text_dim("product_category_name", "Category"),
    numeric_measure("product_weight_g", "Weight (g)"),
];

static CUSTOMERS_FIELDS: &[FieldDef] = &[
    text_dim("customer_state", "State"),
    text_dim("customer_city", "City"),
];

static PAYMENTS_FIELDS: &[FieldDef] = &[
    text_dim("order_id", "Order"),
    text_dim("payment_type", "Payment type"),
    numeric_measure("payment_installments", "Installments"),
    numeric_measure("payment_value", "Payment value"),
];

static REVIEWS_FIELDS: &[FieldDef] = &[
    text_dim("order_id", "Order"),
    FieldDef {
        id: "review_score",
        name: "Review score",
        value_type: ValueType::Integer,
        can_group: true,
        can_aggregate: true,
    },
];

static SELLERS_FIELDS: &[FieldDef] = &[
    text_dim("seller_state", "State"),
    text_dim("seller_city", "City"),
];

static TRANSLATION_FIELDS: &[FieldDef] = &[
    text_dim("product_category_name", "Category"),
    text_dim("product_category_name_english", "Category (english)"),
];

static GEOLOCATION_FIELDS: &[FieldDef] = &[
    text_dim("geolocation_state", "State"),
    text_dim("geolocation_city", "City"),
    numeric_measure("geolocation_lat", "Latitude"),
    numeric_measure("geolocation_lng", "Longitude"),
];

fn orders_key(ds: &Dataset, i: usize, field: &str) -> Option<String> {
    let o = &ds.orders[i];
    match field {
        "order_status" => Some(o.order_status.clone()),
        "customer_id" => Some(o.customer_id.clone()),
        "purchase_date" => derive::purchase_date(o).map(|d| d.to_string()),
        "purchase_hour" => derive::purchase_hour(o).map(|h| h.to_string()),
        "purchase_month" => derive::purchase_month(o),
        _ => None,
    }
}

fn orders_number(ds: &Dataset, i: usize, field: &str) -> Option<f64> {
    match field {
        "delivery_time_days" => derive::delivery_time_days(&ds.orders[i]),
        _ => None,
    }
}

fn items_key(ds: &Dataset, i: usize, field: &str) -> Option<String> {
    let it = &ds.order_items[i];
    match field {
        "order_id" => Some(it.order_id.clone()),
        "product_id" => Some(it.product_id.clone()),
        "seller_id" => Some(it.seller_id.clone()),
        _ => None,
    }
}

fn items_number(ds: &Dataset, i: usize, field: &str) -> Option<f64> {
    let it = &ds.order_items[i];
    match field {
        "price" => Some(it.price),
        "freight_value" => Some(it.freight_value),
        _ => None,
    }
}

fn products_key(ds: &Dataset, i: usize, field: &str) -> Option<String> {
    match field {
        "product_category_name" => ds.products[i].product_category_name.clone(),
        _ => None,
    }
}

fn products_number(ds: &Dataset, i: usize, field: &str) -> Option<f64> {
    match field {
        "product_weight_g" => ds.products[i].product_weight_g,
        _ => None,
    }
}

fn customers_key(ds: &Dataset, i: usize, field: &str) -> Option<String> {
    let c = &ds.customers[i];
    match field {
        "customer_state" => Some(c.customer_state.clone()),
        "customer_city" => Some(c.customer_city.clone()),
        _ => None,
    }
}

fn payments_key(ds: &Dataset, i: usize, field: &str) -> Option<String> {
    let p = &ds.order_payments[i];
    match field {
        "order_id" => Some(p.order_id.clone()),
        "payment_type" => Some(p.payment_type.clone()),
        _ => None,
    }
}

fn payments_number(ds: &Dataset, i: usize, field: &str) -> Option<f64> {
    let p = &ds.order_payments[i];
    match field {
        "payment_installments" => Some(p.payment_installments as f64),
        "payment_value" => Some(p.payment_value),
        _ => None,
    }
}

fn reviews_key(ds: &Dataset, i: usize, field: &str) -> Option<String> {
    let r = &ds.order_reviews[i];
    match field {
        "order_id" => Some(r.order_id.clone()),
        "review_score" => Some(r.review_score.to_string()),
        _ => None,
    }
}

fn reviews_number(ds: &Dataset, i: usize, field: &str) -> Option<f64> {
    match field {
        "review_score" => Some(ds.order_reviews[i].review_score as f64),
        _ => None,
    }
}

fn sellers_key(ds: &Dataset, i: usize, field: &str) -> Option<String> {
    let s = &ds.sellers[i];
    match field {
        "seller_state" => Some(s.seller_state.clone()),
        "seller_city" => Some(s.seller_city.clone()),
        _ => None,
    }
}

fn translation_key(ds: &Dataset, i: usize, field: &str) -> Option<String> {
    let t = &ds.category_translation[i];
    match field {
        "product_category_name" => Some(t.product_category_name.clone()),
        "product_category_name_english" => Some(t.product_category_name_english.clone()),
        _ => None,
    }
}

fn geolocation_key(ds: &Dataset, i: usize, field: &str) -> Option<String> {
    let g = &ds.geolocation[i];
    match field {
        "geolocation_state" => Some(g.geolocation_state.clone()),
        "geolocation_city" => Some(g.geolocation_city.clone()),
        _ => None,
    }
}

fn geolocation_number(ds: &Dataset, i: usize, field: &str) -> Option<f64> {
    let g = &ds.geolocation[i];
    match field {
        "geolocation_lat" => Some(g.geolocation_lat),
        "geolocation_lng" => Some(g.geolocation_lng),
        _ => None,
    }
}

fn no_number(_: &Dataset, _: usize, _: &str) -> Option<f64> {
    None
}

static TABLES: Lazy<HashMap<&'static str, TableDef>> = Lazy::new(|| {
    let mut tables = HashMap::new();
    let mut register = |def: TableDef| {
        tables.insert(def.schema.id, def);
    };
    register(TableDef {
        schema: TableSchema { id: "orders", name: "Orders", fields: ORDERS_FIELDS },
        len: |ds| ds.orders.len(),
        key: orders_key,
        number: orders_number,
    });
    register(TableDef {
        schema: TableSchema { id: "order_items", name: "Order items", fields: ORDER_ITEMS_FIELDS },
        len: |ds| ds.order_items.len(),
        key: items_key,
        number: items_number,
    });
    register(TableDef {
        schema: TableSchema { id: "products", name: "Products", fields: PRODUCTS_FIELDS },
        len: |ds| ds.products.len(),
        key: products_key,
        number: products_number,
    });
    register(TableDef {
        schema: TableSchema { id: "customers", name: "Customers", fields: CUSTOMERS_FIELDS },
        len: |ds| ds.customers.len(),
        key: customers_key,
        number: no_number,
    });
    register(TableDef {
        schema: TableSchema { id: "order_payments", name: "Order payments", fields: PAYMENTS_FIELDS },
        len: |ds| ds.order_payments.len(),
        key: payments_key,
        number: payments_number,
    });
    register(TableDef {
        schema: TableSchema { id: "order_reviews", name: "Order reviews", fields: REVIEWS_FIELDS },
        len: |ds| ds.order_reviews.len(),
        key: reviews_key,
        number: reviews_number,
    });
    register(TableDef {
        schema: TableSchema { id: "sellers", name: "Sellers", fields: SELLERS_FIELDS },
        len: |ds| ds.sellers.len(),
        key: sellers_key,
        number: no_number,
    });
    register(TableDef {
        schema: TableSchema {
            id: "category_translation",
            name: "Category translation",
            fields: TRANSLATION_FIELDS,
        },
        len: |ds| ds.category_translation.len(),
        key: translation_key,
        number: no_number,
    });
    register(TableDef {
        schema: TableSchema { id: "geolocation", name: "Geolocation", fields: GEOLOCATION_FIELDS },
        len: |ds| ds.geolocation.len(),
        key: geolocation_key,
        number: geolocation_number,
    });
    tables
});

/// Owned schemas of every queryable table, for API listings
pub fn table_schemas() -> Vec<TableSchemaOwned> {
    let mut schemas: Vec<TableSchemaOwned> =
        TABLES.values().map(|def| (&def.schema).into()).collect();
    schemas.sort_by(|a, b| a.id.cmp(&b.id));
    schemas
}

fn find_field<'a>(
    def: &'a TableDef,
    table: &str,
    field: &str,
) -> Result<&'a FieldDef, QueryError> {
    def.schema
        .fields
        .iter()
        .find(|f| f.id == field)
        .ok_or_else(|| QueryError::UnknownField {
            table: table.to_string(),
            field: field.to_string(),
        })
}

/// Run one group-by/reduce over a dataset table
pub fn run_aggregate(
    dataset: &Dataset,
    request: &AggregateRequest,
) -> Result<AggregateResponse, QueryError> {
    let def = TABLES
        .get(request.table.as_str())
        .ok_or_else(|| QueryError::UnknownTable(request.table.clone()))?;

    let group_field = find_field(def, &request.table, &request.group_by)?;
    if !group_field.can_group {
        return Err(QueryError::NotGroupable {
            table: request.table.clone(),
            field: request.group_by.clone(),
        });
    }

    if let Some(field) = request.reduce.field() {
        let measure_field = find_field(def, &request.table, field)?;
        if !measure_field.can_aggregate {
            return Err(QueryError::NotNumeric {
                table: request.table.clone(),
                field: field.to_string(),
            });
        }
    }

    let filter = parse_filter(def, &request.table, request.filter.as_deref())?;

    let rows: Vec<usize> = (0..(def.len)(dataset))
        .filter(|&i| match &filter {
            Some((field, value)) => (def.key)(dataset, i, field).as_deref() == Some(value),
            None => true,
        })
        .filter(|&i| (def.key)(dataset, i, &request.group_by).is_some())
        .collect();

    let group_by = request.group_by.as_str();
    let reduced: Vec<(String, CellValue)> = match &request.reduce {
        Reduce::Count => aggregate::count_by(rows.into_iter(), |&i| {
            (def.key)(dataset, i, group_by).unwrap_or_default()
        })
        .into_iter()
        .map(|(k, c)| (k, CellValue::Integer(c as i64)))
        .collect(),
        Reduce::Sum(field) => aggregate::sum_by(
            rows.into_iter(),
            |&i| (def.key)(dataset, i, group_by).unwrap_or_default(),
            |&i| (def.number)(dataset, i, field),
        )
        .into_iter()
        .map(|(k, v)| (k, CellValue::Number(v)))
        .collect(),
        Reduce::Mean(field) => aggregate::mean_by(
            rows.into_iter(),
            |&i| (def.key)(dataset, i, group_by).unwrap_or_default(),
            |&i| (def.number)(dataset, i, field),
        )
        .into_iter()
        .map(|(k, v)| (k, CellValue::Number(v)))
        .collect(),
    };

    let measure_id = request.reduce.measure_id();
    let mut result = AggregatedTable::new(vec![
        ColumnHeader::grouping(group_by, group_field.name),
        ColumnHeader::aggregated(&measure_id, &measure_id),
    ]);
    for (key, value) in reduced {
        result.push_row(vec![(group_by, CellValue::Text(key)), (&measure_id, value)]);
    }

    Ok(AggregateResponse {
        table: request.table.clone(),
        group_by: request.group_by.clone(),
        result,
    })
}

/// Parse the optional "field=value" equality filter; the field must be a
/// groupable dimension of the table.
fn parse_filter(
    def: &TableDef,
    table: &str,
    filter: Option<&str>,
) -> Result<Option<(String, String)>, QueryError> {
    let Some(expr) = filter else {
        return Ok(None);
    };
    let Some((field, value)) = expr.split_once('=') else {
        return Err(QueryError::BadFilter(expr.to_string()));
    };
    let (field, value) = (field.trim(), value.trim());
    if field.is_empty() || value.is_empty() {
        return Err(QueryError::BadFilter(expr.to_string()));
    }
    let field_def = find_field(def, table, field)?;
    if !field_def.can_group {
        return Err(QueryError::NotGroupable {
            table: table.to_string(),
            field: field.to_string(),
        });
    }
    Ok(Some((field.to_string(), value.to_string())))
}
