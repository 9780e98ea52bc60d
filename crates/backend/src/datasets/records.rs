use chrono::NaiveDateTime;
use serde::Deserialize;

/// Lenient timestamp parsing: empty or unparsable values become `None`
/// instead of failing the row. A malformed timestamp marks one cell as
/// unknown; it never aborts the load.
pub(crate) mod lenient_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| NaiveDateTime::parse_from_str(s, FORMAT).ok()))
    }
}

/// One purchase transaction (olist_orders_dataset.csv)
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    /// created / approved / shipped / delivered / canceled / ...
    pub order_status: String,
    #[serde(deserialize_with = "lenient_datetime::deserialize")]
    pub order_purchase_timestamp: Option<NaiveDateTime>,
    #[serde(deserialize_with = "lenient_datetime::deserialize")]
    pub order_approved_at: Option<NaiveDateTime>,
    #[serde(deserialize_with = "lenient_datetime::deserialize")]
    pub order_delivered_carrier_date: Option<NaiveDateTime>,
    #[serde(deserialize_with = "lenient_datetime::deserialize")]
    pub order_delivered_customer_date: Option<NaiveDateTime>,
    #[serde(deserialize_with = "lenient_datetime::deserialize")]
    pub order_estimated_delivery_date: Option<NaiveDateTime>,
}

/// One line item within an order (olist_order_items_dataset.csv).
/// Identity is (order_id, order_item_id).
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub order_id: String,
    pub order_item_id: u32,
    pub product_id: String,
    pub seller_id: String,
    pub price: f64,
    pub freight_value: f64,
}

/// A catalog entry (olist_products_dataset.csv)
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub product_category_name: Option<String>,
    pub product_weight_g: Option<f64>,
    pub product_length_cm: Option<f64>,
    pub product_height_cm: Option<f64>,
    pub product_width_cm: Option<f64>,
}

/// A buyer (olist_customers_dataset.csv). `customer_id` is per-order;
/// `customer_unique_id` identifies the person across orders.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub customer_unique_id: String,
    pub customer_city: String,
    pub customer_state: String,
}

/// One payment record against an order (olist_order_payments_dataset.csv).
/// Identity is (order_id, payment_sequential).
#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub order_id: String,
    pub payment_sequential: u32,
    pub payment_type: String,
    pub payment_installments: u32,
    pub payment_value: f64,
}

/// Customer feedback on an order (olist_order_reviews_dataset.csv)
#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub order_id: String,
    /// 1..=5
    pub review_score: i32,
}

/// A vendor (olist_sellers_dataset.csv)
#[derive(Debug, Clone, Deserialize)]
pub struct Seller {
    pub seller_id: String,
    pub seller_city: String,
    pub seller_state: String,
}

/// Category name mapping (product_category_name_translation.csv)
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryTranslation {
    pub product_category_name: String,
    pub product_category_name_english: String,
}

/// A geocoded sample (olist_geolocation_dataset.csv); points are sampled,
/// not unique per city or state
#[derive(Debug, Clone, Deserialize)]
pub struct GeoPoint {
    pub geolocation_lat: f64,
    pub geolocation_lng: f64,
    pub geolocation_city: String,
    pub geolocation_state: String,
}
