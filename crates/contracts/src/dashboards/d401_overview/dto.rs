use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::charts::ChartSpec;

/// Request for the overview dashboard. Absent bounds default to the
/// dataset's own bounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverviewRequest {
    /// Inclusive start of the purchase-date range (YYYY-MM-DD)
    pub date_from: Option<NaiveDate>,
    /// Inclusive end of the purchase-date range (YYYY-MM-DD)
    pub date_to: Option<NaiveDate>,
    /// Inclusive start of the hour-of-day range (0..=23)
    pub hour_from: Option<u32>,
    /// Inclusive end of the hour-of-day range (0..=23)
    pub hour_to: Option<u32>,
}

/// Key performance indicators over the whole snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kpis {
    pub total_orders: u64,
    /// Sum of all payment values
    pub total_revenue: f64,
    /// Distinct buyers by unique customer ID
    pub unique_customers: u64,
    pub unique_products: u64,
    pub unique_sellers: u64,
    /// total_revenue / total_orders, 0 when there are no orders
    pub avg_order_value: f64,
}

/// Orders and revenue for one purchase date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub orders: u64,
    pub revenue: f64,
}

/// Order count for one hour of day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub hour: u32,
    pub orders: u64,
}

/// Response for the overview dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub kpis: Kpis,
    /// Daily orders/revenue within the requested date range, chronological
    pub daily: Vec<DailyPoint>,
    /// Hourly order counts within the requested hour range, by hour
    pub hourly: Vec<HourlyPoint>,
    pub charts: Vec<ChartSpec>,
}
