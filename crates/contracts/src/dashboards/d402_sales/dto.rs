use serde::{Deserialize, Serialize};

use crate::charts::ChartSpec;

/// Revenue for one year-month ("YYYY-MM")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRevenuePoint {
    pub month: String,
    pub revenue: f64,
}

/// Payment record count for one payment type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTypeCount {
    pub payment_type: String,
    pub count: u64,
}

/// Mean delivery time for one order status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusDeliveryTime {
    pub status: String,
    pub mean_days: f64,
}

/// Share of one order status, in percent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusShare {
    pub status: String,
    pub percent: f64,
}

/// Response for the sales dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesResponse {
    /// Chronological by month
    pub monthly_revenue: Vec<MonthlyRevenuePoint>,
    /// Descending by count
    pub payment_types: Vec<PaymentTypeCount>,
    pub delivery_by_status: Vec<StatusDeliveryTime>,
    pub status_share: Vec<StatusShare>,
    pub charts: Vec<ChartSpec>,
}
