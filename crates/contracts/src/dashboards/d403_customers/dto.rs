use serde::{Deserialize, Serialize};

use crate::charts::ChartSpec;

/// Review count for one score (1..=5)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewScoreCount {
    pub score: i32,
    pub count: u64,
}

/// Mean review score for one delivery-time bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketScore {
    /// Bucket label, e.g. "0-5 days"
    pub bucket: String,
    pub mean_score: f64,
}

/// Response for the customer satisfaction dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomersResponse {
    /// Score distribution, ascending by score
    pub review_scores: Vec<ReviewScoreCount>,
    /// Mean score per delivery-time bucket, delivered orders only,
    /// in bucket order
    pub delivery_buckets: Vec<BucketScore>,
    pub charts: Vec<ChartSpec>,
}
