use serde::{Deserialize, Serialize};

use crate::charts::ChartSpec;

/// Items sold for one product category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    /// English category name, falling back to the source name when
    /// no translation exists
    pub category: String,
    pub items_sold: u64,
}

/// Mean of a measure (price, weight) for one product category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMean {
    pub category: String,
    pub value: f64,
}

/// Response for the product analysis dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsResponse {
    /// Top 10 categories by items sold, descending
    pub top_categories: Vec<CategoryCount>,
    /// Top 10 categories by mean item price, descending
    pub top_prices: Vec<CategoryMean>,
    /// Top 10 categories by mean product weight (g), descending
    pub top_weights: Vec<CategoryMean>,
    pub charts: Vec<ChartSpec>,
}
