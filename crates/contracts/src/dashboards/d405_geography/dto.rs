use serde::{Deserialize, Serialize};

use crate::charts::ChartSpec;

/// Which point layers to include in the detail map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Both,
    Customers,
    Sellers,
}

/// Request for the geography dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeographyRequest {
    #[serde(default)]
    pub display: DisplayMode,
}

/// Customer/seller presence in one state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateBreakdown {
    pub state: String,
    pub customers: u64,
    pub sellers: u64,
    /// customers / sellers, zero seller counts substituted with 0.1
    pub ratio: f64,
    /// Mean geolocation coordinate for the state, when sampled
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Customer count for one city
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityCount {
    pub city: String,
    pub customers: u64,
}

/// One geocoded sample point for the density map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoSamplePoint {
    pub lat: f64,
    pub lng: f64,
}

/// Response for the geography dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeographyResponse {
    /// Per-state breakdown, descending by customer count
    pub states: Vec<StateBreakdown>,
    /// Top 20 cities by customer count, descending
    pub top_cities: Vec<CityCount>,
    /// Bounded sample of geolocation points for the density map
    pub density_sample: Vec<GeoSamplePoint>,
    pub charts: Vec<ChartSpec>,
}
