use std::collections::{BTreeSet, HashMap};

use contracts::analytics::{AggregatedTable, CellValue, ColumnHeader};
use contracts::charts::{ChartConfig, ChartKind, ChartSpec};
use contracts::dashboards::d405_geography::{
    CityCount, DisplayMode, GeoSamplePoint, GeographyRequest, GeographyResponse, StateBreakdown,
};

use crate::analytics::aggregate;
use crate::datasets::Dataset;

const TOP_CITIES: usize = 20;
const COMPARISON_STATES: usize = 10;
const DENSITY_SAMPLE: usize = 1_000;

/// Geography dashboard: customer and seller presence per state, their
/// ratio, top cities, and a geolocation density sample.
pub fn get_geography(dataset: &Dataset, request: &GeographyRequest) -> GeographyResponse {
    let customer_counts: HashMap<String, u64> =
        aggregate::count_by(dataset.customers.iter(), |c| c.customer_state.clone())
            .into_iter()
            .collect();
    let seller_counts: HashMap<String, u64> =
        aggregate::count_by(dataset.sellers.iter(), |s| s.seller_state.clone())
            .into_iter()
            .collect();

    // Mean coordinate per state from the geolocation table
    let state_lat: HashMap<String, f64> = aggregate::mean_by(
        dataset.geolocation.iter(),
        |g| g.geolocation_state.clone(),
        |g| Some(g.geolocation_lat),
    )
    .into_iter()
    .collect();
    let state_lng: HashMap<String, f64> = aggregate::mean_by(
        dataset.geolocation.iter(),
        |g| g.geolocation_state.clone(),
        |g| Some(g.geolocation_lng),
    )
    .into_iter()
    .collect();

    // Union of states from both sides, so a seller-only state still
    // appears with zero customers.
    let all_states: BTreeSet<&String> =
        customer_counts.keys().chain(seller_counts.keys()).collect();

    let mut states: Vec<StateBreakdown> = all_states
        .into_iter()
        .map(|state| {
            let customers = customer_counts.get(state).copied().unwrap_or(0);
            let sellers = seller_counts.get(state).copied().unwrap_or(0);
            StateBreakdown {
                state: state.clone(),
                customers,
                sellers,
                ratio: aggregate::ratio_or_epsilon(customers as f64, sellers as f64),
                lat: state_lat.get(state).copied(),
                lng: state_lng.get(state).copied(),
            }
        })
        .collect();
    states.sort_by(|a, b| b.customers.cmp(&a.customers).then(a.state.cmp(&b.state)));

    let top_cities: Vec<CityCount> = aggregate::top_n(
        aggregate::count_by(dataset.customers.iter(), |c| c.customer_city.clone()),
        TOP_CITIES,
    )
    .into_iter()
    .map(|(city, customers)| CityCount { city, customers })
    .collect();

    let density_sample: Vec<GeoSamplePoint> = dataset
        .geolocation
        .iter()
        .take(DENSITY_SAMPLE)
        .map(|g| GeoSamplePoint {
            lat: g.geolocation_lat,
            lng: g.geolocation_lng,
        })
        .collect();

    let mut charts = Vec::new();
    if request.display != DisplayMode::Sellers {
        charts.push(customer_map(&states));
    }
    if request.display != DisplayMode::Customers {
        charts.push(seller_map(&states));
    }
    charts.push(comparison_chart(&states));
    charts.push(ratio_map(&states));
    charts.push(density_chart(&density_sample));

    GeographyResponse {
        states,
        top_cities,
        density_sample,
        charts,
    }
}

fn state_table(states: &[StateBreakdown], id: &str, name: &str, value: impl Fn(&StateBreakdown) -> CellValue) -> AggregatedTable {
    let mut table = AggregatedTable::new(vec![
        ColumnHeader::grouping("state", "State"),
        ColumnHeader::aggregated(id, name),
    ]);
    for s in states {
        table.push_row(vec![
            ("state", CellValue::Text(s.state.clone())),
            (id, value(s)),
        ]);
    }
    table
}

fn customer_map(states: &[StateBreakdown]) -> ChartSpec {
    ChartSpec::new(
        "customers_by_state",
        "Customers by state",
        ChartKind::Choropleth,
        ChartConfig::xy("state", "customers").with_scale("Plasma"),
        state_table(states, "customers", "Customers", |s| {
            CellValue::Integer(s.customers as i64)
        }),
    )
}

fn seller_map(states: &[StateBreakdown]) -> ChartSpec {
    ChartSpec::new(
        "sellers_by_state",
        "Sellers by state",
        ChartKind::Choropleth,
        ChartConfig::xy("state", "sellers").with_scale("Viridis"),
        state_table(states, "sellers", "Sellers", |s| {
            CellValue::Integer(s.sellers as i64)
        }),
    )
}

fn comparison_chart(states: &[StateBreakdown]) -> ChartSpec {
    let mut table = AggregatedTable::new(vec![
        ColumnHeader::grouping("state", "State"),
        ColumnHeader::aggregated("customers", "Customers"),
        ColumnHeader::aggregated("sellers", "Sellers"),
    ]);
    for s in states.iter().take(COMPARISON_STATES) {
        table.push_row(vec![
            ("state", CellValue::Text(s.state.clone())),
            ("customers", CellValue::Integer(s.customers as i64)),
            ("sellers", CellValue::Integer(s.sellers as i64)),
        ]);
    }
    ChartSpec::new(
        "customers_vs_sellers",
        "Customers vs sellers by state",
        ChartKind::Bar,
        ChartConfig::xy("state", "customers"),
        table,
    )
}

fn ratio_map(states: &[StateBreakdown]) -> ChartSpec {
    ChartSpec::new(
        "customer_seller_ratio",
        "Customer/seller ratio by state",
        ChartKind::Choropleth,
        ChartConfig::xy("state", "ratio").with_scale("RdBu"),
        state_table(states, "ratio", "Customers per seller", |s| {
            CellValue::Number(s.ratio)
        }),
    )
}

fn density_chart(sample: &[GeoSamplePoint]) -> ChartSpec {
    let table = AggregatedTable::two_columns(
        ("lat", "Latitude"),
        ("lng", "Longitude"),
        sample
            .iter()
            .map(|p| (CellValue::Number(p.lat), CellValue::Number(p.lng))),
    );
    ChartSpec::new(
        "geolocation_density",
        "Customer density",
        ChartKind::DensityMap,
        ChartConfig::xy("lat", "lng"),
        table,
    )
}
