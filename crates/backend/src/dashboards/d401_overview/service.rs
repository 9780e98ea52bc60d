use std::collections::{HashMap, HashSet};

use contracts::analytics::{AggregatedTable, CellValue, ColumnHeader};
use contracts::charts::{ChartConfig, ChartKind, ChartSpec};
use contracts::dashboards::d401_overview::{
    DailyPoint, HourlyPoint, Kpis, OverviewRequest, OverviewResponse,
};

use crate::analytics::{aggregate, derive, filters};
use crate::datasets::records::Order;
use crate::datasets::Dataset;

/// Overview dashboard: headline KPIs, daily orders/revenue over a date
/// range, and hourly order counts over an hour range.
pub fn get_overview(dataset: &Dataset, request: &OverviewRequest) -> OverviewResponse {
    let kpis = build_kpis(dataset);

    // Revenue per order: payments summed by order_id before the join, so
    // the orders table keeps its cardinality.
    let paid: HashMap<String, f64> = aggregate::sum_by(
        dataset.order_payments.iter(),
        |p| p.order_id.clone(),
        |p| Some(p.payment_value),
    )
    .into_iter()
    .collect();

    // (purchase date, order) pairs within the requested range
    let in_range: Vec<(chrono::NaiveDate, &Order)> = dataset
        .orders
        .iter()
        .filter(|o| filters::in_date_range(o, request.date_from, request.date_to))
        .filter_map(|o| derive::purchase_date(o).map(|d| (d, o)))
        .collect();

    let daily_orders = aggregate::count_by(in_range.iter(), |(date, _)| *date);
    let daily_revenue: HashMap<_, _> = aggregate::sum_by(
        in_range.iter(),
        |(date, _)| *date,
        |(_, o)| paid.get(&o.order_id).copied(),
    )
    .into_iter()
    .collect();

    let mut daily: Vec<DailyPoint> = daily_orders
        .into_iter()
        .map(|(date, orders)| DailyPoint {
            date,
            orders,
            revenue: daily_revenue.get(&date).copied().unwrap_or(0.0),
        })
        .collect();
    daily.sort_by_key(|p| p.date);

    let mut hourly: Vec<HourlyPoint> = aggregate::count_by(
        dataset
            .orders
            .iter()
            .filter(|o| filters::in_hour_range(o, request.hour_from, request.hour_to))
            .filter_map(derive::purchase_hour),
        |hour| *hour,
    )
    .into_iter()
    .map(|(hour, orders)| HourlyPoint { hour, orders })
    .collect();
    hourly.sort_by_key(|p| p.hour);

    let charts = vec![daily_chart(&daily), hourly_chart(&hourly)];

    OverviewResponse {
        kpis,
        daily,
        hourly,
        charts,
    }
}

fn build_kpis(dataset: &Dataset) -> Kpis {
    let total_orders = dataset.orders.len() as u64;
    let total_revenue: f64 = dataset
        .order_payments
        .iter()
        .map(|p| p.payment_value)
        .sum();
    let unique_customers = dataset
        .customers
        .iter()
        .map(|c| c.customer_unique_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;
    let unique_products = dataset
        .products
        .iter()
        .map(|p| p.product_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;
    let unique_sellers = dataset
        .sellers
        .iter()
        .map(|s| s.seller_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;
    let avg_order_value = if total_orders == 0 {
        0.0
    } else {
        total_revenue / total_orders as f64
    };

    Kpis {
        total_orders,
        total_revenue,
        unique_customers,
        unique_products,
        unique_sellers,
        avg_order_value,
    }
}

fn daily_chart(daily: &[DailyPoint]) -> ChartSpec {
    let mut table = AggregatedTable::new(vec![
        ColumnHeader::grouping("date", "Date"),
        ColumnHeader::aggregated("orders", "Orders"),
        ColumnHeader::aggregated("revenue", "Revenue (R$)"),
    ]);
    for point in daily {
        table.push_row(vec![
            ("date", CellValue::Text(point.date.to_string())),
            ("orders", CellValue::Integer(point.orders as i64)),
            ("revenue", CellValue::Number(point.revenue)),
        ]);
    }
    ChartSpec::new(
        "daily_orders_revenue",
        "Orders and revenue by day",
        ChartKind::Line,
        ChartConfig::xy("date", "revenue").with_color("orders"),
        table,
    )
}

fn hourly_chart(hourly: &[HourlyPoint]) -> ChartSpec {
    let table = AggregatedTable::two_columns(
        ("hour", "Hour of day"),
        ("orders", "Orders"),
        hourly.iter().map(|p| {
            (
                CellValue::Integer(p.hour as i64),
                CellValue::Integer(p.orders as i64),
            )
        }),
    );
    ChartSpec::new(
        "hourly_orders",
        "Orders by hour of day",
        ChartKind::Bar,
        ChartConfig::xy("hour", "orders")
            .with_color("orders")
            .with_scale("Viridis"),
        table,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::testing;

    fn sample() -> Dataset {
        let mut ds = testing::empty_dataset();
        ds.orders = vec![
            testing::order("o1", "c1", "delivered", "2018-01-01 10:00:00"),
            testing::order("o2", "c2", "delivered", "2018-01-01 14:00:00"),
            testing::order("o3", "c3", "shipped", "2018-01-02 10:00:00"),
        ];
        ds.order_payments = vec![
            testing::payment("o1", 1, "credit_card", 50.0),
            testing::payment("o1", 2, "voucher", 30.0),
            testing::payment("o2", 1, "boleto", 20.0),
            // o3 has no payment record
        ];
        ds.customers = vec![
            testing::customer("c1", "u1", "sao paulo", "SP"),
            testing::customer("c2", "u1", "sao paulo", "SP"),
            testing::customer("c3", "u2", "rio de janeiro", "RJ"),
        ];
        ds
    }

    #[test]
    fn test_kpis() {
        let ds = sample();
        let response = get_overview(&ds, &OverviewRequest::default());
        assert_eq!(response.kpis.total_orders, 3);
        assert_eq!(response.kpis.total_revenue, 100.0);
        // two customer rows share one unique id
        assert_eq!(response.kpis.unique_customers, 2);
        assert!((response.kpis.avg_order_value - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_avg_order_value_zero_orders() {
        let ds = testing::empty_dataset();
        let response = get_overview(&ds, &OverviewRequest::default());
        assert_eq!(response.kpis.avg_order_value, 0.0);
    }

    #[test]
    fn test_daily_revenue_keeps_unpaid_orders() {
        // an order with no payment rows is retained with zero revenue
        let ds = sample();
        let response = get_overview(&ds, &OverviewRequest::default());
        assert_eq!(response.daily.len(), 2);
        assert_eq!(response.daily[0].orders, 2);
        assert_eq!(response.daily[0].revenue, 100.0);
        assert_eq!(response.daily[1].orders, 1);
        assert_eq!(response.daily[1].revenue, 0.0);
    }

    #[test]
    fn test_date_range_filter() {
        let ds = sample();
        let request = OverviewRequest {
            date_from: Some("2018-01-02".parse().unwrap()),
            ..Default::default()
        };
        let response = get_overview(&ds, &request);
        assert_eq!(response.daily.len(), 1);
        assert_eq!(response.daily[0].orders, 1);
    }

    #[test]
    fn test_hourly_counts_and_range() {
        let ds = sample();
        let response = get_overview(&ds, &OverviewRequest::default());
        assert_eq!(
            response
                .hourly
                .iter()
                .map(|p| (p.hour, p.orders))
                .collect::<Vec<_>>(),
            vec![(10, 2), (14, 1)]
        );

        let request = OverviewRequest {
            hour_from: Some(11),
            hour_to: Some(23),
            ..Default::default()
        };
        let response = get_overview(&ds, &request);
        assert_eq!(response.hourly.len(), 1);
        assert_eq!(response.hourly[0].hour, 14);
    }

    #[test]
    fn test_charts_present() {
        let ds = sample();
        let response = get_overview(&ds, &OverviewRequest::default());
        let ids: Vec<_> = response.charts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["daily_orders_revenue", "hourly_orders"]);
    }
}
