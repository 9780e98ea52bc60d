use std::collections::HashMap;

use contracts::analytics::{AggregatedTable, CellValue};
use contracts::charts::{ChartConfig, ChartKind, ChartSpec};
use contracts::dashboards::d402_sales::{
    MonthlyRevenuePoint, PaymentTypeCount, SalesResponse, StatusDeliveryTime, StatusShare,
};

use crate::analytics::{aggregate, derive};
use crate::datasets::Dataset;

/// Sales dashboard: monthly revenue, payment methods, delivery time by
/// order status, and order-status share.
pub fn get_sales(dataset: &Dataset) -> SalesResponse {
    let paid: HashMap<String, f64> = aggregate::sum_by(
        dataset.order_payments.iter(),
        |p| p.order_id.clone(),
        |p| Some(p.payment_value),
    )
    .into_iter()
    .collect();

    // Monthly revenue, chronological ("YYYY-MM" sorts as text)
    let mut monthly_revenue: Vec<MonthlyRevenuePoint> = aggregate::sum_by(
        dataset
            .orders
            .iter()
            .filter_map(|o| derive::purchase_month(o).map(|m| (m, o))),
        |(month, _)| month.clone(),
        |(_, o)| paid.get(&o.order_id).copied(),
    )
    .into_iter()
    .map(|(month, revenue)| MonthlyRevenuePoint { month, revenue })
    .collect();
    monthly_revenue.sort_by(|a, b| a.month.cmp(&b.month));

    // Payment records by type, descending
    let payment_types: Vec<PaymentTypeCount> = {
        let counts = aggregate::count_by(dataset.order_payments.iter(), |p| {
            p.payment_type.clone()
        });
        let n = counts.len();
        aggregate::top_n(counts, n)
            .into_iter()
            .map(|(payment_type, count)| PaymentTypeCount {
                payment_type,
                count,
            })
            .collect()
    };

    // Mean delivery time per order status; statuses whose orders never
    // reached the customer have no delivery time and drop out.
    let delivery_by_status: Vec<StatusDeliveryTime> = aggregate::mean_by(
        dataset.orders.iter(),
        |o| o.order_status.clone(),
        |o| derive::delivery_time_days(o),
    )
    .into_iter()
    .map(|(status, mean_days)| StatusDeliveryTime { status, mean_days })
    .collect();

    // Status share in percent
    let total_orders = dataset.orders.len();
    let status_share: Vec<StatusShare> =
        aggregate::count_by(dataset.orders.iter(), |o| o.order_status.clone())
            .into_iter()
            .map(|(status, count)| StatusShare {
                status,
                percent: count as f64 / total_orders as f64 * 100.0,
            })
            .collect();

    let charts = vec![
        monthly_chart(&monthly_revenue),
        payment_chart(&payment_types),
        delivery_chart(&delivery_by_status),
        share_chart(&status_share),
    ];

    SalesResponse {
        monthly_revenue,
        payment_types,
        delivery_by_status,
        status_share,
        charts,
    }
}

fn monthly_chart(points: &[MonthlyRevenuePoint]) -> ChartSpec {
    let table = AggregatedTable::two_columns(
        ("month", "Month"),
        ("revenue", "Revenue (R$)"),
        points.iter().map(|p| {
            (
                CellValue::Text(p.month.clone()),
                CellValue::Number(p.revenue),
            )
        }),
    );
    ChartSpec::new(
        "monthly_revenue",
        "Revenue by month",
        ChartKind::Line,
        ChartConfig::xy("month", "revenue"),
        table,
    )
}

fn payment_chart(points: &[PaymentTypeCount]) -> ChartSpec {
    let table = AggregatedTable::two_columns(
        ("payment_type", "Payment type"),
        ("count", "Payments"),
        points.iter().map(|p| {
            (
                CellValue::Text(p.payment_type.clone()),
                CellValue::Integer(p.count as i64),
            )
        }),
    );
    ChartSpec::new(
        "payment_types",
        "Payments by type",
        ChartKind::Bar,
        ChartConfig::xy("payment_type", "count").with_color("payment_type"),
        table,
    )
}

fn delivery_chart(points: &[StatusDeliveryTime]) -> ChartSpec {
    let table = AggregatedTable::two_columns(
        ("status", "Order status"),
        ("mean_days", "Delivery time (days)"),
        points.iter().map(|p| {
            (
                CellValue::Text(p.status.clone()),
                CellValue::Number(p.mean_days),
            )
        }),
    );
    ChartSpec::new(
        "delivery_by_status",
        "Mean delivery time by order status",
        ChartKind::Bar,
        ChartConfig::xy("status", "mean_days")
            .with_color("mean_days")
            .with_scale("Viridis"),
        table,
    )
}

fn share_chart(points: &[StatusShare]) -> ChartSpec {
    let table = AggregatedTable::two_columns(
        ("status", "Order status"),
        ("percent", "Share (%)"),
        points.iter().map(|p| {
            (
                CellValue::Text(p.status.clone()),
                CellValue::Number(p.percent),
            )
        }),
    );
    ChartSpec::new(
        "status_share",
        "Order status share",
        ChartKind::Pie,
        ChartConfig::xy("status", "percent").with_scale("RdBu"),
        table,
    )
}
