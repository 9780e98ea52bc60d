use std::collections::HashMap;

use contracts::analytics::{AggregatedTable, CellValue};
use contracts::charts::{ChartConfig, ChartKind, ChartSpec};
use contracts::dashboards::d403_customers::{BucketScore, CustomersResponse, ReviewScoreCount};

use crate::analytics::derive::{self, DeliveryBucket};
use crate::analytics::{aggregate, join};
use crate::datasets::records::Review;
use crate::datasets::Dataset;

/// Customer satisfaction dashboard: review score distribution and mean
/// score against delivery time.
pub fn get_customers(dataset: &Dataset) -> CustomersResponse {
    let mut review_scores: Vec<ReviewScoreCount> =
        aggregate::count_by(dataset.order_reviews.iter(), |r| r.review_score)
            .into_iter()
            .map(|(score, count)| ReviewScoreCount { score, count })
            .collect();
    review_scores.sort_by_key(|r| r.score);

    // Delivered orders joined to their review. An order without a review
    // stays in the join but carries no score, so the mean skips it.
    let review_by_order = join::index_unique_by(&dataset.order_reviews, |r| r.order_id.as_str());
    let delivered: Vec<(DeliveryBucket, Option<&Review>)> =
        join::left_join(&dataset.orders, &review_by_order, |o| o.order_id.as_str())
            .into_iter()
            .filter(|(o, _)| o.order_status == derive::DELIVERED)
            .filter_map(|(o, review)| {
                let days = derive::delivery_time_days(o)?;
                let bucket = DeliveryBucket::from_days(days)?;
                Some((bucket, review))
            })
            .collect();

    let bucket_means: HashMap<DeliveryBucket, f64> = aggregate::mean_by(
        delivered.iter(),
        |(bucket, _)| *bucket,
        |(_, review)| review.map(|r| r.review_score as f64),
    )
    .into_iter()
    .collect();

    // Fixed bucket order; buckets with no reviewed orders are omitted
    let delivery_buckets: Vec<BucketScore> = DeliveryBucket::ALL
        .iter()
        .filter_map(|bucket| {
            bucket_means.get(bucket).map(|mean_score| BucketScore {
                bucket: bucket.label().to_string(),
                mean_score: *mean_score,
            })
        })
        .collect();

    let charts = vec![
        scores_chart(&review_scores),
        buckets_chart(&delivery_buckets),
    ];

    CustomersResponse {
        review_scores,
        delivery_buckets,
        charts,
    }
}

fn scores_chart(points: &[ReviewScoreCount]) -> ChartSpec {
    let table = AggregatedTable::two_columns(
        ("score", "Review score"),
        ("count", "Reviews"),
        points.iter().map(|p| {
            (
                CellValue::Integer(p.score as i64),
                CellValue::Integer(p.count as i64),
            )
        }),
    );
    ChartSpec::new(
        "review_scores",
        "Review score distribution",
        ChartKind::Bar,
        ChartConfig::xy("score", "count")
            .with_color("score")
            .with_scale("RdBu"),
        table,
    )
}

fn buckets_chart(points: &[BucketScore]) -> ChartSpec {
    let table = AggregatedTable::two_columns(
        ("bucket", "Delivery time"),
        ("mean_score", "Mean review score"),
        points.iter().map(|p| {
            (
                CellValue::Text(p.bucket.clone()),
                CellValue::Number(p.mean_score),
            )
        }),
    );
    ChartSpec::new(
        "score_by_delivery_time",
        "Review score by delivery time",
        ChartKind::Bar,
        ChartConfig::xy("bucket", "mean_score")
            .with_color("mean_score")
            .with_scale("RdYlGn"),
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
            // 3 days -> "0-5 days"
            testing::delivered_order("o1", "c1", "2018-01-01 10:00:00", "2018-01-04 10:00:00"),
            // 5 days exactly, still "0-5 days"
            testing::delivered_order("o2", "c2", "2018-01-01 10:00:00", "2018-01-06 10:00:00"),
            // 40 days -> ">30 days"
            testing::delivered_order("o3", "c3", "2018-01-01 10:00:00", "2018-02-10 10:00:00"),
            // delivered but never reviewed
            testing::delivered_order("o4", "c4", "2018-01-01 10:00:00", "2018-01-03 10:00:00"),
            // not delivered, excluded from bucket analysis
            testing::order("o5", "c5", "shipped", "2018-01-01 10:00:00"),
        ];
        ds.order_reviews = vec![
            testing::review("o1", 5),
            testing::review("o2", 4),
            testing::review("o3", 1),
            testing::review("o5", 3),
        ];
        ds
    }

    #[test]
    fn test_score_distribution_ascending() {
        let response = get_customers(&sample());
        let scores: Vec<_> = response.review_scores.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_bucket_means_in_bucket_order() {
        let response = get_customers(&sample());
        assert_eq!(response.delivery_buckets.len(), 2);
        assert_eq!(response.delivery_buckets[0].bucket, "0-5 days");
        // o1 (5) and o2 (4); unreviewed o4 does not drag the mean down
        assert_eq!(response.delivery_buckets[0].mean_score, 4.5);
        assert_eq!(response.delivery_buckets[1].bucket, ">30 days");
        assert_eq!(response.delivery_buckets[1].mean_score, 1.0);
    }

    #[test]
    fn test_undelivered_orders_excluded_from_buckets() {
        let mut ds = testing::empty_dataset();
        ds.orders = vec![testing::order("o1", "c1", "shipped", "2018-01-01 10:00:00")];
        ds.order_reviews = vec![testing::review("o1", 5)];
        let response = get_customers(&ds);
        assert!(response.delivery_buckets.is_empty());
        // the review still counts in the distribution
        assert_eq!(response.review_scores.len(), 1);
    }

    #[test]
    fn test_empty_dataset() {
        let response = get_customers(&testing::empty_dataset());
        assert!(response.review_scores.is_empty());
        assert!(response.delivery_buckets.is_empty());
        assert_eq!(response.charts.len(), 2);
    }
}
