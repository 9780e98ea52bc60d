use chrono::{Datelike, NaiveDate, Timelike};

use crate::datasets::records::Order;

/// Orders in this status count toward delivery-time analysis
pub const DELIVERED: &str = "delivered";

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fractional days between purchase and customer delivery; `None` unless
/// both timestamps are known.
pub fn delivery_time_days(order: &Order) -> Option<f64> {
    let purchase = order.order_purchase_timestamp?;
    let delivered = order.order_delivered_customer_date?;
    Some((delivered - purchase).num_seconds() as f64 / SECONDS_PER_DAY)
}

/// Date part of the purchase timestamp
pub fn purchase_date(order: &Order) -> Option<NaiveDate> {
    order.order_purchase_timestamp.map(|ts| ts.date())
}

/// Hour of day (0..=23) of the purchase timestamp
pub fn purchase_hour(order: &Order) -> Option<u32> {
    order.order_purchase_timestamp.map(|ts| ts.hour())
}

/// Year-month of the purchase timestamp as "YYYY-MM", which sorts
/// chronologically as text
pub fn purchase_month(order: &Order) -> Option<String> {
    order
        .order_purchase_timestamp
        .map(|ts| format!("{:04}-{:02}", ts.year(), ts.month()))
}

/// Fixed delivery-time buckets. Bins are right-closed: a value on a
/// boundary belongs to the lower bucket, so exactly 5.0 days falls in
/// "0-5 days" (and 0.0 folds into the first bucket).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryBucket {
    UpTo5,
    UpTo10,
    UpTo15,
    UpTo20,
    UpTo30,
    Over30,
}

impl DeliveryBucket {
    /// All buckets in ascending order, for stable chart axes
    pub const ALL: [DeliveryBucket; 6] = [
        DeliveryBucket::UpTo5,
        DeliveryBucket::UpTo10,
        DeliveryBucket::UpTo15,
        DeliveryBucket::UpTo20,
        DeliveryBucket::UpTo30,
        DeliveryBucket::Over30,
    ];

    /// Bucket for a delivery time in days. Negative or non-finite values
    /// are data anomalies and map to `None`.
    pub fn from_days(days: f64) -> Option<Self> {
        if !days.is_finite() || days < 0.0 {
            return None;
        }
        Some(if days <= 5.0 {
            DeliveryBucket::UpTo5
        } else if days <= 10.0 {
            DeliveryBucket::UpTo10
        } else if days <= 15.0 {
            DeliveryBucket::UpTo15
        } else if days <= 20.0 {
            DeliveryBucket::UpTo20
        } else if days <= 30.0 {
            DeliveryBucket::UpTo30
        } else {
            DeliveryBucket::Over30
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryBucket::UpTo5 => "0-5 days",
            DeliveryBucket::UpTo10 => "5-10 days",
            DeliveryBucket::UpTo15 => "10-15 days",
            DeliveryBucket::UpTo20 => "15-20 days",
            DeliveryBucket::UpTo30 => "20-30 days",
            DeliveryBucket::Over30 => ">30 days",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::testing;

    #[test]
    fn test_delivery_time_five_days() {
        let order = testing::delivered_order("o1", "c1", "2018-01-01 10:00:00", "2018-01-06 10:00:00");
        assert_eq!(delivery_time_days(&order), Some(5.0));
        let bucket = DeliveryBucket::from_days(5.0).unwrap();
        assert_eq!(bucket.label(), "0-5 days");
    }

    #[test]
    fn test_delivery_time_requires_both_timestamps() {
        let order = testing::order("o1", "c1", "shipped", "2018-01-01 10:00:00");
        assert_eq!(delivery_time_days(&order), None);
    }

    #[test]
    fn test_delivery_time_fractional() {
        let order = testing::delivered_order("o1", "c1", "2018-01-01 00:00:00", "2018-01-01 12:00:00");
        assert_eq!(delivery_time_days(&order), Some(0.5));
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(DeliveryBucket::from_days(0.0), Some(DeliveryBucket::UpTo5));
        assert_eq!(DeliveryBucket::from_days(5.0), Some(DeliveryBucket::UpTo5));
        assert_eq!(DeliveryBucket::from_days(5.1), Some(DeliveryBucket::UpTo10));
        assert_eq!(DeliveryBucket::from_days(10.0), Some(DeliveryBucket::UpTo10));
        assert_eq!(DeliveryBucket::from_days(30.0), Some(DeliveryBucket::UpTo30));
        assert_eq!(DeliveryBucket::from_days(30.0001), Some(DeliveryBucket::Over30));
        assert_eq!(DeliveryBucket::from_days(365.0), Some(DeliveryBucket::Over30));
        assert_eq!(DeliveryBucket::from_days(-1.0), None);
        assert_eq!(DeliveryBucket::from_days(f64::NAN), None);
    }

    #[test]
    fn test_buckets_are_exhaustive_and_disjoint() {
        // every finite non-negative value lands in exactly one bucket
        let mut days = 0.0;
        while days < 60.0 {
            let hits = DeliveryBucket::ALL
                .iter()
                .filter(|b| DeliveryBucket::from_days(days) == Some(**b))
                .count();
            assert_eq!(hits, 1, "days={days}");
            days += 0.25;
        }
    }

    #[test]
    fn test_purchase_parts() {
        let order = testing::order("o1", "c1", "created", "2018-03-07 14:25:00");
        assert_eq!(
            purchase_date(&order),
            Some(NaiveDate::from_ymd_opt(2018, 3, 7).unwrap())
        );
        assert_eq!(purchase_hour(&order), Some(14));
        assert_eq!(purchase_month(&order), Some("2018-03".to_string()));
    }
}
