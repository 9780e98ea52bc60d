use chrono::NaiveDate;

use crate::datasets::records::Order;

use super::derive;

/// Inclusive purchase-date range. Orders with an unknown purchase
/// timestamp never match.
pub fn in_date_range(order: &Order, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    let Some(date) = derive::purchase_date(order) else {
        return false;
    };
    from.map_or(true, |f| date >= f) && to.map_or(true, |t| date <= t)
}

/// Inclusive hour-of-day range
pub fn in_hour_range(order: &Order, from: Option<u32>, to: Option<u32>) -> bool {
    let Some(hour) = derive::purchase_hour(order) else {
        return false;
    };
    from.map_or(true, |f| hour >= f) && to.map_or(true, |t| hour <= t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::records::Order;
    use crate::datasets::testing;

    fn at(ts: &str) -> Order {
        testing::order("o1", "c1", "created", ts)
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let order = at("2018-01-05 10:00:00");
        assert!(in_date_range(&order, Some(date("2018-01-05")), Some(date("2018-01-05"))));
        assert!(in_date_range(&order, Some(date("2018-01-01")), None));
        assert!(!in_date_range(&order, Some(date("2018-01-06")), None));
        assert!(!in_date_range(&order, None, Some(date("2018-01-04"))));
    }

    #[test]
    fn test_hour_range_is_inclusive() {
        let order = at("2018-01-05 23:59:00");
        assert!(in_hour_range(&order, Some(23), Some(23)));
        assert!(in_hour_range(&order, None, None));
        assert!(!in_hour_range(&order, Some(0), Some(22)));
    }

    #[test]
    fn test_unknown_timestamp_never_matches() {
        let mut order = at("2018-01-05 10:00:00");
        order.order_purchase_timestamp = None;
        assert!(!in_date_range(&order, None, None));
        assert!(!in_hour_range(&order, None, None));
    }
}
