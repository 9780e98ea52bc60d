use std::path::Path;

use contracts::datasets::{DatasetSummary, TableSummary};

use super::loader::{self, DatasetError};
use super::records::{
    CategoryTranslation, Customer, GeoPoint, Order, OrderItem, Payment, Product, Review, Seller,
};

/// Immutable snapshot of the nine source tables, loaded once per process.
/// The entry point wraps it in an `Arc` and hands it to every consumer;
/// nothing mutates it after the load.
#[derive(Debug)]
pub struct Dataset {
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub order_payments: Vec<Payment>,
    pub order_reviews: Vec<Review>,
    pub sellers: Vec<Seller>,
    pub category_translation: Vec<CategoryTranslation>,
    pub geolocation: Vec<GeoPoint>,
}

impl Dataset {
    /// Load all nine required tables from `dir`. All-or-nothing: the first
    /// failure aborts the load and the dataset must be treated as
    /// unavailable.
    pub fn load(dir: &Path) -> Result<Self, DatasetError> {
        Ok(Self {
            orders: loader::read_table(dir, "orders", "olist_orders_dataset.csv")?,
            order_items: loader::read_table(dir, "order_items", "olist_order_items_dataset.csv")?,
            products: loader::read_table(dir, "products", "olist_products_dataset.csv")?,
            customers: loader::read_table(dir, "customers", "olist_customers_dataset.csv")?,
            order_payments: loader::read_table(
                dir,
                "order_payments",
                "olist_order_payments_dataset.csv",
            )?,
            order_reviews: loader::read_table(
                dir,
                "order_reviews",
                "olist_order_reviews_dataset.csv",
            )?,
            sellers: loader::read_table(dir, "sellers", "olist_sellers_dataset.csv")?,
            category_translation: loader::read_table(
                dir,
                "category_translation",
                "product_category_name_translation.csv",
            )?,
            geolocation: loader::read_table(dir, "geolocation", "olist_geolocation_dataset.csv")?,
        })
    }

    /// Row counts per table plus the purchase-date bounds
    pub fn summary(&self) -> DatasetSummary {
        let mut first_purchase = None;
        let mut last_purchase = None;
        for date in self
            .orders
            .iter()
            .filter_map(|o| o.order_purchase_timestamp)
            .map(|ts| ts.date())
        {
            first_purchase = Some(match first_purchase {
                Some(d) if d < date => d,
                _ => date,
            });
            last_purchase = Some(match last_purchase {
                Some(d) if d > date => d,
                _ => date,
            });
        }

        let tables = vec![
            table_summary("orders", self.orders.len()),
            table_summary("order_items", self.order_items.len()),
            table_summary("products", self.products.len()),
            table_summary("customers", self.customers.len()),
            table_summary("order_payments", self.order_payments.len()),
            table_summary("order_reviews", self.order_reviews.len()),
            table_summary("sellers", self.sellers.len()),
            table_summary("category_translation", self.category_translation.len()),
            table_summary("geolocation", self.geolocation.len()),
        ];

        DatasetSummary {
            tables,
            first_purchase,
            last_purchase,
        }
    }
}

fn table_summary(table: &str, rows: usize) -> TableSummary {
    TableSummary {
        table: table.to_string(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    /// Minimal but complete fixture: all nine tables, one or two rows each.
    fn write_fixture(dir: &Path) {
        std::fs::create_dir_all(dir).unwrap();
        let write = |file: &str, body: &str| std::fs::write(dir.join(file), body).unwrap();

        write(
            "olist_orders_dataset.csv",
            "order_id,customer_id,order_status,order_purchase_timestamp,order_approved_at,order_delivered_carrier_date,order_delivered_customer_date,order_estimated_delivery_date\n\
             o1,c1,delivered,2018-01-01 10:00:00,2018-01-01 11:00:00,2018-01-02 09:00:00,2018-01-06 10:00:00,2018-01-10 00:00:00\n\
             o2,c2,shipped,2018-02-03 15:30:00,2018-02-03 16:00:00,,,2018-02-20 00:00:00\n",
        );
        write(
            "olist_order_items_dataset.csv",
            "order_id,order_item_id,product_id,seller_id,price,freight_value\n\
             o1,1,p1,s1,50.0,5.0\n",
        );
        write(
            "olist_products_dataset.csv",
            "product_id,product_category_name,product_weight_g,product_length_cm,product_height_cm,product_width_cm\n\
             p1,moveis_decoracao,1200,30,10,20\n",
        );
        write(
            "olist_customers_dataset.csv",
            "customer_id,customer_unique_id,customer_city,customer_state\n\
             c1,u1,sao paulo,SP\n\
             c2,u2,rio de janeiro,RJ\n",
        );
        write(
            "olist_order_payments_dataset.csv",
            "order_id,payment_sequential,payment_type,payment_installments,payment_value\n\
             o1,1,credit_card,2,50.0\n\
             o1,2,voucher,1,30.0\n",
        );
        write(
            "olist_order_reviews_dataset.csv",
            "order_id,review_score\no1,5\n",
        );
        write(
            "olist_sellers_dataset.csv",
            "seller_id,seller_city,seller_state\ns1,campinas,SP\n",
        );
        write(
            "product_category_name_translation.csv",
            "product_category_name,product_category_name_english\n\
             moveis_decoracao,furniture_decor\n",
        );
        write(
            "olist_geolocation_dataset.csv",
            "geolocation_lat,geolocation_lng,geolocation_city,geolocation_state\n\
             -23.5,-46.6,sao paulo,SP\n",
        );
    }

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "olist-registry-{name}-{}",
            std::process::id()
        ));
        write_fixture(&dir);
        dir
    }

    #[test]
    fn test_load_all_tables() {
        let dir = fixture_dir("load");
        let dataset = Dataset::load(&dir).unwrap();
        assert_eq!(dataset.orders.len(), 2);
        assert_eq!(dataset.order_payments.len(), 2);
        assert_eq!(dataset.customers.len(), 2);
        assert_eq!(dataset.geolocation.len(), 1);
    }

    #[test]
    fn test_load_fails_when_one_table_is_missing() {
        let dir = fixture_dir("partial");
        std::fs::remove_file(dir.join("olist_sellers_dataset.csv")).unwrap();
        let err = Dataset::load(&dir).unwrap_err();
        assert!(matches!(err, DatasetError::Unavailable { table: "sellers", .. }));
    }

    #[test]
    fn test_summary_reports_counts_and_bounds() {
        let dir = fixture_dir("summary");
        let dataset = Dataset::load(&dir).unwrap();
        let summary = dataset.summary();
        assert_eq!(summary.tables.len(), 9);
        assert_eq!(summary.total_rows(), 2 + 1 + 1 + 2 + 2 + 1 + 1 + 1 + 1);
        assert_eq!(
            summary.first_purchase,
            Some(chrono::NaiveDate::from_ymd_opt(2018, 1, 1).unwrap())
        );
        assert_eq!(
            summary.last_purchase,
            Some(chrono::NaiveDate::from_ymd_opt(2018, 2, 3).unwrap())
        );
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = fixture_dir("idempotent");
        let a = Dataset::load(&dir).unwrap();
        let b = Dataset::load(&dir).unwrap();
        assert_eq!(a.orders.len(), b.orders.len());
        assert_eq!(a.summary().total_rows(), b.summary().total_rows());
        assert_eq!(
            a.orders[0].order_purchase_timestamp,
            b.orders[0].order_purchase_timestamp
        );
    }
}
