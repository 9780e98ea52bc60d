use std::collections::HashMap;

use contracts::analytics::{AggregatedTable, CellValue};
use contracts::charts::{ChartConfig, ChartKind, ChartSpec};
use contracts::dashboards::d404_products::{CategoryCount, CategoryMean, ProductsResponse};

use crate::analytics::{aggregate, join};
use crate::datasets::records::{OrderItem, Product};
use crate::datasets::Dataset;

const TOP_CATEGORIES: usize = 10;

// Product weights outside this open interval are treated as data entry
// errors and excluded from the weight ranking.
const MIN_WEIGHT_G: f64 = 0.0;
const MAX_WEIGHT_G: f64 = 30_000.0;

/// Product analysis dashboard: category rankings by items sold, mean
/// price and mean weight.
pub fn get_products(dataset: &Dataset) -> ProductsResponse {
    let product_by_id = join::index_unique_by(&dataset.products, |p| p.product_id.as_str());
    let english: HashMap<&str, &str> = dataset
        .category_translation
        .iter()
        .map(|t| {
            (
                t.product_category_name.as_str(),
                t.product_category_name_english.as_str(),
            )
        })
        .collect();

    // Order items joined to their product's category. Items whose product
    // is unknown or uncategorized are skipped.
    let categorized: Vec<(String, &OrderItem)> = dataset
        .order_items
        .iter()
        .filter_map(|item| {
            let product = product_by_id.get(item.product_id.as_str())?;
            let category = category_name(product, &english)?;
            Some((category, item))
        })
        .collect();

    let top_categories: Vec<CategoryCount> = aggregate::top_n(
        aggregate::count_by(categorized.iter(), |(category, _)| category.clone()),
        TOP_CATEGORIES,
    )
    .into_iter()
    .map(|(category, items_sold)| CategoryCount {
        category,
        items_sold,
    })
    .collect();

    let top_prices: Vec<CategoryMean> = aggregate::top_n(
        aggregate::mean_by(
            categorized.iter(),
            |(category, _)| category.clone(),
            |(_, item)| Some(item.price),
        ),
        TOP_CATEGORIES,
    )
    .into_iter()
    .map(|(category, value)| CategoryMean { category, value })
    .collect();

    // Weight ranks over the product catalog itself, one row per product
    let top_weights: Vec<CategoryMean> = aggregate::top_n(
        aggregate::mean_by(
            dataset.products.iter(),
            |p| category_name(p, &english).unwrap_or_default(),
            |p| {
                p.product_weight_g
                    .filter(|w| *w > MIN_WEIGHT_G && *w < MAX_WEIGHT_G)
            },
        )
        .into_iter()
        .filter(|(category, _)| !category.is_empty())
        .collect(),
        TOP_CATEGORIES,
    )
    .into_iter()
    .map(|(category, value)| CategoryMean { category, value })
    .collect();

    let charts = vec![
        categories_chart(&top_categories),
        prices_chart(&top_prices),
        weights_chart(&top_weights),
    ];

    ProductsResponse {
        top_categories,
        top_prices,
        top_weights,
        charts,
    }
}

/// English category name with fallback to the source-language name;
/// `None` for uncategorized products.
fn category_name(product: &Product, english: &HashMap<&str, &str>) -> Option<String> {
    let source = product.product_category_name.as_deref()?;
    Some(
        english
            .get(source)
            .copied()
            .unwrap_or(source)
            .to_string(),
    )
}

fn categories_chart(points: &[CategoryCount]) -> ChartSpec {
    let table = AggregatedTable::two_columns(
        ("category", "Category"),
        ("items_sold", "Items sold"),
        points.iter().map(|p| {
            (
                CellValue::Text(p.category.clone()),
                CellValue::Integer(p.items_sold as i64),
            )
        }),
    );
    ChartSpec::new(
        "top_categories",
        "Top categories by items sold",
        ChartKind::Bar,
        ChartConfig::horizontal("items_sold", "category")
            .with_color("items_sold")
            .with_scale("Blues"),
        table,
    )
}

fn prices_chart(points: &[CategoryMean]) -> ChartSpec {
    let table = AggregatedTable::two_columns(
        ("category", "Category"),
        ("mean_price", "Mean price (R$)"),
        points.iter().map(|p| {
            (
                CellValue::Text(p.category.clone()),
                CellValue::Number(p.value),
            )
        }),
    );
    ChartSpec::new(
        "top_prices",
        "Most expensive categories",
        ChartKind::Bar,
        ChartConfig::horizontal("mean_price", "category")
            .with_color("mean_price")
            .with_scale("Reds"),
        table,
    )
}

fn weights_chart(points: &[CategoryMean]) -> ChartSpec {
    let table = AggregatedTable::two_columns(
        ("category", "Category"),
        ("mean_weight", "Mean weight (g)"),
        points.iter().map(|p| {
            (
                CellValue::Text(p.category.clone()),
                CellValue::Number(p.value),
            )
        }),
    );
    ChartSpec::new(
        "top_weights",
        "Heaviest categories",
        ChartKind::Bar,
        ChartConfig::horizontal("mean_weight", "category")
            .with_color("mean_weight")
            .with_scale("Greens"),
        table,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::testing;

    fn sample() -> Dataset {
        let mut ds = testing::empty_dataset();
        ds.products = vec![
            testing::product("p1", Some("informatica"), Some(500.0)),
            testing::product("p2", Some("cama_mesa_banho"), Some(2000.0)),
            testing::product("p3", None, Some(100.0)),
            // weight out of range, excluded from the weight ranking
            testing::product("p4", Some("informatica"), Some(50_000.0)),
        ];
        ds.category_translation = vec![testing::translation("informatica", "computers")];
        ds.order_items = vec![
            testing::item("o1", 1, "p1", "s1", 100.0),
            testing::item("o1", 2, "p1", "s1", 200.0),
            testing::item("o2", 1, "p2", "s1", 50.0),
            // p3 has no category, skipped; p9 is an unknown product
            testing::item("o3", 1, "p3", "s1", 10.0),
            testing::item("o4", 1, "p9", "s1", 10.0),
        ];
        ds
    }

    #[test]
    fn test_top_categories_use_english_names() {
        let response = get_products(&sample());
        assert_eq!(response.top_categories.len(), 2);
        assert_eq!(response.top_categories[0].category, "computers");
        assert_eq!(response.top_categories[0].items_sold, 2);
        // untranslated category keeps its source name
        assert_eq!(response.top_categories[1].category, "cama_mesa_banho");
    }

    #[test]
    fn test_mean_prices() {
        let response = get_products(&sample());
        let computers = response
            .top_prices
            .iter()
            .find(|c| c.category == "computers")
            .unwrap();
        assert_eq!(computers.value, 150.0);
    }

    #[test]
    fn test_weight_outliers_excluded() {
        let response = get_products(&sample());
        let computers = response
            .top_weights
            .iter()
            .find(|c| c.category == "computers")
            .unwrap();
        // p4's 50kg weight is out of range, so only p1 counts
        assert_eq!(computers.value, 500.0);
    }

    #[test]
    fn test_top_n_caps_at_ten() {
        let mut ds = testing::empty_dataset();
        for i in 0..15 {
            let category = format!("cat{i}");
            let product_id = format!("p{i}");
            ds.products.push(testing::product(&product_id, Some(&category), Some(100.0)));
            ds.order_items.push(testing::item("o1", 1, &product_id, "s1", 10.0));
        }
        let response = get_products(&ds);
        assert_eq!(response.top_categories.len(), 10);
        assert_eq!(response.top_prices.len(), 10);
        assert_eq!(response.top_weights.len(), 10);
    }

    #[test]
    fn test_empty_dataset() {
        let response = get_products(&testing::empty_dataset());
        assert!(response.top_categories.is_empty());
        assert_eq!(response.charts.len(), 3);
    }
}
