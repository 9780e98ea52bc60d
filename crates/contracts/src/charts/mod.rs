use serde::{Deserialize, Serialize};

use crate::analytics::AggregatedTable;

/// Rendering mode for a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Choropleth,
    Scatter3d,
    DensityMap,
}

/// Bar orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Rendering configuration: which table columns feed which chart axes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Column ID for the x axis (or locations for choropleth)
    pub x_field: String,
    /// Column ID for the y axis (or color intensity for choropleth)
    pub y_field: String,
    /// Column ID driving the color dimension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_field: Option<String>,
    pub orientation: Orientation,
    /// Named continuous color scale (e.g., "Viridis")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scale: Option<String>,
}

impl ChartConfig {
    pub fn xy(x_field: &str, y_field: &str) -> Self {
        Self {
            x_field: x_field.to_string(),
            y_field: y_field.to_string(),
            color_field: None,
            orientation: Orientation::Vertical,
            color_scale: None,
        }
    }

    pub fn horizontal(x_field: &str, y_field: &str) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            ..Self::xy(x_field, y_field)
        }
    }

    pub fn with_color(mut self, field: &str) -> Self {
        self.color_field = Some(field.to_string());
        self
    }

    pub fn with_scale(mut self, scale: &str) -> Self {
        self.color_scale = Some(scale.to_string());
        self
    }
}

/// Renderable chart specification: an aggregated table plus the rendering
/// mode and axis mapping. The table is carried by value and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Chart identifier, unique within its dashboard
    pub id: String,
    /// Display title
    pub title: String,
    pub kind: ChartKind,
    pub config: ChartConfig,
    pub table: AggregatedTable,
}

impl ChartSpec {
    pub fn new(
        id: &str,
        title: &str,
        kind: ChartKind,
        config: ChartConfig,
        table: AggregatedTable,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            config,
            table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::CellValue;

    #[test]
    fn test_chart_kind_snake_case() {
        assert_eq!(
            serde_json::to_value(ChartKind::DensityMap).unwrap(),
            serde_json::json!("density_map")
        );
        assert_eq!(
            serde_json::to_value(ChartKind::Scatter3d).unwrap(),
            serde_json::json!("scatter3d")
        );
    }

    #[test]
    fn test_chart_spec_round_trip() {
        let table = AggregatedTable::two_columns(
            ("hour", "Hour"),
            ("count", "Orders"),
            vec![(CellValue::Integer(10), CellValue::Integer(42))],
        );
        let spec = ChartSpec::new(
            "hourly_orders",
            "Orders by hour of day",
            ChartKind::Bar,
            ChartConfig::xy("hour", "count").with_scale("Viridis"),
            table,
        );
        let json = serde_json::to_string(&spec).unwrap();
        let back: ChartSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "hourly_orders");
        assert_eq!(back.kind, ChartKind::Bar);
        assert_eq!(back.config.color_scale.as_deref(), Some("Viridis"));
        assert_eq!(back.table.rows.len(), 1);
    }
}
