pub mod analytics;
pub mod charts;
pub mod dashboards;
pub mod datasets;
