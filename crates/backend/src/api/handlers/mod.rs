// Dataset and query-engine handlers
pub mod aggregate;
pub mod datasets;

// Dashboard handlers (d401-d405)
pub mod d401_overview;
pub mod d402_sales;
pub mod d403_customers;
pub mod d404_products;
pub mod d405_geography;
