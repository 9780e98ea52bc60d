pub mod aggregate;
pub mod derive;
pub mod filters;
pub mod join;
pub mod query;
