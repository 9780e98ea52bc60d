pub mod loader;
pub mod records;
pub mod registry;

pub use loader::DatasetError;
pub use registry::Dataset;
