// Service exports
pub mod catalog;
pub mod store;

pub use catalog::CatalogError;
pub use store::{MeasurementStore, SessionKey, StoreError, StoreStats};
