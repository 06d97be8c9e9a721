//! Shoe Fit - footwear size recommendations from foot measurements
//!
//! This library scores every size of every shoe model against a user's foot
//! measurements and ranks the models by their best-fitting size.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_compatibility, detail_score, rank, score, Matcher};
pub use models::{Catalog, Recommendation, ShoeDetail, ShoeModel, ShoeSizeRecord, Sizing, UserMeasurement};
