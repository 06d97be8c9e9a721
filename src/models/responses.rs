use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub catalog_models: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response after forgetting a session's measurements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearMeasurementsResponse {
    pub success: bool,
    pub message: String,
}

/// Sizing profile of a model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoeTypeResponse {
    #[serde(rename = "shoeType")]
    pub shoe_type: String,
}

/// A model picked at random from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomShoeResponse {
    pub model: String,
    pub sizes_available: usize,
}
